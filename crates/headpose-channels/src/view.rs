//! Borrowed rectangular windows onto a [`Channel`].

use crate::channel::{Channel, ChannelLayout};
use crate::error::ChannelError;
use crate::geometry::{Point, Rect};

/// Zero-copy window onto a channel.
///
/// All coordinates passed to a view are relative to its top-left corner and
/// are checked against the window, not just the parent channel.
#[derive(Debug, Clone, Copy)]
pub struct ChannelView<'a> {
    channel: &'a Channel,
    window: Rect,
}

impl<'a> ChannelView<'a> {
    /// Create a view whose window is already known to fit inside `channel`.
    pub(crate) fn new_unchecked(channel: &'a Channel, window: Rect) -> Self {
        Self { channel, window }
    }

    /// Window width in pixels.
    #[must_use]
    pub fn width(&self) -> usize {
        self.window.width
    }

    /// Window height in pixels.
    #[must_use]
    pub fn height(&self) -> usize {
        self.window.height
    }

    /// Window position and size in parent channel coordinates.
    #[must_use]
    pub fn window(&self) -> Rect {
        self.window
    }

    /// Layout of the parent channel.
    #[must_use]
    pub fn layout(&self) -> ChannelLayout {
        self.channel.layout()
    }

    /// Return the parent channel.
    #[must_use]
    pub fn channel(&self) -> &'a Channel {
        self.channel
    }

    /// Sum of the values inside `rect`, relative to the window.
    ///
    /// # Errors
    ///
    /// Returns [`ChannelError::OutOfBounds`] if `rect` does not fit inside the window.
    pub fn rect_sum(&self, rect: Rect) -> Result<f64, ChannelError> {
        self.channel.rect_sum(self.to_parent(rect)?)
    }

    /// Mean of the values inside `rect`, relative to the window.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`ChannelError::DegenerateRect`] | `rect` has zero area |
    /// | [`ChannelError::OutOfBounds`] | `rect` does not fit inside the window |
    pub fn rect_mean(&self, rect: Rect) -> Result<f64, ChannelError> {
        self.channel.rect_mean(self.to_parent(rect)?)
    }

    /// Value at `point`, relative to the window.
    ///
    /// # Errors
    ///
    /// Returns [`ChannelError::OutOfBounds`] if `point` lies outside the window.
    pub fn value(&self, point: Point) -> Result<f64, ChannelError> {
        let parent = self.to_parent(Rect::new(point.x, point.y, 1, 1))?;
        self.channel.value(Point::new(parent.x, parent.y))
    }

    /// Narrow this view to `rect`, relative to the current window.
    ///
    /// # Errors
    ///
    /// Returns [`ChannelError::OutOfBounds`] if `rect` does not fit inside the window.
    pub fn crop(&self, rect: Rect) -> Result<ChannelView<'a>, ChannelError> {
        Ok(Self::new_unchecked(self.channel, self.to_parent(rect)?))
    }

    fn to_parent(&self, rect: Rect) -> Result<Rect, ChannelError> {
        rect.fits_within(self.window.width, self.window.height)
            .then(|| rect.checked_offset_by(self.window))
            .flatten()
            .ok_or(ChannelError::OutOfBounds {
                rect,
                width: self.window.width,
                height: self.window.height,
            })
    }
}
