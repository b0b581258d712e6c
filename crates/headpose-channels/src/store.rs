//! Channel extraction through an external [`ChannelStore`].

use std::fmt;

use tracing::debug;

use crate::channel::{Channel, ChannelLayout};
use crate::error::ChannelError;

/// Identifier of a feature channel kind (intensity, gradient, ...), as
/// understood by a [`ChannelStore`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash,
    serde::Serialize, serde::Deserialize,
)]
pub struct ChannelId(u32);

impl ChannelId {
    /// Wrap a raw channel identifier.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Return the raw identifier.
    #[must_use]
    pub fn id(self) -> u32 {
        self.0
    }
}

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Source of feature channels for a raw image.
///
/// Implementations own the pixel-level feature computation; this crate only
/// fixes the request order and checks that the results line up.
pub trait ChannelStore {
    /// Raw image type the store understands.
    type Image: ?Sized;

    /// Compute channel `id` of `image` in the requested layout.
    ///
    /// # Errors
    ///
    /// Implementations report construction failures as [`ChannelError`].
    fn extract(
        &self,
        image: &Self::Image,
        id: ChannelId,
        layout: ChannelLayout,
    ) -> Result<Channel, ChannelError>;
}

/// Extract the requested channels of `image`, in ascending id order.
///
/// Duplicate ids are requested once.
///
/// # Errors
///
/// | Variant | Condition |
/// |---|---|
/// | [`ChannelError::NoChannels`] | `ids` is empty |
/// | [`ChannelError::SizeMismatch`] | the store returned channels of different sizes |
/// | [`ChannelError::LayoutMismatch`] | the store ignored the requested layout |
/// | any | propagated from [`ChannelStore::extract`] |
pub fn extract_channels<S: ChannelStore>(
    store: &S,
    image: &S::Image,
    ids: &[ChannelId],
    layout: ChannelLayout,
) -> Result<Vec<Channel>, ChannelError> {
    let mut ids = ids.to_vec();
    ids.sort_unstable();
    ids.dedup();

    let channels = ids
        .iter()
        .map(|&id| store.extract(image, id, layout))
        .collect::<Result<Vec<_>, _>>()?;
    check_uniform(&channels, layout)?;

    debug!(n_channels = channels.len(), ?layout, "channels extracted");
    Ok(channels)
}

/// Check that all channels share the size of the first one and `layout`.
///
/// # Errors
///
/// | Variant | Condition |
/// |---|---|
/// | [`ChannelError::NoChannels`] | `channels` is empty |
/// | [`ChannelError::SizeMismatch`] | sizes differ |
/// | [`ChannelError::LayoutMismatch`] | a channel is not in `layout` |
pub fn check_uniform(channels: &[Channel], layout: ChannelLayout) -> Result<(), ChannelError> {
    let first = channels.first().ok_or(ChannelError::NoChannels)?;
    let (width, height) = (first.width(), first.height());
    for (index, channel) in channels.iter().enumerate() {
        if channel.width() != width || channel.height() != height {
            return Err(ChannelError::SizeMismatch {
                index,
                width,
                height,
                got_width: channel.width(),
                got_height: channel.height(),
            });
        }
        if channel.layout() != layout {
            return Err(ChannelError::LayoutMismatch {
                index,
                expected: layout,
            });
        }
    }
    Ok(())
}
