//! Two-dimensional feature channels in raw or integral (summed-area) layout.

use crate::error::ChannelError;
use crate::geometry::{Point, Rect};
use crate::view::ChannelView;

/// Storage layout of a [`Channel`].
///
/// The layout changes how rectangle sums are computed, never what they mean.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash,
    serde::Serialize, serde::Deserialize,
)]
pub enum ChannelLayout {
    /// One value per pixel; rectangle sums cost O(area).
    Raw,
    /// `(width + 1) x (height + 1)` prefix sums with a zero first row and
    /// column; rectangle sums cost four lookups.
    Integral,
}

/// A `width x height` grid of per-pixel feature values.
///
/// `width` and `height` are always the pixel dimensions of the source
/// image. In [`ChannelLayout::Integral`] the backing buffer holds one extra
/// row and column.
///
/// Sums and values that lie within rounding distance of an integer are
/// snapped to it, so truncating them gives the same result in both layouts.
#[derive(Debug, Clone, PartialEq)]
pub struct Channel {
    width: usize,
    height: usize,
    layout: ChannelLayout,
    data: Vec<f64>,
    snap_tolerance: f64,
}

/// Rounding slack per unit of total absolute channel mass.
const SNAP_ULPS: f64 = 64.0 * f64::EPSILON;

impl Channel {
    /// Create a raw channel from row-major values.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`ChannelError::EmptyChannel`] | `width` or `height` is zero |
    /// | [`ChannelError::DataLengthMismatch`] | `values.len() != width * height` |
    /// | [`ChannelError::NonFiniteValue`] | any value is NaN or infinite |
    pub fn new(width: usize, height: usize, values: Vec<f64>) -> Result<Self, ChannelError> {
        if width == 0 || height == 0 {
            return Err(ChannelError::EmptyChannel { width, height });
        }
        let expected = width * height;
        if values.len() != expected {
            return Err(ChannelError::DataLengthMismatch {
                width,
                height,
                expected,
                got: values.len(),
            });
        }
        if let Some(index) = values.iter().position(|v| !v.is_finite()) {
            return Err(ChannelError::NonFiniteValue { index });
        }
        let mass: f64 = values.iter().map(|v| v.abs()).sum();
        Ok(Self {
            width,
            height,
            layout: ChannelLayout::Raw,
            data: values,
            snap_tolerance: SNAP_ULPS * mass.max(1.0),
        })
    }

    /// Create a raw channel from 8-bit row-major pixels.
    ///
    /// # Errors
    ///
    /// Same as [`Channel::new`]; 8-bit pixels are always finite.
    pub fn from_u8(width: usize, height: usize, pixels: &[u8]) -> Result<Self, ChannelError> {
        Self::new(width, height, pixels.iter().map(|&p| f64::from(p)).collect())
    }

    /// Create a raw channel by evaluating `f(x, y)` at every pixel.
    ///
    /// # Errors
    ///
    /// Same as [`Channel::new`].
    pub fn from_fn(
        width: usize,
        height: usize,
        mut f: impl FnMut(usize, usize) -> f64,
    ) -> Result<Self, ChannelError> {
        let mut values = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                values.push(f(x, y));
            }
        }
        Self::new(width, height, values)
    }

    /// Return a copy of this channel in the integral layout.
    ///
    /// Integral channels are returned unchanged.
    #[must_use]
    pub fn to_integral(&self) -> Self {
        if self.layout == ChannelLayout::Integral {
            return self.clone();
        }
        let stride = self.width + 1;
        let mut table = vec![0.0; stride * (self.height + 1)];
        for y in 0..self.height {
            let mut row_sum = 0.0;
            for x in 0..self.width {
                row_sum += self.data[y * self.width + x];
                table[(y + 1) * stride + x + 1] = table[y * stride + x + 1] + row_sum;
            }
        }
        Self {
            width: self.width,
            height: self.height,
            layout: ChannelLayout::Integral,
            data: table,
            snap_tolerance: self.snap_tolerance,
        }
    }

    /// Convert into the requested layout.
    ///
    /// Converting an integral channel back to raw is not supported; the
    /// channel is returned as is.
    #[must_use]
    pub fn into_layout(self, layout: ChannelLayout) -> Self {
        match (self.layout, layout) {
            (ChannelLayout::Raw, ChannelLayout::Integral) => self.to_integral(),
            _ => self,
        }
    }

    /// Pixel width.
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Pixel height.
    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Storage layout.
    #[must_use]
    pub fn layout(&self) -> ChannelLayout {
        self.layout
    }

    /// Sum of the pixel values inside `rect`.
    ///
    /// # Errors
    ///
    /// Returns [`ChannelError::OutOfBounds`] if `rect` does not fit inside the channel.
    pub fn rect_sum(&self, rect: Rect) -> Result<f64, ChannelError> {
        self.check_bounds(rect)?;
        let sum = match self.layout {
            ChannelLayout::Raw => self.direct_sum(rect),
            ChannelLayout::Integral => self.integral_sum(rect),
        };
        Ok(self.snap(sum))
    }

    /// Mean pixel value inside `rect`.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`ChannelError::DegenerateRect`] | `rect` has zero area |
    /// | [`ChannelError::OutOfBounds`] | `rect` does not fit inside the channel |
    pub fn rect_mean(&self, rect: Rect) -> Result<f64, ChannelError> {
        if rect.is_empty() {
            return Err(ChannelError::DegenerateRect { rect });
        }
        Ok(self.rect_sum(rect)? / rect.area() as f64)
    }

    /// Value of the pixel at `point`.
    ///
    /// Integral channels recover the value as a 1x1 rectangle sum.
    ///
    /// # Errors
    ///
    /// Returns [`ChannelError::OutOfBounds`] if `point` lies outside the channel.
    pub fn value(&self, point: Point) -> Result<f64, ChannelError> {
        let rect = Rect::new(point.x, point.y, 1, 1);
        match self.layout {
            ChannelLayout::Raw => {
                self.check_bounds(rect)?;
                Ok(self.snap(self.data[point.y * self.width + point.x]))
            }
            ChannelLayout::Integral => self.rect_sum(rect),
        }
    }

    /// Borrow the window `rect` of this channel without copying.
    ///
    /// # Errors
    ///
    /// Returns [`ChannelError::OutOfBounds`] if `rect` does not fit inside the channel.
    pub fn view(&self, rect: Rect) -> Result<ChannelView<'_>, ChannelError> {
        self.check_bounds(rect)?;
        Ok(ChannelView::new_unchecked(self, rect))
    }

    /// Borrow the whole channel as a view.
    #[must_use]
    pub fn as_view(&self) -> ChannelView<'_> {
        ChannelView::new_unchecked(self, Rect::new(0, 0, self.width, self.height))
    }

    fn check_bounds(&self, rect: Rect) -> Result<(), ChannelError> {
        if rect.fits_within(self.width, self.height) {
            Ok(())
        } else {
            Err(ChannelError::OutOfBounds {
                rect,
                width: self.width,
                height: self.height,
            })
        }
    }

    fn snap(&self, v: f64) -> f64 {
        let nearest = v.round();
        if (v - nearest).abs() <= self.snap_tolerance {
            nearest
        } else {
            v
        }
    }

    fn direct_sum(&self, rect: Rect) -> f64 {
        (rect.y..rect.bottom())
            .map(|y| {
                let row = &self.data[y * self.width..(y + 1) * self.width];
                row[rect.x..rect.right()].iter().sum::<f64>()
            })
            .sum()
    }

    fn integral_sum(&self, rect: Rect) -> f64 {
        let stride = self.width + 1;
        let at = |x: usize, y: usize| self.data[y * stride + x];
        let top_left = at(rect.x, rect.y);
        let top_right = at(rect.right(), rect.y);
        let bottom_left = at(rect.x, rect.bottom());
        let bottom_right = at(rect.right(), rect.bottom());
        bottom_right - top_right - bottom_left + top_left
    }
}
