//! Multi-channel image samples and the arena that owns them.

use std::fmt;

use headpose_channels::{
    Channel, ChannelError, ChannelId, ChannelLayout, ChannelStore, ChannelView, Point, Rect,
    check_uniform, extract_channels,
};

use crate::error::PoseError;
use crate::split::PatchTest;

/// The feature channels of one source image.
///
/// All channels share one size and one layout, fixed at construction.
/// An `ImageSample` is never mutated afterwards, so it can be shared freely
/// between training samples and worker threads.
#[derive(Debug, Clone)]
pub struct ImageSample {
    channels: Vec<Channel>,
    layout: ChannelLayout,
}

impl ImageSample {
    /// Build an image from already computed channels.
    ///
    /// The layout is taken from the first channel.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`PoseError::Channel`] | `channels` is empty, or sizes or layouts differ |
    pub fn new(channels: Vec<Channel>) -> Result<Self, PoseError> {
        let layout = channels
            .first()
            .map(Channel::layout)
            .unwrap_or(ChannelLayout::Raw);
        check_uniform(&channels, layout)?;
        Ok(Self { channels, layout })
    }

    /// Build an image by asking `store` for the channels `ids` of `image`.
    ///
    /// Ids are requested in ascending order, so channel index `i` of the
    /// result is the `i`-th smallest distinct id.
    ///
    /// # Errors
    ///
    /// Returns [`PoseError::Channel`] for any extraction failure.
    pub fn from_store<S: ChannelStore>(
        store: &S,
        image: &S::Image,
        ids: &[ChannelId],
        layout: ChannelLayout,
    ) -> Result<Self, PoseError> {
        let channels = extract_channels(store, image, ids, layout)?;
        Ok(Self { channels, layout })
    }

    /// Number of channels.
    #[must_use]
    pub fn n_channels(&self) -> usize {
        self.channels.len()
    }

    /// Pixel width shared by all channels.
    #[must_use]
    pub fn width(&self) -> usize {
        self.channels[0].width()
    }

    /// Pixel height shared by all channels.
    #[must_use]
    pub fn height(&self) -> usize {
        self.channels[0].height()
    }

    /// Layout shared by all channels.
    #[must_use]
    pub fn layout(&self) -> ChannelLayout {
        self.layout
    }

    /// Return channel `index`.
    ///
    /// # Errors
    ///
    /// Returns [`PoseError::ChannelIndexOutOfRange`] if the image has no such channel.
    pub fn channel(&self, index: usize) -> Result<&Channel, PoseError> {
        self.channels
            .get(index)
            .ok_or(PoseError::ChannelIndexOutOfRange {
                channel: index,
                n_channels: self.channels.len(),
            })
    }

    /// Evaluate `test` for the patch at `region`.
    ///
    /// Test geometry is relative to the top-left corner of `region`.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`PoseError::ChannelIndexOutOfRange`] | the test selects a missing channel |
    /// | [`PoseError::Channel`] | the test geometry leaves the channel |
    pub fn eval_test(&self, test: &PatchTest, region: Rect) -> Result<i64, PoseError> {
        match *test {
            PatchTest::RegionDifference {
                channel,
                rect_a,
                rect_b,
            } => self.eval_region_test(channel, rect_a, rect_b, region),
            PatchTest::PointDifference {
                channel,
                point_a,
                point_b,
            } => self.eval_point_test(channel, point_a, point_b, region),
        }
    }

    /// Difference of the truncated mean values of `rect_a` and `rect_b`.
    ///
    /// Raw channels sum the pixels directly, integral channels use four
    /// corner lookups per rectangle. Both give the same result.
    ///
    /// # Errors
    ///
    /// Same as [`ImageSample::eval_test`]; zero-area rectangles are rejected
    /// with [`headpose_channels::ChannelError::DegenerateRect`].
    pub fn eval_region_test(
        &self,
        channel: usize,
        rect_a: Rect,
        rect_b: Rect,
        region: Rect,
    ) -> Result<i64, PoseError> {
        let ch = self.channel(channel)?;
        let mean_a = ch.rect_mean(place_rect(ch, rect_a, region)?)? as i64;
        let mean_b = ch.rect_mean(place_rect(ch, rect_b, region)?)? as i64;
        Ok(mean_a - mean_b)
    }

    /// Difference of the values at `point_a` and `point_b`.
    ///
    /// # Errors
    ///
    /// Same as [`ImageSample::eval_test`].
    pub fn eval_point_test(
        &self,
        channel: usize,
        point_a: Point,
        point_b: Point,
        region: Rect,
    ) -> Result<i64, PoseError> {
        let ch = self.channel(channel)?;
        let a = ch.value(place_point(ch, point_a, region)?)? as i64;
        let b = ch.value(place_point(ch, point_b, region)?)? as i64;
        Ok(a - b)
    }

    /// Borrow the window `rect` of every channel, in channel order.
    ///
    /// # Errors
    ///
    /// Returns [`PoseError::Channel`] if `rect` leaves the image.
    pub fn sub_patches(&self, rect: Rect) -> Result<Vec<ChannelView<'_>>, PoseError> {
        self.channels
            .iter()
            .map(|ch| ch.view(rect).map_err(PoseError::from))
            .collect()
    }
}

/// Translate region-relative test geometry into channel coordinates.
fn place_rect(ch: &Channel, rect: Rect, region: Rect) -> Result<Rect, ChannelError> {
    rect.checked_offset_by(region)
        .ok_or(ChannelError::OutOfBounds {
            rect,
            width: ch.width(),
            height: ch.height(),
        })
}

fn place_point(ch: &Channel, point: Point, region: Rect) -> Result<Point, ChannelError> {
    point
        .checked_offset_by(region)
        .ok_or(ChannelError::OutOfBounds {
            rect: Rect::new(point.x, point.y, 1, 1),
            width: ch.width(),
            height: ch.height(),
        })
}

/// Index of an [`ImageSample`] inside an [`ImageArena`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash,
    serde::Serialize, serde::Deserialize,
)]
pub struct ImageId(usize);

impl ImageId {
    /// Create an image id from a zero-based arena position.
    pub(crate) fn new(index: usize) -> Self {
        Self(index)
    }

    /// Return the zero-based arena index.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for ImageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Owner of the image samples referenced by training samples.
///
/// Images are append-only: an [`ImageId`] stays valid for the lifetime of
/// the arena.
#[derive(Debug, Clone, Default)]
pub struct ImageArena {
    images: Vec<ImageSample>,
}

impl ImageArena {
    /// Create an empty arena.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an image and return its id.
    pub fn push(&mut self, image: ImageSample) -> ImageId {
        self.images.push(image);
        ImageId::new(self.images.len() - 1)
    }

    /// Resolve an id.
    ///
    /// # Errors
    ///
    /// Returns [`PoseError::UnknownImage`] if `id` was issued by another arena.
    pub fn get(&self, id: ImageId) -> Result<&ImageSample, PoseError> {
        self.images.get(id.0).ok_or(PoseError::UnknownImage {
            image: id.0,
            n_images: self.images.len(),
        })
    }

    /// Number of images.
    #[must_use]
    pub fn len(&self) -> usize {
        self.images.len()
    }

    /// Return true if the arena holds no images.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Iterate over `(id, image)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (ImageId, &ImageSample)> {
        self.images.iter().enumerate().map(|(i, img)| (ImageId::new(i), img))
    }
}

impl FromIterator<ImageSample> for ImageArena {
    fn from_iter<T: IntoIterator<Item = ImageSample>>(iter: T) -> Self {
        Self {
            images: iter.into_iter().collect(),
        }
    }
}
