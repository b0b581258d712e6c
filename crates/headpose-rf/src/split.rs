//! Random patch tests and the split descriptors that carry them.

use headpose_channels::{ChannelError, Point, Rect};
use rand::Rng;

use crate::config::{PatchConfig, TestKind};
use crate::error::PoseError;
use crate::image::ImageArena;
use crate::sample::TrainingSample;

/// Number of candidate thresholds a trainer sweeps for each generated test.
pub const NUM_THRESHOLDS: usize = 25;

/// Geometry of a binary patch test.
///
/// Coordinates are relative to the top-left corner of the sample region.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq,
    serde::Serialize, serde::Deserialize,
)]
pub enum PatchTest {
    /// `trunc(mean(rect_a)) - trunc(mean(rect_b))` on one channel.
    RegionDifference {
        /// Channel index.
        channel: usize,
        /// First rectangle.
        rect_a: Rect,
        /// Second rectangle.
        rect_b: Rect,
    },
    /// `value(point_a) - value(point_b)` on one channel.
    PointDifference {
        /// Channel index.
        channel: usize,
        /// First pixel.
        point_a: Point,
        /// Second pixel.
        point_b: Point,
    },
}

impl PatchTest {
    /// Return the channel the test reads.
    #[must_use]
    pub fn channel(&self) -> usize {
        match *self {
            PatchTest::RegionDifference { channel, .. }
            | PatchTest::PointDifference { channel, .. } => channel,
        }
    }
}

/// A candidate split: test geometry plus the routing threshold.
///
/// Samples whose test response is `<= threshold` go left.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq,
    serde::Serialize, serde::Deserialize,
)]
pub struct SplitDescriptor {
    /// Test geometry.
    pub test: PatchTest,
    /// Routing threshold, set by the trainer's threshold sweep.
    pub threshold: i64,
    /// Number of thresholds the trainer should try for this test.
    pub num_thresholds: usize,
    /// Reserved for asymmetric splits; always 0.
    pub margin: i64,
}

impl SplitDescriptor {
    /// Create a descriptor for `test` with a zero threshold.
    #[must_use]
    pub fn new(test: PatchTest) -> Self {
        Self {
            test,
            threshold: 0,
            num_thresholds: NUM_THRESHOLDS,
            margin: 0,
        }
    }

    /// Return a copy with a different threshold.
    #[must_use]
    pub fn with_threshold(mut self, threshold: i64) -> Self {
        self.threshold = threshold;
        self
    }
}

/// Draw a random test for patches of the configured size.
///
/// The channel is uniform in `[0, n_channels)`. Rectangles get a side in
/// `[1, cap]` and a corner chosen so they end strictly inside the patch;
/// points are uniform over the patch. The threshold is left at zero for the
/// trainer to sweep.
///
/// # Errors
///
/// | Variant | Condition |
/// |---|---|
/// | [`PoseError::Channel`] | `n_channels` is zero |
/// | any | from [`PatchConfig::patch_size`] |
pub fn generate_split(
    config: &PatchConfig,
    n_channels: usize,
    rng: &mut impl Rng,
) -> Result<SplitDescriptor, PoseError> {
    let patch_size = config.patch_size()?;
    if n_channels == 0 {
        return Err(ChannelError::NoChannels.into());
    }
    let channel = rng.gen_range(0..n_channels);

    let test = match config.test_kind {
        TestKind::Region => {
            let cap = config.rect_size_cap(patch_size);
            PatchTest::RegionDifference {
                channel,
                rect_a: random_rect(patch_size, cap, rng),
                rect_b: random_rect(patch_size, cap, rng),
            }
        }
        TestKind::Point => PatchTest::PointDifference {
            channel,
            point_a: random_point(patch_size, rng),
            point_b: random_point(patch_size, rng),
        },
    };
    Ok(SplitDescriptor::new(test))
}

/// Draw a random test, taking the channel count from the image of the
/// first sample in `samples`.
///
/// # Errors
///
/// | Variant | Condition |
/// |---|---|
/// | [`PoseError::EmptySampleSet`] | `samples` is empty |
/// | [`PoseError::UnknownImage`] | the first sample's image is not in `images` |
/// | any | from [`generate_split`] |
pub fn generate_split_for(
    samples: &[&TrainingSample],
    images: &ImageArena,
    config: &PatchConfig,
    rng: &mut impl Rng,
) -> Result<SplitDescriptor, PoseError> {
    let first = samples.first().ok_or(PoseError::EmptySampleSet)?;
    let n_channels = images.get(first.image())?.n_channels();
    generate_split(config, n_channels, rng)
}

fn random_rect(patch_size: usize, cap: usize, rng: &mut impl Rng) -> Rect {
    let width = rng.gen_range(1..=cap);
    let height = rng.gen_range(1..=cap);
    let x = rng.gen_range(0..patch_size - width);
    let y = rng.gen_range(0..patch_size - height);
    Rect::new(x, y, width, height)
}

fn random_point(patch_size: usize, rng: &mut impl Rng) -> Point {
    Point::new(rng.gen_range(0..patch_size), rng.gen_range(0..patch_size))
}
