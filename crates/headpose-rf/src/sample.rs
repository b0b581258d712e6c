//! Training patches and their routing through a split.

use headpose_channels::Rect;
use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
use tracing::instrument;

use crate::error::PoseError;
use crate::image::{ImageArena, ImageId};
use crate::label::{N_POSE_CLASSES, PatchLabel, PoseClass};
use crate::split::SplitDescriptor;

/// One training patch: a region of an image in an [`ImageArena`] and its label.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq,
    serde::Serialize, serde::Deserialize,
)]
pub struct TrainingSample {
    image: ImageId,
    rect: Rect,
    roi: Option<Rect>,
    label: PatchLabel,
}

impl TrainingSample {
    /// Create a sample for the patch `rect` of `image`.
    #[must_use]
    pub fn new(image: ImageId, rect: Rect, label: PatchLabel) -> Self {
        Self {
            image,
            rect,
            roi: None,
            label,
        }
    }

    /// Attach a finer region of interest, e.g. the face box inside the patch.
    #[must_use]
    pub fn with_roi(mut self, roi: Rect) -> Self {
        self.roi = Some(roi);
        self
    }

    /// Image the patch is cut from.
    #[must_use]
    pub fn image(&self) -> ImageId {
        self.image
    }

    /// Patch region in image coordinates.
    #[must_use]
    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Region of interest, if one was attached.
    #[must_use]
    pub fn roi(&self) -> Option<Rect> {
        self.roi
    }

    /// Ground-truth label.
    #[must_use]
    pub fn label(&self) -> PatchLabel {
        self.label
    }

    /// Return true for face patches.
    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.label.is_positive()
    }

    /// Pose class of a face patch.
    #[must_use]
    pub fn pose(&self) -> Option<PoseClass> {
        self.label.pose()
    }

    /// Test response of this patch for `split`.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`PoseError::UnknownImage`] | the sample's image is not in `images` |
    /// | any | from [`crate::ImageSample::eval_test`] |
    pub fn eval_test(&self, split: &SplitDescriptor, images: &ImageArena) -> Result<i64, PoseError> {
        images.get(self.image)?.eval_test(&split.test, self.rect)
    }

    /// Route this patch: `true` (left) when the response is `<= split.threshold`.
    ///
    /// # Errors
    ///
    /// Same as [`TrainingSample::eval_test`].
    pub fn eval(&self, split: &SplitDescriptor, images: &ImageArena) -> Result<bool, PoseError> {
        Ok(self.eval_test(split, images)? <= split.threshold)
    }
}

/// Route every sample through `split`, returning `(left, right)` in input order.
///
/// Test responses are evaluated in parallel.
///
/// # Errors
///
/// Returns a routing error if any sample fails, see [`TrainingSample::eval`].
/// Which one is unspecified when several fail.
#[instrument(skip_all, fields(n_samples = samples.len(), threshold = split.threshold))]
pub fn partition<'a>(
    samples: &[&'a TrainingSample],
    split: &SplitDescriptor,
    images: &ImageArena,
) -> Result<(Vec<&'a TrainingSample>, Vec<&'a TrainingSample>), PoseError> {
    let routes = samples
        .par_iter()
        .map(|s| s.eval(split, images))
        .collect::<Result<Vec<bool>, PoseError>>()?;

    let mut left = Vec::with_capacity(samples.len());
    let mut right = Vec::with_capacity(samples.len());
    for (&sample, goes_left) in samples.iter().zip(routes) {
        if goes_left {
            left.push(sample);
        } else {
            right.push(sample);
        }
    }
    Ok((left, right))
}

/// Count face patches per pose class.
///
/// The bins sum to the number of positive samples in `set`.
pub(crate) fn pose_histogram(set: &[&TrainingSample]) -> [usize; N_POSE_CLASSES] {
    let mut hist = [0usize; N_POSE_CLASSES];
    for class in set.iter().filter_map(|s| s.pose()) {
        hist[class.index()] += 1;
    }
    hist
}
