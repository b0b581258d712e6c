//! Fixtures shared by unit tests.

use headpose_channels::Rect;

use crate::image::ImageId;
use crate::label::{PatchLabel, PoseClass};
use crate::sample::TrainingSample;

/// Build samples from labels, `None` meaning a negative patch.
///
/// The samples point at image 0 and are only usable with label statistics.
pub(crate) fn labelled(labels: &[Option<usize>]) -> Vec<TrainingSample> {
    labels
        .iter()
        .map(|label| {
            let label = match *label {
                Some(c) => PatchLabel::Pose(PoseClass::new(c).unwrap()),
                None => PatchLabel::Negative,
            };
            TrainingSample::new(ImageId::new(0), Rect::new(0, 0, 1, 1), label)
        })
        .collect()
}
