//! Pose classes and patch labels.

use std::fmt;

use crate::error::PoseError;

/// Number of discrete head-pose classes.
pub const N_POSE_CLASSES: usize = 5;

/// Head-pose class index, guaranteed to be in `[0, N_POSE_CLASSES)`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash,
    serde::Serialize, serde::Deserialize,
)]
#[serde(try_from = "usize", into = "usize")]
pub struct PoseClass(usize);

impl PoseClass {
    /// Create a pose class, validating the index.
    ///
    /// # Errors
    ///
    /// Returns [`PoseError::InvalidPoseClass`] if `class >= N_POSE_CLASSES`.
    pub fn new(class: usize) -> Result<Self, PoseError> {
        if class >= N_POSE_CLASSES {
            return Err(PoseError::InvalidPoseClass {
                class,
                n_classes: N_POSE_CLASSES,
            });
        }
        Ok(Self(class))
    }

    /// Return the zero-based class index.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }

    /// Iterate over every pose class in ascending order.
    pub fn all() -> impl Iterator<Item = PoseClass> {
        (0..N_POSE_CLASSES).map(PoseClass)
    }
}

impl TryFrom<usize> for PoseClass {
    type Error = PoseError;

    fn try_from(class: usize) -> Result<Self, Self::Error> {
        Self::new(class)
    }
}

impl From<PoseClass> for usize {
    fn from(class: PoseClass) -> Self {
        class.0
    }
}

impl fmt::Display for PoseClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Ground truth of a training patch.
///
/// Only positive (face) patches carry a pose class.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash,
    serde::Serialize, serde::Deserialize,
)]
pub enum PatchLabel {
    /// Background patch.
    Negative,
    /// Face patch with its pose class.
    Pose(PoseClass),
}

impl PatchLabel {
    /// Return true for face patches.
    #[must_use]
    pub fn is_positive(self) -> bool {
        matches!(self, PatchLabel::Pose(_))
    }

    /// Return the pose class of a face patch.
    #[must_use]
    pub fn pose(self) -> Option<PoseClass> {
        match self {
            PatchLabel::Pose(class) => Some(class),
            PatchLabel::Negative => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{N_POSE_CLASSES, PatchLabel, PoseClass};
    use crate::error::PoseError;

    #[test]
    fn pose_class_accepts_valid_range() {
        for c in 0..N_POSE_CLASSES {
            assert_eq!(PoseClass::new(c).unwrap().index(), c);
        }
    }

    #[test]
    fn pose_class_rejects_out_of_range() {
        let result = PoseClass::new(5);
        assert!(matches!(
            result,
            Err(PoseError::InvalidPoseClass { class: 5, n_classes: 5 })
        ));
    }

    #[test]
    fn all_lists_every_class() {
        let all: Vec<usize> = PoseClass::all().map(PoseClass::index).collect();
        assert_eq!(all, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn negative_has_no_pose() {
        assert!(!PatchLabel::Negative.is_positive());
        assert_eq!(PatchLabel::Negative.pose(), None);
        let label = PatchLabel::Pose(PoseClass::new(3).unwrap());
        assert!(label.is_positive());
        assert_eq!(label.pose().map(PoseClass::index), Some(3));
    }
}
