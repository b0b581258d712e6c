//! Configuration builder for split generation.

use crate::error::PoseError;

/// Kind of binary test drawn by [`crate::generate_split`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq,
    serde::Serialize, serde::Deserialize,
)]
pub enum TestKind {
    /// Difference of the mean values of two rectangles.
    Region,
    /// Difference of two single pixel values.
    Point,
}

/// Patch geometry used when drawing candidate tests.
///
/// Construct via [`PatchConfig::new`], then chain `with_*` methods.
///
/// # Defaults
///
/// | Parameter          | Default              |
/// |--------------------|----------------------|
/// | `face_size`        | 100                  |
/// | `patch_size_ratio` | 0.25                 |
/// | `test_kind`        | `Region`             |
/// | `max_rect_size`    | `None` (half patch)  |
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct PatchConfig {
    pub(crate) face_size: usize,
    pub(crate) patch_size_ratio: f64,
    pub(crate) test_kind: TestKind,
    pub(crate) max_rect_size: Option<usize>,
}

/// Smallest patch side that leaves room for a one-pixel rectangle and a
/// one-pixel offset.
pub(crate) const MIN_PATCH_SIZE: usize = 2;

impl PatchConfig {
    /// Create a new config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self {
            face_size: 100,
            patch_size_ratio: 0.25,
            test_kind: TestKind::Region,
            max_rect_size: None,
        }
    }

    /// Set the face size in pixels that patches are cut relative to.
    #[must_use]
    pub fn with_face_size(mut self, face_size: usize) -> Self {
        self.face_size = face_size;
        self
    }

    /// Set the patch side as a fraction of the face size.
    #[must_use]
    pub fn with_patch_size_ratio(mut self, patch_size_ratio: f64) -> Self {
        self.patch_size_ratio = patch_size_ratio;
        self
    }

    /// Set the kind of test to draw.
    #[must_use]
    pub fn with_test_kind(mut self, test_kind: TestKind) -> Self {
        self.test_kind = test_kind;
        self
    }

    /// Cap the side of generated rectangles.
    ///
    /// `None` means half the patch, `(patch_size - 1) / 2`. The cap is
    /// clamped so a rectangle always fits inside the patch.
    #[must_use]
    pub fn with_max_rect_size(mut self, max_rect_size: Option<usize>) -> Self {
        self.max_rect_size = max_rect_size;
        self
    }

    // --- Getters ---

    /// Return the face size in pixels.
    #[must_use]
    pub fn face_size(&self) -> usize {
        self.face_size
    }

    /// Return the patch-size ratio.
    #[must_use]
    pub fn patch_size_ratio(&self) -> f64 {
        self.patch_size_ratio
    }

    /// Return the test kind.
    #[must_use]
    pub fn test_kind(&self) -> TestKind {
        self.test_kind
    }

    /// Return the rectangle size cap, if any.
    #[must_use]
    pub fn max_rect_size(&self) -> Option<usize> {
        self.max_rect_size
    }

    /// Resolve the patch side, `trunc(face_size * patch_size_ratio)`.
    ///
    /// # Errors
    ///
    /// | Variant                            | When                                 |
    /// |------------------------------------|--------------------------------------|
    /// | [`PoseError::InvalidFaceSize`]       | `face_size` is zero                  |
    /// | [`PoseError::InvalidPatchSizeRatio`] | ratio is not in (0.0, 1.0]           |
    /// | [`PoseError::PatchTooSmall`]         | the resolved side is below 2 pixels  |
    pub fn patch_size(&self) -> Result<usize, PoseError> {
        if self.face_size == 0 {
            return Err(PoseError::InvalidFaceSize {
                face_size: self.face_size,
            });
        }
        let ratio = self.patch_size_ratio;
        if !(ratio > 0.0 && ratio <= 1.0) {
            return Err(PoseError::InvalidPatchSizeRatio { ratio });
        }
        let patch_size = (self.face_size as f64 * ratio) as usize;
        if patch_size < MIN_PATCH_SIZE {
            return Err(PoseError::PatchTooSmall {
                patch_size,
                min: MIN_PATCH_SIZE,
            });
        }
        Ok(patch_size)
    }

    /// Resolve the largest rectangle side for a patch of side `patch_size`.
    pub(crate) fn rect_size_cap(&self, patch_size: usize) -> usize {
        self.max_rect_size
            .unwrap_or((patch_size - 1) / 2)
            .clamp(1, patch_size - 1)
    }
}

impl Default for PatchConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::{PatchConfig, TestKind};
    use crate::error::PoseError;

    #[test]
    fn defaults_resolve_to_quarter_face() {
        let config = PatchConfig::new();
        assert_eq!(config.patch_size().unwrap(), 25);
        assert_eq!(config.test_kind(), TestKind::Region);
        assert_eq!(config.rect_size_cap(25), 12);
    }

    #[test]
    fn patch_size_truncates() {
        let config = PatchConfig::new().with_face_size(90).with_patch_size_ratio(0.33);
        assert_eq!(config.patch_size().unwrap(), 29);
    }

    #[test]
    fn zero_face_size_rejected() {
        let result = PatchConfig::new().with_face_size(0).patch_size();
        assert!(matches!(result, Err(PoseError::InvalidFaceSize { face_size: 0 })));
    }

    #[test]
    fn ratio_out_of_range_rejected() {
        for ratio in [0.0, -0.5, 1.5, f64::NAN] {
            let result = PatchConfig::new().with_patch_size_ratio(ratio).patch_size();
            assert!(matches!(result, Err(PoseError::InvalidPatchSizeRatio { .. })), "{ratio}");
        }
    }

    #[test]
    fn tiny_patch_rejected() {
        let result = PatchConfig::new().with_face_size(5).with_patch_size_ratio(0.3).patch_size();
        assert!(matches!(result, Err(PoseError::PatchTooSmall { patch_size: 1, min: 2 })));
    }

    #[test]
    fn rect_cap_is_clamped_into_patch() {
        let config = PatchConfig::new().with_max_rect_size(Some(100));
        assert_eq!(config.rect_size_cap(10), 9);
        let config = PatchConfig::new().with_max_rect_size(Some(0));
        assert_eq!(config.rect_size_cap(10), 1);
        assert_eq!(PatchConfig::new().rect_size_cap(2), 1);
    }
}
