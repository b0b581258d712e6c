use headpose_channels::ChannelError;

/// Errors from split generation, test evaluation and sample construction.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PoseError {
    /// Wraps a channel access or construction error, including out-of-bounds
    /// test geometry.
    #[error("channel error: {0}")]
    Channel(#[from] ChannelError),

    /// Returned when a test selects a channel the image does not have.
    #[error("channel index {channel} out of range for an image with {n_channels} channels")]
    ChannelIndexOutOfRange {
        /// The requested channel index.
        channel: usize,
        /// Number of channels in the image.
        n_channels: usize,
    },

    /// Returned when a sample refers to an image missing from the arena.
    #[error("image {image} not found in an arena of {n_images} images")]
    UnknownImage {
        /// The unresolved image index.
        image: usize,
        /// Number of images in the arena.
        n_images: usize,
    },

    /// Returned when a pose class index is outside `[0, N_POSE_CLASSES)`.
    #[error("pose class must be in [0, {n_classes}), got {class}")]
    InvalidPoseClass {
        /// The invalid class index.
        class: usize,
        /// Number of pose classes.
        n_classes: usize,
    },

    /// Returned when face_size is zero.
    #[error("face_size must be at least 1, got {face_size}")]
    InvalidFaceSize {
        /// The invalid face_size value provided.
        face_size: usize,
    },

    /// Returned when patch_size_ratio is not in (0.0, 1.0].
    #[error("patch_size_ratio must be in (0.0, 1.0], got {ratio}")]
    InvalidPatchSizeRatio {
        /// The invalid ratio provided.
        ratio: f64,
    },

    /// Returned when the resolved patch cannot hold a test.
    #[error("patch size {patch_size} is too small, need at least {min}")]
    PatchTooSmall {
        /// The resolved patch size.
        patch_size: usize,
        /// The smallest usable patch size.
        min: usize,
    },

    /// Returned when a split is requested for an empty sample set.
    #[error("cannot generate a split from an empty sample set")]
    EmptySampleSet,
}
