//! Error types for channel construction and rectangle queries.

use crate::geometry::Rect;

/// Errors from channel construction, extraction and bounds-checked access.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ChannelError {
    /// Returned when a channel is created with zero width or height.
    #[error("channel must be non-empty, got {width}x{height}")]
    EmptyChannel {
        /// Requested width in pixels.
        width: usize,
        /// Requested height in pixels.
        height: usize,
    },

    /// Returned when the value buffer does not match `width * height`.
    #[error("channel of {width}x{height} needs {expected} values, got {got}")]
    DataLengthMismatch {
        /// Requested width in pixels.
        width: usize,
        /// Requested height in pixels.
        height: usize,
        /// Number of values required.
        expected: usize,
        /// Number of values supplied.
        got: usize,
    },

    /// Returned when a channel value is NaN or infinite.
    #[error("non-finite channel value at index {index}")]
    NonFiniteValue {
        /// Position of the first non-finite value in row-major order.
        index: usize,
    },

    /// Returned when a rectangle or point does not fit inside the channel.
    #[error("{rect} exceeds channel bounds {width}x{height}")]
    OutOfBounds {
        /// The offending rectangle in channel coordinates.
        rect: Rect,
        /// Channel width in pixels.
        width: usize,
        /// Channel height in pixels.
        height: usize,
    },

    /// Returned when a mean is requested over a rectangle with zero area.
    #[error("{rect} has zero area")]
    DegenerateRect {
        /// The zero-area rectangle.
        rect: Rect,
    },

    /// Returned when channels of one image disagree on their dimensions.
    #[error("channel {index} is {got_width}x{got_height}, expected {width}x{height}")]
    SizeMismatch {
        /// Position of the offending channel.
        index: usize,
        /// Width shared by the preceding channels.
        width: usize,
        /// Height shared by the preceding channels.
        height: usize,
        /// Width of the offending channel.
        got_width: usize,
        /// Height of the offending channel.
        got_height: usize,
    },

    /// Returned when channels of one image disagree on their layout.
    #[error("channel {index} is not stored in the {expected:?} layout")]
    LayoutMismatch {
        /// Position of the offending channel.
        index: usize,
        /// Layout shared by the preceding channels.
        expected: crate::ChannelLayout,
    },

    /// Returned when an image is built from zero channels.
    #[error("an image needs at least one channel")]
    NoChannels,
}
