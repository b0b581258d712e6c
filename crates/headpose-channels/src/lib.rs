//! Multi-channel image storage for patch-based forests.
//!
//! Pure data library with zero I/O. Provides 2D feature channels in raw or
//! integral (summed-area) layout, O(1) rectangle sums over integral channels,
//! bounds-checked zero-copy windows, and the [`ChannelStore`] seam through
//! which callers supply the pixel-level feature computation.

mod channel;
mod error;
mod geometry;
mod store;
mod view;

pub use channel::{Channel, ChannelLayout};
pub use error::ChannelError;
pub use geometry::{Point, Rect};
pub use store::{ChannelId, ChannelStore, check_uniform, extract_channels};
pub use view::ChannelView;

