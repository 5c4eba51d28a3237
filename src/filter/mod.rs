//! Point-wise color filters and channel swaps over RGBA buffers.

pub mod channel;
pub mod engine;
pub mod transform;

pub use channel::{Channel, ChannelSwap, SwapPreset};
pub use engine::{FilterEngine, Operation};
pub use transform::{Filter, Transform};
