//! Sequences, channels and the views built on top of them.
//!
//! This module provides:
//! - `Sequence` / `Channel` - protocols every sequence-like object implements
//! - `Frame` - lazy `(sequence, index)` handle
//! - `InMemorySequence` - concrete provider holding frames in memory
//! - `ProxySequence` - forwards everything, substitutes frame ownership
//! - `FrameMapSequence` - reordered / subsampled / repeated frames
//! - `ChannelFilterSequence` - restricted channel set
//! - `ViewConfig` - view chains described in JSON

mod traits;
mod frame;
mod in_memory;
mod proxy;
mod frame_map;
mod channel_filter;
mod config;

pub use traits::{Channel, Sequence, Tags, Values};
pub use frame::{Frame, Image};
pub use in_memory::{FrameRecord, InMemoryChannel, InMemorySequence};
pub use proxy::ProxySequence;
pub use frame_map::{FrameMapChannel, FrameMapSequence};
pub use channel_filter::ChannelFilterSequence;
pub use config::{ViewConfig, ViewStep};
