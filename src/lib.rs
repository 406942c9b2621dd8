//! # vot-rs - Sequence views for tracking benchmarks
//!
//! Read-only adapters over visual tracking sequences.
//!
//! A sequence is an ordered run of frames with ground-truth regions, per-frame
//! tags and values, and one or more named media channels. This crate defines
//! the protocol every sequence-like object exposes and a set of composable
//! views that derive new sequences from existing ones without copying data.
//!
//! ## Features
//!
//! - `Sequence` / `Channel` protocols with a concrete in-memory provider
//! - Frame handles that always resolve through the view that produced them
//! - Frame remapping (reorder, subsample, repeat) with construction-time filtering
//! - Channel filtering
//! - Declarative view chains loaded from JSON
//!
//! ## Example
//!
//! ```rust,ignore
//! use vot_rs::dataset::{ChannelFilterSequence, FrameMapSequence, Sequence};
//!
//! let view = FrameMapSequence::new(source, [4, 2, 2, 10, -1]);
//! let view = ChannelFilterSequence::new(view, ["color"]);
//!
//! assert_eq!(view.length(), 3);
//! let frame = view.clone().frame(0)?;
//! let region = frame.groundtruth()?;
//! ```

pub mod dataset;
pub mod region;

// Re-exports for convenience
pub use dataset::{
    Channel, ChannelFilterSequence, Frame, FrameMapChannel, FrameMapSequence, Image,
    InMemoryChannel, InMemorySequence, ProxySequence, Sequence, ViewConfig, ViewStep,
};
pub use region::{Polygon, Rectangle, Region};

// Error types
pub use crate::error::{Error, Result};

mod error {
    use thiserror::Error;

    /// Errors that can occur when accessing sequences and views
    #[derive(Error, Debug)]
    pub enum Error {
        #[error("Index {index} out of range for length {length}")]
        IndexOutOfRange { index: usize, length: usize },

        #[error("Invalid frame: {0}")]
        InvalidFrame(String),

        #[error("Invalid configuration: {0}")]
        InvalidConfig(String),

        #[error("IO error: {0}")]
        IoError(#[from] std::io::Error),

        #[error("JSON error: {0}")]
        Json(#[from] serde_json::Error),
    }

    impl Error {
        /// Check `index` against `length`, producing `IndexOutOfRange` on failure.
        pub(crate) fn check_index(index: usize, length: usize) -> Result<()> {
            if index < length {
                Ok(())
            } else {
                Err(Error::IndexOutOfRange { index, length })
            }
        }
    }

    /// Result type for sequence operations
    pub type Result<T> = std::result::Result<T, Error>;
}
