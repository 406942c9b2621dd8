//! Declarative view chains.
//!
//! A [`ViewConfig`] lists view steps applied innermost-first to a source
//! sequence, for example:
//!
//! ```json
//! {
//!   "steps": [
//!     { "type": "frame_map", "frames": [4, 2, 2] },
//!     { "type": "channel_filter", "channels": ["color"] }
//!   ]
//! }
//! ```

use std::fs;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::channel_filter::ChannelFilterSequence;
use super::frame_map::FrameMapSequence;
use super::traits::Sequence;
use crate::Result;

/// A single view applied on top of a sequence.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ViewStep {
    /// Explicit index map; out-of-range entries are dropped.
    FrameMap { frames: Vec<i64> },

    /// Every `step`-th frame starting at `offset`.
    Stride {
        step: usize,
        #[serde(default)]
        offset: usize,
    },

    /// Frames in reverse order.
    Reverse,

    /// Only the listed channels stay visible.
    ChannelFilter { channels: Vec<String> },
}

impl ViewStep {
    /// Wrap `source` in the view described by this step.
    pub fn apply(&self, source: Arc<dyn Sequence>) -> Result<Arc<dyn Sequence>> {
        let view: Arc<dyn Sequence> = match self {
            ViewStep::FrameMap { frames } => FrameMapSequence::new(source, frames.iter().copied()),
            ViewStep::Stride { step, offset } => FrameMapSequence::stride(source, *step, *offset)?,
            ViewStep::Reverse => FrameMapSequence::reversed(source),
            ViewStep::ChannelFilter { channels } => {
                ChannelFilterSequence::new(source, channels.iter().cloned())
            }
        };
        Ok(view)
    }
}

/// Configuration for a chain of views.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewConfig {
    #[serde(default)]
    pub steps: Vec<ViewStep>,
}

impl ViewConfig {
    pub fn new(steps: Vec<ViewStep>) -> Self {
        Self { steps }
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Load a configuration from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Apply all steps to `source`, first step innermost.
    ///
    /// An empty configuration returns `source` itself.
    pub fn apply(&self, source: Arc<dyn Sequence>) -> Result<Arc<dyn Sequence>> {
        let mut current = source;
        for (i, step) in self.steps.iter().enumerate() {
            log::debug!(
                "applying view step {} ({:?}) to '{}' (length {})",
                i,
                step,
                current.name(),
                current.length()
            );
            current = step.apply(current)?;
        }
        Ok(current)
    }
}
