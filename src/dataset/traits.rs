//! Sequence and channel protocols.

use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;
use std::sync::Arc;

use super::frame::{Frame, Image};
use crate::{Region, Result};

/// Tags attached to a single frame.
pub type Tags = BTreeSet<String>;

/// Named scalar values attached to a single frame.
pub type Values = BTreeMap<String, f64>;

/// Trait for named media streams inside a sequence.
///
/// A channel is indexed independently of its sequence. Views that remap
/// frames wrap channels so that channel indices stay in lockstep with
/// sequence indices.
pub trait Channel: Send + Sync {
    /// Number of addressable frames in this channel.
    fn length(&self) -> usize;

    /// Get the image at `index`.
    ///
    /// # Errors
    /// `Error::IndexOutOfRange` if `index >= self.length()`.
    fn frame(&self, index: usize) -> Result<Image>;

    /// Get the file the image at `index` was read from, if any.
    fn filename(&self, index: usize) -> Result<Option<PathBuf>>;

    /// Intrinsic frame dimensions as `(width, height)`.
    fn size(&self) -> (usize, usize);
}

/// Trait for sequence-like objects.
///
/// Stored sequences and every view over them implement this trait, and all
/// evaluation code depends only on it. Positional accessors have an indexed
/// form and a whole-sequence `*_all` form returning one entry per frame.
pub trait Sequence: Send + Sync {
    /// Sequence name.
    fn name(&self) -> &str;

    /// Name of the owning dataset, if the sequence belongs to one.
    fn dataset(&self) -> Option<&str>;

    /// Number of addressable frames.
    fn length(&self) -> usize;

    /// Get a handle to frame `index`.
    ///
    /// The handle references the object this method was called on, so any
    /// data later resolved through it goes through the same view.
    ///
    /// # Errors
    /// `Error::IndexOutOfRange` if `index >= self.length()`.
    fn frame(self: Arc<Self>, index: usize) -> Result<Frame>;

    /// Look up a sequence-level metadata entry.
    fn metadata(&self, name: &str) -> Option<serde_json::Value>;

    /// Look up a metadata entry, falling back to `default` when absent.
    fn metadata_or(&self, name: &str, default: serde_json::Value) -> serde_json::Value {
        self.metadata(name).unwrap_or(default)
    }

    /// Get a channel by name, or the default channel when `name` is `None`.
    ///
    /// # Returns
    /// `None` if the channel is not visible on this sequence.
    fn channel(&self, name: Option<&str>) -> Option<Arc<dyn Channel>>;

    /// Names of all visible channels.
    fn channels(&self) -> BTreeSet<String>;

    /// Ground-truth region at `index`.
    fn groundtruth(&self, index: usize) -> Result<Region>;

    /// Ground-truth regions for every frame, in order.
    fn groundtruth_all(&self) -> Result<Vec<Region>> {
        (0..self.length()).map(|i| self.groundtruth(i)).collect()
    }

    /// Tags at `index`.
    fn tags(&self, index: usize) -> Result<Tags>;

    /// Tags for every frame, in order.
    fn tags_all(&self) -> Result<Vec<Tags>> {
        (0..self.length()).map(|i| self.tags(i)).collect()
    }

    /// Values at `index`.
    fn values(&self, index: usize) -> Result<Values>;

    /// Values for every frame, in order.
    fn values_all(&self) -> Result<Vec<Values>> {
        (0..self.length()).map(|i| self.values(i)).collect()
    }

    /// Intrinsic frame dimensions as `(width, height)`.
    fn size(&self) -> (usize, usize);
}
