//! Frame remapping views.
//!
//! A [`FrameMapSequence`] presents frames of its source in the order given by
//! an index map. Entries of the map that don't address a source frame are
//! dropped once, at construction. Channels obtained through the view are
//! wrapped in a [`FrameMapChannel`] sharing the same map, so channel indices
//! and sequence indices always agree.

use std::collections::BTreeSet;
use std::path::PathBuf;
use std::sync::Arc;

use super::frame::{Frame, Image};
use super::proxy::ProxySequence;
use super::traits::{Channel, Sequence, Tags, Values};
use crate::{Error, Region, Result};

/// Channel indexed through an explicit list of native indices.
///
/// The map is not validated here; callers pass indices already known to be
/// valid for the source channel.
pub struct FrameMapChannel {
    source: Arc<dyn Channel>,
    map: Arc<[usize]>,
}

impl FrameMapChannel {
    pub fn new(source: Arc<dyn Channel>, map: Arc<[usize]>) -> Self {
        Self { source, map }
    }

    fn native_index(&self, index: usize) -> Result<usize> {
        Error::check_index(index, self.map.len())?;
        Ok(self.map[index])
    }
}

impl Channel for FrameMapChannel {
    fn length(&self) -> usize {
        self.map.len()
    }

    fn frame(&self, index: usize) -> Result<Image> {
        self.source.frame(self.native_index(index)?)
    }

    fn filename(&self, index: usize) -> Result<Option<PathBuf>> {
        self.source.filename(self.native_index(index)?)
    }

    fn size(&self) -> (usize, usize) {
        self.source.size()
    }
}

/// Sequence view that reorders, subsamples or repeats frames of its source.
pub struct FrameMapSequence {
    proxy: ProxySequence,
    map: Arc<[usize]>,
}

impl FrameMapSequence {
    /// Create a frame mapping view.
    ///
    /// # Arguments
    /// * `source` - Source sequence
    /// * `frame_map` - Source frame indices forming the view. Entries outside
    ///   `0..source.length()` are removed; order and duplicates are kept.
    pub fn new<I>(source: Arc<dyn Sequence>, frame_map: I) -> Arc<Self>
    where
        I: IntoIterator,
        I::Item: TryInto<usize>,
    {
        let length = source.length();
        let mut requested = 0usize;
        let map: Arc<[usize]> = frame_map
            .into_iter()
            .inspect(|_| requested += 1)
            .filter_map(|m| TryInto::<usize>::try_into(m).ok())
            .filter(|&m| m < length)
            .collect();

        log::trace!(
            "frame map over '{}': kept {} of {} indices (source length {})",
            source.name(),
            map.len(),
            requested,
            length
        );

        Arc::new(Self {
            proxy: ProxySequence::wrap(source),
            map,
        })
    }

    /// View of every `step`-th frame starting at `offset`.
    ///
    /// # Errors
    /// `Error::InvalidConfig` if `step` is zero.
    pub fn stride(source: Arc<dyn Sequence>, step: usize, offset: usize) -> Result<Arc<Self>> {
        if step == 0 {
            return Err(Error::InvalidConfig("stride step must be positive".to_string()));
        }
        let length = source.length();
        Ok(Self::new(source, (offset..length).step_by(step)))
    }

    /// View of the source played backwards.
    pub fn reversed(source: Arc<dyn Sequence>) -> Arc<Self> {
        let length = source.length();
        Self::new(source, (0..length).rev())
    }

    /// The effective (filtered) index map.
    pub fn frame_map(&self) -> &[usize] {
        &self.map
    }

    pub fn source(&self) -> &Arc<dyn Sequence> {
        self.proxy.source()
    }

    fn native_index(&self, index: usize) -> Result<usize> {
        Error::check_index(index, self.map.len())?;
        Ok(self.map[index])
    }
}

impl Sequence for FrameMapSequence {
    fn name(&self) -> &str {
        self.proxy.name()
    }

    fn dataset(&self) -> Option<&str> {
        self.proxy.dataset()
    }

    fn length(&self) -> usize {
        self.map.len()
    }

    fn frame(self: Arc<Self>, index: usize) -> Result<Frame> {
        Frame::new(self, index)
    }

    fn metadata(&self, name: &str) -> Option<serde_json::Value> {
        self.proxy.metadata(name)
    }

    fn channel(&self, name: Option<&str>) -> Option<Arc<dyn Channel>> {
        let channel = self.source().channel(name)?;
        let remapped = FrameMapChannel::new(channel, Arc::clone(&self.map));
        Some(Arc::new(remapped) as Arc<dyn Channel>)
    }

    fn channels(&self) -> BTreeSet<String> {
        self.proxy.channels()
    }

    fn groundtruth(&self, index: usize) -> Result<Region> {
        self.source().groundtruth(self.native_index(index)?)
    }

    fn groundtruth_all(&self) -> Result<Vec<Region>> {
        self.map.iter().map(|&m| self.source().groundtruth(m)).collect()
    }

    fn tags(&self, index: usize) -> Result<Tags> {
        self.source().tags(self.native_index(index)?)
    }

    // Remapped like groundtruth_all, one entry per view frame.
    fn tags_all(&self) -> Result<Vec<Tags>> {
        self.map.iter().map(|&m| self.source().tags(m)).collect()
    }

    fn values(&self, index: usize) -> Result<Values> {
        self.source().values(self.native_index(index)?)
    }

    fn values_all(&self) -> Result<Vec<Values>> {
        self.map.iter().map(|&m| self.source().values(m)).collect()
    }

    fn size(&self) -> (usize, usize) {
        self.proxy.size()
    }
}
