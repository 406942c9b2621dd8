//! Generic forwarding proxy over a source sequence.

use std::collections::BTreeSet;
use std::sync::Arc;

use super::frame::Frame;
use super::traits::{Channel, Sequence, Tags, Values};
use crate::{Region, Result};

/// Sequence that forwards every request to its source.
///
/// The only thing a proxy changes is identity: frames it produces are owned
/// by the proxy, not by the source. Specialized views embed a `ProxySequence`
/// and delegate to it for every operation they don't override.
#[derive(Clone)]
pub struct ProxySequence {
    source: Arc<dyn Sequence>,
}

impl ProxySequence {
    pub fn new(source: Arc<dyn Sequence>) -> Arc<Self> {
        Arc::new(Self::wrap(source))
    }

    /// Build the proxy by value, for embedding in another view.
    pub(crate) fn wrap(source: Arc<dyn Sequence>) -> Self {
        Self { source }
    }

    /// The sequence requests are forwarded to.
    pub fn source(&self) -> &Arc<dyn Sequence> {
        &self.source
    }
}

impl Sequence for ProxySequence {
    fn name(&self) -> &str {
        self.source.name()
    }

    fn dataset(&self) -> Option<&str> {
        self.source.dataset()
    }

    fn length(&self) -> usize {
        self.source.length()
    }

    fn frame(self: Arc<Self>, index: usize) -> Result<Frame> {
        Frame::new(self, index)
    }

    fn metadata(&self, name: &str) -> Option<serde_json::Value> {
        self.source.metadata(name)
    }

    fn channel(&self, name: Option<&str>) -> Option<Arc<dyn Channel>> {
        self.source.channel(name)
    }

    fn channels(&self) -> BTreeSet<String> {
        self.source.channels()
    }

    fn groundtruth(&self, index: usize) -> Result<Region> {
        self.source.groundtruth(index)
    }

    fn groundtruth_all(&self) -> Result<Vec<Region>> {
        self.source.groundtruth_all()
    }

    fn tags(&self, index: usize) -> Result<Tags> {
        self.source.tags(index)
    }

    fn tags_all(&self) -> Result<Vec<Tags>> {
        self.source.tags_all()
    }

    fn values(&self, index: usize) -> Result<Values> {
        self.source.values(index)
    }

    fn values_all(&self) -> Result<Vec<Values>> {
        self.source.values_all()
    }

    fn size(&self) -> (usize, usize) {
        self.source.size()
    }
}
