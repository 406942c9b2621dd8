//! Channel filtering view.

use std::collections::BTreeSet;
use std::sync::Arc;

use super::frame::Frame;
use super::proxy::ProxySequence;
use super::traits::{Channel, Sequence, Tags, Values};
use crate::{Region, Result};

/// Sequence view that only makes specific channels visible.
///
/// Frame indexing is untouched. Visible channels are resolved on the source,
/// so when the source is itself a remapping view the channel comes back
/// already remapped.
pub struct ChannelFilterSequence {
    proxy: ProxySequence,
    allowed: BTreeSet<String>,
}

impl ChannelFilterSequence {
    /// Create a channel filtering view.
    ///
    /// The visible set is the intersection of `channels` with the channels of
    /// `source` at construction time.
    pub fn new<I, S>(source: Arc<dyn Sequence>, channels: I) -> Arc<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let available = source.channels();
        let allowed: BTreeSet<String> = channels
            .into_iter()
            .map(Into::into)
            .filter(|c| available.contains(c))
            .collect();

        log::trace!(
            "channel filter over '{}': visible {:?} of {:?}",
            source.name(),
            allowed,
            available
        );

        Arc::new(Self {
            proxy: ProxySequence::wrap(source),
            allowed,
        })
    }

    pub fn source(&self) -> &Arc<dyn Sequence> {
        self.proxy.source()
    }
}

impl Sequence for ChannelFilterSequence {
    fn name(&self) -> &str {
        self.proxy.name()
    }

    fn dataset(&self) -> Option<&str> {
        self.proxy.dataset()
    }

    fn length(&self) -> usize {
        self.proxy.length()
    }

    fn frame(self: Arc<Self>, index: usize) -> Result<Frame> {
        Frame::new(self, index)
    }

    fn metadata(&self, name: &str) -> Option<serde_json::Value> {
        self.proxy.metadata(name)
    }

    /// Only explicitly named, visible channels resolve; `None` never does.
    fn channel(&self, name: Option<&str>) -> Option<Arc<dyn Channel>> {
        let name = name?;
        if !self.allowed.contains(name) {
            return None;
        }
        self.source().channel(Some(name))
    }

    fn channels(&self) -> BTreeSet<String> {
        self.allowed.clone()
    }

    fn groundtruth(&self, index: usize) -> Result<Region> {
        self.proxy.groundtruth(index)
    }

    fn groundtruth_all(&self) -> Result<Vec<Region>> {
        self.proxy.groundtruth_all()
    }

    fn tags(&self, index: usize) -> Result<Tags> {
        self.proxy.tags(index)
    }

    fn tags_all(&self) -> Result<Vec<Tags>> {
        self.proxy.tags_all()
    }

    fn values(&self, index: usize) -> Result<Values> {
        self.proxy.values(index)
    }

    fn values_all(&self) -> Result<Vec<Values>> {
        self.proxy.values_all()
    }

    fn size(&self) -> (usize, usize) {
        self.proxy.size()
    }
}
