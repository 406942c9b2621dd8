//! Frame handles and image payloads.

use std::collections::BTreeSet;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use nalgebra::DMatrix;

use super::traits::{Sequence, Tags, Values};
use crate::{Error, Region, Result};

/// Image data returned by a channel.
///
/// Stored as one `height x width` matrix per band (1 for grayscale or depth,
/// 3 for color).
#[derive(Clone, Debug, PartialEq)]
pub struct Image {
    bands: Vec<DMatrix<u8>>,
}

impl Image {
    /// Create an image from its bands.
    ///
    /// # Errors
    /// `Error::InvalidFrame` if there are no bands or the bands differ in shape.
    pub fn new(bands: Vec<DMatrix<u8>>) -> Result<Self> {
        let first = bands
            .first()
            .ok_or_else(|| Error::InvalidFrame("image must have at least one band".to_string()))?;
        let shape = first.shape();

        if let Some(bad) = bands.iter().find(|b| b.shape() != shape) {
            return Err(Error::InvalidFrame(format!(
                "band shape {:?} doesn't match {:?}",
                bad.shape(),
                shape
            )));
        }

        Ok(Self { bands })
    }

    /// Create a single-band image.
    pub fn gray(data: DMatrix<u8>) -> Self {
        Self { bands: vec![data] }
    }

    pub fn width(&self) -> usize {
        self.bands[0].ncols()
    }

    pub fn height(&self) -> usize {
        self.bands[0].nrows()
    }

    /// Number of bands.
    pub fn depth(&self) -> usize {
        self.bands.len()
    }

    pub fn band(&self, index: usize) -> Option<&DMatrix<u8>> {
        self.bands.get(index)
    }
}

/// Handle identifying frame `index` of a sequence.
///
/// Carries no data. Everything is resolved lazily through the owning
/// sequence, which is the sequence (or view) that produced the handle.
#[derive(Clone)]
pub struct Frame {
    sequence: Arc<dyn Sequence>,
    index: usize,
}

impl Frame {
    /// Create a handle for frame `index` of `sequence`.
    ///
    /// # Errors
    /// `Error::IndexOutOfRange` if `index >= sequence.length()`.
    pub fn new(sequence: Arc<dyn Sequence>, index: usize) -> Result<Self> {
        Error::check_index(index, sequence.length())?;
        Ok(Self { sequence, index })
    }

    /// Index of this frame in its owning sequence.
    pub fn index(&self) -> usize {
        self.index
    }

    /// The sequence this frame resolves through.
    pub fn sequence(&self) -> &Arc<dyn Sequence> {
        &self.sequence
    }

    /// Check whether this frame is owned by exactly `sequence` (pointer identity).
    pub fn is_owned_by<S: ?Sized>(&self, sequence: &Arc<S>) -> bool {
        std::ptr::eq(
            Arc::as_ptr(&self.sequence).cast::<()>(),
            Arc::as_ptr(sequence).cast::<()>(),
        )
    }

    pub fn groundtruth(&self) -> Result<Region> {
        self.sequence.groundtruth(self.index)
    }

    pub fn tags(&self) -> Result<Tags> {
        self.sequence.tags(self.index)
    }

    pub fn values(&self) -> Result<Values> {
        self.sequence.values(self.index)
    }

    /// Channels visible on the owning sequence.
    pub fn channels(&self) -> BTreeSet<String> {
        self.sequence.channels()
    }

    /// Image of this frame in `channel` (default channel when `None`).
    ///
    /// # Returns
    /// `Ok(None)` if the channel is not visible on the owning sequence.
    pub fn image(&self, channel: Option<&str>) -> Result<Option<Image>> {
        match self.sequence.channel(channel) {
            Some(c) => c.frame(self.index).map(Some),
            None => Ok(None),
        }
    }

    /// Filename of this frame in `channel` (default channel when `None`).
    pub fn filename(&self, channel: Option<&str>) -> Result<Option<PathBuf>> {
        match self.sequence.channel(channel) {
            Some(c) => c.filename(self.index),
            None => Ok(None),
        }
    }
}

impl fmt::Debug for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Frame")
            .field("sequence", &self.sequence.name())
            .field("index", &self.index)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_new_rejects_mismatched_bands() {
        let bands = vec![DMatrix::zeros(2, 3), DMatrix::zeros(3, 2)];
        assert!(matches!(Image::new(bands), Err(Error::InvalidFrame(_))));
        assert!(matches!(Image::new(vec![]), Err(Error::InvalidFrame(_))));
    }

    #[test]
    fn test_image_dimensions() {
        let image = Image::new(vec![DMatrix::zeros(2, 3); 3]).unwrap();

        assert_eq!(image.width(), 3);
        assert_eq!(image.height(), 2);
        assert_eq!(image.depth(), 3);
        assert!(image.band(3).is_none());
    }

    #[test]
    fn test_gray_image() {
        let image = Image::gray(DMatrix::from_element(4, 5, 7u8));

        assert_eq!(image.depth(), 1);
        assert_eq!(image.band(0).unwrap()[(3, 4)], 7);
    }
}
