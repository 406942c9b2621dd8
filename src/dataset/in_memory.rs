//! In-memory sequence and channel storage.

use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;
use std::sync::Arc;

use super::frame::{Frame, Image};
use super::traits::{Channel, Sequence, Tags, Values};
use crate::{Error, Region, Result};

/// Channel holding its images in memory.
#[derive(Clone, Debug)]
pub struct InMemoryChannel {
    size: (usize, usize),
    images: Vec<Image>,
    filenames: Vec<Option<PathBuf>>,
}

impl InMemoryChannel {
    /// Create an empty channel whose frames are `size = (width, height)`.
    pub fn new(size: (usize, usize)) -> Self {
        Self {
            size,
            images: Vec::new(),
            filenames: Vec::new(),
        }
    }

    /// Append an image to the channel.
    ///
    /// # Errors
    /// `Error::InvalidFrame` if the image dimensions don't match the channel size.
    pub fn push(&mut self, image: Image, filename: Option<PathBuf>) -> Result<()> {
        let got = (image.width(), image.height());
        if got != self.size {
            return Err(Error::InvalidFrame(format!(
                "image size {:?} doesn't match channel size {:?}",
                got, self.size
            )));
        }

        self.images.push(image);
        self.filenames.push(filename);
        Ok(())
    }
}

impl Channel for InMemoryChannel {
    fn length(&self) -> usize {
        self.images.len()
    }

    fn frame(&self, index: usize) -> Result<Image> {
        Error::check_index(index, self.images.len())?;
        Ok(self.images[index].clone())
    }

    fn filename(&self, index: usize) -> Result<Option<PathBuf>> {
        Error::check_index(index, self.filenames.len())?;
        Ok(self.filenames[index].clone())
    }

    fn size(&self) -> (usize, usize) {
        self.size
    }
}

/// Data for one frame appended to an [`InMemorySequence`].
#[derive(Clone, Debug, Default)]
pub struct FrameRecord {
    /// One image per declared channel.
    pub images: BTreeMap<String, Image>,

    /// Optional source filenames, keyed by channel.
    pub filenames: BTreeMap<String, PathBuf>,

    pub groundtruth: Region,
    pub tags: Tags,
    pub values: Values,
}

impl FrameRecord {
    pub fn new(groundtruth: Region) -> Self {
        Self {
            groundtruth,
            ..Default::default()
        }
    }

    pub fn with_image(mut self, channel: &str, image: Image) -> Self {
        self.images.insert(channel.to_string(), image);
        self
    }

    pub fn with_filename(mut self, channel: &str, filename: impl Into<PathBuf>) -> Self {
        self.filenames.insert(channel.to_string(), filename.into());
        self
    }

    pub fn with_tag(mut self, tag: &str) -> Self {
        self.tags.insert(tag.to_string());
        self
    }

    pub fn with_value(mut self, name: &str, value: f64) -> Self {
        self.values.insert(name.to_string(), value);
        self
    }
}

/// Sequence holding all of its frames in memory.
///
/// Channels are declared up front with [`InMemorySequence::with_channel`];
/// every appended [`FrameRecord`] must then carry exactly one image for each
/// declared channel.
#[derive(Clone, Debug)]
pub struct InMemorySequence {
    name: String,
    dataset: Option<String>,
    size: (usize, usize),
    metadata: BTreeMap<String, serde_json::Value>,
    channels: BTreeMap<String, Arc<InMemoryChannel>>,
    default_channel: Option<String>,
    groundtruth: Vec<Region>,
    tags: Vec<Tags>,
    values: Vec<Values>,
}

impl InMemorySequence {
    /// Create an empty sequence with frames of `size = (width, height)`.
    pub fn new(name: &str, dataset: Option<&str>, size: (usize, usize)) -> Self {
        Self {
            name: name.to_string(),
            dataset: dataset.map(str::to_string),
            size,
            metadata: BTreeMap::new(),
            channels: BTreeMap::new(),
            default_channel: None,
            groundtruth: Vec::new(),
            tags: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Declare a channel.
    ///
    /// Channels declared after frames were appended start empty; the next
    /// `append` then fails instead of misaligning the channel.
    pub fn with_channel(mut self, name: &str) -> Self {
        self.channels
            .insert(name.to_string(), Arc::new(InMemoryChannel::new(self.size)));
        self
    }

    pub fn with_metadata(mut self, name: &str, value: impl Into<serde_json::Value>) -> Self {
        self.metadata.insert(name.to_string(), value.into());
        self
    }

    /// Choose which channel `channel(None)` resolves to.
    ///
    /// # Errors
    /// `Error::InvalidConfig` if no such channel is declared.
    pub fn set_default_channel(&mut self, name: &str) -> Result<()> {
        if !self.channels.contains_key(name) {
            return Err(Error::InvalidConfig(format!("unknown channel '{}'", name)));
        }
        self.default_channel = Some(name.to_string());
        Ok(())
    }

    /// Append a frame.
    ///
    /// # Errors
    /// `Error::InvalidFrame` if the record's channels don't match the declared
    /// channels or an image has the wrong size. `Error::InvalidConfig` if a
    /// channel doesn't hold one image per existing frame (declared late).
    /// The sequence is left unchanged.
    pub fn append(&mut self, record: FrameRecord) -> Result<()> {
        let length = self.groundtruth.len();
        if let Some((name, channel)) = self.channels.iter().find(|(_, c)| c.length() != length) {
            return Err(Error::InvalidConfig(format!(
                "channel '{}' holds {} images but the sequence has {} frames",
                name,
                channel.length(),
                length
            )));
        }

        let declared: BTreeSet<&String> = self.channels.keys().collect();
        let provided: BTreeSet<&String> = record.images.keys().collect();
        if declared != provided {
            return Err(Error::InvalidFrame(format!(
                "frame {} provides channels {:?}, expected {:?}",
                self.groundtruth.len(),
                provided,
                declared
            )));
        }

        if let Some((name, image)) = record
            .images
            .iter()
            .find(|(_, image)| (image.width(), image.height()) != self.size)
        {
            return Err(Error::InvalidFrame(format!(
                "image for channel '{}' is {}x{}, expected {}x{}",
                name,
                image.width(),
                image.height(),
                self.size.0,
                self.size.1
            )));
        }

        let FrameRecord {
            images,
            mut filenames,
            groundtruth,
            tags,
            values,
        } = record;

        for (name, image) in images {
            let filename = filenames.remove(&name);
            if let Some(channel) = self.channels.get_mut(&name) {
                Arc::make_mut(channel).push(image, filename)?;
            }
        }

        self.groundtruth.push(groundtruth);
        self.tags.push(tags);
        self.values.push(values);
        Ok(())
    }

    fn default_channel_name(&self) -> Option<&str> {
        if let Some(name) = &self.default_channel {
            return Some(name);
        }
        if self.channels.contains_key("color") {
            return Some("color");
        }
        self.channels.keys().next().map(String::as_str)
    }
}

impl Sequence for InMemorySequence {
    fn name(&self) -> &str {
        &self.name
    }

    fn dataset(&self) -> Option<&str> {
        self.dataset.as_deref()
    }

    fn length(&self) -> usize {
        self.groundtruth.len()
    }

    fn frame(self: Arc<Self>, index: usize) -> Result<Frame> {
        Frame::new(self, index)
    }

    fn metadata(&self, name: &str) -> Option<serde_json::Value> {
        self.metadata.get(name).cloned()
    }

    fn channel(&self, name: Option<&str>) -> Option<Arc<dyn Channel>> {
        let name = name.or_else(|| self.default_channel_name())?;
        self.channels
            .get(name)
            .map(|c| Arc::clone(c) as Arc<dyn Channel>)
    }

    fn channels(&self) -> BTreeSet<String> {
        self.channels.keys().cloned().collect()
    }

    fn groundtruth(&self, index: usize) -> Result<Region> {
        Error::check_index(index, self.groundtruth.len())?;
        Ok(self.groundtruth[index].clone())
    }

    fn groundtruth_all(&self) -> Result<Vec<Region>> {
        Ok(self.groundtruth.clone())
    }

    fn tags(&self, index: usize) -> Result<Tags> {
        Error::check_index(index, self.tags.len())?;
        Ok(self.tags[index].clone())
    }

    fn values(&self, index: usize) -> Result<Values> {
        Error::check_index(index, self.values.len())?;
        Ok(self.values[index].clone())
    }

    fn size(&self) -> (usize, usize) {
        self.size
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::DMatrix;

    fn image(value: u8) -> Image {
        Image::gray(DMatrix::from_element(2, 3, value))
    }

    fn two_channel_sequence() -> InMemorySequence {
        let mut seq = InMemorySequence::new("ball", Some("vot2020"), (3, 2))
            .with_channel("color")
            .with_channel("depth")
            .with_metadata("fps", 30);

        for i in 0..3u8 {
            let record = FrameRecord::new(Region::rectangle(i as f64, 0.0, 1.0, 1.0))
                .with_image("color", image(i))
                .with_image("depth", image(100 + i))
                .with_filename("color", format!("color/{:08}.jpg", i + 1))
                .with_tag("occlusion")
                .with_value("difficulty", i as f64);
            seq.append(record).unwrap();
        }
        seq
    }

    #[test]
    fn test_append_and_access() {
        let seq = two_channel_sequence();

        assert_eq!(seq.length(), 3);
        assert_eq!(seq.name(), "ball");
        assert_eq!(seq.dataset(), Some("vot2020"));
        assert_eq!(seq.groundtruth(2).unwrap(), Region::rectangle(2.0, 0.0, 1.0, 1.0));
        assert!(seq.tags(0).unwrap().contains("occlusion"));
        assert_eq!(seq.values(1).unwrap()["difficulty"], 1.0);
        assert_eq!(seq.groundtruth_all().unwrap().len(), 3);
    }

    #[test]
    fn test_out_of_range() {
        let seq = two_channel_sequence();

        assert!(matches!(
            seq.groundtruth(3),
            Err(Error::IndexOutOfRange { index: 3, length: 3 })
        ));
        assert!(seq.tags(10).is_err());
        assert!(seq.values(3).is_err());
        assert!(Arc::new(seq).frame(3).is_err());
    }

    #[test]
    fn test_append_rejects_channel_mismatch() {
        let mut seq = InMemorySequence::new("s", None, (3, 2)).with_channel("color");

        let missing = FrameRecord::new(Region::default());
        assert!(matches!(seq.append(missing), Err(Error::InvalidFrame(_))));

        let extra = FrameRecord::new(Region::default())
            .with_image("color", image(0))
            .with_image("ir", image(0));
        assert!(matches!(seq.append(extra), Err(Error::InvalidFrame(_))));

        let wrong_size = FrameRecord::new(Region::default())
            .with_image("color", Image::gray(DMatrix::zeros(5, 5)));
        assert!(matches!(seq.append(wrong_size), Err(Error::InvalidFrame(_))));

        assert_eq!(seq.length(), 0);
        assert_eq!(seq.channel(Some("color")).unwrap().length(), 0);
    }

    #[test]
    fn test_channels_and_default() {
        let mut seq = two_channel_sequence();

        assert_eq!(
            seq.channels(),
            ["color", "depth"].iter().map(|s| s.to_string()).collect::<BTreeSet<String>>()
        );
        assert_eq!(seq.channel(None).unwrap().frame(1).unwrap(), image(1));
        assert!(seq.channel(Some("ir")).is_none());

        seq.set_default_channel("depth").unwrap();
        assert_eq!(seq.channel(None).unwrap().frame(1).unwrap(), image(101));
        assert!(matches!(
            seq.set_default_channel("ir"),
            Err(Error::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_append_rejects_late_channel() {
        let mut seq = InMemorySequence::new("s", None, (3, 2)).with_channel("color");
        for i in 0..2 {
            seq.append(FrameRecord::new(Region::default()).with_image("color", image(i)))
                .unwrap();
        }

        let mut seq = seq.with_channel("ir");
        let record = FrameRecord::new(Region::default())
            .with_image("color", image(2))
            .with_image("ir", image(102));

        assert!(matches!(seq.append(record), Err(Error::InvalidConfig(_))));
        assert_eq!(seq.length(), 2);
        assert_eq!(seq.channel(Some("color")).unwrap().length(), 2);
        assert_eq!(seq.channel(Some("ir")).unwrap().length(), 0);
    }

    #[test]
    fn test_channel_filenames() {
        let seq = two_channel_sequence();

        let color = seq.channel(Some("color")).unwrap();
        assert_eq!(
            color.filename(0).unwrap(),
            Some(PathBuf::from("color/00000001.jpg"))
        );
        assert_eq!(seq.channel(Some("depth")).unwrap().filename(0).unwrap(), None);
        assert!(color.filename(3).is_err());
        assert_eq!(color.size(), (3, 2));
    }

    #[test]
    fn test_metadata() {
        let seq = two_channel_sequence();

        assert_eq!(seq.metadata("fps"), Some(serde_json::json!(30)));
        assert_eq!(seq.metadata("missing"), None);
        assert_eq!(
            seq.metadata_or("missing", serde_json::json!("n/a")),
            serde_json::json!("n/a")
        );
    }
}
