use std::{
    fs::File,
    io::{BufReader, Read as _},
    path::Path,
};

use anyhow::Context as _;

use crate::error::{OsciError, OsciResult};

/// One decoded video frame: a row-major grid of 8-bit luma samples.
///
/// Immutable once decoded; owned by the driver for the duration of one
/// frame's processing.
#[derive(Clone, Debug)]
pub struct Frame {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Frame {
    pub fn from_luma(width: u32, height: u32, data: Vec<u8>) -> OsciResult<Self> {
        if width == 0 || height == 0 {
            return Err(OsciError::source("frame width/height must be non-zero"));
        }
        if data.len() != (width as usize) * (height as usize) {
            return Err(OsciError::source(format!(
                "luma buffer length {} does not match {}x{}",
                data.len(),
                width,
                height
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Decode an encoded image (JPEG in practice) into a luma frame.
    pub fn decode(bytes: &[u8]) -> OsciResult<Self> {
        let luma = image::load_from_memory(bytes)
            .context("decode frame image from memory")?
            .to_luma8();
        let (width, height) = luma.dimensions();
        Self::from_luma(width, height, luma.into_raw())
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn sample(&self, x: u32, y: u32) -> u8 {
        debug_assert!(x < self.width && y < self.height);
        self.data[(y as usize) * (self.width as usize) + (x as usize)]
    }
}

/// Supplies decoded frames by 1-based index; `None` signals end of sequence.
pub trait FrameSource {
    fn fetch(&mut self, index: u32) -> OsciResult<Option<Frame>>;
}

/// Archive entry name for a 1-based frame index.
pub fn entry_name(index: u32) -> String {
    format!("frames/output_{index:04}.jpg")
}

/// Frame source backed by a zip archive of JPEG frames.
pub struct ZipFrameSource {
    archive: zip::ZipArchive<BufReader<File>>,
}

impl ZipFrameSource {
    pub fn open(path: &Path) -> OsciResult<Self> {
        let file =
            File::open(path).with_context(|| format!("open archive '{}'", path.display()))?;
        let archive = zip::ZipArchive::new(BufReader::new(file))
            .with_context(|| format!("read archive '{}'", path.display()))?;
        Ok(Self { archive })
    }
}

impl FrameSource for ZipFrameSource {
    fn fetch(&mut self, index: u32) -> OsciResult<Option<Frame>> {
        let name = entry_name(index);
        let mut entry = match self.archive.by_name(&name) {
            Ok(entry) => entry,
            Err(zip::result::ZipError::FileNotFound) => return Ok(None),
            Err(err) => {
                return Err(OsciError::source(format!(
                    "read archive entry '{name}': {err}"
                )));
            }
        };

        let mut bytes = Vec::with_capacity(entry.size() as usize);
        entry
            .read_to_end(&mut bytes)
            .with_context(|| format!("read archive entry '{name}'"))?;
        Frame::decode(&bytes).map(Some)
    }
}
