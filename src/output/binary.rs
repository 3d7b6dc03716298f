use std::{
    fs::File,
    io::{BufWriter, Write as _},
    path::Path,
};

use anyhow::Context as _;

use crate::{
    error::{OsciError, OsciResult},
    output::{VideoOutput, check_channels, flip_row},
};

/// Packed binary sink: one byte per channel per column, no separators or
/// headers; all frames concatenate into one flat stream.
pub struct PackedBinaryOutput {
    width: u32,
    height: u32,
    writer: Option<BufWriter<File>>,
}

impl PackedBinaryOutput {
    pub fn create(path: &Path, width: u32, height: u32) -> OsciResult<Self> {
        let file = File::create(path)
            .with_context(|| format!("create binary output '{}'", path.display()))?;
        Ok(Self {
            width,
            height,
            writer: Some(BufWriter::new(file)),
        })
    }
}

impl VideoOutput for PackedBinaryOutput {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn write_frame(&mut self, channels: &[&[i32]]) -> OsciResult<()> {
        check_channels(self.width, channels)?;
        let writer = self
            .writer
            .as_mut()
            .ok_or_else(|| OsciError::sink("binary output is already closed"))?;

        let mut bytes = Vec::with_capacity(self.width as usize * channels.len());
        for x in 0..self.width as usize {
            for chan in channels {
                bytes.push(flip_row(self.height, chan[x]).clamp(0, 255) as u8);
            }
        }

        writer.write_all(&bytes).context("write binary frame")?;
        Ok(())
    }

    fn close(&mut self) -> OsciResult<()> {
        if let Some(mut writer) = self.writer.take() {
            writer.flush().context("flush binary output")?;
        }
        Ok(())
    }
}
