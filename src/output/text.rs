use std::{
    fmt::Write as _,
    fs::File,
    io::{BufWriter, Write as _},
    path::Path,
};

use anyhow::Context as _;

use crate::{
    error::{OsciError, OsciResult},
    output::{VideoOutput, check_channels, flip_row},
};

/// Tab-separated text sink: one line per output column per frame, one value
/// per channel, vertically flipped so row 0 prints as the largest value.
pub struct TextFileOutput {
    width: u32,
    height: u32,
    writer: Option<BufWriter<File>>,
}

impl TextFileOutput {
    pub fn create(path: &Path, width: u32, height: u32) -> OsciResult<Self> {
        let file = File::create(path)
            .with_context(|| format!("create text output '{}'", path.display()))?;
        Ok(Self {
            width,
            height,
            writer: Some(BufWriter::new(file)),
        })
    }
}

impl VideoOutput for TextFileOutput {
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
            .ok_or_else(|| OsciError::sink("text output is already closed"))?;

        let mut buffer = String::new();
        for x in 0..self.width as usize {
            for (i, chan) in channels.iter().enumerate() {
                if i > 0 {
                    buffer.push('\t');
                }
                // Writing to a String cannot fail.
                let _ = write!(buffer, "{}", flip_row(self.height, chan[x]));
            }
            buffer.push('\n');
        }

        writer
            .write_all(buffer.as_bytes())
            .context("write text frame")?;
        Ok(())
    }

    fn close(&mut self) -> OsciResult<()> {
        if let Some(mut writer) = self.writer.take() {
            writer.flush().context("flush text output")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_column_frame_prints_flipped_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("raw.txt");

        let mut out = TextFileOutput::create(&path, 1, 10).unwrap();
        out.write_frame(&[&[3], &[7]]).unwrap();
        out.close().unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "6\t2\n");
    }

    #[test]
    fn columns_become_lines_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("raw.txt");

        let mut out = TextFileOutput::create(&path, 3, 4).unwrap();
        out.write_frame(&[&[0, 1, 2], &[3, 2, 1]]).unwrap();
        out.close().unwrap();

        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "3\t0\n2\t1\n1\t2\n"
        );
    }

    #[test]
    fn writing_after_close_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("raw.txt");

        let mut out = TextFileOutput::create(&path, 1, 10).unwrap();
        out.close().unwrap();
        assert!(out.write_frame(&[&[0]]).is_err());
    }
}
