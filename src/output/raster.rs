use std::path::{Path, PathBuf};

use anyhow::Context as _;
use image::{Rgb, RgbImage};

use crate::{
    error::OsciResult,
    output::{VideoOutput, check_channels},
};

/// Distinguishable channel colors, cycled by channel index.
const PALETTE: [Rgb<u8>; 8] = [
    Rgb([255, 255, 255]), // white
    Rgb([255, 255, 0]),   // yellow
    Rgb([0, 255, 255]),   // cyan
    Rgb([255, 0, 255]),   // magenta
    Rgb([0, 255, 0]),     // green
    Rgb([255, 0, 0]),     // red
    Rgb([0, 128, 255]),   // blue
    Rgb([255, 128, 0]),   // orange
];

/// Raster sink: one PNG per frame, each channel drawn as a connected trace
/// over a black canvas.
pub struct ImageSequenceOutput {
    directory: PathBuf,
    width: u32,
    height: u32,
    /// Extra vertical canvas space; traces are shifted down by this margin.
    offset: u32,
    connect_columns: bool,
    frame_number: u32,
}

impl ImageSequenceOutput {
    pub fn create(
        directory: &Path,
        width: u32,
        height: u32,
        offset: u32,
        start_frame: u32,
        connect_columns: bool,
    ) -> OsciResult<Self> {
        std::fs::create_dir_all(directory)
            .with_context(|| format!("create output directory '{}'", directory.display()))?;
        Ok(Self {
            directory: directory.to_path_buf(),
            width,
            height,
            offset,
            connect_columns,
            frame_number: start_frame,
        })
    }

    fn frame_path(&self) -> PathBuf {
        self.directory
            .join(format!("output_{:04}.png", self.frame_number))
    }
}

impl VideoOutput for ImageSequenceOutput {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn write_frame(&mut self, channels: &[&[i32]]) -> OsciResult<()> {
        check_channels(self.width, channels)?;

        // RgbImage::new zero-fills, which is already the black canvas.
        let mut canvas = RgbImage::new(self.width, self.height + self.offset);

        for (index, chan) in channels.iter().enumerate() {
            let color = PALETTE[index % PALETTE.len()];
            let mut prev = -1i32;

            for (x, &value) in chan.iter().enumerate() {
                if value < 0 {
                    // Spike sentinel: nothing to plot, and the next column
                    // starts a fresh line.
                    prev = -1;
                    continue;
                }

                let y = value + self.offset as i32;
                if self.connect_columns {
                    draw_vertical_segment(&mut canvas, x as u32, prev, y, color);
                } else {
                    canvas.put_pixel(x as u32, y as u32, color);
                }
                // The continuity value is recorded without the offset; this
                // matches long-observed output and is pinned by a test.
                prev = value;
            }
        }

        let path = self.frame_path();
        canvas
            .save(&path)
            .with_context(|| format!("write frame image '{}'", path.display()))?;
        self.frame_number += 1;
        Ok(())
    }

    fn close(&mut self) -> OsciResult<()> {
        Ok(())
    }
}

/// Fill the column `x` between the previous and current row, inclusive.
/// `prev < 0` means no previous point; plot only `next`.
fn draw_vertical_segment(canvas: &mut RgbImage, x: u32, prev: i32, next: i32, color: Rgb<u8>) {
    let (lo, hi) = if prev < 0 {
        (next, next)
    } else if prev > next {
        (next, prev)
    } else {
        (prev, next)
    };

    for y in lo..=hi {
        canvas.put_pixel(x, y as u32, color);
    }
}
