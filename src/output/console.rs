use std::{
    fs::File,
    io::{BufWriter, Write as _},
    path::Path,
};

use anyhow::Context as _;

use crate::{
    error::{OsciError, OsciResult},
    output::{VideoOutput, check_channels},
};

/// Fixed inter-frame delay compiled into the generated player. Playback
/// pacing beyond this constant is out of scope.
const FRAME_DELAY_NANOS: u64 = 18_333_300;

/// Debug sink that emits a compilable C++ program: one `frameN()` function
/// per frame printing the trace as an ASCII grid, and a `main()` that plays
/// them back with a fixed delay.
pub struct CppSourceOutput {
    width: u32,
    height: u32,
    writer: Option<BufWriter<File>>,
    frames: u32,
}

impl CppSourceOutput {
    pub fn create(path: &Path, width: u32, height: u32) -> OsciResult<Self> {
        let file = File::create(path)
            .with_context(|| format!("create C++ output '{}'", path.display()))?;
        let mut writer = BufWriter::new(file);
        writeln!(writer, "#include <iostream>").context("write C++ prelude")?;
        writeln!(writer, "#include <chrono>").context("write C++ prelude")?;
        writeln!(writer, "#include <thread>").context("write C++ prelude")?;
        writeln!(writer).context("write C++ prelude")?;
        Ok(Self {
            width,
            height,
            writer: Some(writer),
            frames: 0,
        })
    }
}

impl VideoOutput for CppSourceOutput {
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
            .ok_or_else(|| OsciError::sink("C++ output is already closed"))?;

        let mut grid = vec![vec![b' '; self.width as usize]; self.height as usize];
        for chan in channels {
            for (x, &value) in chan.iter().enumerate() {
                if (0..self.height as i32).contains(&value) {
                    grid[value as usize][x] = b'#';
                }
            }
        }

        writeln!(writer, "void frame{}() {{", self.frames).context("write C++ frame")?;
        for row in &grid {
            // Rows contain only spaces and '#', so no escaping is needed.
            let row = String::from_utf8_lossy(row);
            writeln!(writer, "  std::cout << \"{row}\\n\";").context("write C++ frame")?;
        }
        writeln!(writer, "}}").context("write C++ frame")?;

        self.frames += 1;
        Ok(())
    }

    fn close(&mut self) -> OsciResult<()> {
        let Some(mut writer) = self.writer.take() else {
            return Ok(());
        };

        writeln!(writer, "int main() {{").context("write C++ main")?;
        for i in 0..self.frames {
            writeln!(writer, "  frame{i}();").context("write C++ main")?;
            writeln!(
                writer,
                "  std::this_thread::sleep_for(std::chrono::nanoseconds({FRAME_DELAY_NANOS}));"
            )
            .context("write C++ main")?;
        }
        writeln!(writer, "}}").context("write C++ main")?;
        writer.flush().context("flush C++ output")?;
        Ok(())
    }
}
