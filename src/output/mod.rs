//! Interchangeable frame sinks sharing one write-frame contract.

mod binary;
mod console;
mod raster;
mod text;

pub use binary::PackedBinaryOutput;
pub use console::CppSourceOutput;
pub use raster::ImageSequenceOutput;
pub use text::TextFileOutput;

use crate::error::{OsciError, OsciResult};

/// A sink for per-frame channel sets.
///
/// Lifecycle: construct, one `write_frame` call per processed frame, exactly
/// one `close`. Writing after close is an error.
pub trait VideoOutput {
    fn width(&self) -> u32;

    fn height(&self) -> u32;

    /// Append one frame. Every channel has length = output width.
    fn write_frame(&mut self, channels: &[&[i32]]) -> OsciResult<()>;

    /// Flush and release the sink.
    fn close(&mut self) -> OsciResult<()>;
}

/// Flip the vertical axis so row 0 (top) maps to the largest emitted value.
pub(crate) fn flip_row(height: u32, value: i32) -> i32 {
    height as i32 - value - 1
}

pub(crate) fn check_channels(width: u32, channels: &[&[i32]]) -> OsciResult<()> {
    if channels.is_empty() {
        return Err(OsciError::sink("write_frame requires at least one channel"));
    }
    for chan in channels {
        if chan.len() != width as usize {
            return Err(OsciError::sink(format!(
                "channel length {} does not match output width {}",
                chan.len(),
                width
            )));
        }
    }
    Ok(())
}
