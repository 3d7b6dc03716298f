use crate::{
    error::{OsciError, OsciResult},
    threshold::ThresholdPolicy,
};

/// How the per-frame channel set is composed from edge scans.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChannelMode {
    /// Two channels from a single scan whose skip alternates with frame parity.
    Interlace2,
    /// Two channels merged from scans at skip 0..=3 (8 traces), column-cycled.
    PixelInterlace8,
    /// Three channels: primary pair plus a clamped skip-1 top trace.
    Clamp3,
    /// Four channels: primary pair plus clamped skip-1 top and bottom traces.
    Clamp4,
}

impl ChannelMode {
    pub fn channel_count(self) -> usize {
        match self {
            ChannelMode::Interlace2 | ChannelMode::PixelInterlace8 => 2,
            ChannelMode::Clamp3 => 3,
            ChannelMode::Clamp4 => 4,
        }
    }
}

/// Immutable per-run configuration, built once from parsed flags.
#[derive(Clone, Debug)]
pub struct RunConfig {
    pub out_width: u32,
    pub out_height: u32,
    pub mode: ChannelMode,
    pub threshold: ThresholdPolicy,
    /// Overwrite column 0 with the out-of-range trigger sentinel.
    pub spike: bool,
    /// Connect successive column values with vertical segments in raster output.
    pub connect_columns: bool,
    /// Process exactly this frame index instead of iterating the sequence.
    pub debug_frame: Option<u32>,
}

impl RunConfig {
    pub fn new(out_width: u32, out_height: u32) -> Self {
        Self {
            out_width,
            out_height,
            mode: ChannelMode::Interlace2,
            threshold: ThresholdPolicy::Hysteretic,
            spike: false,
            connect_columns: true,
            debug_frame: None,
        }
    }

    pub fn validate(&self) -> OsciResult<()> {
        if self.out_width == 0 || self.out_height == 0 {
            return Err(OsciError::config("output width/height must be non-zero"));
        }
        Ok(())
    }
}
