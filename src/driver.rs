use std::time::Instant;

use tracing::{info, warn};

use crate::{
    config::{ChannelMode, RunConfig},
    error::OsciResult,
    frame::{Frame, FrameSource},
    interlace::{clamp_max, clamp_min, merge},
    output::VideoOutput,
    scan::EdgeScanner,
};

/// Drive one run: pull frames from the source, scan them, and forward the
/// channel sets to the output until the sequence ends.
///
/// A missing frame at the next index is the normal end-of-sequence signal;
/// any I/O failure aborts the run.
#[tracing::instrument(skip_all, fields(mode = ?cfg.mode))]
pub fn run(
    cfg: &RunConfig,
    source: &mut dyn FrameSource,
    output: &mut dyn VideoOutput,
) -> OsciResult<()> {
    cfg.validate()?;
    let scanner = EdgeScanner::from_config(cfg);

    if let Some(index) = cfg.debug_frame {
        match source.fetch(index)? {
            Some(frame) => {
                write_channels(output, &compose_channels(&scanner, cfg.mode, &frame, index))?;
                info!(frame = index, "processed debug frame");
            }
            None => warn!(frame = index, "debug frame not present in source"),
        }
        return output.close();
    }

    let started = Instant::now();
    let mut index = 1u32;

    loop {
        let Some(frame) = source.fetch(index)? else {
            break;
        };

        write_channels(output, &compose_channels(&scanner, cfg.mode, &frame, index))?;

        if index % 100 == 0 {
            info!(frames = index, "progress");
        }
        index += 1;
    }

    output.close()?;
    info!(
        frames = index - 1,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "sequence complete"
    );
    Ok(())
}

/// Produce the ordered channel set for one frame under the given mode.
pub fn compose_channels(
    scanner: &EdgeScanner,
    mode: ChannelMode,
    frame: &Frame,
    frame_index: u32,
) -> Vec<Vec<i32>> {
    match mode {
        ChannelMode::Interlace2 => {
            // Skip alternates with frame parity, interlacing detail over time.
            let result = scanner.scan(frame, frame_index & 1);
            vec![result.bottom, result.top]
        }
        ChannelMode::PixelInterlace8 => {
            let mut primary = scanner.scan(frame, 0);
            let deeper: Vec<_> = (1..=3).map(|skip| scanner.scan(frame, skip)).collect();
            let alternating: Vec<&[i32]> = deeper
                .iter()
                .flat_map(|r| [r.top.as_slice(), r.bottom.as_slice()])
                .collect();
            merge(&mut primary.bottom, &mut primary.top, &alternating);
            vec![primary.bottom, primary.top]
        }
        ChannelMode::Clamp3 => {
            let first = scanner.scan(frame, 0);
            let second = scanner.scan(frame, 1);
            let mut third = second.top;
            clamp_max(&mut third, &first.bottom);
            vec![first.bottom, first.top, third]
        }
        ChannelMode::Clamp4 => {
            let first = scanner.scan(frame, 0);
            let second = scanner.scan(frame, 1);
            let mut third = second.top;
            let mut fourth = second.bottom;
            clamp_max(&mut third, &first.bottom);
            clamp_min(&mut fourth, &first.top);
            vec![first.bottom, first.top, third, fourth]
        }
    }
}

fn write_channels(output: &mut dyn VideoOutput, channels: &[Vec<i32>]) -> OsciResult<()> {
    let refs: Vec<&[i32]> = channels.iter().map(Vec::as_slice).collect();
    output.write_frame(&refs)
}
