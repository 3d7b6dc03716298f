use oscitrace::{
    ChannelMode, Frame, FrameSource, OsciResult, RunConfig, ThresholdPolicy, VideoOutput,
};

/// Frame source over an in-memory sequence, 1-based like the archive.
struct VecFrameSource {
    frames: Vec<Frame>,
}

impl FrameSource for VecFrameSource {
    fn fetch(&mut self, index: u32) -> OsciResult<Option<Frame>> {
        Ok(self
            .frames
            .get((index as usize).wrapping_sub(1))
            .cloned())
    }
}

/// Sink that records every channel set it is handed.
#[derive(Default)]
struct CaptureOutput {
    width: u32,
    height: u32,
    frames: Vec<Vec<Vec<i32>>>,
    closed: bool,
}

impl CaptureOutput {
    fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }
}

impl VideoOutput for CaptureOutput {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn write_frame(&mut self, channels: &[&[i32]]) -> OsciResult<()> {
        assert!(!self.closed, "write after close");
        self.frames
            .push(channels.iter().map(|c| c.to_vec()).collect());
        Ok(())
    }

    fn close(&mut self) -> OsciResult<()> {
        assert!(!self.closed, "double close");
        self.closed = true;
        Ok(())
    }
}

/// Rows 0..split white, the rest black.
fn half_white_frame(width: u32, height: u32, split: u32) -> Frame {
    let mut data = Vec::new();
    for y in 0..height {
        let luma = if y < split { 255 } else { 0 };
        data.extend(std::iter::repeat_n(luma, width as usize));
    }
    Frame::from_luma(width, height, data).unwrap()
}

/// Horizontal bands of the given heights, alternating white/black from the top.
fn banded_frame(width: u32, bands: &[u32]) -> Frame {
    let height: u32 = bands.iter().sum();
    let mut data = Vec::new();
    for (i, &band) in bands.iter().enumerate() {
        let luma = if i % 2 == 0 { 255 } else { 0 };
        for _ in 0..band * width {
            data.push(luma);
        }
    }
    Frame::from_luma(width, height, data).unwrap()
}

fn config(width: u32, height: u32, mode: ChannelMode) -> RunConfig {
    let mut cfg = RunConfig::new(width, height);
    cfg.mode = mode;
    cfg.threshold = ThresholdPolicy::WhiteSplit;
    cfg
}

#[test]
fn loop_ends_cleanly_after_the_last_frame() {
    let mut source = VecFrameSource {
        frames: vec![half_white_frame(4, 4, 2); 10],
    };
    let mut output = CaptureOutput::new(4, 4);

    oscitrace::run(&config(4, 4, ChannelMode::Interlace2), &mut source, &mut output).unwrap();

    assert_eq!(output.frames.len(), 10);
    assert!(output.closed);
}

#[test]
fn interlace2_alternates_skip_with_frame_parity() {
    // Bands white/black/white/black: skip 0 and skip 1 find different edges.
    let frame = banded_frame(2, &[2, 2, 2, 2]);
    let mut source = VecFrameSource {
        frames: vec![frame; 2],
    };
    let mut output = CaptureOutput::new(2, 8);

    oscitrace::run(&config(2, 8, ChannelMode::Interlace2), &mut source, &mut output).unwrap();

    // Frame index 1 scans with skip 1, index 2 with skip 0.
    assert_eq!(output.frames[0][0], vec![4, 4]);
    assert_eq!(output.frames[1][0], vec![6, 6]);
    assert_ne!(output.frames[0], output.frames[1]);
}

#[test]
fn clamp3_third_channel_never_exceeds_primary_bottom() {
    let frame = banded_frame(4, &[1, 2, 1, 4]);
    let mut source = VecFrameSource {
        frames: vec![frame],
    };
    let mut output = CaptureOutput::new(4, 8);

    oscitrace::run(&config(4, 8, ChannelMode::Clamp3), &mut source, &mut output).unwrap();

    let channels = &output.frames[0];
    assert_eq!(channels.len(), 3);
    for x in 0..4 {
        assert!(channels[2][x] <= channels[0][x]);
    }
}

#[test]
fn clamp4_fourth_channel_never_rises_above_primary_top() {
    let frame = banded_frame(4, &[1, 2, 1, 4]);
    let mut source = VecFrameSource {
        frames: vec![frame],
    };
    let mut output = CaptureOutput::new(4, 8);

    oscitrace::run(&config(4, 8, ChannelMode::Clamp4), &mut source, &mut output).unwrap();

    let channels = &output.frames[0];
    assert_eq!(channels.len(), 4);
    for x in 0..4 {
        assert!(channels[2][x] <= channels[0][x]);
        assert!(channels[3][x] >= channels[1][x]);
    }
}

#[test]
fn pixel_interlace_keeps_the_primary_pair_on_cycle_start_columns() {
    let frame = banded_frame(8, &[1, 2, 1, 4]);
    let mut source = VecFrameSource {
        frames: vec![frame.clone()],
    };
    let mut output = CaptureOutput::new(8, 8);

    oscitrace::run(
        &config(8, 8, ChannelMode::PixelInterlace8),
        &mut source,
        &mut output,
    )
    .unwrap();

    let channels = &output.frames[0];
    assert_eq!(channels.len(), 2);

    // Three deeper pairs give a cycle of 4; columns 0 and 4 stay at depth 0
    // and must match a plain skip-0 scan.
    let scanner = oscitrace::EdgeScanner::new(8, 8, ThresholdPolicy::WhiteSplit, false);
    let plain = scanner.scan(&frame, 0);
    for x in [0usize, 4] {
        assert_eq!(channels[0][x], plain.bottom[x]);
        assert_eq!(channels[1][x], plain.top[x]);
    }
}

#[test]
fn spike_marker_reaches_the_output() {
    let mut source = VecFrameSource {
        frames: vec![half_white_frame(4, 4, 2)],
    };
    let mut output = CaptureOutput::new(4, 4);
    let mut cfg = config(4, 4, ChannelMode::Interlace2);
    cfg.spike = true;

    oscitrace::run(&cfg, &mut source, &mut output).unwrap();

    let channels = &output.frames[0];
    assert_eq!(channels[0][0], -1);
    assert_eq!(channels[1][0], -1);
    assert!(channels[0][1] >= 0);
}

#[test]
fn debug_frame_mode_processes_exactly_one_frame() {
    let mut source = VecFrameSource {
        frames: vec![half_white_frame(4, 4, 2); 5],
    };
    let mut output = CaptureOutput::new(4, 4);
    let mut cfg = config(4, 4, ChannelMode::Interlace2);
    cfg.debug_frame = Some(3);

    oscitrace::run(&cfg, &mut source, &mut output).unwrap();

    assert_eq!(output.frames.len(), 1);
    assert!(output.closed);
}

#[test]
fn missing_debug_frame_is_not_an_error() {
    let mut source = VecFrameSource {
        frames: vec![half_white_frame(4, 4, 2)],
    };
    let mut output = CaptureOutput::new(4, 4);
    let mut cfg = config(4, 4, ChannelMode::Interlace2);
    cfg.debug_frame = Some(9999);

    oscitrace::run(&cfg, &mut source, &mut output).unwrap();

    assert!(output.frames.is_empty());
    assert!(output.closed);
}
