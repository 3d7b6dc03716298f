use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, ValueEnum};

use oscitrace::{
    ChannelMode, CppSourceOutput, ImageSequenceOutput, PackedBinaryOutput, RunConfig,
    TextFileOutput, ThresholdPolicy, VideoOutput, ZipFrameSource,
};

#[derive(Parser, Debug)]
#[command(
    name = "oscitrace",
    version,
    about = "Convert an archive of video frames into oscilloscope-style edge traces"
)]
struct Cli {
    /// Input zip archive containing frames/output_NNNN.jpg entries.
    input: PathBuf,

    /// Output trace width in samples (columns).
    width: u32,

    /// Output trace height in rows.
    height: u32,

    /// Process exactly this frame index instead of the whole sequence.
    frame: Option<u32>,

    /// Write tab-separated text instead of a PNG sequence.
    #[arg(long, conflicts_with_all = ["raw_binary", "cpp"])]
    raw: bool,

    /// Write packed one-byte-per-sample binary instead of a PNG sequence.
    #[arg(long, conflicts_with = "cpp")]
    raw_binary: bool,

    /// Write a compilable C++ console player (debug output).
    #[arg(long)]
    cpp: bool,

    /// Overwrite column 0 with an out-of-range trigger spike.
    #[arg(long)]
    spike: bool,

    /// Channel composition mode.
    #[arg(long, value_enum, default_value_t = ChannelChoice::Interlace2)]
    channels: ChannelChoice,

    /// Luma thresholding policy.
    #[arg(long, value_enum, default_value_t = ThresholdChoice::Hysteretic)]
    threshold: ThresholdChoice,

    /// Plot isolated points instead of connecting columns vertically.
    #[arg(long)]
    no_vertical: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ChannelChoice {
    /// Two channels, skip alternating with frame parity.
    Interlace2,
    /// Two channels merged from eight pixel-interlaced traces.
    Pixel8,
    /// Three channels, clamped, no interlacing.
    Clamp3,
    /// Four channels, clamped, no interlacing.
    Clamp4,
}

impl From<ChannelChoice> for ChannelMode {
    fn from(choice: ChannelChoice) -> Self {
        match choice {
            ChannelChoice::Interlace2 => ChannelMode::Interlace2,
            ChannelChoice::Pixel8 => ChannelMode::PixelInterlace8,
            ChannelChoice::Clamp3 => ChannelMode::Clamp3,
            ChannelChoice::Clamp4 => ChannelMode::Clamp4,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ThresholdChoice {
    Hysteretic,
    WhiteSplit,
}

impl From<ThresholdChoice> for ThresholdPolicy {
    fn from(choice: ThresholdChoice) -> Self {
        match choice {
            ThresholdChoice::Hysteretic => ThresholdPolicy::Hysteretic,
            ThresholdChoice::WhiteSplit => ThresholdPolicy::WhiteSplit,
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let mut cfg = RunConfig::new(cli.width, cli.height);
    cfg.mode = cli.channels.into();
    cfg.threshold = cli.threshold.into();
    cfg.spike = cli.spike;
    cfg.connect_columns = !cli.no_vertical;
    cfg.debug_frame = cli.frame;
    cfg.validate()?;

    let out_dir = cli
        .input
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .join("out");
    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("create output directory '{}'", out_dir.display()))?;

    let mut source = ZipFrameSource::open(&cli.input)?;
    let mut output = make_output(&cli, &cfg, &out_dir)?;

    oscitrace::run(&cfg, &mut source, output.as_mut())?;
    Ok(())
}

fn make_output(cli: &Cli, cfg: &RunConfig, out_dir: &Path) -> anyhow::Result<Box<dyn VideoOutput>> {
    let output: Box<dyn VideoOutput> = if cli.raw {
        Box::new(TextFileOutput::create(
            &out_dir.join("raw.txt"),
            cfg.out_width,
            cfg.out_height,
        )?)
    } else if cli.raw_binary {
        Box::new(PackedBinaryOutput::create(
            &out_dir.join("raw.bits8"),
            cfg.out_width,
            cfg.out_height,
        )?)
    } else if cli.cpp {
        Box::new(CppSourceOutput::create(
            &out_dir.join("apple.cpp"),
            cfg.out_width,
            cfg.out_height,
        )?)
    } else {
        Box::new(ImageSequenceOutput::create(
            out_dir,
            cfg.out_width,
            cfg.out_height,
            0,
            cli.frame.unwrap_or(1),
            cfg.connect_columns,
        )?)
    };
    Ok(output)
}
