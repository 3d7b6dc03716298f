#![forbid(unsafe_code)]

pub mod config;
pub mod driver;
pub mod error;
pub mod frame;
pub mod interlace;
pub mod output;
pub mod scan;
pub mod threshold;

pub use config::{ChannelMode, RunConfig};
pub use driver::run;
pub use error::{OsciError, OsciResult};
pub use frame::{Frame, FrameSource, ZipFrameSource};
pub use output::{
    CppSourceOutput, ImageSequenceOutput, PackedBinaryOutput, TextFileOutput, VideoOutput,
};
pub use scan::{EdgeResult, EdgeScanner};
pub use threshold::ThresholdPolicy;
