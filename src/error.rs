pub type OsciResult<T> = Result<T, OsciError>;

#[derive(thiserror::Error, Debug)]
pub enum OsciError {
    #[error("config error: {0}")]
    Config(String),

    #[error("frame source error: {0}")]
    Source(String),

    #[error("output sink error: {0}")]
    Sink(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl OsciError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn source(msg: impl Into<String>) -> Self {
        Self::Source(msg.into())
    }

    pub fn sink(msg: impl Into<String>) -> Self {
        Self::Sink(msg.into())
    }
}
