use thiserror::Error;

pub type Result<T> = std::result::Result<T, ReadError>;

/// Errors raised while reading datasets or configurations
#[derive(Error, Debug)]
pub enum ReadError {
    #[error("could not read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("CSV input has no header row")]
    MissingHeader,
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
    #[error(transparent)]
    Dataset(#[from] sylva::error::Error),
}
