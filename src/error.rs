//! Error types in Sylva
//!

use thiserror::Error;

use ndarray::ShapeError;
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone)]
pub enum Error {
    #[error("invalid parameter {0}")]
    Parameters(String),
    #[error("unknown field `{0}`")]
    UnknownField(String),
    #[error("field `{0}` appears more than once in the header")]
    DuplicateField(String),
    #[error("row {row} has {found} values, but the header has {expected} fields")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("dataset contains no samples")]
    EmptyDataset,
    #[error("invalid ndarray shape {0}")]
    NdShape(#[from] ShapeError),
}
