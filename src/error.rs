use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MatrixError {
    #[error("matrix dimensions do not match: {left}x{left} vs {right}x{right}")]
    DimensionMismatch { left: usize, right: usize },

    #[error("buffer of {len} elements is not a square matrix")]
    NotSquare { len: usize },

    #[error("row {row} has {len} elements, expected {expected}")]
    RaggedRows {
        row: usize,
        len: usize,
        expected: usize,
    },
}

#[derive(Debug, Error)]
pub enum BenchError {
    #[error("unable to open results file {}", path.display())]
    ResultsFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write report: {0}")]
    Report(#[from] io::Error),

    #[error("failed to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error(transparent)]
    Matrix(#[from] MatrixError),

    #[error("invalid benchmark configuration: {0}")]
    InvalidConfig(&'static str),
}

pub type Result<T> = std::result::Result<T, BenchError>;
