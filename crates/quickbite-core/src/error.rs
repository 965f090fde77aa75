// crates/quickbite-core/src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Polars operation failed: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("Input table error: {0}")]
    Loader(#[from] quickbite_loader::LoaderError),

    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Metric computation failed: {0}")]
    Metric(String),
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
