use polars::error::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoaderError {
    #[error("{table}: could not read {path}: {source}")]
    Io {
        table: &'static str,
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{table}: CSV read failed: {source}")]
    Read {
        table: &'static str,
        #[source]
        source: PolarsError,
    },

    #[error("{table}: required column '{column}' is missing")]
    MissingColumn {
        table: &'static str,
        column: String,
    },

    #[error("{table}: column normalization failed: {source}")]
    Normalize {
        table: &'static str,
        #[source]
        source: PolarsError,
    },

    #[error("{table}: file did not contain any data rows")]
    EmptyTable { table: &'static str },
}
