use thiserror::Error;
use tracing::error;

/// Error types for the compute module
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// The academic data file could not be read
    #[error("Data file error: {0}")]
    DataFile(String),

    /// Error from Polars DataFrame operations
    #[error("DataFrame error: {0}")]
    DataFrame(String),

    /// Error from Polars Series operations
    #[error("Series error: {0}")]
    Series(String),

    /// A column the loader relies on is absent from the file
    #[error("Missing column: {0}")]
    MissingColumn(String),
}

impl From<polars::error::PolarsError> for AnalysisError {
    fn from(error: polars::error::PolarsError) -> Self {
        let analysis_error = match error {
            polars::error::PolarsError::ColumnNotFound(_) => {
                AnalysisError::MissingColumn(format!("{}", error))
            }
            polars::error::PolarsError::NoData(_) => {
                AnalysisError::DataFrame(format!("No data: {}", error))
            }
            polars::error::PolarsError::ShapeMismatch(_) => {
                AnalysisError::DataFrame(format!("Shape mismatch: {}", error))
            }
            polars::error::PolarsError::SchemaMismatch(_) => {
                AnalysisError::DataFrame(format!("Schema mismatch: {}", error))
            }
            polars::error::PolarsError::ComputeError(_) => {
                AnalysisError::DataFrame(format!("Compute error: {}", error))
            }
            polars::error::PolarsError::IO { .. } => {
                AnalysisError::DataFile(format!("{}", error))
            }
            _ => AnalysisError::Series(format!("Series error: {}", error)),
        };
        error!(err = ?analysis_error, "Polars operation failed");
        analysis_error
    }
}

/// Type alias for Result with AnalysisError
pub type Result<T> = std::result::Result<T, AnalysisError>;
