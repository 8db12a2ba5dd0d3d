use thiserror::Error;

/// Every failure the engine and its ingestion helpers can report.
#[derive(Debug, Error)]
pub enum NetError {
    /// Invalid dimensions, unit counts or hyperparameters at creation time.
    #[error("construction error: {0}")]
    Construction(String),

    #[error("index out of bounds [{row},{col}] for matrix {rows}x{cols}")]
    IndexOutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    #[error("dimension mismatch: {0}")]
    DimensionMismatch(String),

    /// The layer chain is not Input -> Hidden* -> Output.
    #[error("structural error: {0}")]
    Structural(String),

    #[error("network has not been trained yet")]
    Untrained,

    #[error("table error: {0}")]
    Table(String),

    #[error("failed to parse cell at line {line}, column {column}: {message}")]
    Parse {
        line: u64,
        column: usize,
        message: String,
    },

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, NetError>;
