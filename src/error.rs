use thiserror::Error;

#[derive(Error, Debug)]
pub enum CrateError {
    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Missing required CSV header: {0}")]
    MissingHeader(String),

    #[error("Missing required value in column '{column}' at row {row}")]
    MissingValue { column: String, row: usize },

    #[error("Invalid value '{value}' in column '{column}': {message}")]
    InvalidFormat {
        column: String,
        value: String,
        message: String,
    },

    #[error("Failed to parse vocabulary file: {0}")]
    VocabularioParseError(#[from] serde_json::Error),

    #[error("Vocabulary produced an invalid pattern: {0}")]
    VocabularioPatternError(#[from] regex::Error),
}

pub type Result<T> = std::result::Result<T, CrateError>;
