use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BridgeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Field `{0}` is not valid text")]
    InputType(String),

    #[error("Invalid date format: {0}")]
    DateFormat(String),

    #[error("Invalid amount: {0}")]
    AmountFormat(String),

    #[error("Missing field: {0}")]
    MissingField(String),

    #[error("Input file not found: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("Input file has no header row: {}", .0.display())]
    EmptyInput(PathBuf),

    #[error("Unsupported encoding: {0}")]
    UnsupportedEncoding(String),

    #[error("{path} is not valid {encoding} text")]
    Decode { path: String, encoding: String },

    #[error("Text cannot be written as {0}")]
    Encode(String),

    #[error("Rows per file must be at least 1")]
    InvalidChunkSize,

    #[error("Settings error: {0}")]
    Settings(String),
}

impl BridgeError {
    /// Errors scoped to a single source row. The converter skips the row
    /// and keeps going when it sees one of these.
    pub fn is_row_error(&self) -> bool {
        matches!(
            self,
            Self::InputType(_) | Self::DateFormat(_) | Self::AmountFormat(_) | Self::MissingField(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, BridgeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_errors_are_classified() {
        assert!(BridgeError::DateFormat("x".into()).is_row_error());
        assert!(BridgeError::AmountFormat("abc".into()).is_row_error());
        assert!(BridgeError::MissingField("Amount".into()).is_row_error());
        assert!(BridgeError::InputType("Date".into()).is_row_error());
        assert!(!BridgeError::InputNotFound(PathBuf::from("a.csv")).is_row_error());
        assert!(!BridgeError::InvalidChunkSize.is_row_error());
    }

    #[test]
    fn test_messages_carry_raw_value() {
        let e = BridgeError::DateFormat("13/45/2024".into());
        assert_eq!(e.to_string(), "Invalid date format: 13/45/2024");
        let e = BridgeError::InputNotFound(PathBuf::from("missing.csv"));
        assert_eq!(e.to_string(), "Input file not found: missing.csv");
    }
}
