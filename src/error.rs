use thiserror::Error;

#[derive(Error, Debug)]
pub enum FinError {
    #[error("CSV processing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid mortgage terms: {message}")]
    InvalidTerms { message: String },

    #[error("data error: {message}")]
    Data { message: String },
}

impl FinError {
    pub fn invalid_terms(message: impl Into<String>) -> Self {
        FinError::InvalidTerms {
            message: message.into(),
        }
    }

    pub fn data(message: impl Into<String>) -> Self {
        FinError::Data {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, FinError>;
