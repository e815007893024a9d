//! Error type for change-point query selection

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum CpqError {
    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },
    #[error("configuration error: {message}")]
    Config { message: String },
}

impl CpqError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CpqError>;
