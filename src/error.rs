use std::fmt;

use crate::suggest::SuggestError;

#[derive(Debug)]
pub enum AppError {
    Config(String),
    Suggestion(SuggestError),
    Input(String),
    IO(std::io::Error),
    Other(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(msg) => write!(f, "Configuration error: {}", msg),
            AppError::Suggestion(err) => write!(f, "Suggestion error: {}", err),
            AppError::Input(msg) => write!(f, "Input error: {}", msg),
            AppError::IO(err) => write!(f, "IO error: {}", err),
            AppError::Other(msg) => write!(f, "Error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::IO(err) => Some(err),
            AppError::Suggestion(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::IO(err)
    }
}

impl From<SuggestError> for AppError {
    fn from(err: SuggestError) -> Self {
        AppError::Suggestion(err)
    }
}

impl From<toml_edit::TomlError> for AppError {
    fn from(err: toml_edit::TomlError) -> Self {
        AppError::Config(err.to_string())
    }
}

impl From<String> for AppError {
    fn from(msg: String) -> Self {
        AppError::Other(msg)
    }
}

impl From<&str> for AppError {
    fn from(msg: &str) -> Self {
        AppError::Other(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
