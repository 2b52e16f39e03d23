use thiserror::Error;
use tokio::task::JoinError;

use crate::model::common::PokemonId;

#[derive(Error, Debug, Clone)]
pub enum AppError {
    #[error("HTTP request failed: {0}")]
    Reqwest(String),
    #[error("Filesystem I/O error: {0}")]
    Io(String),
    #[error("JSON serialization error: {0}")]
    SerdeSerialize(String),
    #[error("API returned HTTP {status} (Endpoint: {endpoint}, Id: {id})")]
    HttpStatus {
        status: u16,
        endpoint: String,
        id: PokemonId,
    },
    #[error("API response structure invalid: {message} (Endpoint: {endpoint}, Id: {id})")]
    ResponseInvalid {
        message: String,
        endpoint: String,
        id: PokemonId,
    },
    #[error("Invalid argument provided: {0}")]
    Argument(String),
    #[error("Tokio task join error: {0}")]
    JoinError(String),
    #[error("Timeout during operation: {0}")]
    Timeout(String),
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl From<reqwest::Error> for AppError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            AppError::Timeout(e.to_string())
        } else {
            AppError::Reqwest(e.to_string())
        }
    }
}
impl From<std::io::Error> for AppError {
    fn from(e: std::io::Error) -> Self {
        AppError::Io(e.to_string())
    }
}
impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        AppError::SerdeSerialize(e.to_string())
    }
}
impl From<JoinError> for AppError {
    fn from(e: JoinError) -> Self {
        AppError::JoinError(e.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn http_status(status: u16, endpoint: &str, id: PokemonId) -> AppError {
        AppError::HttpStatus {
            status,
            endpoint: endpoint.to_string(),
            id,
        }
    }

    pub fn response_invalid<S: Into<String>>(
        message: S,
        endpoint: &str,
        id: PokemonId,
    ) -> AppError {
        AppError::ResponseInvalid {
            message: message.into(),
            endpoint: endpoint.to_string(),
            id,
        }
    }

    /// Short cause used in per-id skip lines.
    pub fn skip_reason(&self) -> String {
        match self {
            AppError::HttpStatus { status, .. } => format!("status {}", status),
            AppError::ResponseInvalid { message, .. } => format!("malformed response: {}", message),
            AppError::Timeout(_) => "timeout".to_string(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skip_reason_names_status_code() {
        let e = AppError::http_status(404, "pokemon", 10_001);
        assert_eq!(e.skip_reason(), "status 404");
    }

    #[test]
    fn malformed_response_names_the_cause() {
        let e = AppError::response_invalid("missing field `name`", "pokemon", 3);
        assert!(e.skip_reason().starts_with("malformed response"));
    }
}
