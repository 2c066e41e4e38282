use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Remote service error: HTTP {status}: {body}")]
    RemoteService { status: u16, body: String },

    #[error("Remote service error: invalid response format")]
    InvalidResponse,

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl AppError {
    /// Status code this error maps to at the REST boundary.
    pub fn http_status(&self) -> u16 {
        match self {
            AppError::Validation(_) => 400,
            AppError::NotFound(_) => 404,
            AppError::RemoteService { .. } | AppError::InvalidResponse => 502,
            AppError::Storage(_) | AppError::Network(_) | AppError::Serialization(_) => 500,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        AppError::Serialization(e.to_string())
    }
}
