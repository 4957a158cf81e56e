use axum::http::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("invalid date {0:?}, expected day-month-year")]
    InvalidDate(String),
    #[error("count must be non-negative, got {0}")]
    NegativeCount(i64),
}

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("sync request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("sync source returned status {0}")]
    Status(u16),
    #[error("no profile found for {0:?}")]
    UnknownUser(String),
    #[error("malformed sync payload: {0}")]
    Payload(String),
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read store: {0}")]
    Read(#[source] std::io::Error),
    #[error("failed to write store: {0}")]
    Write(#[source] std::io::Error),
    #[error("failed to encode store: {0}")]
    Encode(String),
    #[error("bad row at line {line}: {reason}")]
    BadRow { line: usize, reason: String },
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn internal(err: impl std::error::Error) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: err.to_string(),
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::internal(err)
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        Self::bad_request(err.to_string())
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        Self::internal(err)
    }
}

impl From<SyncError> for AppError {
    fn from(err: SyncError) -> Self {
        Self {
            status: StatusCode::BAD_GATEWAY,
            message: format!("sync failed: {err}"),
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}
