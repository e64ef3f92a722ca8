use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use service::ServiceError;
use thiserror::Error;
use tracing::{debug, error, warn};

/// Body of every non-2xx response from the user endpoints.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ErrorBody {
    pub message: String,
}

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self { status, message: message.into() }
    }

    pub fn bad_request(message: impl Into<String>) -> Self { Self::new(StatusCode::BAD_REQUEST, message) }
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        let code = e.code();
        match e {
            ServiceError::Validation(msg) => Self::new(StatusCode::BAD_REQUEST, msg),
            ServiceError::NotFound(msg) => Self::new(StatusCode::NOT_FOUND, msg),
            ServiceError::Storage(detail) => {
                // storage details stay in the log
                error!(code, error = %detail, "storage failure");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal storage error")
            }
        }
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self { Self::new(rejection.status(), rejection.body_text()) }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self { Self::new(rejection.status(), rejection.body_text()) }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            // the cause was already logged at error level where it was converted
            debug!(status = %self.status, message = %self.message, "request failed");
        } else {
            warn!(status = %self.status, message = %self.message, "request rejected");
        }
        (self.status, Json(ErrorBody { message: self.message })).into_response()
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error(transparent)]
    Any(#[from] anyhow::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl CapturedLogs {
        fn text(&self) -> String { String::from_utf8(self.0.lock().unwrap().clone()).unwrap() }
    }

    impl io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }
        fn flush(&mut self) -> io::Result<()> { Ok(()) }
    }

    impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for CapturedLogs {
        type Writer = CapturedLogs;
        fn make_writer(&'a self) -> Self::Writer { self.clone() }
    }

    #[test]
    fn storage_failure_is_logged_once_with_detail() {
        let logs = CapturedLogs::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(logs.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::INFO)
            .finish();
        tracing::subscriber::with_default(subscriber, || {
            let e: ApiError = ServiceError::Storage("connection reset".into()).into();
            let res = e.into_response();
            assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
        });
        let text = logs.text();
        assert_eq!(text.matches("ERROR").count(), 1, "{text}");
        assert!(text.contains("connection reset"));
    }

    #[test]
    fn service_errors_map_to_status() {
        let e: ApiError = ServiceError::Validation("bad".into()).into();
        assert_eq!(e.status, StatusCode::BAD_REQUEST);
        assert_eq!(e.message, "bad");

        let e: ApiError = ServiceError::user_not_found(7).into();
        assert_eq!(e.status, StatusCode::NOT_FOUND);
        assert_eq!(e.message, "User with id 7 not found");

        let e: ApiError = ServiceError::Storage("connection reset".into()).into();
        assert_eq!(e.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(e.message, "Internal storage error");
    }
}
