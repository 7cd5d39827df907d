use std::process::{ExitCode, Termination};

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use error_stack::Report;
use serde::Serialize;

use kernel::KernelError;

#[derive(Debug)]
pub struct StackTrace(Report<KernelError>);

impl From<Report<KernelError>> for StackTrace {
    fn from(e: Report<KernelError>) -> Self {
        StackTrace(e)
    }
}

impl Termination for StackTrace {
    fn report(self) -> ExitCode {
        self.0.report()
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    error: String,
    description: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            description: description.into(),
        }
    }
}

#[derive(Debug)]
pub struct ErrorStatus(Report<KernelError>);

impl From<Report<KernelError>> for ErrorStatus {
    fn from(e: Report<KernelError>) -> Self {
        ErrorStatus(e)
    }
}

impl ErrorStatus {
    fn status(&self) -> StatusCode {
        match self.0.current_context() {
            KernelError::NotFound(_) => StatusCode::NOT_FOUND,
            KernelError::Invalid(_) => StatusCode::BAD_REQUEST,
            KernelError::Concurrency => StatusCode::CONFLICT,
            KernelError::Timeout => StatusCode::REQUEST_TIMEOUT,
            KernelError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ErrorStatus {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        match self.0.current_context() {
            KernelError::NotFound(reason) => {
                tracing::warn!("{:?}", self.0);
                (status, Json(ErrorBody::new("Not Found", reason.to_string()))).into_response()
            }
            KernelError::Invalid(reason) => {
                tracing::warn!("{:?}", self.0);
                (status, Json(ErrorBody::new("Bad Request", reason.to_string()))).into_response()
            }
            _ => {
                tracing::error!("{:?}", self.0);
                status.into_response()
            }
        }
    }
}

/// Request rejected before reaching a service.
#[derive(Debug)]
pub struct BadRequest(String);

impl BadRequest {
    pub fn new(description: impl Into<String>) -> Self {
        Self(description.into())
    }
}

impl IntoResponse for BadRequest {
    fn into_response(self) -> axum::response::Response {
        tracing::warn!("{}", self.0);
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorBody::new("Bad Request", self.0)),
        )
            .into_response()
    }
}

#[cfg(test)]
mod test {
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use error_stack::Report;
    use http_body_util::BodyExt;

    use kernel::{Invalid, KernelError, NotFound, UNSUPPORTED_STATUS};

    use crate::error::ErrorStatus;

    fn status_of(error: KernelError) -> StatusCode {
        ErrorStatus::from(Report::new(error)).into_response().status()
    }

    #[test]
    fn maps_kernel_errors_to_status() {
        assert_eq!(status_of(NotFound::Booking.into()), StatusCode::NOT_FOUND);
        assert_eq!(status_of(NotFound::SelfBooking.into()), StatusCode::NOT_FOUND);
        assert_eq!(status_of(Invalid::AlreadyBooked.into()), StatusCode::BAD_REQUEST);
        assert_eq!(status_of(Invalid::BadPageSize.into()), StatusCode::BAD_REQUEST);
        assert_eq!(status_of(KernelError::Concurrency), StatusCode::CONFLICT);
        assert_eq!(status_of(KernelError::Timeout), StatusCode::REQUEST_TIMEOUT);
        assert_eq!(
            status_of(KernelError::Internal),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn unsupported_state_body_names_the_state() {
        let response =
            ErrorStatus::from(Report::new(KernelError::from(Invalid::UnsupportedStatus)))
                .into_response();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "Bad Request");
        assert_eq!(json["description"], UNSUPPORTED_STATUS);
    }
}
