//! JSON error responses.

use salvo::{
    catcher::Catcher,
    http::{ResBody, StatusCode},
    oapi::{self, Components, EndpointOutRegister, Operation, ToSchema},
    prelude::{FlowCtrl, Json, Response, StatusError, handler},
    writing::Scribe,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::error;

use countdown::resolution::ResolutionError;
use countdown_app::domain::timers::TimersServiceError;

pub(crate) const INTERNAL_SERVER_ERROR: &str = "Internal server error";

/// Error body shared by every route
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub(crate) struct ErrorResponse {
    /// Human readable reason
    pub error: String,
}

/// A status code paired with an `{"error": ...}` body.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{status}: {message}")]
pub(crate) struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub(crate) fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub(crate) fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub(crate) fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    pub(crate) fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub(crate) fn internal() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_SERVER_ERROR)
    }

    pub(crate) fn status(&self) -> StatusCode {
        self.status
    }
}

impl Scribe for ApiError {
    fn render(self, res: &mut Response) {
        res.status_code(self.status);
        res.render(Json(ErrorResponse {
            error: self.message,
        }));
    }
}

impl EndpointOutRegister for ApiError {
    fn register(components: &mut Components, operation: &mut Operation) {
        for (status, description) in [
            (StatusCode::BAD_REQUEST, "Bad Request"),
            (StatusCode::UNAUTHORIZED, "Unauthorized"),
            (StatusCode::NOT_FOUND, "Not Found"),
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error"),
        ] {
            operation.responses.insert(
                status.as_str(),
                oapi::Response::new(description)
                    .add_content("application/json", ErrorResponse::to_schema(components)),
            );
        }
    }
}

/// Renders errors raised by salvo itself, such as unmatched routes or
/// undecodable bodies, with the same `{"error": ...}` body as [`ApiError`].
#[handler]
pub(crate) async fn json_errors(res: &mut Response, ctrl: &mut FlowCtrl) {
    let status = res.status_code.unwrap_or(StatusCode::NOT_FOUND);

    let error = match res.take_body() {
        ResBody::Error(error) => ApiError::from(error),
        _ if status.is_server_error() => ApiError::internal(),
        _ => ApiError::new(status, status.canonical_reason().unwrap_or("Request failed")),
    };

    res.render(error);
    ctrl.skip_rest();
}

/// Catcher installing [`json_errors`].
pub(crate) fn catcher() -> Catcher {
    Catcher::default().hoop(json_errors)
}

impl From<StatusError> for ApiError {
    fn from(error: StatusError) -> Self {
        if error.code.is_server_error() {
            return Self::internal();
        }

        let message = if error.brief.is_empty() {
            error.name
        } else {
            error.brief
        };

        Self::new(error.code, message)
    }
}

impl From<ResolutionError> for ApiError {
    fn from(error: ResolutionError) -> Self {
        match error {
            ResolutionError::MissingParameter => Self::bad_request(error.to_string()),
        }
    }
}

impl From<TimersServiceError> for ApiError {
    fn from(error: TimersServiceError) -> Self {
        match error {
            TimersServiceError::AlreadyExists => {
                Self::new(StatusCode::CONFLICT, "Timer already exists")
            }
            TimersServiceError::NotFound => Self::not_found("Timer not found"),
            TimersServiceError::ShopMismatch => {
                Self::new(StatusCode::FORBIDDEN, "Timer belongs to another shop")
            }
            TimersServiceError::InvalidReference
            | TimersServiceError::MissingRequiredData
            | TimersServiceError::InvalidData => Self::bad_request("Invalid timer payload"),
            TimersServiceError::Sql(source) => {
                error!("timer storage failed: {source}");

                Self::internal()
            }
        }
    }
}
