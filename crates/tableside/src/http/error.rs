//! Error responses of the HTTP surface.

use crate::menu_actor::MenuError;
use crate::model::PatchError;
use crate::order_actor::OrderError;
use crate::relay::RelayError;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::error;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("admin credentials required")]
    Unauthorized,

    #[error(transparent)]
    Menu(#[from] MenuError),

    #[error(transparent)]
    Order(#[from] OrderError),

    #[error(transparent)]
    InvalidPatch(#[from] PatchError),

    #[error(transparent)]
    Relay(#[from] RelayError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::Menu(e) => match e {
                MenuError::NotFound(_) => StatusCode::NOT_FOUND,
                MenuError::Invalid(_) => StatusCode::UNPROCESSABLE_ENTITY,
                MenuError::ActorCommunicationError(_) => StatusCode::SERVICE_UNAVAILABLE,
            },
            ApiError::Order(e) => match e {
                OrderError::NotFound(_) => StatusCode::NOT_FOUND,
                OrderError::InvalidTransition { .. } => StatusCode::CONFLICT,
                OrderError::ActorCommunicationError(_) => StatusCode::SERVICE_UNAVAILABLE,
                OrderError::Empty
                | OrderError::ValidationError(_)
                | OrderError::UnknownTable(_)
                | OrderError::UnknownMenuItem(_)
                | OrderError::Unavailable(_)
                | OrderError::InvalidQuantity(_)
                | OrderError::UnknownOption { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            },
            ApiError::InvalidPatch(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Relay(e) => e.status(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, "Request failed");
        }

        if let ApiError::Relay(e) = self {
            return e.into_response();
        }
        let body = Json(json!({ "error": self.to_string() }));
        match self {
            ApiError::Unauthorized => (
                status,
                [(header::WWW_AUTHENTICATE, r#"Basic realm="tableside""#)],
                body,
            )
                .into_response(),
            _ => (status, body).into_response(),
        }
    }
}
