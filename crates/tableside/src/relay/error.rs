//! Errors surfaced by the relay to connecting peers.

use crate::model::{ClientId, Role};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tableside_actor::FrameworkError;

/// WebSocket close code for policy violations (RFC 6455 §7.4.1).
pub const POLICY_VIOLATION: u16 = 1008;

#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    /// The identity is already bound to another role. Its existing channels are unaffected.
    #[error("identity {identity} is bound to role {bound}, not {requested}")]
    RoleConflict {
        identity: ClientId,
        bound: Role,
        requested: Role,
    },

    /// A privileged channel was opened without a valid token.
    #[error("handshake rejected for {identity}: {reason}")]
    HandshakeRejected {
        identity: ClientId,
        reason: &'static str,
    },

    /// The registry or handshake actor is not running.
    #[error("relay unavailable: {0}")]
    Unavailable(#[from] FrameworkError),
}

impl RelayError {
    pub fn status(&self) -> StatusCode {
        match self {
            RelayError::RoleConflict { .. } => StatusCode::CONFLICT,
            RelayError::HandshakeRejected { .. } => StatusCode::FORBIDDEN,
            RelayError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    /// Close code reported to the peer, for rejections of the channel itself.
    pub fn close_code(&self) -> Option<u16> {
        match self {
            RelayError::RoleConflict { .. } | RelayError::HandshakeRejected { .. } => {
                Some(POLICY_VIOLATION)
            }
            RelayError::Unavailable(_) => None,
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let body = json!({
            "error": self.to_string(),
            "close_code": self.close_code(),
        });
        (self.status(), Json(body)).into_response()
    }
}
