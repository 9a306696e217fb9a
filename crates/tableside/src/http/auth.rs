//! HTTP Basic authentication of staff requests.

use super::error::ApiError;
use crate::config::AdminConfig;
use async_trait::async_trait;
use axum::extract::{FromRef, FromRequestParts};
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::sync::Arc;
use subtle::ConstantTimeEq;
use tracing::warn;

/// The configured staff credentials.
#[derive(Clone, Debug)]
pub struct AdminCredentials(Arc<AdminConfig>);

impl AdminCredentials {
    pub fn new(config: AdminConfig) -> Self {
        Self(Arc::new(config))
    }

    /// Constant-time check of both fields.
    pub fn matches(&self, username: &str, password: &str) -> bool {
        let user = self.0.username.as_bytes().ct_eq(username.as_bytes());
        let pass = self.0.password.as_bytes().ct_eq(password.as_bytes());
        (user & pass).into()
    }
}

/// Extractor that only succeeds for requests carrying the staff credentials.
///
/// ```rust,ignore
/// async fn list_orders(_: AdminAuth, State(orders): State<OrderClient>) -> ... { ... }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct AdminAuth;

#[async_trait]
impl<S> FromRequestParts<S> for AdminAuth
where
    AdminCredentials: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, ApiError> {
        let credentials = AdminCredentials::from_ref(state);

        let (username, password) = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(parse_basic)
            .ok_or(ApiError::Unauthorized)?;

        if credentials.matches(&username, &password) {
            Ok(AdminAuth)
        } else {
            warn!(%username, "Admin authentication failed");
            Err(ApiError::Unauthorized)
        }
    }
}

fn parse_basic(header: &str) -> Option<(String, String)> {
    let encoded = header.strip_prefix("Basic ")?;
    let decoded = STANDARD.decode(encoded.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (username, password) = decoded.split_once(':')?;
    Some((username.to_string(), password.to_string()))
}
