//! # HTTP Surface
//!
//! The axum router: menu, tables and orders over JSON, the staff credential check and
//! handshake, and the WebSocket endpoint of the [`relay`](crate::relay).

pub mod auth;
pub mod error;
pub mod handlers;

pub use auth::{AdminAuth, AdminCredentials};
pub use error::ApiError;

use crate::clients::{MenuClient, OrderClient};
use crate::coordinator::Coordinator;
use crate::model::Table;
use crate::relay::connection::open_channel;
use crate::relay::Relay;
use axum::extract::FromRef;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderValue, Method};
use axum::routing::{get, patch, post};
use axum::Router;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::warn;

/// Everything handlers can extract with `State<..>`.
#[derive(Clone, FromRef)]
pub struct AppState {
    pub menu: MenuClient,
    pub orders: OrderClient,
    pub relay: Relay,
    pub coordinator: Coordinator,
    pub admin: AdminCredentials,
    pub tables: Arc<Vec<Table>>,
}

pub fn router(state: AppState, allowed_origins: &[String]) -> Router {
    Router::new()
        .route("/menu", get(handlers::list_menu))
        .route("/menu/:id", patch(handlers::patch_menu_item))
        .route("/tables", get(handlers::list_tables))
        .route(
            "/orders",
            get(handlers::list_orders).post(handlers::create_order),
        )
        .route("/orders/:id", patch(handlers::patch_order))
        .route("/auth", get(handlers::check_auth))
        .route("/auth/handshake/:identity", post(handlers::issue_handshake))
        .route("/ws/:role/:identity", get(open_channel))
        .layer(cors(allowed_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(%origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PATCH])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE])
        .allow_credentials(true)
}
