//! Request handlers. Each write is sent to its actor first; the coordinator is told only
//! once the actor has accepted it.

use super::auth::AdminAuth;
use super::error::ApiError;
use crate::clients::{ActorClient, MenuClient, OrderClient};
use crate::coordinator::{Coordinator, Mutation};
use crate::model::{
    ClientId, MenuItem, MenuItemId, MenuItemPatch, Order, OrderCreate, OrderId, OrderPatch,
    Table,
};
use crate::relay::{HandshakeToken, Relay};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use std::sync::Arc;
use tracing::info;

pub async fn list_menu(State(menu): State<MenuClient>) -> Result<Json<Vec<MenuItem>>, ApiError> {
    Ok(Json(menu.list().await?))
}

pub async fn patch_menu_item(
    _: AdminAuth,
    State(menu): State<MenuClient>,
    State(coordinator): State<Coordinator>,
    Path(id): Path<MenuItemId>,
    Json(patch): Json<MenuItemPatch>,
) -> Result<Json<MenuItem>, ApiError> {
    let updated = menu.set_availability(id, patch.available).await?;
    if updated.change {
        coordinator
            .notify(Mutation::MenuItemAvailabilityChanged {
                item_id: id,
                available: updated.entity.available,
            })
            .await;
    }
    Ok(Json(updated.entity))
}

pub async fn list_tables(State(tables): State<Arc<Vec<Table>>>) -> Json<Vec<Table>> {
    Json(tables.as_ref().clone())
}

pub async fn create_order(
    State(orders): State<OrderClient>,
    State(coordinator): State<Coordinator>,
    Json(params): Json<OrderCreate>,
) -> Result<(StatusCode, Json<Order>), ApiError> {
    let order = orders.create_order(params).await?;
    info!(order_id = %order.id, client = %order.client_uuid, table = %order.table, "Order placed");

    coordinator.notify(Mutation::OrderCreated(order.clone())).await;
    Ok((StatusCode::CREATED, Json(order)))
}

pub async fn list_orders(
    _: AdminAuth,
    State(orders): State<OrderClient>,
) -> Result<Json<Vec<Order>>, ApiError> {
    Ok(Json(orders.list().await?))
}

pub async fn patch_order(
    _: AdminAuth,
    State(orders): State<OrderClient>,
    State(coordinator): State<Coordinator>,
    Path(id): Path<OrderId>,
    Json(patch): Json<OrderPatch>,
) -> Result<Json<Order>, ApiError> {
    let transition = patch.transition()?;
    let updated = orders.apply_transition(id, transition).await?;

    coordinator
        .notify(Mutation::OrderPatched {
            order: updated.entity.clone(),
            transition: updated.change,
        })
        .await;
    Ok(Json(updated.entity))
}

/// Credential check for the staff frontend.
pub async fn check_auth(_: AdminAuth) -> StatusCode {
    StatusCode::NO_CONTENT
}

/// `IssuePrivilegedHandshake(identity)`.
pub async fn issue_handshake(
    _: AdminAuth,
    State(relay): State<Relay>,
    Path(identity): Path<ClientId>,
) -> Result<Json<HandshakeToken>, ApiError> {
    Ok(Json(relay.handshake.issue(identity).await?))
}
