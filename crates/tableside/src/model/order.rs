//! A diner's order and the state it moves through in the kitchen.
//!
//! # Actor Framework
//! Managed by a [`ResourceActor`](tableside_actor::ResourceActor); see
//! [`crate::order_actor`] for creation checks and the transition rules.

use crate::model::{ClientId, MenuItemId};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(pub u32);

impl From<u32> for OrderId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Value picked for a menu option: a checkbox or free text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    Flag(bool),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderOption {
    pub option_slug: String,
    pub value: OptionValue,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    pub menu_item_id: MenuItemId,
    pub quantity: u32,
    #[serde(default)]
    pub options: Vec<OrderOption>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Order {
    pub id: OrderId,
    pub client_name: String,
    /// Identity the `order-started` and `order-served` notifications are sent to.
    pub client_uuid: ClientId,
    pub started: bool,
    pub served: bool,
    /// Slug of the table the order was placed from.
    pub table: String,
    pub items: Vec<OrderItem>,
}

impl Order {
    /// Kitchen state as a word: `pending`, `started` or `served`.
    pub fn status(&self) -> &'static str {
        match (self.started, self.served) {
            (_, true) => "served",
            (true, false) => "started",
            (false, false) => "pending",
        }
    }
}

/// Payload for creating an order. Body of `POST /orders`.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderCreate {
    pub client_name: String,
    pub client_uuid: ClientId,
    pub table_slug: String,
    pub items: Vec<OrderItem>,
}

/// One step along `pending -> started -> served`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderTransition {
    Started,
    Served,
}

impl Display for OrderTransition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderTransition::Started => f.write_str("started"),
            OrderTransition::Served => f.write_str("served"),
        }
    }
}

/// Body of `PATCH /orders/{id}`. Exactly one field must be `true`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct OrderPatch {
    #[serde(default)]
    pub started: Option<bool>,
    #[serde(default)]
    pub served: Option<bool>,
}

/// Why an [`OrderPatch`] does not name a single transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PatchError {
    #[error("order patch must set `started` or `served` to true")]
    Empty,
    #[error("order patch may set only one of `started` and `served`")]
    Ambiguous,
}

impl OrderPatch {
    /// The single transition this patch asks for.
    ///
    /// A `false` value does not name a transition: orders never move backwards.
    pub fn transition(&self) -> Result<OrderTransition, PatchError> {
        match (self.started == Some(true), self.served == Some(true)) {
            (true, false) => Ok(OrderTransition::Started),
            (false, true) => Ok(OrderTransition::Served),
            (true, true) => Err(PatchError::Ambiguous),
            (false, false) => Err(PatchError::Empty),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn patch(json: &str) -> OrderPatch {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn patch_names_exactly_one_transition() {
        assert_eq!(
            patch(r#"{"started": true}"#).transition(),
            Ok(OrderTransition::Started)
        );
        assert_eq!(
            patch(r#"{"served": true, "started": false}"#).transition(),
            Ok(OrderTransition::Served)
        );
        assert_eq!(patch("{}").transition(), Err(PatchError::Empty));
        assert_eq!(
            patch(r#"{"served": false}"#).transition(),
            Err(PatchError::Empty)
        );
        assert_eq!(
            patch(r#"{"started": true, "served": true}"#).transition(),
            Err(PatchError::Ambiguous)
        );
    }

    #[test]
    fn option_values_accept_flags_and_text() {
        let item: OrderItem = serde_json::from_str(
            r#"{"menu_item_id": 3, "quantity": 2,
                "options": [{"option_slug": "no-ice", "value": true},
                            {"option_slug": "cooking", "value": "rare"}]}"#,
        )
        .unwrap();
        assert_eq!(item.menu_item_id, MenuItemId(3));
        assert_eq!(item.options[0].value, OptionValue::Flag(true));
        assert_eq!(item.options[1].value, OptionValue::Text("rare".to_string()));
    }
}
