//! An item on the menu.
//!
//! # Actor Framework
//! Managed by a [`ResourceActor`](tableside_actor::ResourceActor); see
//! [`crate::menu_actor`] for the entity hooks. Only availability can change
//! after seeding.

use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for menu items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MenuItemId(pub u32);

impl From<u32> for MenuItemId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for MenuItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A menu section such as "Drinks".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuCategory {
    pub name: String,
    pub slug: String,
}

/// A choice a diner can make on an item, e.g. "no ice" (`flag`) or "cooking" (`text`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuOption {
    pub slug: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: OptionKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionKind {
    Flag,
    Text,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MenuItem {
    pub id: MenuItemId,
    pub name: String,
    pub description: String,
    pub image: String,
    pub available: bool,
    pub category: MenuCategory,
    pub options: Vec<MenuOption>,
}

impl MenuItem {
    pub fn option(&self, slug: &str) -> Option<&MenuOption> {
        self.options.iter().find(|o| o.slug == slug)
    }
}

/// Payload for creating a menu item. Also the shape of a `[[menu]]` seed entry.
#[derive(Debug, Clone, Deserialize)]
pub struct MenuItemCreate {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: String,
    #[serde(default = "default_available")]
    pub available: bool,
    pub category: MenuCategory,
    #[serde(default)]
    pub options: Vec<MenuOption>,
}

fn default_available() -> bool {
    true
}

/// Staff-side change to an item. Body of `PATCH /menu/{id}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct MenuItemPatch {
    pub available: bool,
}
