use serde::{Deserialize, Serialize};

/// A table orders can be placed from. Read-only, loaded from configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub name: String,
    pub slug: String,
}
