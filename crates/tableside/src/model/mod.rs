//! Domain data: who is connected, what is on the menu, and what has been ordered.

pub mod identity;
pub mod menu;
pub mod order;
pub mod table;

pub use identity::*;
pub use menu::*;
pub use order::*;
pub use table::*;
