//! Plain cart data: items, the catalog they come from, and derived totals.

pub mod catalog;
pub mod item;
pub mod summary;

pub use catalog::*;
pub use item::*;
pub use summary::*;
