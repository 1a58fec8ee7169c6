//! Pure cart logic: the reducer that produces the next item list and the
//! pricing functions that summarise it. Nothing in here does I/O.

pub mod error;
pub mod pricing;
pub mod reducer;

pub use error::*;
pub use pricing::{cart_count, subtotal, total};
pub use reducer::{apply_add, apply_remove};
