//! Shared types for the product catalog.

mod types;

pub use types::{CategoryId, ProductId};
