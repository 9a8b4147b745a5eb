//! PostgreSQL persistence for the product catalog.
//!
//! Implements the domain's [`ProductRepository`](domain::ProductRepository)
//! contract on top of a sqlx connection pool.

pub mod error;
pub mod postgres;

pub use error::{Result, StoreError};
pub use postgres::PostgresProductRepository;
