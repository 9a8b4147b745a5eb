//! Persistence contract for the catalog.

mod memory;

pub use memory::InMemoryProductRepository;

use async_trait::async_trait;
use common::ProductId;
use thiserror::Error;

use crate::catalog::{Category, Product};

/// Errors raised by repository implementations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The storage backend failed. The backend's error is kept as the source.
    #[error(transparent)]
    Storage(Box<dyn std::error::Error + Send + Sync>),

    /// An update or removal targeted a record that is not stored.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// An insert collided with an existing record.
    #[error("{entity} already exists: {id}")]
    Duplicate { entity: &'static str, id: String },

    /// A stored record no longer satisfies the entity invariants.
    #[error("Corrupt record: {0}")]
    Corrupt(String),
}

impl RepositoryError {
    /// Wraps a backend error.
    pub fn storage(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        RepositoryError::Storage(Box::new(err))
    }
}

/// Durable storage for products and categories.
///
/// Product reads attach the cached category when the category is stored.
/// All implementations must be thread-safe (Send + Sync).
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Returns every stored product.
    async fn all(&self) -> Result<Vec<Product>, RepositoryError>;

    /// Returns the product with the given id, if stored.
    async fn by_id(&self, id: ProductId) -> Result<Option<Product>, RepositoryError>;

    /// Returns the products whose category has the given business code.
    async fn by_category(&self, code: i32) -> Result<Vec<Product>, RepositoryError>;

    /// Returns every stored category.
    async fn categories(&self) -> Result<Vec<Category>, RepositoryError>;

    async fn add(&self, product: &Product) -> Result<(), RepositoryError>;

    async fn update(&self, product: &Product) -> Result<(), RepositoryError>;

    async fn remove(&self, product: &Product) -> Result<(), RepositoryError>;

    async fn add_category(&self, category: &Category) -> Result<(), RepositoryError>;

    async fn update_category(&self, category: &Category) -> Result<(), RepositoryError>;
}
