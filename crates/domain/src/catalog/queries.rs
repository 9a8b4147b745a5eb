//! Read-only catalog queries.

use async_trait::async_trait;
use common::ProductId;

use crate::repository::{ProductRepository, RepositoryError};

use super::{CategoryDto, ProductDto};

/// Read-side access to the catalog.
#[async_trait]
pub trait ProductQueries: Send + Sync {
    async fn all(&self) -> Result<Vec<ProductDto>, RepositoryError>;

    async fn by_id(&self, id: ProductId) -> Result<Option<ProductDto>, RepositoryError>;

    /// Products whose category has the given business code.
    async fn by_category(&self, code: i32) -> Result<Vec<ProductDto>, RepositoryError>;

    async fn categories(&self) -> Result<Vec<CategoryDto>, RepositoryError>;
}

/// [`ProductQueries`] served straight from a repository.
#[derive(Clone)]
pub struct RepositoryProductQueries<R> {
    repository: R,
}

impl<R: ProductRepository> RepositoryProductQueries<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<R: ProductRepository> ProductQueries for RepositoryProductQueries<R> {
    async fn all(&self) -> Result<Vec<ProductDto>, RepositoryError> {
        let products = self.repository.all().await?;
        Ok(products.iter().map(ProductDto::from).collect())
    }

    async fn by_id(&self, id: ProductId) -> Result<Option<ProductDto>, RepositoryError> {
        let product = self.repository.by_id(id).await?;
        Ok(product.as_ref().map(ProductDto::from))
    }

    async fn by_category(&self, code: i32) -> Result<Vec<ProductDto>, RepositoryError> {
        let products = self.repository.by_category(code).await?;
        Ok(products.iter().map(ProductDto::from).collect())
    }

    async fn categories(&self) -> Result<Vec<CategoryDto>, RepositoryError> {
        let categories = self.repository.categories().await?;
        Ok(categories.iter().map(CategoryDto::from).collect())
    }
}
