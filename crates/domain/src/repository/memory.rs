use std::sync::Arc;

use async_trait::async_trait;
use common::ProductId;
use tokio::sync::RwLock;

use super::{ProductRepository, RepositoryError};
use crate::catalog::{Category, Product};

/// In-memory repository for tests and database-less runs.
///
/// Records keep insertion order. Cloning yields another handle onto the same
/// storage.
#[derive(Clone, Default)]
pub struct InMemoryProductRepository {
    products: Arc<RwLock<Vec<Product>>>,
    categories: Arc<RwLock<Vec<Category>>>,
}

impl InMemoryProductRepository {
    /// Creates a new empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored products.
    pub async fn product_count(&self) -> usize {
        self.products.read().await.len()
    }

    /// Clears all products and categories.
    pub async fn clear(&self) {
        self.products.write().await.clear();
        self.categories.write().await.clear();
    }

    fn attach_category(mut product: Product, categories: &[Category]) -> Product {
        let cached = categories
            .iter()
            .find(|c| c.id() == product.category_id())
            .cloned();
        // A product's category id is never nil, so a matching category is accepted.
        if let Some(category) = cached
            && let Err(err) = product.change_category(category)
        {
            tracing::warn!(product_id = %product.id(), error = %err, "category not attached");
        }
        product
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn all(&self) -> Result<Vec<Product>, RepositoryError> {
        let categories = self.categories.read().await;
        let products = self.products.read().await;
        Ok(products
            .iter()
            .cloned()
            .map(|p| Self::attach_category(p, &categories))
            .collect())
    }

    async fn by_id(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let categories = self.categories.read().await;
        let products = self.products.read().await;
        Ok(products
            .iter()
            .find(|p| p.id() == id)
            .cloned()
            .map(|p| Self::attach_category(p, &categories)))
    }

    async fn by_category(&self, code: i32) -> Result<Vec<Product>, RepositoryError> {
        let categories = self.categories.read().await;
        let products = self.products.read().await;
        Ok(products
            .iter()
            .filter(|p| {
                categories
                    .iter()
                    .any(|c| c.code() == code && c.id() == p.category_id())
            })
            .cloned()
            .map(|p| Self::attach_category(p, &categories))
            .collect())
    }

    async fn categories(&self) -> Result<Vec<Category>, RepositoryError> {
        Ok(self.categories.read().await.clone())
    }

    async fn add(&self, product: &Product) -> Result<(), RepositoryError> {
        let mut products = self.products.write().await;
        if products.iter().any(|p| p.id() == product.id()) {
            return Err(RepositoryError::Duplicate {
                entity: "Product",
                id: product.id().to_string(),
            });
        }
        products.push(product.clone());
        Ok(())
    }

    async fn update(&self, product: &Product) -> Result<(), RepositoryError> {
        let mut products = self.products.write().await;
        let stored = products
            .iter_mut()
            .find(|p| p.id() == product.id())
            .ok_or_else(|| RepositoryError::NotFound {
                entity: "Product",
                id: product.id().to_string(),
            })?;
        *stored = product.clone();
        Ok(())
    }

    async fn remove(&self, product: &Product) -> Result<(), RepositoryError> {
        let mut products = self.products.write().await;
        let before = products.len();
        products.retain(|p| p.id() != product.id());
        if products.len() == before {
            return Err(RepositoryError::NotFound {
                entity: "Product",
                id: product.id().to_string(),
            });
        }
        Ok(())
    }

    async fn add_category(&self, category: &Category) -> Result<(), RepositoryError> {
        let mut categories = self.categories.write().await;
        if categories.iter().any(|c| c.id() == category.id()) {
            return Err(RepositoryError::Duplicate {
                entity: "Category",
                id: category.id().to_string(),
            });
        }
        categories.push(category.clone());
        Ok(())
    }

    async fn update_category(&self, category: &Category) -> Result<(), RepositoryError> {
        let mut categories = self.categories.write().await;
        let stored = categories
            .iter_mut()
            .find(|c| c.id() == category.id())
            .ok_or_else(|| RepositoryError::NotFound {
                entity: "Category",
                id: category.id().to_string(),
            })?;
        *stored = category.clone();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use common::CategoryId;

    use super::*;
    use crate::catalog::Money;

    fn product(name: &str, category_id: CategoryId) -> Product {
        Product::new(
            name,
            "Descrição",
            true,
            Money::from_units(100).unwrap(),
            category_id,
            Utc::now(),
            "imagem.jpg",
        )
        .unwrap()
    }

    #[tokio::test]
    async fn add_and_get_by_id() {
        let repo = InMemoryProductRepository::new();
        let product = product("Produto Teste", CategoryId::new());

        repo.add(&product).await.unwrap();

        let loaded = repo.by_id(product.id()).await.unwrap().unwrap();
        assert_eq!(loaded.name(), "Produto Teste");
        assert!(repo.by_id(ProductId::new()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn all_keeps_insertion_order() {
        let repo = InMemoryProductRepository::new();
        repo.add(&product("Produto 1", CategoryId::new())).await.unwrap();
        repo.add(&product("Produto 2", CategoryId::new())).await.unwrap();

        let names: Vec<_> = repo
            .all()
            .await
            .unwrap()
            .iter()
            .map(|p| p.name().to_string())
            .collect();
        assert_eq!(names, vec!["Produto 1", "Produto 2"]);
    }

    #[tokio::test]
    async fn add_rejects_duplicate_id() {
        let repo = InMemoryProductRepository::new();
        let product = product("Produto", CategoryId::new());
        repo.add(&product).await.unwrap();

        let err = repo.add(&product).await.unwrap_err();
        assert!(matches!(err, RepositoryError::Duplicate { entity: "Product", .. }));
    }

    #[tokio::test]
    async fn by_category_filters_on_business_code() {
        let repo = InMemoryProductRepository::new();
        let category = Category::new("Categoria 1", 1);
        repo.add_category(&category).await.unwrap();
        repo.add(&product("Produto 1", category.id())).await.unwrap();
        repo.add(&product("Produto 2", CategoryId::new())).await.unwrap();

        let products = repo.by_category(1).await.unwrap();

        assert_eq!(products.len(), 1);
        assert_eq!(products[0].name(), "Produto 1");
        assert_eq!(products[0].category(), Some(&category));
        assert!(repo.by_category(99).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_replaces_stored_product() {
        let repo = InMemoryProductRepository::new();
        let mut product = product("Produto Original", CategoryId::new());
        repo.add(&product).await.unwrap();

        product.rename("Produto Atualizado").unwrap();
        product.deactivate();
        repo.update(&product).await.unwrap();

        let loaded = repo.by_id(product.id()).await.unwrap().unwrap();
        assert_eq!(loaded.name(), "Produto Atualizado");
        assert!(!loaded.is_active());
    }

    #[tokio::test]
    async fn update_and_remove_unknown_product_fail() {
        let repo = InMemoryProductRepository::new();
        let product = product("Produto", CategoryId::new());

        assert!(matches!(
            repo.update(&product).await,
            Err(RepositoryError::NotFound { .. })
        ));
        assert!(matches!(
            repo.remove(&product).await,
            Err(RepositoryError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn remove_deletes_product() {
        let repo = InMemoryProductRepository::new();
        let product = product("Produto", CategoryId::new());
        repo.add(&product).await.unwrap();

        repo.remove(&product).await.unwrap();

        assert_eq!(repo.product_count().await, 0);
        assert!(repo.by_id(product.id()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn categories_can_be_added_and_updated() {
        let repo = InMemoryProductRepository::new();
        let id = CategoryId::new();
        repo.add_category(&Category::with_id("Categoria Original", 1, id))
            .await
            .unwrap();

        repo.update_category(&Category::with_id("Categoria Atualizada", 2, id))
            .await
            .unwrap();

        let categories = repo.categories().await.unwrap();
        assert_eq!(categories.len(), 1);
        assert_eq!(categories[0].name(), "Categoria Atualizada");
        assert_eq!(categories[0].code(), 2);
    }

    #[tokio::test]
    async fn clones_share_storage() {
        let repo = InMemoryProductRepository::new();
        let handle = repo.clone();
        handle
            .add(&product("Produto", CategoryId::new()))
            .await
            .unwrap();

        assert_eq!(repo.product_count().await, 1);
        repo.clear().await;
        assert_eq!(handle.product_count().await, 0);
    }
}
