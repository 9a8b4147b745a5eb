//! Product command handlers.
//!
//! Each handler follows the same sequence: validate the command into a fresh
//! [`Notifications`], stop with `Rejected` if anything was reported, and only
//! then build or mutate the entity and call the repository.

use async_trait::async_trait;
use chrono::Utc;

use crate::command::{CommandHandler, CommandOutcome};
use crate::error::DomainError;
use crate::notification::Notifications;
use crate::repository::ProductRepository;

use super::{
    AddProduct, AddProductValidation, Product, ProductOutput, RemoveProduct, UpdateProduct,
    UpdateProductValidation,
};

/// Handles [`AddProduct`].
pub struct AddProductHandler<R> {
    repository: R,
}

impl<R: ProductRepository> AddProductHandler<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<R: ProductRepository> CommandHandler<AddProduct> for AddProductHandler<R> {
    type Output = ProductOutput;

    async fn handle(
        &self,
        command: AddProduct,
    ) -> Result<CommandOutcome<ProductOutput>, DomainError> {
        let mut notifications = Notifications::new();
        AddProductValidation::validate(&command, &mut notifications);
        if notifications.has_notifications() {
            return Ok(CommandOutcome::Rejected(notifications.into_vec()));
        }

        let input = command.input;
        let product = Product::new(
            input.name,
            input.description,
            input.active,
            input.value,
            input.category_id,
            Utc::now(),
            input.image,
        )?;

        self.repository.add(&product).await?;
        tracing::info!(product_id = %product.id(), "product added");

        Ok(CommandOutcome::Completed(ProductOutput::from(&product)))
    }
}

/// Handles [`UpdateProduct`].
pub struct UpdateProductHandler<R> {
    repository: R,
}

impl<R: ProductRepository> UpdateProductHandler<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<R: ProductRepository> CommandHandler<UpdateProduct> for UpdateProductHandler<R> {
    type Output = ProductOutput;

    async fn handle(
        &self,
        command: UpdateProduct,
    ) -> Result<CommandOutcome<ProductOutput>, DomainError> {
        let Some(mut product) = self.repository.by_id(command.id).await? else {
            return Ok(CommandOutcome::NotFound);
        };

        let mut notifications = Notifications::new();
        UpdateProductValidation::validate(&command, &mut notifications);
        if notifications.has_notifications() {
            return Ok(CommandOutcome::Rejected(notifications.into_vec()));
        }

        let input = command.input;
        product.rename(input.name)?;
        product.change_description(input.description)?;
        product.change_value(input.value)?;
        product.change_image(input.image)?;
        product.change_category_id(input.category_id)?;
        if input.active {
            product.activate();
        } else {
            product.deactivate();
        }

        self.repository.update(&product).await?;
        tracing::info!(product_id = %product.id(), "product updated");

        Ok(CommandOutcome::Completed(ProductOutput::from(&product)))
    }
}

/// Handles [`RemoveProduct`].
pub struct RemoveProductHandler<R> {
    repository: R,
}

impl<R: ProductRepository> RemoveProductHandler<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<R: ProductRepository> CommandHandler<RemoveProduct> for RemoveProductHandler<R> {
    type Output = bool;

    async fn handle(&self, command: RemoveProduct) -> Result<CommandOutcome<bool>, DomainError> {
        let Some(product) = self.repository.by_id(command.id).await? else {
            return Ok(CommandOutcome::NotFound);
        };

        self.repository.remove(&product).await?;
        tracing::info!(product_id = %product.id(), "product removed");

        Ok(CommandOutcome::Completed(true))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    use common::{CategoryId, ProductId};

    use super::*;
    use crate::catalog::{Category, Money, ProductInput};
    use crate::repository::{InMemoryProductRepository, RepositoryError};

    #[derive(Debug, thiserror::Error)]
    #[error("connection refused")]
    struct ConnectionRefused;

    /// Wraps the in-memory repository, counting writes and optionally failing
    /// them.
    #[derive(Clone, Default)]
    struct SpyRepository {
        inner: InMemoryProductRepository,
        writes: Arc<AtomicUsize>,
        fail_writes: Arc<AtomicBool>,
    }

    impl SpyRepository {
        fn writes(&self) -> usize {
            self.writes.load(Ordering::SeqCst)
        }

        fn record_write(&self) -> Result<(), RepositoryError> {
            self.writes.fetch_add(1, Ordering::SeqCst);
            if self.fail_writes.load(Ordering::SeqCst) {
                return Err(RepositoryError::storage(ConnectionRefused));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl ProductRepository for SpyRepository {
        async fn all(&self) -> Result<Vec<Product>, RepositoryError> {
            self.inner.all().await
        }

        async fn by_id(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
            self.inner.by_id(id).await
        }

        async fn by_category(&self, code: i32) -> Result<Vec<Product>, RepositoryError> {
            self.inner.by_category(code).await
        }

        async fn categories(&self) -> Result<Vec<Category>, RepositoryError> {
            self.inner.categories().await
        }

        async fn add(&self, product: &Product) -> Result<(), RepositoryError> {
            self.record_write()?;
            self.inner.add(product).await
        }

        async fn update(&self, product: &Product) -> Result<(), RepositoryError> {
            self.record_write()?;
            self.inner.update(product).await
        }

        async fn remove(&self, product: &Product) -> Result<(), RepositoryError> {
            self.record_write()?;
            self.inner.remove(product).await
        }

        async fn add_category(&self, category: &Category) -> Result<(), RepositoryError> {
            self.inner.add_category(category).await
        }

        async fn update_category(&self, category: &Category) -> Result<(), RepositoryError> {
            self.inner.update_category(category).await
        }
    }

    fn valid_input() -> ProductInput {
        ProductInput::new(
            CategoryId::new(),
            "Produto Teste",
            "Descrição do produto teste",
            true,
            Money::from_cents(10_000),
            "Base64Imagem",
        )
    }

    fn invalid_input() -> ProductInput {
        ProductInput::new(CategoryId::nil(), "", "", true, Money::zero(), "")
    }

    async fn seeded(repo: &SpyRepository) -> Product {
        let product = Product::new(
            "Produto Original",
            "Descrição Original",
            true,
            Money::from_units(100).unwrap(),
            CategoryId::new(),
            Utc::now(),
            "imagem_original.jpg",
        )
        .unwrap();
        repo.inner.add(&product).await.unwrap();
        product
    }

    #[tokio::test]
    async fn add_persists_valid_product() {
        let repo = SpyRepository::default();
        let handler = AddProductHandler::new(repo.clone());

        let outcome = handler.handle(AddProduct::new(valid_input())).await.unwrap();

        let output = outcome.completed().unwrap();
        assert_eq!(output.name, "Produto Teste");
        assert_eq!(output.value_cents, 10_000);
        assert_eq!(repo.writes(), 1);
        let stored = repo.by_id(output.id).await.unwrap().unwrap();
        assert_eq!(stored.stock_quantity(), 0);
    }

    #[tokio::test]
    async fn add_rejects_all_violations_without_touching_repository() {
        let repo = SpyRepository::default();
        let handler = AddProductHandler::new(repo.clone());

        let outcome = handler.handle(AddProduct::new(invalid_input())).await.unwrap();

        let notifications = outcome.notifications().unwrap();
        assert_eq!(notifications.len(), 5);
        assert_eq!(repo.writes(), 0);
        assert_eq!(repo.inner.product_count().await, 0);
    }

    #[tokio::test]
    async fn add_propagates_storage_fault() {
        let repo = SpyRepository::default();
        repo.fail_writes.store(true, Ordering::SeqCst);
        let handler = AddProductHandler::new(repo.clone());

        let err = handler
            .handle(AddProduct::new(valid_input()))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            DomainError::Repository(RepositoryError::Storage(_))
        ));
        assert_eq!(err.to_string(), "connection refused");
    }

    #[tokio::test]
    async fn update_applies_every_field() {
        let repo = SpyRepository::default();
        let product = seeded(&repo).await;
        let handler = UpdateProductHandler::new(repo.clone());
        let input = ProductInput::new(
            CategoryId::new(),
            "Produto Atualizado",
            "Descrição Atualizada",
            false,
            Money::from_units(200).unwrap(),
            "imagem_atualizada.jpg",
        );

        let outcome = handler
            .handle(UpdateProduct::new(product.id(), input.clone()))
            .await
            .unwrap();

        let output = outcome.completed().unwrap();
        assert_eq!(output.id, product.id());
        let stored = repo.by_id(product.id()).await.unwrap().unwrap();
        assert_eq!(stored.name(), "Produto Atualizado");
        assert_eq!(stored.description(), "Descrição Atualizada");
        assert_eq!(stored.value(), Money::from_units(200).unwrap());
        assert!(!stored.is_active());
        assert_eq!(stored.category_id(), input.category_id);
        assert_eq!(stored.image(), "imagem_atualizada.jpg");
        assert_eq!(stored.created_at(), product.created_at());
    }

    #[tokio::test]
    async fn update_of_unknown_product_is_not_found() {
        let repo = SpyRepository::default();
        let handler = UpdateProductHandler::new(repo.clone());

        let outcome = handler
            .handle(UpdateProduct::new(ProductId::new(), valid_input()))
            .await
            .unwrap();

        assert!(outcome.is_not_found());
        assert_eq!(repo.writes(), 0);
    }

    #[tokio::test]
    async fn update_rejects_invalid_input_and_leaves_product_unchanged() {
        let repo = SpyRepository::default();
        let product = seeded(&repo).await;
        let handler = UpdateProductHandler::new(repo.clone());

        let outcome = handler
            .handle(UpdateProduct::new(product.id(), invalid_input()))
            .await
            .unwrap();

        assert_eq!(outcome.notifications().map(<[_]>::len), Some(5));
        assert_eq!(repo.writes(), 0);
        let stored = repo.by_id(product.id()).await.unwrap().unwrap();
        assert_eq!(stored, product);
    }

    #[tokio::test]
    async fn remove_deletes_existing_product() {
        let repo = SpyRepository::default();
        let product = seeded(&repo).await;
        let handler = RemoveProductHandler::new(repo.clone());

        let outcome = handler.handle(RemoveProduct::new(product.id())).await.unwrap();

        assert_eq!(outcome, CommandOutcome::Completed(true));
        assert!(repo.by_id(product.id()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn remove_of_unknown_product_is_not_found() {
        let repo = SpyRepository::default();
        let handler = RemoveProductHandler::new(repo.clone());

        let outcome = handler.handle(RemoveProduct::new(ProductId::nil())).await.unwrap();

        assert!(outcome.is_not_found());
        assert_eq!(repo.writes(), 0);
    }
}
