//! Catalog service providing a single entry point for product commands and
//! queries.

use crate::command::{Command, CommandHandler, CommandOutcome};
use crate::error::DomainError;
use crate::repository::ProductRepository;

use super::{
    AddProduct, AddProductHandler, ProductOutput, RemoveProduct, RemoveProductHandler,
    RepositoryProductQueries, UpdateProduct, UpdateProductHandler,
};

/// Service for managing the catalog.
///
/// Wraps one handler per write use case and the query service, all sharing
/// the same repository. Every dispatch is logged and counted.
pub struct CatalogService<R: ProductRepository + Clone> {
    add: AddProductHandler<R>,
    update: UpdateProductHandler<R>,
    remove: RemoveProductHandler<R>,
    queries: RepositoryProductQueries<R>,
}

impl<R: ProductRepository + Clone> CatalogService<R> {
    /// Creates a new catalog service over the given repository.
    pub fn new(repository: R) -> Self {
        Self {
            add: AddProductHandler::new(repository.clone()),
            update: UpdateProductHandler::new(repository.clone()),
            remove: RemoveProductHandler::new(repository.clone()),
            queries: RepositoryProductQueries::new(repository),
        }
    }

    /// Returns the query service.
    pub fn queries(&self) -> &RepositoryProductQueries<R> {
        &self.queries
    }

    /// Adds a new product.
    #[tracing::instrument(skip(self, cmd), fields(name = %cmd.input.name))]
    pub async fn add_product(
        &self,
        cmd: AddProduct,
    ) -> Result<CommandOutcome<ProductOutput>, DomainError> {
        dispatch(&self.add, cmd).await
    }

    /// Updates an existing product.
    #[tracing::instrument(skip(self, cmd), fields(product_id = %cmd.id))]
    pub async fn update_product(
        &self,
        cmd: UpdateProduct,
    ) -> Result<CommandOutcome<ProductOutput>, DomainError> {
        dispatch(&self.update, cmd).await
    }

    /// Removes a product.
    #[tracing::instrument(skip(self, cmd), fields(product_id = %cmd.id))]
    pub async fn remove_product(
        &self,
        cmd: RemoveProduct,
    ) -> Result<CommandOutcome<bool>, DomainError> {
        dispatch(&self.remove, cmd).await
    }
}

async fn dispatch<C, H>(handler: &H, command: C) -> Result<CommandOutcome<H::Output>, DomainError>
where
    C: Command + 'static,
    H: CommandHandler<C>,
{
    let message_type = command.message_type();
    let result = handler.handle(command).await;

    let outcome = match &result {
        Ok(outcome) => outcome.label(),
        Err(_) => "fault",
    };
    metrics::counter!(
        "catalog_commands_total",
        "command" => message_type,
        "outcome" => outcome
    )
    .increment(1);

    match &result {
        Ok(CommandOutcome::Rejected(notifications)) => {
            metrics::counter!("catalog_validation_failures_total", "command" => message_type)
                .increment(notifications.len() as u64);
            tracing::info!(
                command = message_type,
                violations = notifications.len(),
                "command rejected by validation"
            );
        }
        Ok(CommandOutcome::NotFound) => {
            tracing::info!(command = message_type, "command target not found");
        }
        Ok(CommandOutcome::Completed(_)) => {}
        Err(err) => {
            tracing::error!(command = message_type, error = %err, "command failed");
        }
    }

    result
}
