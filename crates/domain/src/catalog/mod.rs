//! Catalog entities and the product write pipeline.

mod category;
mod commands;
mod handlers;
mod output;
mod product;
mod queries;
mod service;
mod validation;
mod value_objects;

pub use category::Category;
pub use commands::{AddProduct, ProductInput, RemoveProduct, UpdateProduct};
pub use handlers::{AddProductHandler, RemoveProductHandler, UpdateProductHandler};
pub use output::{CategoryDto, ProductDto, ProductOutput};
pub use product::{Product, ProductSnapshot};
pub use queries::{ProductQueries, RepositoryProductQueries};
pub use service::CatalogService;
pub use validation::{AddProductValidation, UpdateProductValidation};
pub use value_objects::Money;

use thiserror::Error;

/// Invariant violations raised by catalog entities.
///
/// These abort the single operation that raised them; the entity is left
/// exactly as it was before the call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("O campo Nome do produto não pode estar vazio")]
    EmptyName,

    #[error("O campo Descricao do produto não pode estar vazio")]
    EmptyDescription,

    #[error("O campo Imagem do produto não pode estar vazio")]
    EmptyImage,

    #[error("O campo CategoriaId do produto não pode estar vazio")]
    EmptyCategoryId,

    #[error("O campo Valor do produto não pode se menor igual a 0")]
    NonPositiveValue { cents: i64 },

    #[error("Estoque insuficiente")]
    InsufficientStock { requested: u32, available: u32 },

    #[error("Estoque excede o limite suportado")]
    StockOverflow { on_hand: u32, added: u32 },
}
