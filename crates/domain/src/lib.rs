//! Domain layer for the product catalog.
//!
//! This crate provides the core catalog abstractions including:
//! - Product and Category entities with their invariants
//! - Notification sink used by validators to report every violation
//! - Command trait and CommandHandler for the add/update/remove pipeline
//! - ProductRepository contract with an in-memory implementation

pub mod catalog;
pub mod command;
pub mod error;
pub mod notification;
pub mod repository;

pub use catalog::{
    AddProduct, AddProductHandler, AddProductValidation, CatalogError, CatalogService, Category,
    CategoryDto, Money, Product, ProductDto, ProductInput, ProductOutput, ProductQueries,
    ProductSnapshot, RemoveProduct, RemoveProductHandler, RepositoryProductQueries, UpdateProduct,
    UpdateProductHandler, UpdateProductValidation,
};
pub use command::{Command, CommandHandler, CommandOutcome};
pub use error::DomainError;
pub use notification::{Notification, Notifications};
pub use repository::{InMemoryProductRepository, ProductRepository, RepositoryError};
