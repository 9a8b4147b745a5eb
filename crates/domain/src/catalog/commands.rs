//! Product commands.

use common::{CategoryId, ProductId};

use crate::command::Command;

use super::Money;

/// Raw product fields as submitted by a caller.
///
/// Nothing here is validated yet; validators inspect these fields before any
/// entity is built from them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductInput {
    pub category_id: CategoryId,
    pub name: String,
    pub description: String,
    pub active: bool,
    pub value: Money,
    pub image: String,
}

impl ProductInput {
    pub fn new(
        category_id: CategoryId,
        name: impl Into<String>,
        description: impl Into<String>,
        active: bool,
        value: Money,
        image: impl Into<String>,
    ) -> Self {
        Self {
            category_id,
            name: name.into(),
            description: description.into(),
            active,
            value,
            image: image.into(),
        }
    }
}

/// Command to add a new product to the catalog.
#[derive(Debug, Clone)]
pub struct AddProduct {
    pub input: ProductInput,
}

impl AddProduct {
    pub fn new(input: ProductInput) -> Self {
        Self { input }
    }
}

impl Command for AddProduct {
    fn message_type(&self) -> &'static str {
        "AddProduct"
    }
}

/// Command to overwrite the fields of an existing product.
#[derive(Debug, Clone)]
pub struct UpdateProduct {
    /// The product to update.
    pub id: ProductId,

    /// The new field values.
    pub input: ProductInput,
}

impl UpdateProduct {
    pub fn new(id: ProductId, input: ProductInput) -> Self {
        Self { id, input }
    }
}

impl Command for UpdateProduct {
    fn message_type(&self) -> &'static str {
        "UpdateProduct"
    }
}

/// Command to remove a product from the catalog.
#[derive(Debug, Clone)]
pub struct RemoveProduct {
    pub id: ProductId,
}

impl RemoveProduct {
    pub fn new(id: ProductId) -> Self {
        Self { id }
    }
}

impl Command for RemoveProduct {
    fn message_type(&self) -> &'static str {
        "RemoveProduct"
    }
}
