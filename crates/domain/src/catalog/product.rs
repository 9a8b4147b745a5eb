//! Product entity.

use chrono::{DateTime, Utc};
use common::{CategoryId, ProductId};

use super::{CatalogError, Category, Money};

/// Product entity.
///
/// Every constructor and mutator checks the product invariants before
/// touching state, so a `Product` value that exists is always valid:
/// - name, description and image are not blank
/// - the category id is not the empty id
/// - the value is strictly positive
/// - stock never goes below zero
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    id: ProductId,
    name: String,
    description: String,
    active: bool,
    value: Money,
    category_id: CategoryId,

    /// Cached copy of the owning category, when it has been looked up.
    /// Only `category_id` is authoritative.
    category: Option<Category>,

    created_at: DateTime<Utc>,
    image: String,
    stock_quantity: u32,
}

/// Persisted state of a product, used to rebuild it from storage.
#[derive(Debug, Clone)]
pub struct ProductSnapshot {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub active: bool,
    pub value: Money,
    pub category_id: CategoryId,
    pub category: Option<Category>,
    pub created_at: DateTime<Utc>,
    pub image: String,
    pub stock_quantity: u32,
}

fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

impl Product {
    /// Creates a new product with zero stock.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        active: bool,
        value: Money,
        category_id: CategoryId,
        created_at: DateTime<Utc>,
        image: impl Into<String>,
    ) -> Result<Self, CatalogError> {
        let product = Self {
            id: ProductId::new(),
            name: name.into(),
            description: description.into(),
            active,
            value,
            category_id,
            category: None,
            created_at,
            image: image.into(),
            stock_quantity: 0,
        };
        product.validate()?;
        Ok(product)
    }

    /// Rebuilds a stored product, re-checking its invariants.
    pub fn restore(snapshot: ProductSnapshot) -> Result<Self, CatalogError> {
        let category = snapshot
            .category
            .filter(|category| category.id() == snapshot.category_id);

        let product = Self {
            id: snapshot.id,
            name: snapshot.name,
            description: snapshot.description,
            active: snapshot.active,
            value: snapshot.value,
            category_id: snapshot.category_id,
            category,
            created_at: snapshot.created_at,
            image: snapshot.image,
            stock_quantity: snapshot.stock_quantity,
        };
        product.validate()?;
        Ok(product)
    }

    fn validate(&self) -> Result<(), CatalogError> {
        if is_blank(&self.name) {
            return Err(CatalogError::EmptyName);
        }
        if is_blank(&self.description) {
            return Err(CatalogError::EmptyDescription);
        }
        if is_blank(&self.image) {
            return Err(CatalogError::EmptyImage);
        }
        if self.category_id.is_nil() {
            return Err(CatalogError::EmptyCategoryId);
        }
        if !self.value.is_positive() {
            return Err(CatalogError::NonPositiveValue {
                cents: self.value.cents(),
            });
        }
        Ok(())
    }
}

// Query methods
impl Product {
    pub fn id(&self) -> ProductId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn value(&self) -> Money {
        self.value
    }

    pub fn category_id(&self) -> CategoryId {
        self.category_id
    }

    /// Returns the cached category, if it has been attached.
    pub fn category(&self) -> Option<&Category> {
        self.category.as_ref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn image(&self) -> &str {
        &self.image
    }

    pub fn stock_quantity(&self) -> u32 {
        self.stock_quantity
    }

    /// Returns true if at least `quantity` units are on hand.
    pub fn has_stock(&self, quantity: u32) -> bool {
        self.stock_quantity >= quantity
    }
}

// Mutators
impl Product {
    pub fn activate(&mut self) {
        self.active = true;
    }

    pub fn deactivate(&mut self) {
        self.active = false;
    }

    /// Moves the product to `category`, replacing both the id and the cached
    /// category.
    pub fn change_category(&mut self, category: Category) -> Result<(), CatalogError> {
        if category.id().is_nil() {
            return Err(CatalogError::EmptyCategoryId);
        }
        self.category_id = category.id();
        self.category = Some(category);
        Ok(())
    }

    /// Moves the product to the category with the given id.
    ///
    /// The cached category is dropped unless it already matches.
    pub fn change_category_id(&mut self, category_id: CategoryId) -> Result<(), CatalogError> {
        if category_id.is_nil() {
            return Err(CatalogError::EmptyCategoryId);
        }
        if self.category_id != category_id {
            self.category_id = category_id;
            self.category = None;
        }
        Ok(())
    }

    pub fn change_description(
        &mut self,
        description: impl Into<String>,
    ) -> Result<(), CatalogError> {
        let description = description.into();
        if is_blank(&description) {
            return Err(CatalogError::EmptyDescription);
        }
        self.description = description;
        Ok(())
    }

    pub fn rename(&mut self, name: impl Into<String>) -> Result<(), CatalogError> {
        let name = name.into();
        if is_blank(&name) {
            return Err(CatalogError::EmptyName);
        }
        self.name = name;
        Ok(())
    }

    pub fn change_value(&mut self, value: Money) -> Result<(), CatalogError> {
        if !value.is_positive() {
            return Err(CatalogError::NonPositiveValue {
                cents: value.cents(),
            });
        }
        self.value = value;
        Ok(())
    }

    pub fn change_image(&mut self, image: impl Into<String>) -> Result<(), CatalogError> {
        let image = image.into();
        if is_blank(&image) {
            return Err(CatalogError::EmptyImage);
        }
        self.image = image;
        Ok(())
    }

    /// Removes `quantity` units from stock.
    pub fn debit_stock(&mut self, quantity: u32) -> Result<(), CatalogError> {
        if !self.has_stock(quantity) {
            return Err(CatalogError::InsufficientStock {
                requested: quantity,
                available: self.stock_quantity,
            });
        }
        self.stock_quantity -= quantity;
        Ok(())
    }

    /// Adds `quantity` units to stock. Zero is accepted and changes nothing.
    pub fn restock(&mut self, quantity: u32) -> Result<(), CatalogError> {
        if quantity == 0 {
            tracing::debug!(product_id = %self.id, "zero-quantity restock");
            return Ok(());
        }
        let on_hand = self.stock_quantity;
        self.stock_quantity = on_hand
            .checked_add(quantity)
            .ok_or(CatalogError::StockOverflow {
                on_hand,
                added: quantity,
            })?;
        Ok(())
    }
}
