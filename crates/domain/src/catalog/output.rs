//! Read-side shapes returned to callers.

use chrono::{DateTime, Utc};
use common::{CategoryId, ProductId};
use serde::{Deserialize, Serialize};

use super::{Category, Product};

/// Result of a completed add or update command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductOutput {
    pub id: ProductId,
    pub category_id: CategoryId,
    pub name: String,
    pub description: String,
    pub active: bool,
    pub value_cents: i64,
    pub image: String,
}

impl From<&Product> for ProductOutput {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id(),
            category_id: product.category_id(),
            name: product.name().to_string(),
            description: product.description().to_string(),
            active: product.is_active(),
            value_cents: product.value().cents(),
            image: product.image().to_string(),
        }
    }
}

/// Product as listed by the query service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDto {
    pub id: ProductId,
    pub category_id: CategoryId,
    pub category_name: Option<String>,
    pub name: String,
    pub description: String,
    pub active: bool,
    pub value_cents: i64,
    pub image: String,
    pub stock_quantity: u32,
    pub created_at: DateTime<Utc>,
}

impl From<&Product> for ProductDto {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id(),
            category_id: product.category_id(),
            category_name: product.category().map(|c| c.name().to_string()),
            name: product.name().to_string(),
            description: product.description().to_string(),
            active: product.is_active(),
            value_cents: product.value().cents(),
            image: product.image().to_string(),
            stock_quantity: product.stock_quantity(),
            created_at: product.created_at(),
        }
    }
}

/// Category as listed by the query service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryDto {
    pub id: CategoryId,
    pub name: String,
    pub code: i32,
}

impl From<&Category> for CategoryDto {
    fn from(category: &Category) -> Self {
        Self {
            id: category.id(),
            name: category.name().to_string(),
            code: category.code(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Money;

    #[test]
    fn output_copies_product_fields() {
        let category_id = CategoryId::new();
        let product = Product::new(
            "Produto Teste",
            "Descrição do Produto Teste",
            true,
            Money::from_cents(9999),
            category_id,
            Utc::now(),
            "data:image/jpeg;base64,...",
        )
        .unwrap();

        let output = ProductOutput::from(&product);

        assert_eq!(output.id, product.id());
        assert_eq!(output.category_id, category_id);
        assert_eq!(output.name, "Produto Teste");
        assert_eq!(output.description, "Descrição do Produto Teste");
        assert!(output.active);
        assert_eq!(output.value_cents, 9999);
        assert_eq!(output.image, "data:image/jpeg;base64,...");
    }

    #[test]
    fn dto_includes_cached_category_name() {
        let category = Category::new("Lanches", 1);
        let mut product = Product::new(
            "X-Burger",
            "Pão, carne e queijo",
            true,
            Money::from_cents(2500),
            category.id(),
            Utc::now(),
            "burger.jpg",
        )
        .unwrap();
        assert_eq!(ProductDto::from(&product).category_name, None);

        product.change_category(category).unwrap();
        product.restock(3).unwrap();
        let dto = ProductDto::from(&product);

        assert_eq!(dto.category_name.as_deref(), Some("Lanches"));
        assert_eq!(dto.stock_quantity, 3);
    }
}
