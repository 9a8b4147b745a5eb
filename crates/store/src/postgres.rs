use async_trait::async_trait;
use chrono::{DateTime, Utc};
use common::{CategoryId, ProductId};
use domain::{Category, Money, Product, ProductRepository, ProductSnapshot, RepositoryError};
use sqlx::{PgPool, Row, postgres::PgPoolOptions, postgres::PgRow};
use uuid::Uuid;

use crate::Result;

const PRODUCT_SELECT: &str = r#"
    SELECT p.id, p.category_id, p.name, p.description, p.active, p.value_cents,
           p.image, p.stock_quantity, p.created_at,
           c.name AS category_name, c.code AS category_code
    FROM products p
    LEFT JOIN categories c ON c.id = p.category_id
"#;

/// Unique constraint on `categories.code`, see `001_create_catalog_tables.sql`.
const UNIQUE_CATEGORY_CODE: &str = "unique_category_code";

/// PostgreSQL-backed product repository.
#[derive(Clone)]
pub struct PostgresProductRepository {
    pool: PgPool,
}

impl PostgresProductRepository {
    /// Creates a new repository over an existing pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Opens a pool against `database_url`.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        Ok(Self::new(pool))
    }

    /// Gets a reference to the underlying connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Runs the database migrations.
    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("../../migrations").run(&self.pool).await?;
        tracing::info!("catalog migrations applied");
        Ok(())
    }

    fn row_to_snapshot(row: &PgRow) -> std::result::Result<ProductSnapshot, sqlx::Error> {
        let category_id = CategoryId::from_uuid(row.try_get::<Uuid, _>("category_id")?);
        let category_name: Option<String> = row.try_get("category_name")?;
        let category_code: Option<i32> = row.try_get("category_code")?;
        let category = match (category_name, category_code) {
            (Some(name), Some(code)) => Some(Category::with_id(name, code, category_id)),
            _ => None,
        };

        let stock: i64 = row.try_get("stock_quantity")?;
        let stock_quantity =
            u32::try_from(stock).map_err(|err| sqlx::Error::Decode(Box::new(err)))?;

        Ok(ProductSnapshot {
            id: ProductId::from_uuid(row.try_get::<Uuid, _>("id")?),
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            active: row.try_get("active")?,
            value: Money::from_cents(row.try_get("value_cents")?),
            category_id,
            category,
            created_at: row.try_get::<DateTime<Utc>, _>("created_at")?,
            image: row.try_get("image")?,
            stock_quantity,
        })
    }

    fn row_to_product(row: PgRow) -> std::result::Result<Product, RepositoryError> {
        let snapshot = Self::row_to_snapshot(&row).map_err(RepositoryError::storage)?;
        let id = snapshot.id;
        Product::restore(snapshot)
            .map_err(|err| RepositoryError::Corrupt(format!("product {id}: {err}")))
    }

    fn row_to_category(row: PgRow) -> std::result::Result<Category, sqlx::Error> {
        Ok(Category::with_id(
            row.try_get::<String, _>("name")?,
            row.try_get("code")?,
            CategoryId::from_uuid(row.try_get::<Uuid, _>("id")?),
        ))
    }

    async fn fetch_products(
        &self,
        query: sqlx::query::Query<'_, sqlx::Postgres, sqlx::postgres::PgArguments>,
    ) -> std::result::Result<Vec<Product>, RepositoryError> {
        let rows = query
            .fetch_all(&self.pool)
            .await
            .map_err(RepositoryError::storage)?;

        rows.into_iter().map(Self::row_to_product).collect()
    }
}

/// Maps a unique-key violation to `Duplicate`, anything else to `Storage`.
fn insert_error(err: sqlx::Error, entity: &'static str, id: String) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = err
        && db_err.is_unique_violation()
    {
        return RepositoryError::Duplicate { entity, id };
    }
    RepositoryError::storage(err)
}

fn stock_column(product: &Product) -> i64 {
    i64::from(product.stock_quantity())
}

#[async_trait]
impl ProductRepository for PostgresProductRepository {
    async fn all(&self) -> std::result::Result<Vec<Product>, RepositoryError> {
        let sql = format!("{PRODUCT_SELECT} ORDER BY p.created_at ASC, p.id ASC");
        self.fetch_products(sqlx::query(&sql)).await
    }

    async fn by_id(&self, id: ProductId) -> std::result::Result<Option<Product>, RepositoryError> {
        let sql = format!("{PRODUCT_SELECT} WHERE p.id = $1");
        let row = sqlx::query(&sql)
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(RepositoryError::storage)?;

        row.map(Self::row_to_product).transpose()
    }

    async fn by_category(&self, code: i32) -> std::result::Result<Vec<Product>, RepositoryError> {
        let sql = format!("{PRODUCT_SELECT} WHERE c.code = $1 ORDER BY p.created_at ASC, p.id ASC");
        self.fetch_products(sqlx::query(&sql).bind(code)).await
    }

    async fn categories(&self) -> std::result::Result<Vec<Category>, RepositoryError> {
        let rows = sqlx::query("SELECT id, name, code FROM categories ORDER BY code ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(RepositoryError::storage)?;

        rows.into_iter()
            .map(Self::row_to_category)
            .collect::<std::result::Result<_, _>>()
            .map_err(RepositoryError::storage)
    }

    async fn add(&self, product: &Product) -> std::result::Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO products (id, category_id, name, description, active, value_cents, image, stock_quantity, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(product.id().as_uuid())
        .bind(product.category_id().as_uuid())
        .bind(product.name())
        .bind(product.description())
        .bind(product.is_active())
        .bind(product.value().cents())
        .bind(product.image())
        .bind(stock_column(product))
        .bind(product.created_at())
        .execute(&self.pool)
        .await
        .map_err(|e| insert_error(e, "Product", product.id().to_string()))?;

        Ok(())
    }

    async fn update(&self, product: &Product) -> std::result::Result<(), RepositoryError> {
        let result = sqlx::query(
            r#"
            UPDATE products
            SET category_id = $2, name = $3, description = $4, active = $5,
                value_cents = $6, image = $7, stock_quantity = $8
            WHERE id = $1
            "#,
        )
        .bind(product.id().as_uuid())
        .bind(product.category_id().as_uuid())
        .bind(product.name())
        .bind(product.description())
        .bind(product.is_active())
        .bind(product.value().cents())
        .bind(product.image())
        .bind(stock_column(product))
        .execute(&self.pool)
        .await
        .map_err(RepositoryError::storage)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound {
                entity: "Product",
                id: product.id().to_string(),
            });
        }
        Ok(())
    }

    async fn remove(&self, product: &Product) -> std::result::Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(product.id().as_uuid())
            .execute(&self.pool)
            .await
            .map_err(RepositoryError::storage)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound {
                entity: "Product",
                id: product.id().to_string(),
            });
        }
        Ok(())
    }

    async fn add_category(&self, category: &Category) -> std::result::Result<(), RepositoryError> {
        sqlx::query("INSERT INTO categories (id, name, code) VALUES ($1, $2, $3)")
            .bind(category.id().as_uuid())
            .bind(category.name())
            .bind(category.code())
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(ref db_err) = e
                    && db_err.constraint() == Some(UNIQUE_CATEGORY_CODE)
                {
                    return RepositoryError::Duplicate {
                        entity: "Category",
                        id: format!("code {}", category.code()),
                    };
                }
                insert_error(e, "Category", category.id().to_string())
            })?;

        Ok(())
    }

    async fn update_category(
        &self,
        category: &Category,
    ) -> std::result::Result<(), RepositoryError> {
        let result = sqlx::query("UPDATE categories SET name = $2, code = $3 WHERE id = $1")
            .bind(category.id().as_uuid())
            .bind(category.name())
            .bind(category.code())
            .execute(&self.pool)
            .await
            .map_err(RepositoryError::storage)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound {
                entity: "Category",
                id: category.id().to_string(),
            });
        }
        Ok(())
    }
}
