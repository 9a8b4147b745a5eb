//! Product catalog endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use common::{CategoryId, ProductId};
use domain::{
    AddProduct, CatalogService, CategoryDto, CommandOutcome, DomainError, Money, ProductDto,
    ProductInput, ProductOutput, ProductQueries, ProductRepository, RemoveProduct, UpdateProduct,
};
use serde::Deserialize;

use crate::error::ApiError;

const NO_PRODUCTS: &str = "Nenhum produto encontrado.";
const NO_CATEGORIES: &str = "Nenhuma categoria encontrada.";
const PRODUCT_NOT_FOUND: &str = "Produto não encontrado.";

/// Shared application state accessible from all handlers.
pub struct AppState<R: ProductRepository + Clone> {
    pub catalog: CatalogService<R>,
    /// Storage backend name reported by the health check.
    pub storage: &'static str,
}

// -- Request types --

/// Body of `POST /products` and `PUT /products/{id}`.
///
/// Missing fields fall back to empty values so that validation can report
/// them instead of the JSON extractor.
#[derive(Debug, Deserialize)]
pub struct ProductRequest {
    #[serde(default = "CategoryId::nil")]
    pub category_id: CategoryId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default)]
    pub value_cents: i64,
    #[serde(default)]
    pub image: String,
}

fn default_active() -> bool {
    true
}

impl From<ProductRequest> for ProductInput {
    fn from(req: ProductRequest) -> Self {
        ProductInput::new(
            req.category_id,
            req.name,
            req.description,
            req.active,
            Money::from_cents(req.value_cents),
            req.image,
        )
    }
}

// -- Handlers --

/// GET /products: list every product.
#[tracing::instrument(skip(state))]
pub async fn list<R: ProductRepository + Clone + 'static>(
    State(state): State<Arc<AppState<R>>>,
) -> Result<Json<Vec<ProductDto>>, ApiError> {
    let products = state
        .catalog
        .queries()
        .all()
        .await
        .map_err(|e| ApiError::internal("recuperar produtos", e))?;

    if products.is_empty() {
        return Err(ApiError::NotFound(NO_PRODUCTS.to_string()));
    }
    Ok(Json(products))
}

/// GET /products/{id}: load one product.
#[tracing::instrument(skip(state))]
pub async fn get<R: ProductRepository + Clone + 'static>(
    State(state): State<Arc<AppState<R>>>,
    Path(id): Path<String>,
) -> Result<Json<ProductDto>, ApiError> {
    let product_id = parse_product_id(&id)?;
    state
        .catalog
        .queries()
        .by_id(product_id)
        .await
        .map_err(|e| ApiError::internal("recuperar produto", e))?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(PRODUCT_NOT_FOUND.to_string()))
}

/// GET /products/category/{code}: list products of one category code.
#[tracing::instrument(skip(state))]
pub async fn by_category<R: ProductRepository + Clone + 'static>(
    State(state): State<Arc<AppState<R>>>,
    Path(code): Path<i32>,
) -> Result<Json<Vec<ProductDto>>, ApiError> {
    let products = state
        .catalog
        .queries()
        .by_category(code)
        .await
        .map_err(|e| ApiError::internal("recuperar produtos", e))?;

    if products.is_empty() {
        return Err(ApiError::NotFound(PRODUCT_NOT_FOUND.to_string()));
    }
    Ok(Json(products))
}

/// GET /categories: list every category.
#[tracing::instrument(skip(state))]
pub async fn categories<R: ProductRepository + Clone + 'static>(
    State(state): State<Arc<AppState<R>>>,
) -> Result<Json<Vec<CategoryDto>>, ApiError> {
    let categories = state
        .catalog
        .queries()
        .categories()
        .await
        .map_err(|e| ApiError::internal("recuperar categorias", e))?;

    if categories.is_empty() {
        return Err(ApiError::NotFound(NO_CATEGORIES.to_string()));
    }
    Ok(Json(categories))
}

/// POST /products: add a product.
#[tracing::instrument(skip(state, req))]
pub async fn create<R: ProductRepository + Clone + 'static>(
    State(state): State<Arc<AppState<R>>>,
    Json(req): Json<ProductRequest>,
) -> Result<Json<ProductOutput>, ApiError> {
    let result = state
        .catalog
        .add_product(AddProduct::new(req.into()))
        .await;
    respond(result, "adicionar produto")
}

/// PUT /products/{id}: replace a product's editable fields.
#[tracing::instrument(skip(state, req))]
pub async fn update<R: ProductRepository + Clone + 'static>(
    State(state): State<Arc<AppState<R>>>,
    Path(id): Path<String>,
    Json(req): Json<ProductRequest>,
) -> Result<Json<ProductOutput>, ApiError> {
    let product_id = parse_product_id(&id)?;
    let result = state
        .catalog
        .update_product(UpdateProduct::new(product_id, req.into()))
        .await;
    respond(result, "atualizar produto")
}

/// DELETE /products/{id}: remove a product.
#[tracing::instrument(skip(state))]
pub async fn remove<R: ProductRepository + Clone + 'static>(
    State(state): State<Arc<AppState<R>>>,
    Path(id): Path<String>,
) -> Result<Json<bool>, ApiError> {
    let product_id = parse_product_id(&id)?;
    let result = state
        .catalog
        .remove_product(RemoveProduct::new(product_id))
        .await;
    respond(result, "remover produto")
}

// -- Helpers --

fn respond<T>(
    result: Result<CommandOutcome<T>, DomainError>,
    action: &str,
) -> Result<Json<T>, ApiError> {
    match result.map_err(|e| ApiError::internal(action, e))? {
        CommandOutcome::Completed(value) => Ok(Json(value)),
        CommandOutcome::Rejected(notifications) => Err(ApiError::Validation(notifications)),
        CommandOutcome::NotFound => Err(ApiError::NotFound(PRODUCT_NOT_FOUND.to_string())),
    }
}

fn parse_product_id(id: &str) -> Result<ProductId, ApiError> {
    let uuid = uuid::Uuid::parse_str(id)
        .map_err(|e| ApiError::BadRequest(format!("Id de produto inválido: {e}")))?;
    Ok(ProductId::from_uuid(uuid))
}
