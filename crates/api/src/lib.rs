//! HTTP API for the product catalog.
//!
//! Exposes product and category endpoints over a [`CatalogService`], with
//! structured logging (tracing) and Prometheus metrics.

pub mod config;
pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use domain::{CatalogService, ProductRepository};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use routes::products::AppState;

/// Creates the Axum application router with all routes and shared state.
pub fn create_app<R: ProductRepository + Clone + 'static>(
    state: Arc<AppState<R>>,
    metrics_handle: PrometheusHandle,
) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::get))
        .with_state(metrics_handle);

    Router::new()
        .route("/health", get(routes::health::check::<R>))
        .route(
            "/products",
            get(routes::products::list::<R>).post(routes::products::create::<R>),
        )
        .route(
            "/products/{id}",
            get(routes::products::get::<R>)
                .put(routes::products::update::<R>)
                .delete(routes::products::remove::<R>),
        )
        .route(
            "/products/category/{code}",
            get(routes::products::by_category::<R>),
        )
        .route("/categories", get(routes::products::categories::<R>))
        .with_state(state)
        .merge(metrics_router)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

/// Creates the application state over `repository`.
pub fn create_state<R: ProductRepository + Clone + 'static>(
    repository: R,
    storage: &'static str,
) -> Arc<AppState<R>> {
    Arc::new(AppState {
        catalog: CatalogService::new(repository),
        storage,
    })
}
