//! # REST Routes
//!
//! Route definitions for the REST API.
//!
//! # Route Structure
//!
//! ```text
//! /health                                        GET
//! /contas-a-pagar-e-receber                      GET, POST
//! ├── /previsao-gastos-do-mes                    GET
//! └── /{id}                                      GET, PUT, DELETE
//!     └── /baixar                                POST
//! /fornecedor-cliente                            GET, POST
//! └── /{id}                                      GET, PUT, DELETE
//!     └── /contas-a-pagar-e-receber              GET
//! ```
//!
//! The static forecast segment wins over `{id}`, so the forecast path is never
//! parsed as an entry id.

use crate::api::middleware::{LoggingConfig, LoggingState, logging_middleware};
use crate::api::rest::handlers::{
    AppState, counterparty_entries, create_counterparty, create_entry, delete_counterparty,
    delete_entry, forecast, get_counterparty, get_entry, health_check, list_counterparties,
    list_entries, settle_entry, update_counterparty, update_entry,
};
use crate::config::RestConfig;
use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Creates the REST API router with all endpoints.
///
/// # Examples
///
/// ```ignore
/// use contas_api::api::rest::routes::create_router;
/// use contas_api::api::rest::handlers::AppState;
///
/// let state = Arc::new(AppState::new(store, MonthlyQuota::default()));
/// let router = create_router(state, &config.rest);
/// ```
pub fn create_router(state: Arc<AppState>, config: &RestConfig) -> Router {
    let router = api_routes()
        .layer(from_fn_with_state(
            Arc::new(logging_state(config)),
            logging_middleware,
        ))
        .layer(TraceLayer::new_for_http());

    let router = if config.enable_cors {
        router.layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
    } else {
        router
    };

    router.with_state(state)
}

fn logging_state(config: &RestConfig) -> LoggingState {
    let logging = LoggingConfig::default();
    LoggingState::new(if config.log_headers {
        logging.with_headers()
    } else {
        logging
    })
}

fn api_routes() -> Router<Arc<AppState>> {
    let entry_routes = Router::new()
        .route("/", get(list_entries).post(create_entry))
        .route("/previsao-gastos-do-mes", get(forecast))
        .route(
            "/{id}",
            get(get_entry).put(update_entry).delete(delete_entry),
        )
        .route("/{id}/baixar", post(settle_entry));

    let counterparty_routes = Router::new()
        .route("/", get(list_counterparties).post(create_counterparty))
        .route(
            "/{id}",
            get(get_counterparty)
                .put(update_counterparty)
                .delete(delete_counterparty),
        )
        .route("/{id}/contas-a-pagar-e-receber", get(counterparty_entries));

    Router::new()
        .route("/health", get(health_check))
        .nest("/contas-a-pagar-e-receber", entry_routes)
        .nest("/fornecedor-cliente", counterparty_routes)
}
