//! HTTP API Layer
//!
//! This crate provides the REST API for the guarantee ledger using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: generic CRUD per entity plus the reconciliation,
//!   conversion and dashboard endpoints
//! - **Middleware**: request ids, tracing, request logging, CORS
//! - **DTOs**: camelCase request bodies validated with `validator`
//! - **Error Handling**: `validation_error` / `not_found` / `internal_error`
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::create_router;
//!
//! let app = create_router(Repositories::new(pool), config);
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod handlers;
pub mod dto;

use axum::{
    middleware as axum_middleware,
    routing::get,
    Router,
};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use domain_credit::Credit;
use domain_directory::{Bank, Currency, ExchangeRate, Project};
use domain_guarantee::{GuaranteeLetter, LetterPayment};
use infra_db::Repositories;

use crate::config::ApiConfig;
use crate::handlers::crud::{self, Resource};
use crate::handlers::{credits, dashboard, exchange_rates, health, letter_payments};
use crate::middleware::log_requests;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub repositories: Repositories,
    pub config: ApiConfig,
}

/// List, create, fetch, patch and delete for one entity
fn crud_routes<R: Resource>() -> Router<AppState> {
    Router::new()
        .route("/", get(crud::list::<R>).post(crud::create::<R>))
        .route(
            "/:id",
            get(crud::get::<R>)
                .patch(crud::update::<R>)
                .delete(crud::delete::<R>),
        )
}

/// Creates the main API router
///
/// # Arguments
///
/// * `repositories` - Storage for every entity, over one pool
/// * `config` - API configuration
///
/// # Returns
///
/// Configured Axum router with all routes and middleware
pub fn create_router(repositories: Repositories, config: ApiConfig) -> Router {
    let state = AppState {
        repositories,
        config,
    };

    let health_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    let exchange_rate_routes = crud_routes::<ExchangeRate>()
        .route("/convert", get(exchange_rates::convert));

    let payment_routes = crud_routes::<LetterPayment>()
        .route("/summaries", get(letter_payments::summaries))
        .route("/letter/:id", get(letter_payments::for_letter))
        .route("/:id/summary", get(letter_payments::summary));

    let credit_routes = crud_routes::<Credit>()
        .route("/project/:id", get(credits::by_project))
        .route("/bank/:id", get(credits::by_bank));

    let api_routes = Router::new()
        .nest("/projects", crud_routes::<Project>())
        .nest("/banks", crud_routes::<Bank>())
        .nest("/currencies", crud_routes::<Currency>())
        .nest("/exchange-rates", exchange_rate_routes)
        .nest("/guarantee-letters", crud_routes::<GuaranteeLetter>())
        .nest("/credits", credit_routes)
        .nest("/letter-payments", payment_routes)
        .route("/dashboard-stats", get(dashboard::stats));

    Router::new()
        .merge(health_routes)
        .nest("/api", api_routes)
        .layer(axum_middleware::from_fn(log_requests))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                ),
        )
        .with_state(state)
}
