//! PDF Form-Fill Server
//!
//! A single-endpoint HTTP service: accept a JSON request naming a blank
//! PDF form template URL plus a field-name to value mapping, download
//! the template, fill its AcroForm fields, and return the completed PDF.
//!
//! # Modules
//!
//! - `fill`: request schema and validation
//! - `fetch`: template download over HTTP
//! - `forms`: AcroForm field population via `lopdf`

pub mod config;
pub mod error;
pub mod fetch;
pub mod fill;
pub mod forms;
pub mod routes;
pub mod state;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use state::AppState;

/// Build the application router with all routes and middleware
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .nest("/health", routes::health::router())
        .nest("/api/v1/health", routes::health::router())
        .nest("/api/v1/fill", routes::fill::router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
