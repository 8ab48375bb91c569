//! Web server adapter.
//!
//! JSON API consumed by the browser client: the latest yield curve, the
//! orderable terms, and order history/creation.

mod error;
mod handlers;

pub use error::{ErrorBody, WebError};
pub use handlers::*;

use axum::{
    Router,
    routing::get,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::ports::feed_port::FeedPort;
use crate::ports::order_port::OrderPort;

pub struct AppState {
    pub feed: Arc<dyn FeedPort>,
    pub orders: Arc<dyn OrderPort + Send + Sync>,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/yield-data", get(handlers::get_yield_data))
        .route("/api/terms", get(handlers::list_terms))
        .route(
            "/api/orders",
            get(handlers::get_orders).post(handlers::create_order),
        )
        .fallback(handlers::not_found)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(Arc::new(state))
}
