//! HTTP request handlers for web adapter.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use serde::Serialize;
use std::sync::Arc;

use crate::domain::error::DeskError;
use crate::domain::feed::fetch_latest_curve;
use crate::domain::maturity::Maturity;
use crate::domain::order::{Order, OrderRequest};
use crate::domain::yield_curve::YieldSeries;

use super::{AppState, WebError};

pub async fn get_yield_data(
    State(state): State<Arc<AppState>>,
) -> Result<Json<YieldSeries>, WebError> {
    match fetch_latest_curve(&*state.feed).await {
        Ok(series) => Ok(Json(series)),
        Err(e) => {
            tracing::error!(category = e.category(), error = %e, "yield pipeline failed");
            Err(WebError::internal(format!("Failed to fetch yield data: {e}")))
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TermInfo {
    pub term: &'static str,
    pub label: &'static str,
}

pub async fn list_terms() -> Json<Vec<TermInfo>> {
    Json(
        Maturity::orderable()
            .map(|m| TermInfo {
                term: m.term(),
                label: m.label(),
            })
            .collect(),
    )
}

pub async fn get_orders(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Order>>, WebError> {
    state.orders.list_orders().map(Json).map_err(|e| {
        tracing::error!(error = %e, "listing orders failed");
        WebError::internal("Failed to fetch orders")
    })
}

pub async fn create_order(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<OrderRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Order>), WebError> {
    let Json(request) = payload.map_err(|rejection| {
        tracing::debug!(error = %rejection, "order body rejected");
        WebError::bad_request(format!("Invalid request body: {}", rejection.body_text()))
    })?;

    let new_order = request
        .validate()
        .map_err(|e| WebError::from(DeskError::from(e)))?;

    let order = state.orders.create_order(&new_order).map_err(|e| {
        tracing::error!(error = %e, "creating order failed");
        WebError::internal("Failed to create order")
    })?;

    tracing::info!(id = order.id, term = %order.term, amount = order.amount, "order created");
    Ok((StatusCode::CREATED, Json(order)))
}

pub async fn not_found() -> WebError {
    WebError::not_found("Route not found")
}
