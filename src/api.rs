//! JSON API over a single storefront session
//!
//! The session sits behind one async mutex, so requests apply their changes one
//! at a time. Cart mutations always answer with the current cart: a rejected
//! change shows up only as an unchanged snapshot.

use axum::{extract::{Path, Query, State}, http::StatusCode, routing::{get, post}, Json, Router};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use crate::catalog::LoadPhase;
use crate::domain::aggregates::{CartLine, Product};
use crate::domain::filter::{FilterCriteria, SortOrder};
use crate::domain::value_objects::{Money, ProductId};
use crate::session::StorefrontSession;

#[derive(Clone)]
pub struct AppState { pub session: Arc<Mutex<StorefrontSession>> }

impl AppState {
    pub fn new(session: StorefrontSession) -> Self { Self { session: Arc::new(Mutex::new(session)) } }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { Json(serde_json::json!({"status": "healthy", "service": "opensase-storefront"})) }))
        .route("/api/v1/status", get(status))
        .route("/api/v1/products", get(list_products))
        .route("/api/v1/products/:id", get(get_product))
        .route("/api/v1/categories", get(list_categories))
        .route("/api/v1/filters/clear", post(clear_filters))
        .route("/api/v1/cart", get(get_cart).delete(clear_cart))
        .route("/api/v1/cart/:id", post(add_to_cart).put(update_quantity).delete(remove_from_cart))
        .layer(TraceLayer::new_for_http()).layer(CorsLayer::permissive()).with_state(state)
}

#[derive(Debug, Serialize)]
pub struct StatusResponse { pub phase: LoadPhase, pub loading: bool, pub product_count: usize, pub loaded_at: Option<DateTime<Utc>> }

async fn status(State(s): State<AppState>) -> Json<StatusResponse> {
    let session = s.session.lock().await;
    Json(StatusResponse {
        phase: session.load_phase(), loading: session.is_loading(),
        product_count: session.catalog().len(), loaded_at: session.loaded_at(),
    })
}

/// Each parameter present replaces that criterion; absent ones keep their value.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams { pub search: Option<String>, pub category: Option<String>, pub sort: Option<String> }

async fn list_products(State(s): State<AppState>, Query(p): Query<ListParams>) -> Result<Json<Vec<Product>>, (StatusCode, String)> {
    let mut session = s.session.lock().await;
    let mut criteria: FilterCriteria = session.criteria().clone();
    if let Some(search) = p.search { criteria.search_term = search; }
    if let Some(category) = p.category { criteria.category = category; }
    if let Some(sort) = p.sort { criteria.sort_order = sort.parse::<SortOrder>().map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?; }
    if &criteria != session.criteria() { session.set_criteria(criteria); }
    Ok(Json(session.filtered_products().to_vec()))
}

async fn get_product(State(s): State<AppState>, Path(id): Path<u64>) -> Result<Json<Product>, (StatusCode, String)> {
    let session = s.session.lock().await;
    session.product(ProductId::new(id)).cloned().map(Json).ok_or((StatusCode::NOT_FOUND, "Not found".to_string()))
}

async fn list_categories(State(s): State<AppState>) -> Json<Vec<String>> {
    Json(s.session.lock().await.categories())
}

async fn clear_filters(State(s): State<AppState>) -> Json<FilterCriteria> {
    let mut session = s.session.lock().await;
    session.clear_filters();
    Json(session.criteria().clone())
}

#[derive(Debug, Serialize)]
pub struct CartResponse { pub lines: Vec<CartLine>, pub total_items: u64, pub total_price: Money }

/// Logs and discards whatever events the last mutation raised.
fn flush_events(session: &mut StorefrontSession) {
    for event in session.take_events() { tracing::info!(?event, "storefront event"); }
}

fn cart_snapshot(session: &StorefrontSession) -> Json<CartResponse> {
    Json(CartResponse { lines: session.cart_lines().to_vec(), total_items: session.total_items(), total_price: session.total_price() })
}

async fn get_cart(State(s): State<AppState>) -> Json<CartResponse> {
    cart_snapshot(&*s.session.lock().await)
}

async fn add_to_cart(State(s): State<AppState>, Path(id): Path<u64>) -> Json<CartResponse> {
    let mut session = s.session.lock().await;
    session.add_to_cart(ProductId::new(id));
    flush_events(&mut session);
    cart_snapshot(&session)
}

#[derive(Debug, Deserialize)] pub struct UpdateQuantityRequest { pub quantity: i64 }

async fn update_quantity(State(s): State<AppState>, Path(id): Path<u64>, Json(r): Json<UpdateQuantityRequest>) -> Json<CartResponse> {
    let mut session = s.session.lock().await;
    session.update_quantity(ProductId::new(id), r.quantity);
    flush_events(&mut session);
    cart_snapshot(&session)
}

async fn remove_from_cart(State(s): State<AppState>, Path(id): Path<u64>) -> Json<CartResponse> {
    let mut session = s.session.lock().await;
    session.remove_from_cart(ProductId::new(id));
    flush_events(&mut session);
    cart_snapshot(&session)
}

async fn clear_cart(State(s): State<AppState>) -> Json<CartResponse> {
    let mut session = s.session.lock().await;
    session.clear_cart();
    flush_events(&mut session);
    cart_snapshot(&session)
}
