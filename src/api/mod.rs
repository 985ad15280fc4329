//! HTTP API
//!
//! This module maps the `/cars` routes onto store operations and renders
//! store results and failures as JSON responses.

pub mod cars;
pub mod error;
pub mod response;

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tower_http::trace::TraceLayer;

use crate::store::Store;

/// Build the axum router serving the car collection held by `store`
pub fn router(store: Arc<Store>) -> Router {
    Router::new()
        .route("/cars", get(cars::list_cars).post(cars::create_car))
        .route(
            "/cars/:id",
            get(cars::get_car)
                .put(cars::replace_car)
                .patch(cars::patch_car)
                .delete(cars::delete_car),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(store)
}
