//! Handlers for the `/cars` resource

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde::de::DeserializeOwned;
use tracing::info;

use super::error::ApiError;
use super::response::Pretty;
use crate::model::{Car, CarPatch};
use crate::store::Store;

type ApiResult<T> = Result<T, ApiError>;

/// Decode a request body regardless of its content type
fn decode<T: DeserializeOwned>(body: &[u8]) -> ApiResult<T> {
    Ok(serde_json::from_slice(body)?)
}

/// Unknown ids are reported before the body is looked at
fn ensure_exists(store: &Store, id: &str) -> ApiResult<()> {
    match store.find_by_id(id)? {
        Some(_) => Ok(()),
        None => Err(ApiError::NotFound),
    }
}

/// `GET /cars`
pub async fn list_cars(State(store): State<Arc<Store>>) -> ApiResult<Pretty<Vec<Car>>> {
    Ok(Pretty(StatusCode::OK, store.list()?))
}

/// `POST /cars`
pub async fn create_car(State(store): State<Arc<Store>>, body: Bytes) -> ApiResult<Pretty<Car>> {
    let car: Car = decode(&body)?;
    let car = store.insert(car)?;
    info!("Created car {}", car.id);
    Ok(Pretty(StatusCode::CREATED, car))
}

/// `GET /cars/:id`
pub async fn get_car(
    State(store): State<Arc<Store>>,
    Path(id): Path<String>,
) -> ApiResult<Pretty<Car>> {
    match store.find_by_id(&id)? {
        Some(car) => Ok(Pretty(StatusCode::OK, car)),
        None => Err(ApiError::NotFound),
    }
}

/// `PUT /cars/:id`
pub async fn replace_car(
    State(store): State<Arc<Store>>,
    Path(id): Path<String>,
    body: Bytes,
) -> ApiResult<Pretty<Car>> {
    ensure_exists(&store, &id)?;
    let car: Car = decode(&body)?;
    let car = store.replace_by_id(&id, car)?;
    info!("Replaced car {} with {}", id, car.id);
    Ok(Pretty(StatusCode::OK, car))
}

/// `PATCH /cars/:id`
pub async fn patch_car(
    State(store): State<Arc<Store>>,
    Path(id): Path<String>,
    body: Bytes,
) -> ApiResult<Pretty<Car>> {
    ensure_exists(&store, &id)?;
    let patch: CarPatch = decode(&body)?;
    let car = store.patch_by_id(&id, &patch)?;
    info!("Patched car {}", id);
    Ok(Pretty(StatusCode::OK, car))
}

/// `DELETE /cars/:id`
pub async fn delete_car(
    State(store): State<Arc<Store>>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    store.delete_by_id(&id)?;
    info!("Deleted car {}", id);
    Ok(StatusCode::NO_CONTENT)
}
