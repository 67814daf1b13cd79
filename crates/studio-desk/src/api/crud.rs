use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use tracing::info;

use super::API_PREFIX;
use crate::backend::Collection;
use crate::error::AppError;
use crate::model::{Record, RecordId};

/// List/create on `/api/v1/{name}` and read/update/delete on
/// `/api/v1/{name}/:id` for one table.
pub fn collection_router<T: Record>(name: &str, collection: Collection<T>) -> Router {
    let path = format!("{API_PREFIX}/{name}");
    Router::new()
        .route(&path, get(list_handler::<T>).post(create_handler::<T>))
        .route(
            &format!("{path}/:id"),
            get(get_handler::<T>)
                .put(update_handler::<T>)
                .delete(delete_handler::<T>),
        )
        .with_state(collection)
}

pub(crate) async fn list_handler<T: Record>(
    State(collection): State<Collection<T>>,
) -> Result<Json<Vec<T>>, AppError> {
    Ok(Json(collection.list().await?))
}

pub(crate) async fn get_handler<T: Record>(
    State(collection): State<Collection<T>>,
    Path(id): Path<RecordId>,
) -> Result<Json<T>, AppError> {
    Ok(Json(collection.get(id).await?))
}

pub(crate) async fn create_handler<T: Record>(
    State(collection): State<Collection<T>>,
    Json(draft): Json<T::Draft>,
) -> Result<impl IntoResponse, AppError> {
    let record = collection.create(draft).await?;
    info!(table = T::TABLE, id = %record.id(), "record created");
    Ok((StatusCode::CREATED, Json(record)))
}

pub(crate) async fn update_handler<T: Record>(
    State(collection): State<Collection<T>>,
    Path(id): Path<RecordId>,
    Json(draft): Json<T::Draft>,
) -> Result<Json<T>, AppError> {
    Ok(Json(collection.update(id, draft).await?))
}

pub(crate) async fn delete_handler<T: Record>(
    State(collection): State<Collection<T>>,
    Path(id): Path<RecordId>,
) -> Result<StatusCode, AppError> {
    collection.delete(id).await?;
    info!(table = T::TABLE, %id, "record deleted");
    Ok(StatusCode::NO_CONTENT)
}
