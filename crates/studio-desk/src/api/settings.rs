use axum::{extract::State, routing::get, Json, Router};

use super::API_PREFIX;
use crate::backend::SettingsStore;
use crate::error::AppError;
use crate::model::{Settings, SettingsDraft};

pub(crate) fn settings_router(store: SettingsStore) -> Router {
    Router::new()
        .route(
            &format!("{API_PREFIX}/settings"),
            get(load_handler).put(save_handler),
        )
        .with_state(store)
}

async fn load_handler(State(store): State<SettingsStore>) -> Result<Json<Settings>, AppError> {
    Ok(Json(store.load().await?))
}

async fn save_handler(
    State(store): State<SettingsStore>,
    Json(draft): Json<SettingsDraft>,
) -> Result<Json<Settings>, AppError> {
    Ok(Json(store.save(draft).await?))
}
