//! HTTP surface of the workspace.
//!
//! [`workspace_router`] mounts one CRUD router per table under `/api/v1`,
//! the settings row, the lead import/export endpoints and the screen views.

mod crud;
mod leads;
mod settings;
mod views;


use axum::Router;

use crate::backend::Backend;

pub use crud::collection_router;
pub use leads::ImportRequest;

pub const API_PREFIX: &str = "/api/v1";

/// Router builder exposing every workspace endpoint over `backend`.
pub fn workspace_router(backend: Backend) -> Router {
    Router::new()
        .merge(collection_router("studios", backend.studios.clone()))
        .merge(collection_router("partners", backend.partners.clone()))
        .merge(collection_router("customers", backend.customers.clone()))
        .merge(collection_router("bookings", backend.bookings.clone()))
        .merge(collection_router("transactions", backend.transactions.clone()))
        .merge(collection_router("leads", backend.leads.clone()))
        .merge(collection_router("marketing-posts", backend.marketing_posts.clone()))
        .merge(collection_router("documents", backend.documents.clone()))
        .merge(settings::settings_router(backend.settings.clone()))
        .merge(leads::lead_router(backend.clone()))
        .merge(views::view_router(backend))
}
