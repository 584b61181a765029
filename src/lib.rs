use axum::Router;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub mod config;
pub mod db;
pub mod entities;
pub mod error;
pub mod handler;
pub mod identity;
pub mod openapi;
pub mod repo;
pub mod schema;
pub mod service;
pub mod state;

use crate::state::AppState;

pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(handler::health::routes())
        .merge(handler::auth_realms::routes(state))
        .merge(SwaggerUi::new("/docs").url("/api/v1/openapi.json", openapi::ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
}
