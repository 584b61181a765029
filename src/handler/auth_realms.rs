use axum::{
    body::Bytes,
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::{
    entities::auth_realms, error::AuthRealmError, identity::AccountId,
    service::auth_realms::AuthRealmPayload, state::AppState,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AuthRealmResponse {
    pub id: i64,
    pub account: String,
    pub name: String,
    #[schema(value_type = Object)]
    pub custom_resource: serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<auth_realms::Model> for AuthRealmResponse {
    fn from(model: auth_realms::Model) -> Self {
        Self {
            id: model.id,
            account: model.account,
            name: model.name,
            custom_resource: model.custom_resource,
            created_at: model.created_at.with_timezone(&Utc),
            updated_at: model.updated_at.with_timezone(&Utc),
        }
    }
}

fn parse_id(id: &str) -> Result<i64, AuthRealmError> {
    id.parse::<i64>()
        .map_err(|_| AuthRealmError::bad_request("The request must include a valid auth realm id"))
}

#[utoipa::path(
    get,
    path = "/api/v1/auth-realms",
    responses(
        (status = 200, description = "Auth realms of the caller's account", body = [AuthRealmResponse]),
        (status = 400, description = "Account could not be resolved"),
        (status = 500, description = "Store failure")
    ),
    tag = "auth-realms"
)]
pub async fn list_auth_realms(
    State(state): State<Arc<AppState>>,
    account: AccountId,
) -> Result<Json<Vec<AuthRealmResponse>>, AuthRealmError> {
    let realms = state.auth_realms().list(account.as_str()).await?;
    Ok(Json(realms.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    post,
    path = "/api/v1/auth-realms",
    request_body = AuthRealmPayload,
    responses(
        (status = 200, description = "Created", body = AuthRealmResponse),
        (status = 400, description = "Invalid payload or account mismatch"),
        (status = 409, description = "Name already used in this account"),
        (status = 500, description = "Store failure")
    ),
    tag = "auth-realms"
)]
pub async fn create_auth_realm(
    State(state): State<Arc<AppState>>,
    account: AccountId,
    body: Bytes,
) -> Result<Json<AuthRealmResponse>, AuthRealmError> {
    let created = state.auth_realms().create(account.as_str(), &body).await?;
    Ok(Json(created.into()))
}

#[utoipa::path(
    get,
    path = "/api/v1/auth-realms/{id}",
    params(
        ("id" = i64, Path, description = "Auth realm id")
    ),
    responses(
        (status = 200, description = "Auth realm", body = AuthRealmResponse),
        (status = 400, description = "Invalid id or account"),
        (status = 403, description = "Owned by another account"),
        (status = 404, description = "Not found"),
        (status = 500, description = "Store failure")
    ),
    tag = "auth-realms"
)]
pub async fn get_auth_realm(
    State(state): State<Arc<AppState>>,
    account: AccountId,
    Path(id): Path<String>,
) -> Result<Json<AuthRealmResponse>, AuthRealmError> {
    let id = parse_id(&id)?;
    let realm = state.auth_realms().fetch(account.as_str(), id).await?;
    Ok(Json(realm.into()))
}

#[utoipa::path(
    put,
    path = "/api/v1/auth-realms/{id}",
    request_body = AuthRealmPayload,
    params(
        ("id" = i64, Path, description = "Auth realm id")
    ),
    responses(
        (status = 200, description = "Updated", body = AuthRealmResponse),
        (status = 400, description = "Invalid payload, id or account"),
        (status = 403, description = "Owned by another account"),
        (status = 404, description = "Not found"),
        (status = 409, description = "Name already used in this account"),
        (status = 500, description = "Store failure")
    ),
    tag = "auth-realms"
)]
pub async fn update_auth_realm(
    State(state): State<Arc<AppState>>,
    account: AccountId,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<AuthRealmResponse>, AuthRealmError> {
    let id = parse_id(&id)?;
    let updated = state
        .auth_realms()
        .update(account.as_str(), id, &body)
        .await?;
    Ok(Json(updated.into()))
}

#[utoipa::path(
    delete,
    path = "/api/v1/auth-realms/{id}",
    params(
        ("id" = i64, Path, description = "Auth realm id")
    ),
    responses(
        (status = 200, description = "Deleted", body = String, content_type = "text/plain"),
        (status = 400, description = "Invalid id or account"),
        (status = 403, description = "Owned by another account"),
        (status = 404, description = "Not found"),
        (status = 500, description = "Store failure")
    ),
    tag = "auth-realms"
)]
pub async fn delete_auth_realm(
    State(state): State<Arc<AppState>>,
    account: AccountId,
    Path(id): Path<String>,
) -> Result<String, AuthRealmError> {
    let id = parse_id(&id)?;
    let deleted = state.auth_realms().delete(account.as_str(), id).await?;
    Ok(format!("Auth realm with ID {} was successfully deleted", deleted))
}

pub fn routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            "/api/v1/auth-realms",
            get(list_auth_realms).post(create_auth_realm),
        )
        .route(
            "/api/v1/auth-realms/:id",
            get(get_auth_realm)
                .put(update_auth_realm)
                .delete(delete_auth_realm),
        )
        .with_state(state)
}
