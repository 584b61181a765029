use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;
use utoipa::ToSchema;

use crate::{entities::auth_realms, error::AuthRealmError, repo::auth_realms::AuthRealmsRepo};

/// Auth realm as submitted on create and update. `id` and timestamps are
/// server-owned, so anything sent for them is ignored.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct AuthRealmPayload {
    /// Must match the caller's account when present.
    #[serde(default)]
    pub account: Option<String>,
    /// Required, non-empty.
    #[serde(default)]
    pub name: Option<String>,
    /// Required, any JSON object.
    #[serde(default)]
    #[schema(value_type = Option<Object>)]
    pub custom_resource: Option<serde_json::Map<String, serde_json::Value>>,
}

impl AuthRealmPayload {
    pub fn parse(body: &[u8]) -> Result<Self, AuthRealmError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Err(AuthRealmError::bad_request("request body must not be empty"));
        }
        serde_json::from_slice(body).map_err(|err| AuthRealmError::bad_request(err.to_string()))
    }

    fn account(&self) -> Option<&str> {
        self.account.as_deref().filter(|account| !account.is_empty())
    }

    /// Name and custom resource, if both are present.
    fn required_fields(self) -> Option<(String, serde_json::Value)> {
        match (self.name, self.custom_resource) {
            (Some(name), Some(custom_resource)) if !name.is_empty() => {
                Some((name, serde_json::Value::Object(custom_resource)))
            }
            _ => None,
        }
    }
}

#[async_trait]
pub trait AuthRealmsService: Send + Sync {
    async fn list(&self, account: &str) -> Result<Vec<auth_realms::Model>, AuthRealmError>;
    async fn create(
        &self,
        account: &str,
        body: &[u8],
    ) -> Result<auth_realms::Model, AuthRealmError>;
    async fn fetch(&self, account: &str, id: i64) -> Result<auth_realms::Model, AuthRealmError>;
    async fn update(
        &self,
        account: &str,
        id: i64,
        body: &[u8],
    ) -> Result<auth_realms::Model, AuthRealmError>;
    /// Soft-deletes the realm and returns its id.
    async fn delete(&self, account: &str, id: i64) -> Result<i64, AuthRealmError>;
}

pub struct AuthRealmsServiceImpl {
    repo: Arc<dyn AuthRealmsRepo>,
}

impl AuthRealmsServiceImpl {
    pub fn new(repo: Arc<dyn AuthRealmsRepo>) -> Self {
        Self { repo }
    }
}

/// A realm with an account belongs to that account only.
fn authorize(realm: &auth_realms::Model, account: &str) -> Result<(), AuthRealmError> {
    if !realm.account.is_empty() && realm.account != account {
        return Err(AuthRealmError::Forbidden(
            "Requestor's account does not match the Auth Realm account".to_string(),
        ));
    }
    Ok(())
}

#[async_trait]
impl AuthRealmsService for AuthRealmsServiceImpl {
    async fn list(&self, account: &str) -> Result<Vec<auth_realms::Model>, AuthRealmError> {
        // TODO: support filtering by name via a query parameter.
        Ok(self.repo.list_by_account(account).await?)
    }

    async fn create(
        &self,
        account: &str,
        body: &[u8],
    ) -> Result<auth_realms::Model, AuthRealmError> {
        let payload = AuthRealmPayload::parse(body)?;
        let body_account = payload.account().map(str::to_string);

        let Some((name, custom_resource)) = payload.required_fields() else {
            return Err(AuthRealmError::bad_request(
                "The request body must contain 'name' and 'custom_resource'",
            ));
        };

        if body_account.is_some_and(|body_account| body_account != account) {
            return Err(AuthRealmError::bad_request(
                "Account in the request body does not match account for the authenticated user",
            ));
        }

        let model = auth_realms::ActiveModel {
            account: sea_orm::Set(account.to_string()),
            name: sea_orm::Set(name),
            custom_resource: sea_orm::Set(custom_resource),
            ..Default::default()
        };

        let inserted = self
            .repo
            .insert(model)
            .await
            .map_err(|err| AuthRealmError::from_write("Error creating record in the DB", err))?;
        tracing::info!(id = inserted.id, account, "auth realm created");
        Ok(inserted)
    }

    async fn fetch(&self, account: &str, id: i64) -> Result<auth_realms::Model, AuthRealmError> {
        let Some(realm) = self.repo.find_by_id(id).await? else {
            return Err(AuthRealmError::NotFound("record not found".to_string()));
        };
        authorize(&realm, account)?;
        Ok(realm)
    }

    async fn update(
        &self,
        account: &str,
        id: i64,
        body: &[u8],
    ) -> Result<auth_realms::Model, AuthRealmError> {
        let existing = self.fetch(account, id).await?;
        let payload = AuthRealmPayload::parse(body)?;

        if payload
            .account()
            .is_some_and(|body_account| body_account != existing.account)
        {
            return Err(AuthRealmError::bad_request(
                "Account number in request body does not match the auth realm account",
            ));
        }

        let Some((name, custom_resource)) = payload.required_fields() else {
            return Err(AuthRealmError::bad_request(
                "The request body must contain 'name' and 'custom_resource' for update",
            ));
        };

        // id, account and created_at stay as stored.
        let mut active: auth_realms::ActiveModel = existing.into();
        active.name = sea_orm::Set(name);
        active.custom_resource = sea_orm::Set(custom_resource);

        let updated = self
            .repo
            .update(active)
            .await
            .map_err(|err| AuthRealmError::from_write("Error updating record in the DB", err))?;
        tracing::info!(id = updated.id, account, "auth realm updated");
        Ok(updated)
    }

    async fn delete(&self, account: &str, id: i64) -> Result<i64, AuthRealmError> {
        let existing = self.fetch(account, id).await?;
        let deleted = self.repo.soft_delete(existing).await?;
        tracing::info!(id = deleted.id, account, "auth realm deleted");
        Ok(deleted.id)
    }
}
