use async_trait::async_trait;
use axum::{extract::FromRequestParts, http::request::Parts, http::HeaderMap};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::Deserialize;
use std::sync::Arc;

use crate::{error::AuthRealmError, state::AppState};

/// The caller's account, resolved from the identity header before any
/// auth realm operation runs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccountId(pub String);

impl AccountId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Deserialize)]
struct IdentityHeader {
    identity: Identity,
}

#[derive(Deserialize)]
struct Identity {
    #[serde(default)]
    account_number: Option<String>,
}

pub fn resolve_account(
    headers: &HeaderMap,
    header_name: &str,
) -> Result<AccountId, AuthRealmError> {
    let invalid = |detail: String| {
        AuthRealmError::bad_request(format!("invalid {} header: {}", header_name, detail))
    };

    let raw = headers
        .get(header_name)
        .ok_or_else(|| AuthRealmError::bad_request(format!("missing {} header", header_name)))?
        .to_str()
        .map_err(|err| invalid(err.to_string()))?;

    let decoded = STANDARD
        .decode(raw.trim())
        .map_err(|err| invalid(err.to_string()))?;
    let header: IdentityHeader =
        serde_json::from_slice(&decoded).map_err(|err| invalid(err.to_string()))?;

    match header.identity.account_number {
        Some(account) if !account.trim().is_empty() => Ok(AccountId(account.trim().to_string())),
        _ => Err(AuthRealmError::bad_request(
            "account number not found in identity header",
        )),
    }
}

#[async_trait]
impl FromRequestParts<Arc<AppState>> for AccountId {
    type Rejection = AuthRealmError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        resolve_account(&parts.headers, &state.config().values().identity_header)
    }
}

#[cfg(test)]
pub fn encode_identity(account: &str) -> String {
    STANDARD.encode(serde_json::json!({ "identity": { "account_number": account } }).to_string())
}
