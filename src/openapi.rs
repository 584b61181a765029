use utoipa::OpenApi;

use crate::{
    handler::{auth_realms::AuthRealmResponse, health::Health},
    handler,
    service::auth_realms::AuthRealmPayload,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        handler::health::health,
        handler::auth_realms::list_auth_realms,
        handler::auth_realms::create_auth_realm,
        handler::auth_realms::get_auth_realm,
        handler::auth_realms::update_auth_realm,
        handler::auth_realms::delete_auth_realm
    ),
    components(schemas(Health, AuthRealmPayload, AuthRealmResponse)),
    tags(
        (name = "health", description = "Health check"),
        (name = "auth-realms", description = "Auth realms scoped to the caller's account")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documents_every_auth_realm_route() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();

        assert!(paths.iter().any(|path| *path == "/api/v1/auth-realms"));
        assert!(paths.iter().any(|path| *path == "/api/v1/auth-realms/{id}"));
        assert!(paths.iter().any(|path| *path == "/api/v1/health"));

        let components = doc.components.expect("components");
        assert!(components.schemas.contains_key("AuthRealmPayload"));
        assert!(components.schemas.contains_key("AuthRealmResponse"));
    }
}
