#[derive(Clone, Debug)]
pub struct Config {
    pub port: u16,
    pub database_url: Option<String>,
    pub apply_schema: bool,

    // Header carrying the base64-encoded caller identity.
    pub identity_header: String,
}
