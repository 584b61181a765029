pub mod auth_realms;
pub mod config;
