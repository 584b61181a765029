pub mod auth_realms;
