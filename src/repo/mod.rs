pub mod auth_realms;

#[cfg(test)]
pub mod memory;
