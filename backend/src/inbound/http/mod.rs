//! HTTP inbound adapter exposing REST endpoints.

pub mod appointments;
pub mod error;
pub mod health;
pub mod password;
pub mod profile;
pub mod providers;
pub mod schemas;
pub mod session;
pub mod session_config;
pub mod sessions;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub mod validation;
