// ABOUTME: Library root for stevedore - exposes client configuration and resolution.
// ABOUTME: The main binary is in main.rs.

pub mod client;
pub mod config;
pub mod error;
pub mod output;
pub mod overrides;
pub mod resolver;
