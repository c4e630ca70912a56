// Kitchensink Member Registry - API Core
//
// This crate provides the backend for registering members and listing them.
// Requests flow from HTTP routes into domain actions, which talk to storage
// through the store traits in `kernel`.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
