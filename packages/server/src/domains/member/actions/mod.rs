//! Member domain actions - business logic functions
//!
//! Actions are async functions called directly from the REST routes.
//! They take `ServerDeps` explicitly and return domain models.

mod queries;
mod register_member;

pub use queries::{get_member, get_member_by_email, list_members};
pub use register_member::register_member;
