//! Member domain - handles member registration and lookup
//!
//! Architecture:
//!   REST route → action (validate → duplicate check → store) → BaseMemberStore

pub mod actions;
pub mod data;
pub mod errors;
pub mod models;
pub mod validation;

// Re-export commonly used types
pub use data::{MemberData, NewMemberInput};
pub use errors::RegistrationError;
pub use models::member::Member;
pub use validation::{validate, FieldErrors};
