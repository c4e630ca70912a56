//! Kernel module - server infrastructure and dependencies.

pub mod deps;
pub mod memory_store;
pub mod test_dependencies;
pub mod traits;

pub use deps::{PostgresMemberStore, ServerDeps};
pub use memory_store::InMemoryMemberStore;
pub use test_dependencies::{MockMemberStore, StoreCall, TestDependencies};
pub use traits::*;
