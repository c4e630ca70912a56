// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// Registration rules live in the member domain and use these traits.
//
// Naming convention: Base* for trait names (e.g., BaseMemberStore)

use async_trait::async_trait;
use thiserror::Error;

use crate::common::MemberId;
use crate::domains::member::models::{CreateMember, Member};

// =============================================================================
// Store errors
// =============================================================================

/// Failures reported by a member store
#[derive(Error, Debug)]
pub enum StoreError {
    /// The store's uniqueness guarantee on email rejected a write
    #[error("Email address {0} is already registered.")]
    DuplicateEmail(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

// =============================================================================
// Member Store Trait (Infrastructure - persistence)
// =============================================================================

#[async_trait]
pub trait BaseMemberStore: Send + Sync {
    /// Persist a new member and return it with its assigned id.
    ///
    /// Must fail with `StoreError::DuplicateEmail` when another member
    /// already holds the same email, even if the caller checked beforehand.
    async fn insert(&self, member: CreateMember) -> Result<Member, StoreError>;

    /// Find a member by exact email
    async fn find_by_email(&self, email: &str) -> Result<Option<Member>, StoreError>;

    /// Find a member by id
    async fn find_by_id(&self, id: MemberId) -> Result<Option<Member>, StoreError>;

    /// All members, ordered by name ascending (byte-wise)
    async fn find_all_ordered_by_name(&self) -> Result<Vec<Member>, StoreError>;

    /// Short label for logs and health output
    fn backend(&self) -> &'static str;

    /// Check that the store is reachable
    async fn ping(&self) -> Result<(), StoreError> {
        // Default implementation - in-process stores are always reachable
        Ok(())
    }
}
