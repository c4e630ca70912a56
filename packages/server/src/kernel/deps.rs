//! Server dependencies for actions (using traits for testability)
//!
//! This module provides the central dependency container used by the member
//! actions and HTTP routes. Storage sits behind `BaseMemberStore` so tests and
//! database-less runs can swap in the in-memory store.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;
use tracing::debug;

use crate::common::MemberId;
use crate::domains::member::models::{CreateMember, Member};
use crate::kernel::{BaseMemberStore, InMemoryMemberStore, StoreError};

// =============================================================================
// PostgreSQL store (implements BaseMemberStore trait)
// =============================================================================

/// Member store backed by the `members` table
pub struct PostgresMemberStore {
    pool: PgPool,
}

impl PostgresMemberStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Whether a sqlx error is a unique-constraint rejection
fn is_unique_violation(error: &sqlx::Error) -> bool {
    error
        .as_database_error()
        .is_some_and(|db_error| db_error.is_unique_violation())
}

#[async_trait]
impl BaseMemberStore for PostgresMemberStore {
    async fn insert(&self, member: CreateMember) -> Result<Member, StoreError> {
        Member::insert(&member, &self.pool).await.map_err(|e| {
            if is_unique_violation(&e) {
                debug!(email = %member.email, "Unique index rejected member insert");
                StoreError::DuplicateEmail(member.email.clone())
            } else {
                StoreError::Database(e)
            }
        })
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Member>, StoreError> {
        Ok(Member::find_by_email(email, &self.pool).await?)
    }

    async fn find_by_id(&self, id: MemberId) -> Result<Option<Member>, StoreError> {
        Ok(Member::find_by_id(id, &self.pool).await?)
    }

    async fn find_all_ordered_by_name(&self) -> Result<Vec<Member>, StoreError> {
        Ok(Member::find_all_ordered_by_name(&self.pool).await?)
    }

    fn backend(&self) -> &'static str {
        "postgres"
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

// =============================================================================
// ServerDeps
// =============================================================================

/// Server dependencies accessible to actions (using traits for testability)
#[derive(Clone)]
pub struct ServerDeps {
    pub member_store: Arc<dyn BaseMemberStore>,
}

impl ServerDeps {
    pub fn new(member_store: Arc<dyn BaseMemberStore>) -> Self {
        Self { member_store }
    }

    /// Dependencies backed by PostgreSQL
    pub fn postgres(pool: PgPool) -> Self {
        Self::new(Arc::new(PostgresMemberStore::new(pool)))
    }

    /// Dependencies backed by an empty in-memory store
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryMemberStore::new()))
    }
}
