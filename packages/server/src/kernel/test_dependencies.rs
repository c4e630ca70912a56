// TestDependencies - mock implementations for testing
//
// Provides a member store that records every call and can be told to fail,
// so tests can assert on the exact store traffic an action produces.

use anyhow::anyhow;
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use super::{BaseMemberStore, InMemoryMemberStore, ServerDeps, StoreError};
use crate::common::MemberId;
use crate::domains::member::models::{CreateMember, Member};

/// A store call captured by `MockMemberStore`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
    Insert { email: String },
    FindByEmail { email: String },
    FindById { id: MemberId },
    FindAll,
}

// =============================================================================
// Mock Member Store
// =============================================================================

pub struct MockMemberStore {
    inner: InMemoryMemberStore,
    calls: Arc<Mutex<Vec<StoreCall>>>,
    unavailable: bool,
    stale_email_lookups: bool,
}

impl MockMemberStore {
    pub fn new() -> Self {
        Self {
            inner: InMemoryMemberStore::new(),
            calls: Arc::new(Mutex::new(Vec::new())),
            unavailable: false,
            stale_email_lookups: false,
        }
    }

    /// Every call fails as if the database were down
    pub fn unavailable(mut self) -> Self {
        self.unavailable = true;
        self
    }

    /// Email lookups never see existing members, as when another request
    /// inserts the same email between the check and the save
    pub fn with_stale_email_lookups(mut self) -> Self {
        self.stale_email_lookups = true;
        self
    }

    /// Calls received so far, in order
    pub fn calls(&self) -> Vec<StoreCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn insert_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| matches!(call, StoreCall::Insert { .. }))
            .count()
    }

    fn record(&self, call: StoreCall) -> Result<(), StoreError> {
        self.calls.lock().unwrap().push(call);
        if self.unavailable {
            return Err(StoreError::Internal(anyhow!("connection refused")));
        }
        Ok(())
    }
}

impl Default for MockMemberStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseMemberStore for MockMemberStore {
    async fn insert(&self, member: CreateMember) -> Result<Member, StoreError> {
        self.record(StoreCall::Insert {
            email: member.email.clone(),
        })?;
        self.inner.insert(member).await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Member>, StoreError> {
        self.record(StoreCall::FindByEmail {
            email: email.to_string(),
        })?;
        if self.stale_email_lookups {
            return Ok(None);
        }
        self.inner.find_by_email(email).await
    }

    async fn find_by_id(&self, id: MemberId) -> Result<Option<Member>, StoreError> {
        self.record(StoreCall::FindById { id })?;
        self.inner.find_by_id(id).await
    }

    async fn find_all_ordered_by_name(&self) -> Result<Vec<Member>, StoreError> {
        self.record(StoreCall::FindAll)?;
        self.inner.find_all_ordered_by_name().await
    }

    fn backend(&self) -> &'static str {
        "mock"
    }

    async fn ping(&self) -> Result<(), StoreError> {
        if self.unavailable {
            return Err(StoreError::Internal(anyhow!("connection refused")));
        }
        Ok(())
    }
}

// =============================================================================
// TestDependencies
// =============================================================================

/// Builds `ServerDeps` around a mock store while keeping a handle for assertions
pub struct TestDependencies {
    pub store: Arc<MockMemberStore>,
}

impl TestDependencies {
    pub fn new() -> Self {
        Self::with_store(MockMemberStore::new())
    }

    pub fn with_store(store: MockMemberStore) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    pub fn server_deps(&self) -> ServerDeps {
        ServerDeps::new(self.store.clone())
    }
}

impl Default for TestDependencies {
    fn default() -> Self {
        Self::new()
    }
}
