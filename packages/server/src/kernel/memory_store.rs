//! In-process member store
//!
//! Used by tests and when the server starts without `DATABASE_URL`.
//! Uniqueness on email is enforced under the write lock, so it holds even
//! when two registrations race past the action's existence check.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::common::MemberId;
use crate::domains::member::models::{CreateMember, Member};
use crate::kernel::{BaseMemberStore, StoreError};

#[derive(Default)]
struct Tables {
    by_id: HashMap<MemberId, Member>,
    id_by_email: HashMap<String, MemberId>,
}

#[derive(Default)]
pub struct InMemoryMemberStore {
    tables: RwLock<Tables>,
}

impl InMemoryMemberStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored members
    pub async fn len(&self) -> usize {
        self.tables.read().await.by_id.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl BaseMemberStore for InMemoryMemberStore {
    async fn insert(&self, member: CreateMember) -> Result<Member, StoreError> {
        let mut tables = self.tables.write().await;

        if tables.id_by_email.contains_key(&member.email) {
            return Err(StoreError::DuplicateEmail(member.email));
        }

        let stored = member.into_member(MemberId::new());
        tables.id_by_email.insert(stored.email.clone(), stored.id);
        tables.by_id.insert(stored.id, stored.clone());

        Ok(stored)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Member>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .id_by_email
            .get(email)
            .and_then(|id| tables.by_id.get(id))
            .cloned())
    }

    async fn find_by_id(&self, id: MemberId) -> Result<Option<Member>, StoreError> {
        Ok(self.tables.read().await.by_id.get(&id).cloned())
    }

    async fn find_all_ordered_by_name(&self) -> Result<Vec<Member>, StoreError> {
        let mut members: Vec<Member> = self.tables.read().await.by_id.values().cloned().collect();
        // Byte-wise on name, id as tie-breaker (same order as the SQL query)
        members.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        Ok(members)
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
