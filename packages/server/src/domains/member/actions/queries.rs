//! Member query actions
//!
//! Query actions return data directly; the HTTP layer decides how a missing
//! member or a store failure is reported.

use tracing::info;

use crate::common::MemberId;
use crate::domains::member::models::Member;
use crate::kernel::{ServerDeps, StoreError};

/// Get every member, sorted by name ascending
pub async fn list_members(deps: &ServerDeps) -> Result<Vec<Member>, StoreError> {
    let members = deps.member_store.find_all_ordered_by_name().await?;
    info!(count = members.len(), "Listed members");
    Ok(members)
}

/// Get member by ID
pub async fn get_member(id: MemberId, deps: &ServerDeps) -> Result<Option<Member>, StoreError> {
    deps.member_store.find_by_id(id).await
}

/// Get member by email (exact match)
pub async fn get_member_by_email(
    email: &str,
    deps: &ServerDeps,
) -> Result<Option<Member>, StoreError> {
    deps.member_store.find_by_email(email).await
}
