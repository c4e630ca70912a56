//! Register member action - validation, duplicate check, then insert

use tracing::{debug, info, warn};

use crate::domains::member::data::NewMemberInput;
use crate::domains::member::errors::RegistrationError;
use crate::domains::member::models::Member;
use crate::domains::member::validation::validate_new_member;
use crate::kernel::ServerDeps;

/// Register a new member.
///
/// This action:
/// 1. Validates every field (the store is not touched if anything fails)
/// 2. Checks whether the email is already registered
/// 3. Inserts the member, letting the store assign the id
///
/// Returns:
/// - the stored `Member` on success
/// - `FieldValidation` / `DuplicateEmail` for caller-fixable problems
/// - `Unexpected` when the store fails; nothing is retried
pub async fn register_member(
    input: NewMemberInput,
    deps: &ServerDeps,
) -> Result<Member, RegistrationError> {
    let create = match validate_new_member(input) {
        Ok(create) => create,
        Err(errors) => {
            warn!(%errors, "Member registration failed validation");
            return Err(RegistrationError::FieldValidation(errors));
        }
    };

    let store = &deps.member_store;

    if let Some(existing) = store.find_by_email(&create.email).await? {
        warn!(
            email = %create.email,
            existing_id = %existing.id,
            "Member registration rejected: email already registered"
        );
        return Err(RegistrationError::DuplicateEmail(create.email));
    }

    debug!(email = %create.email, "Email is free, inserting member");

    // A concurrent registration may still win the race; the store's unique
    // constraint then reports DuplicateEmail, which From<StoreError> preserves.
    let member = store.insert(create).await?;

    info!(member_id = %member.id, "Member registered successfully");

    Ok(member)
}
