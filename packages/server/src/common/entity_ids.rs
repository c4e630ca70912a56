//! Typed ID definitions for domain entities.

use super::id::Id;

/// Marker type for Member entities.
pub struct Member;

/// Typed ID for Member entities.
pub type MemberId = Id<Member>;
