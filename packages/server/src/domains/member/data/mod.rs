pub mod member;

pub use member::{MemberData, NewMemberInput};
