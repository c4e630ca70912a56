//! Test fixtures for registration input.

use kitchensink_core::domains::member::NewMemberInput;

/// The canonical valid registration
pub fn jane() -> NewMemberInput {
    NewMemberInput::new("Jane Doe", "jane@example.com", "0987654321")
}

/// A valid registration with the given name and email
pub fn member_input(name: &str, email: &str) -> NewMemberInput {
    NewMemberInput::new(name, email, "1234567890")
}
