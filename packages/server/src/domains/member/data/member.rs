use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::domains::member::models::member::Member as MemberModel;

/// Member API data type
///
/// Public JSON representation of a member (REST responses)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberData {
    /// Unique identifier (assigned by the store)
    pub id: String,

    /// Display name
    pub name: String,

    /// Contact email, unique across members
    pub email: String,

    /// Phone number, digits only
    pub phone_number: String,
}

impl From<MemberModel> for MemberData {
    fn from(member: MemberModel) -> Self {
        Self {
            id: member.id.to_string(),
            name: member.name,
            email: member.email,
            phone_number: member.phone_number,
        }
    }
}

/// Registration request body
///
/// Fields are optional so a missing field surfaces as a field violation
/// rather than a body parse failure. An `id` sent by the client is ignored.
/// Numbers and booleans are accepted as their text form, so
/// `"phoneNumber": 1234567890` is validated like `"1234567890"`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMemberInput {
    #[serde(default, deserialize_with = "scalar_as_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "scalar_as_string")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "scalar_as_string")]
    pub phone_number: Option<String>,
}

fn scalar_as_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(other) => Err(de::Error::custom(format!(
            "expected a string, found {}",
            other
        ))),
    }
}

impl NewMemberInput {
    /// Convenience constructor for fully populated input
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        phone_number: impl Into<String>,
    ) -> Self {
        Self {
            name: Some(name.into()),
            email: Some(email.into()),
            phone_number: Some(phone_number.into()),
        }
    }
}
