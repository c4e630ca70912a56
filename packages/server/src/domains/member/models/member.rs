use sqlx::PgPool;

use crate::common::MemberId;

/// Member model - SQL persistence layer
///
/// Every row has passed field validation before it was inserted; the unique
/// index on `email` backs the duplicate check done by the registration action.
#[derive(sqlx::FromRow, Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub id: MemberId,
    pub name: String,
    pub email: String,
    pub phone_number: String,
}

/// Validated fields for a member that has not been stored yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateMember {
    pub name: String,
    pub email: String,
    pub phone_number: String,
}

impl CreateMember {
    /// Attach a store-assigned id, producing the persisted record
    pub fn into_member(self, id: MemberId) -> Member {
        Member {
            id,
            name: self.name,
            email: self.email,
            phone_number: self.phone_number,
        }
    }
}

impl Member {
    /// Find member by ID
    pub async fn find_by_id(id: MemberId, pool: &PgPool) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>(
            "SELECT id, name, email, phone_number FROM members WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// Find member by email (exact match)
    pub async fn find_by_email(email: &str, pool: &PgPool) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>(
            "SELECT id, name, email, phone_number FROM members WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(pool)
        .await
    }

    /// Find all members ordered by name (byte-wise, independent of database locale)
    pub async fn find_all_ordered_by_name(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>(
            r#"SELECT id, name, email, phone_number
             FROM members
             ORDER BY name COLLATE "C" ASC, id ASC"#,
        )
        .fetch_all(pool)
        .await
    }

    /// Insert new member; the database assigns the id
    pub async fn insert(input: &CreateMember, pool: &PgPool) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Self>(
            "INSERT INTO members (name, email, phone_number)
             VALUES ($1, $2, $3)
             RETURNING id, name, email, phone_number",
        )
        .bind(&input.name)
        .bind(&input.email)
        .bind(&input.phone_number)
        .fetch_one(pool)
        .await
    }
}
