use serde::Serialize;
use serde_json::Value;
use sqlx::{types::Json, FromRow};
use uuid::Uuid;

/// User record in the database.
#[derive(Debug, FromRow)]
pub struct UserRow {
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
    pub is_staff: bool,
    pub favourite: Json<Vec<Value>>,
}

/// User account as seen by the rest of the service.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,        // Argon2 hash, not exposed in JSON
    pub is_staff: bool,
    pub favourite: Vec<Value>,
}

impl From<UserRow> for User {
    fn from(r: UserRow) -> Self {
        Self {
            id: r.id,
            username: r.username,
            password_hash: r.password_hash,
            is_staff: r.is_staff,
            favourite: r.favourite.0,
        }
    }
}

/// Fields needed to insert a new account.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
}
