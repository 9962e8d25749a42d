use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Storage format for `created_at`; fixed width so text order matches time order.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub business_name: String,
    pub email: String,
    pub phone: String,
    pub is_verified: bool,
    pub created_at: NaiveDateTime,
}

/// Signup payload for `POST /users`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    pub business_name: String,
    pub email: String,
    pub phone: String,
}
