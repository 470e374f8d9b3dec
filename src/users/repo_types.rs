use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;
use time::OffsetDateTime;

/// User record in the database.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub age: i32,
    pub phone: Option<String>,
    pub is_hidden: bool,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub rating: Option<Decimal>,
    #[serde(skip_serializing)]
    pub created_at: OffsetDateTime, // set by the database
}

/// Every column a client may write. Updates overwrite all of them.
#[derive(Debug, Clone, PartialEq)]
pub struct UserFields {
    pub name: String,
    pub age: i32,
    pub phone: String,
    pub is_hidden: bool,
    pub rating: Option<Decimal>, // already rounded to 2 fractional digits
}
