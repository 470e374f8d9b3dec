use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use crate::users::repo_types::User;

/// Body of create/update requests. Absent or null fields take their zero value.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UserPayload {
    #[serde(deserialize_with = "null_as_default")]
    pub id: i64, // ignored on create
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub age: i32,
    #[serde(deserialize_with = "null_as_default")]
    pub phone: String,
    #[serde(deserialize_with = "null_as_default")]
    pub is_hidden: bool,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub rating: Option<Decimal>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct DeleteUserRequest {
    #[serde(deserialize_with = "null_as_default")]
    pub id: i64,
}

/// Treats an explicit `null` the same as a missing field.
fn null_as_default<'de, D, T>(d: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(d).map(Option::unwrap_or_default)
}

/// Envelope with no payload; also the shape of every failure.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

impl MessageResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UserIdResponse {
    pub success: bool,
    pub message: String,
    pub user_id: i64,
}

#[derive(Debug, Serialize)]
pub struct GetUserResponse {
    pub success: bool,
    pub message: String,
    pub user: Vec<User>,
}

#[derive(Debug, Serialize)]
pub struct GetUsersResponse {
    pub success: bool,
    pub message: String,
    pub count: usize,
    pub users: Vec<User>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_fills_missing_fields_with_defaults() {
        let p: UserPayload = serde_json::from_str(r#"{"age": 30}"#).unwrap();
        assert_eq!(p.id, 0);
        assert_eq!(p.name, "");
        assert_eq!(p.age, 30);
        assert!(!p.is_hidden);
        assert_eq!(p.rating, None);
    }

    #[test]
    fn payload_reads_rating_as_number() {
        let p: UserPayload =
            serde_json::from_str(r#"{"name":"Ann","rating":4.25,"is_hidden":true}"#).unwrap();
        assert_eq!(p.rating, Some(Decimal::new(425, 2)));
        assert!(p.is_hidden);

        let p: UserPayload = serde_json::from_str(r#"{"rating":null}"#).unwrap();
        assert_eq!(p.rating, None);
    }

    #[test]
    fn payload_treats_null_as_missing() {
        let p: UserPayload = serde_json::from_str(
            r#"{"id":null,"name":null,"age":null,"phone":null,"is_hidden":null,"rating":null}"#,
        )
        .unwrap();
        assert_eq!(p.id, 0);
        assert_eq!(p.name, "");
        assert_eq!(p.age, 0);
        assert_eq!(p.phone, "");
        assert!(!p.is_hidden);
        assert_eq!(p.rating, None);

        let d: DeleteUserRequest = serde_json::from_str(r#"{"id":null}"#).unwrap();
        assert_eq!(d.id, 0);
    }

    #[test]
    fn payload_rejects_wrong_types() {
        assert!(serde_json::from_str::<UserPayload>(r#"{"age":"thirty"}"#).is_err());
        assert!(serde_json::from_str::<DeleteUserRequest>(r#"{"id":"7"}"#).is_err());
    }

    #[test]
    fn failure_envelope_shape() {
        let json = serde_json::to_value(MessageResponse::failure("nope")).unwrap();
        assert_eq!(json, serde_json::json!({"success": false, "message": "nope"}));
    }
}
