use std::ops::RangeInclusive;

use rust_decimal::RoundingStrategy;
use thiserror::Error;

use crate::users::{dto::UserPayload, repo_types::UserFields};

pub const AGE_RANGE: RangeInclusive<i32> = 15..=100;
pub const PHONE_LEN: RangeInclusive<usize> = 10..=15;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Name is required")]
    NameRequired,
    #[error("Age must be between 15 and 100")]
    AgeOutOfRange,
    #[error("Phone is required")]
    PhoneRequired,
    #[error("Phone must be between 10 and 15 characters")]
    PhoneLength,
}

/// Checks the client-writable fields and turns them into storable values.
pub fn validate_user(payload: UserPayload) -> Result<UserFields, ValidationError> {
    if payload.name.is_empty() {
        return Err(ValidationError::NameRequired);
    }
    if !AGE_RANGE.contains(&payload.age) {
        return Err(ValidationError::AgeOutOfRange);
    }
    if payload.phone.is_empty() {
        return Err(ValidationError::PhoneRequired);
    }
    if !PHONE_LEN.contains(&payload.phone.chars().count()) {
        return Err(ValidationError::PhoneLength);
    }

    Ok(UserFields {
        name: payload.name,
        age: payload.age,
        phone: payload.phone,
        is_hidden: payload.is_hidden,
        // NUMERIC(3, 2) rounds half away from zero
        rating: payload
            .rating
            .map(|r| r.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)),
    })
}
