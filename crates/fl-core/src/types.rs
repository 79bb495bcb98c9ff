//! Core type definitions with validation.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation errors for core types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Row identifiers start at 1.
    #[error("{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: i64 },

    /// The provided value was not an integer.
    #[error("{field} is not a number: {value:?}")]
    NotANumber { field: &'static str, value: String },
}

/// Generates a validated integer ID newtype with common trait implementations.
macro_rules! define_int_id {
    (
        $(#[$meta:meta])*
        $name:ident, $field_name:literal
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(try_from = "i64", into = "i64")]
        pub struct $name(i64);

        impl $name {
            /// Creates a new ID after validation.
            pub const fn new(id: i64) -> Result<Self, ValidationError> {
                if id <= 0 {
                    return Err(ValidationError::NonPositive {
                        field: $field_name,
                        value: id,
                    });
                }
                Ok(Self(id))
            }

            /// Wraps an id given as input, without validation.
            ///
            /// Such an id may name no row; lookups and deletes treat it as missing.
            pub const fn from_raw(id: i64) -> Self {
                Self(id)
            }

            /// Returns the raw row id.
            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl TryFrom<i64> for $name {
            type Error = ValidationError;

            fn try_from(value: i64) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl std::str::FromStr for $name {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let value = s.trim().parse::<i64>().map_err(|_| ValidationError::NotANumber {
                    field: $field_name,
                    value: s.to_string(),
                })?;
                Ok(Self::from_raw(value))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

define_int_id!(
    /// A user identifier.
    ///
    /// Users are provisioned outside the feeding log; an id is not checked
    /// against the user table until it is displayed.
    UserId, "user ID"
);

define_int_id!(
    /// A feeding event identifier, assigned by the store.
    FeedingId, "feeding ID"
);
