// ABOUTME: Validated newtypes for bounded record scales (Bristol type and 1-10 ratings)
// ABOUTME: Constructors reject out-of-range values so aggregation never re-validates
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::scales::{BRISTOL_MAX, BRISTOL_MIN, RATING_MAX, RATING_MIN};
use crate::errors::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Bristol stool form classification, 1 (hard lumps) to 7 (liquid)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct BristolType(u8);

impl BristolType {
    /// Validate and wrap a Bristol type
    ///
    /// # Errors
    ///
    /// Returns `DomainError::OutOfRange` when `value` is outside 1..=7
    pub fn new(value: u8) -> Result<Self, DomainError> {
        if (BRISTOL_MIN..=BRISTOL_MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(DomainError::OutOfRange {
                field: "bristol_type",
                value: i64::from(value),
                min: i64::from(BRISTOL_MIN),
                max: i64::from(BRISTOL_MAX),
            })
        }
    }

    /// Raw scale value
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Scale value as a float for averaging
    #[must_use]
    pub fn as_f64(self) -> f64 {
        f64::from(self.0)
    }

    /// Whether the type falls inside the inclusive band `min..=max`
    #[must_use]
    pub const fn within(self, min: u8, max: u8) -> bool {
        self.0 >= min && self.0 <= max
    }
}

impl TryFrom<u8> for BristolType {
    type Error = DomainError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<BristolType> for u8 {
    fn from(value: BristolType) -> Self {
        value.0
    }
}

impl fmt::Display for BristolType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Type {}", self.0)
    }
}

/// Generic 1-10 rating used for pain, strain, satisfaction, severity and spice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rating(u8);

impl Rating {
    /// Validate and wrap a rating
    ///
    /// # Errors
    ///
    /// Returns `DomainError::OutOfRange` when `value` is outside 1..=10
    pub fn new(value: u8) -> Result<Self, DomainError> {
        Self::for_field("rating", value)
    }

    /// Validate a rating, naming the field in the error
    ///
    /// # Errors
    ///
    /// Returns `DomainError::OutOfRange` when `value` is outside 1..=10
    pub fn for_field(field: &'static str, value: u8) -> Result<Self, DomainError> {
        if (RATING_MIN..=RATING_MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(DomainError::OutOfRange {
                field,
                value: i64::from(value),
                min: i64::from(RATING_MIN),
                max: i64::from(RATING_MAX),
            })
        }
    }

    /// Raw scale value
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Scale value as a float for averaging
    #[must_use]
    pub fn as_f64(self) -> f64 {
        f64::from(self.0)
    }

    /// Position on the scale mapped to `[0, 1]`
    #[must_use]
    pub fn intensity(self) -> f64 {
        f64::from(self.0 - RATING_MIN) / f64::from(RATING_MAX - RATING_MIN)
    }

    pub(crate) const fn clamped(value: u8) -> Self {
        if value < RATING_MIN {
            Self(RATING_MIN)
        } else if value > RATING_MAX {
            Self(RATING_MAX)
        } else {
            Self(value)
        }
    }
}

impl TryFrom<u8> for Rating {
    type Error = DomainError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Rating> for u8 {
    fn from(value: Rating) -> Self {
        value.0
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/10", self.0)
    }
}
