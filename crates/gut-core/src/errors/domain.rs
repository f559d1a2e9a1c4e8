// ABOUTME: Boundary validation errors raised when parsing records into domain types
// ABOUTME: Covers unknown enum variants, out-of-range scale values, and missing fields
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use thiserror::Error;

/// Validation failures for record fields
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// String value does not name a variant of a closed enum
    #[error("unknown {kind} value: {value:?}")]
    UnknownVariant {
        /// Name of the enum being parsed
        kind: &'static str,
        /// The rejected input
        value: String,
    },

    /// Bounded scale value outside its declared range
    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        /// Name of the scale field
        field: &'static str,
        /// The rejected value
        value: i64,
        /// Inclusive lower bound
        min: i64,
        /// Inclusive upper bound
        max: i64,
    },

    /// Required field was absent
    #[error("missing required field: {0}")]
    MissingField(&'static str),
}
