// ABOUTME: Core types and constants for the gut health analytics platform
// ABOUTME: Foundation crate with error handling, record models, and analytics constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Gut Core
//!
//! Foundation crate providing the shared record types and error taxonomy for
//! gut health analytics. The engine crate and the service layer both build on
//! these types, so this crate is designed to change infrequently.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode`, and `DomainError`
//! - **constants**: Analytics constants organized by concern
//! - **models**: Health records, validated scales, closed enums, and date ranges

/// Unified error handling system with standard error codes
pub mod errors;

/// Analytics constants organized by concern
pub mod constants;

/// Health record models (bowel movements, meals, symptoms, medications)
pub mod models;
