// ABOUTME: Error handling re-exports from the gut-core crate
// ABOUTME: Keeps crate::errors paths stable for the service layer and its tests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Unified Error Handling System
//!
//! Every fallible service operation returns [`AppResult`]. Store failures keep
//! their original [`ErrorCode`] and carry the store error as `source`; an
//! inverted date range is reported as [`ErrorCode::InvalidDateRange`] before
//! any store is queried.

pub use gut_core::errors::{AppError, AppResult, DomainError, ErrorCode, ErrorContext};
