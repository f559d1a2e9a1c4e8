// ABOUTME: Main library entry point for the gut health analytics service
// ABOUTME: Record stores, service configuration, logging, and the AnalyticsService orchestrator
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Gut Analytics
//!
//! Turns one user's health-tracking records (bowel movements, meals,
//! symptoms, medications) into summaries, correlations, trends, behavior
//! patterns, a composite health score, insights, and recommendations.
//!
//! ## Architecture
//!
//! - **`gut-core`**: record models, validated scales, error taxonomy
//! - **`gut-intelligence`**: the synchronous analytics engine
//! - **this crate**: record-store contracts, the [`services::AnalyticsService`]
//!   orchestrator, configuration, and logging
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use gut_analytics::config::AnalyticsServiceConfig;
//! use gut_analytics::errors::AppResult;
//! use gut_analytics::services::AnalyticsService;
//! use gut_analytics::stores::InMemoryStores;
//!
//! #[tokio::main]
//! async fn main() -> AppResult<()> {
//!     let stores = InMemoryStores::new();
//!     let service = AnalyticsService::new(stores.record_stores(), AnalyticsServiceConfig::from_env()?);
//!
//!     let score = service.get_health_score("user-1", None, None).await?;
//!     println!("Overall gut health: {:.0}/100", score.overall);
//!     Ok(())
//! }
//! ```

/// Wall-clock abstraction so analytics runs against an explicit "now"
pub mod clock;

/// Service configuration and environment parsing
pub mod config;

/// Unified error handling re-exported from `gut-core`
pub mod errors;

/// Analytics engine re-exported from `gut-intelligence`
pub mod intelligence;

/// Structured logging setup
pub mod logging;

/// Record models and service response types
pub mod models;

/// Analytics orchestration
pub mod services;

/// Record-store contracts and the in-memory implementation
pub mod stores;
