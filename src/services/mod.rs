// ABOUTME: Service layer orchestrating record stores and the analytics engine
// ABOUTME: Exposes the AnalyticsService and its produced operations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Analytics orchestration over the record stores
pub mod analytics;

pub use analytics::AnalyticsService;
