// ABOUTME: Intelligence module re-exports from the gut-intelligence crate
// ABOUTME: Gives the service layer and its consumers one import path for the engine
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub use gut_intelligence::*;

pub use gut_intelligence::config as analytics_config;
