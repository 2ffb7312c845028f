// ABOUTME: Configuration module for environment-based server settings
// ABOUTME: Exposes the typed ServerConfig loaded from environment variables
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ladle Project

//! Configuration management.
//!
//! Ladle is configured entirely from environment variables; there is no
//! configuration file. See [`environment::ServerConfig::from_env`].

pub mod environment;

pub use environment::{AuthConfig, DatabaseUrl, Environment, LogLevel, MediaConfig, ServerConfig};
