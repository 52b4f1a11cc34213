// ABOUTME: Configuration module exposing environment-based server settings
// ABOUTME: Re-exports the ServerConfig and its typed enums
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vita Wellness

//! Configuration management. The server is configured exclusively through
//! environment variables; there is no config file.

pub mod environment;

pub use environment::{Environment, LogLevel, ServerConfig};
