//! Shared types, errors, and configuration for Khata.
//!
//! This crate provides common types used across all other crates:
//! - Schema capability flags resolved once at startup
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::AppConfig;
pub use error::AppError;
pub use types::TaxIdField;
