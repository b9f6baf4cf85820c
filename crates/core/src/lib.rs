//! Core business logic for Khata.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, aggregation rules, and validation live here.
//!
//! # Modules
//!
//! - `tds` - Tax Deducted at Source payable report
//! - `settings` - Buying settings validation and the defaults store

pub mod settings;
pub mod tds;
