//! Common types used across the application.

pub mod tax_id;

pub use tax_id::TaxIdField;
