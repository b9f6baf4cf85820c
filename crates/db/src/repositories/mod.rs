//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the application.

pub mod defaults;
pub mod naming;
pub mod schema;
pub mod tds;

pub use defaults::DefaultsRepository;
pub use naming::NamingRuleRepository;
pub use schema::SchemaRepository;
pub use tds::{TdsRepository, TdsRepositoryError};
