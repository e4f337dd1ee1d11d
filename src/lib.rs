//! # sqlforge
//!
//! Schema-driven DDL and source generator. An in-memory relational model
//! (database → tables → columns, plus constraints and vendor parameters) is
//! augmented by table behaviors, then a dialect platform renders
//! create/drop/alter DDL text for the target database.
//!
//! ## Example
//!
//! ```
//! use sqlforge::model::{Column, Database, IdMethod, Table};
//! use sqlforge::platform;
//! use sqlforge_types::{ColumnType, Dialect};
//!
//! let mut db = Database::new("bookstore");
//! db.add_table(
//!     Table::new("books")
//!         .with_id_method(IdMethod::Native)
//!         .with_column(Column::new("id", ColumnType::Integer).primary_key().auto_increment())
//!         .with_column(Column::new("title", ColumnType::Varchar).with_size(255).not_null()),
//! )
//! .unwrap();
//!
//! db.apply_behaviors();
//! let platform = platform::for_dialect(Dialect::Postgres);
//! let ddl = platform.add_tables_ddl(&db);
//! assert!(ddl.contains("CREATE TABLE \"books\""));
//! ```
//!
//! ## Architecture
//!
//! - [`model`] — the schema entity graph, mutable until generation starts
//! - [`behavior`] — named table augmenters (e.g. timestamp columns) hooked
//!   into model construction and code generation
//! - [`platform`] — one implementation per dialect; all DDL text comes out
//!   of here
//! - [`diff`] — per-column change-sets consumed by the platforms' ALTER
//!   generation
//! - [`snapshot`] — JSON freezing of a model version for later diffing
//! - [`config`] — thin factory resolving platform/behavior identifiers,
//!   failing fast on unknown ones

pub mod behavior;
pub mod config;
pub mod diff;
pub mod error;
pub mod model;
pub mod platform;
pub mod snapshot;

// Re-exports for convenient access
pub use behavior::{Behavior, QueryMethodFragment, TimestampableBehavior};
pub use config::{BehaviorDecl, GeneratorConfig};
pub use diff::{ColumnChange, ColumnDiff, TableRef};
pub use error::{GeneratorError, Result};
pub use model::{Column, Database, DefaultValue, Domain, ForeignKey, Index, Table, Unique};
pub use platform::{DefaultPlatform, PgsqlPlatform, Platform};
pub use snapshot::SchemaSnapshot;
pub use sqlforge_types::{ColumnType, Dialect};
