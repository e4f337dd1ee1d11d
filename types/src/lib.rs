//! Shared type definitions for sqlforge
//!
//! This crate provides the leaf vocabulary used across the generator:
//!
//! - [`Dialect`] - Database dialect enum, the closed registry key for
//!   platform selection
//! - [`ColumnType`] - Abstract column types that dialect platforms map to
//!   native SQL type names
//!
//! # Features
//!
//! - `std` - Standard library support (enabled by default)
//! - `serde` - Enable serde serialization/deserialization

mod column_type;
mod dialect;

pub use column_type::ColumnType;
pub use dialect::{Dialect, DialectParseError};

/// Prelude module for commonly used types
pub mod prelude {
    pub use crate::{ColumnType, Dialect};
}
