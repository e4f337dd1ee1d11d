//! Pluggable table behaviors
//!
//! A behavior is a named, parameterized extension attached to a table. It
//! hooks into three extension points: table augmentation (before DDL
//! emission), query-method contribution, and object-method contribution
//! (both generation-time source fragments).
//!
//! Behaviors form a closed tagged variant rather than an open class-loading
//! mechanism: parameters are validated once at attach time via
//! [`Behavior::from_params`], and an unknown behavior name is a fatal
//! configuration error.

mod timestampable;

pub use timestampable::TimestampableBehavior;

use crate::error::{GeneratorError, Result};
use crate::model::Table;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A generated query-builder method, keyed by the column it targets
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueryMethodFragment {
    /// Column the fragment filters or orders by
    pub column: String,
    /// Generated method name
    pub method: String,
    /// Generated source text
    pub source: String,
}

/// A behavior attached to a table
///
/// Closed set of variants; each implements the three extension points. The
/// enum serializes with its registration name as tag, so behaviors survive
/// model snapshots.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "name", rename_all = "lowercase")]
pub enum Behavior {
    Timestampable(TimestampableBehavior),
}

impl Behavior {
    /// Resolve a behavior by registration name and validate its parameters
    ///
    /// Unknown names and unknown or malformed parameters are configuration
    /// errors surfaced at attach time, never during generation.
    pub fn from_params(name: &str, parameters: &BTreeMap<String, String>) -> Result<Self> {
        match name {
            "timestampable" => Ok(Behavior::Timestampable(TimestampableBehavior::from_params(
                parameters,
            )?)),
            other => Err(GeneratorError::UnknownBehavior(other.to_string())),
        }
    }

    /// Registration name, the key under which the table stores the behavior
    pub fn name(&self) -> &'static str {
        match self {
            Behavior::Timestampable(_) => "timestampable",
        }
    }

    /// Table augmentation extension point
    ///
    /// Runs once before DDL generation; must be idempotent.
    pub fn modify_table(&self, table: &mut Table) {
        match self {
            Behavior::Timestampable(b) => b.modify_table(table),
        }
    }

    /// Query-method contribution extension point
    pub fn query_methods(&self, table: &Table) -> Vec<QueryMethodFragment> {
        match self {
            Behavior::Timestampable(b) => b.query_methods(table),
        }
    }

    /// Object-method contribution extension point
    pub fn object_methods(&self, table: &Table) -> Option<String> {
        match self {
            Behavior::Timestampable(b) => b.object_methods(table),
        }
    }
}
