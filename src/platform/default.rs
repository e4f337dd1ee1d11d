//! Dialect-neutral platform
//!
//! Renders ANSI-flavored DDL using the trait's default method bodies. Useful
//! as a baseline target and as the reference for what concrete dialects
//! override.

use super::{Platform, PlatformState};
use crate::model::Domain;
use sqlforge_types::{ColumnType, Dialect};
use std::collections::HashMap;

/// The generic platform: every abstract type maps to its canonical name
pub struct DefaultPlatform {
    state: PlatformState,
}

impl Default for DefaultPlatform {
    fn default() -> Self {
        Self::new()
    }
}

impl DefaultPlatform {
    pub fn new() -> Self {
        Self {
            state: PlatformState::new(generic_domains()),
        }
    }
}

impl Platform for DefaultPlatform {
    fn dialect(&self) -> Dialect {
        Dialect::Generic
    }

    fn state(&self) -> &PlatformState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut PlatformState {
        &mut self.state
    }
}

/// Identity mapping: abstract names double as SQL type names
pub(super) fn generic_domains() -> HashMap<ColumnType, Domain> {
    [
        ColumnType::Boolean,
        ColumnType::TinyInt,
        ColumnType::SmallInt,
        ColumnType::Integer,
        ColumnType::BigInt,
        ColumnType::Real,
        ColumnType::Double,
        ColumnType::Float,
        ColumnType::Decimal,
        ColumnType::Numeric,
        ColumnType::Char,
        ColumnType::Varchar,
        ColumnType::LongVarchar,
        ColumnType::Date,
        ColumnType::Time,
        ColumnType::Timestamp,
        ColumnType::Binary,
        ColumnType::Varbinary,
        ColumnType::LongVarbinary,
        ColumnType::Blob,
        ColumnType::Clob,
        ColumnType::Object,
        ColumnType::Enum,
        ColumnType::Array,
    ]
    .into_iter()
    .map(|ty| (ty, Domain::with_sql_type(ty.as_str())))
    .collect()
}
