//! Column change-sets for incremental migration
//!
//! A [`ColumnDiff`] pairs two snapshots of one column and lists what changed
//! between them as a closed set of tagged variants. Platforms consume diffs
//! read-only to emit minimal `ALTER TABLE` statements; the
//! [`ColumnChange::Unrecognized`] fallback keeps older platforms
//! forward-compatible with newer change kinds by skipping them.

use crate::model::{Column, DefaultValue, DefaultValueKind, IdMethod, Table};
use serde::{Deserialize, Serialize};
use sqlforge_types::ColumnType;

/// The table context a column diff was computed against
///
/// Carries just enough of the owning table for ALTER generation: the
/// qualified name plus the id-method settings that drive auto-increment type
/// substitution.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct TableRef {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,
    #[serde(default)]
    pub id_method: IdMethod,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub id_method_parameters: Vec<String>,
}

impl From<&Table> for TableRef {
    fn from(table: &Table) -> Self {
        Self {
            name: table.name.clone(),
            schema: table.schema.clone(),
            id_method: table.id_method,
            id_method_parameters: table.id_method_parameters.clone(),
        }
    }
}

/// One changed property of a column, with old and new payloads
///
/// Exactly the six recognized change kinds, plus a fallback. `Option` sides
/// distinguish absence from a present-but-empty value.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "property", rename_all = "camelCase")]
pub enum ColumnChange {
    Type {
        from: ColumnType,
        to: ColumnType,
    },
    Size {
        from: Option<u32>,
        to: Option<u32>,
    },
    Scale {
        from: Option<u32>,
        to: Option<u32>,
    },
    NotNull {
        from: bool,
        to: bool,
    },
    DefaultValueValue {
        from: Option<DefaultValue>,
        to: Option<DefaultValue>,
    },
    /// The default switched between literal and expression kind
    ///
    /// Recognized but never rendered: a kind flip without a value change
    /// produces no DDL.
    DefaultValueType {
        from: Option<DefaultValueKind>,
        to: Option<DefaultValueKind>,
    },
    /// Forward-compatibility fallback; platforms skip it without error
    #[serde(other)]
    Unrecognized,
}

/// Change-set between two snapshots of the same column
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ColumnDiff {
    pub table: TableRef,
    pub from: Column,
    pub to: Column,
    pub changes: Vec<ColumnChange>,
}

impl ColumnDiff {
    pub fn new(table: TableRef, from: Column, to: Column, changes: Vec<ColumnChange>) -> Self {
        Self {
            table,
            from,
            to,
            changes,
        }
    }

    /// Compute the changed-property set between two column snapshots
    ///
    /// Properties are compared in a fixed order (type, size, scale,
    /// not-null, default value, default kind) so emitted ALTER statements
    /// are deterministic.
    pub fn compute(table: &Table, from: &Column, to: &Column) -> Self {
        let mut changes = Vec::new();

        if from.column_type != to.column_type {
            changes.push(ColumnChange::Type {
                from: from.column_type,
                to: to.column_type,
            });
        }
        if from.domain.size != to.domain.size {
            changes.push(ColumnChange::Size {
                from: from.domain.size,
                to: to.domain.size,
            });
        }
        if from.domain.scale != to.domain.scale {
            changes.push(ColumnChange::Scale {
                from: from.domain.scale,
                to: to.domain.scale,
            });
        }
        if from.not_null != to.not_null {
            changes.push(ColumnChange::NotNull {
                from: from.not_null,
                to: to.not_null,
            });
        }

        let from_default = from.default_value();
        let to_default = to.default_value();
        if from_default.map(|d| &d.value) != to_default.map(|d| &d.value) {
            changes.push(ColumnChange::DefaultValueValue {
                from: from_default.cloned(),
                to: to_default.cloned(),
            });
        }
        if from_default.map(|d| d.kind) != to_default.map(|d| d.kind) {
            changes.push(ColumnChange::DefaultValueType {
                from: from_default.map(|d| d.kind),
                to: to_default.map(|d| d.kind),
            });
        }

        Self::new(TableRef::from(table), from.clone(), to.clone(), changes)
    }

    pub fn has_changes(&self) -> bool {
        !self.changes.is_empty()
    }
}
