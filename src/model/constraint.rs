//! Index, unique, and foreign key constraint entities
//!
//! Constraints reference columns by name and belong to a single table. The
//! owning table is passed to platform operations alongside the constraint.

use serde::{Deserialize, Serialize};

/// A (possibly multi-column) index
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Index {
    pub name: String,
    pub columns: Vec<String>,
    #[serde(default)]
    pub is_unique: bool,
}

impl Index {
    pub fn new(name: impl Into<String>, columns: Vec<String>) -> Self {
        Self {
            name: name.into(),
            columns,
            is_unique: false,
        }
    }

    pub fn unique(mut self) -> Self {
        self.is_unique = true;
        self
    }
}

/// A unique constraint
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Unique {
    pub name: String,
    pub columns: Vec<String>,
}

impl Unique {
    pub fn new(name: impl Into<String>, columns: Vec<String>) -> Self {
        Self {
            name: name.into(),
            columns,
        }
    }
}

/// Referential action for foreign keys
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ForeignKeyAction {
    Cascade,
    SetNull,
    SetDefault,
    Restrict,
    NoAction,
}

impl ForeignKeyAction {
    pub const fn as_sql(&self) -> &'static str {
        match self {
            ForeignKeyAction::Cascade => "CASCADE",
            ForeignKeyAction::SetNull => "SET NULL",
            ForeignKeyAction::SetDefault => "SET DEFAULT",
            ForeignKeyAction::Restrict => "RESTRICT",
            ForeignKeyAction::NoAction => "NO ACTION",
        }
    }
}

/// A foreign key constraint
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ForeignKey {
    pub name: String,
    pub local_columns: Vec<String>,
    pub foreign_table: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub foreign_schema: Option<String>,
    pub foreign_columns: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_delete: Option<ForeignKeyAction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_update: Option<ForeignKeyAction>,
}

impl ForeignKey {
    pub fn new(
        name: impl Into<String>,
        local_columns: Vec<String>,
        foreign_table: impl Into<String>,
        foreign_columns: Vec<String>,
    ) -> Self {
        Self {
            name: name.into(),
            local_columns,
            foreign_table: foreign_table.into(),
            foreign_schema: None,
            foreign_columns,
            on_delete: None,
            on_update: None,
        }
    }

    pub fn with_foreign_schema(mut self, schema: impl Into<String>) -> Self {
        self.foreign_schema = Some(schema.into());
        self
    }

    pub fn on_delete(mut self, action: ForeignKeyAction) -> Self {
        self.on_delete = Some(action);
        self
    }

    pub fn on_update(mut self, action: ForeignKeyAction) -> Self {
        self.on_update = Some(action);
        self
    }
}
