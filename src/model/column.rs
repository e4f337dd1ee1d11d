//! Column entity

use super::domain::{DefaultValue, Domain};
use serde::{Deserialize, Serialize};
use sqlforge_types::ColumnType;

/// A column of a table
///
/// Columns carry no back-reference to their table; platform operations that
/// need table context take the table as a parameter.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Column {
    pub name: String,
    #[serde(rename = "type")]
    pub column_type: ColumnType,
    #[serde(default, skip_serializing_if = "is_default_domain")]
    pub domain: Domain,
    #[serde(default)]
    pub not_null: bool,
    #[serde(default)]
    pub auto_increment: bool,
    #[serde(default)]
    pub primary_key: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

fn is_default_domain(domain: &Domain) -> bool {
    *domain == Domain::default()
}

impl Column {
    pub fn new(name: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            column_type,
            domain: Domain::default(),
            not_null: false,
            auto_increment: false,
            primary_key: false,
            description: None,
        }
    }

    pub fn not_null(mut self) -> Self {
        self.not_null = true;
        self
    }

    pub fn auto_increment(mut self) -> Self {
        self.auto_increment = true;
        self
    }

    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self.not_null = true;
        self
    }

    pub fn with_domain(mut self, domain: Domain) -> Self {
        self.domain = domain;
        self
    }

    pub fn with_size(mut self, size: u32) -> Self {
        self.domain.size = Some(size);
        self
    }

    pub fn with_default(mut self, default: DefaultValue) -> Self {
        self.domain.default = Some(default);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// The explicit native SQL type, if the schema pinned one
    pub fn sql_type_override(&self) -> Option<&str> {
        self.domain.sql_type.as_deref()
    }

    pub fn default_value(&self) -> Option<&DefaultValue> {
        self.domain.default.as_ref()
    }
}
