//! Database entity

use super::table::Table;
use crate::error::{GeneratorError, Result};
use serde::{Deserialize, Serialize};

/// An ordered collection of tables plus schema-wide settings
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Database {
    pub name: String,
    /// Schema tables fall back to when they carry none themselves
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_schema: Option<String>,
    #[serde(default)]
    tables: Vec<Table>,
}

impl Database {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_default_schema(mut self, schema: impl Into<String>) -> Self {
        self.default_schema = Some(schema.into());
        self
    }

    /// Add a table; table names must be unique within a database
    pub fn add_table(&mut self, mut table: Table) -> Result<()> {
        if self.tables.iter().any(|t| t.name == table.name) {
            return Err(GeneratorError::DuplicateTable {
                database: self.name.clone(),
                table: table.name,
            });
        }
        if table.schema.is_none() {
            table.schema = self.default_schema.clone();
        }
        self.tables.push(table);
        Ok(())
    }

    pub fn table(&self, name: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.name == name)
    }

    pub fn table_mut(&mut self, name: &str) -> Option<&mut Table> {
        self.tables.iter_mut().find(|t| t.name == name)
    }

    /// All tables in declaration order
    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    pub fn tables_mut(&mut self) -> &mut Vec<Table> {
        &mut self.tables
    }

    /// Tables that take part in DDL output, in declaration order
    pub fn tables_for_ddl(&self) -> impl Iterator<Item = &Table> {
        self.tables.iter().filter(|t| !t.skip_ddl)
    }

    /// Run every table's behavior-augmentation pass
    ///
    /// Must complete before any DDL is emitted; emission only ever sees the
    /// augmented model.
    pub fn apply_behaviors(&mut self) {
        tracing::debug!(database = %self.name, "running behavior augmentation pass");
        for table in &mut self.tables {
            table.apply_behaviors();
        }
    }
}
