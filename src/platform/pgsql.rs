//! PostgreSQL platform
//!
//! Serial auto-increment columns, `'t'`/`'f'` boolean literals, schema
//! support driven by the table's `pgsql` vendor parameters, per-schema
//! timestamp trigger functions, and `ALTER TABLE .. ALTER COLUMN` migration
//! statements.

use super::{Platform, PlatformState, derive_sequence_name};
use crate::behavior::Behavior;
use crate::error::{GeneratorError, Result};
use crate::model::{Column, Database, Domain, Table, Unique};
use sqlforge_types::{ColumnType, Dialect};
use std::cell::RefCell;
use std::collections::HashMap;

/// Cache key for memoized sequence names
///
/// Includes the id-method parameters so a table whose parameters change
/// never hits a stale entry.
type SequenceKey = (String, Vec<String>);

pub struct PgsqlPlatform {
    state: PlatformState,
    sequence_names: RefCell<HashMap<SequenceKey, Option<String>>>,
}

impl Default for PgsqlPlatform {
    fn default() -> Self {
        Self::new()
    }
}

impl PgsqlPlatform {
    pub fn new() -> Self {
        Self {
            state: PlatformState::new(pgsql_domains()),
            sequence_names: RefCell::new(HashMap::new()),
        }
    }

    /// Schema the table's objects live in: the `pgsql` vendor parameter
    /// wins, then the table's own schema, then `public`
    fn table_schema<'a>(&self, table: &'a Table) -> &'a str {
        table
            .vendor_parameter("pgsql", "schema")
            .or(table.schema.as_deref())
            .unwrap_or("public")
    }

    fn table_comment_ddl(&self, table: &Table) -> String {
        match &table.description {
            Some(description) => format!(
                "COMMENT ON TABLE {} IS {};\n",
                self.qualified_table_name(table),
                self.quote_string(description)
            ),
            None => String::new(),
        }
    }

    fn column_comments_ddl(&self, table: &Table) -> String {
        table
            .columns
            .iter()
            .filter_map(|column| {
                let description = column.description.as_ref()?;
                Some(format!(
                    "COMMENT ON COLUMN {}.{} IS {};\n",
                    self.qualified_table_name(table),
                    self.quote_identifier(&column.name),
                    self.quote_string(description)
                ))
            })
            .collect()
    }

    /// Per-schema trigger function that bumps `updated_at` on every update
    fn trigger_function_ddl(&self, schema: &str) -> String {
        format!(
            "CREATE OR REPLACE FUNCTION {schema}.trigger_set_timestamp()\n\
             RETURNS trigger AS $$\n\
             BEGIN\n\
             \tNEW.updated_at = NOW();\n\
             \tRETURN NEW;\n\
             END;\n\
             $$ LANGUAGE plpgsql;\n",
            schema = self.quote_identifier(schema)
        )
    }
}

impl Platform for PgsqlPlatform {
    fn dialect(&self) -> Dialect {
        Dialect::Postgres
    }

    fn state(&self) -> &PlatformState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut PlatformState {
        &mut self.state
    }

    fn boolean_literal(&self, value: bool) -> String {
        if value { "'t'" } else { "'f'" }.to_string()
    }

    fn has_size(&self, sql_type: &str) -> bool {
        !matches!(sql_type, "BYTEA" | "TEXT" | "DOUBLE PRECISION")
    }

    // Serial types carry the auto-increment semantics themselves.
    fn auto_increment_clause(&self) -> &'static str {
        ""
    }

    fn supports_schemas(&self) -> bool {
        true
    }

    fn auto_increment_sql_type(&self, column: &Column) -> Option<String> {
        let serial = if column.column_type == ColumnType::BigInt {
            "bigserial"
        } else {
            "serial"
        };
        Some(serial.to_string())
    }

    fn primary_key_ddl(&self, table: &Table) -> Option<String> {
        let pk: Vec<String> = table
            .primary_key()
            .iter()
            .map(|c| c.name.clone())
            .collect();
        if pk.is_empty() {
            return None;
        }
        Some(format!(
            "CONSTRAINT {} PRIMARY KEY ({})",
            self.quote_identifier(&self.primary_key_name(table)),
            self.column_list_ddl(&pk)
        ))
    }

    // Uniques are table constraints here, not standalone indexes.
    fn drop_unique_ddl(&self, unique: &Unique, table: &Table) -> String {
        format!(
            "ALTER TABLE {} DROP CONSTRAINT {};\n",
            self.qualified_table_name(table),
            self.quote_identifier(&unique.name)
        )
    }

    fn use_schema_ddl(&self, table: &Table) -> String {
        match table.vendor_parameter("pgsql", "schema") {
            Some(schema) => format!("SET search_path TO {};\n", self.quote_identifier(schema)),
            None => String::new(),
        }
    }

    fn reset_schema_ddl(&self, table: &Table) -> String {
        if table.vendor_parameter("pgsql", "schema").is_some() {
            "SET search_path TO public;\n".to_string()
        } else {
            String::new()
        }
    }

    /// Schema statements for every distinct schema in the database, in
    /// first-encounter order: drop, create, timestamp trigger function
    fn add_schemas_ddl(&self, database: &Database) -> String {
        let mut seen: Vec<&str> = Vec::new();
        let mut ret = String::new();
        for table in database.tables() {
            let schema = match table
                .vendor_parameter("pgsql", "schema")
                .or(table.schema.as_deref())
            {
                Some(schema) => schema,
                None => continue,
            };
            if seen.contains(&schema) {
                continue;
            }
            seen.push(schema);
            ret.push_str(&format!(
                "DROP SCHEMA IF EXISTS {} CASCADE;\n",
                self.quote_identifier(schema)
            ));
            ret.push_str(&format!(
                "CREATE SCHEMA {};\n",
                self.quote_identifier(schema)
            ));
            ret.push_str(&self.trigger_function_ddl(schema));
        }
        // Tables without a schema still get their triggers in public, so the
        // function must exist there too.
        let needs_public = database.tables_for_ddl().any(|table| {
            self.table_schema(table) == "public"
                && matches!(
                    table.behavior("timestampable"),
                    Some(Behavior::Timestampable(config)) if config.with_updated_at()
                )
        });
        if needs_public && !seen.contains(&"public") {
            ret.push_str(&self.trigger_function_ddl("public"));
        }
        ret
    }

    fn native_id_method(&self) -> super::IdGeneration {
        super::IdGeneration::Serial
    }

    /// Memoized per (table name, id-method parameters); the parameters are
    /// part of the key, so changing them invalidates naturally
    fn sequence_name(&self, table: &Table) -> Option<String> {
        let key = (table.name.clone(), table.id_method_parameters.clone());
        if let Some(cached) = self.sequence_names.borrow().get(&key) {
            return cached.clone();
        }
        let name = derive_sequence_name(table);
        self.sequence_names.borrow_mut().insert(key, name.clone());
        name
    }

    fn add_table_ddl(&self, table: &Table) -> String {
        let mut ret = self.use_schema_ddl(table);
        ret.push_str(&self.add_sequence_ddl(table));
        ret.push_str(&format!(
            "CREATE TABLE {} (\n\t{}\n);\n",
            self.qualified_table_name(table),
            self.create_table_lines(table).join(",\n\t")
        ));
        ret.push_str(&self.table_comment_ddl(table));
        ret.push_str(&self.column_comments_ddl(table));
        ret.push_str(&self.reset_schema_ddl(table));
        ret
    }

    fn drop_table_ddl(&self, table: &Table) -> String {
        let mut ret = self.use_schema_ddl(table);
        ret.push_str(&format!(
            "DROP TABLE IF EXISTS {} CASCADE;\n",
            self.qualified_table_name(table)
        ));
        ret.push_str(&self.drop_sequence_ddl(table));
        ret.push_str(&self.reset_schema_ddl(table));
        ret
    }

    fn begin_ddl(&self) -> String {
        "BEGIN;\n".to_string()
    }

    fn end_ddl(&self) -> String {
        "\nCOMMIT;\n".to_string()
    }

    /// Update-timestamp trigger for tables with an active timestampable
    /// behavior; suppressed when update tracking is disabled
    fn add_triggers_ddl(&self, table: &Table) -> String {
        let enabled = match table.behavior("timestampable") {
            Some(Behavior::Timestampable(config)) => config.with_updated_at(),
            None => false,
        };
        if !enabled {
            return String::new();
        }
        format!(
            "CREATE TRIGGER set_timestamp\n\
             BEFORE UPDATE ON {table}\n\
             FOR EACH ROW\n\
             EXECUTE PROCEDURE {schema}.trigger_set_timestamp();\n",
            table = self.qualified_table_name(table),
            schema = self.quote_identifier(self.table_schema(table)),
        )
    }

    /// Postgres fetches generated keys from the sequence, so a sequence
    /// name is mandatory here
    fn identifier_fetch_snippet(&self, table: &Table) -> Result<String> {
        let sequence = self
            .sequence_name(table)
            .ok_or_else(|| GeneratorError::MissingSequenceName {
                table: table.name.clone(),
            })?;
        Ok(format!(
            "let id: i64 = client.query_one(\"SELECT nextval('{}')\", &[])?.get(0);\n",
            sequence.to_lowercase()
        ))
    }
}

/// Postgres domain mapping, starting from the generic identity table
fn pgsql_domains() -> HashMap<ColumnType, Domain> {
    let mut domains = super::default::generic_domains();
    for (column_type, sql_type) in [
        (ColumnType::Boolean, "BOOLEAN"),
        (ColumnType::TinyInt, "INT2"),
        (ColumnType::SmallInt, "INT2"),
        (ColumnType::BigInt, "INT8"),
        (ColumnType::Real, "FLOAT"),
        (ColumnType::Double, "DOUBLE PRECISION"),
        (ColumnType::Float, "DOUBLE PRECISION"),
        (ColumnType::LongVarchar, "TEXT"),
        (ColumnType::Binary, "BYTEA"),
        (ColumnType::Varbinary, "BYTEA"),
        (ColumnType::LongVarbinary, "BYTEA"),
        (ColumnType::Blob, "BYTEA"),
        (ColumnType::Clob, "TEXT"),
        (ColumnType::Object, "TEXT"),
        (ColumnType::Enum, "INT2"),
        (ColumnType::Array, "JSONB"),
    ] {
        domains.insert(column_type, Domain::with_sql_type(sql_type));
    }
    domains
}
