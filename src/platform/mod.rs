//! Dialect platforms
//!
//! A platform encodes one database dialect's DDL rules: type mapping,
//! identifier quoting, constraint syntax, auto-increment strategy, schema
//! DDL, and diff-based ALTER generation. The [`Platform`] trait's default
//! method bodies are the dialect-neutral generic rendition;
//! [`PgsqlPlatform`] overrides the Postgres-specific policy points.
//!
//! Platforms are resolved through a closed registry keyed by
//! [`Dialect`](sqlforge_types::Dialect); an unknown identifier fails at
//! selection time with a configuration error, before any DDL is emitted.

mod default;
mod pgsql;

pub use default::DefaultPlatform;
pub use pgsql::PgsqlPlatform;

use crate::diff::{ColumnChange, ColumnDiff, TableRef};
use crate::error::Result;
use crate::model::{Column, Database, Domain, ForeignKey, Index, Table, Unique};
use sqlforge_types::{ColumnType, Dialect};
use std::collections::HashMap;

/// Resolve the platform registered for a dialect
pub fn for_dialect(dialect: Dialect) -> Box<dyn Platform> {
    match dialect {
        Dialect::Generic => Box::new(DefaultPlatform::new()),
        Dialect::Postgres => Box::new(PgsqlPlatform::new()),
    }
}

/// Resolve a platform from a configuration string
///
/// Unknown identifiers are a fatal configuration error, surfaced here at
/// selection time rather than during generation.
pub fn from_identifier(identifier: &str) -> Result<Box<dyn Platform>> {
    Dialect::parse(identifier)
        .map(for_dialect)
        .ok_or_else(|| crate::error::GeneratorError::UnknownPlatform(identifier.to_string()))
}

/// State shared by every platform implementation
///
/// Owns the per-dialect abstract-type → domain mapping and the
/// identifier-quoting switch. Platforms expose it through
/// [`Platform::state`] so the trait's default methods can reach it.
#[derive(Debug, Clone)]
pub struct PlatformState {
    identifier_quoting: bool,
    domains: HashMap<ColumnType, Domain>,
}

impl PlatformState {
    pub fn new(domains: HashMap<ColumnType, Domain>) -> Self {
        Self {
            identifier_quoting: true,
            domains,
        }
    }
}

/// Deterministic sequence-name derivation shared by every platform
///
/// An explicit id-method parameter wins; otherwise the name derives from the
/// first auto-increment column in declaration order. `None` when the
/// table's id-method is not native or no auto-increment column exists.
pub(super) fn derive_sequence_name(table: &Table) -> Option<String> {
    if table.id_method != crate::model::IdMethod::Native {
        return None;
    }
    if let Some(explicit) = table.id_method_parameters.first() {
        return Some(explicit.clone());
    }
    table
        .auto_increment_column()
        .map(|column| format!("{}_{}_seq", table.name, column.name))
}

/// How a dialect realizes native primary-key generation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdGeneration {
    /// Column-level identity clause
    Identity,
    /// Sequence-backed serial types
    Serial,
}

/// Truthy check for boolean default literals; accepts the usual
/// string spellings a schema file may carry.
fn parse_boolean(value: &str) -> bool {
    value.eq_ignore_ascii_case("true")
        || value.eq_ignore_ascii_case("t")
        || value.eq_ignore_ascii_case("y")
        || value.eq_ignore_ascii_case("yes")
        || value == "1"
}

/// One database dialect's DDL policy and rendering rules
///
/// Default method bodies implement the generic dialect; concrete platforms
/// override the policy points that differ. All operations are read-only
/// over the (already behavior-augmented) model and side-effect-free apart
/// from producing text.
pub trait Platform {
    /// The dialect this platform renders for
    fn dialect(&self) -> Dialect;

    fn state(&self) -> &PlatformState;

    fn state_mut(&mut self) -> &mut PlatformState;

    // ---------------------------------------------------------------------
    // Policy points
    // ---------------------------------------------------------------------

    /// Turn identifier quoting on or off (on by default)
    fn set_identifier_quoting(&mut self, enabled: bool) {
        self.state_mut().identifier_quoting = enabled;
    }

    fn quote_identifier(&self, identifier: &str) -> String {
        if self.state().identifier_quoting {
            format!("\"{}\"", identifier)
        } else {
            identifier.to_string()
        }
    }

    /// Render a string literal, doubling embedded single quotes
    fn quote_string(&self, text: &str) -> String {
        format!("'{}'", text.replace('\'', "''"))
    }

    /// Canonical boolean literal for the dialect
    fn boolean_literal(&self, value: bool) -> String {
        if value { "1" } else { "0" }.to_string()
    }

    /// Whether a native SQL type takes a size suffix
    fn has_size(&self, _sql_type: &str) -> bool {
        true
    }

    /// Column-level auto-increment clause; empty when the type itself
    /// carries the auto-increment semantics (e.g. Postgres serial)
    fn auto_increment_clause(&self) -> &'static str {
        "IDENTITY"
    }

    fn supports_schemas(&self) -> bool {
        false
    }

    /// How native id generation works on this dialect; drives whether
    /// sequence statements are emitted at all
    fn native_id_method(&self) -> IdGeneration {
        IdGeneration::Identity
    }

    fn max_column_name_length(&self) -> usize {
        64
    }

    fn primary_key_name(&self, table: &Table) -> String {
        format!("{}_pkey", table.name)
    }

    // ---------------------------------------------------------------------
    // Domain mapping
    // ---------------------------------------------------------------------

    /// Override the native mapping for one abstract type
    fn set_domain_mapping(&mut self, column_type: ColumnType, domain: Domain) {
        self.state_mut().domains.insert(column_type, domain);
    }

    /// The dialect's default domain for an abstract type
    ///
    /// Falls back to the abstract type's canonical name when the dialect
    /// mapped nothing, so emission degrades instead of erroring.
    fn default_domain(&self, column_type: ColumnType) -> Domain {
        self.state()
            .domains
            .get(&column_type)
            .cloned()
            .unwrap_or_else(|| Domain::with_sql_type(column_type.as_str()))
    }

    /// Whether the column still carries this platform's default native type
    fn is_default_sql_type(&self, column: &Column) -> bool {
        match column.sql_type_override() {
            None => true,
            Some(explicit) => {
                self.default_domain(column.column_type).sql_type.as_deref() == Some(explicit)
            }
        }
    }

    /// The native SQL type for a column, ignoring auto-increment substitution
    fn native_sql_type(&self, column: &Column) -> String {
        if let Some(explicit) = column.sql_type_override() {
            return explicit.to_string();
        }
        self.default_domain(column.column_type)
            .sql_type
            .unwrap_or_else(|| column.column_type.as_str().to_string())
    }

    /// Dialect type that replaces the mapped integer type for native
    /// auto-increment columns, when the dialect has one
    fn auto_increment_sql_type(&self, _column: &Column) -> Option<String> {
        None
    }

    // ---------------------------------------------------------------------
    // Column DDL
    // ---------------------------------------------------------------------

    /// `DEFAULT ...` clause for a column, if it has a default
    ///
    /// Expression defaults are emitted verbatim; literal defaults go
    /// through the dialect's boolean/string rendering.
    fn column_default_value_ddl(&self, column: &Column) -> Option<String> {
        let default = column.default_value()?;
        let rendered = if default.is_expr() {
            default.value.clone()
        } else if column.column_type == ColumnType::Boolean {
            self.boolean_literal(parse_boolean(&default.value))
        } else if column.column_type.is_numeric() {
            default.value.clone()
        } else {
            self.quote_string(&default.value)
        };
        Some(format!("DEFAULT {}", rendered))
    }

    fn null_string(&self, not_null: bool) -> Option<&'static str> {
        not_null.then_some("NOT NULL")
    }

    /// Full column definition:
    /// `<quoted-name> <type>[(size[,scale])] [DEFAULT ...] [NOT NULL] [<auto-increment>]`
    fn column_ddl(&self, column: &Column, table: &Table) -> String {
        let id_params_empty = table.id_method_parameters.is_empty();
        let substituted = column.auto_increment
            && id_params_empty
            && self.auto_increment_sql_type(column).is_some();

        let sql_type = if substituted {
            // Substituted auto-increment types never take an explicit size.
            self.auto_increment_sql_type(column).unwrap_or_default()
        } else {
            self.native_sql_type(column)
        };

        let mut parts = vec![self.quote_identifier(&column.name)];
        if !substituted && self.has_size(&sql_type) && self.is_default_sql_type(column) {
            parts.push(format!("{}{}", sql_type, column.domain.print_size()));
        } else {
            parts.push(sql_type);
        }
        if let Some(default) = self.column_default_value_ddl(column) {
            parts.push(default);
        }
        if let Some(null) = self.null_string(column.not_null) {
            parts.push(null.to_string());
        }
        if column.auto_increment {
            let clause = self.auto_increment_clause();
            if !clause.is_empty() {
                parts.push(clause.to_string());
            }
        }
        parts.join(" ")
    }

    /// Comma-joined quoted column name list
    fn column_list_ddl(&self, columns: &[String]) -> String {
        columns
            .iter()
            .map(|c| self.quote_identifier(c))
            .collect::<Vec<_>>()
            .join(", ")
    }

    // ---------------------------------------------------------------------
    // Constraint DDL
    // ---------------------------------------------------------------------

    /// Inline `PRIMARY KEY (...)` clause, or nothing without a primary key
    fn primary_key_ddl(&self, table: &Table) -> Option<String> {
        let pk: Vec<String> = table
            .primary_key()
            .iter()
            .map(|c| c.name.clone())
            .collect();
        if pk.is_empty() {
            return None;
        }
        Some(format!("PRIMARY KEY ({})", self.column_list_ddl(&pk)))
    }

    fn unique_ddl(&self, unique: &Unique) -> String {
        format!(
            "CONSTRAINT {} UNIQUE ({})",
            self.quote_identifier(&unique.name),
            self.column_list_ddl(&unique.columns)
        )
    }

    fn index_ddl(&self, index: &Index, table: &Table) -> String {
        let unique = if index.is_unique { "UNIQUE " } else { "" };
        format!(
            "CREATE {}INDEX {} ON {} ({});\n",
            unique,
            self.quote_identifier(&index.name),
            self.qualified_table_name(table),
            self.column_list_ddl(&index.columns)
        )
    }

    fn add_indices_ddl(&self, table: &Table) -> String {
        table
            .indices
            .iter()
            .map(|index| self.index_ddl(index, table))
            .collect()
    }

    fn drop_index_ddl(&self, index: &Index, _table: &Table) -> String {
        format!("DROP INDEX {};\n", self.quote_identifier(&index.name))
    }

    fn drop_unique_ddl(&self, unique: &Unique, _table: &Table) -> String {
        format!("DROP INDEX {};\n", self.quote_identifier(&unique.name))
    }

    fn foreign_key_ddl(&self, fk: &ForeignKey) -> String {
        let foreign_table = match (&fk.foreign_schema, self.supports_schemas()) {
            (Some(schema), true) => format!(
                "{}.{}",
                self.quote_identifier(schema),
                self.quote_identifier(&fk.foreign_table)
            ),
            _ => self.quote_identifier(&fk.foreign_table),
        };
        let mut ddl = format!(
            "CONSTRAINT {} FOREIGN KEY ({}) REFERENCES {} ({})",
            self.quote_identifier(&fk.name),
            self.column_list_ddl(&fk.local_columns),
            foreign_table,
            self.column_list_ddl(&fk.foreign_columns)
        );
        if let Some(action) = fk.on_update {
            ddl.push_str(&format!(" ON UPDATE {}", action.as_sql()));
        }
        if let Some(action) = fk.on_delete {
            ddl.push_str(&format!(" ON DELETE {}", action.as_sql()));
        }
        ddl
    }

    fn add_foreign_key_ddl(&self, fk: &ForeignKey, table: &Table) -> String {
        format!(
            "ALTER TABLE {} ADD {};\n",
            self.qualified_table_name(table),
            self.foreign_key_ddl(fk)
        )
    }

    fn add_foreign_keys_ddl(&self, table: &Table) -> String {
        table
            .foreign_keys
            .iter()
            .map(|fk| self.add_foreign_key_ddl(fk, table))
            .collect()
    }

    // ---------------------------------------------------------------------
    // Table DDL
    // ---------------------------------------------------------------------

    /// Schema-qualified quoted table name, when the dialect supports schemas
    fn qualified_table_name(&self, table: &Table) -> String {
        match (&table.schema, self.supports_schemas()) {
            (Some(schema), true) => format!(
                "{}.{}",
                self.quote_identifier(schema),
                self.quote_identifier(&table.name)
            ),
            _ => self.quote_identifier(&table.name),
        }
    }

    /// Body lines of a CREATE TABLE: columns, primary key, uniques, in order
    fn create_table_lines(&self, table: &Table) -> Vec<String> {
        let mut lines: Vec<String> = table
            .columns
            .iter()
            .map(|c| self.column_ddl(c, table))
            .collect();
        if let Some(pk) = self.primary_key_ddl(table) {
            lines.push(pk);
        }
        for unique in &table.uniques {
            lines.push(self.unique_ddl(unique));
        }
        lines
    }

    fn add_table_ddl(&self, table: &Table) -> String {
        format!(
            "CREATE TABLE {} (\n\t{}\n);\n",
            self.qualified_table_name(table),
            self.create_table_lines(table).join(",\n\t")
        )
    }

    fn drop_table_ddl(&self, table: &Table) -> String {
        format!("DROP TABLE IF EXISTS {};\n", self.qualified_table_name(table))
    }

    // ---------------------------------------------------------------------
    // Schema / sequence / trigger hooks
    // ---------------------------------------------------------------------

    fn use_schema_ddl(&self, _table: &Table) -> String {
        String::new()
    }

    fn reset_schema_ddl(&self, _table: &Table) -> String {
        String::new()
    }

    fn add_schemas_ddl(&self, _database: &Database) -> String {
        String::new()
    }

    // Sequence statements apply only when the platform itself must name the
    // sequence: sequence-backed dialects, native id generation, no explicit
    // parameters. With explicit parameters the sequence is managed outside
    // the generated DDL.
    fn add_sequence_ddl(&self, table: &Table) -> String {
        match self.owned_sequence_name(table) {
            Some(sequence) => format!(
                "CREATE SEQUENCE {};\n",
                self.quote_identifier(&sequence.to_lowercase())
            ),
            None => String::new(),
        }
    }

    fn drop_sequence_ddl(&self, table: &Table) -> String {
        match self.owned_sequence_name(table) {
            Some(sequence) => format!(
                "DROP SEQUENCE {};\n",
                self.quote_identifier(&sequence.to_lowercase())
            ),
            None => String::new(),
        }
    }

    /// Name of the sequence the generated DDL itself creates and drops,
    /// if there is one
    fn owned_sequence_name(&self, table: &Table) -> Option<String> {
        if self.native_id_method() != IdGeneration::Serial
            || !table.id_method_parameters.is_empty()
        {
            return None;
        }
        self.sequence_name(table)
    }

    fn add_triggers_ddl(&self, _table: &Table) -> String {
        String::new()
    }

    /// Deterministic sequence name for a native-id table
    ///
    /// An explicit id-method parameter wins; otherwise the name derives from
    /// the first auto-increment column. `None` when the table's id-method is
    /// not native or no auto-increment column exists.
    fn sequence_name(&self, table: &Table) -> Option<String> {
        derive_sequence_name(table)
    }

    // ---------------------------------------------------------------------
    // Database-level driver
    // ---------------------------------------------------------------------

    fn begin_ddl(&self) -> String {
        String::new()
    }

    fn end_ddl(&self) -> String {
        String::new()
    }

    fn comment_block_ddl(&self, text: &str) -> String {
        let rule = "-".repeat(71);
        format!("\n--{}\n-- {}\n--{}\n", rule, text, rule)
    }

    /// Full-database DDL in three passes: all tables first, then foreign
    /// keys, then triggers. Later passes may reference tables created
    /// anywhere in the first pass, so a single interleaved pass would break
    /// cross-references.
    fn add_tables_ddl(&self, database: &Database) -> String {
        tracing::debug!(
            database = %database.name,
            dialect = %self.dialect(),
            "generating full-database DDL"
        );
        let mut ret = self.begin_ddl();
        ret.push_str(&self.add_schemas_ddl(database));
        for table in database.tables_for_ddl() {
            ret.push_str(&self.comment_block_ddl(&table.name));
            ret.push_str(&self.drop_table_ddl(table));
            ret.push_str(&self.add_table_ddl(table));
            ret.push_str(&self.add_indices_ddl(table));
        }
        for table in database.tables_for_ddl() {
            ret.push_str(&self.add_foreign_keys_ddl(table));
        }
        for table in database.tables_for_ddl() {
            ret.push_str(&self.add_triggers_ddl(table));
        }
        ret.push_str(&self.end_ddl());
        ret
    }

    // ---------------------------------------------------------------------
    // Diff consumption (ALTER generation)
    // ---------------------------------------------------------------------

    /// Schema-qualified name for the table a diff refers to
    fn qualified_diff_table_name(&self, table: &TableRef) -> String {
        match (&table.schema, self.supports_schemas()) {
            (Some(schema), true) => format!(
                "{}.{}",
                self.quote_identifier(schema),
                self.quote_identifier(&table.name)
            ),
            _ => self.quote_identifier(&table.name),
        }
    }

    /// One `ALTER TABLE ... ALTER COLUMN ...` statement per recognized
    /// change in the diff
    ///
    /// Default-kind markers and unrecognized change kinds emit nothing.
    fn modify_column_ddl(&self, diff: &ColumnDiff) -> String {
        let table_name = self.qualified_diff_table_name(&diff.table);
        let column_name = self.quote_identifier(&diff.to.name);
        let mut ret = String::new();

        for change in &diff.changes {
            match change {
                ColumnChange::Type { .. }
                | ColumnChange::Size { .. }
                | ColumnChange::Scale { .. } => {
                    let substituted = diff.to.auto_increment
                        && diff.table.id_method_parameters.is_empty()
                        && self.auto_increment_sql_type(&diff.to).is_some();
                    let mut sql_type = if substituted {
                        self.auto_increment_sql_type(&diff.to).unwrap_or_default()
                    } else {
                        self.native_sql_type(&diff.to)
                    };
                    if !substituted && self.has_size(&sql_type) {
                        sql_type.push_str(&diff.to.domain.print_size());
                    }
                    ret.push_str(&format!(
                        "ALTER TABLE {} ALTER COLUMN {} TYPE {};\n",
                        table_name, column_name, sql_type
                    ));
                }
                ColumnChange::DefaultValueValue { from, to } => {
                    if from.is_some() && to.is_none() {
                        ret.push_str(&format!(
                            "ALTER TABLE {} ALTER COLUMN {} DROP DEFAULT;\n",
                            table_name, column_name
                        ));
                    } else if let Some(default) = self.column_default_value_ddl(&diff.to) {
                        ret.push_str(&format!(
                            "ALTER TABLE {} ALTER COLUMN {} SET {};\n",
                            table_name, column_name, default
                        ));
                    }
                }
                ColumnChange::NotNull { to, .. } => {
                    let clause = if *to { "SET NOT NULL" } else { "DROP NOT NULL" };
                    ret.push_str(&format!(
                        "ALTER TABLE {} ALTER COLUMN {} {};\n",
                        table_name, column_name, clause
                    ));
                }
                // Kind-only marker: recognized, intentionally no DDL.
                ColumnChange::DefaultValueType { .. } => {}
                // Forward-compat: newer change kinds are skipped, not errors.
                ColumnChange::Unrecognized => {}
            }
        }

        ret
    }

    fn modify_columns_ddl(&self, diffs: &[ColumnDiff]) -> String {
        diffs.iter().map(|d| self.modify_column_ddl(d)).collect()
    }

    // ---------------------------------------------------------------------
    // Generated-source hooks
    // ---------------------------------------------------------------------

    /// Source fragment that fetches a newly generated primary key
    ///
    /// Dialects that read keys from a sequence require a sequence name and
    /// fail with a configuration error when none can be derived.
    fn identifier_fetch_snippet(&self, table: &Table) -> Result<String> {
        let _ = table;
        Ok("let id = connection.last_insert_id();\n".to_string())
    }
}
