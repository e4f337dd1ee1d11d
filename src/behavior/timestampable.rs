//! Timestamp-tracking behavior
//!
//! Adds `created_at`/`updated_at` columns to a table and contributes
//! recency-oriented query methods plus a `keep_update_date_unchanged` object
//! method to the generated source.

use super::QueryMethodFragment;
use crate::error::{GeneratorError, Result};
use crate::model::{Column, DefaultValue, Table};
use heck::ToUpperCamelCase;
use serde::{Deserialize, Serialize};
use sqlforge_types::ColumnType;
use std::collections::BTreeMap;

/// Configuration for the `timestampable` behavior
///
/// Parameters and defaults:
/// - `create_column` — `"created_at"`
/// - `update_column` — `"updated_at"`
/// - `disable_updated_at` — `"false"`; `"true"` suppresses the update
///   column, its query methods, the object method, and the platform's
///   update-timestamp trigger for the table
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct TimestampableBehavior {
    pub create_column: String,
    pub update_column: String,
    pub disable_updated_at: bool,
}

impl Default for TimestampableBehavior {
    fn default() -> Self {
        Self {
            create_column: "created_at".to_string(),
            update_column: "updated_at".to_string(),
            disable_updated_at: false,
        }
    }
}

impl TimestampableBehavior {
    /// Build from a raw parameter map, rejecting unknown or malformed values
    pub fn from_params(parameters: &BTreeMap<String, String>) -> Result<Self> {
        let mut config = Self::default();
        for (key, value) in parameters {
            match key.as_str() {
                "create_column" => config.create_column = value.clone(),
                "update_column" => config.update_column = value.clone(),
                "disable_updated_at" => {
                    config.disable_updated_at = parse_bool(value).ok_or_else(|| {
                        GeneratorError::BehaviorParameter {
                            behavior: "timestampable".to_string(),
                            parameter: key.clone(),
                            message: format!("expected \"true\" or \"false\", got \"{}\"", value),
                        }
                    })?;
                }
                other => {
                    return Err(GeneratorError::BehaviorParameter {
                        behavior: "timestampable".to_string(),
                        parameter: other.to_string(),
                        message: "unknown parameter".to_string(),
                    });
                }
            }
        }
        Ok(config)
    }

    /// Whether update tracking is active
    pub fn with_updated_at(&self) -> bool {
        !self.disable_updated_at
    }

    /// Ensure the configured timestamp column(s) exist on the table
    ///
    /// An existing column with the configured name is replaced in place with
    /// the required properties, keeping its declaration position. Calling
    /// this any number of times leaves exactly one column per configured
    /// name.
    pub fn modify_table(&self, table: &mut Table) {
        ensure_timestamp_column(table, &self.create_column);
        if self.with_updated_at() {
            ensure_timestamp_column(table, &self.update_column);
        }
    }

    /// Recency query methods for each enabled timestamp column
    pub fn query_methods(&self, table: &Table) -> Vec<QueryMethodFragment> {
        let query_struct = format!("{}Query", table.name.to_upper_camel_case());
        let mut fragments = Vec::new();

        if self.with_updated_at() {
            fragments.extend(column_query_methods(
                &query_struct,
                &self.update_column,
                "updated",
            ));
        }
        fragments.extend(column_query_methods(
            &query_struct,
            &self.create_column,
            "created",
        ));

        fragments
    }

    /// One method letting a pending save keep the update timestamp unchanged
    pub fn object_methods(&self, table: &Table) -> Option<String> {
        if !self.with_updated_at() {
            return None;
        }
        let record_struct = table.name.to_upper_camel_case();
        Some(format!(
            r#"/// Mark the record so the update date is not bumped by the next save.
pub fn keep_update_date_unchanged(mut self) -> {record} {{
    self.modified_columns.push("{column}");
    self
}}
"#,
            record = record_struct,
            column = self.update_column,
        ))
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

fn ensure_timestamp_column(table: &mut Table, name: &str) {
    if !table.has_column(name) {
        table.add_column(Column::new(name, ColumnType::Timestamp));
    }
    // Rebuild the column with the required properties and put it back at its
    // declaration position.
    let mut column = table
        .column(name)
        .cloned()
        .unwrap_or_else(|| Column::new(name, ColumnType::Timestamp));
    column.column_type = ColumnType::Timestamp;
    column.not_null = true;
    column.domain.default = Some(DefaultValue::expr("CURRENT_TIMESTAMP"));
    table.replace_column(column);
}

/// Filter-by-recency plus both orderings for one timestamp column
fn column_query_methods(
    query_struct: &str,
    column: &str,
    role: &str,
) -> Vec<QueryMethodFragment> {
    let recently = format!("recently_{}", role);
    let last_first = format!("last_{}_first", role);
    let first_first = format!("first_{}_first", role);

    vec![
        QueryMethodFragment {
            column: column.to_string(),
            method: recently.clone(),
            source: format!(
                r#"/// Filter by rows {role} within the last `days` days.
pub fn {method}(self, days: i64) -> {query} {{
    self.filter_ge("{column}", now_minus_days(days))
}}
"#,
                role = role,
                method = recently,
                query = query_struct,
                column = column,
            ),
        },
        QueryMethodFragment {
            column: column.to_string(),
            method: last_first.clone(),
            source: format!(
                r#"/// Order by {column} descending.
pub fn {method}(self) -> {query} {{
    self.order_by_desc("{column}")
}}
"#,
                method = last_first,
                query = query_struct,
                column = column,
            ),
        },
        QueryMethodFragment {
            column: column.to_string(),
            method: first_first.clone(),
            source: format!(
                r#"/// Order by {column} ascending.
pub fn {method}(self) -> {query} {{
    self.order_by_asc("{column}")
}}
"#,
                method = first_first,
                query = query_struct,
                column = column,
            ),
        },
    ]
}
