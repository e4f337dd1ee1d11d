//! Table entity

use super::column::Column;
use super::constraint::{ForeignKey, Index, Unique};
use super::vendor::VendorInfo;
use crate::behavior::Behavior;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Primary-key generation strategy
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum IdMethod {
    /// The database's own auto-increment/sequence mechanism
    Native,
    /// Keys are managed outside the database
    #[default]
    None,
}

/// A table of the schema model
///
/// Columns are kept in declaration order; constraint and behavior maps
/// preserve insertion/name order so emitted DDL is deterministic.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Table {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,
    #[serde(default)]
    pub columns: Vec<Column>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub uniques: Vec<Unique>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub indices: Vec<Index>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub foreign_keys: Vec<ForeignKey>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub id_method: IdMethod,
    /// Explicit id-method parameters; the first value names the sequence
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub id_method_parameters: Vec<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub behaviors: BTreeMap<String, Behavior>,
    /// Vendor parameters keyed by platform identifier (e.g. `pgsql`)
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub vendor: BTreeMap<String, VendorInfo>,
    /// Excluded from DDL output (lookup-only tables)
    #[serde(default)]
    pub skip_ddl: bool,
}

impl Table {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_id_method(mut self, id_method: IdMethod) -> Self {
        self.id_method = id_method;
        self
    }

    pub fn with_id_method_parameter(mut self, value: impl Into<String>) -> Self {
        self.id_method_parameters.push(value.into());
        self
    }

    // ---------------------------------------------------------------------
    // Columns
    // ---------------------------------------------------------------------

    pub fn add_column(&mut self, column: Column) -> &mut Self {
        self.columns.push(column);
        self
    }

    pub fn with_column(mut self, column: Column) -> Self {
        self.columns.push(column);
        self
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c.name == name)
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn column_mut(&mut self, name: &str) -> Option<&mut Column> {
        self.columns.iter_mut().find(|c| c.name == name)
    }

    /// Replace a column in place, preserving its declaration position
    ///
    /// Returns `false` (and leaves the table unchanged) when no column with
    /// that name exists. This keeps output column ordering deterministic,
    /// unlike a remove/re-add round-trip which would move the column to the
    /// end.
    pub fn replace_column(&mut self, column: Column) -> bool {
        match self.columns.iter().position(|c| c.name == column.name) {
            Some(pos) => {
                self.columns[pos] = column;
                true
            }
            None => false,
        }
    }

    /// First auto-increment column in declaration order, if any
    ///
    /// At most one auto-increment column per table is expected; extra flags
    /// are ignored rather than rejected.
    pub fn auto_increment_column(&self) -> Option<&Column> {
        self.columns.iter().find(|c| c.auto_increment)
    }

    /// Primary-key columns in declaration order (composite allowed)
    pub fn primary_key(&self) -> Vec<&Column> {
        self.columns.iter().filter(|c| c.primary_key).collect()
    }

    pub fn has_primary_key(&self) -> bool {
        self.columns.iter().any(|c| c.primary_key)
    }

    // ---------------------------------------------------------------------
    // Constraints
    // ---------------------------------------------------------------------

    pub fn add_unique(&mut self, unique: Unique) -> &mut Self {
        self.uniques.push(unique);
        self
    }

    pub fn with_unique(mut self, unique: Unique) -> Self {
        self.uniques.push(unique);
        self
    }

    pub fn add_index(&mut self, index: Index) -> &mut Self {
        self.indices.push(index);
        self
    }

    pub fn with_index(mut self, index: Index) -> Self {
        self.indices.push(index);
        self
    }

    pub fn add_foreign_key(&mut self, fk: ForeignKey) -> &mut Self {
        self.foreign_keys.push(fk);
        self
    }

    pub fn with_foreign_key(mut self, fk: ForeignKey) -> Self {
        self.foreign_keys.push(fk);
        self
    }

    // ---------------------------------------------------------------------
    // Behaviors and vendor info
    // ---------------------------------------------------------------------

    /// Attach a behavior; at most one instance per name, re-attach replaces
    pub fn attach_behavior(&mut self, behavior: Behavior) -> &mut Self {
        self.behaviors.insert(behavior.name().to_string(), behavior);
        self
    }

    pub fn with_behavior(mut self, behavior: Behavior) -> Self {
        self.attach_behavior(behavior);
        self
    }

    pub fn behavior(&self, name: &str) -> Option<&Behavior> {
        self.behaviors.get(name)
    }

    pub fn set_vendor_info(&mut self, platform: impl Into<String>, info: VendorInfo) -> &mut Self {
        self.vendor.insert(platform.into(), info);
        self
    }

    pub fn with_vendor_info(mut self, platform: impl Into<String>, info: VendorInfo) -> Self {
        self.set_vendor_info(platform, info);
        self
    }

    pub fn vendor_info_for(&self, platform: &str) -> Option<&VendorInfo> {
        self.vendor.get(platform)
    }

    /// Vendor parameter lookup; absent vendor entries are not an error
    pub fn vendor_parameter(&self, platform: &str, name: &str) -> Option<&str> {
        self.vendor_info_for(platform).and_then(|vi| vi.parameter(name))
    }

    /// Run the table-augmentation pass of every attached behavior
    ///
    /// Behaviors are taken out of the table for the duration of the pass so
    /// they can mutate the column list, then restored. Safe to run more than
    /// once: behavior augmentation is required to be idempotent.
    pub fn apply_behaviors(&mut self) {
        let behaviors = std::mem::take(&mut self.behaviors);
        for behavior in behaviors.values() {
            tracing::trace!(table = %self.name, behavior = behavior.name(), "applying behavior");
            behavior.modify_table(self);
        }
        self.behaviors = behaviors;
    }
}
