//! Generator configuration
//!
//! Thin external-facing factory: resolves which platform and behaviors to
//! instantiate from configuration strings, validating everything up front.
//! Property-file parsing and connection management are the caller's
//! business; this layer only consumes the resolved values.

use crate::behavior::Behavior;
use crate::error::{GeneratorError, Result};
use crate::model::Database;
use crate::platform::{self, Platform};
use std::collections::BTreeMap;

/// A behavior declared for one table in configuration
#[derive(Clone, Debug, Default)]
pub struct BehaviorDecl {
    pub table: String,
    pub behavior: String,
    pub parameters: BTreeMap<String, String>,
}

/// Resolved generator settings
///
/// Fatal configuration errors (unknown platform identifier, unknown
/// behavior, malformed behavior parameter) surface from the `configured_*`
/// methods before any DDL is emitted.
#[derive(Clone, Debug)]
pub struct GeneratorConfig {
    platform: String,
    identifier_quoting: bool,
    behaviors: Vec<BehaviorDecl>,
}

impl GeneratorConfig {
    pub fn new(platform: impl Into<String>) -> Self {
        Self {
            platform: platform.into(),
            identifier_quoting: true,
            behaviors: Vec::new(),
        }
    }

    pub fn disable_identifier_quoting(mut self) -> Self {
        self.identifier_quoting = false;
        self
    }

    pub fn declare_behavior(mut self, decl: BehaviorDecl) -> Self {
        self.behaviors.push(decl);
        self
    }

    /// Instantiate the configured platform through the closed registry
    pub fn configured_platform(&self) -> Result<Box<dyn Platform>> {
        let mut platform = platform::from_identifier(&self.platform)?;
        platform.set_identifier_quoting(self.identifier_quoting);
        Ok(platform)
    }

    /// Validate and attach every declared behavior to its table
    ///
    /// Declarations naming tables absent from the model are skipped; a
    /// partially attached model is never left behind on error, because all
    /// declarations are validated before any is attached.
    pub fn attach_behaviors(&self, database: &mut Database) -> Result<()> {
        let mut resolved = Vec::with_capacity(self.behaviors.len());
        for decl in &self.behaviors {
            let behavior = Behavior::from_params(&decl.behavior, &decl.parameters)?;
            resolved.push((decl.table.clone(), behavior));
        }
        for (table_name, behavior) in resolved {
            if let Some(table) = database.table_mut(&table_name) {
                table.attach_behavior(behavior);
            } else {
                tracing::debug!(table = %table_name, "behavior declared for unknown table, skipping");
            }
        }
        Ok(())
    }
}
