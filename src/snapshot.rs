//! Schema model snapshots
//!
//! A snapshot freezes a [`Database`] model as JSON so a stored version can
//! later be diffed against the current one. Snapshots chain through
//! `id`/`prev_id` pairs; the first snapshot points at [`ORIGIN_UUID`].

use crate::error::Result;
use crate::model::Database;
use serde::{Deserialize, Serialize};
use sqlforge_types::Dialect;
use std::path::Path;

/// Snapshot format version
pub const SNAPSHOT_VERSION: &str = "1";

/// `prev_id` of the first snapshot in a chain
pub const ORIGIN_UUID: &str = "00000000-0000-0000-0000-000000000000";

/// A serialized schema model plus chain metadata
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SchemaSnapshot {
    pub version: String,
    pub dialect: Dialect,
    pub id: String,
    pub prev_id: String,
    pub database: Database,
}

impl SchemaSnapshot {
    pub fn new(dialect: Dialect, database: Database) -> Self {
        Self {
            version: SNAPSHOT_VERSION.to_string(),
            dialect,
            id: uuid::Uuid::new_v4().to_string(),
            prev_id: ORIGIN_UUID.to_string(),
            database,
        }
    }

    pub fn with_prev_id(mut self, prev_id: impl Into<String>) -> Self {
        self.prev_id = prev_id.into();
        self
    }

    pub fn is_empty(&self) -> bool {
        self.database.tables().is_empty()
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }
}
