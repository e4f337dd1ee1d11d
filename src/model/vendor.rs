//! Vendor-specific table parameters
//!
//! Tables carry key/value parameter maps keyed by platform identifier (e.g.
//! `pgsql`). Only the matching platform interprets them; everything else
//! ignores them, so lookups for an absent vendor entry return an empty map
//! instead of erroring.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Dialect-specific key/value parameters attached to a table
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct VendorInfo {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    parameters: BTreeMap<String, String>,
}

impl VendorInfo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_parameter(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.parameters.insert(name.into(), value.into());
    }

    pub fn with_parameter(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_parameter(name, value);
        self
    }

    pub fn parameter(&self, name: &str) -> Option<&str> {
        self.parameters.get(name).map(String::as_str)
    }

    pub fn has_parameter(&self, name: &str) -> bool {
        self.parameters.contains_key(name)
    }

    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }
}
