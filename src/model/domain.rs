//! Concrete SQL type metadata
//!
//! A [`Domain`] carries what a column's abstract type resolves to on a
//! platform: the native SQL type name plus size/scale and default value.

use serde::{Deserialize, Serialize};

/// Kind of a column default value
///
/// Distinguishes a literal (`'pending'`, `0`) from a SQL expression
/// (`CURRENT_TIMESTAMP`). Expressions are emitted verbatim; literals are
/// rendered through the platform's quoting rules.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DefaultValueKind {
    Literal,
    Expr,
}

/// A column default value
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct DefaultValue {
    pub value: String,
    pub kind: DefaultValueKind,
}

impl DefaultValue {
    pub fn literal(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            kind: DefaultValueKind::Literal,
        }
    }

    pub fn expr(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            kind: DefaultValueKind::Expr,
        }
    }

    pub fn is_expr(&self) -> bool {
        self.kind == DefaultValueKind::Expr
    }
}

/// Concrete SQL type, size/scale, and default value for a column
///
/// `sql_type` is `None` while the column still carries the platform's
/// default mapping for its abstract type; a schema may pin an explicit
/// native type to override the mapping.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct Domain {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sql_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<DefaultValue>,
}

impl Domain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sql_type(sql_type: impl Into<String>) -> Self {
        Self {
            sql_type: Some(sql_type.into()),
            ..Self::default()
        }
    }

    pub fn with_size(mut self, size: u32) -> Self {
        self.size = Some(size);
        self
    }

    pub fn with_scale(mut self, scale: u32) -> Self {
        self.scale = Some(scale);
        self
    }

    pub fn with_default(mut self, default: DefaultValue) -> Self {
        self.default = Some(default);
        self
    }

    /// Render the size suffix: `"(size)"`, `"(size,scale)"`, or empty
    pub fn print_size(&self) -> String {
        match (self.size, self.scale) {
            (Some(size), Some(scale)) => format!("({},{})", size, scale),
            (Some(size), None) => format!("({})", size),
            _ => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_print_size() {
        assert_eq!(Domain::new().print_size(), "");
        assert_eq!(Domain::new().with_size(255).print_size(), "(255)");
        assert_eq!(
            Domain::new().with_size(10).with_scale(2).print_size(),
            "(10,2)"
        );
    }

    #[test]
    fn test_default_value_kinds() {
        assert!(DefaultValue::expr("CURRENT_TIMESTAMP").is_expr());
        assert!(!DefaultValue::literal("0").is_expr());
    }
}
