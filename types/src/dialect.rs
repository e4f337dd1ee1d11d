//! Unified database dialect enum
//!
//! This module provides a single source of truth for dialect identification.
//! The enum is the closed registry key for platform selection: configuration
//! strings are parsed here, and an unknown identifier fails at selection time
//! rather than during DDL emission.

/// SQL dialect for database-specific DDL generation
///
/// Each dialect has its own identifier quoting rules, type mappings, boolean
/// literals, and auto-increment strategy, supplied by the platform registered
/// for it.
///
/// # Examples
///
/// ```
/// use sqlforge_types::Dialect;
///
/// assert_eq!(Dialect::parse("pgsql"), Some(Dialect::Postgres));
/// assert_eq!(Dialect::parse("nosuchdb"), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Dialect {
    /// Dialect-neutral ANSI-flavored DDL
    #[default]
    Generic,

    /// PostgreSQL-flavored DDL
    ///
    /// Serial auto-increment, `'t'`/`'f'` boolean literals, schema support.
    Postgres,
}

impl Dialect {
    /// Parse a dialect from a string (case-insensitive)
    ///
    /// Supports common aliases:
    /// - Generic: `"generic"`, `"default"`, `"ansi"`
    /// - Postgres: `"postgres"`, `"postgresql"`, `"pgsql"`, `"pg"`
    ///
    /// # Examples
    ///
    /// ```
    /// use sqlforge_types::Dialect;
    ///
    /// assert_eq!(Dialect::parse("generic"), Some(Dialect::Generic));
    /// assert_eq!(Dialect::parse("PostgreSQL"), Some(Dialect::Postgres));
    /// assert_eq!(Dialect::parse("unknown"), None);
    /// ```
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        if s.eq_ignore_ascii_case("generic")
            || s.eq_ignore_ascii_case("default")
            || s.eq_ignore_ascii_case("ansi")
        {
            Some(Dialect::Generic)
        } else if s.eq_ignore_ascii_case("postgres")
            || s.eq_ignore_ascii_case("postgresql")
            || s.eq_ignore_ascii_case("pgsql")
            || s.eq_ignore_ascii_case("pg")
        {
            Some(Dialect::Postgres)
        } else {
            None
        }
    }

    /// Get the dialect name as a lowercase string
    ///
    /// This is also the vendor-info key a table uses to carry
    /// dialect-specific parameters for this platform.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Dialect::Generic => "generic",
            Dialect::Postgres => "pgsql",
        }
    }
}

impl core::fmt::Display for Dialect {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::str::FromStr for Dialect {
    type Err = DialectParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Dialect::parse(s).ok_or(DialectParseError)
    }
}

/// Error returned when parsing an unknown dialect string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DialectParseError;

impl core::fmt::Display for DialectParseError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("unknown dialect")
    }
}

#[cfg(feature = "std")]
impl std::error::Error for DialectParseError {}
