//! Abstract column types
//!
//! Schema models describe columns with these dialect-neutral types; each
//! platform maps them to native SQL type names through its domain table.

/// Abstract column type
///
/// The fixed vocabulary a schema model is written against. Platforms own the
/// mapping from these to concrete SQL type names (e.g. `BigInt` becomes
/// `INT8` on Postgres, `bigserial` when the column is a native
/// auto-increment key).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "UPPERCASE"))]
pub enum ColumnType {
    Boolean,
    TinyInt,
    SmallInt,
    Integer,
    BigInt,
    Real,
    Double,
    Float,
    Decimal,
    Numeric,
    Char,
    Varchar,
    LongVarchar,
    Date,
    Time,
    Timestamp,
    Binary,
    Varbinary,
    LongVarbinary,
    Blob,
    Clob,
    Object,
    Enum,
    Array,
}

impl ColumnType {
    /// Canonical upper-case name, usable as a fallback SQL type
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ColumnType::Boolean => "BOOLEAN",
            ColumnType::TinyInt => "TINYINT",
            ColumnType::SmallInt => "SMALLINT",
            ColumnType::Integer => "INTEGER",
            ColumnType::BigInt => "BIGINT",
            ColumnType::Real => "REAL",
            ColumnType::Double => "DOUBLE",
            ColumnType::Float => "FLOAT",
            ColumnType::Decimal => "DECIMAL",
            ColumnType::Numeric => "NUMERIC",
            ColumnType::Char => "CHAR",
            ColumnType::Varchar => "VARCHAR",
            ColumnType::LongVarchar => "LONGVARCHAR",
            ColumnType::Date => "DATE",
            ColumnType::Time => "TIME",
            ColumnType::Timestamp => "TIMESTAMP",
            ColumnType::Binary => "BINARY",
            ColumnType::Varbinary => "VARBINARY",
            ColumnType::LongVarbinary => "LONGVARBINARY",
            ColumnType::Blob => "BLOB",
            ColumnType::Clob => "CLOB",
            ColumnType::Object => "OBJECT",
            ColumnType::Enum => "ENUM",
            ColumnType::Array => "ARRAY",
        }
    }

    /// Integer and floating-point types, whose default literals need no quoting
    #[must_use]
    pub const fn is_numeric(&self) -> bool {
        matches!(
            self,
            ColumnType::TinyInt
                | ColumnType::SmallInt
                | ColumnType::Integer
                | ColumnType::BigInt
                | ColumnType::Real
                | ColumnType::Double
                | ColumnType::Float
                | ColumnType::Decimal
                | ColumnType::Numeric
        )
    }

}

impl core::fmt::Display for ColumnType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
