//! Abstract column type definitions.

use core::fmt;

use serde::{Deserialize, Serialize};

/// An abstract column type, independent of any dialect's concrete keyword.
///
/// Expressions carry domain types; each dialect maps them to its own SQL
/// type tokens. A dialect with no mapping for a domain type rejects the
/// expression instead of substituting a nearby type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DomainType {
    /// Unicode variable-length string.
    String,
    /// Non-Unicode variable-length string.
    AnsiString,
    /// 4-byte integer.
    Integer,
    /// 8-byte integer.
    Int64,
    /// Boolean.
    Boolean,
    /// Exact numeric with precision and scale.
    Decimal,
    /// 8-byte float.
    Double,
    /// Date and time of day.
    DateTime,
    /// Date.
    Date,
    /// Time of day.
    Time,
    /// Raw byte string.
    Binary,
    /// 128-bit globally unique identifier.
    Guid,
    /// Fixed-point money amount.
    Currency,
    /// XML document.
    Xml,
}

impl DomainType {
    /// Returns the domain type name as used in diagnostics.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::String => "String",
            Self::AnsiString => "AnsiString",
            Self::Integer => "Integer",
            Self::Int64 => "Int64",
            Self::Boolean => "Boolean",
            Self::Decimal => "Decimal",
            Self::Double => "Double",
            Self::DateTime => "DateTime",
            Self::Date => "Date",
            Self::Time => "Time",
            Self::Binary => "Binary",
            Self::Guid => "Guid",
            Self::Currency => "Currency",
            Self::Xml => "Xml",
        }
    }
}

impl fmt::Display for DomainType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
