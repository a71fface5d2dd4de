//! Error types for DDL generation.

use crate::quote::StatementKind;
use crate::types::DomainType;

/// Errors that can occur while compiling a schema expression to SQL.
///
/// Each error is terminal for the single expression at hand: no partial
/// statement is emitted, and other expressions in the same batch are
/// unaffected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenerateError {
    /// The expression kind has no valid representation in the active dialect.
    #[error("{dialect} cannot express {kind}")]
    UnsupportedOperation {
        /// Dialect that rejected the expression.
        dialect: &'static str,
        /// Expression kind with no emission rule.
        kind: StatementKind,
    },

    /// The domain type has no mapping in the active dialect.
    #[error("{dialect} has no type mapping for {domain_type}")]
    UnsupportedType {
        /// Dialect that rejected the type.
        dialect: &'static str,
        /// Domain type without a mapping.
        domain_type: DomainType,
    },

    /// A required field is missing or invalid.
    #[error("malformed expression: {0}")]
    MalformedExpression(String),
}

/// Result type for DDL generation.
pub type Result<T> = std::result::Result<T, GenerateError>;
