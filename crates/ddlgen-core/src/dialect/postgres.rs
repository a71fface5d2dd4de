//! PostgreSQL dialect.

use super::{Capabilities, Dialect};
use crate::column::ColumnDefinition;
use crate::error::{GenerateError, Result};
use crate::quote::{QuoteStyle, QuotingPolicy};
use crate::types::DomainType;

static QUOTING: QuotingPolicy = QuotingPolicy::uniform(QuoteStyle::DoubleQuote);

const CAPABILITIES: Capabilities = Capabilities {
    rename_column: true,
    drop_column: true,
    alter_foreign_keys: true,
    conditional_create_index: true,
};

const DEFAULT_STRING_SIZE: u32 = 255;

/// PostgreSQL dialect for DDL generation.
///
/// Identity columns become `SERIAL`/`BIGSERIAL`: PostgreSQL expresses
/// autoincrement as a type swap, not a column keyword, so
/// [`column_sql`](Dialect::column_sql) is overridden here.
#[derive(Debug, Clone, Copy, Default)]
pub struct PostgresDialect;

impl PostgresDialect {
    /// Creates a new PostgreSQL dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Dialect for PostgresDialect {
    fn name(&self) -> &'static str {
        "postgresql"
    }

    fn capabilities(&self) -> Capabilities {
        CAPABILITIES
    }

    fn quoting(&self) -> &'static QuotingPolicy {
        &QUOTING
    }

    fn map_type(
        &self,
        domain_type: DomainType,
        size: Option<u32>,
        precision: Option<u32>,
    ) -> Result<String> {
        match domain_type {
            // PostgreSQL has no NVARCHAR; VARCHAR is already Unicode.
            DomainType::String | DomainType::AnsiString => Ok(format!(
                "VARCHAR({})",
                size.unwrap_or(DEFAULT_STRING_SIZE)
            )),
            DomainType::Integer => Ok("INTEGER".to_string()),
            DomainType::Int64 => Ok("BIGINT".to_string()),
            DomainType::Boolean => Ok("BOOLEAN".to_string()),
            DomainType::Decimal => Ok(match (size, precision) {
                (Some(p), Some(s)) => format!("DECIMAL({p},{s})"),
                (Some(p), None) => format!("DECIMAL({p})"),
                _ => "DECIMAL".to_string(),
            }),
            DomainType::Double => Ok("DOUBLE PRECISION".to_string()),
            DomainType::DateTime => Ok("TIMESTAMP".to_string()),
            DomainType::Date => Ok("DATE".to_string()),
            DomainType::Time => Ok("TIME".to_string()),
            DomainType::Binary => Ok("BYTEA".to_string()),
            DomainType::Guid => Ok("UUID".to_string()),
            DomainType::Currency => Ok("MONEY".to_string()),
            DomainType::Xml => Ok("XML".to_string()),
        }
    }

    fn autoincrement_keyword(&self) -> &'static str {
        ""
    }

    fn column_sql(&self, col: &ColumnDefinition) -> Result<String> {
        let data_type = if col.is_identity {
            match col.domain_type {
                DomainType::Integer => "SERIAL".to_string(),
                DomainType::Int64 => "BIGSERIAL".to_string(),
                other => {
                    return Err(GenerateError::MalformedExpression(format!(
                        "identity column '{}' must be Integer or Int64 on {}, got {other}",
                        col.name,
                        self.name()
                    )));
                }
            }
        } else {
            self.map_type(col.domain_type, col.size, col.precision)?
        };

        let mut sql = format!("{} {}", self.quoting().column(&col.name), data_type);
        if col.is_primary_key {
            sql.push_str(" PRIMARY KEY");
        } else if !col.is_nullable {
            sql.push_str(" NOT NULL");
        }
        if let Some(ref default) = col.default {
            sql.push_str(" DEFAULT ");
            sql.push_str(&default.to_sql());
        }
        Ok(sql)
    }
}
