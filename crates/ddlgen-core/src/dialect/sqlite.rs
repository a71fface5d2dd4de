//! SQLite dialect.
//!
//! SQLite has limited ALTER TABLE support: foreign keys can only be
//! declared at CREATE TABLE time and column renames require a table
//! rebuild, so both are rejected here rather than emitting SQL that does
//! not change the schema.

use super::{Capabilities, Dialect};
use crate::error::{GenerateError, Result};
use crate::quote::{QuoteStyle, QuotingPolicy, StatementKind};
use crate::types::DomainType;

/// Identifiers are bare except the table name in ADD COLUMN, which is
/// bracket-quoted.
static QUOTING: QuotingPolicy = QuotingPolicy::uniform(QuoteStyle::None)
    .with_table_style(StatementKind::CreateColumn, QuoteStyle::Bracket);

const CAPABILITIES: Capabilities = Capabilities {
    rename_column: false,
    drop_column: true,
    alter_foreign_keys: false,
    conditional_create_index: true,
};

/// Default length for sized string types when the column specifies none.
const DEFAULT_STRING_SIZE: u32 = 255;

/// SQLite dialect for DDL generation.
#[derive(Debug, Clone, Copy, Default)]
pub struct SqliteDialect;

impl SqliteDialect {
    /// Creates a new SQLite dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Dialect for SqliteDialect {
    fn name(&self) -> &'static str {
        "sqlite"
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
        _precision: Option<u32>,
    ) -> Result<String> {
        // SQLite stores by affinity; the tokens follow the declared types
        // its drivers conventionally round-trip.
        match domain_type {
            DomainType::String => Ok(format!(
                "NVARCHAR({})",
                size.unwrap_or(DEFAULT_STRING_SIZE)
            )),
            DomainType::AnsiString => Ok(format!(
                "VARCHAR({})",
                size.unwrap_or(DEFAULT_STRING_SIZE)
            )),
            DomainType::Integer | DomainType::Int64 | DomainType::Boolean => {
                Ok("INTEGER".to_string())
            }
            DomainType::Decimal => Ok("NUMERIC".to_string()),
            DomainType::Double => Ok("REAL".to_string()),
            DomainType::DateTime | DomainType::Time => Ok("DATETIME".to_string()),
            DomainType::Date => Ok("DATE".to_string()),
            DomainType::Binary => Ok("BLOB".to_string()),
            DomainType::Guid => Ok("UNIQUEIDENTIFIER".to_string()),
            DomainType::Currency | DomainType::Xml => Err(GenerateError::UnsupportedType {
                dialect: self.name(),
                domain_type,
            }),
        }
    }

    fn autoincrement_keyword(&self) -> &'static str {
        " AUTOINCREMENT"
    }

    fn identity_requires_primary_key(&self) -> bool {
        // AUTOINCREMENT is only legal on the column declared PRIMARY KEY.
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::ColumnDefinition;
    use crate::expression::{IndexColumn, IndexDefinition, SchemaExpression};

    fn string_column(name: &str) -> ColumnDefinition {
        ColumnDefinition::new(name, DomainType::String)
    }

    #[test]
    fn test_create_table() {
        let dialect = SqliteDialect::new();
        let expr = SchemaExpression::create_table("Table", vec![string_column("NewColumn")]);
        assert_eq!(
            dialect.generate(&expr).expect("generate"),
            vec!["CREATE TABLE Table (NewColumn NVARCHAR(255) NOT NULL)".to_string()]
        );
    }

    #[test]
    fn test_nullable_column_has_no_null_token() {
        let dialect = SqliteDialect::new();
        let expr = SchemaExpression::create_table(
            "Table",
            vec![string_column("NewColumn").nullable()],
        );
        // Nullable is the absence of NOT NULL; no NULL keyword is ever
        // emitted.
        assert_eq!(
            dialect.generate(&expr).expect("generate"),
            vec!["CREATE TABLE Table (NewColumn NVARCHAR(255))".to_string()]
        );
    }

    #[test]
    fn test_rename_table() {
        let dialect = SqliteDialect::new();
        let expr = SchemaExpression::rename_table("OldTable", "NewTable");
        assert_eq!(
            dialect.generate(&expr).expect("generate"),
            vec!["ALTER TABLE OldTable RENAME TO NewTable".to_string()]
        );
    }

    #[test]
    fn test_delete_table() {
        let dialect = SqliteDialect::new();
        let expr = SchemaExpression::delete_table("Table");
        assert_eq!(
            dialect.generate(&expr).expect("generate"),
            vec!["DROP TABLE Table".to_string()]
        );
    }

    #[test]
    fn test_create_column_brackets_the_table() {
        let dialect = SqliteDialect::new();
        let expr = SchemaExpression::create_column("Table", string_column("NewColumn"));
        assert_eq!(
            dialect.generate(&expr).expect("generate"),
            vec!["ALTER TABLE [Table] ADD COLUMN NewColumn NVARCHAR(255) NOT NULL".to_string()]
        );
    }

    #[test]
    fn test_create_autoincrement_column() {
        let dialect = SqliteDialect::new();
        let expr = SchemaExpression::create_column(
            "Table",
            string_column("NewColumn").identity().primary_key(),
        );
        assert_eq!(
            dialect.generate(&expr).expect("generate"),
            vec![
                "ALTER TABLE [Table] ADD COLUMN NewColumn NVARCHAR(255) NOT NULL \
                 PRIMARY KEY AUTOINCREMENT"
                    .to_string()
            ]
        );
    }

    #[test]
    fn test_identity_without_primary_key_is_rejected() {
        let dialect = SqliteDialect::new();
        let expr = SchemaExpression::create_column("Table", string_column("NewColumn").identity());
        assert!(matches!(
            dialect.generate(&expr),
            Err(GenerateError::MalformedExpression(_))
        ));
    }

    #[test]
    fn test_rename_column_is_rejected() {
        // No native rename, and the expression does not carry enough
        // schema to rebuild the table. Never a data-mutation stand-in.
        let dialect = SqliteDialect::new();
        let expr = SchemaExpression::rename_column("Table", "OldColumn", "NewColumn");
        assert_eq!(
            dialect.generate(&expr),
            Err(GenerateError::UnsupportedOperation {
                dialect: "sqlite",
                kind: StatementKind::RenameColumn,
            })
        );
    }

    #[test]
    fn test_delete_column() {
        let dialect = SqliteDialect::new();
        let expr = SchemaExpression::delete_column("Table", "Column");
        assert_eq!(
            dialect.generate(&expr).expect("generate"),
            vec!["ALTER TABLE Table DROP COLUMN Column".to_string()]
        );
    }

    #[test]
    fn test_create_basic_index() {
        let dialect = SqliteDialect::new();
        let expr = SchemaExpression::create_index(IndexDefinition::new(
            "Table",
            "indexed-column",
            vec![IndexColumn::new("IndexColumn")],
        ));
        assert_eq!(
            dialect.generate(&expr).expect("generate"),
            vec!["CREATE INDEX IF NOT EXISTS indexed-column ON Table (IndexColumn)".to_string()]
        );
    }

    #[test]
    fn test_create_unique_index_with_direction() {
        let dialect = SqliteDialect::new();
        let expr = SchemaExpression::create_index(
            IndexDefinition::new(
                "Account",
                "IX_Account_Number",
                vec![
                    IndexColumn::new("Number"),
                    IndexColumn::descending("OpenedAt"),
                ],
            )
            .unique(),
        );
        assert_eq!(
            dialect.generate(&expr).expect("generate"),
            vec![
                "CREATE UNIQUE INDEX IF NOT EXISTS IX_Account_Number ON Account \
                 (Number, OpenedAt DESC)"
                    .to_string()
            ]
        );
    }

    #[test]
    fn test_delete_index() {
        // SQLite index names are global, no table qualification.
        let dialect = SqliteDialect::new();
        let expr = SchemaExpression::delete_index("Table", "indexed-column");
        assert_eq!(
            dialect.generate(&expr).expect("generate"),
            vec!["DROP INDEX indexed-column".to_string()]
        );
    }

    #[test]
    fn test_foreign_keys_are_rejected() {
        let dialect = SqliteDialect::new();
        let create = SchemaExpression::create_foreign_key(crate::expression::ForeignKeyDefinition {
            name: "FK_Invoice_User".into(),
            table: "Invoice".into(),
            columns: vec!["UserId".into()],
            references_table: "User".into(),
            references_columns: vec!["Id".into()],
            on_delete: None,
            on_update: None,
        });
        assert!(matches!(
            dialect.generate(&create),
            Err(GenerateError::UnsupportedOperation {
                kind: StatementKind::CreateForeignKey,
                ..
            })
        ));

        let delete = SchemaExpression::delete_foreign_key("Invoice", "FK_Invoice_User");
        assert!(matches!(
            dialect.generate(&delete),
            Err(GenerateError::UnsupportedOperation {
                kind: StatementKind::DeleteForeignKey,
                ..
            })
        ));
    }

    #[test]
    fn test_unmapped_types() {
        let dialect = SqliteDialect::new();
        for domain_type in [DomainType::Currency, DomainType::Xml] {
            assert_eq!(
                dialect.map_type(domain_type, None, None),
                Err(GenerateError::UnsupportedType {
                    dialect: "sqlite",
                    domain_type,
                })
            );
        }
    }

    #[test]
    fn test_explicit_size_overrides_default() {
        let dialect = SqliteDialect::new();
        assert_eq!(
            dialect
                .map_type(DomainType::String, Some(40), None)
                .expect("map"),
            "NVARCHAR(40)"
        );
        assert_eq!(
            dialect.map_type(DomainType::String, None, None).expect("map"),
            "NVARCHAR(255)"
        );
    }
}
