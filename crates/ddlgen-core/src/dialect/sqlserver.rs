//! SQL Server dialect.
//!
//! T-SQL diverges from the ANSI-ish defaults in several places: renames go
//! through `sp_rename`, ADD COLUMN drops the COLUMN keyword, CREATE INDEX
//! has no IF NOT EXISTS guard, and DROP INDEX is table-qualified.

use super::{Capabilities, Dialect};
use crate::column::ColumnDefinition;
use crate::error::Result;
use crate::expression::{DeleteIndexExpr, RenameColumnExpr, RenameTableExpr};
use crate::quote::{QuoteStyle, QuotingPolicy, StatementKind};
use crate::types::DomainType;

static QUOTING: QuotingPolicy = QuotingPolicy::uniform(QuoteStyle::Bracket);

const CAPABILITIES: Capabilities = Capabilities {
    rename_column: true,
    drop_column: true,
    alter_foreign_keys: true,
    conditional_create_index: false,
};

const DEFAULT_STRING_SIZE: u32 = 255;

/// Escapes a name for use inside a T-SQL string literal.
fn string_literal(name: &str) -> String {
    name.replace('\'', "''")
}

/// SQL Server dialect for DDL generation.
#[derive(Debug, Clone, Copy, Default)]
pub struct SqlServerDialect;

impl SqlServerDialect {
    /// Creates a new SQL Server dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Dialect for SqlServerDialect {
    fn name(&self) -> &'static str {
        "sqlserver"
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
            DomainType::String => Ok(format!(
                "NVARCHAR({})",
                size.unwrap_or(DEFAULT_STRING_SIZE)
            )),
            DomainType::AnsiString => Ok(format!(
                "VARCHAR({})",
                size.unwrap_or(DEFAULT_STRING_SIZE)
            )),
            DomainType::Integer => Ok("INT".to_string()),
            DomainType::Int64 => Ok("BIGINT".to_string()),
            DomainType::Boolean => Ok("BIT".to_string()),
            DomainType::Decimal => Ok(match (size, precision) {
                (Some(p), Some(s)) => format!("DECIMAL({p},{s})"),
                (Some(p), None) => format!("DECIMAL({p})"),
                _ => "DECIMAL".to_string(),
            }),
            DomainType::Double => Ok("FLOAT".to_string()),
            DomainType::DateTime => Ok("DATETIME".to_string()),
            DomainType::Date => Ok("DATE".to_string()),
            DomainType::Time => Ok("TIME".to_string()),
            DomainType::Binary => Ok(size.map_or_else(
                || "VARBINARY(MAX)".to_string(),
                |n| format!("VARBINARY({n})"),
            )),
            DomainType::Guid => Ok("UNIQUEIDENTIFIER".to_string()),
            DomainType::Currency => Ok("MONEY".to_string()),
            DomainType::Xml => Ok("XML".to_string()),
        }
    }

    fn autoincrement_keyword(&self) -> &'static str {
        " IDENTITY(1,1)"
    }

    fn rename_table(&self, expr: &RenameTableExpr) -> Result<String> {
        Ok(format!(
            "EXEC sp_rename '{}', '{}'",
            string_literal(&expr.old_name),
            string_literal(&expr.new_name)
        ))
    }

    fn rename_column(&self, expr: &RenameColumnExpr) -> Result<Vec<String>> {
        Ok(vec![format!(
            "EXEC sp_rename '{}.{}', '{}', 'COLUMN'",
            string_literal(&expr.table),
            string_literal(&expr.old_name),
            string_literal(&expr.new_name)
        )])
    }

    fn create_column(&self, expr: &crate::expression::CreateColumnExpr) -> Result<String> {
        // T-SQL spells it ADD, not ADD COLUMN.
        Ok(format!(
            "ALTER TABLE {} ADD {}",
            self.quoting().table(StatementKind::CreateColumn, &expr.table),
            self.column_sql(&expr.column)?
        ))
    }

    fn delete_index(&self, expr: &DeleteIndexExpr) -> Result<String> {
        Ok(format!(
            "DROP INDEX {} ON {}",
            self.quoting().column(&expr.index),
            self.quoting().table(StatementKind::DeleteIndex, &expr.table)
        ))
    }

    fn column_sql(&self, col: &ColumnDefinition) -> Result<String> {
        // IDENTITY must directly follow the data type.
        let mut sql = format!(
            "{} {}",
            self.quoting().column(&col.name),
            self.map_type(col.domain_type, col.size, col.precision)?
        );
        if col.is_identity {
            sql.push_str(self.autoincrement_keyword());
        }
        if !col.is_nullable {
            sql.push_str(" NOT NULL");
        }
        if col.is_primary_key {
            sql.push_str(" PRIMARY KEY");
        }
        if let Some(ref default) = col.default {
            sql.push_str(" DEFAULT ");
            sql.push_str(&default.to_sql());
        }
        Ok(sql)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expression::{IndexColumn, IndexDefinition, SchemaExpression};

    #[test]
    fn test_data_types() {
        let dialect = SqlServerDialect::new();
        assert_eq!(
            dialect.map_type(DomainType::String, None, None).expect("map"),
            "NVARCHAR(255)"
        );
        assert_eq!(
            dialect.map_type(DomainType::Boolean, None, None).expect("map"),
            "BIT"
        );
        assert_eq!(
            dialect.map_type(DomainType::Binary, None, None).expect("map"),
            "VARBINARY(MAX)"
        );
        assert_eq!(
            dialect
                .map_type(DomainType::Binary, Some(16), None)
                .expect("map"),
            "VARBINARY(16)"
        );
        assert_eq!(
            dialect.map_type(DomainType::Currency, None, None).expect("map"),
            "MONEY"
        );
    }

    #[test]
    fn test_create_table_with_identity() {
        let dialect = SqlServerDialect::new();
        let expr = SchemaExpression::create_table(
            "User",
            vec![
                ColumnDefinition::new("Id", DomainType::Integer)
                    .identity()
                    .primary_key(),
                ColumnDefinition::new("Email", DomainType::String),
            ],
        );
        assert_eq!(
            dialect.generate(&expr).expect("generate"),
            vec![
                "CREATE TABLE [User] ([Id] INT IDENTITY(1,1) NOT NULL PRIMARY KEY, \
                 [Email] NVARCHAR(255) NOT NULL)"
                    .to_string()
            ]
        );
    }

    #[test]
    fn test_create_column_without_column_keyword() {
        let dialect = SqlServerDialect::new();
        let expr = SchemaExpression::create_column(
            "User",
            ColumnDefinition::new("Email", DomainType::String),
        );
        assert_eq!(
            dialect.generate(&expr).expect("generate"),
            vec!["ALTER TABLE [User] ADD [Email] NVARCHAR(255) NOT NULL".to_string()]
        );
    }

    #[test]
    fn test_renames_use_sp_rename() {
        let dialect = SqlServerDialect::new();
        let table = SchemaExpression::rename_table("OldTable", "NewTable");
        assert_eq!(
            dialect.generate(&table).expect("generate"),
            vec!["EXEC sp_rename 'OldTable', 'NewTable'".to_string()]
        );

        let column = SchemaExpression::rename_column("Table", "OldColumn", "NewColumn");
        assert_eq!(
            dialect.generate(&column).expect("generate"),
            vec!["EXEC sp_rename 'Table.OldColumn', 'NewColumn', 'COLUMN'".to_string()]
        );
    }

    #[test]
    fn test_sp_rename_escapes_embedded_quotes() {
        let dialect = SqlServerDialect::new();
        let table = SchemaExpression::rename_table("O'Brien", "OBrien");
        assert_eq!(
            dialect.generate(&table).expect("generate"),
            vec!["EXEC sp_rename 'O''Brien', 'OBrien'".to_string()]
        );

        let column = SchemaExpression::rename_column("Table", "O'Clock", "Clock");
        assert_eq!(
            dialect.generate(&column).expect("generate"),
            vec!["EXEC sp_rename 'Table.O''Clock', 'Clock', 'COLUMN'".to_string()]
        );
    }

    #[test]
    fn test_delete_column() {
        let dialect = SqlServerDialect::new();
        let expr = SchemaExpression::delete_column("User", "Email");
        assert_eq!(
            dialect.generate(&expr).expect("generate"),
            vec!["ALTER TABLE [User] DROP COLUMN [Email]".to_string()]
        );
    }

    #[test]
    fn test_create_index_has_no_conditional_guard() {
        let dialect = SqlServerDialect::new();
        let expr = SchemaExpression::create_index(IndexDefinition::new(
            "User",
            "IX_User_Email",
            vec![IndexColumn::new("Email")],
        ));
        assert_eq!(
            dialect.generate(&expr).expect("generate"),
            vec!["CREATE INDEX [IX_User_Email] ON [User] ([Email])".to_string()]
        );
    }

    #[test]
    fn test_delete_index_is_table_qualified() {
        let dialect = SqlServerDialect::new();
        let expr = SchemaExpression::delete_index("User", "IX_User_Email");
        assert_eq!(
            dialect.generate(&expr).expect("generate"),
            vec!["DROP INDEX [IX_User_Email] ON [User]".to_string()]
        );
    }

    #[test]
    fn test_foreign_keys_are_supported() {
        let dialect = SqlServerDialect::new();
        let expr = SchemaExpression::delete_foreign_key("Invoice", "FK_Invoice_User");
        assert_eq!(
            dialect.generate(&expr).expect("generate"),
            vec!["ALTER TABLE [Invoice] DROP CONSTRAINT [FK_Invoice_User]".to_string()]
        );
    }
}
