//! Dialect-specific DDL generation.
//!
//! Different databases have different SQL syntax and capability sets for
//! DDL operations. Each dialect is an immutable unit value implementing
//! [`Dialect`]; the trait's default methods carry the emission rules most
//! engines share, and each dialect overrides where its syntax diverges or
//! a capability is missing.

mod postgres;
mod sqlite;
mod sqlserver;

pub use postgres::PostgresDialect;
pub use sqlite::SqliteDialect;
pub use sqlserver::SqlServerDialect;

use tracing::{debug, warn};

use crate::column::ColumnDefinition;
use crate::error::{GenerateError, Result};
use crate::expression::{
    CreateColumnExpr, CreateForeignKeyExpr, CreateIndexExpr, CreateTableExpr, DeleteColumnExpr,
    DeleteForeignKeyExpr, DeleteIndexExpr, DeleteTableExpr, Direction, RenameColumnExpr,
    RenameTableExpr, SchemaExpression,
};
use crate::quote::{QuotingPolicy, StatementKind};
use crate::types::DomainType;

/// The DDL operations a dialect can express at ALTER time.
///
/// An explicit immutable value per dialect; the default emission rules
/// consult it before emitting, so an unsupported operation is rejected
/// instead of producing invalid or semantically wrong SQL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    /// Whether the dialect has a native column rename.
    pub rename_column: bool,
    /// Whether the dialect supports ALTER TABLE ... DROP COLUMN.
    pub drop_column: bool,
    /// Whether foreign keys can be added/dropped after table creation.
    pub alter_foreign_keys: bool,
    /// Whether CREATE INDEX accepts an IF NOT EXISTS guard.
    pub conditional_create_index: bool,
}

/// Trait for dialect-specific DDL generation.
///
/// Implementations are stateless: [`generate`](Self::generate) is a pure
/// function of the dialect configuration and the expression, so concurrent
/// use needs no synchronization.
pub trait Dialect: Send + Sync {
    /// Returns the dialect name.
    fn name(&self) -> &'static str;

    /// Returns the dialect's capability set.
    fn capabilities(&self) -> Capabilities;

    /// Returns the dialect's identifier quoting policy.
    fn quoting(&self) -> &'static QuotingPolicy;

    /// Maps a domain type to this dialect's SQL type token.
    ///
    /// `size` and `precision` parameterize sized types; the dialect default
    /// size applies when a sized type carries none.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::UnsupportedType`] when the domain type has
    /// no mapping in this dialect.
    fn map_type(
        &self,
        domain_type: DomainType,
        size: Option<u32>,
        precision: Option<u32>,
    ) -> Result<String>;

    /// Returns the inline autoincrement keyword, with leading separator
    /// (e.g. `" AUTOINCREMENT"`), or `""` when the dialect expresses
    /// identity some other way.
    fn autoincrement_keyword(&self) -> &'static str;

    /// Whether an identity column must also be the primary key.
    fn identity_requires_primary_key(&self) -> bool {
        false
    }

    /// Compiles one schema expression to an ordered statement sequence.
    ///
    /// Most expressions compile to a single statement; capability
    /// workarounds may yield several. Identical input always yields
    /// identical output.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::MalformedExpression`] before any dialect
    /// logic runs, and [`GenerateError::UnsupportedOperation`] /
    /// [`GenerateError::UnsupportedType`] from the emission rules. No
    /// partial statement is ever returned.
    fn generate(&self, expression: &SchemaExpression) -> Result<Vec<String>> {
        expression.validate()?;
        debug!(
            dialect = self.name(),
            kind = %expression.kind(),
            "compiling schema expression"
        );
        match expression {
            SchemaExpression::CreateTable(e) => Ok(vec![self.create_table(e)?]),
            SchemaExpression::RenameTable(e) => Ok(vec![self.rename_table(e)?]),
            SchemaExpression::DeleteTable(e) => Ok(vec![self.delete_table(e)?]),
            SchemaExpression::CreateColumn(e) => Ok(vec![self.create_column(e)?]),
            SchemaExpression::RenameColumn(e) => self.rename_column(e),
            SchemaExpression::DeleteColumn(e) => self.delete_column(e),
            SchemaExpression::CreateIndex(e) => Ok(vec![self.create_index(e)?]),
            SchemaExpression::DeleteIndex(e) => Ok(vec![self.delete_index(e)?]),
            SchemaExpression::CreateForeignKey(e) => Ok(vec![self.create_foreign_key(e)?]),
            SchemaExpression::DeleteForeignKey(e) => Ok(vec![self.delete_foreign_key(e)?]),
        }
    }

    /// Generates SQL for CREATE TABLE.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::UnsupportedType`] when any column's type
    /// has no mapping in this dialect.
    fn create_table(&self, expr: &CreateTableExpr) -> Result<String> {
        let columns = expr
            .columns
            .iter()
            .map(|col| self.column_sql(col))
            .collect::<Result<Vec<_>>>()?;
        Ok(format!(
            "CREATE TABLE {} ({})",
            self.quoting().table(StatementKind::CreateTable, &expr.table),
            columns.join(", ")
        ))
    }

    /// Generates SQL for renaming a table.
    ///
    /// # Errors
    ///
    /// The default emission is infallible; overrides may fail.
    fn rename_table(&self, expr: &RenameTableExpr) -> Result<String> {
        Ok(format!(
            "ALTER TABLE {} RENAME TO {}",
            self.quoting()
                .table(StatementKind::RenameTable, &expr.old_name),
            self.quoting()
                .table(StatementKind::RenameTable, &expr.new_name)
        ))
    }

    /// Generates SQL for DROP TABLE.
    ///
    /// # Errors
    ///
    /// The default emission is infallible; overrides may fail.
    fn delete_table(&self, expr: &DeleteTableExpr) -> Result<String> {
        Ok(format!(
            "DROP TABLE {}",
            self.quoting().table(StatementKind::DeleteTable, &expr.table)
        ))
    }

    /// Generates SQL for ADD COLUMN.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::UnsupportedType`] when the column's type
    /// has no mapping in this dialect.
    fn create_column(&self, expr: &CreateColumnExpr) -> Result<String> {
        Ok(format!(
            "ALTER TABLE {} ADD COLUMN {}",
            self.quoting().table(StatementKind::CreateColumn, &expr.table),
            self.column_sql(&expr.column)?
        ))
    }

    /// Generates SQL for renaming a column.
    ///
    /// Dialects without native rename either override with a documented
    /// multi-statement workaround or inherit this rejection. A data
    /// mutation is never a substitute for a schema rename.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::UnsupportedOperation`] when the dialect
    /// cannot rename columns.
    fn rename_column(&self, expr: &RenameColumnExpr) -> Result<Vec<String>> {
        if !self.capabilities().rename_column {
            return Err(self.unsupported(StatementKind::RenameColumn));
        }
        Ok(vec![format!(
            "ALTER TABLE {} RENAME COLUMN {} TO {}",
            self.quoting().table(StatementKind::RenameColumn, &expr.table),
            self.quoting().column(&expr.old_name),
            self.quoting().column(&expr.new_name)
        )])
    }

    /// Generates SQL for DROP COLUMN.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::UnsupportedOperation`] when the dialect
    /// cannot drop columns.
    fn delete_column(&self, expr: &DeleteColumnExpr) -> Result<Vec<String>> {
        if !self.capabilities().drop_column {
            return Err(self.unsupported(StatementKind::DeleteColumn));
        }
        Ok(vec![format!(
            "ALTER TABLE {} DROP COLUMN {}",
            self.quoting().table(StatementKind::DeleteColumn, &expr.table),
            self.quoting().column(&expr.column)
        )])
    }

    /// Generates SQL for CREATE INDEX.
    ///
    /// The IF NOT EXISTS guard appears only on dialects that support it;
    /// others still create the index unconditionally.
    ///
    /// # Errors
    ///
    /// The default emission is infallible; overrides may fail.
    fn create_index(&self, expr: &CreateIndexExpr) -> Result<String> {
        let index = &expr.index;
        let mut sql = String::from("CREATE ");
        if index.unique {
            sql.push_str("UNIQUE ");
        }
        sql.push_str("INDEX ");
        if self.capabilities().conditional_create_index {
            sql.push_str("IF NOT EXISTS ");
        }
        sql.push_str(&self.quoting().column(&index.name));
        sql.push_str(" ON ");
        sql.push_str(&self.quoting().table(StatementKind::CreateIndex, &index.table));
        sql.push_str(" (");
        let columns: Vec<String> = index
            .columns
            .iter()
            .map(|col| {
                let name = self.quoting().column(&col.name);
                match col.direction {
                    Direction::Asc => name,
                    Direction::Desc => format!("{name} DESC"),
                }
            })
            .collect();
        sql.push_str(&columns.join(", "));
        sql.push(')');
        Ok(sql)
    }

    /// Generates SQL for DROP INDEX.
    ///
    /// # Errors
    ///
    /// The default emission is infallible; overrides may fail.
    fn delete_index(&self, expr: &DeleteIndexExpr) -> Result<String> {
        Ok(format!(
            "DROP INDEX {}",
            self.quoting().column(&expr.index)
        ))
    }

    /// Generates SQL for adding a foreign key at ALTER time.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::UnsupportedOperation`] when the dialect
    /// cannot alter foreign keys.
    fn create_foreign_key(&self, expr: &CreateForeignKeyExpr) -> Result<String> {
        if !self.capabilities().alter_foreign_keys {
            return Err(self.unsupported(StatementKind::CreateForeignKey));
        }
        let fk = &expr.foreign_key;
        let mut sql = format!(
            "ALTER TABLE {} ADD CONSTRAINT {} FOREIGN KEY (",
            self.quoting().table(StatementKind::CreateForeignKey, &fk.table),
            self.quoting().column(&fk.name)
        );
        let columns: Vec<String> = fk
            .columns
            .iter()
            .map(|col| self.quoting().column(col))
            .collect();
        sql.push_str(&columns.join(", "));
        sql.push_str(") REFERENCES ");
        sql.push_str(
            &self
                .quoting()
                .table(StatementKind::CreateForeignKey, &fk.references_table),
        );
        sql.push_str(" (");
        let ref_columns: Vec<String> = fk
            .references_columns
            .iter()
            .map(|col| self.quoting().column(col))
            .collect();
        sql.push_str(&ref_columns.join(", "));
        sql.push(')');
        if let Some(action) = fk.on_delete {
            sql.push_str(" ON DELETE ");
            sql.push_str(action.as_sql());
        }
        if let Some(action) = fk.on_update {
            sql.push_str(" ON UPDATE ");
            sql.push_str(action.as_sql());
        }
        Ok(sql)
    }

    /// Generates SQL for dropping a foreign key at ALTER time.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::UnsupportedOperation`] when the dialect
    /// cannot alter foreign keys.
    fn delete_foreign_key(&self, expr: &DeleteForeignKeyExpr) -> Result<String> {
        if !self.capabilities().alter_foreign_keys {
            return Err(self.unsupported(StatementKind::DeleteForeignKey));
        }
        Ok(format!(
            "ALTER TABLE {} DROP CONSTRAINT {}",
            self.quoting()
                .table(StatementKind::DeleteForeignKey, &expr.table),
            self.quoting().column(&expr.name)
        ))
    }

    /// Generates the column definition fragment shared by CREATE TABLE
    /// and ADD COLUMN.
    ///
    /// An identity primary key emits the dialect's inline autoincrement
    /// idiom inside the definition, never as a trailing constraint.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::UnsupportedType`] for an unmapped type and
    /// [`GenerateError::MalformedExpression`] for an identity column the
    /// dialect requires to be the primary key.
    fn column_sql(&self, col: &ColumnDefinition) -> Result<String> {
        if col.is_identity && !col.is_primary_key && self.identity_requires_primary_key() {
            return Err(GenerateError::MalformedExpression(format!(
                "identity column '{}' must be the primary key on {}",
                col.name,
                self.name()
            )));
        }
        let mut sql = format!(
            "{} {}",
            self.quoting().column(&col.name),
            self.map_type(col.domain_type, col.size, col.precision)?
        );
        if !col.is_nullable {
            sql.push_str(" NOT NULL");
        }
        if col.is_primary_key {
            sql.push_str(" PRIMARY KEY");
            if col.is_identity {
                sql.push_str(self.autoincrement_keyword());
            }
        } else if col.is_identity {
            sql.push_str(self.autoincrement_keyword());
        }
        if let Some(ref default) = col.default {
            sql.push_str(" DEFAULT ");
            sql.push_str(&default.to_sql());
        }
        Ok(sql)
    }

    /// Builds the rejection error for an expression kind this dialect
    /// cannot express.
    fn unsupported(&self, kind: StatementKind) -> GenerateError {
        warn!(
            dialect = self.name(),
            kind = %kind,
            "no emission rule for this dialect"
        );
        GenerateError::UnsupportedOperation {
            dialect: self.name(),
            kind,
        }
    }
}

/// Compiles a batch of expressions, each independently.
///
/// One failing expression never affects its neighbors; input order is
/// preserved. Reordering for dependency reasons is the caller's job.
pub fn generate_batch(
    dialect: &dyn Dialect,
    expressions: &[SchemaExpression],
) -> Vec<Result<Vec<String>>> {
    expressions
        .iter()
        .map(|expression| dialect.generate(expression))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expression::{IndexColumn, IndexDefinition};

    #[test]
    fn test_dispatcher_validates_before_dialect_logic() {
        // Here the dialect would reject the kind, but the malformed field
        // wins because validation runs first.
        let dialect = SqliteDialect::new();
        let expr = SchemaExpression::rename_column("", "OldColumn", "NewColumn");
        assert!(matches!(
            dialect.generate(&expr),
            Err(GenerateError::MalformedExpression(_))
        ));
    }

    #[test]
    fn test_batch_failures_are_independent() {
        let dialect = SqliteDialect::new();
        let expressions = vec![
            SchemaExpression::delete_table("Table"),
            // Rejected: SQLite has no native column rename.
            SchemaExpression::rename_column("Table", "OldColumn", "NewColumn"),
            SchemaExpression::rename_table("OldTable", "NewTable"),
        ];
        let results = generate_batch(&dialect, &expressions);
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].as_deref(), Ok(&["DROP TABLE Table".to_string()][..]));
        assert!(matches!(
            results[1],
            Err(GenerateError::UnsupportedOperation { .. })
        ));
        assert_eq!(
            results[2].as_deref(),
            Ok(&["ALTER TABLE OldTable RENAME TO NewTable".to_string()][..])
        );
    }

    #[test]
    fn test_generate_is_deterministic() {
        let dialect = PostgresDialect::new();
        let expr = SchemaExpression::create_index(
            IndexDefinition::new(
                "User",
                "IX_User_Email",
                vec![IndexColumn::new("Email"), IndexColumn::descending("Id")],
            )
            .unique(),
        );
        let first = dialect.generate(&expr).expect("generate");
        for _ in 0..3 {
            assert_eq!(dialect.generate(&expr).expect("generate"), first);
        }
    }

    #[test]
    fn test_no_statement_emitted_on_unmapped_type() {
        // The failing column poisons the whole CREATE TABLE, not just its
        // own fragment.
        let dialect = SqliteDialect::new();
        let expr = SchemaExpression::create_table(
            "Ledger",
            vec![
                ColumnDefinition::new("Id", DomainType::Integer).primary_key(),
                ColumnDefinition::new("Amount", DomainType::Currency),
            ],
        );
        assert!(matches!(
            dialect.generate(&expr),
            Err(GenerateError::UnsupportedType {
                dialect: "sqlite",
                domain_type: DomainType::Currency,
            })
        ));
    }
}
