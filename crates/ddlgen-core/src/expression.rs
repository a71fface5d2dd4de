//! Schema-change expressions.
//!
//! Expressions are built once by the surrounding migration tooling, handed
//! to a dialect for a single synchronous compilation, and discarded. They
//! are plain immutable values; the engine never mutates them.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::column::{ColumnDefinition, ForeignKeyAction};
use crate::error::{GenerateError, Result};
use crate::quote::StatementKind;

/// Sort direction of one index column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Direction {
    /// Ascending (default, emits no keyword).
    #[default]
    Asc,
    /// Descending.
    Desc,
}

/// One column within an index, with its sort direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexColumn {
    /// Column name.
    pub name: String,
    /// Sort direction.
    pub direction: Direction,
}

impl IndexColumn {
    /// Creates an ascending index column.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            direction: Direction::Asc,
        }
    }

    /// Creates a descending index column.
    #[must_use]
    pub fn descending(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            direction: Direction::Desc,
        }
    }
}

/// An index over one or more columns of a table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexDefinition {
    /// Table the index belongs to.
    pub table: String,
    /// Index name.
    pub name: String,
    /// Indexed columns, in order. Must be non-empty.
    pub columns: Vec<IndexColumn>,
    /// Whether the index enforces uniqueness.
    pub unique: bool,
}

impl IndexDefinition {
    /// Creates a non-unique index definition.
    #[must_use]
    pub fn new(table: impl Into<String>, name: impl Into<String>, columns: Vec<IndexColumn>) -> Self {
        Self {
            table: table.into(),
            name: name.into(),
            columns,
            unique: false,
        }
    }

    /// Marks the index as unique.
    #[must_use]
    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }
}

/// A named foreign key constraint between two tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForeignKeyDefinition {
    /// Constraint name.
    pub name: String,
    /// Source table.
    pub table: String,
    /// Source columns.
    pub columns: Vec<String>,
    /// Referenced table.
    pub references_table: String,
    /// Referenced columns. Must match `columns` in length.
    pub references_columns: Vec<String>,
    /// ON DELETE action.
    pub on_delete: Option<ForeignKeyAction>,
    /// ON UPDATE action.
    pub on_update: Option<ForeignKeyAction>,
}

/// Create table expression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateTableExpr {
    /// Table name.
    pub table: String,
    /// Column definitions. Must be non-empty with unique names.
    pub columns: Vec<ColumnDefinition>,
}

/// Rename table expression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenameTableExpr {
    /// Current table name.
    pub old_name: String,
    /// New table name.
    pub new_name: String,
}

/// Delete table expression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteTableExpr {
    /// Table name.
    pub table: String,
}

/// Create column expression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateColumnExpr {
    /// Table name.
    pub table: String,
    /// Column definition.
    pub column: ColumnDefinition,
}

/// Rename column expression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenameColumnExpr {
    /// Table name.
    pub table: String,
    /// Current column name.
    pub old_name: String,
    /// New column name.
    pub new_name: String,
}

/// Delete column expression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteColumnExpr {
    /// Table name.
    pub table: String,
    /// Column name.
    pub column: String,
}

/// Create index expression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateIndexExpr {
    /// Index definition.
    pub index: IndexDefinition,
}

/// Delete index expression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteIndexExpr {
    /// Table the index belongs to (required by some dialects).
    pub table: String,
    /// Index name.
    pub index: String,
}

/// Create foreign key expression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateForeignKeyExpr {
    /// Foreign key definition.
    pub foreign_key: ForeignKeyDefinition,
}

/// Delete foreign key expression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteForeignKeyExpr {
    /// Table the constraint belongs to.
    pub table: String,
    /// Constraint name.
    pub name: String,
}

/// All schema-change expressions the engine can compile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SchemaExpression {
    /// Create a new table.
    CreateTable(CreateTableExpr),
    /// Rename a table.
    RenameTable(RenameTableExpr),
    /// Drop an existing table.
    DeleteTable(DeleteTableExpr),
    /// Add a column to an existing table.
    CreateColumn(CreateColumnExpr),
    /// Rename a column.
    RenameColumn(RenameColumnExpr),
    /// Drop a column from a table.
    DeleteColumn(DeleteColumnExpr),
    /// Create an index.
    CreateIndex(CreateIndexExpr),
    /// Drop an index.
    DeleteIndex(DeleteIndexExpr),
    /// Add a foreign key constraint.
    CreateForeignKey(CreateForeignKeyExpr),
    /// Drop a foreign key constraint.
    DeleteForeignKey(DeleteForeignKeyExpr),
}

impl SchemaExpression {
    /// Creates a create table expression.
    #[must_use]
    pub fn create_table(table: impl Into<String>, columns: Vec<ColumnDefinition>) -> Self {
        Self::CreateTable(CreateTableExpr {
            table: table.into(),
            columns,
        })
    }

    /// Creates a rename table expression.
    #[must_use]
    pub fn rename_table(old_name: impl Into<String>, new_name: impl Into<String>) -> Self {
        Self::RenameTable(RenameTableExpr {
            old_name: old_name.into(),
            new_name: new_name.into(),
        })
    }

    /// Creates a delete table expression.
    #[must_use]
    pub fn delete_table(table: impl Into<String>) -> Self {
        Self::DeleteTable(DeleteTableExpr {
            table: table.into(),
        })
    }

    /// Creates a create column expression.
    #[must_use]
    pub fn create_column(table: impl Into<String>, column: ColumnDefinition) -> Self {
        Self::CreateColumn(CreateColumnExpr {
            table: table.into(),
            column,
        })
    }

    /// Creates a rename column expression.
    #[must_use]
    pub fn rename_column(
        table: impl Into<String>,
        old_name: impl Into<String>,
        new_name: impl Into<String>,
    ) -> Self {
        Self::RenameColumn(RenameColumnExpr {
            table: table.into(),
            old_name: old_name.into(),
            new_name: new_name.into(),
        })
    }

    /// Creates a delete column expression.
    #[must_use]
    pub fn delete_column(table: impl Into<String>, column: impl Into<String>) -> Self {
        Self::DeleteColumn(DeleteColumnExpr {
            table: table.into(),
            column: column.into(),
        })
    }

    /// Creates a create index expression.
    #[must_use]
    pub fn create_index(index: IndexDefinition) -> Self {
        Self::CreateIndex(CreateIndexExpr { index })
    }

    /// Creates a delete index expression.
    #[must_use]
    pub fn delete_index(table: impl Into<String>, index: impl Into<String>) -> Self {
        Self::DeleteIndex(DeleteIndexExpr {
            table: table.into(),
            index: index.into(),
        })
    }

    /// Creates a create foreign key expression.
    #[must_use]
    pub fn create_foreign_key(foreign_key: ForeignKeyDefinition) -> Self {
        Self::CreateForeignKey(CreateForeignKeyExpr { foreign_key })
    }

    /// Creates a delete foreign key expression.
    #[must_use]
    pub fn delete_foreign_key(table: impl Into<String>, name: impl Into<String>) -> Self {
        Self::DeleteForeignKey(DeleteForeignKeyExpr {
            table: table.into(),
            name: name.into(),
        })
    }

    /// Returns the statement kind this expression compiles to.
    #[must_use]
    pub const fn kind(&self) -> StatementKind {
        match self {
            Self::CreateTable(_) => StatementKind::CreateTable,
            Self::RenameTable(_) => StatementKind::RenameTable,
            Self::DeleteTable(_) => StatementKind::DeleteTable,
            Self::CreateColumn(_) => StatementKind::CreateColumn,
            Self::RenameColumn(_) => StatementKind::RenameColumn,
            Self::DeleteColumn(_) => StatementKind::DeleteColumn,
            Self::CreateIndex(_) => StatementKind::CreateIndex,
            Self::DeleteIndex(_) => StatementKind::DeleteIndex,
            Self::CreateForeignKey(_) => StatementKind::CreateForeignKey,
            Self::DeleteForeignKey(_) => StatementKind::DeleteForeignKey,
        }
    }

    /// Validates required fields before any dialect-specific logic runs.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::MalformedExpression`] for empty names,
    /// empty column lists, duplicate CreateTable column names, or
    /// mismatched foreign key column counts.
    pub fn validate(&self) -> Result<()> {
        match self {
            Self::CreateTable(e) => {
                non_empty(&e.table, "table name")?;
                if e.columns.is_empty() {
                    return Err(GenerateError::MalformedExpression(format!(
                        "CREATE TABLE {} has an empty column list",
                        e.table
                    )));
                }
                let mut seen = HashSet::new();
                for col in &e.columns {
                    non_empty(&col.name, "column name")?;
                    if !seen.insert(col.name.as_str()) {
                        return Err(GenerateError::MalformedExpression(format!(
                            "duplicate column name '{}' in CREATE TABLE {}",
                            col.name, e.table
                        )));
                    }
                }
                // Inline PRIMARY KEY flags cannot express a composite key.
                if e.columns.iter().filter(|c| c.is_primary_key).count() > 1 {
                    return Err(GenerateError::MalformedExpression(format!(
                        "CREATE TABLE {} marks more than one column as primary key",
                        e.table
                    )));
                }
                Ok(())
            }
            Self::RenameTable(e) => {
                non_empty(&e.old_name, "table name")?;
                non_empty(&e.new_name, "new table name")
            }
            Self::DeleteTable(e) => non_empty(&e.table, "table name"),
            Self::CreateColumn(e) => {
                non_empty(&e.table, "table name")?;
                non_empty(&e.column.name, "column name")
            }
            Self::RenameColumn(e) => {
                non_empty(&e.table, "table name")?;
                non_empty(&e.old_name, "column name")?;
                non_empty(&e.new_name, "new column name")
            }
            Self::DeleteColumn(e) => {
                non_empty(&e.table, "table name")?;
                non_empty(&e.column, "column name")
            }
            Self::CreateIndex(e) => {
                non_empty(&e.index.table, "table name")?;
                non_empty(&e.index.name, "index name")?;
                if e.index.columns.is_empty() {
                    return Err(GenerateError::MalformedExpression(format!(
                        "index {} has an empty column list",
                        e.index.name
                    )));
                }
                for col in &e.index.columns {
                    non_empty(&col.name, "index column name")?;
                }
                Ok(())
            }
            Self::DeleteIndex(e) => {
                non_empty(&e.table, "table name")?;
                non_empty(&e.index, "index name")
            }
            Self::CreateForeignKey(e) => {
                let fk = &e.foreign_key;
                non_empty(&fk.name, "constraint name")?;
                non_empty(&fk.table, "table name")?;
                non_empty(&fk.references_table, "referenced table name")?;
                if fk.columns.is_empty() || fk.references_columns.is_empty() {
                    return Err(GenerateError::MalformedExpression(format!(
                        "foreign key {} has an empty column list",
                        fk.name
                    )));
                }
                if fk.columns.len() != fk.references_columns.len() {
                    return Err(GenerateError::MalformedExpression(format!(
                        "foreign key {} has {} source columns but {} referenced columns",
                        fk.name,
                        fk.columns.len(),
                        fk.references_columns.len()
                    )));
                }
                Ok(())
            }
            Self::DeleteForeignKey(e) => {
                non_empty(&e.table, "table name")?;
                non_empty(&e.name, "constraint name")
            }
        }
    }
}

fn non_empty(value: &str, what: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(GenerateError::MalformedExpression(format!(
            "{what} must not be empty"
        )));
    }
    Ok(())
}

impl From<CreateTableExpr> for SchemaExpression {
    fn from(expr: CreateTableExpr) -> Self {
        Self::CreateTable(expr)
    }
}

impl From<RenameTableExpr> for SchemaExpression {
    fn from(expr: RenameTableExpr) -> Self {
        Self::RenameTable(expr)
    }
}

impl From<DeleteTableExpr> for SchemaExpression {
    fn from(expr: DeleteTableExpr) -> Self {
        Self::DeleteTable(expr)
    }
}

impl From<CreateColumnExpr> for SchemaExpression {
    fn from(expr: CreateColumnExpr) -> Self {
        Self::CreateColumn(expr)
    }
}

impl From<RenameColumnExpr> for SchemaExpression {
    fn from(expr: RenameColumnExpr) -> Self {
        Self::RenameColumn(expr)
    }
}

impl From<DeleteColumnExpr> for SchemaExpression {
    fn from(expr: DeleteColumnExpr) -> Self {
        Self::DeleteColumn(expr)
    }
}

impl From<CreateIndexExpr> for SchemaExpression {
    fn from(expr: CreateIndexExpr) -> Self {
        Self::CreateIndex(expr)
    }
}

impl From<DeleteIndexExpr> for SchemaExpression {
    fn from(expr: DeleteIndexExpr) -> Self {
        Self::DeleteIndex(expr)
    }
}

impl From<CreateForeignKeyExpr> for SchemaExpression {
    fn from(expr: CreateForeignKeyExpr) -> Self {
        Self::CreateForeignKey(expr)
    }
}

impl From<DeleteForeignKeyExpr> for SchemaExpression {
    fn from(expr: DeleteForeignKeyExpr) -> Self {
        Self::DeleteForeignKey(expr)
    }
}
