//! # ddlgen-core
//!
//! A dialect-aware DDL generation engine for schema migrations.
//!
//! The engine compiles abstract schema-change expressions (create/rename/
//! delete table, column, index, foreign key) into SQL text for a target
//! database, applying per-dialect type mapping, identifier quoting, and
//! capability gating. Dialects that cannot express an operation reject it
//! instead of emitting invalid or semantically wrong SQL.
//!
//! Building expressions (the fluent migration DSL) and executing the
//! returned statements (the migration runner) live outside this crate;
//! the engine itself performs no I/O and keeps no state between calls.
//!
//! ```rust
//! use ddlgen_core::{Dialect, SchemaExpression, SqliteDialect};
//!
//! let dialect = SqliteDialect::new();
//! let sql = dialect
//!     .generate(&SchemaExpression::rename_table("OldTable", "NewTable"))
//!     .expect("sqlite supports table renames");
//! assert_eq!(sql, vec!["ALTER TABLE OldTable RENAME TO NewTable".to_string()]);
//! ```
//!
//! Capability gating is explicit. SQLite, for example, cannot add a
//! foreign key after table creation:
//!
//! ```rust
//! use ddlgen_core::{Dialect, GenerateError, SchemaExpression, SqliteDialect};
//!
//! let dialect = SqliteDialect::new();
//! let err = dialect
//!     .generate(&SchemaExpression::delete_foreign_key("Invoice", "FK_Invoice_User"))
//!     .unwrap_err();
//! assert!(matches!(err, GenerateError::UnsupportedOperation { .. }));
//! ```

pub mod column;
pub mod dialect;
pub mod error;
pub mod expression;
pub mod quote;
pub mod types;

pub use column::{ColumnDefinition, DefaultValue, ForeignKeyAction};
pub use dialect::{
    Capabilities, Dialect, PostgresDialect, SqlServerDialect, SqliteDialect, generate_batch,
};
pub use error::{GenerateError, Result};
pub use expression::{
    CreateColumnExpr, CreateForeignKeyExpr, CreateIndexExpr, CreateTableExpr, DeleteColumnExpr,
    DeleteForeignKeyExpr, DeleteIndexExpr, DeleteTableExpr, Direction, ForeignKeyDefinition,
    IndexColumn, IndexDefinition, RenameColumnExpr, RenameTableExpr, SchemaExpression,
};
pub use quote::{QuoteStyle, QuotingPolicy, StatementKind};
pub use types::DomainType;
