//! Per-dialect, per-statement-kind identifier quoting.
//!
//! Real dialects do not quote identifiers uniformly: the same engine may
//! expect a quoted table name in an ADD COLUMN clause and a bare one in
//! CREATE TABLE. [`QuotingPolicy`] makes that an explicit table instead of
//! an accident of formatting strings.

use core::fmt;

/// The kind of schema-change statement being emitted.
///
/// Doubles as the discriminant of [`crate::SchemaExpression`] and as the
/// key into a dialect's quoting table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatementKind {
    /// CREATE TABLE.
    CreateTable,
    /// Table rename.
    RenameTable,
    /// DROP TABLE.
    DeleteTable,
    /// ADD COLUMN.
    CreateColumn,
    /// Column rename.
    RenameColumn,
    /// DROP COLUMN.
    DeleteColumn,
    /// CREATE INDEX.
    CreateIndex,
    /// DROP INDEX.
    DeleteIndex,
    /// ALTER-time foreign key creation.
    CreateForeignKey,
    /// ALTER-time foreign key removal.
    DeleteForeignKey,
}

impl StatementKind {
    /// Number of statement kinds, for table-driven policies.
    pub const COUNT: usize = 10;

    /// All statement kinds, in declaration order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::CreateTable,
        Self::RenameTable,
        Self::DeleteTable,
        Self::CreateColumn,
        Self::RenameColumn,
        Self::DeleteColumn,
        Self::CreateIndex,
        Self::DeleteIndex,
        Self::CreateForeignKey,
        Self::DeleteForeignKey,
    ];

    /// Returns the kind name as used in diagnostics.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CreateTable => "CREATE TABLE",
            Self::RenameTable => "RENAME TABLE",
            Self::DeleteTable => "DELETE TABLE",
            Self::CreateColumn => "CREATE COLUMN",
            Self::RenameColumn => "RENAME COLUMN",
            Self::DeleteColumn => "DELETE COLUMN",
            Self::CreateIndex => "CREATE INDEX",
            Self::DeleteIndex => "DELETE INDEX",
            Self::CreateForeignKey => "CREATE FOREIGN KEY",
            Self::DeleteForeignKey => "DELETE FOREIGN KEY",
        }
    }
}

impl fmt::Display for StatementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How an identifier is wrapped in emitted SQL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuoteStyle {
    /// Emit the identifier bare.
    #[default]
    None,
    /// Wrap in double quotes (ANSI).
    DoubleQuote,
    /// Wrap in square brackets (T-SQL).
    Bracket,
    /// Wrap in backticks (MySQL family).
    Backtick,
}

impl QuoteStyle {
    /// Applies the style to an identifier.
    #[must_use]
    pub fn apply(self, identifier: &str) -> String {
        match self {
            Self::None => identifier.to_string(),
            Self::DoubleQuote => format!("\"{identifier}\""),
            Self::Bracket => format!("[{identifier}]"),
            Self::Backtick => format!("`{identifier}`"),
        }
    }
}

/// A dialect's identifier quoting rules.
///
/// Table identifiers are quoted per statement kind; column and index
/// identifiers use one uniform style. Both are fixed at dialect
/// construction and never change at runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuotingPolicy {
    table_styles: [QuoteStyle; StatementKind::COUNT],
    column_style: QuoteStyle,
}

impl QuotingPolicy {
    /// A policy that quotes every identifier the same way.
    #[must_use]
    pub const fn uniform(style: QuoteStyle) -> Self {
        Self {
            table_styles: [style; StatementKind::COUNT],
            column_style: style,
        }
    }

    /// Overrides the table style for one statement kind.
    #[must_use]
    pub const fn with_table_style(mut self, kind: StatementKind, style: QuoteStyle) -> Self {
        self.table_styles[kind as usize] = style;
        self
    }

    /// Returns the table style used for the given statement kind.
    #[must_use]
    pub const fn table_style(&self, kind: StatementKind) -> QuoteStyle {
        self.table_styles[kind as usize]
    }

    /// Quotes a table identifier for the given statement kind.
    #[must_use]
    pub fn table(&self, kind: StatementKind, identifier: &str) -> String {
        self.table_styles[kind as usize].apply(identifier)
    }

    /// Quotes a column or index identifier.
    #[must_use]
    pub fn column(&self, identifier: &str) -> String {
        self.column_style.apply(identifier)
    }
}
