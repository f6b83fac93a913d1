//! Error types and the fatal-abort path.
//!
//! Nothing here crosses the C boundary as a value. [`CellError`] is only
//! returned by the validating setter; the raw setter turns the one error it
//! can detect into [`fatal`].

use crate::cell::ColumnType;
use thiserror::Error;

/// Why a cell write was rejected before touching the batch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CellError {
    /// Column index is not below the batch's column count.
    #[error("column {column} out of range for a batch with {column_count} columns")]
    ColumnOutOfRange {
        /// Requested column.
        column: usize,
        /// Columns in the batch.
        column_count: usize,
    },

    /// Row index is not below the batch's row capacity.
    #[error("row {row} out of range for a batch with capacity {capacity}")]
    RowOutOfRange {
        /// Requested row.
        row: usize,
        /// Rows the batch can hold.
        capacity: usize,
    },

    /// The value's declared type differs from the column's.
    #[error(
        "column {column} expects {expected}, value has type {}",
        .found.map_or("<unsupported>", ColumnType::sql_name)
    )]
    TypeMismatch {
        /// Target column.
        column: usize,
        /// Column's declared type.
        expected: ColumnType,
        /// Value's declared type, `None` if it has no marshalling rule.
        found: Option<ColumnType>,
    },

    /// The column's type has no marshalling rule in the bridge.
    #[error("column {column} has unsupported DuckDB type id {type_id}")]
    UnsupportedType {
        /// Target column.
        column: usize,
        /// Raw `duckdb_type` of the column.
        type_id: libduckdb_sys::duckdb_type,
    },
}

/// Why a module's version string is not a publishable identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum VersionError {
    /// The string is empty.
    #[error("version identifier is empty")]
    Empty,

    /// The bytes are not UTF-8.
    #[error("version identifier is not valid UTF-8")]
    NotUtf8,

    /// Leading or trailing whitespace.
    #[error("version identifier has surrounding whitespace")]
    SurroundingWhitespace,
}

/// Logs a contract violation and aborts the process.
///
/// There is no error channel across the extension boundary, so a write that
/// cannot land must not return.
#[cold]
pub fn fatal(reason: &dyn std::fmt::Display) -> ! {
    tracing::error!(%reason, "contract violation at extension boundary");
    eprintln!("compact_execlog: {reason}");
    std::process::abort()
}
