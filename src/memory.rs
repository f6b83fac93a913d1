//! `MemoryBatch` — a plain-Rust columnar batch with the same contract as a `DuckDB` data chunk.
//!
//! Columns have a declared [`ColumnType`], every column holds `capacity` rows,
//! and every row starts out `NULL`. Module code can drive
//! [`set_cell`](crate::cell::set_cell) against it without a live engine, and
//! read the result back through [`MemoryBatch::get`].
//!
//! Unlike an engine-backed batch, out-of-range indices panic instead of
//! corrupting memory.

use crate::cell::{ColumnType, ColumnarBatch, Scalar};
use crate::error::CellError;

#[derive(Debug, Clone)]
struct MemoryColumn {
    ty: ColumnType,
    /// `None` is a `NULL` row.
    rows: Vec<Option<Scalar<'static>>>,
}

/// Fixed-capacity columnar batch held in Rust memory.
#[derive(Debug, Clone)]
pub struct MemoryBatch {
    columns: Vec<MemoryColumn>,
    capacity: usize,
}

impl MemoryBatch {
    /// Creates a batch with one column per entry of `types`, all rows `NULL`.
    #[must_use]
    pub fn new(types: &[ColumnType], capacity: usize) -> Self {
        let columns = types
            .iter()
            .map(|&ty| MemoryColumn {
                ty,
                rows: vec![None; capacity],
            })
            .collect();
        Self { columns, capacity }
    }

    /// Reads (`column`, `row`); `None` means the cell is `NULL`.
    pub fn get(&self, column: usize, row: usize) -> Option<&Scalar<'static>> {
        self.columns[column].rows[row].as_ref()
    }

    /// Declared column types in column order.
    pub fn column_types(&self) -> impl Iterator<Item = ColumnType> + '_ {
        self.columns.iter().map(|c| c.ty)
    }

    /// Number of non-`NULL` cells across all columns.
    pub fn valid_count(&self) -> usize {
        self.columns
            .iter()
            .map(|c| c.rows.iter().filter(|r| r.is_some()).count())
            .sum()
    }

    /// Resets every cell to `NULL`, keeping types and capacity.
    pub fn reset(&mut self) {
        for column in &mut self.columns {
            column.rows.fill(None);
        }
    }
}

impl ColumnarBatch for MemoryBatch {
    fn column_count(&self) -> usize {
        self.columns.len()
    }

    fn capacity(&self) -> usize {
        self.capacity
    }

    fn column_type(&self, column: usize) -> Result<ColumnType, CellError> {
        Ok(self.columns[column].ty)
    }

    fn write(&mut self, column: usize, row: usize, value: Scalar<'_>) {
        let target = &mut self.columns[column];
        if matches!(value, Scalar::Null) {
            target.rows[row] = None;
            return;
        }
        debug_assert_eq!(
            value.column_type(),
            Some(target.ty),
            "value type does not match column {column}"
        );
        target.rows[row] = Some(value.into_owned());
    }

    fn set_null(&mut self, column: usize, row: usize) {
        self.columns[column].rows[row] = None;
    }
}
