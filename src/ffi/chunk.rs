//! Cell writes into a live `DuckDB` data chunk.

use crate::cell::{ColumnType, ColumnarBatch, Scalar};
use crate::error::CellError;
use crate::ffi::types::column_type_from_id;
use crate::handle::Batch;
use libduckdb_sys::*;
use std::cell::OnceCell;

impl Batch {
    // SAFETY: the handle's constructor guarantees a live chunk; the column
    // index is the caller's precondition.
    #[inline]
    unsafe fn vector(self, column: usize) -> duckdb_vector {
        duckdb_data_chunk_get_vector(self.as_chunk(), column as idx_t)
    }
}

// SAFETY: `data` is the vector's data buffer, sized for `duckdb_vector_size()`
// rows of `T`. `row` is below that capacity by the setter's precondition.
#[inline]
unsafe fn write_fixed<T>(data: *mut std::ffi::c_void, row: usize, value: T) {
    data.cast::<T>().add(row).write(value);
}

impl ColumnarBatch for Batch {
    fn column_count(&self) -> usize {
        // SAFETY: live chunk per handle provenance.
        unsafe { duckdb_data_chunk_get_column_count(self.as_chunk()) as usize }
    }

    fn capacity(&self) -> usize {
        // Every DuckDB vector is allocated for the standard vector size.
        unsafe { duckdb_vector_size() as usize }
    }

    fn column_type(&self, column: usize) -> Result<ColumnType, CellError> {
        // SAFETY: the logical type returned for the vector is owned by us and
        // destroyed before returning.
        unsafe {
            let mut logical = duckdb_vector_get_column_type(self.vector(column));
            let type_id = duckdb_get_type_id(logical);
            duckdb_destroy_logical_type(&mut logical);
            column_type_from_id(type_id).ok_or(CellError::UnsupportedType { column, type_id })
        }
    }

    fn write(&mut self, column: usize, row: usize, value: Scalar<'_>) {
        // SAFETY: `value` was read as this column's type, so the element width
        // written below matches the vector's physical layout. String and blob
        // bytes are copied into the vector's own heap by DuckDB.
        unsafe {
            let vector = self.vector(column);
            let data = duckdb_vector_get_data(vector);
            match value {
                Scalar::Null => {
                    self.set_null(column, row);
                    return;
                }
                Scalar::Boolean(v) => write_fixed(data, row, v),
                Scalar::TinyInt(v) => write_fixed(data, row, v),
                Scalar::SmallInt(v) => write_fixed(data, row, v),
                Scalar::Integer(v) | Scalar::Date(v) => write_fixed(data, row, v),
                Scalar::BigInt(v)
                | Scalar::Time(v)
                | Scalar::Timestamp(v)
                | Scalar::TimestampS(v)
                | Scalar::TimestampMs(v)
                | Scalar::TimestampNs(v)
                | Scalar::TimestampTz(v) => write_fixed(data, row, v),
                Scalar::UTinyInt(v) => write_fixed(data, row, v),
                Scalar::USmallInt(v) => write_fixed(data, row, v),
                Scalar::UInteger(v) => write_fixed(data, row, v),
                Scalar::UBigInt(v) => write_fixed(data, row, v),
                Scalar::HugeInt(v) => write_fixed(
                    data,
                    row,
                    duckdb_hugeint {
                        lower: v as u64,
                        upper: (v >> 64) as i64,
                    },
                ),
                Scalar::UHugeInt(v) => write_fixed(
                    data,
                    row,
                    duckdb_uhugeint {
                        lower: v as u64,
                        upper: (v >> 64) as u64,
                    },
                ),
                Scalar::Float(v) => write_fixed(data, row, v),
                Scalar::Double(v) => write_fixed(data, row, v),
                Scalar::Interval(v) => write_fixed(
                    data,
                    row,
                    duckdb_interval {
                        months: v.months,
                        days: v.days,
                        micros: v.micros,
                    },
                ),
                Scalar::Varchar(s) => duckdb_vector_assign_string_element_len(
                    vector,
                    row as idx_t,
                    s.as_ptr().cast(),
                    s.len() as idx_t,
                ),
                Scalar::Blob(b) => duckdb_vector_assign_string_element_len(
                    vector,
                    row as idx_t,
                    b.as_ptr().cast(),
                    b.len() as idx_t,
                ),
            }

            // A vector without a validity mask has every row valid already.
            let validity = duckdb_vector_get_validity(vector);
            if !validity.is_null() {
                duckdb_validity_set_row_valid(validity, row as idx_t);
            }
        }
    }

    fn set_null(&mut self, column: usize, row: usize) {
        // SAFETY: `ensure_validity_writable` allocates the mask if absent, so
        // the pointer read afterwards is non-null.
        unsafe {
            let vector = self.vector(column);
            duckdb_vector_ensure_validity_writable(vector);
            let validity = duckdb_vector_get_validity(vector);
            duckdb_validity_set_row_invalid(validity, row as idx_t);
        }
    }
}

/// A [`Batch`] that resolves each column's type at most once.
///
/// Every type lookup on a bare [`Batch`] creates and destroys a logical type.
/// Code that fills many cells of one chunk writes through a `ChunkWriter` so
/// that cost is paid per column instead of per cell.
#[derive(Debug)]
pub struct ChunkWriter {
    batch: Batch,
    capacity: usize,
    types: Vec<OnceCell<Result<ColumnType, CellError>>>,
}

impl ChunkWriter {
    /// Wraps `batch`, reading its shape once.
    pub fn new(batch: Batch) -> Self {
        Self {
            batch,
            capacity: batch.capacity(),
            types: (0..batch.column_count()).map(|_| OnceCell::new()).collect(),
        }
    }

    /// The wrapped chunk.
    pub const fn batch(&self) -> Batch {
        self.batch
    }
}

impl ColumnarBatch for ChunkWriter {
    fn column_count(&self) -> usize {
        self.types.len()
    }

    fn capacity(&self) -> usize {
        self.capacity
    }

    fn column_type(&self, column: usize) -> Result<ColumnType, CellError> {
        self.types[column]
            .get_or_init(|| self.batch.column_type(column))
            .clone()
    }

    fn write(&mut self, column: usize, row: usize, value: Scalar<'_>) {
        self.batch.write(column, row, value);
    }

    fn set_null(&mut self, column: usize, row: usize) {
        self.batch.set_null(column, row);
    }
}
