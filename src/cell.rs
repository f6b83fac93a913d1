// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Tom F.

//! Columnar value setter: install one engine-native value into one cell of a batch.
//!
//! The write path is split along two traits so the same primitive drives a
//! live `DuckDB` data chunk and the in-memory [`MemoryBatch`](crate::memory::MemoryBatch):
//!
//! - [`ColumnarBatch`] is the target: fixed column types, fixed capacity,
//!   per-row validity.
//! - [`CellSource`] is the value: NULL or a scalar readable as a given column type.
//!
//! [`set_cell`] is the hot path. It performs no bounds or type validation in
//! release builds; callers that need softer failure go through
//! [`set_cell_checked`].
//!
//! # Physical layout
//!
//! Fixed-width columns hold one little-endian value per row in the vector's
//! data buffer; the width follows from [`ColumnType`]. `VARCHAR` and `BLOB`
//! rows hold a 16-byte `string_t` that the engine fills when the bytes are
//! assigned, so those writes always copy.

use crate::error::{fatal, CellError};
use std::borrow::Cow;
use std::fmt;

/// Column types the setter knows how to marshal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnType {
    /// `BOOLEAN`, one byte.
    Boolean,
    /// `TINYINT`, `i8`.
    TinyInt,
    /// `SMALLINT`, `i16`.
    SmallInt,
    /// `INTEGER`, `i32`.
    Integer,
    /// `BIGINT`, `i64`.
    BigInt,
    /// `UTINYINT`, `u8`.
    UTinyInt,
    /// `USMALLINT`, `u16`.
    USmallInt,
    /// `UINTEGER`, `u32`.
    UInteger,
    /// `UBIGINT`, `u64`.
    UBigInt,
    /// `HUGEINT`, `i128`.
    HugeInt,
    /// `UHUGEINT`, `u128`.
    UHugeInt,
    /// `FLOAT`, `f32`.
    Float,
    /// `DOUBLE`, `f64`.
    Double,
    /// `DATE`, days since the Unix epoch as `i32`.
    Date,
    /// `TIME`, microseconds since midnight as `i64`.
    Time,
    /// `TIMESTAMP`, microseconds since the Unix epoch.
    Timestamp,
    /// `TIMESTAMP_S`, seconds since the Unix epoch.
    TimestampS,
    /// `TIMESTAMP_MS`, milliseconds since the Unix epoch.
    TimestampMs,
    /// `TIMESTAMP_NS`, nanoseconds since the Unix epoch.
    TimestampNs,
    /// `TIMESTAMP WITH TIME ZONE`, UTC microseconds since the Unix epoch.
    TimestampTz,
    /// `INTERVAL`, 16 bytes: months, days, micros.
    Interval,
    /// `VARCHAR`, UTF-8 bytes.
    Varchar,
    /// `BLOB`, raw bytes.
    Blob,
}

impl ColumnType {
    /// SQL spelling of the type.
    pub const fn sql_name(self) -> &'static str {
        match self {
            Self::Boolean => "BOOLEAN",
            Self::TinyInt => "TINYINT",
            Self::SmallInt => "SMALLINT",
            Self::Integer => "INTEGER",
            Self::BigInt => "BIGINT",
            Self::UTinyInt => "UTINYINT",
            Self::USmallInt => "USMALLINT",
            Self::UInteger => "UINTEGER",
            Self::UBigInt => "UBIGINT",
            Self::HugeInt => "HUGEINT",
            Self::UHugeInt => "UHUGEINT",
            Self::Float => "FLOAT",
            Self::Double => "DOUBLE",
            Self::Date => "DATE",
            Self::Time => "TIME",
            Self::Timestamp => "TIMESTAMP",
            Self::TimestampS => "TIMESTAMP_S",
            Self::TimestampMs => "TIMESTAMP_MS",
            Self::TimestampNs => "TIMESTAMP_NS",
            Self::TimestampTz => "TIMESTAMP WITH TIME ZONE",
            Self::Interval => "INTERVAL",
            Self::Varchar => "VARCHAR",
            Self::Blob => "BLOB",
        }
    }

    /// Bytes one row occupies in the vector's data buffer.
    ///
    /// Variable-length types report the size of `DuckDB`'s inline `string_t`.
    pub const fn physical_width(self) -> usize {
        match self {
            Self::Boolean | Self::TinyInt | Self::UTinyInt => 1,
            Self::SmallInt | Self::USmallInt => 2,
            Self::Integer | Self::UInteger | Self::Float | Self::Date => 4,
            Self::BigInt
            | Self::UBigInt
            | Self::Double
            | Self::Time
            | Self::Timestamp
            | Self::TimestampS
            | Self::TimestampMs
            | Self::TimestampNs
            | Self::TimestampTz => 8,
            Self::HugeInt | Self::UHugeInt | Self::Interval | Self::Varchar | Self::Blob => 16,
        }
    }

    /// Returns `true` for types whose bytes live outside the data buffer.
    pub const fn is_variable_width(self) -> bool {
        matches!(self, Self::Varchar | Self::Blob)
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.sql_name())
    }
}

/// `DuckDB`'s interval: three independent components, never normalized.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Interval {
    /// Whole months.
    pub months: i32,
    /// Whole days.
    pub days: i32,
    /// Microseconds.
    pub micros: i64,
}

/// One engine-native scalar, borrowed or owned.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar<'a> {
    /// SQL `NULL` of any type.
    Null,
    /// `BOOLEAN`.
    Boolean(bool),
    /// `TINYINT`.
    TinyInt(i8),
    /// `SMALLINT`.
    SmallInt(i16),
    /// `INTEGER`.
    Integer(i32),
    /// `BIGINT`.
    BigInt(i64),
    /// `UTINYINT`.
    UTinyInt(u8),
    /// `USMALLINT`.
    USmallInt(u16),
    /// `UINTEGER`.
    UInteger(u32),
    /// `UBIGINT`.
    UBigInt(u64),
    /// `HUGEINT`.
    HugeInt(i128),
    /// `UHUGEINT`.
    UHugeInt(u128),
    /// `FLOAT`.
    Float(f32),
    /// `DOUBLE`.
    Double(f64),
    /// `DATE` as days since the epoch.
    Date(i32),
    /// `TIME` as microseconds since midnight.
    Time(i64),
    /// `TIMESTAMP` as microseconds since the epoch.
    Timestamp(i64),
    /// `TIMESTAMP_S` as seconds since the epoch.
    TimestampS(i64),
    /// `TIMESTAMP_MS` as milliseconds since the epoch.
    TimestampMs(i64),
    /// `TIMESTAMP_NS` as nanoseconds since the epoch.
    TimestampNs(i64),
    /// `TIMESTAMP WITH TIME ZONE` as UTC microseconds since the epoch.
    TimestampTz(i64),
    /// `INTERVAL`.
    Interval(Interval),
    /// `VARCHAR`.
    Varchar(Cow<'a, str>),
    /// `BLOB`.
    Blob(Cow<'a, [u8]>),
}

impl Scalar<'_> {
    /// The column type this scalar belongs to, `None` for `NULL`.
    pub const fn column_type(&self) -> Option<ColumnType> {
        Some(match self {
            Self::Null => return None,
            Self::Boolean(_) => ColumnType::Boolean,
            Self::TinyInt(_) => ColumnType::TinyInt,
            Self::SmallInt(_) => ColumnType::SmallInt,
            Self::Integer(_) => ColumnType::Integer,
            Self::BigInt(_) => ColumnType::BigInt,
            Self::UTinyInt(_) => ColumnType::UTinyInt,
            Self::USmallInt(_) => ColumnType::USmallInt,
            Self::UInteger(_) => ColumnType::UInteger,
            Self::UBigInt(_) => ColumnType::UBigInt,
            Self::HugeInt(_) => ColumnType::HugeInt,
            Self::UHugeInt(_) => ColumnType::UHugeInt,
            Self::Float(_) => ColumnType::Float,
            Self::Double(_) => ColumnType::Double,
            Self::Date(_) => ColumnType::Date,
            Self::Time(_) => ColumnType::Time,
            Self::Timestamp(_) => ColumnType::Timestamp,
            Self::TimestampS(_) => ColumnType::TimestampS,
            Self::TimestampMs(_) => ColumnType::TimestampMs,
            Self::TimestampNs(_) => ColumnType::TimestampNs,
            Self::TimestampTz(_) => ColumnType::TimestampTz,
            Self::Interval(_) => ColumnType::Interval,
            Self::Varchar(_) => ColumnType::Varchar,
            Self::Blob(_) => ColumnType::Blob,
        })
    }

    /// Returns a copy that borrows from `self` instead of cloning buffers.
    pub fn reborrow(&self) -> Scalar<'_> {
        match self {
            Self::Varchar(s) => Scalar::Varchar(Cow::Borrowed(&**s)),
            Self::Blob(b) => Scalar::Blob(Cow::Borrowed(&**b)),
            Self::Null => Scalar::Null,
            Self::Boolean(v) => Scalar::Boolean(*v),
            Self::TinyInt(v) => Scalar::TinyInt(*v),
            Self::SmallInt(v) => Scalar::SmallInt(*v),
            Self::Integer(v) => Scalar::Integer(*v),
            Self::BigInt(v) => Scalar::BigInt(*v),
            Self::UTinyInt(v) => Scalar::UTinyInt(*v),
            Self::USmallInt(v) => Scalar::USmallInt(*v),
            Self::UInteger(v) => Scalar::UInteger(*v),
            Self::UBigInt(v) => Scalar::UBigInt(*v),
            Self::HugeInt(v) => Scalar::HugeInt(*v),
            Self::UHugeInt(v) => Scalar::UHugeInt(*v),
            Self::Float(v) => Scalar::Float(*v),
            Self::Double(v) => Scalar::Double(*v),
            Self::Date(v) => Scalar::Date(*v),
            Self::Time(v) => Scalar::Time(*v),
            Self::Timestamp(v) => Scalar::Timestamp(*v),
            Self::TimestampS(v) => Scalar::TimestampS(*v),
            Self::TimestampMs(v) => Scalar::TimestampMs(*v),
            Self::TimestampNs(v) => Scalar::TimestampNs(*v),
            Self::TimestampTz(v) => Scalar::TimestampTz(*v),
            Self::Interval(v) => Scalar::Interval(*v),
        }
    }

    /// Detaches the scalar from any borrowed buffer.
    pub fn into_owned(self) -> Scalar<'static> {
        match self {
            Self::Varchar(s) => Scalar::Varchar(Cow::Owned(s.into_owned())),
            Self::Blob(b) => Scalar::Blob(Cow::Owned(b.into_owned())),
            Self::Null => Scalar::Null,
            Self::Boolean(v) => Scalar::Boolean(v),
            Self::TinyInt(v) => Scalar::TinyInt(v),
            Self::SmallInt(v) => Scalar::SmallInt(v),
            Self::Integer(v) => Scalar::Integer(v),
            Self::BigInt(v) => Scalar::BigInt(v),
            Self::UTinyInt(v) => Scalar::UTinyInt(v),
            Self::USmallInt(v) => Scalar::USmallInt(v),
            Self::UInteger(v) => Scalar::UInteger(v),
            Self::UBigInt(v) => Scalar::UBigInt(v),
            Self::HugeInt(v) => Scalar::HugeInt(v),
            Self::UHugeInt(v) => Scalar::UHugeInt(v),
            Self::Float(v) => Scalar::Float(v),
            Self::Double(v) => Scalar::Double(v),
            Self::Date(v) => Scalar::Date(v),
            Self::Time(v) => Scalar::Time(v),
            Self::Timestamp(v) => Scalar::Timestamp(v),
            Self::TimestampS(v) => Scalar::TimestampS(v),
            Self::TimestampMs(v) => Scalar::TimestampMs(v),
            Self::TimestampNs(v) => Scalar::TimestampNs(v),
            Self::TimestampTz(v) => Scalar::TimestampTz(v),
            Self::Interval(v) => Scalar::Interval(v),
        }
    }
}

/// A columnar batch with fixed column types and row capacity.
///
/// Implementations trust their callers: indices past `column_count()` or
/// `capacity()` are undefined behaviour for engine-backed batches.
pub trait ColumnarBatch {
    /// Number of columns, fixed for the batch's lifetime.
    fn column_count(&self) -> usize;

    /// Number of rows each column can hold.
    fn capacity(&self) -> usize;

    /// Declared type of `column`.
    fn column_type(&self, column: usize) -> Result<ColumnType, CellError>;

    /// Stores `value` at (`column`, `row`) and marks the row valid.
    ///
    /// `value` has already been read as `column_type(column)`.
    fn write(&mut self, column: usize, row: usize, value: Scalar<'_>);

    /// Marks (`column`, `row`) as `NULL`.
    fn set_null(&mut self, column: usize, row: usize);
}

/// An engine-native value that can be installed into a cell.
pub trait CellSource {
    /// Returns `true` for SQL `NULL`.
    fn is_null(&self) -> bool;

    /// Declared type of the value, `None` for `NULL` or types without a
    /// marshalling rule.
    fn value_type(&self) -> Option<ColumnType>;

    /// Reads the value as `ty`, applying the source's own conversion rules.
    ///
    /// Only called for non-`NULL` values.
    fn read(&self, ty: ColumnType) -> Scalar<'_>;
}

impl CellSource for Scalar<'_> {
    #[inline]
    fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[inline]
    fn value_type(&self) -> Option<ColumnType> {
        self.column_type()
    }

    /// Plain scalars carry no conversion rules; the type must already match.
    #[inline]
    fn read(&self, ty: ColumnType) -> Scalar<'_> {
        debug_assert_eq!(
            self.column_type(),
            Some(ty),
            "scalar read as a different column type"
        );
        self.reborrow()
    }
}

/// Installs `value` at (`column`, `row`) of `batch`, overwriting the cell.
///
/// A `NULL` value marks the row invalid; any other value lands in the data
/// buffer and marks the row valid again, so nothing from an earlier write
/// survives.
///
/// The caller must guarantee `column < batch.column_count()`,
/// `row < batch.capacity()` and that the value is assignment-compatible with
/// the column. Only debug builds assert the index bounds. A column type with
/// no marshalling rule aborts the process.
#[inline]
pub fn set_cell<B, V>(batch: &mut B, column: usize, row: usize, value: &V)
where
    B: ColumnarBatch + ?Sized,
    V: CellSource + ?Sized,
{
    debug_assert!(
        column < batch.column_count(),
        "column {column} out of range"
    );
    debug_assert!(row < batch.capacity(), "row {row} out of range");

    if value.is_null() {
        batch.set_null(column, row);
        return;
    }

    let ty = match batch.column_type(column) {
        Ok(ty) => ty,
        Err(err) => fatal(&err),
    };
    batch.write(column, row, value.read(ty));
}

/// Validating front for [`set_cell`].
///
/// Checks both indices and the value's declared type before writing. `NULL`
/// is accepted for every column. On error the batch is untouched.
pub fn set_cell_checked<B, V>(
    batch: &mut B,
    column: usize,
    row: usize,
    value: &V,
) -> Result<(), CellError>
where
    B: ColumnarBatch + ?Sized,
    V: CellSource + ?Sized,
{
    let column_count = batch.column_count();
    if column >= column_count {
        return Err(CellError::ColumnOutOfRange {
            column,
            column_count,
        });
    }

    let capacity = batch.capacity();
    if row >= capacity {
        return Err(CellError::RowOutOfRange { row, capacity });
    }

    let expected = batch.column_type(column)?;
    if !value.is_null() {
        let found = value.value_type();
        if found != Some(expected) {
            return Err(CellError::TypeMismatch {
                column,
                expected,
                found,
            });
        }
    }

    set_cell(batch, column, row, value);
    Ok(())
}
