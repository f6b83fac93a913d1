//! Reading a `duckdb_value` as a column's type.
//!
//! The typed getters (`duckdb_get_int64`, ...) apply `DuckDB`'s own cast rules,
//! which is what the engine does when it copies a value into a vector of a
//! different type.

use crate::cell::{CellSource, ColumnType, Interval, Scalar};
use crate::ffi::types::column_type_from_id;
use crate::handle::CellValue;
use libduckdb_sys::*;
use std::borrow::Cow;
use std::ffi::CStr;

impl CellSource for CellValue {
    fn is_null(&self) -> bool {
        // SAFETY: live value per handle provenance.
        unsafe { duckdb_is_null_value(self.as_value()) }
    }

    fn value_type(&self) -> Option<ColumnType> {
        // SAFETY: the value owns its logical type; it must not be destroyed here.
        unsafe {
            let logical = duckdb_get_value_type(self.as_value());
            column_type_from_id(duckdb_get_type_id(logical))
        }
    }

    fn read(&self, ty: ColumnType) -> Scalar<'_> {
        let v = self.as_value();
        // SAFETY: live, non-NULL value. Engine-allocated strings and blobs are
        // copied out and released with `duckdb_free` before returning.
        unsafe {
            match ty {
                ColumnType::Boolean => Scalar::Boolean(duckdb_get_bool(v)),
                ColumnType::TinyInt => Scalar::TinyInt(duckdb_get_int8(v)),
                ColumnType::SmallInt => Scalar::SmallInt(duckdb_get_int16(v)),
                ColumnType::Integer => Scalar::Integer(duckdb_get_int32(v)),
                ColumnType::BigInt => Scalar::BigInt(duckdb_get_int64(v)),
                ColumnType::UTinyInt => Scalar::UTinyInt(duckdb_get_uint8(v)),
                ColumnType::USmallInt => Scalar::USmallInt(duckdb_get_uint16(v)),
                ColumnType::UInteger => Scalar::UInteger(duckdb_get_uint32(v)),
                ColumnType::UBigInt => Scalar::UBigInt(duckdb_get_uint64(v)),
                ColumnType::HugeInt => {
                    let h = duckdb_get_hugeint(v);
                    Scalar::HugeInt(hugeint_to_i128(h.lower, h.upper))
                }
                ColumnType::UHugeInt => {
                    let h = duckdb_get_uhugeint(v);
                    Scalar::UHugeInt(uhugeint_to_u128(h.lower, h.upper))
                }
                ColumnType::Float => Scalar::Float(duckdb_get_float(v)),
                ColumnType::Double => Scalar::Double(duckdb_get_double(v)),
                ColumnType::Date => Scalar::Date(duckdb_get_date(v).days),
                ColumnType::Time => Scalar::Time(duckdb_get_time(v).micros),
                ColumnType::Timestamp => Scalar::Timestamp(duckdb_get_timestamp(v).micros),
                ColumnType::TimestampS => Scalar::TimestampS(duckdb_get_timestamp_s(v).seconds),
                ColumnType::TimestampMs => Scalar::TimestampMs(duckdb_get_timestamp_ms(v).millis),
                ColumnType::TimestampNs => Scalar::TimestampNs(duckdb_get_timestamp_ns(v).nanos),
                ColumnType::TimestampTz => {
                    Scalar::TimestampTz(duckdb_get_timestamp_tz(v).micros)
                }
                ColumnType::Interval => {
                    let i = duckdb_get_interval(v);
                    Scalar::Interval(Interval {
                        months: i.months,
                        days: i.days,
                        micros: i.micros,
                    })
                }
                ColumnType::Varchar => {
                    let raw = duckdb_get_varchar(v);
                    if raw.is_null() {
                        return Scalar::Varchar(Cow::Borrowed(""));
                    }
                    let text = CStr::from_ptr(raw).to_string_lossy().into_owned();
                    duckdb_free(raw.cast());
                    Scalar::Varchar(Cow::Owned(text))
                }
                ColumnType::Blob => {
                    let blob = duckdb_get_blob(v);
                    if blob.data.is_null() {
                        return Scalar::Blob(Cow::Borrowed(&[]));
                    }
                    let bytes =
                        std::slice::from_raw_parts(blob.data.cast::<u8>(), blob.size as usize)
                            .to_vec();
                    duckdb_free(blob.data);
                    Scalar::Blob(Cow::Owned(bytes))
                }
            }
        }
    }
}

/// Reassembles `DuckDB`'s two-word `hugeint` (lower bits unsigned, upper signed).
#[inline]
pub const fn hugeint_to_i128(lower: u64, upper: i64) -> i128 {
    ((upper as i128) << 64) | lower as i128
}

/// Reassembles `DuckDB`'s two-word `uhugeint`.
#[inline]
pub const fn uhugeint_to_u128(lower: u64, upper: u64) -> u128 {
    ((upper as u128) << 64) | lower as u128
}
