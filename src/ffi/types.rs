//! `duckdb_type` ids the setter can marshal.

use crate::cell::ColumnType;
use libduckdb_sys::*;

/// Maps a `DuckDB` type id to its marshalling rule, `None` if there is none.
///
/// Nested, decimal, enum and UUID columns are not marshalled by the bridge.
pub fn column_type_from_id(type_id: duckdb_type) -> Option<ColumnType> {
    Some(match type_id {
        DUCKDB_TYPE_DUCKDB_TYPE_BOOLEAN => ColumnType::Boolean,
        DUCKDB_TYPE_DUCKDB_TYPE_TINYINT => ColumnType::TinyInt,
        DUCKDB_TYPE_DUCKDB_TYPE_SMALLINT => ColumnType::SmallInt,
        DUCKDB_TYPE_DUCKDB_TYPE_INTEGER => ColumnType::Integer,
        DUCKDB_TYPE_DUCKDB_TYPE_BIGINT => ColumnType::BigInt,
        DUCKDB_TYPE_DUCKDB_TYPE_UTINYINT => ColumnType::UTinyInt,
        DUCKDB_TYPE_DUCKDB_TYPE_USMALLINT => ColumnType::USmallInt,
        DUCKDB_TYPE_DUCKDB_TYPE_UINTEGER => ColumnType::UInteger,
        DUCKDB_TYPE_DUCKDB_TYPE_UBIGINT => ColumnType::UBigInt,
        DUCKDB_TYPE_DUCKDB_TYPE_HUGEINT => ColumnType::HugeInt,
        DUCKDB_TYPE_DUCKDB_TYPE_UHUGEINT => ColumnType::UHugeInt,
        DUCKDB_TYPE_DUCKDB_TYPE_FLOAT => ColumnType::Float,
        DUCKDB_TYPE_DUCKDB_TYPE_DOUBLE => ColumnType::Double,
        DUCKDB_TYPE_DUCKDB_TYPE_DATE => ColumnType::Date,
        DUCKDB_TYPE_DUCKDB_TYPE_TIME => ColumnType::Time,
        DUCKDB_TYPE_DUCKDB_TYPE_TIMESTAMP => ColumnType::Timestamp,
        DUCKDB_TYPE_DUCKDB_TYPE_TIMESTAMP_S => ColumnType::TimestampS,
        DUCKDB_TYPE_DUCKDB_TYPE_TIMESTAMP_MS => ColumnType::TimestampMs,
        DUCKDB_TYPE_DUCKDB_TYPE_TIMESTAMP_NS => ColumnType::TimestampNs,
        DUCKDB_TYPE_DUCKDB_TYPE_TIMESTAMP_TZ => ColumnType::TimestampTz,
        DUCKDB_TYPE_DUCKDB_TYPE_INTERVAL => ColumnType::Interval,
        DUCKDB_TYPE_DUCKDB_TYPE_VARCHAR => ColumnType::Varchar,
        DUCKDB_TYPE_DUCKDB_TYPE_BLOB => ColumnType::Blob,
        _ => return None,
    })
}

/// The `DuckDB` type id for `ty`.
pub const fn type_id(ty: ColumnType) -> duckdb_type {
    match ty {
        ColumnType::Boolean => DUCKDB_TYPE_DUCKDB_TYPE_BOOLEAN,
        ColumnType::TinyInt => DUCKDB_TYPE_DUCKDB_TYPE_TINYINT,
        ColumnType::SmallInt => DUCKDB_TYPE_DUCKDB_TYPE_SMALLINT,
        ColumnType::Integer => DUCKDB_TYPE_DUCKDB_TYPE_INTEGER,
        ColumnType::BigInt => DUCKDB_TYPE_DUCKDB_TYPE_BIGINT,
        ColumnType::UTinyInt => DUCKDB_TYPE_DUCKDB_TYPE_UTINYINT,
        ColumnType::USmallInt => DUCKDB_TYPE_DUCKDB_TYPE_USMALLINT,
        ColumnType::UInteger => DUCKDB_TYPE_DUCKDB_TYPE_UINTEGER,
        ColumnType::UBigInt => DUCKDB_TYPE_DUCKDB_TYPE_UBIGINT,
        ColumnType::HugeInt => DUCKDB_TYPE_DUCKDB_TYPE_HUGEINT,
        ColumnType::UHugeInt => DUCKDB_TYPE_DUCKDB_TYPE_UHUGEINT,
        ColumnType::Float => DUCKDB_TYPE_DUCKDB_TYPE_FLOAT,
        ColumnType::Double => DUCKDB_TYPE_DUCKDB_TYPE_DOUBLE,
        ColumnType::Date => DUCKDB_TYPE_DUCKDB_TYPE_DATE,
        ColumnType::Time => DUCKDB_TYPE_DUCKDB_TYPE_TIME,
        ColumnType::Timestamp => DUCKDB_TYPE_DUCKDB_TYPE_TIMESTAMP,
        ColumnType::TimestampS => DUCKDB_TYPE_DUCKDB_TYPE_TIMESTAMP_S,
        ColumnType::TimestampMs => DUCKDB_TYPE_DUCKDB_TYPE_TIMESTAMP_MS,
        ColumnType::TimestampNs => DUCKDB_TYPE_DUCKDB_TYPE_TIMESTAMP_NS,
        ColumnType::TimestampTz => DUCKDB_TYPE_DUCKDB_TYPE_TIMESTAMP_TZ,
        ColumnType::Interval => DUCKDB_TYPE_DUCKDB_TYPE_INTERVAL,
        ColumnType::Varchar => DUCKDB_TYPE_DUCKDB_TYPE_VARCHAR,
        ColumnType::Blob => DUCKDB_TYPE_DUCKDB_TYPE_BLOB,
    }
}
