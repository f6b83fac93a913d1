//! `DuckDB` side of the bridge.
//!
//! # Architecture
//!
//! Everything here talks to `DuckDB` through the raw `libduckdb-sys` C API in
//! loadable-extension mode. Those functions are resolved through a function
//! table that [`entry::init_c_api`] fills during load, so nothing in this
//! module may run before the extension's init entry point has returned.
//!
//! - [`types`] maps `duckdb_type` ids to [`ColumnType`](crate::cell::ColumnType).
//! - [`chunk`] implements [`ColumnarBatch`](crate::cell::ColumnarBatch) for a
//!   data chunk handle, and for [`ChunkWriter`](chunk::ChunkWriter), which
//!   resolves each column's type once.
//! - [`value`] implements [`CellSource`](crate::cell::CellSource) for a
//!   `duckdb_value` handle.
//! - [`entry`] is the C extension API handshake.

pub mod chunk;
pub mod entry;
#[cfg(test)]
pub mod fake_host;
pub mod types;
pub mod value;
