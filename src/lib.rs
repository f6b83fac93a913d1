//! # `compact_execlog` — `DuckDB` extension bridge
//!
//! Loads the `compact_execlog` analytics module into `DuckDB` and gives it a
//! way to write values into the engine's data chunks. The module itself
//! (log parsing, compaction, its table functions) is built separately and
//! linked in; this crate only carries values and lifecycle signals across.
//!
//! ## Entry points
//!
//! | Symbol | Called by | Purpose |
//! |--------|-----------|---------|
//! | `compact_execlog_init_c_api(info, access)` | `DuckDB` | C extension API load handshake |
//! | `compact_execlog_init(db)` | `DuckDB` (legacy loader) | Forwards the database instance to the module |
//! | `compact_execlog_version()` | `DuckDB`, tooling | Module identifier for compatibility checks |
//! | `compact_execlog_set_cell(chunk, col, row, value)` | the module | Installs one value into one cell |
//!
//! The init and version symbols exist only with the `foreign-module` feature,
//! which links `compact_execlog_module_init` and
//! `compact_execlog_module_version` from the module library.
//!
//! ## Ordering
//!
//! `compact_execlog_set_cell` goes through the `libduckdb-sys` function
//! table, which only the C API handshake fills. The module must not write
//! cells before `compact_execlog_init_c_api` has returned `true`.
//!
//! ## Testing
//!
//! `cargo test` runs every test against an in-process fake of `DuckDB`'s C
//! API. `cargo test --features foreign-module` also builds the exported init
//! and version symbols, with test definitions of the module's two entry
//! points.
//!
//! ## Installation
//!
//! ```sql
//! LOAD 'compact_execlog.duckdb_extension';
//! ```

pub mod cell;
pub mod error;
pub mod handle;
pub mod memory;
pub mod module;
pub mod registrar;
pub mod version;

mod ffi;

pub use cell::{
    set_cell, set_cell_checked, CellSource, ColumnType, ColumnarBatch, Interval, Scalar,
};
pub use error::{CellError, VersionError};
pub use ffi::chunk::ChunkWriter;
pub use ffi::entry::MIN_C_API_VERSION;
pub use ffi::types::{column_type_from_id, type_id as duckdb_type_id};
pub use handle::{Batch, CellValue, EngineInstance};
pub use memory::MemoryBatch;
pub use module::Module;
pub use registrar::{Extension, EXTENSION_NAME};
pub use version::VersionCell;

/// Writes `value` into (`column`, `row`) of `batch`.
///
/// The value is copied; the caller still owns `value` and destroys it.
///
/// # Safety
///
/// Called by the module via FFI after the extension has loaded. `batch` must
/// be a live data chunk of the current execution step, `column` and `row`
/// must be inside it, and `value` must be a non-destroyed value whose type
/// `DuckDB` can cast to the column's type.
#[no_mangle]
pub unsafe extern "C" fn compact_execlog_set_cell(
    mut batch: Batch,
    column: u64,
    row: u64,
    value: CellValue,
) {
    set_cell(&mut batch, cell_index(column), cell_index(row), &value);
}

#[inline]
fn cell_index(raw: u64) -> usize {
    debug_assert!(
        usize::try_from(raw).is_ok(),
        "cell index {raw} exceeds the address space"
    );
    raw as usize
}

#[cfg(feature = "foreign-module")]
static EXTENSION: Extension<module::ForeignModule> = Extension::new(module::ForeignModule);

/// Extension entry point for `DuckDB`'s C extension API.
///
/// # Safety
///
/// Called by `DuckDB`'s extension loading mechanism via FFI.
/// `info` and `access` must be valid pointers provided by `DuckDB`.
#[cfg(feature = "foreign-module")]
#[no_mangle]
pub unsafe extern "C" fn compact_execlog_init_c_api(
    info: libduckdb_sys::duckdb_extension_info,
    access: *const libduckdb_sys::duckdb_extension_access,
) -> bool {
    EXTENSION.init_c_api(info, access)
}

/// Legacy load entry point, called by `DuckDB` as `{extension_name}_init(db)`.
///
/// # Safety
///
/// `db` must be the live database instance being loaded into.
#[cfg(feature = "foreign-module")]
#[no_mangle]
pub unsafe extern "C" fn compact_execlog_init(db: EngineInstance) {
    EXTENSION.load(db);
}

/// Returns the module's identifier, called by `DuckDB` as `{extension_name}_version()`.
///
/// The pointer stays valid, and identical across calls, for the process lifetime.
#[cfg(feature = "foreign-module")]
#[no_mangle]
pub extern "C" fn compact_execlog_version() -> *const std::ffi::c_char {
    EXTENSION.version().as_ptr()
}
