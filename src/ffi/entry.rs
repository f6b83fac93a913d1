//! C extension API handshake.
//!
//! `DuckDB` resolves `{name}_init_c_api` in the extension library and calls it
//! with an `info` token and the `access` table. The handshake fills
//! `libduckdb-sys`'s function table, fetches the database handle and runs the
//! registrar with it. Any failure is reported back through `access.set_error`.

use crate::handle::EngineInstance;
use crate::module::Module;
use crate::registrar::Extension;
use libduckdb_sys::*;
use std::error::Error;
use std::ffi::CString;

/// Minimum C API version the extension needs from its host.
///
/// "v1.2.0" matches the default minimum version used by duckdb-loadable-macros.
pub const MIN_C_API_VERSION: &str = "v1.2.0";

/// Runs the load handshake for `extension`.
///
/// Returns `false` when the host's C API is older than
/// [`MIN_C_API_VERSION`] or when registration fails.
///
/// # Safety
///
/// `info` and `access` must be the pointers `DuckDB` passed to the entry point.
pub unsafe fn init_c_api<M: Module>(
    extension: &Extension<M>,
    info: duckdb_extension_info,
    access: *const duckdb_extension_access,
) -> bool {
    match init_internal(extension, info, access) {
        Ok(loaded) => loaded,
        Err(e) => {
            tracing::error!(extension = extension.name(), error = %e, "extension init failed");
            let message = error_message(&*e);
            if let Some(set_error) = (*access).set_error {
                set_error(info, message.as_ptr());
            }
            false
        }
    }
}

unsafe fn init_internal<M: Module>(
    extension: &Extension<M>,
    info: duckdb_extension_info,
    access: *const duckdb_extension_access,
) -> Result<bool, Box<dyn Error>> {
    // Populates the global function-pointer table every other `duckdb_*`
    // call in this crate goes through.
    let have_api = duckdb_rs_extension_api_init(info, access, MIN_C_API_VERSION)
        .map_err(|e| -> Box<dyn Error> { e.into() })?;

    if !have_api {
        tracing::warn!(
            extension = extension.name(),
            required = MIN_C_API_VERSION,
            "host C API too old"
        );
        return Ok(false);
    }

    let get_database = (*access)
        .get_database
        .ok_or("DuckDB access table has no get_database")?;
    let db_ptr = get_database(info);
    if db_ptr.is_null() {
        return Err("DuckDB returned no database for extension registration".into());
    }

    extension.load(EngineInstance::from_database(*db_ptr));
    Ok(true)
}

/// Converts an init error into the C string handed to `set_error`.
///
/// Messages with an interior NUL cannot cross as C strings and are replaced
/// by a fixed fallback.
pub fn error_message(e: &dyn Error) -> CString {
    CString::new(e.to_string()).unwrap_or_else(|_| {
        c"Extension init failed and could not allocate error string".to_owned()
    })
}
