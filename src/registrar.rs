// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Tom F.

//! Extension registrar.
//!
//! `DuckDB` calls the extension's init entry point once per load event. The
//! registrar does nothing but hand the engine instance to the module, which
//! registers its own table and scalar functions. No state survives the call,
//! so loading into several database instances in one process works the same
//! as loading into one.

use crate::handle::EngineInstance;
use crate::module::Module;
use crate::version::VersionCell;
use libduckdb_sys::{duckdb_extension_access, duckdb_extension_info};
use std::ffi::CStr;

/// Name `DuckDB` derives the entry point symbols from (`{name}_init`, `{name}_version`).
pub const EXTENSION_NAME: &str = "compact_execlog";

/// Forwards `instance` unchanged to the module's initialization routine.
///
/// At-most-once delivery is the host's job; a second call for the same
/// instance is forwarded again.
///
/// # Safety
///
/// `instance` must be a live engine handle for the duration of the call.
pub unsafe fn on_load<M: Module + ?Sized>(module: &M, instance: EngineInstance) {
    tracing::debug!(
        extension = EXTENSION_NAME,
        ?instance,
        "forwarding engine instance to module"
    );
    module.init(instance);
}

/// A module packaged as a loadable `DuckDB` extension.
///
/// The exported `compact_execlog_*` symbols are thin wrappers over a static
/// `Extension`.
#[derive(Debug)]
pub struct Extension<M> {
    module: M,
    version: VersionCell,
}

impl<M: Module> Extension<M> {
    /// Wraps `module`; usable in a `static`.
    pub const fn new(module: M) -> Self {
        Self {
            module,
            version: VersionCell::new(),
        }
    }

    /// The extension's name.
    pub const fn name(&self) -> &'static str {
        EXTENSION_NAME
    }

    /// The wrapped module.
    pub const fn module(&self) -> &M {
        &self.module
    }

    /// Runs the registrar for one engine instance.
    ///
    /// # Safety
    ///
    /// `instance` must be a live engine handle for the duration of the call.
    pub unsafe fn load(&self, instance: EngineInstance) {
        on_load(&self.module, instance);
    }

    /// The module's version, stable for the process lifetime.
    pub fn version(&self) -> &'static CStr {
        self.version.get_or_report(&self.module)
    }

    /// Runs the C extension API handshake and then the registrar.
    ///
    /// # Safety
    ///
    /// `info` and `access` must be the pointers `DuckDB` passed to the
    /// extension's `_init_c_api` entry point.
    pub unsafe fn init_c_api(
        &self,
        info: duckdb_extension_info,
        access: *const duckdb_extension_access,
    ) -> bool {
        crate::ffi::entry::init_c_api(self, info, access)
    }
}
