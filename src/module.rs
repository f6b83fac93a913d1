//! The analytics module behind the bridge.
//!
//! The bridge knows the module only through two entry points: an
//! initialization routine that receives the engine instance, and a version
//! query. [`Module`] is that seam. [`ForeignModule`] binds it to the symbols
//! exported by the separately compiled module library.

use crate::handle::EngineInstance;
use std::ffi::CStr;

/// Entry points the bridge consumes from the analytics module.
pub trait Module {
    /// Registers the module's functions with the engine.
    ///
    /// Re-initialization for the same instance is the module's concern: it
    /// must be idempotent or reject the second call itself.
    ///
    /// # Safety
    ///
    /// `instance` must be a live engine handle for the duration of the call.
    unsafe fn init(&self, instance: EngineInstance);

    /// The module's published identifier. Must not change within a process.
    fn version(&self) -> &'static CStr;
}

#[cfg(feature = "foreign-module")]
pub use foreign::ForeignModule;

#[cfg(feature = "foreign-module")]
mod foreign {
    use super::Module;
    use crate::error::fatal;
    use crate::handle::EngineInstance;
    use std::ffi::{c_char, c_void, CStr};

    extern "C" {
        fn compact_execlog_module_init(instance: *mut c_void);
        fn compact_execlog_module_version() -> *const c_char;
    }

    /// The module library linked into the extension.
    #[derive(Debug, Clone, Copy, Default)]
    pub struct ForeignModule;

    impl Module for ForeignModule {
        unsafe fn init(&self, instance: EngineInstance) {
            compact_execlog_module_init(instance.as_ptr());
        }

        fn version(&self) -> &'static CStr {
            // SAFETY: the module returns a NUL-terminated string with static
            // storage; a null pointer is a broken module build.
            unsafe {
                let raw = compact_execlog_module_version();
                if raw.is_null() {
                    fatal(&"module returned a null version string");
                }
                CStr::from_ptr(raw)
            }
        }
    }

}
