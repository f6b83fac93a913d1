// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Tom F.

//! Version reporter.
//!
//! The host asks for the module's identifier through
//! `compact_execlog_version()` and may do so from any thread, any number of
//! times. The first call asks the module; the reference it returns is kept in
//! a [`VersionCell`] and handed out unchanged for the rest of the process, so
//! every caller sees the same pointer.

use crate::error::VersionError;
use crate::module::Module;
use std::ffi::CStr;
use std::sync::OnceLock;

/// Process-lifetime slot for the module's version string.
#[derive(Debug, Default)]
pub struct VersionCell {
    reported: OnceLock<&'static CStr>,
}

impl VersionCell {
    /// An empty cell; usable in a `static`.
    pub const fn new() -> Self {
        Self {
            reported: OnceLock::new(),
        }
    }

    /// Returns the module's version, asking the module only on the first call.
    pub fn get_or_report<M: Module + ?Sized>(&self, module: &M) -> &'static CStr {
        self.reported.get_or_init(|| {
            let version = module.version();
            match check_identifier(version) {
                Ok(identifier) => tracing::debug!(identifier, "module version"),
                Err(err) => tracing::warn!(%err, ?version, "malformed module version"),
            }
            version
        })
    }

    /// The cached version, if it has been reported.
    pub fn get(&self) -> Option<&'static CStr> {
        self.reported.get().copied()
    }
}

/// Checks that `version` is a publishable identifier: non-empty UTF-8 with no
/// leading or trailing whitespace.
pub fn check_identifier(version: &CStr) -> Result<&str, VersionError> {
    let text = version.to_str().map_err(|_| VersionError::NotUtf8)?;
    if text.is_empty() {
        return Err(VersionError::Empty);
    }
    if text.trim() != text {
        return Err(VersionError::SurroundingWhitespace);
    }
    Ok(text)
}
