// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Tom F.

//! Opaque handles that cross the extension boundary.
//!
//! Every pointer the bridge receives from `DuckDB` or hands to the module is
//! wrapped in a [`Handle`] tagged with the kind of memory it points at. The
//! wrapper is `#[repr(transparent)]` over `*mut c_void`, so it can appear
//! directly in `extern "C"` signatures with no conversion cost. It owns
//! nothing: the engine allocates and frees the pointee.
//!
//! Handles can only be built with the `unsafe` constructors below. Each
//! constructor is the point where provenance is asserted; past it, the type
//! keeps an engine instance from being passed where a data chunk is expected.

use libduckdb_sys::{duckdb_data_chunk, duckdb_database, duckdb_value};
use std::ffi::c_void;
use std::fmt;
use std::marker::PhantomData;

/// Marker for the kind of memory a [`Handle`] points into.
pub trait HandleKind {
    /// Short name used in `Debug` output and log fields.
    const NAME: &'static str;
}

/// A running database instance (`DatabaseInstance` / `duckdb_database`).
#[derive(Debug)]
pub enum Engine {}

/// A `DuckDB` data chunk: the engine's columnar batch.
#[derive(Debug)]
pub enum Chunk {}

/// A `DuckDB` value: one engine-native tagged scalar.
#[derive(Debug)]
pub enum Value {}

impl HandleKind for Engine {
    const NAME: &'static str = "engine";
}

impl HandleKind for Chunk {
    const NAME: &'static str = "chunk";
}

impl HandleKind for Value {
    const NAME: &'static str = "value";
}

/// Engine instance handle forwarded to the module on load.
pub type EngineInstance = Handle<Engine>;

/// Columnar batch handle targeted by cell writes.
pub type Batch = Handle<Chunk>;

/// Cell value handle read by cell writes.
pub type CellValue = Handle<Value>;

/// Borrowed, untyped pointer into memory owned by the other side of the boundary.
#[repr(transparent)]
pub struct Handle<K> {
    raw: *mut c_void,
    _kind: PhantomData<fn() -> K>,
}

impl<K> Handle<K> {
    /// Wraps a raw pointer received from across the boundary.
    ///
    /// # Safety
    ///
    /// `raw` must point at live memory of kind `K` for as long as the handle
    /// is used. The bridge never validates the pointee.
    #[inline]
    pub const unsafe fn from_raw(raw: *mut c_void) -> Self {
        Self {
            raw,
            _kind: PhantomData,
        }
    }

    /// Returns the wrapped pointer unchanged.
    #[inline]
    pub const fn as_ptr(self) -> *mut c_void {
        self.raw
    }

    /// Returns `true` if the wrapped pointer is null.
    #[inline]
    pub fn is_null(self) -> bool {
        self.raw.is_null()
    }
}

impl Handle<Engine> {
    /// Wraps the `duckdb_database` handed out by the C extension API.
    ///
    /// # Safety
    ///
    /// `db` must be the live database of the extension currently loading.
    #[inline]
    pub unsafe fn from_database(db: duckdb_database) -> Self {
        Self::from_raw(db.cast())
    }
}

impl Handle<Chunk> {
    /// Wraps a data chunk produced by the current execution step.
    ///
    /// # Safety
    ///
    /// `chunk` must stay live for every cell write made through the handle.
    #[inline]
    pub unsafe fn from_chunk(chunk: duckdb_data_chunk) -> Self {
        Self::from_raw(chunk.cast())
    }

    /// The handle as a `duckdb_data_chunk`.
    #[inline]
    pub fn as_chunk(self) -> duckdb_data_chunk {
        self.raw.cast()
    }
}

impl Handle<Value> {
    /// Wraps a fully constructed `duckdb_value`.
    ///
    /// # Safety
    ///
    /// `value` must stay live until the write that reads it returns.
    #[inline]
    pub unsafe fn from_value(value: duckdb_value) -> Self {
        Self::from_raw(value.cast())
    }

    /// The handle as a `duckdb_value`.
    #[inline]
    pub fn as_value(self) -> duckdb_value {
        self.raw.cast()
    }
}

// Manual impls: derives would demand `K: Clone` etc. on uninhabited markers.
impl<K> Clone for Handle<K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K> Copy for Handle<K> {}

impl<K> PartialEq for Handle<K> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.raw, other.raw)
    }
}

impl<K> Eq for Handle<K> {}

impl<K: HandleKind> fmt::Debug for Handle<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{:p}", K::NAME, self.raw)
    }
}
