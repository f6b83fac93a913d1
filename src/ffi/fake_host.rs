//! In-process stand-in for the `DuckDB` side of the C extension API.
//!
//! [`api_table`] is a `duckdb_ext_api_v1` with only the entry points the
//! bridge calls filled in, backed by plain Rust structs: chunk, vector and
//! value handles are pointers to [`FakeChunk`], [`FakeVector`] and
//! [`FakeValue`], and the `info` token of a load is a pointer to a
//! [`FakeLoad`]. The function table in `libduckdb-sys` is process-wide, so
//! every test installs the same stubs.

use crate::cell::ColumnType;
use crate::ffi::entry::MIN_C_API_VERSION;
use crate::ffi::types::type_id;
use crate::handle::{Batch, CellValue, EngineInstance};
use crate::module::Module;
use libduckdb_sys::*;
use std::cell::Cell;
use std::ffi::{c_char, c_void, CStr, CString};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, Once, OnceLock};

/// Rows per vector, as in a default `DuckDB` build.
pub const VECTOR_SIZE: usize = 2048;

thread_local! {
    static LIVE_STRINGS: Cell<isize> = const { Cell::new(0) };
}

/// Strings handed out by `duckdb_get_varchar` on this thread and not yet
/// released with `duckdb_free`.
pub fn live_strings() -> isize {
    LIVE_STRINGS.with(Cell::get)
}

/// One column of a [`FakeChunk`].
#[derive(Debug)]
pub struct FakeVector {
    type_id: duckdb_type,
    /// 16-byte slots, wide enough for every fixed-width type.
    data: Vec<u128>,
    /// `None` until `duckdb_vector_ensure_validity_writable`, like `DuckDB`.
    validity: Option<Vec<u64>>,
    strings: Vec<Option<Vec<u8>>>,
    type_lookups: AtomicUsize,
    types_destroyed: AtomicUsize,
}

impl FakeVector {
    fn new(type_id: duckdb_type) -> Self {
        Self {
            type_id,
            data: vec![0; VECTOR_SIZE],
            validity: None,
            strings: vec![None; VECTOR_SIZE],
            type_lookups: AtomicUsize::new(0),
            types_destroyed: AtomicUsize::new(0),
        }
    }

    /// Reads row `row` of the data buffer as `T`.
    pub fn fixed<T: Copy>(&self, row: usize) -> T {
        assert!(std::mem::size_of::<T>() <= 16 && row < VECTOR_SIZE);
        // SAFETY: in bounds per the assert; every bit pattern is read back as
        // the type the test wrote.
        unsafe { self.data.as_ptr().cast::<T>().add(row).read() }
    }

    /// Bytes assigned to row `row` through the string heap.
    pub fn string(&self, row: usize) -> Option<&[u8]> {
        self.strings[row].as_deref()
    }

    /// Row validity; rows are valid while no mask has been allocated.
    pub fn is_valid(&self, row: usize) -> bool {
        self.validity
            .as_ref()
            .map_or(true, |mask| (mask[row / 64] >> (row % 64)) & 1 == 1)
    }

    /// Returns `true` once a validity mask has been allocated.
    pub fn has_validity_mask(&self) -> bool {
        self.validity.is_some()
    }

    /// Logical types created for this vector so far.
    pub fn type_lookups(&self) -> usize {
        self.type_lookups.load(Ordering::Relaxed)
    }

    /// Logical types destroyed for this vector so far.
    pub fn types_destroyed(&self) -> usize {
        self.types_destroyed.load(Ordering::Relaxed)
    }
}

/// A data chunk of [`VECTOR_SIZE`] rows.
#[derive(Debug)]
pub struct FakeChunk {
    vectors: Vec<FakeVector>,
}

impl FakeChunk {
    /// A chunk with one column per entry of `types`.
    pub fn new(types: &[ColumnType]) -> Self {
        let ids: Vec<duckdb_type> = types.iter().map(|&ty| type_id(ty)).collect();
        Self::with_type_ids(&ids)
    }

    /// A chunk whose columns carry raw type ids, including unsupported ones.
    pub fn with_type_ids(ids: &[duckdb_type]) -> Self {
        Self {
            vectors: ids.iter().map(|&id| FakeVector::new(id)).collect(),
        }
    }

    /// Handle to this chunk. The chunk must not move while it is in use.
    pub fn batch(&mut self) -> Batch {
        unsafe { Batch::from_chunk(std::ptr::from_mut(self).cast()) }
    }

    /// Column `column`.
    pub fn vector(&self, column: usize) -> &FakeVector {
        &self.vectors[column]
    }
}

/// What a [`FakeValue`] holds.
#[derive(Debug)]
pub enum Payload {
    /// SQL `NULL`.
    Null,
    /// Any integer type up to 64 bits.
    Int(i64),
    /// `HUGEINT`.
    Huge(i128),
    /// `INTERVAL`.
    Interval(duckdb_interval),
    /// `VARCHAR`.
    Text(CString),
}

/// A `duckdb_value`.
#[derive(Debug)]
pub struct FakeValue {
    type_id: duckdb_type,
    payload: Payload,
}

impl FakeValue {
    /// A value of `ty` holding `payload`.
    pub fn new(ty: ColumnType, payload: Payload) -> Self {
        Self {
            type_id: type_id(ty),
            payload,
        }
    }

    /// A `NULL` of `ty`.
    pub fn null(ty: ColumnType) -> Self {
        Self::new(ty, Payload::Null)
    }

    /// Handle to this value.
    pub fn handle(&self) -> CellValue {
        unsafe { CellValue::from_value(std::ptr::from_ref(self).cast_mut().cast()) }
    }
}

/// The host side of one extension load: what `info` points at.
#[derive(Debug)]
pub struct FakeLoad {
    /// Whether `get_api` hands out the table or reports an old host.
    pub api_available: bool,
    /// Database handed out by `get_database`; null makes it return null.
    pub database: duckdb_database,
    /// Version strings passed to `get_api`.
    pub requested_versions: Vec<String>,
    /// Messages passed to `set_error`.
    pub errors: Vec<String>,
}

impl FakeLoad {
    /// A host that accepts the load and hands out `database`.
    pub fn new(database: duckdb_database) -> Self {
        Self {
            api_available: true,
            database,
            requested_versions: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// The `info` token for this load. The load must not move while in use.
    pub fn info(&mut self) -> duckdb_extension_info {
        std::ptr::from_mut(self).cast()
    }

    /// An access table with every callback present.
    pub fn access() -> duckdb_extension_access {
        duckdb_extension_access {
            set_error: Some(set_error),
            get_database: Some(get_database),
            get_api: Some(get_api),
        }
    }
}

/// Records every instance it is initialized with.
#[derive(Debug, Default)]
pub struct RecordingModule {
    seen: Mutex<Vec<usize>>,
}

impl RecordingModule {
    /// Addresses of the instances passed to `init`, in call order.
    pub fn seen(&self) -> Vec<usize> {
        self.seen.lock().unwrap().clone()
    }
}

impl Module for RecordingModule {
    unsafe fn init(&self, instance: EngineInstance) {
        self.seen.lock().unwrap().push(instance.as_ptr() as usize);
    }

    fn version(&self) -> &'static CStr {
        c"compact_execlog-test-1"
    }
}

/// Fills the `libduckdb-sys` function table with the stubs below.
pub fn install() {
    static INSTALL: Once = Once::new();
    INSTALL.call_once(|| {
        let mut load = FakeLoad::new(std::ptr::null_mut());
        let access = FakeLoad::access();
        // SAFETY: `load` and `access` outlive the call.
        let installed =
            unsafe { duckdb_rs_extension_api_init(load.info(), &access, MIN_C_API_VERSION) };
        assert_eq!(installed, Ok(true));
    });
}

/// The stub function table handed out by `get_api`.
pub fn api_table() -> &'static duckdb_ext_api_v1 {
    static API: OnceLock<duckdb_ext_api_v1> = OnceLock::new();
    API.get_or_init(|| {
        // SAFETY: every field is an `Option` of a function pointer, so the
        // all-zero table is all `None`.
        let mut api: duckdb_ext_api_v1 = unsafe { std::mem::zeroed() };
        api.duckdb_free = Some(free);
        api.duckdb_vector_size = Some(vector_size);
        api.duckdb_data_chunk_get_column_count = Some(chunk_column_count);
        api.duckdb_data_chunk_get_vector = Some(chunk_vector);
        api.duckdb_vector_get_column_type = Some(vector_column_type);
        api.duckdb_get_type_id = Some(logical_type_id);
        api.duckdb_destroy_logical_type = Some(destroy_logical_type);
        api.duckdb_vector_get_data = Some(vector_data);
        api.duckdb_vector_get_validity = Some(vector_validity);
        api.duckdb_vector_ensure_validity_writable = Some(ensure_validity_writable);
        api.duckdb_validity_set_row_valid = Some(set_row_valid);
        api.duckdb_validity_set_row_invalid = Some(set_row_invalid);
        api.duckdb_vector_assign_string_element_len = Some(assign_string);
        api.duckdb_is_null_value = Some(is_null_value);
        api.duckdb_get_value_type = Some(value_type);
        api.duckdb_get_int32 = Some(get_int32);
        api.duckdb_get_int64 = Some(get_int64);
        api.duckdb_get_hugeint = Some(get_hugeint);
        api.duckdb_get_interval = Some(get_interval);
        api.duckdb_get_varchar = Some(get_varchar);
        api
    })
}

unsafe extern "C" fn set_error(info: duckdb_extension_info, error: *const c_char) {
    let load = &mut *info.cast::<FakeLoad>();
    let message = CStr::from_ptr(error).to_string_lossy().into_owned();
    load.errors.push(message);
}

unsafe extern "C" fn get_database(info: duckdb_extension_info) -> *mut duckdb_database {
    let load = &mut *info.cast::<FakeLoad>();
    if load.database.is_null() {
        std::ptr::null_mut()
    } else {
        &mut load.database
    }
}

unsafe extern "C" fn get_api(info: duckdb_extension_info, version: *const c_char) -> *const c_void {
    let load = &mut *info.cast::<FakeLoad>();
    let version = CStr::from_ptr(version).to_string_lossy().into_owned();
    load.requested_versions.push(version);
    if load.api_available {
        std::ptr::from_ref(api_table()).cast()
    } else {
        std::ptr::null()
    }
}

unsafe extern "C" fn free(ptr: *mut c_void) {
    drop(CString::from_raw(ptr.cast()));
    LIVE_STRINGS.with(|live| live.set(live.get() - 1));
}

unsafe extern "C" fn vector_size() -> idx_t {
    VECTOR_SIZE as idx_t
}

unsafe fn chunk<'a>(chunk: duckdb_data_chunk) -> &'a mut FakeChunk {
    &mut *chunk.cast::<FakeChunk>()
}

unsafe fn vector<'a>(vector: duckdb_vector) -> &'a mut FakeVector {
    &mut *vector.cast::<FakeVector>()
}

unsafe fn value<'a>(value: duckdb_value) -> &'a FakeValue {
    &*value.cast::<FakeValue>()
}

unsafe extern "C" fn chunk_column_count(c: duckdb_data_chunk) -> idx_t {
    chunk(c).vectors.len() as idx_t
}

unsafe extern "C" fn chunk_vector(c: duckdb_data_chunk, column: idx_t) -> duckdb_vector {
    std::ptr::from_mut(&mut chunk(c).vectors[column as usize]).cast()
}

// A logical type is a pointer at the owner's type id.
unsafe extern "C" fn vector_column_type(v: duckdb_vector) -> duckdb_logical_type {
    let v = vector(v);
    v.type_lookups.fetch_add(1, Ordering::Relaxed);
    std::ptr::from_mut(&mut v.type_id).cast()
}

unsafe extern "C" fn logical_type_id(logical: duckdb_logical_type) -> duckdb_type {
    *logical.cast::<duckdb_type>()
}

unsafe extern "C" fn destroy_logical_type(logical: *mut duckdb_logical_type) {
    let owner = (*logical).cast::<u8>().sub(std::mem::offset_of!(FakeVector, type_id));
    (*owner.cast::<FakeVector>())
        .types_destroyed
        .fetch_add(1, Ordering::Relaxed);
    *logical = std::ptr::null_mut();
}

unsafe extern "C" fn vector_data(v: duckdb_vector) -> *mut c_void {
    vector(v).data.as_mut_ptr().cast()
}

unsafe extern "C" fn vector_validity(v: duckdb_vector) -> *mut u64 {
    vector(v)
        .validity
        .as_mut()
        .map_or(std::ptr::null_mut(), |mask| mask.as_mut_ptr())
}

unsafe extern "C" fn ensure_validity_writable(v: duckdb_vector) {
    vector(v)
        .validity
        .get_or_insert_with(|| vec![u64::MAX; VECTOR_SIZE.div_ceil(64)]);
}

unsafe extern "C" fn set_row_valid(validity: *mut u64, row: idx_t) {
    *validity.add(row as usize / 64) |= 1 << (row % 64);
}

unsafe extern "C" fn set_row_invalid(validity: *mut u64, row: idx_t) {
    *validity.add(row as usize / 64) &= !(1 << (row % 64));
}

unsafe extern "C" fn assign_string(
    v: duckdb_vector,
    row: idx_t,
    bytes: *const c_char,
    len: idx_t,
) {
    let copied = std::slice::from_raw_parts(bytes.cast::<u8>(), len as usize).to_vec();
    vector(v).strings[row as usize] = Some(copied);
}

unsafe extern "C" fn is_null_value(v: duckdb_value) -> bool {
    matches!(value(v).payload, Payload::Null)
}

// The value owns its logical type; callers must not destroy it.
unsafe extern "C" fn value_type(v: duckdb_value) -> duckdb_logical_type {
    std::ptr::from_ref(&value(v).type_id).cast_mut().cast()
}

unsafe extern "C" fn get_int64(v: duckdb_value) -> i64 {
    match value(v).payload {
        Payload::Int(i) => i,
        _ => 0,
    }
}

unsafe extern "C" fn get_int32(v: duckdb_value) -> i32 {
    get_int64(v) as i32
}

unsafe extern "C" fn get_hugeint(v: duckdb_value) -> duckdb_hugeint {
    let h = match value(v).payload {
        Payload::Huge(h) => h,
        Payload::Int(i) => i128::from(i),
        _ => 0,
    };
    duckdb_hugeint {
        lower: h as u64,
        upper: (h >> 64) as i64,
    }
}

unsafe extern "C" fn get_interval(v: duckdb_value) -> duckdb_interval {
    match value(v).payload {
        Payload::Interval(i) => i,
        _ => duckdb_interval {
            months: 0,
            days: 0,
            micros: 0,
        },
    }
}

unsafe extern "C" fn get_varchar(v: duckdb_value) -> *mut c_char {
    let text = match &value(v).payload {
        Payload::Text(s) => s.clone(),
        Payload::Int(i) => CString::new(i.to_string()).unwrap_or_default(),
        _ => return std::ptr::null_mut(),
    };
    LIVE_STRINGS.with(|live| live.set(live.get() + 1));
    text.into_raw()
}
