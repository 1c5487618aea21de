// Foreign engine ABI
// Function table for the natively compiled engine: resolved by symbol name
// from a shared library, or assembled from functions linked into the host.

use std::ffi::{c_char, c_void};

use crate::error::{PcreError, PcreResult};

pub mod codes;
mod memory;

pub(crate) use memory::ForeignBuffer;

/// Opaque compiled-pattern handle owned by the engine.
pub type CodeHandle = *mut c_void;
/// Opaque match data block owned by the engine.
pub type MatchDataHandle = *mut c_void;

pub type AllocateFn = unsafe extern "C" fn(bytes: usize) -> *mut u8;
pub type ReleaseFn = unsafe extern "C" fn(ptr: *mut u8);
pub type VersionFn = unsafe extern "C" fn(buffer: *mut u16) -> i32;
pub type CompileFn =
    unsafe extern "C" fn(pattern: *const u16, length: usize, flags: *const c_char) -> CodeHandle;
pub type DestroyCodeFn = unsafe extern "C" fn(code: CodeHandle);
pub type LastErrorMessageFn = unsafe extern "C" fn(buffer: *mut u16, capacity: usize) -> i32;
pub type LastErrorOffsetFn = unsafe extern "C" fn() -> usize;
pub type CreateMatchDataFn = unsafe extern "C" fn(code: CodeHandle) -> MatchDataHandle;
pub type DestroyMatchDataFn = unsafe extern "C" fn(block: MatchDataHandle);
pub type MatchFn = unsafe extern "C" fn(
    code: CodeHandle,
    subject: *const u16,
    length: usize,
    start: usize,
    block: MatchDataHandle,
) -> i32;
pub type OvectorCountFn = unsafe extern "C" fn(block: MatchDataHandle) -> u32;
pub type OvectorPointerFn = unsafe extern "C" fn(block: MatchDataHandle) -> *const u32;
pub type CodeInfoFn = unsafe extern "C" fn(code: CodeHandle) -> u32;
pub type NameTableFn = unsafe extern "C" fn(code: CodeHandle) -> *const u8;
pub type SubstituteFn = unsafe extern "C" fn(
    code: CodeHandle,
    subject: *const u16,
    length: usize,
    start: usize,
    block: MatchDataHandle,
    options: u32,
    replacement: *const u16,
    replacement_length: usize,
    output: *mut u16,
    output_capacity: usize,
) -> i32;

/// Every entry point the marshaling layer calls.
///
/// Lengths, offsets and capacities are in UTF-16 code units, except the name
/// table entry size which is in bytes.
#[derive(Clone, Copy)]
pub struct EngineApi {
    pub allocate: AllocateFn,
    pub release: ReleaseFn,
    pub version: VersionFn,
    pub compile: CompileFn,
    pub destroy_code: DestroyCodeFn,
    pub last_error_message: LastErrorMessageFn,
    pub last_error_offset: LastErrorOffsetFn,
    pub create_match_data: CreateMatchDataFn,
    pub destroy_match_data: DestroyMatchDataFn,
    pub match_: MatchFn,
    pub get_ovector_count: OvectorCountFn,
    pub get_ovector_pointer: OvectorPointerFn,
    pub get_capture_count: CodeInfoFn,
    pub get_match_name_count: CodeInfoFn,
    pub get_match_name_table_entry_size: CodeInfoFn,
    pub get_match_name_table: NameTableFn,
    pub substitute: SubstituteFn,
}

impl EngineApi {
    /// Resolve every entry point from a loaded module.
    ///
    /// # Safety
    /// The library's symbols must have the signatures declared above. The
    /// returned table must not outlive `lib`.
    pub unsafe fn from_library(lib: &libloading::Library) -> PcreResult<Self> {
        unsafe fn symbol<T: Copy>(lib: &libloading::Library, name: &str) -> PcreResult<T> {
            unsafe {
                let sym: libloading::Symbol<T> = lib.get(name.as_bytes()).map_err(|e| {
                    PcreError::Load(format!("Symbol '{}' not found: {}", name, e))
                })?;
                Ok(*sym)
            }
        }

        unsafe {
            Ok(EngineApi {
                allocate: symbol(lib, "allocate")?,
                release: symbol(lib, "release")?,
                version: symbol(lib, "version")?,
                compile: symbol(lib, "compile")?,
                destroy_code: symbol(lib, "destroyCode")?,
                last_error_message: symbol(lib, "lastErrorMessage")?,
                last_error_offset: symbol(lib, "lastErrorOffset")?,
                create_match_data: symbol(lib, "createMatchData")?,
                destroy_match_data: symbol(lib, "destroyMatchData")?,
                match_: symbol(lib, "match")?,
                get_ovector_count: symbol(lib, "getOvectorCount")?,
                get_ovector_pointer: symbol(lib, "getOvectorPointer")?,
                get_capture_count: symbol(lib, "getCaptureCount")?,
                get_match_name_count: symbol(lib, "getMatchNameCount")?,
                get_match_name_table_entry_size: symbol(lib, "getMatchNameTableEntrySize")?,
                get_match_name_table: symbol(lib, "getMatchNameTable")?,
                substitute: symbol(lib, "substitute")?,
            })
        }
    }
}

impl std::fmt::Debug for EngineApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EngineApi")
            .field("compile", &(self.compile as *const c_void))
            .field("match", &(self.match_ as *const c_void))
            .finish_non_exhaustive()
    }
}
