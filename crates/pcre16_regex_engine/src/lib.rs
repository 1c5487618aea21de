//! A pure-Rust regex engine exposing the pcre16 C ABI.
//!
//! Subjects, patterns and replacements cross the boundary as UTF-16 code
//! units; offsets are reported in code units; result codes use PCRE2's
//! numbering. Build the cdylib with the `abi-exports` feature to produce a
//! module a host can load by symbol name, or link the rlib and call the
//! functions directly.
//!
//! | Function | Description |
//! |---|---|
//! | `allocate(bytes) -> *mut u8` / `release(ptr)` | engine heap |
//! | `version(buf) -> len` | version string; null `buf` returns the required length |
//! | `compile(pattern, len, flags) -> code` | null on failure, see `lastErrorMessage` |
//! | `match(code, subject, len, start, block) -> rc` | `rc` is one more than the highest set group |
//! | `substitute(...) -> written` | units written, `0` when nothing was replaced |

mod code;
pub mod codes;
mod heap;
mod last_error;
mod match_data;
mod replace;
mod utf16;

use std::ffi::{CStr, c_char, c_void};
use std::ptr;

use code::CompiledCode;
use match_data::MatchData;
use replace::Template;

/// Version string reported through `version`.
pub const VERSION: &str = concat!("pcre16_regex_engine ", env!("CARGO_PKG_VERSION"));

/// Compile failures are reported under a positive code, like PCRE2's
/// compile-time error numbers.
const COMPILE_ERROR: i32 = 100;

fn fail(code: i32, offset: usize) -> i32 {
    last_error::set_code(code, offset);
    code
}

/// Copy `units` plus a terminating NUL into `buffer`, truncating to
/// `capacity`. Returns the number of units copied, excluding the NUL.
unsafe fn write_terminated(units: &[u16], buffer: *mut u16, capacity: usize) -> usize {
    let n = units.len().min(capacity.saturating_sub(1));
    unsafe {
        ptr::copy_nonoverlapping(units.as_ptr(), buffer, n);
        buffer.add(n).write(0);
    }
    n
}

// ---------------------------------------------------------------------------
// Heap
// ---------------------------------------------------------------------------

#[cfg_attr(feature = "abi-exports", unsafe(export_name = "allocate"))]
pub unsafe extern "C" fn allocate(bytes: usize) -> *mut u8 {
    heap::allocate(bytes)
}

/// # Safety
/// `ptr` must be null or come from [`allocate`] and not have been released.
#[cfg_attr(feature = "abi-exports", unsafe(export_name = "release"))]
pub unsafe extern "C" fn release(ptr: *mut u8) {
    unsafe { heap::release(ptr) }
}

// ---------------------------------------------------------------------------
// Version and error channel
// ---------------------------------------------------------------------------

/// # Safety
/// A non-null `buffer` must have room for the length returned by a null call.
#[cfg_attr(feature = "abi-exports", unsafe(export_name = "version"))]
pub unsafe extern "C" fn version(buffer: *mut u16) -> i32 {
    let units = utf16::encode(VERSION);
    if !buffer.is_null() {
        unsafe { write_terminated(&units, buffer, units.len() + 1) };
    }
    (units.len() + 1) as i32
}

/// # Safety
/// A non-null `buffer` must have room for `capacity` code units.
#[cfg_attr(feature = "abi-exports", unsafe(export_name = "lastErrorMessage"))]
pub unsafe extern "C" fn last_error_message(buffer: *mut u16, capacity: usize) -> i32 {
    let units = utf16::encode(&last_error::get().message);
    if buffer.is_null() || capacity == 0 {
        return (units.len() + 1) as i32;
    }
    let written = unsafe { write_terminated(&units, buffer, capacity) };
    if written < units.len() {
        codes::NOMEMORY
    } else {
        written as i32
    }
}

#[cfg_attr(feature = "abi-exports", unsafe(export_name = "lastErrorOffset"))]
pub unsafe extern "C" fn last_error_offset() -> usize {
    last_error::get().offset
}

// ---------------------------------------------------------------------------
// Compiled code
// ---------------------------------------------------------------------------

/// # Safety
/// `pattern` must point to `length` code units; `flags` must be null or a
/// NUL-terminated string.
#[cfg_attr(feature = "abi-exports", unsafe(export_name = "compile"))]
pub unsafe extern "C" fn compile(pattern: *const u16, length: usize, flags: *const c_char) -> *mut c_void {
    last_error::reset();
    if pattern.is_null() && length > 0 {
        fail(codes::NULL, 0);
        return ptr::null_mut();
    }
    let units = unsafe { utf16::units_from_raw(pattern, length) };
    let flags = if flags.is_null() {
        ""
    } else {
        match unsafe { CStr::from_ptr(flags) }.to_str() {
            Ok(flags) => flags,
            Err(_) => {
                last_error::set(COMPILE_ERROR, "flags are not valid UTF-8".to_string(), 0);
                return ptr::null_mut();
            }
        }
    };

    match CompiledCode::compile(units, flags) {
        Ok(code) => Box::into_raw(Box::new(code)) as *mut c_void,
        Err(failure) => {
            last_error::set(COMPILE_ERROR, failure.message, failure.offset);
            ptr::null_mut()
        }
    }
}

/// # Safety
/// `code` must be null or a live handle from [`compile`]; it is invalid
/// afterwards.
#[cfg_attr(feature = "abi-exports", unsafe(export_name = "destroyCode"))]
pub unsafe extern "C" fn destroy_code(code: *mut c_void) {
    if !code.is_null() {
        unsafe { drop(Box::from_raw(code as *mut CompiledCode)) };
    }
}

unsafe fn code_ref<'a>(code: *mut c_void) -> Option<&'a CompiledCode> {
    unsafe { (code as *const CompiledCode).as_ref() }
}

/// # Safety
/// `code` must be null or a live handle from [`compile`].
#[cfg_attr(feature = "abi-exports", unsafe(export_name = "getCaptureCount"))]
pub unsafe extern "C" fn get_capture_count(code: *mut c_void) -> u32 {
    unsafe { code_ref(code) }.map_or(0, |code| code.capture_count)
}

/// # Safety
/// `code` must be null or a live handle from [`compile`].
#[cfg_attr(feature = "abi-exports", unsafe(export_name = "getMatchNameCount"))]
pub unsafe extern "C" fn get_match_name_count(code: *mut c_void) -> u32 {
    unsafe { code_ref(code) }.map_or(0, |code| code.names.count)
}

/// Size of one name table entry in bytes.
///
/// # Safety
/// `code` must be null or a live handle from [`compile`].
#[cfg_attr(feature = "abi-exports", unsafe(export_name = "getMatchNameTableEntrySize"))]
pub unsafe extern "C" fn get_match_name_table_entry_size(code: *mut c_void) -> u32 {
    unsafe { code_ref(code) }.map_or(0, |code| code.names.entry_size)
}

/// # Safety
/// `code` must be null or a live handle from [`compile`]. The table lives as
/// long as the handle.
#[cfg_attr(feature = "abi-exports", unsafe(export_name = "getMatchNameTable"))]
pub unsafe extern "C" fn get_match_name_table(code: *mut c_void) -> *const u8 {
    unsafe { code_ref(code) }.map_or(ptr::null(), |code| code.names.bytes.as_ptr())
}

// ---------------------------------------------------------------------------
// Match data
// ---------------------------------------------------------------------------

/// # Safety
/// `code` must be null or a live handle from [`compile`].
#[cfg_attr(feature = "abi-exports", unsafe(export_name = "createMatchData"))]
pub unsafe extern "C" fn create_match_data(code: *mut c_void) -> *mut c_void {
    match unsafe { code_ref(code) } {
        Some(code) => {
            let block = MatchData::new(code.capture_count as usize + 1);
            Box::into_raw(Box::new(block)) as *mut c_void
        }
        None => ptr::null_mut(),
    }
}

/// # Safety
/// `block` must be null or a live block from [`create_match_data`].
#[cfg_attr(feature = "abi-exports", unsafe(export_name = "destroyMatchData"))]
pub unsafe extern "C" fn destroy_match_data(block: *mut c_void) {
    if !block.is_null() {
        unsafe { drop(Box::from_raw(block as *mut MatchData)) };
    }
}

/// # Safety
/// `block` must be null or a live block from [`create_match_data`].
#[cfg_attr(feature = "abi-exports", unsafe(export_name = "getOvectorCount"))]
pub unsafe extern "C" fn get_ovector_count(block: *mut c_void) -> u32 {
    unsafe { (block as *const MatchData).as_ref() }.map_or(0, |block| block.pairs() as u32)
}

/// # Safety
/// `block` must be null or a live block from [`create_match_data`].
#[cfg_attr(feature = "abi-exports", unsafe(export_name = "getOvectorPointer"))]
pub unsafe extern "C" fn get_ovector_pointer(block: *mut c_void) -> *const u32 {
    unsafe { (block as *const MatchData).as_ref() }.map_or(ptr::null(), |block| block.ovector.as_ptr())
}

// ---------------------------------------------------------------------------
// Matching and substitution
// ---------------------------------------------------------------------------

/// # Safety
/// `code` and `block` must be live handles; `subject` must point to `length`
/// code units.
#[cfg_attr(feature = "abi-exports", unsafe(export_name = "match"))]
pub unsafe extern "C" fn r#match(
    code: *mut c_void,
    subject: *const u16,
    length: usize,
    start: usize,
    block: *mut c_void,
) -> i32 {
    last_error::reset();
    let (Some(code), Some(block)) = (unsafe { code_ref(code) }, unsafe { (block as *mut MatchData).as_mut() })
    else {
        return fail(codes::NULL, 0);
    };
    if subject.is_null() && length > 0 {
        return fail(codes::NULL, 0);
    }

    let units = unsafe { utf16::units_from_raw(subject, length) };
    let text = match utf16::decode(units) {
        Ok(text) => text,
        Err((rc, offset)) => return fail(rc, offset),
    };
    if start > length {
        return fail(codes::BADOFFSET, start);
    }
    let Some(byte_start) = text.byte_at_unit(start) else {
        return fail(codes::BADUTFOFFSET, start);
    };

    match code.regex.captures_at(&text.string, byte_start) {
        Some(caps) => block.record(&caps, &text),
        None => fail(codes::NOMATCH, 0),
    }
}

/// # Safety
/// `code` must be a live handle and `block` null or a live block; `subject`
/// and `replacement` must point to their stated lengths; `output` must have
/// room for `output_capacity` code units.
#[cfg_attr(feature = "abi-exports", unsafe(export_name = "substitute"))]
pub unsafe extern "C" fn substitute(
    code: *mut c_void,
    subject: *const u16,
    length: usize,
    start: usize,
    block: *mut c_void,
    options: u32,
    replacement: *const u16,
    replacement_length: usize,
    output: *mut u16,
    output_capacity: usize,
) -> i32 {
    last_error::reset();
    let Some(code) = (unsafe { code_ref(code) }) else {
        return fail(codes::NULL, 0);
    };
    if (subject.is_null() && length > 0) || (replacement.is_null() && replacement_length > 0) {
        return fail(codes::NULL, 0);
    }
    let mut block = unsafe { (block as *mut MatchData).as_mut() };

    let text = match utf16::decode(unsafe { utf16::units_from_raw(subject, length) }) {
        Ok(text) => text,
        Err((rc, offset)) => return fail(rc, offset),
    };
    let template_text = match utf16::decode(unsafe { utf16::units_from_raw(replacement, replacement_length) }) {
        Ok(text) => text,
        Err((rc, offset)) => return fail(rc, offset),
    };
    if start > length {
        return fail(codes::BADOFFSET, start);
    }
    let Some(byte_start) = text.byte_at_unit(start) else {
        return fail(codes::BADUTFOFFSET, start);
    };

    let extended = options & codes::SUBSTITUTE_EXTENDED != 0;
    let global = options & codes::SUBSTITUTE_GLOBAL != 0;
    let unset_empty = options & codes::SUBSTITUTE_UNSET_EMPTY != 0;
    let template = match Template::parse(&template_text.string, &code.regex, extended) {
        Ok(template) => template,
        Err(rc) => return fail(rc, 0),
    };

    let haystack = text.string.as_str();
    let mut out = String::with_capacity(haystack.len());
    out.push_str(&haystack[..byte_start]);
    let mut copied = byte_start;
    let mut pos = byte_start;
    let mut replaced = 0usize;

    while pos <= haystack.len() {
        let Some(caps) = code.regex.captures_at(haystack, pos) else {
            break;
        };
        let Some(whole) = caps.get(0) else {
            break;
        };
        out.push_str(&haystack[copied..whole.start()]);
        if let Err(rc) = template.expand(&caps, unset_empty, &mut out) {
            return fail(rc, text.unit_at_byte(whole.start()));
        }
        if let Some(block) = block.as_deref_mut() {
            block.record(&caps, &text);
        }
        copied = whole.end();
        replaced += 1;

        if !global {
            break;
        }
        pos = if whole.is_empty() {
            whole.end() + haystack[whole.end()..].chars().next().map_or(1, char::len_utf8)
        } else {
            whole.end()
        };
    }

    if replaced == 0 {
        return 0;
    }
    out.push_str(&haystack[copied..]);

    let encoded = utf16::encode(&out);
    if output.is_null() || encoded.len() >= output_capacity || encoded.len() > i32::MAX as usize {
        return fail(codes::NOMEMORY, 0);
    }
    unsafe { write_terminated(&encoded, output, output_capacity) as i32 }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Compiled(*mut c_void);

    impl Compiled {
        fn new(pattern: &str, flags: &CStr) -> Self {
            let units = utf16::encode(pattern);
            let code = unsafe { compile(units.as_ptr(), units.len(), flags.as_ptr()) };
            assert!(!code.is_null(), "{}", last_error::get().message);
            Compiled(code)
        }
    }

    impl Drop for Compiled {
        fn drop(&mut self) {
            unsafe { destroy_code(self.0) };
        }
    }

    fn run_substitute(code: &Compiled, subject: &[u16], replacement: &str, options: u32, capacity: usize) -> (i32, Vec<u16>) {
        let replacement = utf16::encode(replacement);
        let mut out = vec![0u16; capacity];
        let rc = unsafe {
            substitute(
                code.0,
                subject.as_ptr(),
                subject.len(),
                0,
                ptr::null_mut(),
                options,
                replacement.as_ptr(),
                replacement.len(),
                out.as_mut_ptr(),
                out.len(),
            )
        };
        (rc, out)
    }

    #[test]
    fn test_version_size_query() {
        let needed = unsafe { version(ptr::null_mut()) } as usize;
        let mut buffer = vec![0xFFFFu16; needed];
        unsafe { version(buffer.as_mut_ptr()) };
        assert_eq!(buffer[needed - 1], 0);
        assert_eq!(String::from_utf16(&buffer[..needed - 1]).unwrap(), VERSION);
    }

    #[test]
    fn test_compile_failure_sets_error_channel() {
        let units = utf16::encode("a)aa");
        let code = unsafe { compile(units.as_ptr(), units.len(), ptr::null()) };
        assert!(code.is_null());
        assert_eq!(unsafe { last_error_offset() }, 1);

        let mut buffer = [0u16; 8];
        let rc = unsafe { last_error_message(buffer.as_mut_ptr(), buffer.len()) };
        assert_eq!(rc, codes::NOMEMORY);
        assert_eq!(buffer[7], 0);
    }

    #[test]
    fn test_match_reports_utf16_offsets() {
        let code = Compiled::new("(?<word>b+)", c"");
        let block = unsafe { create_match_data(code.0) };
        let subject = utf16::encode("\u{1F600}abb");
        let rc = unsafe { r#match(code.0, subject.as_ptr(), subject.len(), 0, block) };
        assert_eq!(rc, 2);

        let ovector = unsafe { std::slice::from_raw_parts(get_ovector_pointer(block), 4) };
        assert_eq!(ovector, &[3, 5, 3, 5]);
        unsafe { destroy_match_data(block) };
    }

    #[test]
    fn test_match_rejects_offset_inside_surrogate_pair() {
        let code = Compiled::new("a", c"");
        let block = unsafe { create_match_data(code.0) };
        let subject = utf16::encode("\u{1F600}a");
        let rc = unsafe { r#match(code.0, subject.as_ptr(), subject.len(), 1, block) };
        assert_eq!(rc, codes::BADUTFOFFSET);
        unsafe { destroy_match_data(block) };
    }

    #[test]
    fn test_substitute_requires_room_for_terminator() {
        let code = Compiled::new("a", c"");
        let subject = utf16::encode("a");
        let (rc, _) = run_substitute(&code, &subject, "bbbb", 0, 4);
        assert_eq!(rc, codes::NOMEMORY);

        let (rc, out) = run_substitute(&code, &subject, "bbbb", 0, 5);
        assert_eq!(rc, 4);
        assert_eq!(String::from_utf16(&out[..4]).unwrap(), "bbbb");
    }

    #[test]
    fn test_substitute_without_match_writes_nothing() {
        let code = Compiled::new("z", c"");
        let subject = utf16::encode("abc");
        let (rc, _) = run_substitute(&code, &subject, "y", codes::SUBSTITUTE_GLOBAL, 16);
        assert_eq!(rc, 0);
    }

    #[test]
    fn test_substitute_global_empty_matches() {
        let code = Compiled::new("x*", c"");
        let subject = utf16::encode("ab");
        let (rc, out) = run_substitute(&code, &subject, "-", codes::SUBSTITUTE_GLOBAL, 16);
        assert_eq!(rc, 5);
        assert_eq!(String::from_utf16(&out[..5]).unwrap(), "-a-b-");
    }

    #[test]
    fn test_allocate_release_round_trip() {
        let ptr = unsafe { allocate(64) };
        assert!(!ptr.is_null());
        unsafe { release(ptr) };
    }
}
