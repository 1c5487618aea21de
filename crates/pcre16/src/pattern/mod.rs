// Compiled pattern
// One foreign code handle per Pattern. The handle is released exactly once,
// by `destroy` or on drop, whichever comes first.

mod iter;
mod matcher;
mod names;
mod substitute;

use std::ffi::{CString, c_void};
use std::fmt;
use std::ptr::NonNull;

use crate::engine::Engine;
use crate::error::{CompileError, PcreError, PcreResult};
use crate::ffi::ForeignBuffer;
use crate::flags::CompileFlags;
use crate::{global, last_error};

pub use names::NameTable;

pub struct Pattern {
    engine: Engine,
    handle: Option<NonNull<c_void>>,
    source: String,
    flags: CompileFlags,
    capture_count: usize,
    names: NameTable,
}

impl Pattern {
    /// Compile through the process-wide engine set up by [`crate::init`].
    pub fn new(pattern: &str, flags: &str) -> PcreResult<Self> {
        global::engine()?.compile(pattern, flags)
    }

    pub(crate) fn compile(engine: &Engine, pattern: &str, flags: CompileFlags) -> PcreResult<Self> {
        let api = engine.api();
        let units: Vec<u16> = pattern.encode_utf16().collect();
        let flag_string = CString::new(flags.as_flag_string())
            .map_err(|e| PcreError::Encoding(e.to_string()))?;

        let buffer = ForeignBuffer::from_units(api, &units)?;
        let raw = unsafe { (api.compile)(buffer.as_ptr(), units.len(), flag_string.as_ptr()) };
        let Some(handle) = NonNull::new(raw) else {
            let err = last_error::read(api)?;
            log::trace!("compile failed for /{}/{}: {}", pattern, flags, err.message);
            return Err(CompileError {
                message: err.message,
                offset: err.offset,
            }
            .into());
        };
        drop(buffer);

        let mut compiled = Pattern {
            engine: engine.clone(),
            handle: Some(handle),
            source: pattern.to_string(),
            flags,
            capture_count: 0,
            names: NameTable::default(),
        };
        // From here on an early return drops `compiled`, which frees the handle.
        compiled.capture_count = unsafe { (api.get_capture_count)(raw) } as usize;
        compiled.names = unsafe { NameTable::decode(api, raw)? };

        log::trace!(
            "compiled /{}/{} -> {:p} ({} groups, {} named)",
            pattern,
            flags,
            raw,
            compiled.capture_count,
            compiled.names.len()
        );
        Ok(compiled)
    }

    /// Release the foreign handle. Calling it again is a no-op.
    pub fn destroy(&mut self) {
        if let Some(handle) = self.handle.take() {
            log::trace!("destroy {:p} /{}/{}", handle, self.source, self.flags);
            unsafe { (self.engine.api().destroy_code)(handle.as_ptr()) };
        }
    }

    pub fn is_destroyed(&self) -> bool {
        self.handle.is_none()
    }

    pub(crate) fn handle(&self) -> PcreResult<*mut c_void> {
        self.handle.map(NonNull::as_ptr).ok_or(PcreError::Destroyed)
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn flags(&self) -> &CompileFlags {
        &self.flags
    }

    /// Number of capturing groups, not counting group 0.
    pub fn capture_count(&self) -> usize {
        self.capture_count
    }

    pub fn names(&self) -> &NameTable {
        &self.names
    }
}

impl Drop for Pattern {
    fn drop(&mut self) {
        self.destroy();
    }
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pattern")
            .field("source", &self.source)
            .field("flags", &self.flags.as_flag_string())
            .field("capture_count", &self.capture_count)
            .field("destroyed", &self.is_destroyed())
            .finish()
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}/{}", self.source, self.flags)
    }
}
