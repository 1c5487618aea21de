// Scoped regions of the engine heap.
//
// Every buffer handed to the engine is allocated with its `allocate` export
// and released through `release` when the guard drops, on every exit path.

use std::ptr::NonNull;

use crate::error::{PcreError, PcreResult};
use crate::ffi::EngineApi;

pub(crate) struct ForeignBuffer<'a> {
    api: &'a EngineApi,
    ptr: NonNull<u16>,
    capacity: usize,
}

impl<'a> ForeignBuffer<'a> {
    /// Allocate room for `capacity` code units.
    pub fn alloc(api: &'a EngineApi, capacity: usize) -> PcreResult<Self> {
        // Zero-sized requests still get a real block so the pointer is valid.
        let bytes = capacity
            .max(1)
            .checked_mul(2)
            .ok_or(PcreError::Allocation { bytes: usize::MAX })?;
        let raw = unsafe { (api.allocate)(bytes) };
        let ptr = NonNull::new(raw as *mut u16).ok_or(PcreError::Allocation { bytes })?;
        Ok(ForeignBuffer { api, ptr, capacity })
    }

    /// Allocate and fill with `units`.
    pub fn from_units(api: &'a EngineApi, units: &[u16]) -> PcreResult<Self> {
        let buffer = Self::alloc(api, units.len())?;
        unsafe {
            std::ptr::copy_nonoverlapping(units.as_ptr(), buffer.ptr.as_ptr(), units.len());
        }
        Ok(buffer)
    }

    pub fn as_ptr(&self) -> *const u16 {
        self.ptr.as_ptr()
    }

    pub fn as_mut_ptr(&mut self) -> *mut u16 {
        self.ptr.as_ptr()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// The first `len` code units, clamped to the capacity.
    ///
    /// Only meaningful for the prefix the engine reports having written.
    pub fn units(&self, len: usize) -> &[u16] {
        unsafe { std::slice::from_raw_parts(self.ptr.as_ptr(), len.min(self.capacity)) }
    }
}

impl Drop for ForeignBuffer<'_> {
    fn drop(&mut self) {
        unsafe { (self.api.release)(self.ptr.as_ptr() as *mut u8) };
    }
}
