// Size-prefixed heap behind the `allocate`/`release` exports.
//
// Callers only hand back the pointer, so the allocation size is stashed in a
// header in front of the returned block.

use std::alloc::{Layout, alloc, dealloc};

const HEADER: usize = 16;
const ALIGN: usize = 16;

pub fn allocate(bytes: usize) -> *mut u8 {
    let Some(total) = bytes.checked_add(HEADER) else {
        return std::ptr::null_mut();
    };
    let Ok(layout) = Layout::from_size_align(total, ALIGN) else {
        return std::ptr::null_mut();
    };
    unsafe {
        let base = alloc(layout);
        if base.is_null() {
            return base;
        }
        (base as *mut usize).write(total);
        base.add(HEADER)
    }
}

/// # Safety
/// `ptr` must be null or a pointer returned by [`allocate`] that has not been
/// released yet.
pub unsafe fn release(ptr: *mut u8) {
    if ptr.is_null() {
        return;
    }
    unsafe {
        let base = ptr.sub(HEADER);
        let total = (base as *const usize).read();
        dealloc(base, Layout::from_size_align_unchecked(total, ALIGN));
    }
}
