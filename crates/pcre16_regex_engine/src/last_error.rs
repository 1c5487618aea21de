// Engine-wide error channel.
//
// The native module keeps one error slot for the whole process. Here it is
// kept per thread so that parallel test threads cannot clobber each other;
// a single-threaded host observes the same behaviour either way.

use std::cell::RefCell;

use crate::codes;

#[derive(Debug, Clone)]
pub struct LastError {
    pub code: i32,
    pub message: String,
    pub offset: usize,
}

impl LastError {
    fn clear() -> Self {
        LastError {
            code: 0,
            message: codes::message(0).to_string(),
            offset: 0,
        }
    }
}

thread_local! {
    static LAST_ERROR: RefCell<LastError> = RefCell::new(LastError::clear());
}

pub fn reset() {
    LAST_ERROR.with(|slot| *slot.borrow_mut() = LastError::clear());
}

/// Record a result code using its standard message.
pub fn set_code(code: i32, offset: usize) {
    set(code, codes::message(code).to_string(), offset);
}

pub fn set(code: i32, message: String, offset: usize) {
    LAST_ERROR.with(|slot| {
        *slot.borrow_mut() = LastError {
            code,
            message,
            offset,
        }
    });
}

pub fn get() -> LastError {
    LAST_ERROR.with(|slot| slot.borrow().clone())
}
