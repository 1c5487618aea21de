pub mod test_global;
pub mod test_match_all;
pub mod test_resources;

#[cfg(feature = "serde")]
pub mod test_serde;

use pcre16_regex_engine as native;

use crate::{Engine, EngineApi, Limits, Pattern};

/// Function table over the in-process reference engine.
pub fn native_api() -> EngineApi {
    EngineApi {
        allocate: native::allocate,
        release: native::release,
        version: native::version,
        compile: native::compile,
        destroy_code: native::destroy_code,
        last_error_message: native::last_error_message,
        last_error_offset: native::last_error_offset,
        create_match_data: native::create_match_data,
        destroy_match_data: native::destroy_match_data,
        match_: native::r#match,
        get_ovector_count: native::get_ovector_count,
        get_ovector_pointer: native::get_ovector_pointer,
        get_capture_count: native::get_capture_count,
        get_match_name_count: native::get_match_name_count,
        get_match_name_table_entry_size: native::get_match_name_table_entry_size,
        get_match_name_table: native::get_match_name_table,
        substitute: native::substitute,
    }
}

pub fn engine() -> Engine {
    Engine::from_api(native_api())
}

pub fn engine_with(limits: Limits) -> Engine {
    engine().with_limits(limits)
}

pub fn compile(pattern: &str, flags: &str) -> Pattern {
    match engine().compile(pattern, flags) {
        Ok(pattern) => pattern,
        Err(e) => panic!("compile /{}/{} failed: {}", pattern, flags, e),
    }
}

pub fn utf16(text: &str) -> Vec<u16> {
    text.encode_utf16().collect()
}
