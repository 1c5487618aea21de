// Tests for the process-wide engine and version reporting
use super::*;
use crate::global;

#[test]
fn test_engine_version() {
    let version = engine().version().unwrap();
    assert!(version.starts_with("pcre16_regex_engine"), "{}", version);
}

#[test]
fn test_init_with_is_idempotent() {
    let first = global::init_with(engine()) as *const Engine;
    let second = global::init_with(engine()) as *const Engine;
    assert_eq!(first, second);
    assert!(global::is_initialized());

    let pattern = Pattern::new("b+", "").unwrap();
    assert_eq!(pattern.find("abbc").unwrap().unwrap()[0].text, "bb");
    assert!(global::version().unwrap().starts_with("pcre16_regex_engine"));
}

#[test]
fn test_load_missing_module() {
    let err = Engine::load("/nonexistent/libpcre16_missing.so").unwrap_err();
    assert!(matches!(err, crate::PcreError::Load(_)));
}
