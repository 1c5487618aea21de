// Tests that every engine resource handed out is given back
use std::cell::Cell;
use std::ffi::c_void;

use super::*;
use crate::PcreError;

thread_local! {
    static ALLOCATED: Cell<usize> = const { Cell::new(0) };
    static RELEASED: Cell<usize> = const { Cell::new(0) };
    static BLOCKS_CREATED: Cell<usize> = const { Cell::new(0) };
    static BLOCKS_DESTROYED: Cell<usize> = const { Cell::new(0) };
    static CODES_DESTROYED: Cell<usize> = const { Cell::new(0) };
}

fn bump(counter: &'static std::thread::LocalKey<Cell<usize>>) {
    counter.with(|c| c.set(c.get() + 1));
}

fn read(counter: &'static std::thread::LocalKey<Cell<usize>>) -> usize {
    counter.with(Cell::get)
}

unsafe extern "C" fn counting_allocate(bytes: usize) -> *mut u8 {
    let ptr = unsafe { native::allocate(bytes) };
    if !ptr.is_null() {
        bump(&ALLOCATED);
    }
    ptr
}

unsafe extern "C" fn counting_release(ptr: *mut u8) {
    if !ptr.is_null() {
        bump(&RELEASED);
    }
    unsafe { native::release(ptr) };
}

unsafe extern "C" fn counting_create_match_data(code: *mut c_void) -> *mut c_void {
    let block = unsafe { native::create_match_data(code) };
    if !block.is_null() {
        bump(&BLOCKS_CREATED);
    }
    block
}

unsafe extern "C" fn counting_destroy_match_data(block: *mut c_void) {
    if !block.is_null() {
        bump(&BLOCKS_DESTROYED);
    }
    unsafe { native::destroy_match_data(block) };
}

unsafe extern "C" fn counting_destroy_code(code: *mut c_void) {
    bump(&CODES_DESTROYED);
    unsafe { native::destroy_code(code) };
}

fn counting_engine(limits: Limits) -> Engine {
    let api = EngineApi {
        allocate: counting_allocate,
        release: counting_release,
        create_match_data: counting_create_match_data,
        destroy_match_data: counting_destroy_match_data,
        destroy_code: counting_destroy_code,
        ..native_api()
    };
    Engine::from_api(api).with_limits(limits)
}

fn assert_balanced() {
    assert_eq!(read(&ALLOCATED), read(&RELEASED), "engine heap leaked");
    assert_eq!(read(&BLOCKS_CREATED), read(&BLOCKS_DESTROYED), "match data leaked");
}

#[test]
fn test_every_exit_path_releases_engine_memory() {
    let engine = counting_engine(Limits {
        max_substitute_units: 64,
        ..Limits::default()
    });
    let pattern = engine.compile(r"(?<word>a+)", "").unwrap();

    assert!(pattern.find("xaay").unwrap().is_some());
    assert!(pattern.find("xyz").unwrap().is_none());
    assert!(pattern.find(&[0x61u16, 0xD800]).unwrap_err().is_utf_error());
    assert_eq!(pattern.match_all("a b aa").unwrap().len(), 3);
    assert_eq!(pattern.substitute_all("a-a", "${word}!").unwrap(), "a!-a!");
    assert_eq!(pattern.substitute_all("a-a", "").unwrap(), "-");
    assert_eq!(pattern.substitute("xyz", "b").unwrap(), "xyz");
    assert!(matches!(
        pattern.substitute("a", "$9"),
        Err(PcreError::Substitute(_))
    ));
    assert!(pattern.substitute("a", &[0xDC00u16]).unwrap_err().is_utf_error());
    assert!(pattern.substitute_all("a a a a", &"b".repeat(32)).unwrap_err().is_no_memory());
    assert!(read(&BLOCKS_CREATED) > 0);
    assert_balanced();

    assert!(matches!(engine.compile("a(a", ""), Err(PcreError::Compile(_))));
    assert_balanced();

    drop(pattern);
    assert!(read(&ALLOCATED) > 0);
    assert_balanced();
}

#[test]
fn test_code_released_once_across_destroy_and_drop() {
    let engine = counting_engine(Limits::default());
    let before = read(&CODES_DESTROYED);

    let mut pattern = engine.compile("abc", "").unwrap();
    pattern.destroy();
    pattern.destroy();
    assert_eq!(read(&CODES_DESTROYED) - before, 1);
    drop(pattern);
    assert_eq!(read(&CODES_DESTROYED) - before, 1);

    let pattern = engine.compile("abc", "").unwrap();
    drop(pattern);
    assert_eq!(read(&CODES_DESTROYED) - before, 2);

    assert!(engine.compile(")", "").is_err());
    assert_eq!(read(&CODES_DESTROYED) - before, 2);
}
