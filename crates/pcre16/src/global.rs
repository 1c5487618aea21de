//! Process-wide engine, set up once.

use std::ffi::OsStr;
use std::sync::OnceLock;

use crate::engine::Engine;
use crate::error::{PcreError, PcreResult};

/// Environment variable naming the engine module for [`init_from_env`].
pub const ENGINE_PATH_VAR: &str = "PCRE16_ENGINE";

static ENGINE: OnceLock<Engine> = OnceLock::new();

/// Load the engine module at `path`. Later calls return the engine that is
/// already installed without loading anything.
pub fn init<P: AsRef<OsStr>>(path: P) -> PcreResult<&'static Engine> {
    if let Some(engine) = ENGINE.get() {
        return Ok(engine);
    }
    let engine = Engine::load(path)?;
    Ok(ENGINE.get_or_init(|| engine))
}

/// Install an engine built by the caller. Returns whichever engine ends up
/// installed.
pub fn init_with(engine: Engine) -> &'static Engine {
    ENGINE.get_or_init(|| engine)
}

/// [`init`] with the path taken from `PCRE16_ENGINE`.
pub fn init_from_env() -> PcreResult<&'static Engine> {
    if let Some(engine) = ENGINE.get() {
        return Ok(engine);
    }
    let path = std::env::var_os(ENGINE_PATH_VAR)
        .ok_or_else(|| PcreError::Load(format!("{} is not set", ENGINE_PATH_VAR)))?;
    init(path)
}

pub fn engine() -> PcreResult<&'static Engine> {
    ENGINE.get().ok_or(PcreError::NotInitialized)
}

pub fn is_initialized() -> bool {
    ENGINE.get().is_some()
}

/// Version string of the process-wide engine.
pub fn version() -> PcreResult<String> {
    engine()?.version()
}
