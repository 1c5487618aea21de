// Engine handle
// Owns the function table and keeps the native module mapped for as long as
// any pattern compiled through it is alive.

use std::ffi::OsStr;
use std::ptr;
use std::sync::Arc;

use crate::codec;
use crate::error::{PcreError, PcreResult};
use crate::ffi::{EngineApi, ForeignBuffer};
use crate::flags::CompileFlags;
use crate::limits::Limits;
use crate::pattern::Pattern;

#[derive(Clone)]
pub struct Engine {
    api: EngineApi,
    limits: Limits,
    library: Option<Arc<libloading::Library>>,
}

impl Engine {
    /// Load the native module at `path` and resolve its entry points.
    pub fn load<P: AsRef<OsStr>>(path: P) -> PcreResult<Self> {
        let path = path.as_ref();
        let lib = unsafe {
            libloading::Library::new(path).map_err(|e| {
                PcreError::Load(format!("Failed to load library '{}': {}", path.to_string_lossy(), e))
            })?
        };
        let api = unsafe { EngineApi::from_library(&lib)? };
        log::debug!("loaded regex engine from {}", path.to_string_lossy());

        Ok(Engine {
            api,
            limits: Limits::default(),
            library: Some(Arc::new(lib)),
        })
    }

    /// Wrap entry points that are already linked into the process.
    pub fn from_api(api: EngineApi) -> Self {
        Engine {
            api,
            limits: Limits::default(),
            library: None,
        }
    }

    /// The same engine with different limits; patterns compiled afterwards
    /// inherit them.
    pub fn with_limits(&self, limits: Limits) -> Self {
        Engine {
            api: self.api,
            limits,
            library: self.library.clone(),
        }
    }

    pub fn api(&self) -> &EngineApi {
        &self.api
    }

    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    pub fn is_loaded_module(&self) -> bool {
        self.library.is_some()
    }

    /// Version string reported by the engine.
    pub fn version(&self) -> PcreResult<String> {
        let needed = unsafe { (self.api.version)(ptr::null_mut()) };
        if needed <= 0 {
            return Ok(String::new());
        }
        let mut buffer = ForeignBuffer::alloc(&self.api, needed as usize)?;
        let written = unsafe { (self.api.version)(buffer.as_mut_ptr()) }.clamp(0, needed);
        codec::decode(codec::trim_nul(buffer.units(written as usize)))
    }

    /// Compile `pattern` with a flag string such as `"im"`.
    pub fn compile(&self, pattern: &str, flags: &str) -> PcreResult<Pattern> {
        let flags: CompileFlags = flags.parse()?;
        Pattern::compile(self, pattern, flags)
    }

    pub fn compile_with(&self, pattern: &str, flags: CompileFlags) -> PcreResult<Pattern> {
        Pattern::compile(self, pattern, flags)
    }
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("limits", &self.limits)
            .field("loaded_module", &self.is_loaded_module())
            .finish()
    }
}
