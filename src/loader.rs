// glload/src/loader.rs
//
//! Resolving entry points and detecting capabilities for a context.

use crate::capabilities::Capabilities;
use crate::error::Error;
use crate::gl::{self, Command, Feature};
use crate::gl_utils;
use crate::info::{GLApi, GLVersion};
use crate::table::FunctionTable;

use fnv::FnvHashSet;
use std::ops::Deref;
use std::os::raw::c_void;

/// The query functions resolved before anything else, in lookup order.
const BOOTSTRAP_COMMANDS: [Command; 3] = [Command::GetString, Command::GetStringi, Command::GetIntegerv];

bitflags! {
    /// Options controlling a load pass.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct LoaderFlags: u8 {
        /// After resolution, give each unresolved entry point the address of a resolved alias
        /// (`glBindBufferARB` for `glBindBuffer`, and so on).
        const RESOLVE_ALIASES  = 0x01;
        /// Don't require `glGetStringi` on contexts older than 3.0, which don't need it.
        const LEGACY_BOOTSTRAP = 0x02;
    }
}

/// A configured load pass.
///
/// `Loader::default()` resolves aliases and requires all three query functions, which is what
/// `Gl::load_with` does.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Loader {
    pub flags: LoaderFlags,
}

impl Default for Loader {
    fn default() -> Loader {
        Loader::new(LoaderFlags::RESOLVE_ALIASES)
    }
}

impl Loader {
    #[inline]
    pub fn new(flags: LoaderFlags) -> Loader {
        Loader { flags }
    }

    /// Loads the context that is current on the calling thread.
    ///
    /// `loadfn` maps a symbol name to its address, or null if the platform doesn't know it. It is
    /// asked about every entry point exactly once and is not retained.
    pub fn load_with<F>(&self, loadfn: F) -> Result<Gl, Error>
    where
        F: FnMut(&'static str) -> *const c_void,
    {
        let mut gl = Gl::unloaded();
        self.reload(&mut gl, loadfn)?;
        Ok(gl)
    }

    /// Runs a full load pass over an existing `Gl`, replacing all of its state.
    ///
    /// On error, `gl` is left with every flag false and every slot null.
    pub fn reload<F>(&self, gl: &mut Gl, mut loadfn: F) -> Result<(), Error>
    where
        F: FnMut(&'static str) -> *const c_void,
    {
        gl.clear();
        if let Err(error) = self.load_into(gl, &mut loadfn) {
            warn!("OpenGL loading failed: {}", error);
            gl.clear();
            return Err(error);
        }
        Ok(())
    }

    fn load_into<F>(&self, gl: &mut Gl, loadfn: &mut F) -> Result<(), Error>
    where
        F: FnMut(&'static str) -> *const c_void,
    {
        self.bootstrap(&mut gl.functions, loadfn)?;

        let version_string = unsafe { gl_utils::get_string(&gl.functions, gl::VERSION) };
        let version_string = version_string.unwrap_or_default();
        gl.api = GLApi::from_version_string(&version_string);
        gl.version = GLVersion::parse(&version_string);
        debug!("detected OpenGL {} ({:?})", gl.version, version_string);

        let indexed = gl.version >= GLVersion::new(3, 0);
        if indexed && !gl.functions.is_loaded(Command::GetStringi) {
            return Err(Error::BootstrapFunctionMissing(Command::GetStringi.name()));
        }

        // The version flags describe desktop GL; an ES context gets extension flags only.
        if gl.api == GLApi::GL {
            gl.capabilities.set_version_flags(gl.version);
        }
        let extensions = unsafe {
            if indexed {
                indexed_extensions(&gl.functions)
            } else {
                legacy_extensions(&gl.functions)
            }
        };
        let recognized = gl.capabilities.set_extension_flags(&extensions);
        debug!(
            "driver reports {} extensions, {} known to this build",
            extensions.len(),
            recognized
        );

        gl.functions.resolve_all(loadfn, &BOOTSTRAP_COMMANDS);
        if self.flags.contains(LoaderFlags::RESOLVE_ALIASES) {
            let filled = gl.functions.resolve_aliases();
            debug!("{} entry points resolved through aliases", filled);
        }
        debug!(
            "{} of {} entry points resolved",
            gl.functions.loaded_count(),
            gl::COMMAND_COUNT
        );
        Ok(())
    }

    /// Resolves the query functions, stopping at the first required one that is missing.
    fn bootstrap<F>(&self, functions: &mut FunctionTable, loadfn: &mut F) -> Result<(), Error>
    where
        F: FnMut(&'static str) -> *const c_void,
    {
        for &command in BOOTSTRAP_COMMANDS.iter() {
            let address = loadfn(command.name());
            functions.set(command, address);

            // Whether a missing `glGetStringi` matters depends on the version, checked later.
            let optional =
                command == Command::GetStringi && self.flags.contains(LoaderFlags::LEGACY_BOOTSTRAP);
            if address.is_null() && !optional {
                return Err(Error::BootstrapFunctionMissing(command.name()));
            }
        }
        Ok(())
    }
}

/// Extensions from `glGetIntegerv(GL_NUM_EXTENSIONS)` and `glGetStringi(GL_EXTENSIONS, i)`.
///
/// Core profiles don't have the single extension string, so this is the path for 3.0 and later.
unsafe fn indexed_extensions(functions: &FunctionTable) -> FnvHashSet<String> {
    let count = gl_utils::get_integer(functions, gl::NUM_EXTENSIONS).max(0) as gl::types::GLuint;
    (0..count)
        .filter_map(|index| gl_utils::get_string_indexed(functions, gl::EXTENSIONS, index))
        .collect()
}

/// Extensions from the space-separated `glGetString(GL_EXTENSIONS)`.
unsafe fn legacy_extensions(functions: &FunctionTable) -> FnvHashSet<String> {
    gl_utils::get_string(functions, gl::EXTENSIONS)
        .map(|extensions| extensions.split_whitespace().map(str::to_owned).collect())
        .unwrap_or_default()
}

/// The loaded state of one OpenGL context: its version, supported extensions, and entry points.
///
/// Dereferences to [`FunctionTable`], so GL calls read as `gl.DrawArrays(...)`. A `Gl` belongs to
/// the context it was loaded from; using it with another context is only sound if both share an
/// implementation.
#[derive(Clone, Debug, PartialEq)]
pub struct Gl {
    api: GLApi,
    version: GLVersion,
    capabilities: Capabilities,
    functions: FunctionTable,
}

impl Gl {
    /// Loads the current context with the default options.
    ///
    /// ```ignore
    /// let gl = Gl::load_with(|symbol| device.get_proc_address(&context, symbol))?;
    /// ```
    pub fn load_with<F>(loadfn: F) -> Result<Gl, Error>
    where
        F: FnMut(&'static str) -> *const c_void,
    {
        Loader::default().load_with(loadfn)
    }

    /// Reloads in place with the default options, e.g. after switching to another context.
    pub fn reload_with<F>(&mut self, loadfn: F) -> Result<(), Error>
    where
        F: FnMut(&'static str) -> *const c_void,
    {
        Loader::default().reload(self, loadfn)
    }

    fn unloaded() -> Gl {
        Gl {
            api: GLApi::GL,
            version: GLVersion::default(),
            capabilities: Capabilities::new(),
            functions: FunctionTable::new(),
        }
    }

    fn clear(&mut self) {
        self.api = GLApi::GL;
        self.version = GLVersion::default();
        self.capabilities.reset();
        self.functions.clear();
    }

    /// The API flavor named by the version string.
    ///
    /// On `GLApi::GLES` no `GL_VERSION_*` flag is set, since those name desktop versions;
    /// `version()` still holds the ES version and extension flags are detected as usual.
    #[inline]
    pub fn api(&self) -> GLApi {
        self.api
    }

    /// The version the driver reported, which may be newer than 4.3.
    #[inline]
    pub fn version(&self) -> GLVersion {
        self.version
    }

    #[inline]
    pub fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    #[inline]
    pub fn functions(&self) -> &FunctionTable {
        &self.functions
    }

    #[inline]
    pub fn is_supported(&self, feature: Feature) -> bool {
        self.capabilities.is_supported(feature)
    }

    /// Returns true if the context is at least `version`.
    #[inline]
    pub fn supports_version(&self, version: GLVersion) -> bool {
        self.version >= version
    }

    /// Entry points of `feature` that the platform could not resolve.
    pub fn missing_commands(&self, feature: Feature) -> impl Iterator<Item = Command> + '_ {
        feature
            .commands()
            .iter()
            .cloned()
            .filter(move |&command| !self.functions.is_loaded(command))
    }

    /// Returns true if `feature` is supported and every entry point it introduces resolved.
    pub fn is_fully_loaded(&self, feature: Feature) -> bool {
        self.is_supported(feature) && self.missing_commands(feature).next().is_none()
    }
}

impl Deref for Gl {
    type Target = FunctionTable;

    #[inline]
    fn deref(&self) -> &FunctionTable {
        &self.functions
    }
}
