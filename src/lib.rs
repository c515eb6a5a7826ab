// glload/src/lib.rs
//
//! A runtime OpenGL function loader.
//!
//! Given the platform's `get_proc_address` (from EGL, GLX, WGL, CGL, or a toolkit such as
//! `surfman`), `glload` resolves every OpenGL 1.0–4.3 and extension entry point for the current
//! context and detects which versions and extensions that context supports. The result is a
//! caller-owned [`Gl`] value, so contexts with different capabilities can be loaded side by
//! side.
//!
//! ```ignore
//! let gl = glload::Gl::load_with(|symbol| device.get_proc_address(&context, symbol))?;
//! if gl.is_supported(glload::Feature::GL_ARB_multi_bind) {
//!     unsafe { gl.BindTextures(0, count, textures.as_ptr()) };
//! }
//! ```
//!
//! Entry points that the platform could not resolve are kept as null slots rather than treated
//! as errors. Gate calls on [`Gl::is_supported`], or check [`FunctionTable::is_loaded`].

#[macro_use]
extern crate bitflags;
#[macro_use]
extern crate log;

pub mod error;
pub use crate::error::Error;

mod capabilities;
pub use crate::capabilities::Capabilities;

mod features;

mod info;
pub use crate::info::{GLApi, GLVersion};

mod loader;
pub use crate::loader::{Gl, Loader, LoaderFlags};

mod table;
pub use crate::table::FunctionTable;

mod gl_utils;

/// Generated OpenGL types, constants and entry-point tables.
#[allow(clippy::all, non_upper_case_globals)]
pub mod gl {
    include!(concat!(env!("OUT_DIR"), "/gl_bindings.rs"));
}

pub use crate::gl::{Command, Feature};
