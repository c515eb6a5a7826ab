// glload/src/gl_utils.rs
//
//! Small wrappers over the query functions the loader bootstraps.

use crate::gl::types::{GLenum, GLint, GLubyte, GLuint};
use crate::table::FunctionTable;

use std::ffi::CStr;
use std::os::raw::c_char;

/// Copies a string returned by the driver. Null becomes `None`.
pub(crate) unsafe fn gl_string(string: *const GLubyte) -> Option<String> {
    if string.is_null() {
        return None;
    }
    Some(CStr::from_ptr(string as *const c_char).to_string_lossy().into_owned())
}

/// `glGetString(name)`. `GetString` must be loaded.
pub(crate) unsafe fn get_string(functions: &FunctionTable, name: GLenum) -> Option<String> {
    gl_string(functions.GetString(name))
}

/// `glGetStringi(name, index)`. `GetStringi` must be loaded.
pub(crate) unsafe fn get_string_indexed(
    functions: &FunctionTable,
    name: GLenum,
    index: GLuint,
) -> Option<String> {
    gl_string(functions.GetStringi(name, index))
}

/// `glGetIntegerv` for a single-valued parameter. `GetIntegerv` must be loaded.
pub(crate) unsafe fn get_integer(functions: &FunctionTable, name: GLenum) -> GLint {
    let mut value = 0;
    functions.GetIntegerv(name, &mut value);
    value
}
