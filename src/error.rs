// glload/src/error.rs
//
//! Various errors that loading can produce.

use std::fmt::{self, Display, Formatter};

/// Various errors that loading can produce.
///
/// Entry points that fail to resolve are not errors; they are left as null slots. Only a missing
/// query function makes the context impossible to inspect and aborts the load.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Error {
    /// One of the functions needed to query the context's version and extensions
    /// (`glGetString`, `glGetStringi` or `glGetIntegerv`) could not be resolved.
    BootstrapFunctionMissing(&'static str),
}

impl Display for Error {
    fn fmt(&self, formatter: &mut Formatter) -> fmt::Result {
        match *self {
            Error::BootstrapFunctionMissing(symbol) => {
                write!(formatter, "couldn't resolve `{}`, needed to query the context", symbol)
            }
        }
    }
}

impl std::error::Error for Error {}
