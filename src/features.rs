// glload/src/features.rs
//
//! Lookups over the generated command and feature tables.

use crate::gl::{self, Command, Feature};
use crate::info::GLVersion;

use std::fmt::{self, Display, Formatter};

impl Command {
    /// The symbol name passed to `get_proc_address`, e.g. `"glDrawArrays"`.
    #[inline]
    pub fn name(self) -> &'static str {
        gl::COMMAND_TABLE[self as usize].0
    }

    /// Looks up an entry point by its symbol name.
    pub fn from_name(name: &str) -> Option<Command> {
        gl::COMMAND_TABLE
            .binary_search_by(|&(symbol, _)| symbol.cmp(name))
            .ok()
            .map(|index| gl::COMMAND_TABLE[index].1)
    }

    /// Every entry point, in symbol name order.
    pub fn all() -> impl Iterator<Item = Command> {
        gl::COMMAND_TABLE.iter().map(|&(_, command)| command)
    }
}

impl Display for Command {
    fn fmt(&self, formatter: &mut Formatter) -> fmt::Result {
        formatter.write_str(self.name())
    }
}

impl Feature {
    /// The registry name, e.g. `"GL_VERSION_3_3"` or `"GL_ARB_multi_bind"`.
    #[inline]
    pub fn name(self) -> &'static str {
        gl::FEATURE_NAME_TABLE[self as usize]
    }

    /// Looks up a version or extension feature by its registry name.
    pub fn from_name(name: &str) -> Option<Feature> {
        Feature::from_extension_name(name).or_else(|| {
            gl::VERSION_TABLE
                .iter()
                .map(|&(_, _, feature)| feature)
                .find(|feature| feature.name() == name)
        })
    }

    /// Looks up an extension by the name the driver reports for it.
    pub fn from_extension_name(name: &str) -> Option<Feature> {
        gl::EXTENSION_TABLE
            .binary_search_by(|&(extension, _)| extension.cmp(name))
            .ok()
            .map(|index| gl::EXTENSION_TABLE[index].1)
    }

    /// The version feature for exactly `version`, if it is one this build recognizes.
    pub fn from_version(version: GLVersion) -> Option<Feature> {
        gl::VERSION_TABLE
            .iter()
            .find(|&&(major, minor, _)| GLVersion::new(major, minor) == version)
            .map(|&(_, _, feature)| feature)
    }

    /// The GL version this feature stands for, or `None` for an extension.
    pub fn version(self) -> Option<GLVersion> {
        gl::VERSION_TABLE
            .get(self as usize)
            .map(|&(major, minor, _)| GLVersion::new(major, minor))
    }

    #[inline]
    pub fn is_extension(self) -> bool {
        self as usize >= gl::VERSION_COUNT
    }

    /// The entry points this version or extension introduces.
    #[inline]
    pub fn commands(self) -> &'static [Command] {
        gl::FEATURE_COMMAND_TABLE[self as usize]
    }

    /// Version features, oldest first.
    pub fn versions() -> impl Iterator<Item = Feature> {
        gl::VERSION_TABLE.iter().map(|&(_, _, feature)| feature)
    }

    /// Extension features, in name order.
    pub fn extensions() -> impl Iterator<Item = Feature> {
        gl::EXTENSION_TABLE.iter().map(|&(_, feature)| feature)
    }
}

impl Display for Feature {
    fn fmt(&self, formatter: &mut Formatter) -> fmt::Result {
        formatter.write_str(self.name())
    }
}
