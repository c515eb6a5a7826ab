// glload/src/capabilities.rs
//
//! The per-context record of supported versions and extensions.

use crate::gl::{self, Feature};
use crate::info::GLVersion;

use std::fmt::{self, Debug, Formatter};

/// One flag per GL version (1.0 through 4.3) and per known extension.
///
/// Flags start out false and are set from what the driver reports. Version flags are monotonic:
/// a version's flag is never set without the flags of every older version.
#[derive(Clone, PartialEq, Eq)]
pub struct Capabilities {
    versions: [bool; gl::VERSION_COUNT],
    extensions: Box<[bool]>,
}

impl Capabilities {
    /// Creates a registry with every flag false.
    pub fn new() -> Capabilities {
        Capabilities {
            versions: [false; gl::VERSION_COUNT],
            extensions: vec![false; gl::EXTENSION_COUNT].into_boxed_slice(),
        }
    }

    /// Clears every flag.
    pub fn reset(&mut self) {
        self.versions = [false; gl::VERSION_COUNT];
        self.extensions.iter_mut().for_each(|flag| *flag = false);
    }

    /// Sets the flag of every recognized version up to and including `version`.
    ///
    /// Versions newer than 4.3 set every version flag.
    pub fn set_version_flags(&mut self, version: GLVersion) {
        for (flag, &(major, minor, _)) in self.versions.iter_mut().zip(gl::VERSION_TABLE.iter()) {
            *flag = GLVersion::new(major, minor) <= version;
        }
    }

    /// Sets the flag of every known extension named in `names`, returning how many were
    /// recognized.
    ///
    /// Order does not matter and duplicates are harmless. Names missing from the generated table
    /// (extensions newer than this build) are skipped.
    pub fn set_extension_flags<I, S>(&mut self, names: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut recognized = 0;
        for name in names {
            let name = name.as_ref();
            match Feature::from_extension_name(name) {
                Some(feature) => {
                    let flag = &mut self.extensions[feature as usize - gl::VERSION_COUNT];
                    if !*flag {
                        *flag = true;
                        recognized += 1;
                    }
                }
                None => trace!("ignoring unknown extension {}", name),
            }
        }
        recognized
    }

    /// Returns true if the version or extension was detected on the context.
    #[inline]
    pub fn is_supported(&self, feature: Feature) -> bool {
        let index = feature as usize;
        match self.versions.get(index) {
            Some(&flag) => flag,
            None => self.extensions[index - gl::VERSION_COUNT],
        }
    }

    /// Returns true if the driver reported the named extension and this build knows it.
    pub fn has_extension(&self, name: &str) -> bool {
        Feature::from_extension_name(name).map_or(false, |feature| self.is_supported(feature))
    }

    /// The newest recognized version whose flag is set.
    pub fn highest_version(&self) -> Option<GLVersion> {
        self.supported_versions().last().and_then(Feature::version)
    }

    pub fn supported_versions(&self) -> impl Iterator<Item = Feature> + '_ {
        Feature::versions().filter(move |&feature| self.is_supported(feature))
    }

    pub fn supported_extensions(&self) -> impl Iterator<Item = Feature> + '_ {
        Feature::extensions().filter(move |&feature| self.is_supported(feature))
    }
}

impl Default for Capabilities {
    fn default() -> Capabilities {
        Capabilities::new()
    }
}

impl Debug for Capabilities {
    fn fmt(&self, formatter: &mut Formatter) -> fmt::Result {
        formatter
            .debug_struct("Capabilities")
            .field("version", &self.highest_version())
            .field("extensions", &self.supported_extensions().count())
            .finish()
    }
}
