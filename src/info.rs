// glload/src/info.rs
//
//! OpenGL version information.

use std::fmt::{self, Display, Formatter};

/// Prefixes that OpenGL ES implementations put in front of the version number.
static GLES_VERSION_PREFIXES: [&str; 3] = ["OpenGL ES-CM ", "OpenGL ES-CL ", "OpenGL ES "];

/// The API (OpenGL or OpenGL ES).
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GLApi {
    /// OpenGL (full or desktop OpenGL).
    GL,
    /// OpenGL ES (embedded OpenGL).
    GLES,
}

impl GLApi {
    /// Determines the API flavor from a `GL_VERSION` string.
    pub fn from_version_string(version_string: &str) -> GLApi {
        let version_string = version_string.trim_start();
        if GLES_VERSION_PREFIXES
            .iter()
            .any(|prefix| version_string.starts_with(prefix))
        {
            GLApi::GLES
        } else {
            GLApi::GL
        }
    }
}

/// An OpenGL version, as reported by the driver or as named by a version feature.
///
/// Versions order by major, then minor number.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GLVersion {
    /// The major OpenGL version (e.g. 4 in 4.2).
    pub major: u8,
    /// The minor OpenGL version (e.g. 2 in 4.2).
    pub minor: u8,
}

impl GLVersion {
    /// Creates a GL version structure with the given major and minor version numbers.
    #[inline]
    pub fn new(major: u8, minor: u8) -> GLVersion {
        GLVersion { major, minor }
    }

    /// Parses the leading `<major>.<minor>` of a `GL_VERSION` string.
    ///
    /// The parse is lenient: ES prefixes are skipped, everything from the first
    /// character that is neither a digit nor a dot is ignored (release numbers, vendor
    /// information), a missing component reads as zero, and a component too large for a `u8`
    /// saturates at 255. A string with no leading number at all yields version 0.0.
    pub fn parse(version_string: &str) -> GLVersion {
        let mut version_string = version_string.trim_start();
        if let Some(rest) = GLES_VERSION_PREFIXES
            .iter()
            .find_map(|prefix| version_string.strip_prefix(prefix))
        {
            version_string = rest;
        }

        let numeric_length = version_string
            .find(|c: char| !c.is_ascii_digit() && c != '.')
            .unwrap_or(version_string.len());
        let mut components = version_string[..numeric_length]
            .split('.')
            .map(parse_component);
        let major = components.next().unwrap_or(0);
        let minor = components.next().unwrap_or(0);
        GLVersion { major, minor }
    }

    /// The `major * 10 + minor` encoding that C loaders return, e.g. `33` for 3.3.
    #[inline]
    pub fn encoded(self) -> u32 {
        self.major as u32 * 10 + self.minor as u32
    }
}

/// Components hold only ASCII digits, so a failed parse of a non-empty one is an overflow.
fn parse_component(component: &str) -> u8 {
    match component.parse() {
        Ok(value) => value,
        Err(_) if component.is_empty() => 0,
        Err(_) => u8::MAX,
    }
}

impl Display for GLVersion {
    fn fmt(&self, formatter: &mut Formatter) -> fmt::Result {
        write!(formatter, "{}.{}", self.major, self.minor)
    }
}
