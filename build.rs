// glload/build.rs
//
//! The `glload` build script.
//!
//! Everything the loader knows about OpenGL (entry points, signatures, constants, which version
//! or extension introduces which command) is regenerated here from the Khronos registry.

use gl_generator::{Api, Fallbacks, Profile, Registry};
use std::env;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

#[path = "build/features.rs"]
mod features;
#[path = "build/generator.rs"]
mod generator;

use crate::features::FeatureSet;
use crate::generator::LoaderGenerator;

/// The newest core version the tables cover.
const MAX_GL_VERSION: (u8, u8) = (4, 3);

fn main() {
    let dest = PathBuf::from(&env::var("OUT_DIR").unwrap());

    let features = FeatureSet::scan(khronos_api::GL_XML, MAX_GL_VERSION);
    let extension_names: Vec<&str> = features
        .extensions
        .iter()
        .map(|extension| &*extension.name)
        .collect();

    // Compatibility so that nothing a 4.3 driver may still export is dropped.
    let registry = Registry::new(
        Api::Gl,
        MAX_GL_VERSION,
        Profile::Compatibility,
        Fallbacks::All,
        &extension_names[..],
    );

    let file = File::create(&dest.join("gl_bindings.rs")).unwrap();
    let mut file = BufWriter::new(file);
    registry
        .write_bindings(LoaderGenerator::new(&features), &mut file)
        .unwrap();
}
