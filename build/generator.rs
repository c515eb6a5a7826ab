// glload/build/generator.rs
//
//! A `gl_generator` backend that emits the loader tables instead of a self-loading struct.
//!
//! The output contains:
//!
//! * the GL type aliases and constants,
//! * the `Command` enum and the `(symbol, Command)` association list driving resolution,
//! * the alias pairs used to fill unresolved slots from an equivalent entry point,
//! * the `Feature` enum with its version, extension and command tables,
//! * one typed call wrapper per command on `FunctionTable`.

use crate::features::{FeatureSet, FeatureSpec};
use gl_generator::generators::{self, Generator};
use gl_generator::{Cmd, Registry};
use std::collections::{BTreeMap, BTreeSet};
use std::io;

pub struct LoaderGenerator<'a> {
    features: &'a FeatureSet,
}

impl<'a> LoaderGenerator<'a> {
    pub fn new(features: &'a FeatureSet) -> LoaderGenerator<'a> {
        LoaderGenerator { features }
    }
}

impl<'a> Generator for LoaderGenerator<'a> {
    fn write<W>(&self, registry: &Registry, dest: &mut W) -> io::Result<()>
    where
        W: io::Write,
    {
        let commands = sorted_commands(registry);
        let indices: BTreeMap<String, usize> = commands
            .iter()
            .enumerate()
            .map(|(index, cmd)| (generators::gen_symbol_name(registry.api, &cmd.proto.ident), index))
            .collect();

        write_header(dest)?;
        write_type_aliases(registry, dest)?;
        write_enums(registry, self.features, dest)?;
        write_commands(registry, &commands, dest)?;
        write_aliases(registry, &commands, dest)?;
        write_features(self.features, &commands, &indices, dest)?;
        write_wrappers(&commands, dest)?;
        Ok(())
    }
}

/// Commands ordered by identifier, so the symbol names are sorted as well.
fn sorted_commands(registry: &Registry) -> Vec<&Cmd> {
    let mut commands: Vec<&Cmd> = registry.cmds.iter().collect();
    commands.sort_by(|a, b| a.proto.ident.cmp(&b.proto.ident));
    commands.dedup_by(|a, b| a.proto.ident == b.proto.ident);
    commands
}

fn write_header<W>(dest: &mut W) -> io::Result<()>
where
    W: io::Write,
{
    writeln!(
        dest,
        r#"
        mod __gl_imports {{
            pub use std::mem;
            pub use std::os::raw;
        }}
    "#
    )
}

fn write_type_aliases<W>(registry: &Registry, dest: &mut W) -> io::Result<()>
where
    W: io::Write,
{
    writeln!(
        dest,
        r#"
        pub mod types {{
            #![allow(non_camel_case_types, non_snake_case, dead_code, missing_copy_implementations)]
    "#
    )?;

    generators::gen_types(registry.api, dest)?;

    // Referenced by extension commands but missing from the stock template.
    writeln!(
        dest,
        r#"
            pub type GLeglClientBufferEXT = *mut super::__gl_imports::raw::c_void;
            pub type GLVULKANPROCNV = Option<extern "system" fn()>;
        }}
    "#
    )
}

fn write_enums<W>(registry: &Registry, features: &FeatureSet, dest: &mut W) -> io::Result<()>
where
    W: io::Write,
{
    let mut written = BTreeSet::new();
    for enm in &registry.enums {
        let definition = (enm.ident.clone(), enm.value.clone());
        if features.foreign_enums.contains(&definition) || !written.insert(definition.0) {
            continue;
        }

        // `gl_generator` types bare negative values (`NEXT_BUFFER_NV = -2`) as `GLenum`.
        if !enm.cast && enm.ty == "GLenum" && enm.value.starts_with('-') {
            writeln!(
                dest,
                "#[allow(dead_code, non_upper_case_globals)] pub const {}: types::GLint = {};",
                enm.ident, enm.value
            )?;
            continue;
        }
        generators::gen_enum_item(enm, "types::", dest)?;
    }
    Ok(())
}

fn write_commands<W>(registry: &Registry, commands: &[&Cmd], dest: &mut W) -> io::Result<()>
where
    W: io::Write,
{
    writeln!(
        dest,
        "/// An OpenGL entry point, named after its symbol without the `gl` prefix.
        #[allow(non_camel_case_types)]
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[repr(u16)]
        pub enum Command {{"
    )?;
    for (index, cmd) in commands.iter().enumerate() {
        writeln!(dest, "    {} = {},", cmd.proto.ident, index)?;
    }
    writeln!(dest, "}}")?;

    writeln!(
        dest,
        "/// The number of entry points, and therefore of function slots.
        pub const COMMAND_COUNT: usize = {count};

        /// Every entry point paired with its symbol name, sorted by name.
        pub static COMMAND_TABLE: [(&'static str, Command); COMMAND_COUNT] = [",
        count = commands.len()
    )?;
    for cmd in commands {
        writeln!(
            dest,
            "    (\"{symbol}\", Command::{ident}),",
            symbol = generators::gen_symbol_name(registry.api, &cmd.proto.ident),
            ident = cmd.proto.ident
        )?;
    }
    writeln!(dest, "];")
}

fn write_aliases<W>(registry: &Registry, commands: &[&Cmd], dest: &mut W) -> io::Result<()>
where
    W: io::Write,
{
    let known: BTreeSet<&str> = commands.iter().map(|cmd| &*cmd.proto.ident).collect();

    // `registry.aliases` maps a command to the commands declaring it as their alias. Both sides
    // must exist in the selected set; each pair is stored once, in ascending order.
    let mut pairs = BTreeSet::new();
    for (target, sources) in &registry.aliases {
        if !known.contains(&**target) {
            continue;
        }
        for source in sources {
            if source != target && known.contains(&**source) {
                let pair = if source < target {
                    (source.clone(), target.clone())
                } else {
                    (target.clone(), source.clone())
                };
                pairs.insert(pair);
            }
        }
    }

    writeln!(
        dest,
        "/// Pairs of equivalent entry points. An unresolved slot may take the address of its
        /// partner.
        pub static ALIAS_TABLE: [(Command, Command); {count}] = [",
        count = pairs.len()
    )?;
    for (a, b) in &pairs {
        writeln!(dest, "    (Command::{}, Command::{}),", a, b)?;
    }
    writeln!(dest, "];")
}

fn write_features<W>(
    features: &FeatureSet,
    commands: &[&Cmd],
    indices: &BTreeMap<String, usize>,
    dest: &mut W,
) -> io::Result<()>
where
    W: io::Write,
{
    let all: Vec<&FeatureSpec> = features
        .versions
        .iter()
        .chain(features.extensions.iter())
        .collect();

    writeln!(
        dest,
        "/// A GL version or extension whose availability is detected at load time.
        #[allow(non_camel_case_types)]
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[repr(u16)]
        pub enum Feature {{"
    )?;
    for (index, feature) in all.iter().enumerate() {
        writeln!(dest, "    {} = {},", feature.name, index)?;
    }
    writeln!(dest, "}}")?;

    writeln!(
        dest,
        "pub const FEATURE_COUNT: usize = {features};
        pub const VERSION_COUNT: usize = {versions};
        pub const EXTENSION_COUNT: usize = {extensions};",
        features = all.len(),
        versions = features.versions.len(),
        extensions = features.extensions.len()
    )?;

    writeln!(
        dest,
        "/// Recognized versions in ascending order. Version features come first in `Feature`.
        pub static VERSION_TABLE: [(u8, u8, Feature); VERSION_COUNT] = ["
    )?;
    for feature in &features.versions {
        let (major, minor) = feature.version.unwrap();
        writeln!(dest, "    ({}, {}, Feature::{}),", major, minor, feature.name)?;
    }
    writeln!(dest, "];")?;

    writeln!(
        dest,
        "/// Known extensions sorted by name. Extension features follow the versions in `Feature`.
        pub static EXTENSION_TABLE: [(&'static str, Feature); EXTENSION_COUNT] = ["
    )?;
    for feature in &features.extensions {
        writeln!(dest, "    (\"{name}\", Feature::{name}),", name = feature.name)?;
    }
    writeln!(dest, "];")?;

    writeln!(dest, "pub static FEATURE_NAME_TABLE: [&'static str; FEATURE_COUNT] = [")?;
    for feature in &all {
        writeln!(dest, "    \"{}\",", feature.name)?;
    }
    writeln!(dest, "];")?;

    writeln!(
        dest,
        "/// The entry points each feature introduces.
        pub static FEATURE_COMMAND_TABLE: [&'static [Command]; FEATURE_COUNT] = ["
    )?;
    for feature in &all {
        let members: Vec<String> = feature
            .commands
            .iter()
            .filter_map(|symbol| indices.get(symbol))
            .map(|&index| format!("Command::{}", commands[index].proto.ident))
            .collect();
        writeln!(dest, "    &[{}],", members.join(", "))?;
    }
    writeln!(dest, "];")
}

fn write_wrappers<W>(commands: &[&Cmd], dest: &mut W) -> io::Result<()>
where
    W: io::Write,
{
    writeln!(dest, "impl crate::table::FunctionTable {{")?;
    for cmd in commands {
        writeln!(
            dest,
            "#[allow(non_snake_case, unused_variables, dead_code)]
            #[inline] pub unsafe fn {name}(&self, {params}) -> {return_suffix} {{ \
                __gl_imports::mem::transmute::<_, extern \"system\" fn({typed_params}) -> {return_suffix}>\
                    (self.entry_point(Command::{name}))({idents}) \
            }}",
            name = cmd.proto.ident,
            params = parameters(cmd, true, true),
            typed_params = parameters(cmd, false, true),
            return_suffix = cmd.proto.ty,
            idents = parameters(cmd, true, false),
        )?;
    }
    writeln!(dest, "}}")
}

/// Rust keywords that `gl_generator` doesn't rename when they appear as parameter names.
static RESERVED_IDENTS: [&str; 48] = [
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "crate",
    "do", "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "if", "impl", "let",
    "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub", "return", "self",
    "static", "struct", "super", "trait", "true", "try", "typeof", "unsafe", "unsized", "use",
    "virtual", "where", "while", "yield", "gen",
];

/// A parameter list in the form `gen_parameters` produces, with keyword idents renamed
/// (`box` becomes `box_`) and the registry's array parameters passed as pointers.
fn parameters(cmd: &Cmd, with_idents: bool, with_types: bool) -> String {
    cmd.params
        .iter()
        .map(|binding| {
            let ident = param_ident(&binding.ident);
            let ty = param_type(&binding.ty);
            match (with_idents, with_types) {
                (true, true) => format!("{}: {}", ident, ty),
                (false, true) => ty,
                _ => ident,
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn param_ident(ident: &str) -> String {
    if RESERVED_IDENTS.contains(&ident) {
        format!("{}_", ident)
    } else {
        ident.to_owned()
    }
}

/// C array parameters decay to pointers. `gl_generator` maps `GLuint[2]` to the misspelled
/// `[Gluint; 2]`, which names no type.
fn param_type(ty: &str) -> String {
    match ty {
        "[Gluint; 2]" => "*mut types::GLuint".to_owned(),
        _ => ty.to_owned(),
    }
}
