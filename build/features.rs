// glload/build/features.rs
//
//! Collects version features and extensions from `gl.xml`.
//!
//! `gl_generator` flattens the registry into one set of commands, so the feature membership of
//! each command is read here directly.

use std::collections::BTreeSet;
use xml::attribute::OwnedAttribute;
use xml::reader::{EventReader, XmlEvent};

/// A `<feature>` or `<extension>` block.
pub struct FeatureSpec {
    /// `GL_VERSION_3_3`, `GL_ARB_multi_bind`, ...
    pub name: String,
    /// Set for version features only.
    pub version: Option<(u8, u8)>,
    /// Symbol names (`glDrawArrays`) of the commands this feature requires.
    pub commands: Vec<String>,
}

pub struct FeatureSet {
    /// Version features in ascending order.
    pub versions: Vec<FeatureSpec>,
    /// Desktop GL extensions sorted by name.
    pub extensions: Vec<FeatureSpec>,
    /// `(ident, value)` of enum definitions restricted to another API, e.g. the GLES value of
    /// `ACTIVE_PROGRAM_EXT`. Idents are without the `GL_` prefix.
    pub foreign_enums: BTreeSet<(String, String)>,
}

impl FeatureSet {
    pub fn scan(xml: &[u8], max_version: (u8, u8)) -> FeatureSet {
        let mut versions = vec![];
        let mut extensions = vec![];
        let mut foreign_enums = BTreeSet::new();

        let mut current: Option<FeatureSpec> = None;
        let mut skipping_block = false;

        for event in EventReader::new(xml) {
            match event.unwrap() {
                XmlEvent::StartElement {
                    name, attributes, ..
                } => match &*name.local_name {
                    "feature" => {
                        if attribute(&attributes, "api") != Some("gl") {
                            continue;
                        }
                        let version = parse_number(attribute(&attributes, "number").unwrap());
                        if version <= max_version {
                            current = Some(FeatureSpec {
                                name: attribute(&attributes, "name").unwrap().to_owned(),
                                version: Some(version),
                                commands: vec![],
                            });
                        }
                    }
                    "extension" => {
                        let supported = attribute(&attributes, "supported").unwrap_or("");
                        if supported.split('|').any(|api| api == "gl") {
                            current = Some(FeatureSpec {
                                name: attribute(&attributes, "name").unwrap().to_owned(),
                                version: None,
                                commands: vec![],
                            });
                        }
                    }
                    "require" => {
                        skipping_block = match attribute(&attributes, "api") {
                            Some(api) => api != "gl",
                            None => false,
                        };
                    }
                    "remove" => skipping_block = true,
                    "enum" => {
                        let definition = (
                            attribute(&attributes, "name"),
                            attribute(&attributes, "value"),
                            attribute(&attributes, "api"),
                        );
                        if let (Some(name), Some(value), Some(api)) = definition {
                            if api != "gl" {
                                let ident = name.strip_prefix("GL_").unwrap_or(name);
                                foreign_enums.insert((ident.to_owned(), value.to_owned()));
                            }
                        }
                    }
                    "command" if !skipping_block => {
                        let (feature, name) = match (current.as_mut(), attribute(&attributes, "name")) {
                            (Some(feature), Some(name)) => (feature, name),
                            _ => continue,
                        };
                        if !feature.commands.iter().any(|command| command == name) {
                            feature.commands.push(name.to_owned());
                        }
                    }
                    _ => {}
                },
                XmlEvent::EndElement { name } => match &*name.local_name {
                    "feature" | "extension" => {
                        if let Some(feature) = current.take() {
                            if feature.version.is_some() {
                                versions.push(feature);
                            } else {
                                extensions.push(feature);
                            }
                        }
                    }
                    "require" | "remove" => skipping_block = false,
                    _ => {}
                },
                _ => {}
            }
        }

        versions.sort_by_key(|feature| feature.version);
        extensions.sort_by(|a, b| a.name.cmp(&b.name));
        extensions.dedup_by(|a, b| a.name == b.name);

        FeatureSet {
            versions,
            extensions,
            foreign_enums,
        }
    }
}

fn attribute<'a>(attributes: &'a [OwnedAttribute], key: &str) -> Option<&'a str> {
    attributes
        .iter()
        .find(|attribute| attribute.name.local_name == key)
        .map(|attribute| &*attribute.value)
}

fn parse_number(number: &str) -> (u8, u8) {
    let mut components = number.split('.').map(|component| component.parse().unwrap());
    (components.next().unwrap(), components.next().unwrap_or(0))
}
