/// Render graph loader.
///
/// Reads a render graph JSON file (or in-memory text), parses the whole
/// document and returns a validated `DeclarativeGraph`. Nothing is returned
/// on failure: the partially parsed declarations are simply dropped.

use std::path::Path;
use rustc_hash::FxHashMap;
use serde_json::Value;
use crate::error::Result;
use crate::{graph_bail, graph_err, graph_info, graph_debug};
use super::declaration::{DeclarativeGraph, PassDecl, ResourceDecl, GRAPH_VERSION};
use super::declaration_parser::{parse_outputs, parse_pass, parse_resource, ResourceScope};
use super::json_reader::JsonObject;

const SOURCE: &str = "galaxy3d::GraphLoader";

impl DeclarativeGraph {
    /// Load and validate a render graph file
    ///
    /// # Arguments
    ///
    /// * `path` - Path of the render graph JSON file
    ///
    /// # Errors
    ///
    /// `Error::Io` if the file cannot be read, `Error::Format` for malformed
    /// JSON or unknown tokens, `Error::Semantic` for duplicate names and
    /// dangling references.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let display = path.display().to_string();

        let bytes = std::fs::read(path)
            .map_err(|e| graph_err!(Io, SOURCE, display, "{}", e))?;
        let text = String::from_utf8(bytes)
            .map_err(|e| graph_err!(Format, SOURCE, "<root>",
                "'{}' is not valid UTF-8: {}", display, e))?;

        let graph = Self::from_json_str(&text)?;
        graph_info!(SOURCE, "Loaded render graph '{}' from '{}' ({} resources, {} passes)",
            graph.name(), display, graph.resources().len(), graph.passes().len());
        Ok(graph)
    }

    /// Parse and validate render graph JSON text
    pub fn from_json_str(text: &str) -> Result<Self> {
        let document: Value = serde_json::from_str(text)
            .map_err(|e| graph_err!(Format, SOURCE, "<root>", "invalid JSON: {}", e))?;
        parse_document(&document)
    }
}

/// Parse the root object
fn parse_document(document: &Value) -> Result<DeclarativeGraph> {
    let root = JsonObject::new(document, "")?;

    let version = root.required_u32("version")?;
    if version != GRAPH_VERSION {
        graph_bail!(Format, SOURCE, "version",
            "unsupported render graph version {} (expected {})", version, GRAPH_VERSION);
    }

    let name = root.required_str("name")?.to_string();

    // Resources first: passes and outputs are validated against them
    let mut resources: Vec<ResourceDecl> = Vec::new();
    let mut resource_names: FxHashMap<String, usize> = FxHashMap::default();
    for entry in root.array_or_empty("resources")?.objects() {
        let entry = entry?;
        let resource = parse_resource(&entry)?;
        if let Some(&first) = resource_names.get(&resource.name) {
            graph_bail!(Semantic, SOURCE, entry.field_path("name"),
                "duplicate resource name '{}' (first declared at resources[{}])",
                resource.name, first);
        }
        resource_names.insert(resource.name.clone(), resources.len());
        resources.push(resource);
    }

    let scope = ResourceScope::new(&resource_names, &resources);

    let mut passes: Vec<PassDecl> = Vec::new();
    let mut pass_names: FxHashMap<String, usize> = FxHashMap::default();
    for entry in root.array_or_empty("passes")?.objects() {
        let entry = entry?;
        let pass = parse_pass(&entry, &scope)?;
        if let Some(&first) = pass_names.get(&pass.name) {
            graph_bail!(Semantic, SOURCE, entry.field_path("name"),
                "duplicate pass name '{}' (first declared at passes[{}])", pass.name, first);
        }
        pass_names.insert(pass.name.clone(), passes.len());
        passes.push(pass);
    }

    let outputs = parse_outputs(root.optional_object("outputs")?.as_ref(), &scope)?;

    graph_debug!(SOURCE, "Parsed render graph '{}': {} resources, {} passes, present = {:?}",
        name, resources.len(), passes.len(), outputs.present);

    Ok(DeclarativeGraph::new(version, name, resources, passes, outputs, resource_names, pass_names))
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
