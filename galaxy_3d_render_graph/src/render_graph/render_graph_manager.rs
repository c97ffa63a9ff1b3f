/// Central render graph manager.
///
/// Owns named declarative graphs (parsed once, built many times), handles
/// hot reload of their JSON files and remembers the frame parameters of the
/// last successful build of each graph.

use std::path::Path;
use rustc_hash::FxHashMap;
use crate::error::Result;
use crate::{graph_bail, graph_err, graph_info, graph_warn};
use super::builder::{build, BuildStats};
use super::declaration::DeclarativeGraph;
use super::executor_registry::ExecutorLookup;
use super::frame_info::FrameInfo;
use super::graph_api::RenderGraphApi;

const SOURCE: &str = "galaxy3d::RenderGraphManager";

/// A declarative graph and its build state
struct ManagedGraph {
    graph: DeclarativeGraph,
    /// Frame parameters of the last successful build (None = never built)
    last_build: Option<FrameInfo>,
}

impl ManagedGraph {
    fn new(graph: DeclarativeGraph) -> Self {
        Self { graph, last_build: None }
    }
}

/// Render graph manager
///
/// Stores named render graphs. Multiple render graphs can exist
/// simultaneously (e.g. game and editor configurations).
pub struct RenderGraphManager {
    render_graphs: FxHashMap<String, ManagedGraph>,
}

impl RenderGraphManager {
    /// Create a new empty render graph manager
    pub fn new() -> Self {
        Self {
            render_graphs: FxHashMap::default(),
        }
    }

    /// Load a render graph file under a new name
    ///
    /// # Errors
    ///
    /// Returns an error if a render graph with the same name already exists,
    /// or if the file fails to load.
    pub fn load_render_graph(&mut self, name: &str, path: impl AsRef<Path>) -> Result<&DeclarativeGraph> {
        if self.render_graphs.contains_key(name) {
            graph_bail!(Semantic, SOURCE, name, "RenderGraph '{}' already exists", name);
        }
        let graph = DeclarativeGraph::load(path)?;
        self.insert_render_graph(name, graph)
    }

    /// Register an already parsed render graph
    ///
    /// # Errors
    ///
    /// Returns an error if a render graph with the same name already exists.
    pub fn insert_render_graph(&mut self, name: &str, graph: DeclarativeGraph) -> Result<&DeclarativeGraph> {
        if self.render_graphs.contains_key(name) {
            graph_bail!(Semantic, SOURCE, name, "RenderGraph '{}' already exists", name);
        }
        let managed = self.render_graphs.entry(name.to_string())
            .or_insert(ManagedGraph::new(graph));
        Ok(&managed.graph)
    }

    /// Re-parse the file of an existing render graph
    ///
    /// On success the new graph replaces the previous one and must be rebuilt.
    /// On failure the previous graph is kept untouched and the error returned.
    pub fn reload_render_graph(&mut self, name: &str, path: impl AsRef<Path>) -> Result<&DeclarativeGraph> {
        let Some(managed) = self.render_graphs.get_mut(name) else {
            graph_bail!(Semantic, SOURCE, name, "RenderGraph '{}' does not exist", name);
        };

        match DeclarativeGraph::load(path) {
            Ok(graph) => {
                graph_info!(SOURCE, "Reloaded RenderGraph '{}'", name);
                *managed = ManagedGraph::new(graph);
                Ok(&managed.graph)
            }
            Err(err) => {
                graph_warn!(SOURCE, "Reload of RenderGraph '{}' failed, keeping previous graph", name);
                Err(err)
            }
        }
    }

    /// Get a render graph by name
    pub fn render_graph(&self, name: &str) -> Option<&DeclarativeGraph> {
        self.render_graphs.get(name).map(|m| &m.graph)
    }

    /// Remove a render graph by name
    ///
    /// Returns the removed render graph, or None if not found.
    pub fn remove_render_graph(&mut self, name: &str) -> Option<DeclarativeGraph> {
        self.render_graphs.remove(name).map(|m| m.graph)
    }

    /// Get the number of render graphs
    pub fn render_graph_count(&self) -> usize {
        self.render_graphs.len()
    }

    /// Get all render graph names
    pub fn render_graph_names(&self) -> Vec<&str> {
        self.render_graphs.keys().map(|k| k.as_str()).collect()
    }

    /// Remove all render graphs
    pub fn clear(&mut self) {
        self.render_graphs.clear();
    }

    /// Build a render graph into `api`
    ///
    /// The frame parameters are remembered only if the build succeeds.
    pub fn build_render_graph<A, L>(
        &mut self,
        name: &str,
        frame: &FrameInfo,
        executors: &L,
        api: &mut A,
    ) -> Result<BuildStats>
    where
        A: RenderGraphApi,
        L: ExecutorLookup<A::Executor> + ?Sized,
    {
        let managed = self.render_graphs.get_mut(name)
            .ok_or_else(|| graph_err!(Semantic, SOURCE, name, "RenderGraph '{}' does not exist", name))?;

        let stats = build(&managed.graph, frame, executors, api)?;
        managed.last_build = Some(*frame);
        Ok(stats)
    }

    /// True if the graph was never built, was reloaded since, or was last
    /// built against different frame parameters
    ///
    /// Unknown names never need a rebuild.
    pub fn needs_rebuild(&self, name: &str, frame: &FrameInfo) -> bool {
        match self.render_graphs.get(name) {
            None => false,
            Some(ManagedGraph { last_build: None, .. }) => true,
            Some(ManagedGraph { last_build: Some(previous), .. }) => frame.requires_rebuild(previous),
        }
    }
}

impl Default for RenderGraphManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "render_graph_manager_tests.rs"]
mod tests;
