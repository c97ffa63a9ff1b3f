/// Pass executor registry.
///
/// Maps the `execute` names of a render graph file to engine callables.
/// The executor value carries its own user data (closure captures, an
/// `Arc` to a renderer subsystem, ...).

use rustc_hash::FxHashMap;
use crate::error::Result;
use crate::graph_bail;

/// Lookup of pass executors by name
pub trait ExecutorLookup<E> {
    /// Find the executor registered under `name`
    fn find(&self, name: &str) -> Option<E>;
}

/// Plain closures can serve as lookups
impl<E, F> ExecutorLookup<E> for F
where
    F: Fn(&str) -> Option<E>,
{
    fn find(&self, name: &str) -> Option<E> {
        self(name)
    }
}

/// Named executor storage
pub struct ExecutorRegistry<E> {
    executors: FxHashMap<String, E>,
}

impl<E> ExecutorRegistry<E> {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            executors: FxHashMap::default(),
        }
    }

    /// Register an executor
    ///
    /// # Errors
    ///
    /// Returns an error if an executor with the same name already exists.
    pub fn register(&mut self, name: &str, executor: E) -> Result<()> {
        if self.executors.contains_key(name) {
            graph_bail!(Semantic, "galaxy3d::ExecutorRegistry", name,
                "executor '{}' is already registered", name);
        }
        self.executors.insert(name.to_string(), executor);
        Ok(())
    }

    /// Remove an executor, returning it if it was registered
    pub fn unregister(&mut self, name: &str) -> Option<E> {
        self.executors.remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.executors.contains_key(name)
    }

    pub fn executor_count(&self) -> usize {
        self.executors.len()
    }

    /// Get all executor names
    pub fn executor_names(&self) -> Vec<&str> {
        self.executors.keys().map(|k| k.as_str()).collect()
    }
}

impl<E> Default for ExecutorRegistry<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Clone> ExecutorLookup<E> for ExecutorRegistry<E> {
    fn find(&self, name: &str) -> Option<E> {
        self.executors.get(name).cloned()
    }
}

#[cfg(test)]
#[path = "executor_registry_tests.rs"]
mod tests;
