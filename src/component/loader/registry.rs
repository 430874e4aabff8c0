//! In-process registry of component functions.

use anyhow::{Result, anyhow};
use rustc_hash::FxHashMap;

use super::{ComponentLoader, Renderable};

/// Produces a component's HTML fragment.
pub type RenderFn = fn() -> Result<String>;

/// Loader backed by functions registered under a source file name.
///
/// Useful for components generated by code rather than kept on disk.
#[derive(Debug, Default, Clone)]
pub struct StaticRegistry {
    entries: FxHashMap<String, RenderFn>,
}

impl StaticRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `render` for `source_file`, replacing any earlier entry.
    pub fn register(&mut self, source_file: impl Into<String>, render: RenderFn) -> &mut Self {
        self.entries.insert(source_file.into(), render);
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ComponentLoader for StaticRegistry {
    fn load(&self, source_file: &str) -> Result<Box<dyn Renderable>> {
        let render = self
            .entries
            .get(source_file)
            .copied()
            .ok_or_else(|| anyhow!("no component registered for `{source_file}`"))?;
        Ok(Box::new(Registered(render)))
    }
}

struct Registered(RenderFn);

impl Renderable for Registered {
    fn render(&self) -> Result<String> {
        (self.0)()
    }
}
