//! Component loaders.
//!
//! A loader turns a `source_file` into something renderable at request time.
//!
//! | Loader           | Source                                        |
//! |------------------|-----------------------------------------------|
//! | `FsLoader`       | Reads the file from the component directory  |
//! | `StaticRegistry` | Functions registered in-process               |

mod fs;
mod registry;

pub use fs::FsLoader;
pub use registry::StaticRegistry;

use anyhow::Result;

/// A loaded component, ready to produce its HTML fragment.
pub trait Renderable {
    fn render(&self) -> Result<String>;
}

/// Resolves a component's source file to a [`Renderable`].
///
/// Loaders are shared across render workers.
pub trait ComponentLoader: Send + Sync {
    fn load(&self, source_file: &str) -> Result<Box<dyn Renderable>>;
}
