//! Component discovery, routing and rendering.
//!
//! ```text
//! scan(dir) ─► Catalog ─┬─► generate_targets ─► BuildTargets   (build)
//!                       └─► resolve(path) ─► Resolution         (serve)
//!                                              │
//!                           ComponentLoader ◄──┘ render ─► RenderResult
//! ```
//!
//! | Module       | Purpose                                         |
//! |--------------|-------------------------------------------------|
//! | `naming`     | File base name → route id                       |
//! | `descriptor` | One component and its source kind               |
//! | `catalog`    | Directory scan, collision detection             |
//! | `snapshot`   | Atomically swappable catalog                    |
//! | `targets`    | Build artifacts per component plus index        |
//! | `resolve`    | Request path → component                        |
//! | `loader`     | Filesystem and static loaders                   |
//! | `render`     | Failure-isolated rendering, index page          |

pub mod catalog;
pub mod descriptor;
pub mod loader;
pub mod naming;
pub mod render;
pub mod resolve;
pub mod snapshot;
pub mod targets;

pub use catalog::{Catalog, CatalogError, scan};
pub use descriptor::{ComponentDescriptor, ComponentKind};
pub use loader::{ComponentLoader, FsLoader, Renderable, StaticRegistry};
pub use render::{RenderResult, render, render_index, render_page};
pub use resolve::{Resolution, resolve};
pub use snapshot::CatalogHandle;
pub use targets::{BuildTarget, BuildTargets, TargetError, generate_targets};
