//! Configuration section definitions.
//!
//! Each module corresponds to a section in `folio.toml`:
//!
//! | Module       | TOML Section     | Purpose                            |
//! |--------------|------------------|------------------------------------|
//! | `components` | `[components]`   | Source directory and extensions    |
//! | `build`      | `[build]`        | Output directory, page extension   |
//! | `serve`      | `[serve]`        | Development server                 |
//! | `page`       | `[page]`         | Index title, document language     |

mod build;
mod components;
mod page;
mod serve;

pub use build::BuildConfig;
pub use components::ComponentsConfig;
pub use page::PageConfig;
pub use serve::ServeConfig;
