//! `[build]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [build]
//! output = "dist"            # Output directory, relative to folio.toml
//! page_extension = "html"    # Extension of every written page
//! clean = false              # Remove the output directory first
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath};

/// Static build settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Directory artifacts are written to.
    pub output: PathBuf,

    /// Extension of component and index pages, without the dot.
    pub page_extension: String,

    /// Remove `output` before writing.
    pub clean: bool,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            output: "dist".into(),
            page_extension: "html".into(),
            clean: false,
        }
    }
}

impl BuildConfig {
    const PAGE_EXTENSION: FieldPath = FieldPath::new("build.page_extension");

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        let ext = &self.page_extension;
        if ext.is_empty() {
            diag.error_with_hint(
                Self::PAGE_EXTENSION,
                "must not be empty",
                "page_extension = \"html\"",
            );
        } else if ext.contains(['.', '/', '\\']) {
            diag.error(
                Self::PAGE_EXTENSION,
                format!("`{ext}` must be a bare extension without dots or separators"),
            );
        }
    }
}
