//! `[components]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [components]
//! dir = "components"            # Source directory, relative to folio.toml
//! extensions = ["md", "html"]   # Extensions picked up by the scanner
//! ```
//!
//! Recognized extensions are `md`, `markdown`, `html` and `htm`.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::component::ComponentKind;
use crate::config::{ConfigDiagnostics, FieldPath};

/// Component discovery settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ComponentsConfig {
    /// Directory scanned for component files.
    pub dir: PathBuf,

    /// File extensions (without the dot) treated as components.
    pub extensions: Vec<String>,
}

impl Default for ComponentsConfig {
    fn default() -> Self {
        Self {
            dir: "components".into(),
            extensions: vec!["md".into(), "html".into()],
        }
    }
}

impl ComponentsConfig {
    const EXTENSIONS: FieldPath = FieldPath::new("components.extensions");

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.extensions.is_empty() {
            diag.error_with_hint(
                Self::EXTENSIONS,
                "at least one extension is required",
                "extensions = [\"md\", \"html\"]",
            );
        }

        for ext in &self.extensions {
            if ext.contains('.') {
                diag.error_with_hint(
                    Self::EXTENSIONS,
                    format!("`{ext}` must not contain a dot"),
                    format!("use \"{}\"", ext.trim_start_matches('.')),
                );
            } else if ComponentKind::from_extension(ext).is_none() {
                diag.error_with_hint(
                    Self::EXTENSIONS,
                    format!("no renderer for `{ext}`"),
                    format!(
                        "supported: {}",
                        ComponentKind::KNOWN_EXTENSIONS.join(", ")
                    ),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    #[test]
    fn test_components_config_defaults() {
        let config = test_parse_config("");
        assert_eq!(config.components.dir, PathBuf::from("components"));
        assert_eq!(config.components.extensions, ["md", "html"]);
    }

    #[test]
    fn test_components_config() {
        let config =
            test_parse_config("[components]\ndir = \"ui\"\nextensions = [\"markdown\", \"htm\"]");
        assert_eq!(config.components.dir, PathBuf::from("ui"));
        assert_eq!(config.components.extensions, ["markdown", "htm"]);
    }

    #[test]
    fn test_components_validate() {
        let mut diag = ConfigDiagnostics::new();
        ComponentsConfig::default().validate(&mut diag);
        assert!(diag.is_empty());

        let config = ComponentsConfig {
            extensions: vec![".md".into(), "tsx".into()],
            ..Default::default()
        };
        let mut diag = ConfigDiagnostics::new();
        config.validate(&mut diag);
        assert_eq!(diag.len(), 2);

        let config = ComponentsConfig {
            extensions: vec![],
            ..Default::default()
        };
        let mut diag = ConfigDiagnostics::new();
        config.validate(&mut diag);
        assert_eq!(diag.len(), 1);
    }
}
