//! Component descriptor and source kind.

use std::path::Path;

use serde::Serialize;

use super::naming;

/// Source format of a component file, decided by its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentKind {
    /// CommonMark document rendered to an HTML fragment.
    Markdown,
    /// HTML fragment used verbatim.
    Html,
}

impl ComponentKind {
    /// All extensions folio knows how to render.
    pub const KNOWN_EXTENSIONS: &'static [&'static str] = &["md", "markdown", "html", "htm"];

    /// Map a file extension (without the dot) to a kind.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            "md" | "markdown" => Some(Self::Markdown),
            "html" | "htm" => Some(Self::Html),
            _ => None,
        }
    }
}

/// One discoverable component.
///
/// Created fresh on every scan and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComponentDescriptor {
    /// On-disk file name, unique within a scan.
    pub source_file: String,
    /// `source_file` without its extension.
    pub display_name: String,
    /// Canonical identifier used as URL segment and artifact key.
    pub route_id: String,
    /// Source format.
    pub kind: ComponentKind,
}

impl ComponentDescriptor {
    /// Build a descriptor from a file name.
    ///
    /// Returns `None` when the name has no extension or the extension maps to
    /// no known kind. The route id may be empty; the scanner rejects that.
    pub fn from_file_name(file_name: &str) -> Option<Self> {
        let path = Path::new(file_name);
        let ext = path.extension()?.to_str()?;
        let kind = ComponentKind::from_extension(ext)?;
        let display_name = path.file_stem()?.to_str()?.to_string();
        let route_id = naming::transform(&display_name);

        Some(Self {
            source_file: file_name.to_string(),
            display_name,
            route_id,
            kind,
        })
    }
}
