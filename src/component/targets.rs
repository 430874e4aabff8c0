//! Build entry generation: one artifact per component plus the index.

use rustc_hash::FxHashMap;
use serde::Serialize;
use thiserror::Error;

use super::catalog::Catalog;

/// Base name of the reserved landing page artifact.
pub const INDEX_NAME: &str = "index";

#[derive(Debug, Error)]
pub enum TargetError {
    #[error("artifact `{artifact}` of route `{route_id}` clashes with `{existing}`")]
    Duplicate {
        artifact: String,
        route_id: String,
        /// The artifact already planned under the same case-folded name.
        existing: String,
    },
}

/// A single build output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildTarget {
    /// Component route id, `None` for the index page.
    pub route_id: Option<String>,
    /// Output file name, e.g. `FooBar.html`.
    pub artifact: String,
    /// Component source file, `None` for the index page.
    pub source_file: Option<String>,
}

impl BuildTarget {
    pub fn is_index(&self) -> bool {
        self.route_id.is_none()
    }
}

/// All targets for one catalog: index first, then components in catalog order.
#[derive(Debug, Clone, Serialize)]
pub struct BuildTargets {
    targets: Vec<BuildTarget>,
}

impl BuildTargets {
    pub fn iter(&self) -> std::slice::Iter<'_, BuildTarget> {
        self.targets.iter()
    }

    /// The reserved index target.
    pub fn index(&self) -> &BuildTarget {
        &self.targets[0]
    }

    /// Component targets only.
    pub fn components(&self) -> impl Iterator<Item = &BuildTarget> {
        self.targets.iter().filter(|t| !t.is_index())
    }

    /// Artifact name for a route id.
    pub fn artifact_for(&self, route_id: &str) -> Option<&str> {
        self.targets
            .iter()
            .find(|t| t.route_id.as_deref() == Some(route_id))
            .map(|t| t.artifact.as_str())
    }
}

/// Artifact file name for a base name and page extension.
pub fn artifact_name(base: &str, page_ext: &str) -> String {
    format!("{base}.{page_ext}")
}

/// Generate one target per component plus the fixed index target.
///
/// Artifact names are compared case-insensitively: `AB.html` and `Ab.html`
/// (or `Index.html` and `index.html`) are one file on macOS and Windows.
pub fn generate_targets(catalog: &Catalog, page_ext: &str) -> Result<BuildTargets, TargetError> {
    let mut targets = Vec::with_capacity(catalog.len() + 1);
    let mut seen = FxHashMap::default();

    let index = BuildTarget {
        route_id: None,
        artifact: artifact_name(INDEX_NAME, page_ext),
        source_file: None,
    };
    seen.insert(index.artifact.to_lowercase(), index.artifact.clone());
    targets.push(index);

    for desc in catalog {
        let artifact = artifact_name(&desc.route_id, page_ext);
        if let Some(existing) = seen.get(&artifact.to_lowercase()) {
            return Err(TargetError::Duplicate {
                existing: existing.clone(),
                artifact,
                route_id: desc.route_id.clone(),
            });
        }
        seen.insert(artifact.to_lowercase(), artifact.clone());
        targets.push(BuildTarget {
            route_id: Some(desc.route_id.clone()),
            artifact,
            source_file: Some(desc.source_file.clone()),
        });
    }

    Ok(BuildTargets { targets })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::descriptor::ComponentDescriptor;
    use crate::component::resolve::{Resolution, resolve};

    fn catalog(names: &[&str]) -> Catalog {
        let descs = names
            .iter()
            .map(|n| ComponentDescriptor::from_file_name(n).unwrap());
        Catalog::from_descriptors("/components", descs).unwrap()
    }

    #[test]
    fn test_n_plus_one_targets() {
        let catalog = catalog(&["flight-visualization.md", "cheat-sheet.html", "summary.md"]);
        let targets = generate_targets(&catalog, "html").unwrap();

        assert_eq!(targets.iter().len(), catalog.len() + 1);
        assert_eq!(targets.index().artifact, "index.html");
        assert!(targets.index().is_index());

        let artifacts: Vec<_> = targets.components().map(|t| t.artifact.as_str()).collect();
        assert_eq!(
            artifacts,
            ["FlightVisualization.html", "CheatSheet.html", "Summary.html"]
        );
    }

    #[test]
    fn test_empty_catalog_has_index_only() {
        let targets = generate_targets(&Catalog::default(), "html").unwrap();
        assert_eq!(targets.iter().len(), 1);
        assert!(targets.index().is_index());
    }

    #[test]
    fn test_unique_artifacts() {
        let catalog = catalog(&["a.md", "b.md", "a-b-c.md", "abc-d.md"]);
        let targets = generate_targets(&catalog, "htm").unwrap();
        let unique: rustc_hash::FxHashSet<_> =
            targets.iter().map(|t| t.artifact.to_lowercase()).collect();
        assert_eq!(unique.len(), targets.iter().len());
        assert_eq!(targets.artifact_for("ABC"), Some("ABC.htm"));
        assert_eq!(targets.artifact_for("AbcD"), Some("AbcD.htm"));
    }

    #[test]
    fn test_case_insensitive_duplicate() {
        // distinct route ids, same file on a case-insensitive filesystem
        let catalog = catalog(&["a-b.md", "ab.md"]);
        let err = generate_targets(&catalog, "htm").unwrap_err();
        let TargetError::Duplicate {
            artifact,
            route_id,
            existing,
        } = err;
        assert_eq!(existing, "AB.htm");
        assert_eq!(artifact, "Ab.htm");
        assert_eq!(route_id, "Ab");
    }

    #[test]
    fn test_duplicate_with_index() {
        let catalog = catalog(&["index.md"]);
        let err = generate_targets(&catalog, "html").unwrap_err();
        assert!(err.to_string().contains("Index.html"));
        assert!(err.to_string().contains("`index.html`"));
    }

    #[test]
    fn test_every_artifact_resolves_back() {
        let catalog = catalog(&["flight-visualization.md", "cheat-sheet.html"]);
        let targets = generate_targets(&catalog, "html").unwrap();

        for target in targets.components() {
            let route_id = target.route_id.as_deref().unwrap();
            match resolve(&format!("/{route_id}"), &catalog) {
                Resolution::Component(desc) => {
                    assert_eq!(Some(&desc.source_file), target.source_file.as_ref());
                }
                other => panic!("{route_id} did not resolve: {other:?}"),
            }
        }
    }
}
