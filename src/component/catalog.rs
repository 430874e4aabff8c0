//! Component discovery and the immutable catalog.
//!
//! # Design
//!
//! - Order is the directory listing order, never re-sorted. The index page
//!   uses it for default selection.
//! - Route id collisions are fatal. Neither file wins.
//! - A catalog is never mutated; a rescan builds a new one.

use std::fs;
use std::path::{Path, PathBuf};

use rustc_hash::FxHashMap;
use serde::Serialize;
use thiserror::Error;

use super::descriptor::{ComponentDescriptor, ComponentKind};
use crate::utils::plural_count;
use crate::{debug, log};

/// Errors raised while scanning a component directory.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("cannot read component directory `{}`", dir.display())]
    Io {
        dir: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("route id `{route_id}` is claimed by both `{first}` and `{second}`")]
    Collision {
        route_id: String,
        first: String,
        second: String,
    },

    #[error("`{source_file}` produces an empty route id")]
    EmptyRouteId { source_file: String },
}

/// Ordered, collision-free list of discovered components.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Catalog {
    /// Directory the catalog was scanned from.
    dir: PathBuf,
    components: Vec<ComponentDescriptor>,
    #[serde(skip)]
    by_route: FxHashMap<String, usize>,
}

impl Catalog {
    /// Build a catalog from descriptors in order, rejecting duplicate route ids.
    pub fn from_descriptors(
        dir: impl Into<PathBuf>,
        descriptors: impl IntoIterator<Item = ComponentDescriptor>,
    ) -> Result<Self, CatalogError> {
        let mut catalog = Self {
            dir: dir.into(),
            ..Self::default()
        };

        for desc in descriptors {
            if desc.route_id.is_empty() {
                return Err(CatalogError::EmptyRouteId {
                    source_file: desc.source_file,
                });
            }
            if let Some(&existing) = catalog.by_route.get(&desc.route_id) {
                return Err(CatalogError::Collision {
                    route_id: desc.route_id,
                    first: catalog.components[existing].source_file.clone(),
                    second: desc.source_file,
                });
            }
            catalog
                .by_route
                .insert(desc.route_id.clone(), catalog.components.len());
            catalog.components.push(desc);
        }

        Ok(catalog)
    }

    /// Source directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Look up a component by exact (case-sensitive) route id.
    pub fn get(&self, route_id: &str) -> Option<&ComponentDescriptor> {
        self.by_route.get(route_id).map(|&i| &self.components[i])
    }

    /// Components in listing order.
    pub fn iter(&self) -> std::slice::Iter<'_, ComponentDescriptor> {
        self.components.iter()
    }

    /// First component in listing order (the default selection).
    pub fn first(&self) -> Option<&ComponentDescriptor> {
        self.components.first()
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a ComponentDescriptor;
    type IntoIter = std::slice::Iter<'a, ComponentDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Scan `dir` for component files with one of `extensions`.
///
/// Only regular files (after following symlinks) are considered. Hidden files
/// are skipped, as the watcher ignores them. Entries whose name is not valid
/// UTF-8 are skipped with a warning.
pub fn scan(dir: &Path, extensions: &[String]) -> Result<Catalog, CatalogError> {
    let io_err = |source| CatalogError::Io {
        dir: dir.to_path_buf(),
        source,
    };

    let mut descriptors = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_err)? {
        let entry = entry.map_err(io_err)?;
        let file_name = entry.file_name();

        let Some(name) = file_name.to_str() else {
            log!("scan"; "skipping non-utf8 file name {:?}", file_name);
            continue;
        };
        if name.starts_with('.') || !has_extension(name, extensions) {
            continue;
        }
        // `metadata` follows symlinks, `file_type` would not
        if !fs::metadata(entry.path()).is_ok_and(|m| m.is_file()) {
            continue;
        }
        if let Some(desc) = ComponentDescriptor::from_file_name(name) {
            descriptors.push(desc);
        }
    }

    let catalog = Catalog::from_descriptors(dir, descriptors)?;
    debug!("scan"; "{} in {}", plural_count(catalog.len(), "component"), dir.display());
    Ok(catalog)
}

fn has_extension(name: &str, extensions: &[String]) -> bool {
    Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| {
            extensions.iter().any(|e| e == ext) && ComponentKind::from_extension(ext).is_some()
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn exts() -> Vec<String> {
        vec!["md".into(), "html".into()]
    }

    fn touch(dir: &Path, name: &str) {
        fs::write(dir.join(name), "# hi").unwrap();
    }

    /// Names in the order `read_dir` yields them.
    fn listing(dir: &Path) -> Vec<String> {
        fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect()
    }

    #[test]
    fn test_scan_counts_and_order() {
        let tmp = TempDir::new().unwrap();
        for name in ["zeta-chart.md", "alpha.html", "mid-table.md"] {
            touch(tmp.path(), name);
        }

        let catalog = scan(tmp.path(), &exts()).unwrap();
        assert_eq!(catalog.len(), 3);

        let scanned: Vec<_> = catalog.iter().map(|d| d.source_file.clone()).collect();
        assert_eq!(scanned, listing(tmp.path()));
        assert_eq!(catalog.first().unwrap().source_file, scanned[0]);
    }

    #[test]
    fn test_scan_filters_extensions() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "keep.md");
        touch(tmp.path(), "skip.tsx");
        touch(tmp.path(), "notes.txt");
        touch(tmp.path(), "page.html");

        let catalog = scan(tmp.path(), &["md".to_string()]).unwrap();
        assert_eq!(catalog.len(), 1);
        assert!(catalog.get("Keep").is_some());
        assert!(catalog.get("Page").is_none());
    }

    #[test]
    fn test_scan_skips_directories() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("folder.md")).unwrap();
        touch(tmp.path(), "real.md");

        let catalog = scan(tmp.path(), &exts()).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.first().unwrap().route_id, "Real");
    }

    #[test]
    fn test_scan_empty_dir() {
        let tmp = TempDir::new().unwrap();
        let catalog = scan(tmp.path(), &exts()).unwrap();
        assert!(catalog.is_empty());
        assert_eq!(catalog.dir(), tmp.path());
    }

    #[test]
    fn test_scan_missing_dir() {
        let tmp = TempDir::new().unwrap();
        let err = scan(&tmp.path().join("nope"), &exts()).unwrap_err();
        assert!(matches!(err, CatalogError::Io { .. }));
        assert!(err.to_string().contains("nope"));
    }

    #[test]
    fn test_scan_file_instead_of_dir() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "file.md");
        let err = scan(&tmp.path().join("file.md"), &exts()).unwrap_err();
        assert!(matches!(err, CatalogError::Io { .. }));
    }

    #[test]
    fn test_scan_collision() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "foo-bar.md");
        touch(tmp.path(), "FooBar.md");

        let err = scan(tmp.path(), &exts()).unwrap_err();
        match err {
            CatalogError::Collision {
                route_id,
                first,
                second,
            } => {
                assert_eq!(route_id, "FooBar");
                let mut both = [first, second];
                both.sort();
                assert_eq!(both, ["FooBar.md".to_string(), "foo-bar.md".to_string()]);
            }
            other => panic!("expected collision, got {other:?}"),
        }
    }

    #[test]
    fn test_scan_collision_across_kinds() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "card.md");
        touch(tmp.path(), "card.html");

        let err = scan(tmp.path(), &exts()).unwrap_err();
        assert!(err.to_string().contains("card.md"));
        assert!(err.to_string().contains("card.html"));
    }

    #[test]
    fn test_scan_empty_route_id() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "---.md");
        let err = scan(tmp.path(), &exts()).unwrap_err();
        assert!(matches!(err, CatalogError::EmptyRouteId { .. }));
    }

    #[test]
    fn test_from_descriptors_first_listed_is_first() {
        let a = ComponentDescriptor::from_file_name("foo-bar.md").unwrap();
        let b = ComponentDescriptor::from_file_name("FooBar.html").unwrap();
        let err = Catalog::from_descriptors("/c", [a, b]).unwrap_err();
        match err {
            CatalogError::Collision { first, second, .. } => {
                assert_eq!(first, "foo-bar.md");
                assert_eq!(second, "FooBar.html");
            }
            other => panic!("expected collision, got {other:?}"),
        }
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        let desc = ComponentDescriptor::from_file_name("flight-visualization.md").unwrap();
        let catalog = Catalog::from_descriptors("/c", [desc]).unwrap();
        assert!(catalog.get("FlightVisualization").is_some());
        assert!(catalog.get("flightvisualization").is_none());
    }

    #[test]
    fn test_scan_skips_hidden_files() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), ".draft-card.md");
        touch(tmp.path(), ".md");
        touch(tmp.path(), "card.md");

        let catalog = scan(tmp.path(), &exts()).unwrap();
        let ids: Vec<_> = catalog.iter().map(|d| d.route_id.as_str()).collect();
        assert_eq!(ids, ["Card"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_scan_skips_non_utf8_names() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(OsStr::from_bytes(b"bad-\xff.md")), "x").unwrap();
        touch(tmp.path(), "good.md");

        let catalog = scan(tmp.path(), &exts()).unwrap();
        assert_eq!(catalog.len(), 1);
        assert!(catalog.get("Good").is_some());
    }

    #[cfg(unix)]
    #[test]
    fn test_scan_follows_symlinks() {
        use std::os::unix::fs::symlink;

        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("components");
        let elsewhere = tmp.path().join("shared");
        fs::create_dir_all(&dir).unwrap();
        fs::create_dir_all(elsewhere.join("nested.md")).unwrap();
        touch(&elsewhere, "linked-card.md");

        symlink(elsewhere.join("linked-card.md"), dir.join("linked-card.md")).unwrap();
        symlink(elsewhere.join("nested.md"), dir.join("nested.md")).unwrap();
        symlink(elsewhere.join("missing.md"), dir.join("dangling.md")).unwrap();

        let catalog = scan(&dir, &exts()).unwrap();
        let ids: Vec<_> = catalog.iter().map(|d| d.route_id.as_str()).collect();
        assert_eq!(ids, ["LinkedCard"]);
    }
}
