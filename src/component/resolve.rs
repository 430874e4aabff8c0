//! Request path → component resolution.

use std::borrow::Cow;

use percent_encoding::percent_decode_str;

use super::catalog::Catalog;
use super::descriptor::ComponentDescriptor;

/// Outcome of resolving a request path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution<'a> {
    /// Empty path or `/`: the landing page.
    Index,
    /// First path segment matched a route id exactly.
    Component(&'a ComponentDescriptor),
    /// Nothing matched. Callers answer with a 404.
    NotFound,
}

/// Resolve `request_path` against `catalog`.
///
/// Query string and fragment are ignored, the path is percent-decoded, and
/// only the first non-empty segment is compared (case-sensitive).
pub fn resolve<'a>(request_path: &str, catalog: &'a Catalog) -> Resolution<'a> {
    let segment = first_segment(request_path);
    if segment.is_empty() {
        return Resolution::Index;
    }

    match catalog.get(&segment) {
        Some(desc) => Resolution::Component(desc),
        None => Resolution::NotFound,
    }
}

/// Decoded first path segment, empty for the root.
fn first_segment(request_path: &str) -> Cow<'_, str> {
    let path = request_path
        .split(['?', '#'])
        .next()
        .unwrap_or(request_path);
    let raw = path.split('/').find(|s| !s.is_empty()).unwrap_or("");

    // Undecodable input cannot equal any route id; keep it raw so it misses
    percent_decode_str(raw)
        .decode_utf8()
        .unwrap_or(Cow::Borrowed(raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        let descs = ["flight-visualization.md", "cheat-sheet.html", "élan.md"]
            .iter()
            .map(|n| ComponentDescriptor::from_file_name(n).unwrap());
        Catalog::from_descriptors("/components", descs).unwrap()
    }

    #[test]
    fn test_resolve_component() {
        let catalog = catalog();
        match resolve("/FlightVisualization", &catalog) {
            Resolution::Component(desc) => {
                assert_eq!(desc.route_id, "FlightVisualization");
                assert_eq!(desc.source_file, "flight-visualization.md");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_resolve_not_found() {
        let catalog = catalog();
        assert_eq!(resolve("/DoesNotExist", &catalog), Resolution::NotFound);
        // case-sensitive
        assert_eq!(resolve("/flightvisualization", &catalog), Resolution::NotFound);
        // source file names are not routes
        assert_eq!(resolve("/cheat-sheet.html", &catalog), Resolution::NotFound);
    }

    #[test]
    fn test_resolve_index() {
        let catalog = catalog();
        assert_eq!(resolve("/", &catalog), Resolution::Index);
        assert_eq!(resolve("", &catalog), Resolution::Index);
        assert_eq!(resolve("//", &catalog), Resolution::Index);
        assert_eq!(resolve("/?page=2", &catalog), Resolution::Index);
    }

    #[test]
    fn test_resolve_uses_first_segment() {
        let catalog = catalog();
        assert!(matches!(
            resolve("/CheatSheet/extra/parts", &catalog),
            Resolution::Component(d) if d.route_id == "CheatSheet"
        ));
        assert!(matches!(
            resolve("CheatSheet", &catalog),
            Resolution::Component(_)
        ));
    }

    #[test]
    fn test_resolve_ignores_query_and_fragment() {
        let catalog = catalog();
        assert!(matches!(
            resolve("/CheatSheet?print=1", &catalog),
            Resolution::Component(_)
        ));
        assert!(matches!(
            resolve("/CheatSheet#section", &catalog),
            Resolution::Component(_)
        ));
    }

    #[test]
    fn test_resolve_percent_decoded() {
        let catalog = catalog();
        assert!(matches!(
            resolve("/%C3%89lan", &catalog),
            Resolution::Component(d) if d.source_file == "élan.md"
        ));
        assert_eq!(resolve("/%FF%FE", &catalog), Resolution::NotFound);
    }

    #[test]
    fn test_resolve_empty_catalog() {
        let catalog = Catalog::default();
        assert_eq!(resolve("/", &catalog), Resolution::Index);
        assert_eq!(resolve("/Anything", &catalog), Resolution::NotFound);
    }
}
