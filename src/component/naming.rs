//! File name → route identifier transform.
//!
//! Component files are expected to be named in `kebab-case`; the route id is
//! the PascalCase-like join of the segments:
//!
//! ```text
//! flight-longevity-cheatsheet-v2  →  FlightLongevityCheatsheetV2
//! myComponent                     →  MyComponent
//! a--b                            →  AB
//! ```
//!
//! Only the first character of each segment is touched, so mixed-case input
//! is never reshaped beyond that.

/// Separator between words in a component file name.
pub const SEPARATOR: char = '-';

/// Derive the route id for a file base name (extension already stripped).
///
/// Empty segments (leading, trailing or repeated separators) are dropped.
pub fn transform(base_name: &str) -> String {
    let mut route_id = String::with_capacity(base_name.len());
    for segment in base_name.split(SEPARATOR).filter(|s| !s.is_empty()) {
        let mut chars = segment.chars();
        if let Some(first) = chars.next() {
            route_id.extend(first.to_uppercase());
            route_id.push_str(chars.as_str());
        }
    }
    route_id
}
