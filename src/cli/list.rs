//! `folio list`: print the catalog or the build targets as JSON.

use crate::{
    component::{generate_targets, scan},
    config::FolioConfig,
};
use anyhow::{Context, Result};
use serde::Serialize;

pub fn run_list(config: &FolioConfig, targets: bool, pretty: bool) -> Result<()> {
    println!("{}", listing(config, targets, pretty)?);
    Ok(())
}

fn listing(config: &FolioConfig, targets: bool, pretty: bool) -> Result<String> {
    let dir = &config.components.dir;
    let catalog = scan(dir, &config.components.extensions)
        .with_context(|| format!("failed to discover components in {}", dir.display()))?;

    if targets {
        let targets = generate_targets(&catalog, &config.build.page_extension)?;
        to_json(&targets, pretty)
    } else {
        to_json(&catalog, pretty)
    }
}

fn to_json<T: Serialize>(value: &T, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn config(tmp: &TempDir) -> FolioConfig {
        let mut config = FolioConfig::default();
        config.components.dir = tmp.path().to_path_buf();
        config
    }

    #[test]
    fn test_listing_components() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("cheat-sheet.html"), "").unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&listing(&config(&tmp), false, false).unwrap()).unwrap();
        let components = json["components"].as_array().unwrap();
        assert_eq!(components.len(), 1);
        assert_eq!(components[0]["route_id"], "CheatSheet");
        assert_eq!(components[0]["kind"], "html");
    }

    #[test]
    fn test_listing_targets_pretty() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("a.md"), "").unwrap();

        let out = listing(&config(&tmp), true, true).unwrap();
        assert!(out.contains('\n'));
        let json: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(json["targets"][1]["artifact"], "A.html");
    }

    #[test]
    fn test_listing_collision_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("a-b.md"), "").unwrap();
        fs::write(tmp.path().join("AB.md"), "").unwrap();
        assert!(listing(&config(&tmp), false, false).is_err());
    }
}
