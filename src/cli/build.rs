//! Static build: one page per component, the index and a manifest.
//!
//! Build phases:
//! - **Scan** - Discover components, fail on collisions
//! - **Plan** - Generate build targets (N components + index)
//! - **Prepare** - Clean and create the output directory
//! - **Render** - Render components in parallel, collecting failures
//! - **Finalize** - Write index and `manifest.json`, report

use crate::{
    component::{
        BuildTargets, Catalog, ComponentLoader, FsLoader, RenderResult, generate_targets,
        render_index, render_page, scan,
    },
    config::FolioConfig,
    debug, log,
    logger::ProgressLine,
    utils::{html::encode_segment, plural_count},
};
use anyhow::{Context, Result, bail};
use parking_lot::Mutex;
use rayon::prelude::*;
use std::{fs, path::Path};

/// Name of the target list written next to the pages.
pub const MANIFEST_NAME: &str = "manifest.json";

/// What a build wrote.
#[derive(Debug, Default)]
pub struct BuildReport {
    /// Component pages written.
    pub written: usize,
    /// `(source_file, message)` of components that failed to render.
    pub failed: Vec<(String, String)>,
}

/// Build every component of the configured directory.
pub fn build_site(config: &FolioConfig) -> Result<BuildReport> {
    let dir = &config.components.dir;
    let catalog = scan(dir, &config.components.extensions)
        .with_context(|| format!("failed to discover components in {}", dir.display()))?;

    let loader = FsLoader::new(catalog.dir());
    let report = build_catalog(&catalog, &loader, config)?;

    if !report.failed.is_empty() {
        let list = report
            .failed
            .iter()
            .map(|(file, msg)| format!("- {file}: {msg}"))
            .collect::<Vec<_>>()
            .join("\n");
        bail!(
            "{} failed to render:\n{list}",
            plural_count(report.failed.len(), "component")
        );
    }

    log!("build"; "done, {} in {}", plural_count(report.written, "page"), config.build.output.display());
    Ok(report)
}

/// Render `catalog` into the output directory.
///
/// Render failures do not stop the build; they are returned in the report.
/// Everything else (I/O, duplicate artifacts) is an error.
pub fn build_catalog(
    catalog: &Catalog,
    loader: &dyn ComponentLoader,
    config: &FolioConfig,
) -> Result<BuildReport> {
    let output = &config.build.output;
    let targets = generate_targets(catalog, &config.build.page_extension)?;
    debug!("build"; "{} planned", plural_count(targets.iter().len(), "target"));

    prepare_output(output, config.build.clean)?;

    let progress = ProgressLine::new("build", &[("components", catalog.len())]);
    let failed = Mutex::new(Vec::new());

    let components: Vec<_> = targets.components().collect();
    components.par_iter().try_for_each(|target| -> Result<()> {
        let desc = target
            .route_id
            .as_deref()
            .and_then(|id| catalog.get(id))
            .with_context(|| format!("target `{}` has no component", target.artifact))?;

        match render_page(loader, desc, &config.page) {
            RenderResult::Rendered { markup } => {
                write_artifact(output, &target.artifact, markup.as_bytes())?;
            }
            RenderResult::Failed {
                source_file,
                message,
            } => {
                failed.lock().push((source_file, message));
            }
        }
        progress.inc("components");
        Ok(())
    })?;
    progress.finish();

    let mut failed = failed.into_inner();
    // workers finish in any order
    failed.sort_by_key(|(file, _)| catalog.iter().position(|d| &d.source_file == file));
    for (file, message) in &failed {
        log!("render"; "{file}: {message}");
    }

    write_index(catalog, &targets, config)?;
    write_manifest(output, &targets)?;

    Ok(BuildReport {
        written: catalog.len() - failed.len(),
        failed,
    })
}

fn prepare_output(output: &Path, clean: bool) -> Result<()> {
    if clean && output.exists() {
        fs::remove_dir_all(output).with_context(|| {
            format!("Failed to clear output directory: {}", output.display())
        })?;
    }
    fs::create_dir_all(output)
        .with_context(|| format!("Failed to create output directory: {}", output.display()))
}

fn write_artifact(output: &Path, artifact: &str, content: &[u8]) -> Result<()> {
    let path = output.join(artifact);
    fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))
}

/// Index links point at the written artifacts, relative to the index itself.
fn write_index(catalog: &Catalog, targets: &BuildTargets, config: &FolioConfig) -> Result<()> {
    let html = render_index(catalog, &config.page, |desc| {
        targets
            .artifact_for(&desc.route_id)
            .map(encode_segment)
            .unwrap_or_default()
    });
    write_artifact(&config.build.output, &targets.index().artifact, html.as_bytes())
}

fn write_manifest(output: &Path, targets: &BuildTargets) -> Result<()> {
    let json = serde_json::to_string_pretty(targets)?;
    write_artifact(output, MANIFEST_NAME, json.as_bytes())
}
