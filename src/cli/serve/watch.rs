//! Component directory watcher.
//!
//! ```text
//! notify ─► Debouncer ─► rescan ─► CatalogHandle::store
//! ```
//!
//! The watcher is created before the initial scan and buffers events until
//! [`ComponentWatcher::run`], so changes made while the server is coming up
//! are not lost. A rescan that fails keeps the current catalog and reports
//! the error in the status line.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crossbeam::channel::{self, Receiver};
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher, event::ModifyKind};
use rustc_hash::FxHashSet;

use crate::component::{Catalog, CatalogError, CatalogHandle, scan};
use crate::logger::{status_error, status_success, status_unchanged};
use crate::utils::plural_count;
use crate::{debug, log};

/// Quiet period after the last event before rescanning.
const DEBOUNCE_MS: u64 = 200;

/// Editor swap and backup files. Hidden files are never scanned either.
fn is_temp_file(path: &Path) -> bool {
    let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

    matches!(ext, "bck" | "bak" | "backup" | "swp" | "swo" | "tmp")
        || name.ends_with('~')
        || name.starts_with('.')
}

/// Watches one component directory.
pub struct ComponentWatcher {
    dir: PathBuf,
    extensions: Vec<String>,
    events: Receiver<notify::Result<notify::Event>>,
    _watcher: RecommendedWatcher,
}

impl ComponentWatcher {
    /// Start watching `dir` immediately; events buffer until [`run`](Self::run).
    pub fn new(dir: &Path, extensions: &[String]) -> notify::Result<Self> {
        let (tx, events) = channel::unbounded();
        let mut watcher = notify::recommended_watcher(move |res| {
            let _ = tx.send(res);
        })?;
        watcher.watch(dir, RecursiveMode::NonRecursive)?;

        Ok(Self {
            dir: dir.to_path_buf(),
            extensions: extensions.to_vec(),
            events,
            _watcher: watcher,
        })
    }

    /// Process events until `shutdown` fires or its sender is dropped.
    pub fn run(self, catalog: &CatalogHandle, shutdown: &Receiver<()>) {
        let mut debouncer = Debouncer::new();

        loop {
            channel::select! {
                recv(self.events) -> msg => match msg {
                    Ok(Ok(event)) => debouncer.add_event(&event),
                    Ok(Err(e)) => log!("watch"; "notify error: {}", e),
                    Err(_) => break,
                },
                recv(shutdown) -> _ => break,
                default(debouncer.sleep_duration()) => {
                    if let Some(paths) = debouncer.take_if_ready() {
                        debug!("watch"; "{} changed", plural_count(paths.len(), "path"));
                        report(&rescan(catalog, &self.dir, &self.extensions));
                    }
                }
            }
        }
        debug!("watch"; "stopped");
    }
}

/// Result of one rescan.
#[derive(Debug)]
pub enum Rescan {
    /// Same components in the same order.
    Unchanged { total: usize },
    /// A new catalog was stored. Both lists are empty on a pure reorder.
    Updated {
        added: Vec<String>,
        removed: Vec<String>,
        total: usize,
    },
    /// Scan failed; the previous catalog stays in place.
    Failed { kept: usize, error: CatalogError },
}

/// Scan `dir` again and swap the catalog if anything changed.
pub fn rescan(handle: &CatalogHandle, dir: &Path, extensions: &[String]) -> Rescan {
    match scan(dir, extensions) {
        Ok(next) => publish(handle, next),
        Err(error) => Rescan::Failed {
            kept: handle.load().len(),
            error,
        },
    }
}

/// Store `next` unless it lists the same components in the same order.
fn publish(handle: &CatalogHandle, next: Catalog) -> Rescan {
    let current = handle.load();
    let total = next.len();
    // listing order drives the index page, so a reorder is a change
    if current.iter().eq(next.iter()) {
        return Rescan::Unchanged { total };
    }

    let (added, removed) = diff(&current, &next);
    handle.store(next);
    Rescan::Updated {
        added,
        removed,
        total,
    }
}

/// Route ids present only in `next`, and only in `prev`.
fn diff(prev: &Catalog, next: &Catalog) -> (Vec<String>, Vec<String>) {
    let added = next
        .iter()
        .filter(|d| prev.get(&d.route_id).is_none_or(|p| p != *d))
        .map(|d| d.route_id.clone())
        .collect();
    let removed = prev
        .iter()
        .filter(|d| next.get(&d.route_id).is_none())
        .map(|d| d.route_id.clone())
        .collect();
    (added, removed)
}

fn report(outcome: &Rescan) {
    match outcome {
        Rescan::Unchanged { total } => {
            status_unchanged(&format!("unchanged: {}", plural_count(*total, "component")));
        }
        Rescan::Updated {
            added,
            removed,
            total,
        } => {
            let mut parts = Vec::new();
            if !added.is_empty() {
                parts.push(format!("+{}", added.join(", +")));
            }
            if !removed.is_empty() {
                parts.push(format!("-{}", removed.join(", -")));
            }
            if parts.is_empty() {
                parts.push("reordered".to_string());
            }
            status_success(&format!(
                "rescanned: {} ({})",
                plural_count(*total, "component"),
                parts.join(" ")
            ));
        }
        Rescan::Failed { kept, error } => {
            status_error(
                &format!("rescan failed, still serving {}", plural_count(*kept, "component")),
                &error.to_string(),
            );
        }
    }
}

/// Collects changed paths until events stop arriving for `DEBOUNCE_MS`.
struct Debouncer {
    changes: FxHashSet<PathBuf>,
    last_event: Option<Instant>,
}

impl Debouncer {
    fn new() -> Self {
        Self {
            changes: FxHashSet::default(),
            last_event: None,
        }
    }

    fn add_event(&mut self, event: &notify::Event) {
        match event.kind {
            EventKind::Create(_) | EventKind::Remove(_) => {}
            // metadata-only changes cannot alter the catalog
            EventKind::Modify(ModifyKind::Metadata(_)) => return,
            EventKind::Modify(_) => {}
            _ => return,
        }

        for path in &event.paths {
            if is_temp_file(path) {
                continue;
            }
            debug!("watch"; "{:?}: {}", event.kind, path.display());
            self.changes.insert(path.clone());
            self.last_event = Some(Instant::now());
        }
    }

    fn is_ready(&self) -> bool {
        self.last_event
            .is_some_and(|t| t.elapsed() >= Duration::from_millis(DEBOUNCE_MS))
            && !self.changes.is_empty()
    }

    fn take_if_ready(&mut self) -> Option<FxHashSet<PathBuf>> {
        if !self.is_ready() {
            return None;
        }
        self.last_event = None;
        Some(std::mem::take(&mut self.changes))
    }

    fn sleep_duration(&self) -> Duration {
        let Some(last_event) = self.last_event else {
            return Duration::from_secs(3600);
        };
        Duration::from_millis(DEBOUNCE_MS)
            .saturating_sub(last_event.elapsed())
            .max(Duration::from_millis(1))
    }
}
