//! Development server: every component at `/<RouteId>`, rendered per request.
//!
//! Request flow:
//!
//! ```text
//! Received ─► Resolving ─┬─ Index ─────────────────────► 200
//!                        ├─ Component ─► Rendering ─┬──► 200
//!                        │                          └──► 500
//!                        └─ NotFound ──────────────────► 404
//! ```

mod lifecycle;
mod response;
mod watch;

pub use watch::{ComponentWatcher, Rescan, rescan};

use crate::{
    component::{
        Catalog, CatalogHandle, ComponentLoader, FsLoader, RenderResult, Resolution,
        render_index, render_page, resolve,
    },
    config::{FolioConfig, PageConfig},
    core::{is_shutdown, register_server},
    debug, log,
    utils::{html::encode_segment, plural_count},
};
use anyhow::{Context, Result};
use crossbeam::channel::{self, Receiver};
use std::net::SocketAddr;
use std::sync::Arc;
use std::thread;
use tiny_http::{Method, Request, Server};

/// Everything a request handler needs, shared by all workers.
pub struct ServeState {
    pub catalog: CatalogHandle,
    pub loader: Box<dyn ComponentLoader>,
    pub page: PageConfig,
}

impl ServeState {
    /// State serving `catalog` from disk.
    pub fn from_disk(catalog: Catalog, page: PageConfig) -> Self {
        Self {
            loader: Box::new(FsLoader::new(catalog.dir())),
            catalog: CatalogHandle::new(catalog),
            page,
        }
    }
}

/// Start watching the component directory if `serve.watch` is on.
///
/// Events are buffered from this point on, so call it before the initial
/// scan.
pub fn start_watcher(config: &FolioConfig) -> Result<Option<ComponentWatcher>> {
    if !config.serve.watch {
        return Ok(None);
    }
    let dir = &config.components.dir;
    ComponentWatcher::new(dir, &config.components.extensions)
        .map(Some)
        .with_context(|| format!("failed to watch {}", dir.display()))
}

/// Bound server ready to accept requests.
pub struct BoundServer {
    server: Arc<Server>,
    addr: SocketAddr,
    shutdown_rx: Receiver<()>,
}

/// Bind the HTTP server and register it for Ctrl+C shutdown.
pub fn bind_server(config: &FolioConfig) -> Result<BoundServer> {
    let (server, addr) = lifecycle::bind_with_retry(config.serve.interface, config.serve.port)?;
    let server = Arc::new(server);

    let (shutdown_tx, shutdown_rx) = channel::unbounded::<()>();
    register_server(Arc::clone(&server), shutdown_tx);

    Ok(BoundServer {
        server,
        addr,
        shutdown_rx,
    })
}

impl BoundServer {
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Serve until shutdown (blocking).
    pub fn run(
        self,
        state: ServeState,
        watcher: Option<ComponentWatcher>,
        config: &FolioConfig,
    ) -> Result<()> {
        let state = Arc::new(state);

        let watcher = watcher.map(|watcher| {
            let state = Arc::clone(&state);
            let shutdown_rx = self.shutdown_rx.clone();
            thread::spawn(move || watcher.run(&state.catalog, &shutdown_rx))
        });

        let catalog = state.catalog.load();
        log!("serve"; "http://{} ({})", self.addr, plural_count(catalog.len(), "component"));
        if let Some(first) = catalog.first() {
            log!("serve"; "http://{}/{}", self.addr, encode_segment(&first.route_id));
        }
        drop(catalog);

        run_request_loop(&self.server, &state, config.serve.workers)?;
        lifecycle::wait_for_shutdown(watcher);
        Ok(())
    }
}

/// Accept requests until the server is unblocked.
///
/// Requests are handed to a fixed pool so that a slow render never blocks
/// the accept loop or other renders.
pub fn run_request_loop(server: &Server, state: &Arc<ServeState>, workers: usize) -> Result<()> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .thread_name(|i| format!("folio-render-{i}"))
        .build()
        .context("failed to create render thread pool")?;

    for request in server.incoming_requests() {
        let state = Arc::clone(state);
        pool.spawn(move || {
            let method = request.method().clone();
            let url = request.url().to_string();
            // the client may be gone by now; nothing else to do
            if let Err(e) = handle_request(request, &state) {
                log!("serve"; "{method} {url}: {e}");
            }
        });
    }
    Ok(())
}

/// Answer one request. Errors are response write failures only.
fn handle_request(request: Request, state: &ServeState) -> Result<()> {
    if is_shutdown() {
        return response::respond_unavailable(request);
    }
    if !matches!(request.method(), Method::Get | Method::Head) {
        return response::respond_method_not_allowed(request);
    }

    // one snapshot for the whole request
    let catalog = state.catalog.load();

    match resolve(request.url(), &catalog) {
        Resolution::Index => {
            let html = render_index(&catalog, &state.page, |desc| {
                format!("/{}", encode_segment(&desc.route_id))
            });
            response::respond_html(request, html)
        }
        Resolution::Component(desc) => {
            let result = render_page(state.loader.as_ref(), desc, &state.page);
            match result {
                RenderResult::Rendered { markup } => {
                    debug!("serve"; "{} -> {}", desc.route_id, desc.source_file);
                    response::respond_html(request, markup)
                }
                failed => {
                    let text = failed.failure_text().unwrap_or_default();
                    log!("render"; "{}", text);
                    response::respond_render_error(request, &text)
                }
            }
        }
        Resolution::NotFound => response::respond_not_found(request),
    }
}
