//! Render invocation with failure isolation.
//!
//! Every load error, render error or panic is turned into
//! [`RenderResult::Failed`]. Nothing escapes to the calling worker.

use std::any::Any;
use std::panic::{AssertUnwindSafe, catch_unwind};

use super::catalog::Catalog;
use super::descriptor::ComponentDescriptor;
use super::loader::ComponentLoader;
use crate::config::PageConfig;
use crate::embed::{INDEX_HTML, IndexVars, PAGE_HTML, PageVars};
use crate::utils::html::escape;
use crate::utils::plural_count;

/// Outcome of rendering one component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderResult {
    Rendered { markup: String },
    Failed { source_file: String, message: String },
}

impl RenderResult {
    pub fn is_rendered(&self) -> bool {
        matches!(self, Self::Rendered { .. })
    }

    /// Map the markup of a successful render.
    pub fn map(self, f: impl FnOnce(String) -> String) -> Self {
        match self {
            Self::Rendered { markup } => Self::Rendered { markup: f(markup) },
            failed => failed,
        }
    }

    /// Plain-text error body.
    pub fn failure_text(&self) -> Option<String> {
        match self {
            Self::Rendered { .. } => None,
            Self::Failed {
                source_file,
                message,
            } => Some(format!("failed to render `{source_file}`:\n{message}")),
        }
    }
}

/// Load and render `source_file` into an HTML fragment.
pub fn render(loader: &dyn ComponentLoader, source_file: &str) -> RenderResult {
    let outcome = catch_unwind(AssertUnwindSafe(|| {
        loader.load(source_file)?.render()
    }));

    let message = match outcome {
        Ok(Ok(markup)) => return RenderResult::Rendered { markup },
        Ok(Err(err)) => format!("{err:#}"),
        Err(payload) => format!("panicked: {}", panic_message(payload.as_ref())),
    };

    RenderResult::Failed {
        source_file: source_file.to_string(),
        message,
    }
}

/// Render a component and wrap it into a full document.
pub fn render_page(
    loader: &dyn ComponentLoader,
    desc: &ComponentDescriptor,
    page: &PageConfig,
) -> RenderResult {
    render(loader, &desc.source_file).map(|fragment| {
        PAGE_HTML.render(&PageVars {
            lang: &page.lang,
            title: &desc.display_name,
            body: &fragment,
        })
    })
}

/// Landing page listing every component in catalog order.
///
/// `link` maps a descriptor to its href, so that the server can point at
/// `/<route_id>` and a static build at the written artifact.
pub fn render_index(
    catalog: &Catalog,
    page: &PageConfig,
    link: impl Fn(&ComponentDescriptor) -> String,
) -> String {
    let mut items = String::new();
    for (i, desc) in catalog.iter().enumerate() {
        // first entry is the default selection
        let current = if i == 0 { " aria-current=\"page\"" } else { "" };
        items.push_str(&format!(
            "<li><a href=\"{}\"{current}>{}</a> <small>{}</small></li>\n",
            escape(&link(desc)),
            escape(&desc.route_id),
            escape(&desc.source_file),
        ));
    }

    let summary = if catalog.is_empty() {
        format!("No components found in {}.", catalog.dir().display())
    } else {
        format!("{}.", plural_count(catalog.len(), "component"))
    };

    let body = INDEX_HTML.render(&IndexVars {
        title: &page.title,
        summary: &summary,
        items: &items,
    });
    PAGE_HTML.render(&PageVars {
        lang: &page.lang,
        title: &page.title,
        body: &body,
    })
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s
    } else {
        "unknown panic payload"
    }
}
