//! Embedded HTML shells.
//!
//! - `PAGE_HTML` wraps a rendered fragment into a full document
//! - `INDEX_HTML` is the body of the landing page

mod template;

pub use template::{Template, TemplateVars, substitute};

use crate::utils::html::escape;

/// Variables for the document shell.
pub struct PageVars<'a> {
    pub lang: &'a str,
    pub title: &'a str,
    /// Trusted HTML.
    pub body: &'a str,
}

/// Marker for [`PAGE_HTML`].
pub enum PageShell {}

impl TemplateVars for PageVars<'_> {
    type Kind = PageShell;

    fn apply(&self, content: &str) -> String {
        substitute(
            content,
            &[
                ("__FOLIO_LANG__", &*escape(self.lang)),
                ("__FOLIO_TITLE__", &*escape(self.title)),
                ("__FOLIO_BODY__", self.body),
            ],
        )
    }
}

/// Full HTML document around a component fragment.
pub const PAGE_HTML: Template<PageShell> = Template::new(include_str!("page.html"));

/// Variables for the landing page body.
pub struct IndexVars<'a> {
    pub title: &'a str,
    pub summary: &'a str,
    /// Trusted HTML, one `<li>` per component.
    pub items: &'a str,
}

/// Marker for [`INDEX_HTML`].
pub enum IndexBody {}

impl TemplateVars for IndexVars<'_> {
    type Kind = IndexBody;

    fn apply(&self, content: &str) -> String {
        substitute(
            content,
            &[
                ("__FOLIO_TITLE__", &*escape(self.title)),
                ("__FOLIO_SUMMARY__", &*escape(self.summary)),
                ("__FOLIO_ITEMS__", self.items),
            ],
        )
    }
}

/// Landing page listing every component.
pub const INDEX_HTML: Template<IndexBody> = Template::new(include_str!("index.html"));
