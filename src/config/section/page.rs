//! `[page]` section configuration.
//!
//! ```toml
//! [page]
//! title = "Components"   # Index page title
//! lang = "en"            # <html lang> of every page
//! ```

use serde::{Deserialize, Serialize};

/// Page shell settings shared by the index and component pages.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub title: String,
    pub lang: String,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            title: "Components".into(),
            lang: "en".into(),
        }
    }
}
