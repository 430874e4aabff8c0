//! Swappable catalog snapshot.
//!
//! Readers take one `Arc<Catalog>` per request and keep it until they are
//! done; a rescan stores a new catalog without disturbing them.

use std::sync::Arc;

use arc_swap::ArcSwap;

use super::catalog::Catalog;

#[derive(Debug)]
pub struct CatalogHandle {
    current: ArcSwap<Catalog>,
}

impl CatalogHandle {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            current: ArcSwap::from_pointee(catalog),
        }
    }

    /// Current snapshot.
    #[inline]
    pub fn load(&self) -> Arc<Catalog> {
        self.current.load_full()
    }

    /// Replace the snapshot, returning the previous one.
    pub fn store(&self, catalog: Catalog) -> Arc<Catalog> {
        self.current.swap(Arc::new(catalog))
    }
}
