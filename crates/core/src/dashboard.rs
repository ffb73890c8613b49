//! Registry of list pages, one per catalog entity.

use std::sync::Arc;

use crate::catalog;
use crate::gateway::EntityGateway;
use crate::list_view::ListView;
use crate::view::PageSummary;

/// Owns exactly one [`ListView`] per managed entity.
///
/// Pages never share state with each other; only the gateway is common.
pub struct Dashboard {
    pages: Vec<Arc<ListView>>,
}

impl Dashboard {
    pub fn new(gateway: Arc<dyn EntityGateway>) -> Self {
        let pages = catalog::ALL
            .iter()
            .copied()
            .map(|schema| Arc::new(ListView::new(schema, Arc::clone(&gateway))))
            .collect();
        Self { pages }
    }

    /// The page for `slug`, if it names a catalog entity.
    pub fn page(&self, slug: &str) -> Option<Arc<ListView>> {
        self.pages
            .iter()
            .find(|p| p.schema().slug == slug)
            .cloned()
    }

    pub fn pages(&self) -> impl Iterator<Item = &Arc<ListView>> {
        self.pages.iter()
    }

    pub fn summaries(&self) -> Vec<PageSummary> {
        self.pages
            .iter()
            .map(|p| PageSummary::from(p.schema()))
            .collect()
    }
}
