//! Shared application state for the exposition surface.

use std::sync::Arc;

use ethgaze_core::registry::WatchTarget;

use crate::store::ObservationStore;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    prefix: String,
    registry: Arc<Vec<WatchTarget>>,
    store: Arc<ObservationStore>,
}

impl AppState {
    pub fn new(
        prefix: String,
        registry: Arc<Vec<WatchTarget>>,
        store: Arc<ObservationStore>,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                prefix,
                registry,
                store,
            }),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.inner.prefix
    }

    pub fn registry(&self) -> &[WatchTarget] {
        &self.inner.registry
    }

    pub fn store(&self) -> &ObservationStore {
        &self.inner.store
    }
}
