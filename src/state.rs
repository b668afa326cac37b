use std::sync::Arc;

use crate::observability::metrics::Metrics;
use crate::store::ContactStore;

pub struct AppState {
    pub store: Arc<dyn ContactStore>,
    pub metrics: Metrics,
}

impl AppState {
    pub fn new(store: Arc<dyn ContactStore>) -> Self {
        Self {
            store,
            metrics: Metrics::new(),
        }
    }
}
