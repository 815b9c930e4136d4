//! Shared application state for all routes. Built once at startup.

use crate::store::RecordStore;
use crate::views::Views;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RecordStore>,
    /// Deployment name echoed by the health endpoint.
    pub environment: Arc<str>,
    pub views: Arc<Views>,
}

impl AppState {
    pub fn new(store: Arc<dyn RecordStore>, environment: impl Into<Arc<str>>, views: Views) -> Self {
        AppState {
            store,
            environment: environment.into(),
            views: Arc::new(views),
        }
    }
}
