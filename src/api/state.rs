use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{models::QuizSession, services::providers::CatalogProvider};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub inner: Arc<RwLock<AppStateInner>>,
    pub provider: Arc<dyn CatalogProvider>,
}

/// Inner state that can be modified
pub struct AppStateInner {
    pub sessions: HashMap<Uuid, QuizSession>,
}

impl AppState {
    /// Creates application state around the configured catalog provider
    pub fn new(provider: Arc<dyn CatalogProvider>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(AppStateInner {
                sessions: HashMap::new(),
            })),
            provider,
        }
    }
}
