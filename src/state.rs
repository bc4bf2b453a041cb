//! Shared application state. Built once at startup; every resource handler
//! holds a clone of the same store.

use crate::config::Config;
use crate::store::{Store, TimedStore};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub config: Config,
}

impl AppState {
    /// Every call made through the state's store is bounded by
    /// `config.database.query_timeout`.
    pub fn new(config: Config, store: Arc<dyn Store>) -> Self {
        let store: Arc<dyn Store> = Arc::new(TimedStore::new(store, config.database.query_timeout));
        AppState { store, config }
    }
}
