use crate::emotions::EmotionCatalog;
use crate::storage::EntryStore;
use std::{path::PathBuf, sync::Arc};

#[derive(Clone)]
pub struct AppState {
    pub store: EntryStore,
    pub catalog: Arc<EmotionCatalog>,
}

impl AppState {
    pub fn new(db_path: PathBuf, catalog: EmotionCatalog) -> Self {
        Self {
            store: EntryStore::new(db_path),
            catalog: Arc::new(catalog),
        }
    }
}
