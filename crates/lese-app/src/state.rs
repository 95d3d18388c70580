use std::sync::Arc;

use lese_config::Config;
use lese_core::SentenceIndex;
use tokio::sync::RwLock;

pub struct AppState {
    pub config: Arc<RwLock<Config>>,
    /// Recently read text, source of example sentences
    pub sentences: Arc<SentenceIndex>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let sentences = Arc::new(SentenceIndex::new(config.language.max_indexed_blocks));
        Self {
            config: Arc::new(RwLock::new(config)),
            sentences,
        }
    }
}
