//! Shared state handed to every API handler.

use std::path::Path;
use std::time::Instant;

use tessera_verify::{Dataset, MemoryStore, Sources, Verifier};

use crate::config::TesseraConfig;

pub struct NodeState {
    pub store: MemoryStore,
    pub verifier: Verifier,
    pub start_time: Instant,
}

impl NodeState {
    pub fn new(store: MemoryStore, verifier: Verifier) -> Self {
        Self {
            store,
            verifier,
            start_time: Instant::now(),
        }
    }

    /// Build state from configuration, loading the dataset file if one is set.
    pub fn from_config(config: &TesseraConfig) -> anyhow::Result<Self> {
        let store = match &config.data.dataset {
            Some(path) => load_dataset(path)?,
            None => {
                tracing::warn!("no dataset configured, starting with an empty store");
                MemoryStore::new()
            }
        };
        Ok(Self::new(store, Verifier::new(config.engine.clone())))
    }

    pub fn sources(&self) -> Sources<'_> {
        Sources::from_backend(&self.store)
    }
}

/// Read a JSON dataset file into a fresh store.
pub fn load_dataset(path: &Path) -> anyhow::Result<MemoryStore> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("cannot read dataset {}: {}", path.display(), e))?;
    let dataset = Dataset::from_json(&contents)?;
    let store = MemoryStore::from_dataset(dataset)?;
    tracing::info!(path = %path.display(), "dataset file loaded");
    Ok(store)
}
