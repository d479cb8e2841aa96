use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use dashmap::DashMap;
use tracing::debug;

use recents_common::StorageError;

use crate::SlotStorage;

/// Estado compartilhado entre todos os clones.
#[derive(Debug, Default)]
struct SharedState {
    slots: DashMap<String, Bytes>,
}

/// Backend in-memory. Clones compartilham os mesmos slots.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    shared: Arc<SharedState>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Número de slots existentes.
    pub fn len(&self) -> usize {
        self.shared.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shared.slots.is_empty()
    }
}

#[async_trait]
impl SlotStorage for MemoryStorage {
    async fn read_slot(&self, key: &str) -> Result<Option<Bytes>, StorageError> {
        Ok(self.shared.slots.get(key).map(|v| v.value().clone()))
    }

    async fn write_slot(&self, key: &str, value: Bytes) -> Result<(), StorageError> {
        debug!("slot escrito: {key} ({} bytes)", value.len());
        self.shared.slots.insert(key.to_string(), value);
        Ok(())
    }

    async fn delete_slot(&self, key: &str) -> Result<(), StorageError> {
        if self.shared.slots.remove(key).is_some() {
            debug!("slot removido: {key}");
        }
        Ok(())
    }
}
