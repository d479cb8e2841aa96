use std::num::NonZeroUsize;
use std::sync::Arc;

use tracing::{debug, error, warn};

use recents_common::{DEFAULT_CAPACITY, DEFAULT_SLOT_KEY, ProductError, RecentsResult};
use recents_storage::SlotStorage;

use crate::clock::{Clock, SystemClock};
use crate::codec;
use crate::product::{NewProductView, ProductView};

/// Configuração do store: slot usado e tamanho máximo da lista.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreConfig {
    pub slot_key: String,
    pub capacity: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            slot_key: DEFAULT_SLOT_KEY.to_string(),
            capacity: DEFAULT_CAPACITY,
        }
    }
}

impl StoreConfig {
    pub fn with_slot_key(mut self, slot_key: impl Into<String>) -> Self {
        self.slot_key = slot_key.into();
        self
    }

    /// Capacidade mínima é 1.
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity.max(1);
        self
    }
}

/// Lista de produtos vistos recentemente, persistida em um único slot.
///
/// Cada operação é um ciclo read-modify-write completo sobre o slot. Não há
/// lock entre a leitura e a escrita: dois `record` concorrentes no mesmo slot
/// resolvem por last-write-wins.
pub struct RecentlyViewed<S> {
    storage: S,
    config: StoreConfig,
    clock: Arc<dyn Clock>,
}

impl<S: SlotStorage> RecentlyViewed<S> {
    pub fn new(storage: S) -> Self {
        Self::with_config(storage, StoreConfig::default())
    }

    /// Capacidade zero é corrigida para 1, como em [`StoreConfig::with_capacity`].
    pub fn with_config(storage: S, mut config: StoreConfig) -> Self {
        config.capacity = config.capacity.max(1);
        Self {
            storage,
            config,
            clock: Arc::new(SystemClock),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    // --- Slot I/O ---

    async fn read_list(&self) -> RecentsResult<Vec<ProductView>> {
        match self.storage.read_slot(&self.config.slot_key).await? {
            Some(data) => Ok(codec::decode(&data)?),
            None => Ok(Vec::new()),
        }
    }

    async fn write_list(&self, items: &[ProductView]) -> RecentsResult<()> {
        let data = codec::encode(items)?;
        self.storage
            .write_slot(&self.config.slot_key, data)
            .await?;
        Ok(())
    }

    // --- Operações públicas ---

    /// Registra uma visualização: move (ou insere) o produto para o início
    /// com timestamp novo e descarta o excedente da capacidade.
    ///
    /// Um slot corrompido aborta a escrita; o conteúdo é preservado.
    pub async fn record(&self, product: NewProductView) -> RecentsResult<()> {
        if product.id.is_empty() {
            warn!("registro ignorado: produto sem identificador");
            return Err(ProductError::EmptyId.into());
        }

        let id = product.id.clone();
        match self.try_record(product).await {
            Ok(len) => {
                debug!("produto {id} registrado ({len} na lista)");
                Ok(())
            }
            Err(e) => {
                error!("erro ao registrar produto {id}: {e}");
                Err(e)
            }
        }
    }

    async fn try_record(&self, product: NewProductView) -> RecentsResult<usize> {
        let mut items = self.read_list().await?;
        let view = product.stamp(self.clock.now_millis());
        push_front_dedup(&mut items, view, self.config.capacity);
        self.write_list(&items).await?;
        Ok(items.len())
    }

    /// Lê a lista (mais recente primeiro), opcionalmente limitada, propagando falhas.
    pub async fn load(&self, limit: Option<NonZeroUsize>) -> RecentsResult<Vec<ProductView>> {
        let mut items = self.read_list().await?;
        if let Some(limit) = limit {
            items.truncate(limit.get());
        }
        Ok(items)
    }

    /// Como [`load`](Self::load), mas qualquer falha vira lista vazia.
    pub async fn list(&self, limit: Option<NonZeroUsize>) -> Vec<ProductView> {
        match self.load(limit).await {
            Ok(items) => items,
            Err(e) => {
                error!("erro ao ler produtos recentes: {e}");
                Vec::new()
            }
        }
    }

    /// Remove um produto. Id ausente não é erro e não toca no slot.
    pub async fn remove(&self, id: &str) -> RecentsResult<()> {
        match self.try_remove(id).await {
            Ok(removed) => {
                debug!("remove {id}: removido={removed}");
                Ok(())
            }
            Err(e) => {
                error!("erro ao remover produto {id}: {e}");
                Err(e)
            }
        }
    }

    async fn try_remove(&self, id: &str) -> RecentsResult<bool> {
        let mut items = self.read_list().await?;
        let before = items.len();
        items.retain(|item| item.id != id);
        if items.len() == before {
            return Ok(false);
        }
        self.write_list(&items).await?;
        Ok(true)
    }

    /// Apaga o slot inteiro.
    pub async fn clear(&self) -> RecentsResult<()> {
        match self.storage.delete_slot(&self.config.slot_key).await {
            Ok(()) => {
                debug!("lista de recentes limpa");
                Ok(())
            }
            Err(e) => {
                error!("erro ao limpar produtos recentes: {e}");
                Err(e.into())
            }
        }
    }

    /// Se o produto está na lista (falhas de leitura contam como ausente).
    pub async fn contains(&self, id: &str) -> bool {
        self.list(None).await.iter().any(|item| item.id == id)
    }
}

/// Insere `view` no início, removendo entradas com o mesmo id e truncando.
fn push_front_dedup(items: &mut Vec<ProductView>, view: ProductView, capacity: usize) {
    items.retain(|item| item.id != view.id);
    items.insert(0, view);
    items.truncate(capacity);
}
