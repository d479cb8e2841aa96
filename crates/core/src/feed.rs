//! Fronteira de apresentação do carrossel "Recently Viewed".
//!
//! Mantém a cópia local da lista que a tela exibe e re-lê o store depois de
//! cada mutação. Falhas de armazenamento nunca chegam à tela: são logadas e a
//! seção fica vazia ou desatualizada.

use std::num::NonZeroUsize;

use tracing::warn;

use recents_storage::SlotStorage;

use crate::product::{NewProductView, ProductView};
use crate::store::RecentlyViewed;

pub const CAROUSEL_TITLE: &str = "Recently Viewed";

/// O que o carrossel deve mostrar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Carousel<'a> {
    Loading,
    /// Carregado e vazio: a seção não aparece.
    Hidden,
    Items(&'a [ProductView]),
}

/// Colaborador externo que recebe o evento "usuário selecionou o produto P".
pub trait Navigator {
    fn open_product(&self, product: &ProductView);
}

pub struct RecentlyViewedFeed<S> {
    store: RecentlyViewed<S>,
    limit: Option<NonZeroUsize>,
    items: Vec<ProductView>,
    is_loading: bool,
}

impl<S: SlotStorage> RecentlyViewedFeed<S> {
    pub fn new(store: RecentlyViewed<S>, limit: Option<NonZeroUsize>) -> Self {
        Self {
            store,
            limit,
            items: Vec::new(),
            is_loading: true,
        }
    }

    pub fn store(&self) -> &RecentlyViewed<S> {
        &self.store
    }

    pub fn items(&self) -> &[ProductView] {
        &self.items
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub async fn refresh(&mut self) {
        self.is_loading = true;
        self.items = self.store.list(self.limit).await;
        self.is_loading = false;
    }

    pub async fn add_product(&mut self, product: NewProductView) {
        let id = product.id.clone();
        if let Err(e) = self.store.record(product).await {
            warn!("carrossel: produto {id} não registrado: {e}");
        }
        self.items = self.store.list(self.limit).await;
    }

    /// Remove do store e da cópia local. A cópia local é filtrada mesmo se o
    /// store falhar: o produto some da tela e pode voltar no próximo `refresh`.
    pub async fn remove_product(&mut self, id: &str) {
        if let Err(e) = self.store.remove(id).await {
            warn!("carrossel: produto {id} não removido do armazenamento: {e}");
        }
        self.items.retain(|item| item.id != id);
    }

    /// Como `remove_product`, a cópia local é esvaziada mesmo com falha.
    pub async fn clear(&mut self) {
        if let Err(e) = self.store.clear().await {
            warn!("carrossel: armazenamento não limpo: {e}");
        }
        self.items.clear();
    }

    pub fn carousel(&self) -> Carousel<'_> {
        if self.is_loading {
            Carousel::Loading
        } else if self.items.is_empty() {
            Carousel::Hidden
        } else {
            Carousel::Items(&self.items)
        }
    }

    /// Encaminha a seleção ao navigator se o produto está visível.
    pub fn select(&self, id: &str, navigator: &dyn Navigator) -> bool {
        match self.items.iter().find(|item| item.id == id) {
            Some(product) => {
                navigator.open_product(product);
                true
            }
            None => false,
        }
    }
}
