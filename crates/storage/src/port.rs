use async_trait::async_trait;
use bytes::Bytes;

use recents_common::StorageError;

/// Porta de armazenamento chave-valor: ler, escrever e apagar um slot inteiro.
///
/// Cada chamada é independente; o backend serializa o acesso a um mesmo slot,
/// mas nenhuma garantia existe entre um `read_slot` e o `write_slot` seguinte.
#[async_trait]
pub trait SlotStorage: Send + Sync {
    /// Conteúdo do slot, ou `None` se nunca foi escrito (ou foi apagado).
    async fn read_slot(&self, key: &str) -> Result<Option<Bytes>, StorageError>;

    /// Substitui o conteúdo do slot.
    async fn write_slot(&self, key: &str, value: Bytes) -> Result<(), StorageError>;

    /// Apaga o slot. Apagar um slot inexistente não é erro.
    async fn delete_slot(&self, key: &str) -> Result<(), StorageError>;
}

