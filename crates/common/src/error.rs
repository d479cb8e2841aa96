/// Erros do backend de armazenamento (slot indisponível).
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("I/O: {0}")]
    Io(#[from] std::io::Error),
    #[error("armazenamento indisponível: {0}")]
    Unavailable(String),
    #[error("nome de slot inválido: '{0}'")]
    InvalidKey(String),
}

/// Erros de (de)serialização do conteúdo do slot (slot corrompido).
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("conteúdo do slot corrompido: {0}")]
    Malformed(String),
    #[error("falha ao serializar lista: {0}")]
    Encode(String),
}

/// Erros de validação do produto recebido.
#[derive(Debug, thiserror::Error)]
pub enum ProductError {
    #[error("identificador do produto vazio")]
    EmptyId,
}

/// Erro top-level do Recents.
#[derive(Debug, thiserror::Error)]
pub enum RecentsError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Codec(#[from] CodecError),
    #[error(transparent)]
    Product(#[from] ProductError),
}

impl RecentsError {
    /// Verdadeiro para falhas de "armazenamento indisponível ou corrompido".
    pub fn is_storage_fault(&self) -> bool {
        matches!(self, RecentsError::Storage(_) | RecentsError::Codec(_))
    }
}

/// Result type alias.
pub type RecentsResult<T> = Result<T, RecentsError>;

// Conversão implícita de io::Error → RecentsError (via StorageError)
impl From<std::io::Error> for RecentsError {
    fn from(e: std::io::Error) -> Self {
        RecentsError::Storage(StorageError::Io(e))
    }
}
