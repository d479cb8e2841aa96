use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use bytes::Bytes;
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

use recents_common::StorageError;

use crate::SlotStorage;

/// Sufixo sequencial dos temporários; cada escrita usa um arquivo próprio.
static TEMP_SEQ: AtomicU64 = AtomicU64::new(0);

/// Política de sync antes de publicar um slot.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub enum SyncPolicy {
    /// `sync_all` no arquivo temporário antes do rename.
    #[default]
    Always,
    /// Sem sync explícito (deixa pro OS).
    No,
}

/// Backend em disco: um arquivo por slot dentro de `dir`.
///
/// A escrita vai para um arquivo temporário irmão e depois é renomeada por
/// cima do slot, então um leitor nunca vê conteúdo pela metade.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
    policy: SyncPolicy,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>, policy: SyncPolicy) -> Self {
        Self {
            dir: dir.into(),
            policy,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn slot_path(&self, key: &str) -> Result<PathBuf, StorageError> {
        validate_key(key)?;
        Ok(self.dir.join(key))
    }

    fn temp_path(&self, key: &str) -> PathBuf {
        let seq = TEMP_SEQ.fetch_add(1, Ordering::Relaxed);
        self.dir
            .join(format!(".{key}.{}.{seq}.tmp", std::process::id()))
    }

    async fn write_temp(&self, tmp: &Path, value: &[u8]) -> std::io::Result<()> {
        let mut file = OpenOptions::new()
            .create_new(true)
            .write(true)
            .open(tmp)
            .await?;
        file.write_all(value).await?;
        file.flush().await?;
        if self.policy == SyncPolicy::Always {
            file.sync_all().await?;
        }
        Ok(())
    }
}

/// Chaves viram nomes de arquivo: só `[A-Za-z0-9._-]`, sem `.` inicial.
fn validate_key(key: &str) -> Result<(), StorageError> {
    let valid = !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'));
    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_string()))
    }
}

#[async_trait]
impl SlotStorage for FileStorage {
    async fn read_slot(&self, key: &str) -> Result<Option<Bytes>, StorageError> {
        let path = self.slot_path(key)?;
        match fs::read(&path).await {
            Ok(data) => Ok(Some(Bytes::from(data))),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn write_slot(&self, key: &str, value: Bytes) -> Result<(), StorageError> {
        let path = self.slot_path(key)?;
        fs::create_dir_all(&self.dir).await?;

        let tmp = self.temp_path(key);
        let written = match self.write_temp(&tmp, &value).await {
            Ok(()) => fs::rename(&tmp, &path).await,
            Err(e) => Err(e),
        };
        if let Err(e) = written {
            if let Err(cleanup) = fs::remove_file(&tmp).await
                && cleanup.kind() != ErrorKind::NotFound
            {
                warn!("temporário {:?} não removido: {cleanup}", tmp);
            }
            return Err(e.into());
        }

        debug!("slot {key} gravado em {:?} ({} bytes)", path, value.len());
        Ok(())
    }

    async fn delete_slot(&self, key: &str) -> Result<(), StorageError> {
        let path = self.slot_path(key)?;
        match fs::remove_file(&path).await {
            Ok(()) => {
                debug!("slot {key} removido");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
