use std::{collections::HashMap, hash::Hash, io::ErrorKind, path::{Path, PathBuf}, sync::Arc};

use configs::ResetStrategy;
use tokio::{fs, sync::RwLock};
use tracing::{debug, warn};

use crate::errors::ServiceError;

const EMPTY_OBJECT: &[u8] = b"{}";

/// Generic JSON file-backed key-value map store.
///
/// Persists a `HashMap<K, V>` as a single JSON object. Every mutation holds the
/// write lock until the file has been rewritten, so the file always reflects a
/// complete map and writes land in mutation order.
pub struct JsonMapStore<K, V> {
    inner: RwLock<HashMap<K, V>>,
    file_path: PathBuf,
}

impl<K, V> JsonMapStore<K, V>
where
    K: Eq + Hash + serde::Serialize + serde::de::DeserializeOwned + Clone,
    V: serde::Serialize + serde::de::DeserializeOwned + Clone,
{
    /// Open the store at `path`, creating the file with an empty map if missing.
    ///
    /// Never fails: an unreadable, empty or corrupt file yields an empty map and
    /// a warning.
    pub async fn open<P: Into<PathBuf>>(path: P) -> Arc<Self> {
        let file_path = path.into();
        if let Some(parent) = file_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            if let Err(e) = fs::create_dir_all(parent).await {
                warn!(path = %parent.display(), error = %e, "cannot create store directory");
            }
        }

        let map = Self::load(&file_path).await;
        Arc::new(Self { inner: RwLock::new(map), file_path })
    }

    async fn load(file_path: &Path) -> HashMap<K, V> {
        let bytes = match fs::read(file_path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                if let Err(e) = fs::write(file_path, EMPTY_OBJECT).await {
                    warn!(path = %file_path.display(), error = %e, "cannot create store file; starting empty");
                } else {
                    debug!(path = %file_path.display(), "created empty store file");
                }
                return HashMap::new();
            }
            Err(e) => {
                warn!(path = %file_path.display(), error = %e, "cannot read store file; starting empty");
                return HashMap::new();
            }
        };

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return HashMap::new();
        }
        match serde_json::from_slice(&bytes) {
            Ok(map) => map,
            Err(e) => {
                warn!(path = %file_path.display(), error = %e, "store file is corrupt; starting empty");
                HashMap::new()
            }
        }
    }

    async fn persist(&self, map: &HashMap<K, V>) -> Result<(), ServiceError> {
        let data = serde_json::to_vec_pretty(map).map_err(ServiceError::persistence)?;
        fs::write(&self.file_path, data).await.map_err(ServiceError::persistence)
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// List all entries as `(key, value)` pairs.
    pub async fn list(&self) -> Vec<(K, V)> {
        let map = self.inner.read().await;
        map.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
    }

    /// Get value by key.
    pub async fn get(&self, key: &K) -> Option<V> {
        let map = self.inner.read().await;
        map.get(key).cloned()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }

    /// Insert or update a value by key and persist. The memory update is kept
    /// even when the write fails.
    pub async fn insert(&self, key: K, value: V) -> Result<(), ServiceError> {
        let mut map = self.inner.write().await;
        map.insert(key, value);
        self.persist(&map).await
    }

    /// Drop every entry and make the file hold an empty object.
    pub async fn clear(&self, strategy: ResetStrategy) -> Result<(), ServiceError> {
        let mut map = self.inner.write().await;
        map.clear();
        if strategy == ResetStrategy::Recreate {
            match fs::remove_file(&self.file_path).await {
                Ok(()) => {}
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => return Err(ServiceError::persistence(e)),
            }
        }
        fs::write(&self.file_path, EMPTY_OBJECT).await.map_err(ServiceError::persistence)
    }
}
