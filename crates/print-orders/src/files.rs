use crate::store::{KvStore, namespaced};
use crate::types::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Key the file metadata is stored under, inside the registry's namespace
pub const STORED_FILES_KEY: &str = "storedFiles";

/// An uploaded file. Only the metadata is persisted; the contents are kept
/// in memory for the lifetime of the registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredFile {
    pub name: String,
    pub size: u64,
    #[serde(rename = "type")]
    pub mime_type: String,
    pub path: String,
    #[serde(skip)]
    data: Option<Vec<u8>>,
}

impl StoredFile {
    /// File contents, if uploaded during this session
    pub fn data(&self) -> Option<&[u8]> {
        self.data.as_deref()
    }

    pub fn to_order_file(&self) -> OrderFile {
        OrderFile {
            name: self.name.clone(),
            size: self.size,
            mime_type: self.mime_type.clone(),
            path: Some(self.path.clone()),
        }
    }
}

/// Uploaded files keyed by path
pub struct FileRegistry<S> {
    store: S,
    key: String,
    files: BTreeMap<String, StoredFile>,
}

impl<S: KvStore> FileRegistry<S> {
    /// Open the registry, restoring metadata saved by earlier sessions
    pub async fn open(store: S, namespace: &str) -> Result<Self> {
        let key = namespaced(namespace, STORED_FILES_KEY);
        let mut files = BTreeMap::new();

        if let Some(json) = store.get(&key).await? {
            match serde_json::from_str::<Vec<StoredFile>>(&json) {
                Ok(saved) => {
                    for file in saved {
                        files.insert(file.path.clone(), file);
                    }
                }
                Err(e) => log::warn!("ignoring unreadable file metadata: {}", e),
            }
        }

        Ok(Self { store, key, files })
    }

    /// Store `data` under `/uploads/<name>`, replacing any file at that path
    pub async fn save_file(
        &mut self,
        name: &str,
        mime_type: &str,
        data: Vec<u8>,
    ) -> Result<StoredFile> {
        let path = upload_path(name);
        let file = StoredFile {
            name: name.to_string(),
            size: data.len() as u64,
            mime_type: mime_type.to_string(),
            path: path.clone(),
            data: Some(data),
        };

        self.files.insert(path, file.clone());
        self.persist().await?;

        log::info!("stored {} ({} bytes)", file.path, file.size);
        Ok(file)
    }

    /// Look up a file by path, falling back to a match on the file name
    pub fn get_file(&self, path: &str) -> Option<&StoredFile> {
        if path.is_empty() {
            log::warn!("attempted to get a file with an empty path");
            return None;
        }

        if let Some(file) = self.files.get(path) {
            return Some(file);
        }

        let name = path.rsplit('/').next()?;
        let found = self.files.values().find(|file| file.name == name);
        match found {
            Some(_) => log::debug!("found {} by name instead of path {}", name, path),
            None => log::debug!("file not found: {}", path),
        }
        found
    }

    pub fn files(&self) -> impl Iterator<Item = &StoredFile> {
        self.files.values()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub async fn clear_all(&mut self) -> Result<()> {
        self.files.clear();
        self.persist().await?;
        log::info!("all uploaded files cleared");
        Ok(())
    }

    pub fn into_store(self) -> S {
        self.store
    }

    async fn persist(&mut self) -> Result<()> {
        let saved: Vec<&StoredFile> = self.files.values().collect();
        let json = serde_json::to_string(&saved)?;
        self.store.put(&self.key, json).await
    }
}
