//! Object store upload
//!
//! Every request gets its own key prefix, so artifacts of concurrent requests with equal names
//! never overwrite each other.

use std::{
    collections::BTreeMap,
    fs,
    path::{Component, Path, PathBuf},
    sync::Mutex,
};

use gainz_app::{Artifact, ArtifactSink, Delivery, SinkError};
use log::{debug, info};
use uuid::Uuid;

pub trait ObjectStore {
    fn put(&self, key: &str, bytes: &[u8], content_type: &str) -> Result<(), ObjectStoreError>;
}

#[derive(thiserror::Error, Debug)]
pub enum ObjectStoreError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("invalid key: {0}")]
    InvalidKey(String),
    #[error("{0}")]
    Unknown(String),
}

pub struct ObjectStoreUpload<S> {
    store: S,
}

impl<S: ObjectStore> ObjectStoreUpload<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }
}

impl<S: ObjectStore> ArtifactSink for ObjectStoreUpload<S> {
    fn deliver(&self, artifacts: Vec<Artifact>) -> Result<Delivery, SinkError> {
        let prefix = Uuid::new_v4();
        let mut keys = Vec::with_capacity(artifacts.len());

        for artifact in &artifacts {
            let key = format!("{prefix}/{}", artifact.file_name());
            self.store
                .put(&key, &artifact.bytes, &artifact.media_type)
                .map_err(|err| SinkError::Upload {
                    key: key.clone(),
                    reason: err.to_string(),
                })?;
            debug!("uploaded {key}");
            keys.push(key);
        }

        info!("uploaded {} artifacts under {prefix}", keys.len());

        Ok(Delivery::Uploaded { keys })
    }
}

/// Stores objects as files below a root directory.
pub struct FileSystemStore {
    root: PathBuf,
}

impl FileSystemStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path(&self, key: &str) -> Result<PathBuf, ObjectStoreError> {
        let relative = Path::new(key);
        if key.is_empty()
            || !relative
                .components()
                .all(|c| matches!(c, Component::Normal(_)))
        {
            return Err(ObjectStoreError::InvalidKey(key.to_string()));
        }
        Ok(self.root.join(relative))
    }
}

impl ObjectStore for FileSystemStore {
    fn put(&self, key: &str, bytes: &[u8], _content_type: &str) -> Result<(), ObjectStoreError> {
        let path = self.path(key)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, bytes)?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Object {
    pub bytes: Vec<u8>,
    pub content_type: String,
}

#[derive(Default)]
pub struct MemoryStore {
    objects: Mutex<BTreeMap<String, Object>>,
}

impl MemoryStore {
    #[must_use]
    pub fn get(&self, key: &str) -> Option<Object> {
        self.objects
            .lock()
            .ok()
            .and_then(|objects| objects.get(key).cloned())
    }

    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        self.objects
            .lock()
            .map(|objects| objects.keys().cloned().collect())
            .unwrap_or_default()
    }
}

impl ObjectStore for MemoryStore {
    fn put(&self, key: &str, bytes: &[u8], content_type: &str) -> Result<(), ObjectStoreError> {
        self.objects
            .lock()
            .map_err(|err| ObjectStoreError::Unknown(err.to_string()))?
            .insert(
                key.to_string(),
                Object {
                    bytes: bytes.to_vec(),
                    content_type: content_type.to_string(),
                },
            );
        Ok(())
    }
}
