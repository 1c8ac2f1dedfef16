//! Exercise metadata
//!
//! The exercise table is static for the lifetime of the process. `MetadataFile` reads it from disk
//! on every call, while `CachedMetadata` keeps the first successfully loaded table and serves all
//! later requests from memory.

use std::{
    fs::File,
    io::BufReader,
    path::PathBuf,
    sync::OnceLock,
};

use gainz_domain::{Metadata, MetadataLoadError, MetadataRepository};
use log::{debug, info};

pub struct MetadataFile {
    path: PathBuf,
}

impl MetadataFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl MetadataRepository for MetadataFile {
    fn read_metadata(&self) -> Result<Metadata, MetadataLoadError> {
        let file = File::open(&self.path)?;
        let metadata = Metadata::from_reader(BufReader::new(file))?;
        info!(
            "loaded {} exercises from {}",
            metadata.len(),
            self.path.display()
        );
        Ok(metadata)
    }
}

pub struct CachedMetadata<R> {
    repository: R,
    cache: OnceLock<Metadata>,
}

impl<R: MetadataRepository> CachedMetadata<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository,
            cache: OnceLock::new(),
        }
    }
}

impl<R: MetadataRepository> MetadataRepository for CachedMetadata<R> {
    fn read_metadata(&self) -> Result<Metadata, MetadataLoadError> {
        if let Some(metadata) = self.cache.get() {
            debug!("using cached exercise metadata");
            return Ok(metadata.clone());
        }

        let metadata = self.repository.read_metadata()?;

        Ok(self.cache.get_or_init(|| metadata).clone())
    }
}
