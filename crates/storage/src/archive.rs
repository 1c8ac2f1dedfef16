use std::io::{Cursor, Write};

use gainz_app::{Artifact, ArtifactSink, Delivery, SinkError};
use log::debug;
use zip::{CompressionMethod, ZipWriter, write::SimpleFileOptions};

/// Packs all artifacts into one deflate-compressed zip archive in memory.
#[derive(Default)]
pub struct LocalZip;

impl ArtifactSink for LocalZip {
    fn deliver(&self, artifacts: Vec<Artifact>) -> Result<Delivery, SinkError> {
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));

        for artifact in &artifacts {
            writer
                .start_file(artifact.file_name(), options)
                .map_err(|err| SinkError::Encoding(err.to_string()))?;
            writer.write_all(&artifact.bytes)?;
        }

        let bytes = writer
            .finish()
            .map_err(|err| SinkError::Encoding(err.to_string()))?
            .into_inner();

        debug!("packed {} artifacts into {} bytes", artifacts.len(), bytes.len());

        Ok(Delivery::Zip(bytes))
    }
}
