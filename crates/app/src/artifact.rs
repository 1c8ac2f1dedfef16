pub const MEDIA_TYPE_SVG: &str = "image/svg+xml";

/// A named, rendered chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub name: String,
    pub media_type: String,
    pub bytes: Vec<u8>,
}

impl Artifact {
    #[must_use]
    pub fn svg(name: String, svg: String) -> Self {
        Self {
            name,
            media_type: MEDIA_TYPE_SVG.to_string(),
            bytes: svg.into_bytes(),
        }
    }

    #[must_use]
    pub fn extension(&self) -> &str {
        match self.media_type.as_str() {
            MEDIA_TYPE_SVG => "svg",
            _ => "bin",
        }
    }

    /// Name with path separators replaced, so it is always a single path component.
    #[must_use]
    pub fn file_name(&self) -> String {
        format!("{}.{}", self.name.replace(['/', '\\'], "_"), self.extension())
    }
}

/// What a sink hands back to the caller once all artifacts are delivered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    Zip(Vec<u8>),
    Json(String),
    Uploaded { keys: Vec<String> },
}

/// Packages or publishes the artifacts of one request.
pub trait ArtifactSink {
    fn deliver(&self, artifacts: Vec<Artifact>) -> Result<Delivery, SinkError>;
}

impl<S: ArtifactSink + ?Sized> ArtifactSink for Box<S> {
    fn deliver(&self, artifacts: Vec<Artifact>) -> Result<Delivery, SinkError> {
        (**self).deliver(artifacts)
    }
}

#[derive(thiserror::Error, Debug)]
pub enum SinkError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("failed to encode artifacts: {0}")]
    Encoding(String),
    #[error("failed to upload {key}: {reason}")]
    Upload { key: String, reason: String },
}
