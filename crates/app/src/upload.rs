/// A workout log as received from the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upload {
    pub file_name: String,
    pub content: Vec<u8>,
}

impl Upload {
    #[must_use]
    pub fn new(file_name: &str, content: Vec<u8>) -> Self {
        Self {
            file_name: file_name.to_string(),
            content,
        }
    }

    #[must_use]
    pub fn size(&self) -> usize {
        self.content.len()
    }
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum UploadError {
    #[error("No file part in the request")]
    Missing,
    #[error("No selected file")]
    NoFileName,
    #[error("File size exceeds maximum allowed size of {limit} bytes")]
    TooLarge { size: usize, limit: usize },
}

/// Reject uploads that must not reach the analysis.
pub fn validate(upload: Option<&Upload>, limit: usize) -> Result<&Upload, UploadError> {
    let upload = upload.ok_or(UploadError::Missing)?;

    if upload.file_name.trim().is_empty() {
        return Err(UploadError::NoFileName);
    }

    if upload.size() > limit {
        return Err(UploadError::TooLarge {
            size: upload.size(),
            limit,
        });
    }

    Ok(upload)
}
