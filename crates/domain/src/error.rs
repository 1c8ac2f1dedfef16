#[derive(thiserror::Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Metadata(#[from] MetadataLoadError),
    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl PipelineError {
    /// Whether the failure was caused by the uploaded data rather than by the service.
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        match self {
            PipelineError::Metadata(_) => false,
            PipelineError::Parse(err) => err.is_client_error(),
        }
    }
}

impl From<SchemaValidationError> for PipelineError {
    fn from(value: SchemaValidationError) -> Self {
        PipelineError::Parse(ParseError::Schema(value))
    }
}

impl From<DateParseError> for PipelineError {
    fn from(value: DateParseError) -> Self {
        PipelineError::Parse(ParseError::Date(value))
    }
}

#[derive(thiserror::Error, Debug)]
pub enum MetadataLoadError {
    #[error("failed to read exercise metadata: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse exercise metadata: {0}")]
    Csv(#[from] csv::Error),
    #[error("Missing metadata column: {0}")]
    MissingColumn(String),
    #[error("Invalid value in metadata row {row}, column {column}: {value:?}")]
    InvalidValue {
        row: usize,
        column: String,
        value: String,
    },
    #[error("Duplicate exercise in metadata: {0}")]
    DuplicateExercise(String),
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum SchemaValidationError {
    #[error("Missing columns: {0}")]
    MissingColumn(String),
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[error("time data {value:?} in row {row} does not match format {format:?}")]
pub struct DateParseError {
    pub row: usize,
    pub value: String,
    pub format: String,
}

#[derive(thiserror::Error, Debug)]
pub enum ParseError {
    #[error(transparent)]
    Schema(#[from] SchemaValidationError),
    #[error(transparent)]
    Date(#[from] DateParseError),
    #[error("Invalid value in row {row}, column {column}: {value:?}")]
    InvalidValue {
        row: usize,
        column: String,
        value: String,
    },
    #[error("failed to parse workout log: {0}")]
    Csv(#[from] csv::Error),
}

impl ParseError {
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        match self {
            ParseError::Schema(_) | ParseError::Date(_) | ParseError::InvalidValue { .. } => true,
            ParseError::Csv(err) => !matches!(err.kind(), csv::ErrorKind::Io(_)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pipeline_error_from_schema_validation_error() {
        assert!(matches!(
            PipelineError::from(SchemaValidationError::MissingColumn("RPE".to_string())),
            PipelineError::Parse(ParseError::Schema(SchemaValidationError::MissingColumn(column)))
                if column == "RPE"
        ));
    }

    #[test]
    fn test_pipeline_error_from_date_parse_error() {
        let error = DateParseError {
            row: 3,
            value: "2024/01/01".to_string(),
            format: "%Y-%m-%d %H:%M:%S".to_string(),
        };
        assert!(matches!(
            PipelineError::from(error.clone()),
            PipelineError::Parse(ParseError::Date(date)) if date == error
        ));
    }

    #[test]
    fn test_pipeline_error_is_client_error() {
        assert!(
            PipelineError::from(SchemaValidationError::MissingColumn("Date".to_string()))
                .is_client_error()
        );
        assert!(
            PipelineError::from(ParseError::InvalidValue {
                row: 1,
                column: "Reps".to_string(),
                value: "many".to_string(),
            })
            .is_client_error()
        );
        assert!(
            !PipelineError::from(MetadataLoadError::MissingColumn("MRV".to_string()))
                .is_client_error()
        );
    }

    #[test]
    fn test_schema_validation_error_names_column() {
        assert_eq!(
            SchemaValidationError::MissingColumn("RPE".to_string()).to_string(),
            "Missing columns: RPE"
        );
    }
}
