use std::io::Read;

use log::{debug, error, info, warn};

use crate::{
    DEFAULT_DATE_FORMAT, Metadata, MetadataRepository, PipelineError, Report, enrich,
    parse_workouts,
};

macro_rules! log_on_error {
    ($func: expr, $action: literal, $entity: literal) => {{
        let result: Result<_, PipelineError> = $func.map_err(PipelineError::from);
        match result {
            Ok(_) => {}
            Err(ref err) => {
                if err.is_client_error() {
                    warn!("failed to {} {}: {err}", $action, $entity);
                } else {
                    error!("failed to {} {}: {err}", $action, $entity);
                }
            }
        }
        result
    }};
}

/// Runs the analysis pipeline for single workout logs.
///
/// The service holds no state besides the metadata repository and the date
/// format, so one instance can serve any number of requests.
pub struct Service<R> {
    repository: R,
    date_format: String,
}

impl<R: MetadataRepository> Service<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository,
            date_format: DEFAULT_DATE_FORMAT.to_string(),
        }
    }

    #[must_use]
    pub fn with_date_format(mut self, date_format: &str) -> Self {
        self.date_format = date_format.to_string();
        self
    }

    pub fn analyze<U: Read>(&self, upload: U) -> Result<Report, PipelineError> {
        let metadata = log_on_error!(self.repository.read_metadata(), "load", "exercise metadata")?;
        log_on_error!(
            analyze(upload, &metadata, &self.date_format),
            "analyze",
            "workout log"
        )
    }
}

/// Parse a workout log, join it with the metadata and aggregate it.
pub fn analyze<U: Read>(
    upload: U,
    metadata: &Metadata,
    date_format: &str,
) -> Result<Report, PipelineError> {
    let sets = parse_workouts(upload, date_format)?;
    let enriched = enrich(sets, metadata);
    let report = Report::new(&enriched);

    debug!(
        "aggregated {} sets into {} exercise and {} muscle group series",
        enriched.len(),
        report.exercises.len(),
        report.muscle_groups.len()
    );
    info!("analyzed workout log with {} sets", enriched.len());

    Ok(report)
}
