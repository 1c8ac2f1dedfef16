use gainz_domain::{self as domain, MetadataRepository, PipelineError};
use log::{info, warn};

use crate::{
    ArtifactSink, Delivery, RenderError, Renderer, SinkError,
    upload::{self, Upload, UploadError},
};

#[derive(thiserror::Error, Debug)]
pub enum RequestError {
    #[error(transparent)]
    Upload(#[from] UploadError),
    #[error(transparent)]
    Pipeline(#[from] PipelineError),
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error(transparent)]
    Sink(#[from] SinkError),
}

impl RequestError {
    /// Whether the caller sent an unusable upload.
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        match self {
            RequestError::Upload(_) => true,
            RequestError::Pipeline(err) => err.is_client_error(),
            RequestError::Render(_) | RequestError::Sink(_) => false,
        }
    }
}

/// Handles a single upload from validation to delivery.
///
/// Artifacts stay in memory until they are passed to the sink, so concurrent
/// requests never share output files.
pub struct RequestService<R, V, S> {
    analysis: domain::Service<R>,
    renderer: V,
    sink: S,
    max_upload_size: usize,
}

impl<R, V, S> RequestService<R, V, S>
where
    R: MetadataRepository,
    V: Renderer,
    S: ArtifactSink,
{
    pub fn new(analysis: domain::Service<R>, renderer: V, sink: S, max_upload_size: usize) -> Self {
        Self {
            analysis,
            renderer,
            sink,
            max_upload_size,
        }
    }

    pub fn handle(&self, upload: Option<&Upload>) -> Result<Delivery, RequestError> {
        let upload = upload::validate(upload, self.max_upload_size).inspect_err(|err| {
            warn!("rejected upload: {err}");
        })?;

        info!(
            "received upload {:?} ({} bytes)",
            upload.file_name,
            upload.size()
        );

        let report = self.analysis.analyze(upload.content.as_slice())?;

        let artifacts = report
            .series()
            .map(|series| self.renderer.render(&series))
            .collect::<Result<Vec<_>, _>>()?;
        let count = artifacts.len();

        let delivery = self.sink.deliver(artifacts)?;

        info!("delivered {count} artifacts for {:?}", upload.file_name);

        Ok(delivery)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use gainz_domain::{Metadata, MetadataLoadError, NamedSeries};
    use pretty_assertions::assert_eq;

    use crate::{Artifact, SvgRenderer, Theme, chart::ChartOptions};

    use super::*;

    const METADATA: &str = "\
Exercise,Primary muscle group,Secondary muscle group,MEV,MRV
Bench Press,Chest,Triceps,8,22
Face Pull,Rear Delts,Traps,,
";

    const UPLOAD: &str = "\
Date;Workout Name;Exercise Name;Set Order;Weight;Reps;RPE;Distance;Distance Unit;Seconds;Notes;Workout Notes;Workout Duration
2024-01-01 10:00:00;Push;Bench Press;1;50;10;;;;;;;
2024-01-01 10:05:00;Push;Bench Press;2;60;8;;;;;;;
2024-01-03 10:00:00;Pull;Face Pull;1;20;15;;;;;;;
2024-01-03 10:10:00;Pull;Curl;1;12;12;;;;;;;
";

    struct Repository;

    impl MetadataRepository for Repository {
        fn read_metadata(&self) -> Result<Metadata, MetadataLoadError> {
            Metadata::from_reader(METADATA.as_bytes())
        }
    }

    #[derive(Default)]
    struct Collector {
        names: Mutex<Vec<String>>,
    }

    impl ArtifactSink for Collector {
        fn deliver(&self, artifacts: Vec<Artifact>) -> Result<Delivery, SinkError> {
            let names = artifacts.iter().map(|a| a.name.clone()).collect::<Vec<_>>();
            if let Ok(mut collected) = self.names.lock() {
                collected.extend(names.clone());
            }
            Ok(Delivery::Uploaded { keys: names })
        }
    }

    struct NameRenderer;

    impl Renderer for NameRenderer {
        fn render(&self, series: &NamedSeries) -> Result<Artifact, RenderError> {
            Ok(Artifact::svg(series.name(), String::new()))
        }
    }

    fn service<V: Renderer>(renderer: V) -> RequestService<Repository, V, Collector> {
        RequestService::new(
            domain::Service::new(Repository),
            renderer,
            Collector::default(),
            1024,
        )
    }

    #[test]
    fn test_handle() {
        let service = service(NameRenderer);

        let delivery = service
            .handle(Some(&Upload::new("strong.csv", UPLOAD.as_bytes().to_vec())))
            .unwrap();

        assert_eq!(
            delivery,
            Delivery::Uploaded {
                keys: vec![
                    "ex_Bench Press".to_string(),
                    "ex_Curl".to_string(),
                    "ex_Face Pull".to_string(),
                    "mg_Chest".to_string(),
                    "mg_Rear Delts".to_string(),
                    "mg_Traps".to_string(),
                    "mg_Triceps".to_string(),
                ]
            }
        );
    }

    #[test]
    fn test_handle_renders_svg() {
        let service = service(SvgRenderer::new(ChartOptions {
            width: 320,
            height: 240,
            theme: Theme::Dark,
        }));

        service
            .handle(Some(&Upload::new("strong.csv", UPLOAD.as_bytes().to_vec())))
            .unwrap();

        assert_eq!(service.sink.names.lock().unwrap().len(), 7);
    }

    #[test]
    fn test_handle_rejects_missing_upload() {
        let service = service(NameRenderer);

        let result = service.handle(None);

        assert!(matches!(
            result,
            Err(RequestError::Upload(UploadError::Missing))
        ));
        assert!(result.is_err_and(|err| err.is_client_error()));
        assert!(service.sink.names.lock().unwrap().is_empty());
    }

    #[test]
    fn test_handle_rejects_oversized_upload() {
        let service = service(NameRenderer);

        assert!(matches!(
            service.handle(Some(&Upload::new("strong.csv", vec![b';'; 1025]))),
            Err(RequestError::Upload(UploadError::TooLarge {
                size: 1025,
                limit: 1024
            }))
        ));
    }

    #[test]
    fn test_handle_rejects_malformed_upload() {
        let service = service(NameRenderer);
        let upload = UPLOAD.replace("2024-01-03 10:10:00", "03.01.2024");

        let result = service.handle(Some(&Upload::new("strong.csv", upload.into_bytes())));

        assert!(matches!(
            result,
            Err(RequestError::Pipeline(PipelineError::Parse(
                domain::ParseError::Date(_)
            )))
        ));
        assert!(result.is_err_and(|err| err.is_client_error()));
        assert!(service.sink.names.lock().unwrap().is_empty());
    }
}
