#![warn(clippy::pedantic)]

use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum, ValueHint};
use gainz_app::{
    ArtifactSink, Delivery, RequestService, Settings, SettingsRepository,
    SvgRenderer, Theme, Upload, log as app_log,
};
use gainz_domain::Service;
use gainz_storage::{
    archive::LocalZip,
    json::Base64Json,
    log_file::LogFile,
    metadata::{CachedMetadata, MetadataFile},
    object_store::{FileSystemStore, ObjectStoreUpload},
    settings_file::SettingsFile,
};
use log::LevelFilter;

const LOG_CAPACITY: usize = 1000;
const DEFAULT_ZIP_OUTPUT: &str = "plots.zip";

#[derive(Parser, Debug)]
#[command(author, version, about = "Training volume charts from Strong workout logs", long_about = None)]
struct Cli {
    /// Semicolon-delimited workout log
    #[arg(value_hint = ValueHint::FilePath)]
    upload: PathBuf,

    /// Exercise metadata table
    #[arg(long, value_hint = ValueHint::FilePath)]
    metadata: Option<PathBuf>,

    /// Settings file (JSON)
    #[arg(long, default_value = "gainz.json", value_hint = ValueHint::FilePath)]
    config: PathBuf,

    /// Format of the Date column
    #[arg(long)]
    date_format: Option<String>,

    /// Chart theme (light|dark)
    #[arg(long)]
    theme: Option<Theme>,

    #[arg(long, value_enum, default_value_t = SinkKind::Zip)]
    sink: SinkKind,

    /// Output file (`plots.zip` for zip, stdout for json)
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    output: Option<PathBuf>,

    /// Root directory of the object store
    #[arg(long, default_value = "store", value_hint = ValueHint::DirPath)]
    store_root: PathBuf,

    /// Log debug messages
    #[arg(short, long)]
    verbose: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum SinkKind {
    /// Zip archive of all charts
    Zip,
    /// JSON array with base64 encoded charts
    Json,
    /// Upload to the object store
    Store,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let settings = SettingsFile::new(&cli.config)
        .read_settings()
        .with_context(|| format!("failed to read settings from {}", cli.config.display()))?;
    let settings = apply_overrides(&cli, settings);

    init_logging(&settings, cli.verbose)?;

    let content = fs::read(&cli.upload)
        .with_context(|| format!("failed to read {}", cli.upload.display()))?;
    let upload = Upload::new(&file_name(&cli.upload), content);

    let service = RequestService::new(
        Service::new(CachedMetadata::new(MetadataFile::new(&settings.metadata_path)))
            .with_date_format(&settings.date_format),
        SvgRenderer::new(settings.chart_options()),
        sink(cli.sink, &cli.store_root),
        settings.max_upload_size,
    );

    let delivery = service.handle(Some(&upload)).map_err(|err| {
        let context = if err.is_client_error() {
            format!("invalid upload {}", cli.upload.display())
        } else {
            format!("failed to process {}", cli.upload.display())
        };
        anyhow::Error::new(err).context(context)
    })?;

    write_delivery(delivery, cli.output.as_deref(), &mut io::stdout().lock())
}

fn apply_overrides(cli: &Cli, mut settings: Settings) -> Settings {
    if let Some(metadata) = &cli.metadata {
        settings.metadata_path.clone_from(metadata);
    }
    if let Some(date_format) = &cli.date_format {
        settings.date_format.clone_from(date_format);
    }
    if let Some(theme) = cli.theme {
        settings.theme = theme;
    }
    settings
}

fn init_logging(settings: &Settings, verbose: bool) -> Result<()> {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let repository: Arc<Mutex<dyn app_log::Repository>> = match &settings.log_path {
        Some(path) => Arc::new(Mutex::new(LogFile::new(path, LOG_CAPACITY))),
        None => Arc::new(Mutex::new(app_log::Memory::new(LOG_CAPACITY))),
    };
    app_log::init(repository, level)
        .map_err(|err| anyhow::anyhow!("failed to initialize logging: {err}"))
}

fn sink(kind: SinkKind, store_root: &Path) -> Box<dyn ArtifactSink> {
    match kind {
        SinkKind::Zip => Box::new(LocalZip),
        SinkKind::Json => Box::new(Base64Json),
        SinkKind::Store => Box::new(ObjectStoreUpload::new(FileSystemStore::new(store_root))),
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn write_delivery(delivery: Delivery, output: Option<&Path>, stdout: &mut impl Write) -> Result<()> {
    match delivery {
        Delivery::Zip(bytes) => {
            let path = output.unwrap_or(Path::new(DEFAULT_ZIP_OUTPUT));
            fs::write(path, bytes)
                .with_context(|| format!("failed to write {}", path.display()))?;
            log::info!("wrote {}", path.display());
        }
        Delivery::Json(json) => match output {
            Some(path) => fs::write(path, json)
                .with_context(|| format!("failed to write {}", path.display()))?,
            None => writeln!(stdout, "{json}")?,
        },
        Delivery::Uploaded { keys } => {
            for key in keys {
                writeln!(stdout, "{key}")?;
            }
        }
    }
    Ok(())
}
