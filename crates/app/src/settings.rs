use std::path::PathBuf;

use gainz_domain::DEFAULT_DATE_FORMAT;

use crate::chart::ChartOptions;

pub const MAX_UPLOAD_SIZE: usize = 10 * 1024 * 1024;

pub trait SettingsRepository {
    fn read_settings(&self) -> Result<Settings, SettingsError>;
    fn write_settings(&self, settings: &Settings) -> Result<(), SettingsError>;
}

#[derive(thiserror::Error, Debug)]
pub enum SettingsError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("invalid settings: {0}")]
    Invalid(String),
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub date_format: String,
    pub max_upload_size: usize,
    pub metadata_path: PathBuf,
    pub theme: Theme,
    pub chart_width: u32,
    pub chart_height: u32,
    pub log_path: Option<PathBuf>,
}

impl Settings {
    #[must_use]
    pub fn chart_options(&self) -> ChartOptions {
        ChartOptions {
            width: self.chart_width,
            height: self.chart_height,
            theme: self.theme,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            max_upload_size: MAX_UPLOAD_SIZE,
            metadata_path: PathBuf::from("exercises.csv"),
            theme: Theme::Light,
            chart_width: 640,
            chart_height: 480,
            log_path: None,
        }
    }
}

#[derive(
    serde::Serialize,
    serde::Deserialize,
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}
