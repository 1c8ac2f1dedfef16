use std::{fs, io::ErrorKind, path::PathBuf};

use gainz_app::{Settings, SettingsError, SettingsRepository};

/// Settings stored as JSON.
pub struct SettingsFile {
    path: PathBuf,
}

impl SettingsFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SettingsRepository for SettingsFile {
    fn read_settings(&self) -> Result<Settings, SettingsError> {
        match fs::read_to_string(&self.path) {
            Ok(content) => {
                serde_json::from_str(&content).map_err(|err| SettingsError::Invalid(err.to_string()))
            }
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(Settings::default()),
            Err(err) => Err(err.into()),
        }
    }

    fn write_settings(&self, settings: &Settings) -> Result<(), SettingsError> {
        let content = serde_json::to_string_pretty(settings)
            .map_err(|err| SettingsError::Invalid(err.to_string()))?;
        fs::write(&self.path, content)?;
        Ok(())
    }
}
