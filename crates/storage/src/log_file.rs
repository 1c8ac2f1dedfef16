use std::{
    collections::VecDeque,
    fs::{File, OpenOptions},
    io::{BufRead, BufReader, ErrorKind, Write},
    path::PathBuf,
    sync::Mutex,
};

use gainz_app::log;

/// Appends log entries as JSON lines.
pub struct LogFile {
    path: PathBuf,
    capacity: usize,
    lock: Mutex<()>,
}

impl LogFile {
    /// `capacity` bounds the number of entries returned by `read_entries`.
    pub fn new(path: impl Into<PathBuf>, capacity: usize) -> Self {
        Self {
            path: path.into(),
            capacity,
            lock: Mutex::new(()),
        }
    }
}

impl log::Repository for LogFile {
    fn read_entries(&self) -> Result<VecDeque<log::Entry>, log::Error> {
        let _guard = self
            .lock
            .lock()
            .map_err(|err| log::Error::Unknown(err.to_string()))?;

        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(VecDeque::new()),
            Err(err) => return Err(log::Error::Unknown(err.to_string())),
        };

        let mut entries = VecDeque::new();
        for line in BufReader::new(file).lines() {
            let line = line.map_err(|err| log::Error::Unknown(err.to_string()))?;
            if line.trim().is_empty() {
                continue;
            }
            let entry = serde_json::from_str(&line)
                .map_err(|err| log::Error::Unknown(err.to_string()))?;
            entries.push_front(entry);
            entries.truncate(self.capacity);
        }

        Ok(entries)
    }

    fn write_entry(&self, entry: log::Entry) -> Result<(), log::Error> {
        let _guard = self
            .lock
            .lock()
            .map_err(|err| log::Error::Unknown(err.to_string()))?;

        let line =
            serde_json::to_string(&entry).map_err(|err| log::Error::Unknown(err.to_string()))?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|err| log::Error::Unknown(err.to_string()))?;
        writeln!(file, "{line}").map_err(|err| log::Error::Unknown(err.to_string()))
    }
}
