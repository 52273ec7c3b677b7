//! Logging utilities
//!
//! A size-based rolling file writer for tracing's JSON file output.
//! Rotation renames the active file to `<name>.1`, shifting older backups
//! up by one and dropping the oldest once `max_backups` is reached.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Default maximum log file size before rotation (10MB)
pub const DEFAULT_MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Default number of rotated backups to keep
pub const DEFAULT_MAX_BACKUPS: usize = 5;

/// Size-based rolling log file writer
#[derive(Debug, Clone)]
pub struct RollingFileWriter {
    shared: Arc<Mutex<WriterState>>,
}

#[derive(Debug)]
struct WriterState {
    base_path: PathBuf,
    file: File,
    written: u64,
    max_size: u64,
    max_backups: usize,
}

impl RollingFileWriter {
    pub fn new(path: impl AsRef<Path>, max_size: u64, max_backups: usize) -> io::Result<Self> {
        let base_path = path.as_ref().to_path_buf();

        if let Some(parent) = base_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let written = fs::metadata(&base_path).map(|m| m.len()).unwrap_or(0);
        let file = open_append(&base_path)?;

        Ok(Self {
            shared: Arc::new(Mutex::new(WriterState {
                base_path,
                file,
                written,
                max_size,
                max_backups,
            })),
        })
    }

    /// Writer with the default size and backup limits.
    pub fn with_defaults(path: impl AsRef<Path>) -> io::Result<Self> {
        Self::new(path, DEFAULT_MAX_FILE_SIZE, DEFAULT_MAX_BACKUPS)
    }
}

fn open_append(path: &Path) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}

impl WriterState {
    fn backup_path(&self, index: usize) -> PathBuf {
        let mut path = self.base_path.as_os_str().to_os_string();
        path.push(format!(".{}", index));
        PathBuf::from(path)
    }

    fn rotate(&mut self) -> io::Result<()> {
        // Drop the oldest backup, then shift the rest up by one
        let oldest = self.backup_path(self.max_backups);
        if oldest.exists() {
            fs::remove_file(&oldest).ok();
        }
        for index in (1..self.max_backups).rev() {
            let from = self.backup_path(index);
            if from.exists() {
                fs::rename(&from, self.backup_path(index + 1)).ok();
            }
        }

        if self.base_path.exists() {
            fs::rename(&self.base_path, self.backup_path(1))?;
        }

        self.file = open_append(&self.base_path)?;
        self.written = 0;

        Ok(())
    }
}

impl Write for RollingFileWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut state = self.shared.lock().map_err(|_| {
            io::Error::new(io::ErrorKind::Other, "log writer lock poisoned")
        })?;

        if state.written + buf.len() as u64 > state.max_size {
            state.rotate()?;
        }

        let written = state.file.write(buf)?;
        state.written += written as u64;
        Ok(written)
    }

    fn flush(&mut self) -> io::Result<()> {
        let mut state = self.shared.lock().map_err(|_| {
            io::Error::new(io::ErrorKind::Other, "log writer lock poisoned")
        })?;
        state.file.flush()
    }
}

/// Make the writer usable with tracing-subscriber
impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for RollingFileWriter {
    type Writer = RollingFileWriter;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}
