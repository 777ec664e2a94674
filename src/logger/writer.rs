//! Log file writer with size-based rollover.

use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tracing_subscriber::fmt::MakeWriter;

use crate::logger::config::FileConfig;
use crate::logger::error::LoggerError;

/// Shared handle to the active log file. When `max_size_bytes` is reached the
/// file is renamed to `<path>.1`, replacing any previous one, and a fresh file
/// is opened.
#[derive(Clone)]
pub struct LogFileWriter {
    state: Arc<Mutex<WriterState>>,
    path: PathBuf,
    max_size_bytes: u64,
}

struct WriterState {
    file: BufWriter<File>,
    current_size: u64,
}

impl LogFileWriter {
    pub fn new(config: &FileConfig) -> Result<Self, LoggerError> {
        if let Some(parent) = config.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let file = open_log_file(&config.path, config.append)?;
        let current_size = if config.append {
            std::fs::metadata(&config.path).map(|m| m.len()).unwrap_or(0)
        } else {
            0
        };

        Ok(Self {
            state: Arc::new(Mutex::new(WriterState { file, current_size })),
            path: config.path.clone(),
            max_size_bytes: config.max_size_bytes,
        })
    }

    fn rolled_path(&self) -> PathBuf {
        let mut name = self.path.clone().into_os_string();
        name.push(".1");
        PathBuf::from(name)
    }
}

impl<'a> MakeWriter<'a> for LogFileWriter {
    type Writer = LogFileGuard;

    fn make_writer(&'a self) -> Self::Writer {
        LogFileGuard {
            writer: self.clone(),
        }
    }
}

/// Per-event handle; flushed on drop.
pub struct LogFileGuard {
    writer: LogFileWriter,
}

impl Write for LogFileGuard {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let writer = &self.writer;
        let mut state = writer
            .state
            .lock()
            .map_err(|_| io::Error::other("Failed to acquire writer lock"))?;

        if writer.max_size_bytes > 0 && state.current_size >= writer.max_size_bytes {
            state.file.flush()?;
            std::fs::rename(&writer.path, writer.rolled_path())?;
            state.file = open_log_file(&writer.path, false)?;
            state.current_size = 0;
        }

        let written = state.file.write(buf)?;
        state.current_size += written as u64;
        Ok(written)
    }

    fn flush(&mut self) -> io::Result<()> {
        let mut state = self
            .writer
            .state
            .lock()
            .map_err(|_| io::Error::other("Failed to acquire writer lock"))?;
        state.file.flush()
    }
}

impl Drop for LogFileGuard {
    fn drop(&mut self) {
        if let Ok(mut state) = self.writer.state.lock() {
            let _ = state.file.flush();
        }
    }
}

fn open_log_file(path: &Path, append: bool) -> io::Result<BufWriter<File>> {
    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .append(append)
        .truncate(!append)
        .open(path)?;

    Ok(BufWriter::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logger::config::LogFormat;
    use tempfile::TempDir;

    fn file_config(dir: &TempDir, append: bool, max_size_bytes: u64) -> FileConfig {
        FileConfig {
            enabled: true,
            path: dir.path().join("nested").join("app.log"),
            append,
            format: LogFormat::Full,
            max_size_bytes,
        }
    }

    #[test]
    fn test_creates_parent_dirs_and_appends() {
        let dir = TempDir::new().unwrap();
        let config = file_config(&dir, true, 0);

        let writer = LogFileWriter::new(&config).unwrap();
        writer.make_writer().write_all(b"first\n").unwrap();
        drop(writer);

        let writer = LogFileWriter::new(&config).unwrap();
        writer.make_writer().write_all(b"second\n").unwrap();

        let content = std::fs::read_to_string(&config.path).unwrap();
        assert_eq!(content, "first\nsecond\n");
    }

    #[test]
    fn test_truncates_when_not_appending() {
        let dir = TempDir::new().unwrap();
        let config = file_config(&dir, false, 0);
        std::fs::create_dir_all(config.path.parent().unwrap()).unwrap();
        std::fs::write(&config.path, "stale\n").unwrap();

        let writer = LogFileWriter::new(&config).unwrap();
        writer.make_writer().write_all(b"fresh\n").unwrap();

        assert_eq!(std::fs::read_to_string(&config.path).unwrap(), "fresh\n");
    }

    #[test]
    fn test_rolls_over_at_max_size() {
        let dir = TempDir::new().unwrap();
        let config = file_config(&dir, true, 8);

        let writer = LogFileWriter::new(&config).unwrap();
        writer.make_writer().write_all(b"0123456789\n").unwrap();
        writer.make_writer().write_all(b"next\n").unwrap();

        let rolled = std::fs::read_to_string(writer.rolled_path()).unwrap();
        assert_eq!(rolled, "0123456789\n");
        assert_eq!(std::fs::read_to_string(&config.path).unwrap(), "next\n");
    }
}
