//! Rotating file writer plugged into `tracing-subscriber`

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use tracing_subscriber::fmt::MakeWriter;

use super::config::FileConfig;
use super::rotation::RotationManager;

/// File writer that rotates once the active file exceeds its size limit.
///
/// When the file cannot be written the entry goes to stderr instead.
#[derive(Clone)]
pub struct RotatingFileWriter {
    state: Arc<Mutex<WriterState>>,
    path: PathBuf,
}

struct WriterState {
    file: BufWriter<File>,
    current_size: u64,
    rotation: RotationManager,
}

impl RotatingFileWriter {
    pub fn new(config: &FileConfig) -> io::Result<Self> {
        if let Some(parent) = config.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let file = open_log_file(&config.path, config.append)?;
        let current_size = if config.append {
            fs::metadata(&config.path).map(|m| m.len()).unwrap_or(0)
        } else {
            0
        };

        Ok(Self {
            state: Arc::new(Mutex::new(WriterState {
                file,
                current_size,
                rotation: RotationManager::new(config.rotation.clone()),
            })),
            path: config.path.clone(),
        })
    }

    fn lock(&self) -> io::Result<MutexGuard<'_, WriterState>> {
        self.state
            .lock()
            .map_err(|_| io::Error::other("log writer lock poisoned"))
    }

    fn write_entry(&self, buf: &[u8]) -> io::Result<usize> {
        let mut state = self.lock()?;

        if state.rotation.should_rotate(state.current_size) {
            state.file.flush()?;
            state
                .rotation
                .rotate(&self.path)
                .map_err(|e| io::Error::other(e.to_string()))?;
            state.file = open_log_file(&self.path, false)?;
            state.current_size = 0;
        }

        state.file.write_all(buf)?;
        state.file.flush()?;
        state.current_size += buf.len() as u64;
        Ok(buf.len())
    }
}

impl<'a> MakeWriter<'a> for RotatingFileWriter {
    type Writer = RotatingWriterGuard<'a>;

    fn make_writer(&'a self) -> Self::Writer {
        RotatingWriterGuard { writer: self }
    }
}

pub struct RotatingWriterGuard<'a> {
    writer: &'a RotatingFileWriter,
}

impl Write for RotatingWriterGuard<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self.writer.write_entry(buf) {
            Ok(n) => Ok(n),
            Err(e) => {
                eprintln!("log file write failed ({e}), falling back to stderr");
                io::stderr().write(buf)
            }
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.lock()?.file.flush()
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
