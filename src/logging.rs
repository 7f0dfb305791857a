use anyhow::{Context, Result};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;
use tracing_subscriber::fmt::MakeWriter;

/// Writes every formatted log line to the log file and, unless suppressed,
/// to stdout.
#[derive(Clone)]
pub(crate) struct TeeMakeWriter {
    pub file: Arc<Mutex<File>>,
    pub suppress_stdout: bool,
}

impl TeeMakeWriter {
    pub fn open(path: &Path, suppress_stdout: bool) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("cannot open log file {}", path.display()))?;
        Ok(Self {
            file: Arc::new(Mutex::new(file)),
            suppress_stdout,
        })
    }
}

impl<'a> MakeWriter<'a> for TeeMakeWriter {
    type Writer = TeeWriter;

    fn make_writer(&'a self) -> Self::Writer {
        TeeWriter {
            file: self.file.clone(),
            suppress_stdout: self.suppress_stdout,
        }
    }
}

pub(crate) struct TeeWriter {
    file: Arc<Mutex<File>>,
    suppress_stdout: bool,
}

impl std::io::Write for TeeWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        {
            let mut file = self.file.lock().unwrap_or_else(|e| e.into_inner());
            file.write_all(buf)?;
        }
        if !self.suppress_stdout {
            std::io::stdout().write_all(buf)?;
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.file.lock().unwrap_or_else(|e| e.into_inner()).flush()?;
        if !self.suppress_stdout {
            std::io::stdout().flush()?;
        }
        Ok(())
    }
}

/// Installs the global subscriber: timestamp, level, file:line, message.
pub(crate) fn init(log_file: &Path, verbose: bool) -> Result<()> {
    let make_writer = TeeMakeWriter::open(log_file, false)?;
    let subscriber = FmtSubscriber::builder()
        .with_max_level(if verbose { Level::DEBUG } else { Level::INFO })
        .with_file(true)
        .with_line_number(true)
        .with_target(false)
        .with_ansi(false)
        .with_writer(make_writer)
        .finish();
    tracing::subscriber::set_global_default(subscriber).ok();
    Ok(())
}
