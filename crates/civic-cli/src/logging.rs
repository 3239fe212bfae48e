// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! Log setup for the binary. The terminal belongs to the UI, so events go to
//! a file; `RUST_LOG` replaces the configured filter when set.

use anyhow::{Context, Result};
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tracing::Level;
use tracing_subscriber::{
    EnvFilter,
    fmt::{self, MakeWriter},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

const CIVIC_TARGETS: [&str; 5] = ["civic_cli", "civic_app", "civic_db", "civic_table", "civic_tui"];

#[derive(Debug, Clone)]
pub struct LogConfig {
    pub level: Level,
    /// stderr when `None`.
    pub log_file: Option<PathBuf>,
}

pub fn init_logging(config: &LogConfig) -> Result<()> {
    let filter = build_env_filter(config.level);
    match &config.log_file {
        Some(path) => {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("create log directory {}", parent.display()))?;
            }
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("open log file {}", path.display()))?;
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .with_writer(SharedFileWriter::new(file))
                        .with_ansi(false)
                        .with_target(true),
                )
                .try_init()
                .context("install log subscriber")?;
        }
        None => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().with_writer(io::stderr).with_target(false))
                .try_init()
                .context("install log subscriber")?;
        }
    }
    Ok(())
}

fn build_env_filter(level: Level) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives(level)))
}

/// Other crates stay at `warn`; ours follow the configured level.
fn default_directives(level: Level) -> String {
    let level = level.as_str().to_ascii_lowercase();
    let mut directives = String::from("warn");
    for target in CIVIC_TARGETS {
        directives.push_str(&format!(",{target}={level}"));
    }
    directives
}

#[derive(Clone)]
struct SharedFileWriter {
    file: Arc<Mutex<File>>,
}

impl SharedFileWriter {
    fn new(file: File) -> Self {
        Self {
            file: Arc::new(Mutex::new(file)),
        }
    }
}

struct SharedFileGuard {
    file: Arc<Mutex<File>>,
}

impl Write for SharedFileGuard {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut guard = self
            .file
            .lock()
            .map_err(|_| io::Error::other("log file lock poisoned"))?;
        guard.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        let mut guard = self
            .file
            .lock()
            .map_err(|_| io::Error::other("log file lock poisoned"))?;
        guard.flush()
    }
}

impl<'a> MakeWriter<'a> for SharedFileWriter {
    type Writer = SharedFileGuard;

    fn make_writer(&'a self) -> Self::Writer {
        SharedFileGuard {
            file: Arc::clone(&self.file),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{SharedFileWriter, default_directives};
    use anyhow::Result;
    use std::io::Write;
    use tracing::Level;
    use tracing_subscriber::fmt::MakeWriter;

    #[test]
    fn directives_scope_level_to_civic_crates() {
        let directives = default_directives(Level::DEBUG);
        assert!(directives.starts_with("warn,"));
        assert!(directives.contains("civic_tui=debug"));
        assert!(directives.contains("civic_db=debug"));
        assert!(!directives.contains("DEBUG"));
    }

    #[test]
    fn shared_writer_appends_from_every_guard() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let path = temp.path().join("civic.log");
        let writer = SharedFileWriter::new(std::fs::File::create(&path)?);

        writer.make_writer().write_all(b"first\n")?;
        let mut second = writer.make_writer();
        second.write_all(b"second\n")?;
        second.flush()?;

        assert_eq!(std::fs::read_to_string(&path)?, "first\nsecond\n");
        Ok(())
    }
}
