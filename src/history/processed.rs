use anyhow::{Context, Result};
use std::{
    fs::{self, OpenOptions},
    io::{ErrorKind, Write},
    path::{Path, PathBuf},
};
use tracing::{error, warn};

use super::Ledger;

/// Ledger backed by a plain-text file, one user principal name per line.
pub struct FileLedger {
    path: PathBuf,
}

impl FileLedger {
    /// The file is created lazily on the first successful mark.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every recorded id verbatim. A missing file yields an empty list.
    pub fn load(&self) -> Result<Vec<String>> {
        match fs::read_to_string(&self.path) {
            Ok(text) => Ok(text
                .lines()
                .filter(|l| !l.is_empty())
                .map(str::to_string)
                .collect()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e).with_context(|| format!("reading ledger {}", self.path.display())),
        }
    }

    /// Append `id` as a new line, creating the file if needed.
    pub fn append(&self, id: &str) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating ledger directory {}", parent.display()))?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("opening ledger {}", self.path.display()))?;
        writeln!(file, "{}", id)
            .with_context(|| format!("appending to ledger {}", self.path.display()))?;
        Ok(())
    }
}

impl Ledger for FileLedger {
    fn is_processed(&self, id: &str) -> bool {
        match self.load() {
            Ok(ids) => ids.iter().any(|line| line == id),
            Err(e) => {
                warn!(error = %e, "ledger unreadable; treating as empty");
                false
            }
        }
    }

    fn mark_processed(&self, id: &str) {
        if let Err(e) = self.append(id) {
            error!(id, error = %e, "failed to record processed id");
        }
    }
}
