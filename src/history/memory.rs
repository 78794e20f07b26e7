use std::{collections::HashSet, sync::Mutex};

use super::Ledger;

/// In-process ledger. Nothing survives the process.
#[derive(Default)]
pub struct MemoryLedger {
    seen: Mutex<HashSet<String>>,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            seen: Mutex::new(ids.into_iter().map(Into::into).collect()),
        }
    }

    pub fn len(&self) -> usize {
        self.seen.lock().map(|s| s.len()).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Ledger for MemoryLedger {
    fn is_processed(&self, id: &str) -> bool {
        self.seen.lock().map(|s| s.contains(id)).unwrap_or(false)
    }

    fn mark_processed(&self, id: &str) {
        if let Ok(mut seen) = self.seen.lock() {
            seen.insert(id.to_string());
        }
    }
}
