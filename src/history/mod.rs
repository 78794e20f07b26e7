// src/history/mod.rs

pub mod memory;
pub mod processed;

pub use memory::MemoryLedger;
pub use processed::FileLedger;

/// Append-only record of user principal names that already have an account.
///
/// An id once marked stays marked. No locking is provided: only one run may
/// use a given ledger at a time.
pub trait Ledger: Send + Sync {
    /// Whether `id` has been marked. A ledger that does not exist yet holds nothing.
    fn is_processed(&self, id: &str) -> bool;

    /// Record `id`. Best-effort: a failed write is logged and dropped.
    fn mark_processed(&self, id: &str);
}
