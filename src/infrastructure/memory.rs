use std::sync::{PoisonError, RwLock};

use crate::domain::errors::DomainError;

// ── Error conversions (infrastructure concern only) ──────────────────────────

impl<G> From<PoisonError<G>> for DomainError {
    fn from(e: PoisonError<G>) -> Self {
        DomainError::Internal(e.to_string())
    }
}

// ── Table ─────────────────────────────────────────────────────────────────────

/// An insertion-ordered collection guarded by a single lock.
#[derive(Debug)]
pub struct MemoryTable<T> {
    rows: RwLock<Vec<T>>,
}

impl<T> MemoryTable<T> {
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(Vec::new()),
        }
    }

    pub fn with_rows(rows: Vec<T>) -> Self {
        Self {
            rows: RwLock::new(rows),
        }
    }

    pub fn read<R>(&self, f: impl FnOnce(&[T]) -> R) -> Result<R, DomainError> {
        let rows = self.rows.read()?;
        Ok(f(&rows))
    }

    /// Runs `f` under the write lock. Rows are not copied or rolled back:
    /// `f` checks everything it needs before it changes a row.
    pub fn write<R, F>(&self, f: F) -> Result<R, DomainError>
    where
        F: FnOnce(&mut Vec<T>) -> Result<R, DomainError>,
    {
        let mut rows = self.rows.write()?;
        f(&mut rows)
    }
}
