//! Diagnostics collaborator for the sizing engine.
//!
//! The engine never prints. Every warning and every fatal error goes through
//! a [`Diagnostics`] implementation handed to [`SizeEngine::new`]:
//!
//! - [`TracingDiagnostics`] forwards to `tracing` (what the binary uses).
//! - [`RecordingDiagnostics`] keeps everything in memory for assertions.
//!
//! A fatal error is reported through [`Diagnostics::error`] *and* returned as
//! `Err`, so callers that ignore the collaborator still see the failure.
//!
//! [`SizeEngine::new`]: crate::sizing::SizeEngine::new

use crate::sizing::{SizeError, Warning};
use std::sync::Mutex;

/// Receives engine diagnostics. Must be thread-safe: one engine may serve
/// many threads.
pub trait Diagnostics: Send + Sync {
    /// A non-fatal problem; the calculation continues.
    fn warn(&self, warning: &Warning);

    /// A fatal problem; the calculation that raised it is aborted.
    fn error(&self, error: &SizeError);
}

/// Forwards diagnostics to the `tracing` subscriber.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn warn(&self, warning: &Warning) {
        tracing::warn!(target: "respsize", "{warning}");
    }

    fn error(&self, error: &SizeError) {
        tracing::error!(target: "respsize", "{error}");
    }
}

/// A single recorded diagnostic.
#[derive(Debug, Clone, PartialEq)]
pub enum Recorded {
    Warn(Warning),
    Error(SizeError),
}

/// Records diagnostics instead of emitting them.
///
/// Uses `Mutex` (not `RefCell`) so it is `Sync` and can back a shared engine.
#[derive(Debug, Default)]
pub struct RecordingDiagnostics {
    entries: Mutex<Vec<Recorded>>,
}

impl RecordingDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every diagnostic so far, in emission order.
    pub fn entries(&self) -> Vec<Recorded> {
        self.lock().clone()
    }

    pub fn warnings(&self) -> Vec<Warning> {
        self.lock()
            .iter()
            .filter_map(|r| match r {
                Recorded::Warn(w) => Some(w.clone()),
                Recorded::Error(_) => None,
            })
            .collect()
    }

    pub fn errors(&self) -> Vec<SizeError> {
        self.lock()
            .iter()
            .filter_map(|r| match r {
                Recorded::Error(e) => Some(e.clone()),
                Recorded::Warn(_) => None,
            })
            .collect()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    // A poisoned lock only means another thread panicked mid-push; the
    // entries themselves are still usable.
    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Recorded>> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Diagnostics for RecordingDiagnostics {
    fn warn(&self, warning: &Warning) {
        self.lock().push(Recorded::Warn(warning.clone()));
    }

    fn error(&self, error: &SizeError) {
        self.lock().push(Recorded::Error(error.clone()));
    }
}
