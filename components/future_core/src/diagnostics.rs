//! Unobserved-rejection diagnostics.
//!
//! A future that rejects with no reaction ever registered is reported to a
//! process-wide sink, one dispatcher hop after the rejection. This is
//! report-only: never an error, never fatal.

use core_types::Value;
use parking_lot::RwLock;
use std::sync::Arc;

/// Receives the reason of every rejection that nothing observed.
pub trait RejectionSink: Send + Sync {
    /// Called once per unobserved rejection.
    fn unobserved_rejection(&self, reason: &Value);
}

static SINK: RwLock<Option<Arc<dyn RejectionSink>>> = RwLock::new(None);

/// Installs a process-wide sink, replacing any previous one.
pub fn set_rejection_sink(sink: Arc<dyn RejectionSink>) {
    *SINK.write() = Some(sink);
}

/// Removes the installed sink, restoring the default `tracing` report.
pub fn clear_rejection_sink() {
    *SINK.write() = None;
}

pub(crate) fn report_unobserved(reason: &Value) {
    let sink = SINK.read().clone();
    match sink {
        Some(sink) => sink.unobserved_rejection(reason),
        None => {
            tracing::warn!(reason = %reason, "future rejected with no registered reaction");
        }
    }
}
