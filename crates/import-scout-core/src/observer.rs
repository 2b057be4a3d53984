//! Progress hooks for a running scan.
//!
//! Observers see the traversal but never influence the [`ScanResult`].

use tracing::{debug, info, trace};

use crate::ScanResult;

/// Receives progress notifications from [`crate::GraphScanner`].
///
/// Every method defaults to a no-op.
pub trait ScanObserver {
    /// The traversal is about to start.
    fn on_start(&mut self, _start_file: &str, _pattern: &str, _max_depth: usize) {}

    /// `file` was popped from the frontier and marked visited.
    fn on_visit(&mut self, _file: &str, _depth: usize) {}

    /// `file` was visited but has no entry in the file set.
    fn on_dangling(&mut self, _file: &str) {}

    /// `file` was pushed to the frontier, which now holds `queue_len` entries.
    fn on_enqueue(&mut self, _file: &str, _depth: usize, _queue_len: usize) {}

    /// An import specifier of `from` did not resolve to any file.
    fn on_unresolved(&mut self, _from: &str, _spec: &str) {}

    /// The scan produced `result`.
    fn on_finish(&mut self, _result: &ScanResult) {}
}

/// Observer that ignores every notification.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl ScanObserver for NoopObserver {}

/// Observer that forwards notifications to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl ScanObserver for TracingObserver {
    fn on_start(&mut self, start_file: &str, pattern: &str, max_depth: usize) {
        info!(start_file, pattern, max_depth, "Starting import scan");
    }

    fn on_visit(&mut self, file: &str, depth: usize) {
        debug!(file, depth, "Scanning file");
    }

    fn on_dangling(&mut self, file: &str) {
        debug!(file, "File not present in snapshot, skipping");
    }

    fn on_enqueue(&mut self, file: &str, depth: usize, queue_len: usize) {
        trace!(file, depth, queue_len, "Queued import");
    }

    fn on_unresolved(&mut self, from: &str, spec: &str) {
        debug!(from, spec, "Import did not resolve");
    }

    fn on_finish(&mut self, result: &ScanResult) {
        match (&result.filename, &result.error) {
            (_, Some(error)) => info!(%error, "Import scan rejected"),
            (Some(filename), None) => info!(
                %filename,
                hops = result.hops().unwrap_or_default(),
                scanned = result.scanned_files.len(),
                "Pattern found"
            ),
            (None, None) => info!(
                scanned = result.scanned_files.len(),
                "Pattern not found in reachable files"
            ),
        }
    }
}
