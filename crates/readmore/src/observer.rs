//! Injected trace hooks for the scanner.
//!
//! The scanner never logs on its own. A [`ScanObserver`] sees every scanned
//! byte and every line verdict; [`Quiet`] ignores them and [`TracingObserver`]
//! forwards them to `tracing` at `TRACE` level.

use crate::scanner::{LexMode, ScanState, Verdict};

/// Receives scanner events. All hooks default to doing nothing.
pub trait ScanObserver {
    /// Called after `byte`, at `offset` in the buffer, moved the scan out of
    /// `before`.
    fn byte_scanned(&mut self, offset: usize, byte: u8, before: LexMode, state: &ScanState) {
        let _ = (offset, byte, before, state);
    }

    /// Called once per line after its verdict is known.
    fn line_finished(&mut self, verdict: Verdict, state: &ScanState) {
        let _ = (verdict, state);
    }
}

/// An observer that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct Quiet;

impl ScanObserver for Quiet {}

/// An observer that emits `tracing` events under the `readmore::scan` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl ScanObserver for TracingObserver {
    fn byte_scanned(&mut self, offset: usize, byte: u8, before: LexMode, state: &ScanState) {
        tracing::trace!(
            target: "readmore::scan",
            offset,
            byte = %byte.escape_ascii(),
            from = %before,
            to = %state.mode(),
            paren = state.paren_depth(),
            suppress = state.suppress_completion(),
            "scanned byte"
        );
        if state.first_token() == Some(offset) {
            tracing::trace!(target: "readmore::scan", offset, "first token");
        }
    }

    fn line_finished(&mut self, verdict: Verdict, state: &ScanState) {
        tracing::trace!(
            target: "readmore::scan",
            ?verdict,
            mode = %state.mode(),
            in_comment = state.mode().is_comment(),
            paren = state.paren_depth(),
            suppress = state.suppress_completion(),
            len = state.buffer().len(),
            "line finished"
        );
    }
}

impl<O> ScanObserver for &mut O
where
    O: ScanObserver + ?Sized,
{
    fn byte_scanned(&mut self, offset: usize, byte: u8, before: LexMode, state: &ScanState) {
        (**self).byte_scanned(offset, byte, before, state);
    }

    fn line_finished(&mut self, verdict: Verdict, state: &ScanState) {
        (**self).line_finished(verdict, state);
    }
}
