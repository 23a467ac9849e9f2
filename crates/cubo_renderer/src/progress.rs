//! Scanline progress reporting on stderr.

use std::io::Write;
use std::sync::atomic::{AtomicU32, Ordering};

/// Prints `Scanlines remaining: N` over itself on stderr.
///
/// Safe to share between render threads; each finished row counts down once.
pub(crate) struct ScanlineProgress {
    remaining: AtomicU32,
    enabled: bool,
}

impl ScanlineProgress {
    pub(crate) fn new(total: u32, enabled: bool) -> Self {
        Self {
            remaining: AtomicU32::new(total),
            enabled,
        }
    }

    /// Report the current count before a row is traced.
    pub(crate) fn report(&self) {
        self.print(self.remaining.load(Ordering::Relaxed));
    }

    /// Count a finished row.
    pub(crate) fn row_done(&self) {
        let left = self.remaining.fetch_sub(1, Ordering::Relaxed).saturating_sub(1);
        self.print(left);
    }

    /// Count a finished row without printing.
    pub(crate) fn row_done_quiet(&self) {
        self.remaining.fetch_sub(1, Ordering::Relaxed);
    }

    pub(crate) fn finish(&self) {
        if self.enabled {
            let mut stderr = std::io::stderr().lock();
            // Write errors on stderr are ignored
            let _ = write!(stderr, "\rDone.                 \n");
            let _ = stderr.flush();
        }
    }

    fn print(&self, remaining: u32) {
        if self.enabled {
            let mut stderr = std::io::stderr().lock();
            let _ = write!(stderr, "\rScanlines remaining: {} ", remaining);
            let _ = stderr.flush();
        }
    }

    #[cfg(test)]
    fn remaining(&self) -> u32 {
        self.remaining.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_down() {
        let progress = ScanlineProgress::new(3, false);
        progress.report();
        progress.row_done();
        progress.row_done_quiet();
        assert_eq!(progress.remaining(), 1);
        progress.row_done();
        assert_eq!(progress.remaining(), 0);
        progress.finish();
    }
}
