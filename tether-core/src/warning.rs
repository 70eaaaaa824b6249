//! Warning tracking for per-tick diagnostics.
//!
//! Recoverable anomalies inside the tick pipeline (a skipped timestep, a
//! full contact buffer, a dangling body index) degrade the simulation
//! instead of failing it. Each occurrence is counted per warning kind and
//! logged through `tracing` on first occurrence only, so a misconfigured
//! embedding does not flood the log at frame rate.

/// Recoverable anomaly kinds recorded during a tick.
/// `repr(u8)` for compact storage; cast to `usize` for array indexing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Warning {
    /// Non-positive delta time; the tick was skipped.
    BadTimestep = 0,
    /// Contact buffer full; remaining contact generators were skipped.
    ContactFull = 1,
    /// A registry entry or contact referenced a body index that names
    /// nothing; the entry was skipped.
    MissingBody = 2,
}

/// Number of warning kinds.
pub const NUM_WARNINGS: usize = 3;

/// Per-warning statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WarningStat {
    /// Context of the most recent occurrence (an index or count, see the
    /// recording site).
    pub last_info: i64,
    /// Cumulative count since the last reset.
    pub count: u32,
}

/// Format a warning message for display.
fn warning_text(warning: Warning, info: i64) -> String {
    match warning {
        Warning::BadTimestep => "Warning: non-positive delta time, tick skipped.".to_string(),
        Warning::ContactFull => format!("Warning: contact buffer full (ncontacts={info})."),
        Warning::MissingBody => format!("Warning: missing body at index {info}."),
    }
}

/// Accumulated warning statistics for one world.
#[derive(Debug, Clone, Default)]
pub struct WarningLog {
    stats: [WarningStat; NUM_WARNINGS],
}

impl WarningLog {
    /// Create an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a warning, logging it on the first occurrence only.
    pub fn record(&mut self, warning: Warning, info: i64) {
        let stat = &mut self.stats[warning as usize];
        if stat.count == 0 {
            tracing::warn!("{}", warning_text(warning, info));
        }
        stat.last_info = info;
        stat.count += 1;
    }

    /// Cumulative count for one warning kind since the last reset.
    #[must_use]
    pub fn count(&self, warning: Warning) -> u32 {
        self.stats[warning as usize].count
    }

    /// Context recorded with the most recent occurrence of a warning kind.
    #[must_use]
    pub fn last_info(&self, warning: Warning) -> i64 {
        self.stats[warning as usize].last_info
    }

    /// Reset all statistics; the next occurrence of each kind logs again.
    pub fn reset(&mut self) {
        self.stats = [WarningStat::default(); NUM_WARNINGS];
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_accumulate() {
        let mut log = WarningLog::new();
        assert_eq!(log.count(Warning::ContactFull), 0);

        log.record(Warning::ContactFull, 8);
        log.record(Warning::ContactFull, 16);

        assert_eq!(log.count(Warning::ContactFull), 2);
        assert_eq!(log.last_info(Warning::ContactFull), 16);
        assert_eq!(log.count(Warning::BadTimestep), 0);
    }

    #[test]
    fn test_reset_clears_stats() {
        let mut log = WarningLog::new();
        log.record(Warning::MissingBody, 3);
        log.reset();

        assert_eq!(log.count(Warning::MissingBody), 0);
        assert_eq!(log.last_info(Warning::MissingBody), 0);
    }
}
