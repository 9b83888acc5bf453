use review_logging::review_debug;

/// Progress shown as soon as a run announces its total, so the bar is visibly started.
pub const INITIAL_PROGRESS: f64 = 0.01;

/// Absolute counter values streamed by the engine during a run.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CounterSnapshot {
    pub total: u64,
    pub checked: u64,
    pub errors: u64,
    pub warnings: u64,
    pub unknown: u64,
    pub progress: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RunCounters {
    pub total: u64,
    pub checked: u64,
    pub errors: u64,
    pub warnings: u64,
    pub unknown: u64,
    pub progress: f64,
}

impl RunCounters {
    pub fn started(total: u64) -> Self {
        Self {
            total,
            progress: INITIAL_PROGRESS,
            ..Self::default()
        }
    }

    /// Replaces every counter. Progress is clamped to `[0, 1]` and never
    /// moves backwards within a run.
    pub fn apply(&mut self, snapshot: CounterSnapshot) {
        self.total = snapshot.total;
        self.checked = snapshot.checked;
        self.errors = snapshot.errors;
        self.warnings = snapshot.warnings;
        self.unknown = snapshot.unknown;

        if !snapshot.progress.is_finite() {
            review_debug!("Ignoring non-finite progress {}", snapshot.progress);
            return;
        }
        let progress = snapshot.progress.clamp(0.0, 1.0);
        if progress < self.progress {
            review_debug!(
                "Ignoring progress regression {} -> {}",
                self.progress,
                progress
            );
            return;
        }
        self.progress = progress;
    }

    /// Bookmarks flagged with any issue.
    pub fn marked(&self) -> u64 {
        self.errors
            .saturating_add(self.warnings)
            .saturating_add(self.unknown)
    }

    pub fn progress_percent(&self) -> f64 {
        self.progress * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_replaces_counts() {
        let mut counters = RunCounters::started(10);
        counters.apply(CounterSnapshot {
            total: 10,
            checked: 4,
            errors: 1,
            warnings: 2,
            unknown: 0,
            progress: 0.4,
        });
        counters.apply(CounterSnapshot {
            total: 10,
            checked: 5,
            errors: 1,
            warnings: 1,
            unknown: 1,
            progress: 0.5,
        });
        assert_eq!(counters.checked, 5);
        assert_eq!(counters.warnings, 1);
        assert_eq!(counters.marked(), 3);
        assert_eq!(counters.progress, 0.5);
    }

    #[test]
    fn progress_is_clamped_and_monotonic() {
        let mut counters = RunCounters::started(3);
        assert_eq!(counters.progress, INITIAL_PROGRESS);

        counters.apply(CounterSnapshot {
            progress: 0.6,
            ..CounterSnapshot::default()
        });
        counters.apply(CounterSnapshot {
            progress: 0.2,
            ..CounterSnapshot::default()
        });
        assert_eq!(counters.progress, 0.6);

        counters.apply(CounterSnapshot {
            progress: 7.0,
            ..CounterSnapshot::default()
        });
        assert_eq!(counters.progress, 1.0);

        counters.apply(CounterSnapshot {
            progress: f64::NAN,
            ..CounterSnapshot::default()
        });
        assert_eq!(counters.progress, 1.0);
    }
}
