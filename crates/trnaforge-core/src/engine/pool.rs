use super::config::ConfigError;
use super::error::EngineError;
use super::progress::{Progress, ProgressReporter};
use rayon::prelude::*;
use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use tracing::{debug, warn};

/// Result of one unit of work.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnitOutcome {
    Completed,
    Skipped,
    Failed(String),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PoolTally {
    pub completed: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl PoolTally {
    pub fn from_outcomes(outcomes: &[UnitOutcome]) -> Self {
        outcomes.iter().fold(Self::default(), |mut tally, outcome| {
            match outcome {
                UnitOutcome::Completed => tally.completed += 1,
                UnitOutcome::Skipped => tally.skipped += 1,
                UnitOutcome::Failed(_) => tally.failed += 1,
            }
            tally
        })
    }

    pub fn total(&self) -> usize {
        self.completed + self.skipped + self.failed
    }
}

impl fmt::Display for PoolTally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} completed, {} skipped, {} failed ({} total)",
            self.completed,
            self.skipped,
            self.failed,
            self.total()
        )
    }
}

/// A bounded pool for independent, blocking units of work.
///
/// Units share no mutable state. Each unit produces exactly one
/// [`UnitOutcome`]; a unit that panics is reported as `Failed` and the rest
/// keep running. Outcomes are returned in input order.
pub struct WorkerPool {
    workers: usize,
    pool: rayon::ThreadPool,
}

impl WorkerPool {
    pub fn new(workers: usize) -> Result<Self, EngineError> {
        if workers == 0 {
            return Err(ConfigError::InvalidParameter {
                name: "workers",
                reason: "at least one worker is required".to_string(),
            }
            .into());
        }
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("trnaforge-worker-{}", i))
            .build()
            .map_err(|source| EngineError::WorkerPool { workers, source })?;
        debug!(workers, "Worker pool ready.");
        Ok(Self { workers, pool })
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    pub fn run<T, F>(&self, units: &[T], work: F, reporter: &ProgressReporter) -> Vec<UnitOutcome>
    where
        T: Sync,
        F: Fn(&T) -> UnitOutcome + Sync,
    {
        reporter.report(Progress::TaskStart {
            total: units.len() as u64,
        });

        let outcomes = self.pool.install(|| {
            units
                .par_iter()
                .map(|unit| {
                    let outcome = panic::catch_unwind(AssertUnwindSafe(|| work(unit)))
                        .unwrap_or_else(|payload| {
                            let reason = panic_message(payload.as_ref());
                            warn!(reason = %reason, "Unit of work panicked.");
                            UnitOutcome::Failed(format!("panicked: {}", reason))
                        });
                    reporter.report(Progress::TaskIncrement);
                    outcome
                })
                .collect()
        });

        reporter.report(Progress::TaskFinish);
        outcomes
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn zero_workers_is_a_config_error() {
        let result = WorkerPool::new(0);
        assert!(matches!(
            result,
            Err(EngineError::Config(ConfigError::InvalidParameter { name: "workers", .. }))
        ));
    }

    #[test]
    fn outcomes_keep_input_order() {
        let pool = WorkerPool::new(4).unwrap();
        let units: Vec<u32> = (0..20).collect();
        let outcomes = pool.run(
            &units,
            |n| match n % 3 {
                0 => UnitOutcome::Completed,
                1 => UnitOutcome::Skipped,
                _ => UnitOutcome::Failed(format!("unit {}", n)),
            },
            &ProgressReporter::new(),
        );
        assert_eq!(outcomes.len(), 20);
        assert_eq!(outcomes[0], UnitOutcome::Completed);
        assert_eq!(outcomes[1], UnitOutcome::Skipped);
        assert_eq!(outcomes[5], UnitOutcome::Failed("unit 5".to_string()));

        let tally = PoolTally::from_outcomes(&outcomes);
        assert_eq!(tally.completed, 7);
        assert_eq!(tally.skipped, 7);
        assert_eq!(tally.failed, 6);
        assert_eq!(tally.total(), 20);
    }

    #[test]
    fn panicking_unit_fails_without_stopping_others() {
        let pool = WorkerPool::new(2).unwrap();
        let units = vec!["ok", "boom", "ok"];
        let outcomes = pool.run(
            &units,
            |unit| {
                if *unit == "boom" {
                    panic!("exploded");
                }
                UnitOutcome::Completed
            },
            &ProgressReporter::new(),
        );
        assert_eq!(outcomes[0], UnitOutcome::Completed);
        assert_eq!(outcomes[2], UnitOutcome::Completed);
        assert!(matches!(&outcomes[1], UnitOutcome::Failed(reason) if reason.contains("exploded")));
    }

    #[test]
    fn progress_counts_every_unit() {
        let increments = AtomicUsize::new(0);
        let reporter = ProgressReporter::with_callback(Box::new(|event| {
            if event == Progress::TaskIncrement {
                increments.fetch_add(1, Ordering::SeqCst);
            }
        }));
        let pool = WorkerPool::new(3).unwrap();
        let units = vec![(); 9];
        pool.run(&units, |_| UnitOutcome::Completed, &reporter);
        drop(reporter);
        assert_eq!(increments.load(Ordering::SeqCst), 9);
    }
}
