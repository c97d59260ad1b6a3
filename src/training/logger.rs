//! Structured logging for training progress.

use super::eval::MetricValue;

/// How much progress output to emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    /// No output.
    Silent,
    /// Round metrics and start/finish lines.
    Info,
    /// Everything, including per-query detail where callers provide it.
    Debug,
}

impl Default for Verbosity {
    fn default() -> Self {
        Verbosity::Info
    }
}

/// Console logger used by the round evaluator and by host training loops.
#[derive(Debug, Clone, Copy)]
pub struct TrainingLogger {
    verbosity: Verbosity,
}

impl TrainingLogger {
    pub fn new(verbosity: Verbosity) -> Self {
        Self { verbosity }
    }

    pub fn verbosity(&self) -> Verbosity {
        self.verbosity
    }

    pub fn start_training(&self, n_rounds: usize) {
        if self.verbosity >= Verbosity::Info {
            println!("training: {} rounds", n_rounds);
        }
    }

    /// One line per round: `[round] name: value  name: value ...`
    pub fn log_metrics(&self, round: usize, metrics: &[MetricValue]) {
        if self.verbosity >= Verbosity::Info && !metrics.is_empty() {
            let line = metrics
                .iter()
                .map(|m| m.to_string())
                .collect::<Vec<_>>()
                .join("  ");
            println!("[{}] {}", round, line);
        }
    }

    pub fn log_early_stopping(&self, round: usize, best_round: usize, best_value: f64) {
        if self.verbosity >= Verbosity::Info {
            println!(
                "early stopping at round {} (best round {}, value {:.6})",
                round, best_round, best_value
            );
        }
    }

    pub fn finish_training(&self) {
        if self.verbosity >= Verbosity::Info {
            println!("training: done");
        }
    }
}
