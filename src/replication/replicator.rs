use crate::replication::timer::Timer;
use std::sync::Arc;

const DEFAULT_POLL_PERIOD_MS: u64 = 50;

/// Tuning knobs for a replicator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Time in milliseconds to wait between polls of the journal for entries
    /// that still need to be replicated.
    pub journal_poll_period_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            journal_poll_period_ms: DEFAULT_POLL_PERIOD_MS,
        }
    }
}

/// Replicator drives the journal's commit index forward. The in-tree
/// implementation commits the local head as if quorum had been reached; a
/// real replicator with peer RPCs is a drop-in behind the same contract.
pub trait Replicator: Send + Sync {
    /// Spawns the replication loop, sleeping between ticks via `timer`.
    fn start(&self, timer: Arc<dyn Timer>);
}
