use crate::journal::Journal;
use crate::replication::replicator::Replicator;
use crate::replication::timer::Timer;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// ReplicatorSpy records that it was started and never commits anything.
pub struct ReplicatorSpy {
    _journal: Arc<dyn Journal>,
    start_called: AtomicBool,
}

impl ReplicatorSpy {
    pub fn new(journal: Arc<dyn Journal>) -> Self {
        ReplicatorSpy {
            _journal: journal,
            start_called: AtomicBool::new(false),
        }
    }

    pub fn start_called(&self) -> bool {
        self.start_called.load(Ordering::Acquire)
    }
}

impl Replicator for ReplicatorSpy {
    fn start(&self, _timer: Arc<dyn Timer>) {
        self.start_called.store(true, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::journal::JournalSpy;
    use crate::replication::timer::TimerSpy;

    #[test]
    fn start_is_recorded() {
        let spy = ReplicatorSpy::new(Arc::new(JournalSpy::new()));

        spy.start(Arc::new(TimerSpy::new()));

        assert!(spy.start_called());
    }
}
