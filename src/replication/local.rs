use crate::journal::Journal;
use crate::replication::replicator::{Config, Replicator};
use crate::replication::timer::Timer;
use std::sync::Arc;

/// LocalReplicator promotes the local journal head to the commit index on
/// every tick, standing in for quorum replication on a single node.
pub struct LocalReplicator {
    logger: slog::Logger,
    journal: Arc<dyn Journal>,
    config: Config,
}

impl LocalReplicator {
    pub fn new(logger: slog::Logger, journal: Arc<dyn Journal>, config: Config) -> Self {
        LocalReplicator {
            logger,
            journal,
            config,
        }
    }

    /// One replication round: observe the uncommitted tail, and commit up to
    /// the head that was observed with it.
    pub async fn tick(logger: &slog::Logger, journal: &dyn Journal) {
        let report = journal.get_all_uncommitted_entries().await;

        if !report.has_uncommitted {
            return;
        }

        // The report carries the head observed together with the tail, so a
        // concurrent append cannot make us commit an index we never saw.
        if let Some(head) = report.head_index {
            if let Err(e) = journal.commit(head).await {
                slog::warn!(logger, "Failed to commit journal head {}: {}", head, e);
            }
        }
    }

    async fn replicate_commits(
        logger: slog::Logger,
        journal: Arc<dyn Journal>,
        config: Config,
        timer: Arc<dyn Timer>,
    ) {
        loop {
            Self::tick(&logger, journal.as_ref()).await;
            timer.wait_ms(config.journal_poll_period_ms).await;
        }
    }
}

impl Replicator for LocalReplicator {
    fn start(&self, timer: Arc<dyn Timer>) {
        tokio::spawn(Self::replicate_commits(
            self.logger.clone(),
            Arc::clone(&self.journal),
            self.config.clone(),
            timer,
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::journal::ArrayJournal;
    use crate::replication::timer::TimerSpy;
    use bytes::Bytes;
    use tokio::time::{sleep, timeout, Duration};

    fn discard_logger() -> slog::Logger {
        slog::Logger::root(slog::Discard, slog::o!())
    }

    async fn journal_with_entries(count: usize) -> Arc<dyn Journal> {
        let journal = Arc::new(ArrayJournal::spawn(discard_logger()));
        for i in 0..count {
            journal.append(Bytes::from(format!("entry-{}", i))).await.unwrap();
        }
        journal
    }

    #[tokio::test]
    async fn a_tick_commits_the_journal_head() {
        let journal = journal_with_entries(3).await;

        LocalReplicator::tick(&discard_logger(), journal.as_ref()).await;

        assert_eq!(3, journal.get_all_committed_entries().size());
    }

    #[tokio::test]
    async fn a_tick_on_an_empty_journal_commits_nothing() {
        let journal = journal_with_entries(0).await;

        LocalReplicator::tick(&discard_logger(), journal.as_ref()).await;

        assert_eq!(0, journal.get_all_committed_entries().size());
    }

    #[tokio::test]
    async fn a_tick_with_everything_committed_is_a_no_op() {
        let journal = journal_with_entries(2).await;
        journal.commit(1).await.unwrap();

        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        journal.notify_of_all_commit_changes(tx).await;

        LocalReplicator::tick(&discard_logger(), journal.as_ref()).await;

        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn the_loop_commits_new_entries_and_sleeps_the_configured_period() {
        let journal = journal_with_entries(2).await;
        let timer = Arc::new(TimerSpy::new());
        let config = Config {
            journal_poll_period_ms: 25,
        };
        let replicator =
            LocalReplicator::new(discard_logger(), Arc::clone(&journal), config);

        replicator.start(Arc::clone(&timer) as Arc<dyn Timer>);

        timeout(Duration::from_secs(2), async {
            while journal.get_all_committed_entries().size() < 2 {
                sleep(Duration::from_millis(5)).await;
            }
        })
        .await
        .expect("replicator never committed the journal head");

        assert_eq!(25, timer.last_wait_ms());
    }
}
