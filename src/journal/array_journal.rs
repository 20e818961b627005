use crate::journal::actor::{Callback, Command, JournalActor, LogState};
use crate::journal::api::{
    CommitNotifier, CommitStreamSender, Entry, Journal, JournalError, UncommittedEntriesReport,
};
use crate::journal::iterator::JournalIterator;
use bytes::Bytes;
use std::sync::{Arc, RwLock};
use tokio::sync::{mpsc, oneshot};

// Backpressure bound on callers racing to mutate the journal. Commands past
// this many in flight make their submitters wait.
const COMMAND_QUEUE_CAPACITY: usize = 1024;

/// ArrayJournal is the default journal: a growable in-memory entry sequence
/// whose mutations are serialized through a single owner task.
///
/// The handle is cheap to clone and safe to share; all clones feed the same
/// mutation task and read the same entry snapshot.
#[derive(Clone)]
pub struct ArrayJournal {
    command_queue: mpsc::Sender<Command>,
    state: Arc<RwLock<LogState>>,
}

impl ArrayJournal {
    /// Creates the journal and spawns its mutation task on the current
    /// runtime. The task runs until every handle has been dropped.
    pub fn spawn(logger: slog::Logger) -> Self {
        let (tx, rx) = mpsc::channel(COMMAND_QUEUE_CAPACITY);
        let state = Arc::new(RwLock::new(LogState::new()));

        let actor = JournalActor::new(logger, rx, Arc::clone(&state));
        tokio::spawn(actor.run_mutation_loop());

        ArrayJournal {
            command_queue: tx,
            state,
        }
    }

    async fn submit<T>(
        &self,
        command: Command,
        reply: oneshot::Receiver<T>,
    ) -> Result<T, JournalError> {
        self.command_queue
            .send(command)
            .await
            .map_err(|_| JournalError::TaskExited)?;

        reply.await.map_err(|_| JournalError::TaskExited)
    }

    fn read_state(&self) -> std::sync::RwLockReadGuard<'_, LogState> {
        self.state.read().expect("journal state lock poisoned")
    }
}

#[async_trait::async_trait]
impl Journal for ArrayJournal {
    async fn append(&self, payload: Bytes) -> Result<u64, JournalError> {
        let (tx, rx) = oneshot::channel();
        self.submit(Command::Append(payload, Callback::new(tx)), rx).await
    }

    async fn commit(&self, index: u64) -> Result<(), JournalError> {
        let (tx, rx) = oneshot::channel();
        self.submit(Command::Commit(index, Callback::new(tx)), rx).await?
    }

    fn get_head(&self) -> Result<Entry, JournalError> {
        self.read_state().head_entry().ok_or(JournalError::EmptyLog)
    }

    async fn notify_of_commit_on_index_once(
        &self,
        index: u64,
        notifier: CommitNotifier,
    ) -> Result<(), JournalError> {
        let (tx, rx) = oneshot::channel();
        self.submit(Command::SubscribeOnce(index, notifier, Callback::new(tx)), rx)
            .await?
    }

    async fn notify_of_all_commit_changes(&self, subscriber: CommitStreamSender) {
        let (tx, rx) = oneshot::channel();
        // Registration is acknowledged so that commits issued after this call
        // returns are guaranteed to reach the subscriber.
        let _ = self
            .submit(Command::SubscribeAllCommits(subscriber, Callback::new(tx)), rx)
            .await;
    }

    fn get_all_committed_entries(&self) -> JournalIterator {
        let state = self.read_state();

        match state.commit_index() {
            Some(committed) => JournalIterator::new(state.snapshot_range(0, committed)),
            None => JournalIterator::empty(),
        }
    }

    fn get_all_entries_between(
        &self,
        begin: u64,
        end: u64,
    ) -> Result<JournalIterator, JournalError> {
        if begin > end {
            return Err(JournalError::InvertedIndexes);
        }

        let state = self.read_state();
        if end as usize >= state.len() {
            return Err(JournalError::IndexOutOfBounds);
        }

        Ok(JournalIterator::new(state.snapshot_range(begin, end)))
    }

    async fn get_all_uncommitted_entries(&self) -> UncommittedEntriesReport {
        let (tx, rx) = oneshot::channel();
        self.submit(Command::ReportUncommitted(Callback::new(tx)), rx)
            .await
            .unwrap_or(UncommittedEntriesReport {
                entries: JournalIterator::empty(),
                has_uncommitted: false,
                commit_index: None,
                head_index: None,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::{timeout, Duration};

    fn test_journal() -> ArrayJournal {
        ArrayJournal::spawn(slog::Logger::root(slog::Discard, slog::o!()))
    }

    async fn append_entries(journal: &ArrayJournal, count: usize) -> u64 {
        let mut index = 0;
        for i in 0..count {
            index = journal
                .append(Bytes::from(format!("entry-{}", i)))
                .await
                .unwrap();
        }
        index
    }

    #[tokio::test]
    async fn append_assigns_dense_increasing_indexes() {
        let journal = test_journal();

        for expected in 0..5u64 {
            let index = journal.append(Bytes::from_static(b"payload")).await.unwrap();
            assert_eq!(expected, index);
        }
    }

    #[tokio::test]
    async fn get_head_returns_the_last_appended_entry() {
        let journal = test_journal();
        append_entries(&journal, 3).await;

        let head = journal.get_head().unwrap();

        assert_eq!(Bytes::from_static(b"entry-2"), head.data);
    }

    #[tokio::test]
    async fn get_head_on_an_empty_log_fails() {
        let journal = test_journal();

        let err = journal.get_head().unwrap_err();

        assert!(matches!(err, JournalError::EmptyLog));
    }

    #[tokio::test]
    async fn commit_on_an_empty_log_fails() {
        let journal = test_journal();

        let err = journal.commit(0).await.unwrap_err();

        assert!(matches!(err, JournalError::CommitOnEmptyLog));
    }

    #[tokio::test]
    async fn commit_at_the_head_always_succeeds() {
        let journal = test_journal();
        let head = append_entries(&journal, 4).await;

        journal.commit(head).await.unwrap();

        assert_eq!(4, journal.get_all_committed_entries().size());
    }

    #[tokio::test]
    async fn commit_past_the_head_fails_and_leaves_state_unchanged() {
        let journal = test_journal();
        append_entries(&journal, 2).await;

        let err = journal.commit(10).await.unwrap_err();

        assert!(matches!(err, JournalError::IndexBeyondHead));
        let report = journal.get_all_uncommitted_entries().await;
        assert_eq!(Some(1), report.head_index);
        assert_eq!(None, report.commit_index);
    }

    #[tokio::test]
    async fn commit_one_past_the_head_fails() {
        let journal = test_journal();
        let head = append_entries(&journal, 3).await;

        let err = journal.commit(head + 1).await.unwrap_err();

        assert!(matches!(err, JournalError::IndexBeyondHead));
    }

    #[tokio::test]
    async fn commit_index_never_decreases() {
        let journal = test_journal();
        append_entries(&journal, 6).await;

        journal.commit(4).await.unwrap();
        journal.commit(2).await.unwrap();

        assert_eq!(5, journal.get_all_committed_entries().size());
    }

    #[tokio::test]
    async fn subscription_on_an_empty_log_fails_regardless_of_index() {
        let journal = test_journal();

        for index in [0, 4, 99] {
            let (tx, _rx) = oneshot::channel();
            let err = journal
                .notify_of_commit_on_index_once(index, tx)
                .await
                .unwrap_err();
            assert!(matches!(err, JournalError::SubscriptionOnEmptyLog));
        }
    }

    #[tokio::test]
    async fn subscription_past_the_head_fails() {
        let journal = test_journal();
        append_entries(&journal, 3).await;

        let (tx, _rx) = oneshot::channel();
        let err = journal.notify_of_commit_on_index_once(99, tx).await.unwrap_err();

        assert!(matches!(err, JournalError::IndexBeyondHead));
    }

    #[tokio::test]
    async fn subscriber_is_notified_when_its_index_commits() {
        let journal = test_journal();
        append_entries(&journal, 2).await;

        let (tx, rx) = oneshot::channel();
        journal.notify_of_commit_on_index_once(1, tx).await.unwrap();
        journal.commit(1).await.unwrap();

        assert!(rx.await.unwrap());
    }

    #[tokio::test]
    async fn subscriber_is_notified_when_a_later_index_commits() {
        let journal = test_journal();
        append_entries(&journal, 3).await;

        let (tx, rx) = oneshot::channel();
        journal.notify_of_commit_on_index_once(1, tx).await.unwrap();
        journal.commit(2).await.unwrap();

        assert!(rx.await.unwrap());
    }

    #[tokio::test]
    async fn subscriber_is_not_notified_before_any_commit() {
        let journal = test_journal();
        append_entries(&journal, 2).await;

        let (tx, rx) = oneshot::channel();
        journal.notify_of_commit_on_index_once(1, tx).await.unwrap();

        timeout(Duration::from_millis(20), rx)
            .await
            .expect_err("Expected timeout");
    }

    #[tokio::test]
    async fn durable_subscriber_receives_every_commit_in_order() {
        let journal = test_journal();
        append_entries(&journal, 5).await;

        let (tx, mut rx) = mpsc::unbounded_channel();
        journal.notify_of_all_commit_changes(tx).await;

        journal.commit(0).await.unwrap();
        journal.commit(3).await.unwrap();
        journal.commit(4).await.unwrap();

        assert_eq!(Some(0), rx.recv().await);
        assert_eq!(Some(3), rx.recv().await);
        assert_eq!(Some(4), rx.recv().await);
    }

    #[tokio::test]
    async fn committed_entries_are_visible_in_append_order() {
        let journal = test_journal();
        append_entries(&journal, 3).await;
        journal.commit(2).await.unwrap();

        let mut it = journal.get_all_committed_entries();

        assert_eq!(3, it.size());
        for i in 0..3 {
            let entry = it.next().unwrap();
            assert_eq!(Bytes::from(format!("entry-{}", i)), entry.data);
        }
    }

    #[tokio::test]
    async fn committed_entries_iterator_is_empty_before_any_commit() {
        let journal = test_journal();
        append_entries(&journal, 3).await;

        let it = journal.get_all_committed_entries();

        assert_eq!(0, it.size());
        assert!(!it.has_next());
    }

    #[tokio::test]
    async fn entries_between_returns_the_inclusive_range() {
        let journal = test_journal();
        append_entries(&journal, 5).await;

        let mut it = journal.get_all_entries_between(1, 3).unwrap();

        assert_eq!(3, it.size());
        assert_eq!(Bytes::from_static(b"entry-1"), it.next().unwrap().data);
        assert_eq!(Bytes::from_static(b"entry-2"), it.next().unwrap().data);
        assert_eq!(Bytes::from_static(b"entry-3"), it.next().unwrap().data);
    }

    #[tokio::test]
    async fn entries_between_with_equal_bounds_returns_one_entry() {
        let journal = test_journal();
        append_entries(&journal, 5).await;

        let it = journal.get_all_entries_between(2, 2).unwrap();

        assert_eq!(1, it.size());
    }

    #[tokio::test]
    async fn entries_between_includes_uncommitted_entries() {
        let journal = test_journal();
        append_entries(&journal, 4).await;
        journal.commit(0).await.unwrap();

        let it = journal.get_all_entries_between(0, 3).unwrap();

        assert_eq!(4, it.size());
    }

    #[tokio::test]
    async fn entries_between_with_inverted_bounds_fails() {
        let journal = test_journal();
        append_entries(&journal, 5).await;

        let err = journal.get_all_entries_between(3, 1).unwrap_err();

        assert!(matches!(err, JournalError::InvertedIndexes));
    }

    #[tokio::test]
    async fn entries_between_outside_the_stored_entries_fails() {
        let journal = test_journal();
        append_entries(&journal, 2).await;

        let err = journal.get_all_entries_between(0, 2).unwrap_err();

        assert!(matches!(err, JournalError::IndexOutOfBounds));
    }

    #[tokio::test]
    async fn uncommitted_report_on_an_empty_journal() {
        let journal = test_journal();

        let report = journal.get_all_uncommitted_entries().await;

        assert!(!report.has_uncommitted);
        assert_eq!(None, report.head_index);
        assert_eq!(None, report.commit_index);
        assert_eq!(0, report.entries.size());
    }

    #[tokio::test]
    async fn uncommitted_report_covers_the_whole_log_before_any_commit() {
        let journal = test_journal();
        append_entries(&journal, 3).await;

        let report = journal.get_all_uncommitted_entries().await;

        assert!(report.has_uncommitted);
        assert_eq!(Some(2), report.head_index);
        assert_eq!(3, report.entries.size());
    }

    #[tokio::test]
    async fn uncommitted_report_covers_only_the_tail_after_a_commit() {
        let journal = test_journal();
        append_entries(&journal, 5).await;
        journal.commit(2).await.unwrap();

        let mut report = journal.get_all_uncommitted_entries().await;

        assert!(report.has_uncommitted);
        assert_eq!(Some(2), report.commit_index);
        assert_eq!(2, report.entries.size());
        assert_eq!(Bytes::from_static(b"entry-3"), report.entries.next().unwrap().data);
    }

    #[tokio::test]
    async fn uncommitted_report_is_empty_when_everything_is_committed() {
        let journal = test_journal();
        let head = append_entries(&journal, 3).await;
        journal.commit(head).await.unwrap();

        let report = journal.get_all_uncommitted_entries().await;

        assert!(!report.has_uncommitted);
        assert_eq!(0, report.entries.size());
    }

    #[tokio::test]
    async fn iterators_do_not_observe_later_appends() {
        let journal = test_journal();
        append_entries(&journal, 3).await;
        journal.commit(2).await.unwrap();

        let it = journal.get_all_committed_entries();
        append_entries(&journal, 2).await;
        journal.commit(4).await.unwrap();

        assert_eq!(3, it.size());
    }

    #[tokio::test]
    async fn head_index_tracks_the_number_of_appends() {
        let journal = test_journal();

        for count in 1..=4u64 {
            journal.append(Bytes::from_static(b"payload")).await.unwrap();
            let report = journal.get_all_uncommitted_entries().await;
            assert_eq!(Some(count - 1), report.head_index);
        }
    }
}
