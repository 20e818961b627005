use crate::journal::iterator::JournalIterator;
use bytes::Bytes;
use std::fmt;
use tokio::sync::{mpsc, oneshot};

/// One appended payload. Entries are immutable once appended and live as long
/// as their journal.
#[derive(Clone, PartialEq, Eq)]
pub struct Entry {
    pub data: Bytes,
}

impl Entry {
    pub fn new(data: Bytes) -> Self {
        Entry { data }
    }
}

impl fmt::Debug for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entry").field("data.len()", &self.data.len()).finish()
    }
}

/// Handle signaled at most once, with `true`, when the commit index first
/// reaches the subscribed target. Sending never blocks the journal; a dropped
/// receiver is logged and forgotten.
pub type CommitNotifier = oneshot::Sender<bool>;

/// Durable handle receiving every commit-index advancement, in commit order,
/// for the lifetime of the journal. Unbounded so the journal's mutation task
/// never blocks on a slow consumer.
pub type CommitStreamSender = mpsc::UnboundedSender<u64>;

/// Snapshot view of the journal's uncommitted tail.
#[derive(Debug)]
pub struct UncommittedEntriesReport {
    /// Iterates the entries in `(commit_index, head_index]`, or
    /// `[0, head_index]` when nothing has been committed yet.
    pub entries: JournalIterator,
    pub has_uncommitted: bool,
    pub commit_index: Option<u64>,
    pub head_index: Option<u64>,
}

#[derive(Debug, thiserror::Error)]
pub enum JournalError {
    #[error("attempt to get the head entry of an empty log")]
    EmptyLog,

    #[error("attempt to commit on an empty log")]
    CommitOnEmptyLog,

    #[error("attempt to use an index that is beyond the head of the log")]
    IndexBeyondHead,

    #[error("attempt to set up a commit subscription on an empty log")]
    SubscriptionOnEmptyLog,

    #[error("range begin index is greater than end index")]
    InvertedIndexes,

    #[error("range index is outside the stored entries")]
    IndexOutOfBounds,

    #[error("attempt to get the next iterator element but the iterator is at the end")]
    NoMoreElements,

    // The mutation task runs for the life of the process; seeing this means
    // the process is already tearing down.
    #[error("journal mutation task has exited")]
    TaskExited,

    #[error("injected failure: {0}")]
    Injected(String),
}

/// Journal is the system's single source of truth for ordering: an append-only
/// log of opaque payloads with a monotonic commit index and two subscription
/// flavors.
///
/// Mutating operations are serialized through the implementation's single
/// mutation task and therefore suspend. `get_head`, `get_all_committed_entries`
/// and `get_all_entries_between` read a stable snapshot synchronously.
#[async_trait::async_trait]
pub trait Journal: Send + Sync {
    /// Appends a new entry holding `payload` and returns its index. Indices
    /// are dense and strictly increasing, starting at 0.
    async fn append(&self, payload: Bytes) -> Result<u64, JournalError>;

    /// Marks every entry up to and including `index` as committed and fires
    /// the applicable subscriptions. Committing at or below the current
    /// commit index is a no-op success; the commit index never decreases.
    async fn commit(&self, index: u64) -> Result<(), JournalError>;

    /// Returns the most recently appended entry.
    fn get_head(&self) -> Result<Entry, JournalError>;

    /// Registers `notifier` to be signaled once, on the first commit whose
    /// index is at or past `index`. Multiple notifiers may accumulate on the
    /// same index; each fires exactly once.
    async fn notify_of_commit_on_index_once(
        &self,
        index: u64,
        notifier: CommitNotifier,
    ) -> Result<(), JournalError>;

    /// Registers a durable subscriber that receives every subsequent commit
    /// index, in commit order.
    async fn notify_of_all_commit_changes(&self, subscriber: CommitStreamSender);

    /// Returns a snapshot iterator over `[0, commit_index]`; empty when
    /// nothing has been committed.
    fn get_all_committed_entries(&self) -> JournalIterator;

    /// Returns a snapshot iterator over `[begin, end]`, both inclusive. The
    /// range may include uncommitted entries.
    fn get_all_entries_between(&self, begin: u64, end: u64) -> Result<JournalIterator, JournalError>;

    /// Reports the uncommitted tail of the journal together with the head and
    /// commit indexes observed at the same instant.
    async fn get_all_uncommitted_entries(&self) -> UncommittedEntriesReport;
}
