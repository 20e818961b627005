use crate::journal::{Journal, JournalError};
use crate::state::{Renderer, RendererError};
use bytes::Bytes;
use std::sync::Arc;
use tokio::sync::oneshot;

/// Persister is the client-facing policy contract, bridging whatever
/// controller fronts the store (gRPC here) to the journal and the renderer.
#[async_trait::async_trait]
pub trait Persister: Send + Sync {
    /// Submits `data` for replication. The returned listener resolves `true`
    /// once the entry's index has been committed; when the accompanying
    /// result is an error the listener is already resolved `false`.
    async fn put(&self, data: Bytes) -> (CommitListener, Result<(), PolicyError>);

    /// Resolves a key-lookup request against the rendered state.
    fn get(&self, request: &[u8]) -> Result<Bytes, PolicyError>;
}

/// Completion handle for one `put`. Resolves `false` if the journal side of
/// the subscription disappears, so callers never hang on a vanished commit.
pub struct CommitListener {
    receiver: oneshot::Receiver<bool>,
}

impl CommitListener {
    fn new(receiver: oneshot::Receiver<bool>) -> Self {
        CommitListener { receiver }
    }

    /// A listener whose outcome is already known.
    pub(crate) fn resolved(outcome: bool) -> Self {
        let (tx, rx) = oneshot::channel();
        let _ = tx.send(outcome);
        CommitListener::new(rx)
    }

    /// Waits for the replication outcome of the associated entry.
    pub async fn committed(self) -> bool {
        self.receiver.await.unwrap_or(false)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PolicyError {
    #[error("failure appending entry to journal")]
    AppendFailed(#[source] JournalError),

    #[error("failure registering for commit notification")]
    RegisterFailed(#[source] JournalError),

    #[error("unable to get data")]
    GetFailed(#[source] RendererError),
}

/// ClientPolicy is the store's core client policy: a put is an append plus a
/// one-shot wait for that index to commit; a get resolves against the
/// renderer's view.
pub struct ClientPolicy {
    logger: slog::Logger,
    journal: Arc<dyn Journal>,
    renderer: Arc<dyn Renderer>,
}

impl ClientPolicy {
    pub fn new(logger: slog::Logger, journal: Arc<dyn Journal>, renderer: Arc<dyn Renderer>) -> Self {
        ClientPolicy {
            logger,
            journal,
            renderer,
        }
    }
}

#[async_trait::async_trait]
impl Persister for ClientPolicy {
    async fn put(&self, data: Bytes) -> (CommitListener, Result<(), PolicyError>) {
        let index = match self.journal.append(data).await {
            Ok(index) => index,
            Err(e) => {
                slog::warn!(self.logger, "Append to journal failed: {}", e);
                return (CommitListener::resolved(false), Err(PolicyError::AppendFailed(e)));
            }
        };

        let (tx, rx) = oneshot::channel();
        match self.journal.notify_of_commit_on_index_once(index, tx).await {
            Ok(()) => (CommitListener::new(rx), Ok(())),
            Err(e) => {
                slog::warn!(
                    self.logger,
                    "Commit subscription for index {} failed: {}",
                    index,
                    e
                );
                (CommitListener::resolved(false), Err(PolicyError::RegisterFailed(e)))
            }
        }
    }

    fn get(&self, request: &[u8]) -> Result<Bytes, PolicyError> {
        self.renderer
            .resolve_request_to_data(request)
            .map_err(PolicyError::GetFailed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::journal::{ArrayJournal, JournalSpy};
    use crate::state::StateMachineSpy;
    use tokio::time::{timeout, Duration};

    fn discard_logger() -> slog::Logger {
        slog::Logger::root(slog::Discard, slog::o!())
    }

    fn policy_over(journal: Arc<dyn Journal>) -> ClientPolicy {
        let renderer = Arc::new(StateMachineSpy::new(Arc::clone(&journal)));
        ClientPolicy::new(discard_logger(), journal, renderer)
    }

    #[tokio::test]
    async fn put_resolves_true_once_the_entry_commits() {
        let journal: Arc<dyn Journal> = Arc::new(ArrayJournal::spawn(discard_logger()));
        let policy = policy_over(Arc::clone(&journal));

        let (listener, result) = policy.put(Bytes::from_static(b"payload")).await;
        result.unwrap();

        journal.commit(0).await.unwrap();

        assert!(listener.committed().await);
    }

    #[tokio::test]
    async fn put_does_not_resolve_before_a_commit() {
        let journal: Arc<dyn Journal> = Arc::new(ArrayJournal::spawn(discard_logger()));
        let policy = policy_over(journal);

        let (listener, result) = policy.put(Bytes::from_static(b"payload")).await;
        result.unwrap();

        timeout(Duration::from_millis(20), listener.committed())
            .await
            .expect_err("Expected timeout");
    }

    #[tokio::test]
    async fn a_failed_append_reports_and_resolves_false() {
        let journal = Arc::new(JournalSpy::new());
        journal.fail_next_append("append exploded");
        let policy = policy_over(journal);

        let (listener, result) = policy.put(Bytes::from_static(b"payload")).await;

        assert!(matches!(result.unwrap_err(), PolicyError::AppendFailed(_)));
        assert!(!listener.committed().await);
    }

    #[tokio::test]
    async fn a_failed_subscription_reports_and_resolves_false() {
        let journal = Arc::new(JournalSpy::new());
        journal.fail_next_notify_of_commit_on_index_once();
        let policy = policy_over(Arc::clone(&journal) as Arc<dyn Journal>);

        let (listener, result) = policy.put(Bytes::from_static(b"payload")).await;

        assert!(journal.append_called());
        assert!(matches!(result.unwrap_err(), PolicyError::RegisterFailed(_)));
        assert!(!listener.committed().await);
    }

    #[tokio::test]
    async fn get_returns_rendered_data() {
        let journal: Arc<dyn Journal> = Arc::new(JournalSpy::new());
        let renderer = Arc::new(StateMachineSpy::new(Arc::clone(&journal)));
        renderer.add_state_machine_data(Bytes::from_static(b"stored"));
        let policy = ClientPolicy::new(discard_logger(), journal, renderer);

        assert_eq!(Bytes::from_static(b"stored"), policy.get(b"stored").unwrap());
    }

    #[tokio::test]
    async fn get_wraps_renderer_failures() {
        let journal: Arc<dyn Journal> = Arc::new(JournalSpy::new());
        let policy = policy_over(journal);

        let err = policy.get(b"missing").unwrap_err();

        assert!(matches!(err, PolicyError::GetFailed(_)));
    }
}
