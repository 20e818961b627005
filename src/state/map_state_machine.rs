use crate::journal::Journal;
use crate::state::renderer::{KeyRecord, KeyValItem, Renderer, RendererError};
use bytes::Bytes;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::{Arc, RwLock};
use tokio::sync::mpsc;

// Sentinel for "no commit applied yet"; real indexes are >= 0.
const NO_COMMIT_SEEN: i64 = -1;

/// MapStateMachine is the default renderer: committed key/value records land
/// in an in-memory map keyed by their decoded key, newest entry wins.
///
/// The consumer task is the map's only writer. Resolution reads go through
/// the same lock and observe a consistent value per key; a read racing a
/// `Put` is allowed to miss it, the chain is eventually consistent.
pub struct MapStateMachine {
    logger: slog::Logger,
    journal: Arc<dyn Journal>,
    data: Arc<RwLock<HashMap<String, Bytes>>>,
    highest_seen_commit_index: Arc<AtomicI64>,
    is_running: AtomicBool,
}

impl MapStateMachine {
    pub fn new(logger: slog::Logger, journal: Arc<dyn Journal>) -> Self {
        MapStateMachine {
            logger,
            journal,
            data: Arc::new(RwLock::new(HashMap::new())),
            highest_seen_commit_index: Arc::new(AtomicI64::new(NO_COMMIT_SEEN)),
            is_running: AtomicBool::new(false),
        }
    }

    /// Drains every already-committed entry into the map. Returns the number
    /// of entries replayed; the first undecodable payload aborts the replay.
    fn render_current_state_from_journal(&self) -> Result<usize, RendererError> {
        let mut committed = self.journal.get_all_committed_entries();
        let replayed = committed.size();

        let mut data = self.data.write().expect("state machine map lock poisoned");
        while let Ok(entry) = committed.next() {
            let item: KeyValItem = serde_json::from_slice(&entry.data).map_err(|_| {
                slog::error!(
                    self.logger,
                    "Committed journal entry is not a well-formed key/value record"
                );
                RendererError::CannotDecodePayload
            })?;

            data.insert(item.key, Bytes::from(item.data));
        }

        Ok(replayed)
    }

    async fn listen_for_state_changes(
        logger: slog::Logger,
        journal: Arc<dyn Journal>,
        data: Arc<RwLock<HashMap<String, Bytes>>>,
        highest_seen_commit_index: Arc<AtomicI64>,
        mut commit_stream: mpsc::UnboundedReceiver<u64>,
    ) {
        while let Some(commit_index) = commit_stream.recv().await {
            let begin = (highest_seen_commit_index.load(Ordering::Acquire) + 1) as u64;
            if commit_index < begin {
                continue;
            }

            match journal.get_all_entries_between(begin, commit_index) {
                Ok(mut entries) => {
                    while let Ok(entry) = entries.next() {
                        Self::apply_entry(&logger, &data, &entry.data);
                    }
                }
                Err(e) => {
                    slog::error!(
                        logger,
                        "Failed to read committed range [{}, {}]: {}",
                        begin,
                        commit_index,
                        e
                    );
                }
            }

            // Undecodable entries in the range were skipped, but the range
            // itself has been consumed.
            highest_seen_commit_index.store(commit_index as i64, Ordering::Release);
        }
    }

    fn apply_entry(
        logger: &slog::Logger,
        data: &Arc<RwLock<HashMap<String, Bytes>>>,
        payload: &[u8],
    ) {
        match serde_json::from_slice::<KeyValItem>(payload) {
            Ok(item) => {
                data.write()
                    .expect("state machine map lock poisoned")
                    .insert(item.key, Bytes::from(item.data));
            }
            Err(_) => {
                slog::warn!(
                    logger,
                    "Skipping journal entry that is not a well-formed key/value record"
                );
            }
        }
    }
}

#[async_trait::async_trait]
impl Renderer for MapStateMachine {
    async fn start(&self) -> Result<(), RendererError> {
        if self.is_running.load(Ordering::Acquire) {
            return Err(RendererError::AlreadyRunning);
        }

        let replayed = self.render_current_state_from_journal()?;
        self.highest_seen_commit_index
            .store(replayed as i64 - 1, Ordering::Release);

        let (tx, rx) = mpsc::unbounded_channel();
        self.journal.notify_of_all_commit_changes(tx).await;

        tokio::spawn(Self::listen_for_state_changes(
            self.logger.clone(),
            Arc::clone(&self.journal),
            Arc::clone(&self.data),
            Arc::clone(&self.highest_seen_commit_index),
            rx,
        ));

        self.is_running.store(true, Ordering::Release);
        Ok(())
    }

    fn resolve_request_to_data(&self, request: &[u8]) -> Result<Bytes, RendererError> {
        let key: KeyRecord = serde_json::from_slice(request).map_err(|_| {
            slog::warn!(
                self.logger,
                "Resolve request is not a well-formed key lookup record"
            );
            RendererError::InvalidKeyRequest
        })?;

        self.data
            .read()
            .expect("state machine map lock poisoned")
            .get(&key.key)
            .cloned()
            .ok_or(RendererError::KeyNotFound)
    }
}
