use crate::journal::api::{
    CommitNotifier, CommitStreamSender, Entry, JournalError, UncommittedEntriesReport,
};
use crate::journal::iterator::JournalIterator;
use bytes::Bytes;
use std::collections::HashMap;
use std::fmt;
use std::fmt::{Debug, Formatter};
use std::sync::{Arc, RwLock};
use tokio::sync::mpsc;

/// One-shot completion handle carried by every command on the mutation queue.
/// Sending never blocks; a caller that has gone away is simply not answered.
pub(super) struct Callback<T>(tokio::sync::oneshot::Sender<T>);

impl<T> Callback<T> {
    pub(super) fn new(sender: tokio::sync::oneshot::Sender<T>) -> Self {
        Callback(sender)
    }

    pub(super) fn send(self, message: T) {
        let _ = self.0.send(message);
    }
}

impl<T> Debug for Callback<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callback").finish()
    }
}

#[derive(Debug)]
pub(super) enum Command {
    Append(Bytes, Callback<u64>),
    Commit(u64, Callback<Result<(), JournalError>>),
    SubscribeOnce(u64, CommitNotifier, Callback<Result<(), JournalError>>),
    SubscribeAllCommits(CommitStreamSender, Callback<()>),
    ReportUncommitted(Callback<UncommittedEntriesReport>),
}

/// Entry sequence and commit index, shared between the mutation task (sole
/// writer) and the synchronous snapshot reads on the journal handle.
pub(super) struct LogState {
    entries: Vec<Entry>,
    commit_index: Option<u64>,
}

impl LogState {
    pub(super) fn new() -> Self {
        LogState {
            entries: Vec::with_capacity(1024),
            commit_index: None,
        }
    }

    pub(super) fn head_index(&self) -> Option<u64> {
        self.entries.len().checked_sub(1).map(|i| i as u64)
    }

    pub(super) fn commit_index(&self) -> Option<u64> {
        self.commit_index
    }

    pub(super) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(super) fn head_entry(&self) -> Option<Entry> {
        self.entries.last().cloned()
    }

    /// Clones the inclusive range `[begin, end]` out of the backing sequence.
    /// Callers validate the bounds first.
    pub(super) fn snapshot_range(&self, begin: u64, end: u64) -> Vec<Entry> {
        self.entries[begin as usize..=end as usize].to_vec()
    }
}

/// JournalActor owns all journal mutation. It drains the bounded command
/// queue one command at a time; subscriber fan-out for a commit completes
/// before the next command is looked at, which makes the ordering of
/// append/commit effects linearizable without caller-visible locks.
pub(super) struct JournalActor {
    logger: slog::Logger,
    receiver: mpsc::Receiver<Command>,
    state: Arc<RwLock<LogState>>,
    one_shot_subscribers: HashMap<u64, Vec<CommitNotifier>>,
    all_commit_subscribers: Vec<CommitStreamSender>,
}

impl JournalActor {
    pub(super) fn new(
        logger: slog::Logger,
        receiver: mpsc::Receiver<Command>,
        state: Arc<RwLock<LogState>>,
    ) -> Self {
        JournalActor {
            logger,
            receiver,
            state,
            one_shot_subscribers: HashMap::new(),
            all_commit_subscribers: Vec::new(),
        }
    }

    pub(super) async fn run_mutation_loop(mut self) {
        while let Some(command) = self.receiver.recv().await {
            slog::trace!(self.logger, "Received: {:?}", command);
            self.handle_command(command);
        }
    }

    // This must NOT be async. Nothing in here may suspend between a state
    // update and the fan-out that goes with it.
    fn handle_command(&mut self, command: Command) {
        match command {
            Command::Append(payload, callback) => {
                let index = self.handle_append(payload);
                callback.send(index);
            }
            Command::Commit(index, callback) => {
                let result = self.handle_commit(index);
                callback.send(result);
            }
            Command::SubscribeOnce(index, notifier, callback) => {
                let result = self.handle_subscribe_once(index, notifier);
                callback.send(result);
            }
            Command::SubscribeAllCommits(subscriber, callback) => {
                self.all_commit_subscribers.push(subscriber);
                callback.send(());
            }
            Command::ReportUncommitted(callback) => {
                callback.send(self.report_uncommitted());
            }
        }
    }

    fn handle_append(&mut self, payload: Bytes) -> u64 {
        let mut state = self.write_state();
        state.entries.push(Entry::new(payload));
        (state.entries.len() - 1) as u64
    }

    fn handle_commit(&mut self, index: u64) -> Result<(), JournalError> {
        let advanced = {
            let mut state = self.write_state();

            match state.head_index() {
                None => return Err(JournalError::CommitOnEmptyLog),
                Some(head) if index > head => return Err(JournalError::IndexBeyondHead),
                Some(_) => {}
            }

            // The commit index only ratchets forward. Re-committing an index
            // at or below the current one succeeds without any effect.
            match state.commit_index {
                Some(current) if index <= current => false,
                _ => {
                    state.commit_index = Some(index);
                    true
                }
            }
        };

        if advanced {
            self.fan_out(index);
        }

        Ok(())
    }

    fn handle_subscribe_once(
        &mut self,
        index: u64,
        notifier: CommitNotifier,
    ) -> Result<(), JournalError> {
        let (head_index, commit_index) = {
            let state = self.read_state();
            (state.head_index(), state.commit_index)
        };

        let head = match head_index {
            None => return Err(JournalError::SubscriptionOnEmptyLog),
            Some(head) => head,
        };
        if index > head {
            return Err(JournalError::IndexBeyondHead);
        }

        // The first commit at or past the target may already have happened;
        // signal right away instead of leaving the caller waiting for a
        // commit that will never repeat.
        if matches!(commit_index, Some(committed) if committed >= index) {
            if notifier.send(true).is_err() {
                slog::debug!(self.logger, "One-shot subscriber for index {} has gone away", index);
            }
            return Ok(());
        }

        self.one_shot_subscribers.entry(index).or_default().push(notifier);
        Ok(())
    }

    /// Signals every one-shot subscriber registered at a target at or below
    /// `commit_index`, then every durable subscriber, in registration order.
    fn fan_out(&mut self, commit_index: u64) {
        let mut due: Vec<u64> = self
            .one_shot_subscribers
            .keys()
            .copied()
            .filter(|target| *target <= commit_index)
            .collect();
        due.sort_unstable();

        for target in due {
            // Remove before signaling so a subscriber that immediately turns
            // around and inspects the journal observes its own departure.
            if let Some(notifiers) = self.one_shot_subscribers.remove(&target) {
                for notifier in notifiers {
                    if notifier.send(true).is_err() {
                        slog::debug!(
                            self.logger,
                            "One-shot subscriber for index {} has gone away",
                            target
                        );
                    }
                }
            }
        }

        self.all_commit_subscribers.retain(|subscriber| {
            let delivered = subscriber.send(commit_index).is_ok();
            if !delivered {
                slog::warn!(self.logger, "All-commits subscriber has disconnected");
            }
            delivered
        });
    }

    fn report_uncommitted(&self) -> UncommittedEntriesReport {
        let state = self.read_state();
        let head_index = state.head_index();
        let commit_index = state.commit_index;

        let uncommitted = match (head_index, commit_index) {
            (None, _) => Vec::new(),
            (Some(head), None) => state.snapshot_range(0, head),
            (Some(head), Some(committed)) if committed < head => {
                state.snapshot_range(committed + 1, head)
            }
            (Some(_), Some(_)) => Vec::new(),
        };

        UncommittedEntriesReport {
            has_uncommitted: !uncommitted.is_empty(),
            entries: JournalIterator::new(uncommitted),
            commit_index,
            head_index,
        }
    }

    fn write_state(&self) -> std::sync::RwLockWriteGuard<'_, LogState> {
        self.state.write().expect("journal state lock poisoned")
    }

    fn read_state(&self) -> std::sync::RwLockReadGuard<'_, LogState> {
        self.state.read().expect("journal state lock poisoned")
    }
}
