use crate::journal::api::{
    CommitNotifier, CommitStreamSender, Entry, Journal, JournalError, UncommittedEntriesReport,
};
use crate::journal::iterator::JournalIterator;
use bytes::Bytes;
use std::collections::HashMap;
use std::sync::Mutex;

/// JournalSpy is a journal test double. It records how it was called, lets a
/// test inject failures, and commits only when told to, so tests control
/// exactly when subscribers fire.
#[derive(Default)]
pub struct JournalSpy {
    inner: Mutex<SpyState>,
}

#[derive(Default)]
struct SpyState {
    log: Vec<Entry>,
    commit_index: Option<u64>,
    append_called: bool,
    spied_append_data: Option<Bytes>,
    fail_next_append: Option<String>,
    fail_next_subscribe: bool,
    subscribers: HashMap<u64, Vec<CommitNotifier>>,
    all_commit_subscribers: Vec<CommitStreamSender>,
}

impl JournalSpy {
    pub fn new() -> Self {
        JournalSpy::default()
    }

    pub fn append_called(&self) -> bool {
        self.lock().append_called
    }

    pub fn append_data(&self) -> Option<Bytes> {
        self.lock().spied_append_data.clone()
    }

    pub fn fail_next_append(&self, message: &str) {
        self.lock().fail_next_append = Some(message.to_string());
    }

    pub fn fail_next_notify_of_commit_on_index_once(&self) {
        self.lock().fail_next_subscribe = true;
    }

    pub fn registered_for_notify_on_index(&self, index: u64) -> bool {
        self.lock().subscribers.contains_key(&index)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, SpyState> {
        self.inner.lock().expect("journal spy lock poisoned")
    }
}

#[async_trait::async_trait]
impl Journal for JournalSpy {
    async fn append(&self, payload: Bytes) -> Result<u64, JournalError> {
        let mut state = self.lock();

        if let Some(message) = state.fail_next_append.take() {
            return Err(JournalError::Injected(message));
        }

        state.append_called = true;
        state.spied_append_data = Some(payload.clone());
        state.log.push(Entry::new(payload));

        Ok((state.log.len() - 1) as u64)
    }

    async fn commit(&self, index: u64) -> Result<(), JournalError> {
        let mut state = self.lock();
        state.commit_index = Some(index);

        let due: Vec<u64> = state
            .subscribers
            .keys()
            .copied()
            .filter(|target| *target <= index)
            .collect();
        for target in due {
            if let Some(notifiers) = state.subscribers.remove(&target) {
                for notifier in notifiers {
                    let _ = notifier.send(true);
                }
            }
        }

        state
            .all_commit_subscribers
            .retain(|subscriber| subscriber.send(index).is_ok());

        Ok(())
    }

    fn get_head(&self) -> Result<Entry, JournalError> {
        self.lock().log.last().cloned().ok_or(JournalError::EmptyLog)
    }

    async fn notify_of_commit_on_index_once(
        &self,
        index: u64,
        notifier: CommitNotifier,
    ) -> Result<(), JournalError> {
        let mut state = self.lock();

        if state.fail_next_subscribe {
            state.fail_next_subscribe = false;
            return Err(JournalError::Injected(
                "failing notify_of_commit_on_index_once for test purposes".to_string(),
            ));
        }

        state.subscribers.entry(index).or_default().push(notifier);
        Ok(())
    }

    async fn notify_of_all_commit_changes(&self, subscriber: CommitStreamSender) {
        self.lock().all_commit_subscribers.push(subscriber);
    }

    fn get_all_committed_entries(&self) -> JournalIterator {
        let state = self.lock();

        match state.commit_index {
            Some(committed) => {
                JournalIterator::new(state.log[..=committed as usize].to_vec())
            }
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

        let state = self.lock();
        if end as usize >= state.log.len() {
            return Err(JournalError::IndexOutOfBounds);
        }

        Ok(JournalIterator::new(
            state.log[begin as usize..=end as usize].to_vec(),
        ))
    }

    async fn get_all_uncommitted_entries(&self) -> UncommittedEntriesReport {
        let state = self.lock();
        let head_index = state.log.len().checked_sub(1).map(|i| i as u64);

        let uncommitted: Vec<Entry> = match (head_index, state.commit_index) {
            (None, _) => Vec::new(),
            (Some(head), None) => state.log[..=head as usize].to_vec(),
            (Some(head), Some(committed)) if committed < head => {
                state.log[(committed + 1) as usize..=head as usize].to_vec()
            }
            (Some(_), Some(_)) => Vec::new(),
        };

        UncommittedEntriesReport {
            has_uncommitted: !uncommitted.is_empty(),
            entries: JournalIterator::new(uncommitted),
            commit_index: state.commit_index,
            head_index,
        }
    }
}
