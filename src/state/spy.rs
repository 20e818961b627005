use crate::journal::Journal;
use crate::state::renderer::{Renderer, RendererError};
use bytes::Bytes;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// StateMachineSpy is a renderer test double. It never touches the journal;
/// tests seed it with the exact items they expect to resolve.
pub struct StateMachineSpy {
    _journal: Arc<dyn Journal>,
    rendered_state: Mutex<Vec<Bytes>>,
    start_called: AtomicBool,
}

impl StateMachineSpy {
    pub fn new(journal: Arc<dyn Journal>) -> Self {
        StateMachineSpy {
            _journal: journal,
            rendered_state: Mutex::new(Vec::with_capacity(16)),
            start_called: AtomicBool::new(false),
        }
    }

    pub fn start_called(&self) -> bool {
        self.start_called.load(Ordering::Acquire)
    }

    pub fn add_state_machine_data(&self, item: Bytes) {
        self.rendered_state
            .lock()
            .expect("state machine spy lock poisoned")
            .push(item);
    }
}

#[async_trait::async_trait]
impl Renderer for StateMachineSpy {
    async fn start(&self) -> Result<(), RendererError> {
        self.start_called.store(true, Ordering::Release);
        Ok(())
    }

    /// Resolves a request by exact match against the seeded items.
    fn resolve_request_to_data(&self, request: &[u8]) -> Result<Bytes, RendererError> {
        self.rendered_state
            .lock()
            .expect("state machine spy lock poisoned")
            .iter()
            .find(|stored| stored.as_ref() == request)
            .cloned()
            .ok_or(RendererError::KeyNotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::journal::JournalSpy;

    fn spy() -> StateMachineSpy {
        StateMachineSpy::new(Arc::new(JournalSpy::new()))
    }

    #[tokio::test]
    async fn start_is_recorded() {
        let state_machine = spy();

        state_machine.start().await.unwrap();

        assert!(state_machine.start_called());
    }

    #[tokio::test]
    async fn seeded_items_resolve_and_unknown_items_fail() {
        let state_machine = spy();
        state_machine.add_state_machine_data(Bytes::from_static(b"known"));

        assert_eq!(
            Bytes::from_static(b"known"),
            state_machine.resolve_request_to_data(b"known").unwrap()
        );
        assert!(matches!(
            state_machine.resolve_request_to_data(b"unknown").unwrap_err(),
            RendererError::KeyNotFound
        ));
    }
}
