use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// A key/value record as it travels through the journal: a JSON object with
/// PascalCase field names.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct KeyValItem {
    pub key: String,
    pub data: Vec<u8>,
}

/// A key-lookup record. Extra fields in the request are ignored, so a full
/// `KeyValItem` is also a valid lookup for its own key.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct KeyRecord {
    pub key: String,
}

#[derive(Debug, thiserror::Error)]
pub enum RendererError {
    #[error("state machine is already running")]
    AlreadyRunning,

    #[error("data in the journal is not a well-formed key/value record")]
    CannotDecodePayload,

    #[error("request is not a well-formed key lookup record")]
    InvalidKeyRequest,

    #[error("key is not associated with any data in the store")]
    KeyNotFound,
}

/// Renderer applies committed journal entries into a queryable state view and
/// answers resolution queries against that view.
#[async_trait::async_trait]
pub trait Renderer: Send + Sync {
    /// Replays already-committed entries into the view, then starts consuming
    /// commit notifications in the background. A payload that fails to decode
    /// during the replay is fatal; a second call fails with `AlreadyRunning`.
    async fn start(&self) -> Result<(), RendererError>;

    /// Resolves a key-lookup request to the most recently applied value for
    /// that key. May race with the consumer task; a read observes a
    /// consistent value for its key.
    fn resolve_request_to_data(&self, request: &[u8]) -> Result<Bytes, RendererError>;
}
