mod client;

pub use client::ClientPolicy;
pub use client::CommitListener;
pub use client::Persister;
pub use client::PolicyError;
