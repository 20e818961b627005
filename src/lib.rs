mod bootstrap;
mod environment;
mod journal;
mod policy;
mod replication;
mod server;
mod state;

// Wire types generated by build.rs; public so out-of-process clients built on
// this crate can talk to the server.
pub mod grpc {
    include!("../generated/kvstore.rs");
}

pub use bootstrap::Bootstrap;
pub use bootstrap::BootstrapError;
pub use environment::resolve_port;
pub use environment::PortError;
pub use journal::ArrayJournal;
pub use journal::CommitNotifier;
pub use journal::CommitStreamSender;
pub use journal::Entry;
pub use journal::Journal;
pub use journal::JournalError;
pub use journal::JournalIterator;
pub use journal::JournalSpy;
pub use journal::UncommittedEntriesReport;
pub use policy::ClientPolicy;
pub use policy::CommitListener;
pub use policy::Persister;
pub use policy::PolicyError;
pub use replication::Config;
pub use replication::LocalReplicator;
pub use replication::Replicator;
pub use replication::ReplicatorSpy;
pub use replication::SleepTimer;
pub use replication::Timer;
pub use replication::TimerSpy;
pub use server::shutdown_signal;
pub use server::RpcServer;
pub use server::RpcServerShutdownHandle;
pub use server::RpcServerShutdownSignal;
pub use state::KeyRecord;
pub use state::KeyValItem;
pub use state::MapStateMachine;
pub use state::Renderer;
pub use state::RendererError;
pub use state::StateMachineSpy;
