use crate::journal::{ArrayJournal, Journal, JournalSpy};
use crate::policy::{ClientPolicy, Persister};
use crate::replication::{Config, LocalReplicator, Replicator, ReplicatorSpy, SleepTimer};
use crate::server::{RpcServer, RpcServerShutdownSignal};
use crate::state::{MapStateMachine, Renderer, RendererError, StateMachineSpy};
use std::env;
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;

const JOURNAL_TYPE_ENV_VAR: &str = "JOURNAL_TYPE";
const REPLICATOR_TYPE_ENV_VAR: &str = "REPLICATOR_TYPE";
const STATE_MACHINE_TYPE_ENV_VAR: &str = "STATE_MACHINE_TYPE";

const SPY_TYPE: &str = "SPY";

#[derive(Debug, thiserror::Error)]
pub enum BootstrapError {
    #[error("journal type '{0}' specified in the environment is not supported")]
    InvalidJournalType(String),

    #[error("state machine type '{0}' specified in the environment is not supported")]
    InvalidStateMachineType(String),

    #[error("replicator type '{0}' specified in the environment is not supported")]
    InvalidReplicatorType(String),

    #[error("state machine failed to start")]
    RendererStartup(#[source] RendererError),
}

/// Bootstrap wires the process-wide singletons: journal, state machine,
/// replicator, client policy, and the RPC server in front of them.
pub struct Bootstrap {
    logger: slog::Logger,
    state_machine: Arc<dyn Renderer>,
    replicator: Arc<dyn Replicator>,
    client_policy: Arc<dyn Persister>,
}

impl std::fmt::Debug for Bootstrap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bootstrap").finish_non_exhaustive()
    }
}

impl Bootstrap {
    /// Resolves the configured implementation of each component from the
    /// environment and wires them together. Nothing is started; `start`
    /// brings the components up in the required order.
    pub fn init(logger: slog::Logger) -> Result<Self, BootstrapError> {
        let journal = resolve_journal_impl(&logger)?;
        let state_machine = resolve_state_machine_impl(&logger, &journal)?;
        let replicator = resolve_replicator_impl(&logger, &journal)?;

        let client_policy: Arc<dyn Persister> = Arc::new(ClientPolicy::new(
            logger.clone(),
            journal,
            Arc::clone(&state_machine),
        ));

        Ok(Bootstrap {
            logger,
            state_machine,
            replicator,
            client_policy,
        })
    }

    /// Starts the state machine, then the replicator, then serves the client
    /// API on `port` until `shutdown_signal` resolves. A state machine that
    /// fails to start aborts the whole startup.
    pub async fn start(
        self,
        port: u32,
        shutdown_signal: RpcServerShutdownSignal,
    ) -> Result<(), BootstrapError> {
        self.state_machine
            .start()
            .await
            .map_err(BootstrapError::RendererStartup)?;

        self.replicator.start(Arc::new(SleepTimer));

        let socket_addr = SocketAddr::from((Ipv4Addr::LOCALHOST, port as u16));
        let server = RpcServer::new(self.logger.clone(), self.client_policy);
        server.run(socket_addr, shutdown_signal).await;

        Ok(())
    }
}

fn resolve_journal_impl(logger: &slog::Logger) -> Result<Arc<dyn Journal>, BootstrapError> {
    match env::var(JOURNAL_TYPE_ENV_VAR) {
        Err(_) => Ok(Arc::new(ArrayJournal::spawn(logger.clone()))),
        Ok(journal_type) if journal_type == SPY_TYPE => Ok(Arc::new(JournalSpy::new())),
        Ok(journal_type) => {
            slog::error!(logger, "Unknown journal type '{}'", journal_type);
            Err(BootstrapError::InvalidJournalType(journal_type))
        }
    }
}

fn resolve_state_machine_impl(
    logger: &slog::Logger,
    journal: &Arc<dyn Journal>,
) -> Result<Arc<dyn Renderer>, BootstrapError> {
    match env::var(STATE_MACHINE_TYPE_ENV_VAR) {
        Err(_) => Ok(Arc::new(MapStateMachine::new(
            logger.clone(),
            Arc::clone(journal),
        ))),
        Ok(state_machine_type) if state_machine_type == SPY_TYPE => {
            Ok(Arc::new(StateMachineSpy::new(Arc::clone(journal))))
        }
        Ok(state_machine_type) => {
            slog::error!(logger, "Unknown state machine type '{}'", state_machine_type);
            Err(BootstrapError::InvalidStateMachineType(state_machine_type))
        }
    }
}

fn resolve_replicator_impl(
    logger: &slog::Logger,
    journal: &Arc<dyn Journal>,
) -> Result<Arc<dyn Replicator>, BootstrapError> {
    match env::var(REPLICATOR_TYPE_ENV_VAR) {
        Err(_) => Ok(Arc::new(LocalReplicator::new(
            logger.clone(),
            Arc::clone(journal),
            Config::default(),
        ))),
        Ok(replicator_type) if replicator_type == SPY_TYPE => {
            Ok(Arc::new(ReplicatorSpy::new(Arc::clone(journal))))
        }
        Ok(replicator_type) => {
            slog::error!(logger, "Unknown replicator type '{}'", replicator_type);
            Err(BootstrapError::InvalidReplicatorType(replicator_type))
        }
    }
}
