use raft_kv::{resolve_port, shutdown_signal, Bootstrap};
use slog::Drain;
use std::error::Error;

const DEFAULT_PORT: u32 = 3434;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let logger = root_logger();

    let port = resolve_port(DEFAULT_PORT)?;
    let bootstrapper = Bootstrap::init(logger.clone())?;

    let (shutdown_handle, shutdown) = shutdown_signal();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            drop(shutdown_handle);
        }
    });

    bootstrapper.start(port, shutdown).await?;

    slog::info!(logger, "Shut down cleanly");
    Ok(())
}

fn root_logger() -> slog::Logger {
    let decorator = slog_term::TermDecorator::new().build();
    let drain = slog_term::FullFormat::new(decorator).build().fuse();
    let drain = slog_async::Async::new(drain).build().fuse();

    slog::Logger::root(drain, slog::o!())
}
