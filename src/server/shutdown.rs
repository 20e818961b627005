use std::future::Future;
use std::pin::Pin;
use std::task::{ready, Context, Poll};
use tokio::sync::oneshot;

/// Paired handle and signal for stopping the RPC server. Dropping (or firing)
/// the handle resolves the signal, which the server uses as its
/// graceful-shutdown future.
pub fn shutdown_signal() -> (RpcServerShutdownHandle, RpcServerShutdownSignal) {
    let (tx, rx) = oneshot::channel();

    (RpcServerShutdownHandle { _tx: tx }, RpcServerShutdownSignal { rx })
}

pub struct RpcServerShutdownHandle {
    _tx: oneshot::Sender<()>,
}

pub struct RpcServerShutdownSignal {
    rx: oneshot::Receiver<()>,
}

impl Future for RpcServerShutdownSignal {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let rx = Pin::new(&mut self.rx);
        // Sent value and dropped sender both mean "stop".
        let _ = ready!(rx.poll(cx));
        Poll::Ready(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn dropping_the_handle_resolves_the_signal() {
        let (handle, signal) = shutdown_signal();

        drop(handle);

        signal.await;
    }
}
