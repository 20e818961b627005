mod grpc;
mod shutdown;

pub use grpc::RpcServer;
pub use shutdown::shutdown_signal;
pub use shutdown::RpcServerShutdownHandle;
pub use shutdown::RpcServerShutdownSignal;
