use crate::grpc::grpc_persister_server::{GrpcPersister, GrpcPersisterServer};
use crate::grpc::{
    ProtoClientStatus, ProtoEmpty, ProtoGetItemResponse, ProtoHealthResponse, ProtoHealthStatus,
    ProtoItem, ProtoPutItemResponse, ProtoReplicationStatus, ProtoRetryable,
};
use crate::policy::{Persister, PolicyError};
use crate::server::RpcServerShutdownSignal;
use bytes::Bytes;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio_stream::wrappers::TcpListenerStream;
use tonic::transport::Server;
use tonic::{Request, Response, Status};

/// RpcServer serves the client API over gRPC, translating between the wire
/// shapes and the client policy.
pub struct RpcServer {
    logger: slog::Logger,
    policy: Arc<dyn Persister>,
}

impl RpcServer {
    pub fn new(logger: slog::Logger, policy: Arc<dyn Persister>) -> Self {
        RpcServer { logger, policy }
    }

    pub async fn run(self, socket_addr: SocketAddr, shutdown_signal: RpcServerShutdownSignal) {
        let logger = self.logger.clone();
        slog::info!(logger, "Client API server listening on '{:?}'", socket_addr);

        let result = Server::builder()
            .add_service(GrpcPersisterServer::new(self))
            .serve_with_shutdown(socket_addr, shutdown_signal)
            .await;

        slog::info!(logger, "Server run() has exited: {:?}", result);
    }

    /// Serves from an already-bound listener. Lets callers bind to port 0 and
    /// discover the assigned port before the server starts.
    pub async fn run_with_incoming(
        self,
        listener: tokio::net::TcpListener,
        shutdown_signal: RpcServerShutdownSignal,
    ) {
        let logger = self.logger.clone();

        let result = Server::builder()
            .add_service(GrpcPersisterServer::new(self))
            .serve_with_incoming_shutdown(TcpListenerStream::new(listener), shutdown_signal)
            .await;

        slog::info!(logger, "Server run() has exited: {:?}", result);
    }
}

#[tonic::async_trait]
impl GrpcPersister for RpcServer {
    async fn put_item(
        &self,
        request: Request<ProtoItem>,
    ) -> Result<Response<ProtoPutItemResponse>, Status> {
        let item = request.into_inner();
        slog::debug!(self.logger, "ServerWire - PutItem, {} payload bytes", item.data.len());

        let (listener, submitted) = self.policy.put(Bytes::from(item.data)).await;

        let response = match submitted {
            Ok(()) => {
                if listener.committed().await {
                    replication_success_response()
                } else {
                    replication_failure_response()
                }
            }
            Err(e) => {
                slog::warn!(self.logger, "PutItem failed before replication: {}", e);
                pre_replication_failure_response(&e)
            }
        };

        Ok(Response::new(response))
    }

    async fn get_item(
        &self,
        request: Request<ProtoItem>,
    ) -> Result<Response<ProtoGetItemResponse>, Status> {
        let item = request.into_inner();
        slog::debug!(self.logger, "ServerWire - GetItem, {} request bytes", item.data.len());

        let response = match self.policy.get(&item.data) {
            Ok(data) => get_success_response(data),
            Err(e) => {
                slog::debug!(self.logger, "GetItem failed: {}", e);
                get_failure_response(&e)
            }
        };

        Ok(Response::new(response))
    }

    async fn health(
        &self,
        _request: Request<ProtoEmpty>,
    ) -> Result<Response<ProtoHealthResponse>, Status> {
        Ok(Response::new(ProtoHealthResponse {
            status: ProtoHealthStatus::Ok as i32,
        }))
    }
}

// ------- Response shapes --------

fn replication_success_response() -> ProtoPutItemResponse {
    ProtoPutItemResponse {
        status: ProtoClientStatus::PutOk as i32,
        replication_status: ProtoReplicationStatus::QuorumReached as i32,
        is_retryable: ProtoRetryable::No as i32,
        error_message: String::new(),
    }
}

fn replication_failure_response() -> ProtoPutItemResponse {
    ProtoPutItemResponse {
        status: ProtoClientStatus::PutError as i32,
        replication_status: ProtoReplicationStatus::FailureToReachQuorum as i32,
        is_retryable: ProtoRetryable::Yes as i32,
        error_message: "unable to save data, the operation is safe to retry".to_string(),
    }
}

fn pre_replication_failure_response(error: &PolicyError) -> ProtoPutItemResponse {
    ProtoPutItemResponse {
        status: ProtoClientStatus::PutError as i32,
        replication_status: ProtoReplicationStatus::ReplicationStatusUnset as i32,
        is_retryable: ProtoRetryable::Yes as i32,
        error_message: error.to_string(),
    }
}

fn get_success_response(data: Bytes) -> ProtoGetItemResponse {
    ProtoGetItemResponse {
        item: Some(ProtoItem { data: data.to_vec() }),
        status: ProtoClientStatus::GetOk as i32,
        is_retryable: ProtoRetryable::Yes as i32,
        error_message: String::new(),
    }
}

fn get_failure_response(error: &PolicyError) -> ProtoGetItemResponse {
    ProtoGetItemResponse {
        item: None,
        status: ProtoClientStatus::GetError as i32,
        is_retryable: ProtoRetryable::Yes as i32,
        error_message: error.to_string(),
    }
}
