//! Acceptance coverage over the gRPC client API, against a fully wired store
//! running in-process.

use raft_kv::grpc::grpc_persister_client::GrpcPersisterClient;
use raft_kv::grpc::{
    ProtoClientStatus, ProtoEmpty, ProtoHealthStatus, ProtoItem, ProtoReplicationStatus,
    ProtoRetryable,
};
use raft_kv::{
    shutdown_signal, ArrayJournal, ClientPolicy, Config, Journal, KeyRecord, KeyValItem,
    LocalReplicator, MapStateMachine, Renderer, Replicator, RpcServer, RpcServerShutdownHandle,
    SleepTimer,
};
use std::sync::Arc;
use tokio::time::{sleep, timeout, Duration};
use tonic::transport::Channel;

fn discard_logger() -> slog::Logger {
    slog::Logger::root(slog::Discard, slog::o!())
}

/// Brings up the whole store on an ephemeral localhost port and returns a
/// connected client. The shutdown handle stops the server when dropped.
async fn connected_client() -> (GrpcPersisterClient<Channel>, RpcServerShutdownHandle) {
    let logger = discard_logger();

    let journal: Arc<dyn Journal> = Arc::new(ArrayJournal::spawn(logger.clone()));

    let state_machine = Arc::new(MapStateMachine::new(logger.clone(), Arc::clone(&journal)));
    state_machine.start().await.unwrap();

    let replicator = LocalReplicator::new(
        logger.clone(),
        Arc::clone(&journal),
        Config {
            journal_poll_period_ms: 10,
        },
    );
    replicator.start(Arc::new(SleepTimer));

    let policy = Arc::new(ClientPolicy::new(
        logger.clone(),
        journal,
        state_machine as Arc<dyn Renderer>,
    ));
    let server = RpcServer::new(logger, policy);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let endpoint = format!("http://{}", listener.local_addr().unwrap());
    let (shutdown_handle, shutdown) = shutdown_signal();
    tokio::spawn(server.run_with_incoming(listener, shutdown));

    let client = GrpcPersisterClient::connect(endpoint).await.unwrap();
    (client, shutdown_handle)
}

fn kv_item(key: &str, data: &[u8]) -> ProtoItem {
    let item = KeyValItem {
        key: key.to_string(),
        data: data.to_vec(),
    };
    ProtoItem {
        data: serde_json::to_vec(&item).unwrap(),
    }
}

fn key_item(key: &str) -> ProtoItem {
    ProtoItem {
        data: serde_json::to_vec(&KeyRecord { key: key.to_string() }).unwrap(),
    }
}

/// The renderer applies commits asynchronously; retry the Get until it
/// resolves or the deadline passes.
async fn get_eventually(client: &mut GrpcPersisterClient<Channel>, key: &str) -> Vec<u8> {
    timeout(Duration::from_secs(2), async {
        loop {
            let response = client.get_item(key_item(key)).await.unwrap().into_inner();
            if response.status == ProtoClientStatus::GetOk as i32 {
                return response.item.unwrap().data;
            }
            sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .expect("the stored item never became retrievable")
}

#[tokio::test]
async fn an_item_that_is_put_can_be_retrieved() {
    let (mut client, _shutdown) = connected_client().await;

    let put = client
        .put_item(kv_item("af159-ef7ff", b"42"))
        .await
        .unwrap()
        .into_inner();

    assert_eq!(ProtoClientStatus::PutOk as i32, put.status);
    assert_eq!(
        ProtoReplicationStatus::QuorumReached as i32,
        put.replication_status
    );
    assert_eq!(ProtoRetryable::No as i32, put.is_retryable);

    assert_eq!(b"42".to_vec(), get_eventually(&mut client, "af159-ef7ff").await);
}

#[tokio::test]
async fn the_latest_put_for_a_key_is_retrieved() {
    let (mut client, _shutdown) = connected_client().await;

    client.put_item(kv_item("k", b"a")).await.unwrap();
    client.put_item(kv_item("k", b"b")).await.unwrap();

    timeout(Duration::from_secs(2), async {
        loop {
            let response = client.get_item(key_item("k")).await.unwrap().into_inner();
            if response.status == ProtoClientStatus::GetOk as i32
                && response.item.as_ref().unwrap().data == b"b".to_vec()
            {
                return;
            }
            sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .expect("the latest value was never retrievable");
}

#[tokio::test]
async fn getting_an_unknown_key_is_a_retryable_error() {
    let (mut client, _shutdown) = connected_client().await;

    let response = client
        .get_item(key_item("never-stored"))
        .await
        .unwrap()
        .into_inner();

    assert_eq!(ProtoClientStatus::GetError as i32, response.status);
    assert_eq!(ProtoRetryable::Yes as i32, response.is_retryable);
    assert!(response.item.is_none());
    assert!(!response.error_message.is_empty());
}

#[tokio::test]
async fn getting_with_a_malformed_request_is_an_error() {
    let (mut client, _shutdown) = connected_client().await;

    let response = client
        .get_item(ProtoItem {
            data: b"this is not a key record".to_vec(),
        })
        .await
        .unwrap()
        .into_inner();

    assert_eq!(ProtoClientStatus::GetError as i32, response.status);
}

#[tokio::test]
async fn health_reports_ok() {
    let (mut client, _shutdown) = connected_client().await;

    let response = client.health(ProtoEmpty {}).await.unwrap().into_inner();

    assert_eq!(ProtoHealthStatus::Ok as i32, response.status);
}
