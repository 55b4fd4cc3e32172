// Copyright (c) Argument Computer Corporation
// SPDX-License-Identifier: Apache-2.0

//! In-process Beacon Nodes answering every request with a canned response.

use axum::body::{Body, Bytes};
use axum::extract::State;
use axum::http::{HeaderMap, Method, Uri};
use axum::response::Response;
use axum::{Json, Router};
use ethereum_beacon_core::types::blob::{
    Blob, BlobSidecar, BYTES_PER_BLOB, KZG_BYTES_LEN, KZG_COMMITMENT_INCLUSION_PROOF_DEPTH,
};
use ethereum_beacon_core::types::block::{BeaconBlockHeader, SignedBeaconBlockHeader};
use ethereum_beacon_core::types::{BLS_SIGNATURE_LEN, BYTES_32_LEN};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

#[derive(Debug, Clone)]
pub(crate) struct MockResponse {
    status: u16,
    headers: Vec<(&'static str, String)>,
    body: Vec<u8>,
    delay: Duration,
}

impl MockResponse {
    /// A response with the given status, no header and no body.
    pub(crate) fn empty(status: u16) -> Self {
        Self {
            status,
            headers: vec![],
            body: vec![],
            delay: Duration::ZERO,
        }
    }

    pub(crate) fn json(body: serde_json::Value) -> Self {
        Self::empty(200)
            .with_header("content-type", "application/json")
            .with_body(serde_json::to_vec(&body).unwrap())
    }

    pub(crate) fn ssz(body: Vec<u8>, version: &str) -> Self {
        Self::empty(200)
            .with_header("content-type", "application/octet-stream")
            .with_header("eth-consensus-version", version)
            .with_body(body)
    }

    pub(crate) fn with_status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }

    /// Append a header. Headers set twice are sent twice.
    pub(crate) fn with_header(mut self, name: &'static str, value: &str) -> Self {
        self.headers.push((name, value.to_string()));
        self
    }

    pub(crate) fn with_body(mut self, body: Vec<u8>) -> Self {
        self.body = body;
        self
    }

    pub(crate) fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

struct MockState {
    response: MockResponse,
    hits: AtomicUsize,
}

/// A Beacon Node listening on a random local port, stopped on drop.
pub(crate) struct MockNode {
    address: String,
    state: Arc<MockState>,
    server: JoinHandle<()>,
}

impl MockNode {
    /// Start a node answering every request with `response`.
    pub(crate) async fn serve(response: MockResponse) -> Self {
        let state = Arc::new(MockState {
            response,
            hits: AtomicUsize::new(0),
        });
        let router = Router::new()
            .fallback(respond)
            .with_state(Arc::clone(&state));

        Self::start(router, state).await
    }

    /// Start a node answering every request with a JSON description of the request.
    pub(crate) async fn echo() -> Self {
        let state = Arc::new(MockState {
            response: MockResponse::empty(200),
            hits: AtomicUsize::new(0),
        });
        let router = Router::new().fallback(echo).with_state(Arc::clone(&state));

        Self::start(router, state).await
    }

    async fn start(router: Router, state: Arc<MockState>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = format!("http://{}", listener.local_addr().unwrap());
        let server = tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        Self {
            address,
            state,
            server,
        }
    }

    pub(crate) fn address(&self) -> &str {
        &self.address
    }

    /// Number of requests received.
    pub(crate) fn hits(&self) -> usize {
        self.state.hits.load(Ordering::SeqCst)
    }
}

impl Drop for MockNode {
    fn drop(&mut self) {
        self.server.abort();
    }
}

async fn respond(State(state): State<Arc<MockState>>) -> Response {
    state.hits.fetch_add(1, Ordering::SeqCst);
    tokio::time::sleep(state.response.delay).await;

    let mut builder = Response::builder().status(state.response.status);
    for (name, value) in &state.response.headers {
        builder = builder.header(*name, value.as_str());
    }

    builder
        .body(Body::from(state.response.body.clone()))
        .unwrap()
}

async fn echo(
    State(state): State<Arc<MockState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Json<serde_json::Value> {
    state.hits.fetch_add(1, Ordering::SeqCst);
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(String::from)
    };

    Json(serde_json::json!({
        "method": method.as_str(),
        "path": uri.path(),
        "accept": header("accept"),
        "content-type": header("content-type"),
        "user-agent": header("user-agent"),
        "x-api-key": header("x-api-key"),
        "body": String::from_utf8_lossy(&body),
    }))
}

/// Address of a local port nothing listens on.
pub(crate) async fn unreachable_address() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    address
}

pub(crate) fn sample_blob_sidecar(index: u64) -> BlobSidecar {
    let blob_bytes = (0..BYTES_PER_BLOB)
        .map(|i| (i as u64 + index) as u8)
        .collect::<Vec<_>>();
    let mut inclusion_proof = [[0; BYTES_32_LEN]; KZG_COMMITMENT_INCLUSION_PROOF_DEPTH];
    for (i, node) in inclusion_proof.iter_mut().enumerate() {
        *node = [i as u8; BYTES_32_LEN];
    }

    BlobSidecar::new(
        index,
        Blob::from_slice(&blob_bytes).unwrap(),
        [4; KZG_BYTES_LEN],
        [5; KZG_BYTES_LEN],
        SignedBeaconBlockHeader::new(
            BeaconBlockHeader::new(1, 2, [1; 32], [2; 32], [3; 32]),
            [7; BLS_SIGNATURE_LEN],
        ),
        inclusion_proof,
    )
}
