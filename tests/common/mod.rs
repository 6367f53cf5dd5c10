//! Local stand-in for the joke API, shared by the integration tests.

#![allow(dead_code)]

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[derive(Clone)]
struct StubState {
    jokes: Arc<Vec<Value>>,
    hits: Arc<AtomicUsize>,
}

/// A joke API serving a fixed list in a loop on `/jokes/random`.
///
/// `/broken` always answers 500 and `/garbage` answers 200 with a body that
/// is not a joke.
pub struct StubApi {
    pub addr: SocketAddr,
    hits: Arc<AtomicUsize>,
}

impl StubApi {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub fn random_url(&self) -> String {
        self.url("/jokes/random")
    }

    /// Number of `/jokes/random` requests served so far.
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

pub fn api_joke(id: &str) -> Value {
    json!({
        "categories": [],
        "created_at": "2020-01-05 13:42:19.897976",
        "icon_url": "https://api.chucknorris.io/img/avatar/chuck-norris.png",
        "id": id,
        "updated_at": "2020-01-05 13:42:19.897976",
        "url": format!("https://api.chucknorris.io/jokes/{}", id),
        "value": format!("Chuck Norris joke number {}.", id),
    })
}

pub fn jokes(ids: &[&str]) -> Vec<Value> {
    ids.iter().map(|id| api_joke(id)).collect()
}

async fn random_joke(State(state): State<StubState>) -> Json<Value> {
    let n = state.hits.fetch_add(1, Ordering::SeqCst);
    Json(state.jokes[n % state.jokes.len()].clone())
}

/// Start the stub on an ephemeral port in a background thread.
///
/// The thread runs its own runtime, so the stub works for both
/// `#[tokio::test]` and plain `#[test]` callers.
pub fn spawn_stub(jokes: Vec<Value>) -> StubApi {
    assert!(!jokes.is_empty(), "stub needs at least one joke");
    let hits = Arc::new(AtomicUsize::new(0));
    let state = StubState {
        jokes: Arc::new(jokes),
        hits: hits.clone(),
    };

    let (tx, rx) = std::sync::mpsc::channel();
    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async move {
            let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
            tx.send(listener.local_addr().unwrap()).unwrap();

            let app = Router::new()
                .route("/jokes/random", get(random_joke))
                .route(
                    "/broken",
                    get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "upstream down") }),
                )
                .route("/garbage", get(|| async { "definitely not json" }))
                .with_state(state);

            axum::serve(listener, app).await.unwrap();
        });
    });

    let addr = rx.recv().expect("stub server failed to start");
    StubApi { addr, hits }
}
