//! Mock PokeAPI catalog serving the two endpoints the client uses.
//!
//! Listing pages are served in the order they were queued. Detail bodies are
//! registered per pokemon id; an unregistered id or an exhausted listing
//! queue answers 404 like the real catalog does for unknown resources.

#![allow(dead_code)]

use axum::extract::{Path, RawQuery, State};
use axum::http::{header, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use std::collections::{HashMap, VecDeque};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::{oneshot, Mutex};

/// One request the catalog received.
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
}

/// A canned catalog answer.
#[derive(Debug, Clone)]
pub struct MockResponse {
    pub status: StatusCode,
    pub body: String,
    pub delay: Duration,
}

impl MockResponse {
    pub fn json(body: &str) -> Self {
        Self {
            status: StatusCode::OK,
            body: body.to_string(),
            delay: Duration::ZERO,
        }
    }

    pub fn status(status: u16) -> Self {
        Self {
            status: StatusCode::from_u16(status).unwrap(),
            body: String::new(),
            delay: Duration::ZERO,
        }
    }

    pub fn with_delay(mut self, ms: u64) -> Self {
        self.delay = Duration::from_millis(ms);
        self
    }

    async fn serve(self) -> Response {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        (
            self.status,
            [(header::CONTENT_TYPE, "application/json")],
            self.body,
        )
            .into_response()
    }
}

#[derive(Default)]
struct Catalog {
    pages: VecDeque<MockResponse>,
    details: HashMap<u32, MockResponse>,
    requests: Vec<CapturedRequest>,
}

type Shared = Arc<Mutex<Catalog>>;

pub struct MockCatalog {
    pub addr: SocketAddr,
    catalog: Shared,
    stop: Option<oneshot::Sender<()>>,
}

impl MockCatalog {
    pub async fn start() -> Self {
        let catalog = Shared::default();
        let app = Router::new()
            .route("/api/v2/pokemon", get(list_pokemon))
            .route("/api/v2/pokemon/{id}/", get(pokemon_detail))
            .with_state(catalog.clone());

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock catalog");
        let addr = listener.local_addr().unwrap();

        let (stop, stopped) = oneshot::channel::<()>();
        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    let _ = stopped.await;
                })
                .await
                .ok();
        });

        Self {
            addr,
            catalog,
            stop: Some(stop),
        }
    }

    /// Queue the answer for the next `GET /pokemon` request.
    pub async fn serve_listing(&self, response: MockResponse) {
        self.catalog.lock().await.pages.push_back(response);
    }

    /// Answer every `GET /pokemon/{id}/` with `response`.
    pub async fn serve_detail(&self, id: u32, response: MockResponse) {
        self.catalog.lock().await.details.insert(id, response);
    }

    pub async fn captured_requests(&self) -> Vec<CapturedRequest> {
        self.catalog.lock().await.requests.clone()
    }

    /// Base URL in the shape of the real API root (`http://host/api/v2`).
    pub fn base_url(&self) -> String {
        format!("http://{}/api/v2", self.addr)
    }
}

impl Drop for MockCatalog {
    fn drop(&mut self) {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
    }
}

fn capture(catalog: &mut Catalog, path: String, query: Option<String>) {
    catalog.requests.push(CapturedRequest {
        method: Method::GET.to_string(),
        path,
        query,
    });
}

async fn list_pokemon(State(catalog): State<Shared>, RawQuery(query): RawQuery) -> Response {
    let page = {
        let mut catalog = catalog.lock().await;
        capture(&mut catalog, "/api/v2/pokemon".to_string(), query);
        catalog.pages.pop_front()
    };
    match page {
        Some(page) => page.serve().await,
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn pokemon_detail(State(catalog): State<Shared>, Path(id): Path<u32>) -> Response {
    let detail = {
        let mut catalog = catalog.lock().await;
        capture(&mut catalog, format!("/api/v2/pokemon/{}/", id), None);
        catalog.details.get(&id).cloned()
    };
    match detail {
        Some(detail) => detail.serve().await,
        None => StatusCode::NOT_FOUND.into_response(),
    }
}
