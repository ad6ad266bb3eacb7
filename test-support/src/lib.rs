//! In-process stand-in for the game API.
//!
//! Records every request and answers them in order from a list of scripted
//! replies. Shared by the client and CLI test suites.

use std::collections::VecDeque;
use std::io;
use std::sync::{Arc, Mutex};

use axum::{
    Router,
    body::{Body, Bytes},
    extract::State,
    http::{HeaderMap, Method, StatusCode, Uri, header},
    response::{IntoResponse, Response},
};
use serde_json::Value;
use tokio::{net::TcpListener, task::JoinHandle};

pub const CREDENTIALS: (&str, &str) = ("alice", "secret");
/// `Authorization` header for [`CREDENTIALS`]
pub const BASIC_AUTH: &str = "Basic YWxpY2U6c2VjcmV0";

#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: Method,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub body: String,
}

impl Recorded {
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.body).unwrap()
    }
}

#[derive(Debug, Clone)]
enum ReplyBody {
    Full(String),
    /// Sends a first chunk, then drops the connection
    Broken,
}

#[derive(Debug, Clone)]
pub struct Reply {
    status: StatusCode,
    content_type: &'static str,
    body: ReplyBody,
}

impl Reply {
    pub fn json(status: u16, body: Value) -> Self {
        Self {
            status: StatusCode::from_u16(status).unwrap(),
            content_type: "application/json",
            body: ReplyBody::Full(body.to_string()),
        }
    }

    pub fn text(status: u16, body: &str) -> Self {
        Self {
            status: StatusCode::from_u16(status).unwrap(),
            content_type: "text/plain; charset=utf-8",
            body: ReplyBody::Full(body.to_string()),
        }
    }

    /// A reply whose body fails partway through
    pub fn broken(status: u16) -> Self {
        Self {
            status: StatusCode::from_u16(status).unwrap(),
            content_type: "text/plain; charset=utf-8",
            body: ReplyBody::Broken,
        }
    }
}

#[derive(Clone, Default)]
struct Shared {
    requests: Arc<Mutex<Vec<Recorded>>>,
    replies: Arc<Mutex<VecDeque<Reply>>>,
}

pub struct FakeApi {
    pub base: String,
    shared: Shared,
    handle: JoinHandle<()>,
}

impl FakeApi {
    pub async fn spawn(replies: Vec<Reply>) -> Self {
        let shared = Shared {
            requests: Arc::default(),
            replies: Arc::new(Mutex::new(replies.into())),
        };
        let app = Router::new().fallback(record).with_state(shared.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base: format!("http://{addr}"),
            shared,
            handle,
        }
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.shared.requests.lock().unwrap().clone()
    }
}

impl Drop for FakeApi {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn record(
    State(shared): State<Shared>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> Response {
    let authorization = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    shared.requests.lock().unwrap().push(Recorded {
        method,
        path: uri.path().to_string(),
        query: uri.query().map(str::to_string),
        authorization,
        body,
    });

    let reply = shared
        .replies
        .lock()
        .unwrap()
        .pop_front()
        .unwrap_or_else(|| Reply::text(500, "no reply scripted"));
    let body = match reply.body {
        ReplyBody::Full(body) => Body::from(body),
        ReplyBody::Broken => Body::from_stream(futures_util::stream::iter([
            Ok(Bytes::from_static(b"partial")),
            Err(io::Error::other("connection reset")),
        ])),
    };
    (
        reply.status,
        [(header::CONTENT_TYPE, reply.content_type)],
        body,
    )
        .into_response()
}
