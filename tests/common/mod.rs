//! Shared test doubles: an in-memory article API and a one-shot HTTP server

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use article_editor::{Article, ArticleApi, EditorError, PublishedArticle, Result};
use async_trait::async_trait;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;

/// A call received by [`RecordingApi`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Get(String),
    Create(Article),
    Update(Article, String),
}

/// In-memory article API that records every call
pub struct RecordingApi {
    calls: Mutex<Vec<Call>>,
    articles: Mutex<HashMap<String, PublishedArticle>>,
    fail: AtomicBool,
    /// When set, `get_article` waits for a permit before answering
    gate: Option<Arc<Semaphore>>,
}

impl RecordingApi {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            articles: Mutex::new(HashMap::new()),
            fail: AtomicBool::new(false),
            gate: None,
        }
    }

    pub fn with_article(self, published: PublishedArticle) -> Self {
        self.articles
            .lock()
            .unwrap()
            .insert(published.slug.clone(), published);
        self
    }

    pub fn failing(self) -> Self {
        self.fail.store(true, Ordering::SeqCst);
        self
    }

    /// Fetches block until a permit is added to the returned semaphore
    pub fn gated(mut self) -> (Self, Arc<Semaphore>) {
        let gate = Arc::new(Semaphore::new(0));
        self.gate = Some(gate.clone());
        (self, gate)
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn check_failure(&self) -> Result<()> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(EditorError::Api {
                status: 500,
                message: "Internal Server Error".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl ArticleApi for RecordingApi {
    async fn get_article(&self, slug: &str) -> Result<PublishedArticle> {
        self.record(Call::Get(slug.to_string()));
        if let Some(gate) = &self.gate {
            let _permit = gate.acquire().await.expect("gate closed");
        }
        self.check_failure()?;
        self.articles
            .lock()
            .unwrap()
            .get(slug)
            .cloned()
            .ok_or_else(|| EditorError::NotFound(slug.to_string()))
    }

    async fn create_article(&self, article: &Article) -> Result<PublishedArticle> {
        self.record(Call::Create(article.clone()));
        self.check_failure()?;
        Ok(PublishedArticle {
            slug: "created-article".to_string(),
            article: article.clone(),
            ..Default::default()
        })
    }

    async fn update_article(&self, article: &Article, slug: &str) -> Result<PublishedArticle> {
        self.record(Call::Update(article.clone(), slug.to_string()));
        self.check_failure()?;
        Ok(PublishedArticle {
            slug: slug.to_string(),
            article: article.clone(),
            ..Default::default()
        })
    }
}

pub fn published(slug: &str, tags: &[&str]) -> PublishedArticle {
    PublishedArticle {
        slug: slug.to_string(),
        article: Article {
            title: "How to train your dragon".to_string(),
            description: "Ever wonder how?".to_string(),
            body: "It takes a Jacobian".to_string(),
            tag_list: tags.iter().map(|t| t.to_string()).collect(),
        },
        ..Default::default()
    }
}

/// A request captured by [`MockServer`]
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub headers: HashMap<String, String>,
    pub body: String,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_ascii_lowercase()).map(String::as_str)
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).expect("request body is not JSON")
    }
}

/// HTTP server answering one canned response per connection, in order
pub struct MockServer {
    pub base_url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    handle: JoinHandle<()>,
}

impl MockServer {
    pub async fn start(responses: Vec<(u16, String)>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let requests = Arc::new(Mutex::new(Vec::new()));

        let recorded = requests.clone();
        let handle = tokio::spawn(async move {
            for (status, body) in responses {
                let Ok((mut stream, _)) = listener.accept().await else {
                    return;
                };
                let Ok(request) = read_request(&mut stream).await else {
                    return;
                };
                recorded.lock().unwrap().push(request);
                let response = format!(
                    "HTTP/1.1 {status} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    reason(status),
                    body.len()
                );
                let _ = stream.write_all(response.as_bytes()).await;
                let _ = stream.shutdown().await;
            }
        });

        Self {
            base_url: format!("http://{addr}/api"),
            requests,
            handle,
        }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl Drop for MockServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        201 => "Created",
        401 => "Unauthorized",
        403 => "Forbidden",
        404 => "Not Found",
        422 => "Unprocessable Entity",
        500 => "Internal Server Error",
        _ => "Unknown",
    }
}

async fn read_request(stream: &mut TcpStream) -> std::io::Result<RecordedRequest> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    let header_end = loop {
        let n = stream.read(&mut chunk).await?;
        if n == 0 {
            return Err(std::io::ErrorKind::UnexpectedEof.into());
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
    let mut lines = head.split("\r\n");
    let mut request_line = lines.next().unwrap_or_default().split_whitespace();
    let method = request_line.next().unwrap_or_default().to_string();
    let path = request_line.next().unwrap_or_default().to_string();

    let headers: HashMap<String, String> = lines
        .filter_map(|line| line.split_once(':'))
        .map(|(name, value)| (name.trim().to_ascii_lowercase(), value.trim().to_string()))
        .collect();

    let content_length: usize = headers
        .get("content-length")
        .and_then(|v| v.parse().ok())
        .unwrap_or(0);

    while buf.len() < header_end + content_length {
        let n = stream.read(&mut chunk).await?;
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }

    let body_end = buf.len().min(header_end + content_length);
    let body = String::from_utf8_lossy(&buf[header_end..body_end]).to_string();

    Ok(RecordedRequest {
        method,
        path,
        headers,
        body,
    })
}
