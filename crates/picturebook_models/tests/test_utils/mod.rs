//! Test utilities for provider tests.
//!
//! [`StubServer`] is a minimal HTTP/1.1 server on a loopback port. Each path
//! serves a list of canned responses in order; the last one repeats.

#![allow(dead_code)]

use picturebook_config::{
    EspeakConfig, FreepikConfig, HuggingFaceConfig, ReplicateConfig, SpeechConfig, TextConfig,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

/// One canned response.
#[derive(Debug, Clone)]
pub struct StubResponse {
    pub status: u16,
    pub content_type: &'static str,
    pub body: Vec<u8>,
    pub delay: Option<Duration>,
}

impl StubResponse {
    pub fn json(status: u16, body: serde_json::Value) -> Self {
        Self {
            status,
            content_type: "application/json",
            body: body.to_string().into_bytes(),
            delay: None,
        }
    }

    pub fn bytes(content_type: &'static str, body: Vec<u8>) -> Self {
        Self {
            status: 200,
            content_type,
            body,
            delay: None,
        }
    }

    pub fn text(status: u16, body: &str) -> Self {
        Self {
            status,
            content_type: "text/plain",
            body: body.as_bytes().to_vec(),
            delay: None,
        }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

/// A request as the stub saw it.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    /// Header block, lowercased
    pub head: String,
    pub body: Vec<u8>,
}

impl RecordedRequest {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).unwrap_or(serde_json::Value::Null)
    }
}

#[derive(Default)]
struct State {
    routes: HashMap<String, (Vec<StubResponse>, usize)>,
    requests: Vec<RecordedRequest>,
}

/// Loopback HTTP stub.
#[derive(Clone)]
pub struct StubServer {
    base_url: String,
    state: Arc<Mutex<State>>,
}

impl StubServer {
    /// Bind a free port and start serving.
    pub async fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        let state = Arc::new(Mutex::new(State::default()));

        let shared = state.clone();
        tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                let state = shared.clone();
                tokio::spawn(async move {
                    let _ = serve(stream, state).await;
                });
            }
        });

        Self { base_url, state }
    }

    /// Serve `responses` at `path`, in order.
    pub fn route(&self, path: &str, responses: Vec<StubResponse>) -> &Self {
        self.state
            .lock()
            .unwrap()
            .routes
            .insert(path.to_string(), (responses, 0));
        self
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.lock().unwrap().requests.clone()
    }

    pub fn hits(&self, path: &str) -> usize {
        self.requests().iter().filter(|r| r.path == path).count()
    }
}

async fn serve(mut stream: TcpStream, state: Arc<Mutex<State>>) -> std::io::Result<()> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    let head_end = loop {
        let n = stream.read(&mut chunk).await?;
        if n == 0 {
            return Ok(());
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&buf[..head_end]).to_lowercase();
    let content_length = head
        .lines()
        .find_map(|line| line.strip_prefix("content-length:"))
        .and_then(|v| v.trim().parse::<usize>().ok())
        .unwrap_or(0);
    while buf.len() < head_end + content_length {
        let n = stream.read(&mut chunk).await?;
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }

    let request_line = String::from_utf8_lossy(&buf[..head_end])
        .lines()
        .next()
        .unwrap_or_default()
        .to_string();
    let mut parts = request_line.split_whitespace();
    let method = parts.next().unwrap_or_default().to_string();
    let path = parts.next().unwrap_or_default().to_string();

    let response = {
        let mut state = state.lock().unwrap();
        state.requests.push(RecordedRequest {
            method,
            path: path.clone(),
            head,
            body: buf[head_end..].to_vec(),
        });
        match state.routes.get_mut(&path) {
            Some((responses, next)) if !responses.is_empty() => {
                let idx = (*next).min(responses.len() - 1);
                *next += 1;
                responses[idx].clone()
            }
            _ => StubResponse::text(404, "no such route"),
        }
    };

    if let Some(delay) = response.delay {
        tokio::time::sleep(delay).await;
    }

    let header = format!(
        "HTTP/1.1 {} Stub\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        response.status,
        response.content_type,
        response.body.len()
    );
    stream.write_all(header.as_bytes()).await?;
    stream.write_all(&response.body).await?;
    stream.shutdown().await
}

/// A tiny valid PNG.
pub fn png_bytes() -> Vec<u8> {
    let mut out = Vec::new();
    image::RgbImage::from_pixel(4, 3, image::Rgb([200, 100, 50]))
        .write_to(&mut std::io::Cursor::new(&mut out), image::ImageFormat::Png)
        .unwrap();
    out
}

pub fn text_config(server: &StubServer) -> TextConfig {
    TextConfig {
        endpoint: server.url("/api/v1/chat/completions"),
        model: "test-model".to_string(),
        timeout_secs: 5,
        temperature: None,
        max_retries: 0,
        retry_backoff_ms: 1,
    }
}

pub fn speech_config(server: &StubServer) -> SpeechConfig {
    SpeechConfig {
        endpoint: server.url("/api/v1/audio/speech"),
        model: "test-tts".to_string(),
        voice: "af_bella".to_string(),
        timeout_secs: 5,
        fallback: EspeakConfig {
            enabled: false,
            binary: "espeak-ng".to_string(),
            voice: "en-us".to_string(),
            words_per_minute: 150,
            timeout_secs: 5,
        },
    }
}

pub fn replicate_config(server: &StubServer) -> ReplicateConfig {
    ReplicateConfig {
        endpoint: server.url("/v1/models/test/flux/predictions"),
        predictions_url: server.url("/v1/predictions"),
        timeout_secs: 5,
        poll_interval_ms: 10,
        max_polls: 5,
        num_inference_steps: 28,
        guidance_scale: 3.5,
    }
}

pub fn freepik_config(server: &StubServer) -> FreepikConfig {
    FreepikConfig {
        endpoint: server.url("/v1/ai/text-to-image"),
        timeout_secs: 5,
        style: Some("cartoon".to_string()),
    }
}

pub fn huggingface_config(server: &StubServer) -> HuggingFaceConfig {
    HuggingFaceConfig {
        endpoint: server.url("/models/sdxl"),
        timeout_secs: 5,
    }
}
