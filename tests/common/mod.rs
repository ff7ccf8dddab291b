#![allow(dead_code)]

use anyhow::Context;
use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use portfolio_page::contact::{FormData, FormRelay};
use portfolio_page::error::{PortfolioError, Result};
use portfolio_page::github::RepoSource;
use portfolio_page::Repository;
use reqwest::StatusCode;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

pub fn repo(name: &str) -> Repository {
    Repository {
        name: name.to_string(),
        html_url: format!("https://github.com/someone/{}", name),
        ..Default::default()
    }
}

pub fn repo_with_stars(name: &str, stars: u64) -> Repository {
    Repository {
        stargazers_count: stars,
        ..repo(name)
    }
}

pub fn repo_updated(name: &str, year: i32, month: u32, day: u32) -> Repository {
    Repository {
        updated_at: Some(Utc.with_ymd_and_hms(year, month, day, 12, 0, 0).unwrap()),
        ..repo(name)
    }
}

/// A small mixed list: visible repos plus a fork and an archived one.
pub fn sample_repos() -> Vec<Repository> {
    vec![
        Repository {
            description: Some("Personal site built with React".to_string()),
            language: Some("JavaScript".to_string()),
            stargazers_count: 3,
            homepage: Some("https://someone.dev".to_string()),
            ..repo_updated("portfolio", 2024, 5, 1)
        },
        Repository {
            description: Some("Command-line task tracker".to_string()),
            language: Some("Rust".to_string()),
            stargazers_count: 42,
            ..repo_updated("tasks", 2023, 1, 15)
        },
        Repository {
            language: Some("react".to_string()),
            stargazers_count: 8,
            ..repo_updated("Widgets", 2024, 9, 30)
        },
        Repository {
            fork: true,
            stargazers_count: 1000,
            ..repo_updated("forked-lib", 2024, 12, 1)
        },
        Repository {
            archived: true,
            description: Some("Old React experiments".to_string()),
            ..repo_updated("attic", 2020, 2, 2)
        },
        repo("no-date"),
    ]
}

/// Repository source returning a fixed list or a fixed HTTP status.
#[derive(Clone)]
pub struct FakeSource {
    response: std::result::Result<Vec<Repository>, u16>,
    pub calls: Arc<AtomicUsize>,
}

impl FakeSource {
    pub fn ok(repos: Vec<Repository>) -> Self {
        Self {
            response: Ok(repos),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn status(code: u16) -> Self {
        Self {
            response: Err(code),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RepoSource for FakeSource {
    async fn list_user_repos(&self, _username: &str) -> Result<Vec<Repository>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.response {
            Ok(repos) => Ok(repos.clone()),
            Err(code) => Err(PortfolioError::ApiError(
                StatusCode::from_u16(*code).expect("valid status code"),
            )),
        }
    }
}

/// How a [`FakeRelay`] answers.
#[derive(Clone, Copy)]
pub enum RelayReply {
    Status(u16),
    ConnectionRefused,
}

/// Form relay that records what it was asked to send.
#[derive(Clone)]
pub struct FakeRelay {
    reply: RelayReply,
    pub calls: Arc<AtomicUsize>,
    pub last: Arc<Mutex<Option<(String, FormData)>>>,
}

impl FakeRelay {
    pub fn new(reply: RelayReply) -> Self {
        Self {
            reply,
            calls: Arc::new(AtomicUsize::new(0)),
            last: Arc::new(Mutex::new(None)),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_sent(&self) -> Option<(String, FormData)> {
        self.last.lock().unwrap().clone()
    }
}

#[async_trait]
impl FormRelay for FakeRelay {
    async fn send(&self, endpoint: &str, data: &FormData) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last.lock().unwrap() = Some((endpoint.to_string(), data.clone()));
        match self.reply {
            RelayReply::Status(code) if (200..300).contains(&code) => Ok(()),
            RelayReply::Status(code) => Err(PortfolioError::RelayError(
                StatusCode::from_u16(code).expect("valid status code"),
            )),
            RelayReply::ConnectionRefused => Err(PortfolioError::IoError(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                "connection refused",
            ))),
        }
    }
}

/// reqwest client that talks to the local test server directly.
pub fn local_client() -> reqwest::Client {
    reqwest::Client::builder()
        .user_agent(portfolio_page::github::GitHubClient::user_agent())
        .no_proxy()
        .build()
        .expect("Failed to build client")
}

/// Serves exactly one HTTP response on a random local port.
///
/// Returns the base URL and a handle resolving to the raw request text.
pub async fn serve_once(
    status_line: &str,
    body: &str,
) -> anyhow::Result<(String, JoinHandle<String>)> {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .context("Failed to bind test listener")?;
    let addr = listener
        .local_addr()
        .context("Failed to read local address")?;
    let response = format!(
        "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status_line,
        body.len(),
        body
    );

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.expect("Failed to accept");
        let request = read_request(&mut socket).await;
        socket
            .write_all(response.as_bytes())
            .await
            .expect("Failed to write response");
        let _ = socket.shutdown().await;
        request
    });

    Ok((format!("http://{}", addr), handle))
}

async fn read_request(socket: &mut tokio::net::TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    loop {
        let n = socket.read(&mut chunk).await.expect("Failed to read request");
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);

        if let Some(end) = find_header_end(&buf) {
            let head = String::from_utf8_lossy(&buf[..end]).to_lowercase();
            let body_len = head
                .lines()
                .find_map(|line| line.strip_prefix("content-length:"))
                .and_then(|v| v.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if buf.len() >= end + 4 + body_len {
                break;
            }
        }
    }

    String::from_utf8_lossy(&buf).into_owned()
}

fn find_header_end(buf: &[u8]) -> Option<usize> {
    buf.windows(4).position(|w| w == b"\r\n\r\n")
}
