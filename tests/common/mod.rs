//! Shared handlers and helpers for integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

use endpoint_handler::{Cancellation, Composite, Handler, HandlerError, JsonReply};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lookup {
    pub id: i64,
}

impl Composite for Lookup {}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub id: i64,
    pub name: String,
}

impl Composite for Person {}
impl JsonReply for Person {}

/// Echoes its request and counts invocations.
#[derive(Clone, Default)]
pub struct Recorder {
    pub calls: Arc<AtomicUsize>,
}

impl Recorder {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Handler for Recorder {
    type Request = Person;
    type Response = Person;

    async fn handle(&self, request: Person, _: Cancellation) -> Result<Option<Person>, HandlerError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(Some(request))
    }
}

/// Reports whether it received a value.
pub struct Presence;

#[async_trait]
impl Handler for Presence {
    type Request = Option<Lookup>;
    type Response = bool;

    async fn handle(&self, request: Option<Lookup>, _: Cancellation) -> Result<Option<bool>, HandlerError> {
        Ok(Some(request.is_some()))
    }
}

/// Requires a lookup; echoes the id.
pub struct RequiredLookup;

#[async_trait]
impl Handler for RequiredLookup {
    type Request = Lookup;
    type Response = i64;

    async fn handle(&self, request: Lookup, _: Cancellation) -> Result<Option<i64>, HandlerError> {
        Ok(Some(request.id))
    }
}

/// Bare integer in, doubled out.
pub struct Doubler;

#[async_trait]
impl Handler for Doubler {
    type Request = i64;
    type Response = i64;

    async fn handle(&self, request: i64, _: Cancellation) -> Result<Option<i64>, HandlerError> {
        Ok(Some(request * 2))
    }
}

/// Always returns nothing.
pub struct Silent;

#[async_trait]
impl Handler for Silent {
    type Request = Option<Lookup>;
    type Response = Person;

    async fn handle(&self, _: Option<Lookup>, _: Cancellation) -> Result<Option<Person>, HandlerError> {
        Ok(None)
    }
}

/// Always fails.
pub struct Failing;

#[async_trait]
impl Handler for Failing {
    type Request = Option<Lookup>;
    type Response = Person;

    async fn handle(&self, _: Option<Lookup>, _: Cancellation) -> Result<Option<Person>, HandlerError> {
        Err(HandlerError::new("storage offline"))
    }
}

/// Sleeps far longer than any test waits; only cancellation ends it early.
pub struct Sleeper;

#[async_trait]
impl Handler for Sleeper {
    type Request = Option<Lookup>;
    type Response = bool;

    async fn handle(&self, _: Option<Lookup>, _: Cancellation) -> Result<Option<bool>, HandlerError> {
        tokio::time::sleep(Duration::from_secs(60)).await;
        Ok(Some(true))
    }
}

/// Send a raw HTTP/1.1 request and return the status code and body.
pub async fn send_raw(addr: SocketAddr, request: &str) -> (u16, String) {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream.write_all(request.as_bytes()).await.unwrap();

    let mut raw = Vec::new();
    stream.read_to_end(&mut raw).await.unwrap();
    let text = String::from_utf8_lossy(&raw).into_owned();

    let status = text
        .split_whitespace()
        .nth(1)
        .and_then(|code| code.parse().ok())
        .unwrap_or(0);
    let body = text
        .split_once("\r\n\r\n")
        .map(|(_, body)| body.to_string())
        .unwrap_or_default();
    (status, body)
}

/// `GET path` over a fresh connection that closes after the response.
pub async fn http_get(addr: SocketAddr, path: &str) -> (u16, String) {
    send_raw(
        addr,
        &format!("GET {path} HTTP/1.1\r\nHost: {addr}\r\nConnection: close\r\n\r\n"),
    )
    .await
}
