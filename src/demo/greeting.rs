//! Greeting and echo handlers.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::binding::RequestContext;
use crate::error::HandlerError;
use crate::handler::{Composite, Content, Handler, JsonReply};
use crate::lifecycle::Cancellation;

/// Empty request for handlers that need no input.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct Nothing {}

impl Composite for Nothing {}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hello {
    pub hello: String,
}

impl JsonReply for Hello {}

/// `GET /hello`: answers `{"hello":"world"}` whatever it is sent.
pub struct HelloWorld;

#[async_trait]
impl Handler for HelloWorld {
    type Request = Option<Nothing>;
    type Response = Hello;

    async fn handle(
        &self,
        _request: Option<Nothing>,
        _cancellation: Cancellation,
    ) -> Result<Option<Hello>, HandlerError> {
        Ok(Some(Hello {
            hello: "world".to_string(),
        }))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TestRequest {
    pub id: Uuid,
    pub text: Option<String>,
}

impl Composite for TestRequest {}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestResponse {
    pub id: Uuid,
    pub text: String,
}

impl JsonReply for TestResponse {}

/// `GET /test/{id}`: echoes the id and text, filling in missing text.
///
/// Bound from route values only, so `text` is present only when a route
/// pattern captures it; a `?text=` query parameter is not read.
pub struct TestHandler;

pub const EMPTY_TEXT: &str = "Empty string";

#[async_trait]
impl Handler for TestHandler {
    type Request = TestRequest;
    type Response = TestResponse;

    async fn handle(
        &self,
        request: TestRequest,
        _cancellation: Cancellation,
    ) -> Result<Option<TestResponse>, HandlerError> {
        tokio::task::yield_now().await;
        Ok(Some(TestResponse {
            id: request.id,
            text: request.text.unwrap_or_else(|| EMPTY_TEXT.to_string()),
        }))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Echo {
    pub id: String,
    pub text: String,
}

impl Composite for Echo {}

impl JsonReply for Echo {}

/// `GET /bam`: returns the query's `id` and `text` unchanged.
pub struct EchoHandler;

#[async_trait]
impl Handler for EchoHandler {
    type Request = Echo;
    type Response = Echo;

    async fn handle(&self, request: Echo, _cancellation: Cancellation) -> Result<Option<Echo>, HandlerError> {
        tracing::info!(id = %request.id, text = %request.text, "Echoing request");
        Ok(Some(request))
    }
}

pub const HOME_TEXT: &str = "Hello world!";

/// `GET /`: reads the raw request and answers in plain text.
pub struct HomeHandler;

#[async_trait]
impl Handler for HomeHandler {
    type Request = RequestContext;
    type Response = Content;

    async fn handle(
        &self,
        request: RequestContext,
        _cancellation: Cancellation,
    ) -> Result<Option<Content>, HandlerError> {
        tracing::debug!(method = %request.method(), path = request.path(), "Serving home");
        Ok(Some(Content::text(HOME_TEXT)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Method;

    #[tokio::test]
    async fn test_hello_world_ignores_input() {
        let response = HelloWorld.handle(None, Cancellation::none()).await.unwrap();
        assert_eq!(response.unwrap().hello, "world");
    }

    #[tokio::test]
    async fn test_missing_text_gets_placeholder() {
        let id = Uuid::new_v4();
        let response = TestHandler
            .handle(TestRequest { id, text: None }, Cancellation::none())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(response, TestResponse { id, text: EMPTY_TEXT.to_string() });
    }

    #[tokio::test]
    async fn test_home_answers_plain_text() {
        let ctx = RequestContext::new(Method::GET, "/");
        let content = HomeHandler.handle(ctx, Cancellation::none()).await.unwrap().unwrap();
        assert_eq!(content, Content::text(HOME_TEXT));
    }
}
