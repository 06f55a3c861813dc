//! Closure-backed and fixed-response endpoints.

use super::{HttpEndpoint, HttpRequest, HttpResponse};
use crate::errors::EndpointError;
use async_trait::async_trait;
use futures::future::BoxFuture;
use std::fmt::Debug;

/// An endpoint backed by an async function.
///
/// This is the usual way to plug the real transport into the pipeline.
pub struct FnEndpoint<F>
where
    F: Fn(HttpRequest) -> BoxFuture<'static, Result<HttpResponse, EndpointError>> + Send + Sync,
{
    name: String,
    func: F,
}

impl<F> FnEndpoint<F>
where
    F: Fn(HttpRequest) -> BoxFuture<'static, Result<HttpResponse, EndpointError>> + Send + Sync,
{
    /// Creates a new function-backed endpoint.
    pub fn new(name: impl Into<String>, func: F) -> Self {
        Self {
            name: name.into(),
            func,
        }
    }
}

impl<F> Debug for FnEndpoint<F>
where
    F: Fn(HttpRequest) -> BoxFuture<'static, Result<HttpResponse, EndpointError>> + Send + Sync,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnEndpoint")
            .field("name", &self.name)
            .finish()
    }
}

#[async_trait]
impl<F> HttpEndpoint for FnEndpoint<F>
where
    F: Fn(HttpRequest) -> BoxFuture<'static, Result<HttpResponse, EndpointError>> + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, EndpointError> {
        (self.func)(request).await
    }
}

/// An endpoint that answers every request with the same response.
#[derive(Debug, Clone)]
pub struct StaticEndpoint {
    name: String,
    response: HttpResponse,
    labels: Vec<String>,
}

impl StaticEndpoint {
    /// Creates an endpoint answering `200 OK` with an empty body.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            response: HttpResponse::ok(),
            labels: Vec::new(),
        }
    }

    /// Sets the response.
    #[must_use]
    pub fn with_response(mut self, response: HttpResponse) -> Self {
        self.response = response;
        self
    }

    /// Sets the initial labels.
    #[must_use]
    pub fn with_labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.labels = labels.into_iter().map(Into::into).collect();
        self
    }
}

#[async_trait]
impl HttpEndpoint for StaticEndpoint {
    fn name(&self) -> &str {
        &self.name
    }

    async fn send(&self, _request: HttpRequest) -> Result<HttpResponse, EndpointError> {
        Ok(self.response.clone())
    }

    fn labels(&self) -> Vec<String> {
        self.labels.clone()
    }
}
