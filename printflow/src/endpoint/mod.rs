//! Request-issuing endpoints.
//!
//! An [`HttpEndpoint`] is the object HTTP processors decorate. Every
//! decorated endpoint is itself an `HttpEndpoint`, so a layered endpoint can
//! be used anywhere the raw one was expected.

mod fn_endpoint;
mod request;

pub use fn_endpoint::{FnEndpoint, StaticEndpoint};
pub use request::{HttpRequest, HttpResponse, Method};

use crate::errors::EndpointError;
use async_trait::async_trait;
use std::fmt::Debug;
use std::sync::Arc;

/// Shared handle to a request endpoint, as stored in the run values.
pub type SharedEndpoint = Arc<dyn HttpEndpoint>;

/// Trait for objects that issue HTTP requests.
#[async_trait]
pub trait HttpEndpoint: Send + Sync + Debug {
    /// Returns the name of the endpoint.
    fn name(&self) -> &str;

    /// Issues a request.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, EndpointError>;

    /// Labels accumulated while the endpoint was decorated, innermost first.
    ///
    /// Decorators append their own label to the labels of the endpoint they
    /// wrap. Raw endpoints usually report none.
    fn labels(&self) -> Vec<String> {
        Vec::new()
    }
}
