// ABOUTME: API key middleware gating mutating requests behind the X-API-KEY header.
// ABOUTME: Safe methods (GET, HEAD, OPTIONS) pass through so reads stay unauthenticated.

use axum::Json;
use axum::body::Body;
use axum::http::{Method, Request, Response, StatusCode};
use axum::response::IntoResponse;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use tower::{Layer, Service};

/// Header carrying the caller's API key.
pub const API_KEY_HEADER: &str = "x-api-key";

/// A tower Layer that requires a matching API key on mutating requests.
#[derive(Clone)]
pub struct ApiKeyLayer {
    key: Arc<String>,
}

impl ApiKeyLayer {
    /// Create a new ApiKeyLayer with the expected key.
    pub fn new(key: String) -> Self {
        Self { key: Arc::new(key) }
    }
}

impl<S> Layer<S> for ApiKeyLayer {
    type Service = ApiKeyMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        ApiKeyMiddleware {
            inner,
            key: Arc::clone(&self.key),
        }
    }
}

/// The middleware service that checks the API key on non-safe methods.
#[derive(Clone)]
pub struct ApiKeyMiddleware<S> {
    inner: S,
    key: Arc<String>,
}

fn is_safe(method: &Method) -> bool {
    matches!(*method, Method::GET | Method::HEAD | Method::OPTIONS)
}

impl<S> Service<Request<Body>> for ApiKeyMiddleware<S>
where
    S: Service<Request<Body>, Response = Response<Body>> + Clone + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        if is_safe(req.method()) {
            let mut inner = self.inner.clone();
            return Box::pin(async move { inner.call(req).await });
        }

        let presented = req
            .headers()
            .get(API_KEY_HEADER)
            .and_then(|v| v.to_str().ok());

        if presented == Some(self.key.as_str()) {
            let mut inner = self.inner.clone();
            return Box::pin(async move { inner.call(req).await });
        }

        tracing::warn!(method = %req.method(), path = %req.uri().path(), "rejected request without valid api key");
        Box::pin(async move {
            let body = serde_json::json!({
                "error": "forbidden",
                "detail": "Could not validate credentials",
            });
            Ok((StatusCode::FORBIDDEN, Json(body)).into_response())
        })
    }
}
