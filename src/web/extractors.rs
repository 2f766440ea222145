//! Request extractors
//!
//! This module provides custom extractors for query parameters and
//! per-request context.

use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
    response::Response,
};
use serde::de::DeserializeOwned;
use uuid::Uuid;

use super::responses::bad_request;

/// Query string extractor that answers malformed input with the standard
/// error envelope instead of a plain-text rejection
#[derive(Debug, Clone, Default)]
pub struct QueryParams<T>(pub T);

impl<T, S> FromRequestParts<S> for QueryParams<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| bad_request(&format!("Invalid query parameters: {}", e.body_text())))?;

        Ok(Self(params))
    }
}

/// Request context information
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub user_agent: Option<String>,
    pub real_ip: Option<String>,
    pub request_id: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl Default for RequestContext {
    fn default() -> Self {
        Self {
            user_agent: None,
            real_ip: None,
            request_id: Uuid::new_v4().to_string(),
            timestamp: chrono::Utc::now(),
        }
    }
}

impl<S> FromRequestParts<S> for RequestContext
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user_agent = parts
            .headers
            .get("user-agent")
            .and_then(|h| h.to_str().ok())
            .map(|s| s.to_string());

        let real_ip = parts
            .headers
            .get("x-real-ip")
            .or_else(|| parts.headers.get("x-forwarded-for"))
            .and_then(|h| h.to_str().ok())
            .and_then(|s| s.split(',').next())
            .map(|s| s.trim().to_string());

        let request_id = parts
            .headers
            .get("x-request-id")
            .and_then(|h| h.to_str().ok())
            .map(|s| s.to_string())
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        Ok(Self {
            user_agent,
            real_ip,
            request_id,
            timestamp: chrono::Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    #[tokio::test]
    async fn context_reads_forwarding_headers() {
        let request = Request::builder()
            .uri("/health")
            .header("user-agent", "curl/8.0")
            .header("x-forwarded-for", "203.0.113.7, 10.0.0.1")
            .header("x-request-id", "req-1")
            .body(())
            .unwrap();
        let (mut parts, _) = request.into_parts();

        let context = RequestContext::from_request_parts(&mut parts, &())
            .await
            .unwrap();
        assert_eq!(context.user_agent.as_deref(), Some("curl/8.0"));
        assert_eq!(context.real_ip.as_deref(), Some("203.0.113.7"));
        assert_eq!(context.request_id, "req-1");
    }

    #[tokio::test]
    async fn context_generates_request_id() {
        let (mut parts, _) = Request::builder().body(()).unwrap().into_parts();
        let context = RequestContext::from_request_parts(&mut parts, &())
            .await
            .unwrap();
        assert!(Uuid::parse_str(&context.request_id).is_ok());
        assert!(context.real_ip.is_none());
    }
}
