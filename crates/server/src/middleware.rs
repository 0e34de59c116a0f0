use crate::error::ServerError;
use crate::state::ServerState;
use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::http::{HeaderMap, HeaderValue};
use axum::middleware::Next;
use axum::response::Response;
use std::sync::Arc;
use std::time::Instant;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Request id carried in request extensions.
#[derive(Debug, Clone)]
pub struct RequestId(pub String);

/// Key from `X-API-Key`, or from `Authorization: Bearer <key>`.
pub fn extract_api_key(headers: &HeaderMap) -> Option<String> {
    if let Some(key) = headers.get("x-api-key").and_then(|v| v.to_str().ok()) {
        let key = key.trim();
        if !key.is_empty() {
            return Some(key.to_string());
        }
    }
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.strip_prefix("Bearer ").unwrap_or(v).trim())
        .filter(|key| !key.is_empty())
        .map(str::to_string)
}

/// Rejects requests without a known key, then applies the per-key rate limit.
pub async fn api_key_auth(
    State(state): State<Arc<ServerState>>,
    request: Request,
    next: Next,
) -> Result<Response, ServerError> {
    let Some(key) = extract_api_key(request.headers()) else {
        return Err(ServerError::Authentication(
            "API key required. Provide it in 'X-API-Key' or 'Authorization: Bearer <key>' header"
                .to_string(),
        ));
    };

    if !state.is_valid_api_key(&key) {
        tracing::debug!(path = %request.uri().path(), "rejected unknown API key");
        return Err(ServerError::Authentication("Invalid API key".to_string()));
    }
    if !state.check_rate_limit(&key) {
        return Err(ServerError::RateLimitExceeded);
    }

    Ok(next.run(request).await)
}

/// Reuses the caller's `x-request-id` or mints a UUID, and echoes it back.
pub async fn request_id(mut request: Request, next: Next) -> Response {
    let id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

    request.extensions_mut().insert(RequestId(id.clone()));
    let mut response = next.run(request).await;

    if let Ok(value) = HeaderValue::from_str(&id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}

/// One line per finished request; server errors are logged at warn.
pub async fn log_requests(request: Request, next: Next) -> Response {
    let started = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let request_id = request
        .extensions()
        .get::<RequestId>()
        .map(|id| id.0.clone())
        .unwrap_or_default();

    let response = next.run(request).await;
    let status = response.status();
    let elapsed_ms = started.elapsed().as_millis() as u64;

    if status.is_server_error() {
        tracing::warn!(%method, %path, %status, elapsed_ms, %request_id, "request failed");
    } else {
        tracing::info!(%method, %path, %status, elapsed_ms, %request_id, "request handled");
    }
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(pairs: &[(&'static str, &str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.insert(*name, HeaderValue::from_str(value).unwrap());
        }
        map
    }

    #[test]
    fn key_from_x_api_key() {
        assert_eq!(
            extract_api_key(&headers(&[("x-api-key", " k1 ")])),
            Some("k1".to_string())
        );
    }

    #[test]
    fn key_from_bearer() {
        assert_eq!(
            extract_api_key(&headers(&[("authorization", "Bearer k2")])),
            Some("k2".to_string())
        );
    }

    #[test]
    fn x_api_key_wins_over_bearer() {
        let h = headers(&[("x-api-key", "k1"), ("authorization", "Bearer k2")]);
        assert_eq!(extract_api_key(&h), Some("k1".to_string()));
    }

    #[test]
    fn blank_keys_are_missing() {
        assert_eq!(extract_api_key(&headers(&[("x-api-key", "  ")])), None);
        assert_eq!(extract_api_key(&headers(&[("authorization", "Bearer ")])), None);
        assert_eq!(extract_api_key(&HeaderMap::new()), None);
    }
}
