use axum::{
    body::Body,
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use bytes::Bytes;
use http::{HeaderMap, HeaderValue, Method};
use http_body_util::BodyExt;
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;

use crate::error::AppError;

/// Static fields attached to every request log line.
#[derive(Debug, Clone)]
pub struct LogContext {
    pub app_env: Arc<str>,
}

impl LogContext {
    pub fn new(app_env: &str) -> Self {
        Self {
            app_env: Arc::from(app_env),
        }
    }
}

const SENSITIVE_FIELDS: [&str; 8] = [
    "password",
    "token",
    "secret",
    "authorization",
    "bdate",
    "credential",
    "credentials",
    "api_key",
];

const SENSITIVE_HEADERS: [&str; 4] = ["authorization", "cookie", "x-api-key", "x-auth-token"];

fn should_ignore_path(path: &str) -> bool {
    matches!(path, "/health" | "/health/")
}

fn filter_sensitive_data(mut value: Value) -> Value {
    if let Value::Object(ref mut map) = value {
        for field in SENSITIVE_FIELDS {
            if map.contains_key(field) {
                map.insert(field.to_string(), Value::String("[REDACTED]".to_string()));
            }
        }
    }
    value
}

fn filter_sensitive_headers(headers: &HeaderMap) -> HeaderMap {
    let mut filtered_headers = headers.clone();

    for header_name in SENSITIVE_HEADERS {
        if filtered_headers.contains_key(header_name) {
            filtered_headers.insert(header_name, HeaderValue::from_static("[REDACTED]"));
        }
    }

    filtered_headers
}

fn json_or_empty(bytes: &[u8]) -> Value {
    match serde_json::from_slice::<Value>(bytes) {
        Ok(json) => filter_sensitive_data(json),
        Err(_) => Value::Object(serde_json::Map::new()),
    }
}

pub async fn http_logger(
    State(context): State<LogContext>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let start_time = Instant::now();

    let method = req.method().clone();
    let uri = req.uri().clone();
    let path = uri.path().to_string();
    let version = req.version();
    let req_headers = req.headers().clone();
    let x_request_id = req_headers
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    if should_ignore_path(&path) || method == Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    // Uploads are never buffered for logging.
    let is_file_upload = req_headers
        .get(http::header::CONTENT_TYPE)
        .and_then(|ct| ct.to_str().ok())
        .map(|ct| ct.starts_with("multipart/form-data"))
        .unwrap_or(false);

    let (req, req_body) = if is_file_upload {
        (req, Value::Object(serde_json::Map::new()))
    } else {
        let (parts, body) = req.into_parts();
        let bytes = buffer_body("request", body).await?;
        let logged = json_or_empty(&bytes);
        (Request::from_parts(parts, Body::from(bytes)), logged)
    };

    let mut response = next.run(req).await;

    let latency = start_time.elapsed();
    let status = response.status();
    let res_headers = response.headers().clone();

    let is_json_response = res_headers
        .get(http::header::CONTENT_TYPE)
        .and_then(|ct| ct.to_str().ok())
        .map(|ct| ct.starts_with("application/json"))
        .unwrap_or(false);

    let should_log_body =
        is_json_response && matches!(method, Method::POST | Method::PUT | Method::DELETE);
    let res_body = if should_log_body {
        let (parts, body) = response.into_parts();
        let bytes = buffer_body("response", body).await?;
        let logged = json_or_empty(&bytes);
        response = Response::from_parts(parts, Body::from(bytes));
        logged
    } else {
        Value::Object(serde_json::Map::new())
    };

    let filtered_req_headers = filter_sensitive_headers(&req_headers);
    let filtered_res_headers = filter_sensitive_headers(&res_headers);

    tracing::info!(
        method = ?method,
        uri = ?uri,
        path = %path,
        x_request_id = %x_request_id,
        version = ?version,
        req_headers = ?filtered_req_headers,
        req_body = %req_body,
        status = ?status,
        latency_ms = latency.as_millis(),
        res_headers = ?filtered_res_headers,
        res_body = %res_body,
        app_env = %context.app_env,
        "HTTP request completed"
    );

    Ok(response)
}

pub async fn buffer_body<B>(direction: &str, body: B) -> Result<Bytes, AppError>
where
    B: BodyExt,
    B::Error: std::fmt::Display,
{
    body.collect()
        .await
        .map(|collected| collected.to_bytes())
        .map_err(|err| AppError::validation(format!("failed to read {direction} body: {err}")))
}
