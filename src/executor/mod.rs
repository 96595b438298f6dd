//! HTTP request executor.
//!
//! Sends one [`OutboundRequest`] with reqwest and normalizes whatever happens
//! into an [`ExecutionResult`]. Any status code counts as a completed
//! exchange; only transport faults are reported as errors. There are no
//! retries, and the configured timeout is the only cancellation.

pub mod config;
pub mod error;

pub use config::ExecutionConfig;
pub use error::RequestError;

use crate::models::response::status_line;
use crate::models::{ExecutionResult, HttpMethod, OutboundRequest};
use log::{debug, warn};
use std::collections::HashMap;
use std::time::Instant;

/// Executes `request` and returns the normalized result.
///
/// Never fails: transport faults come back as a result with an error class,
/// an empty status and the fault text as the body. The result carries the
/// wall-clock duration of the whole exchange.
///
/// # Example
///
/// ```no_run
/// use gostman::executor::{execute, ExecutionConfig};
/// use gostman::models::{HttpMethod, OutboundRequest};
///
/// # async fn example() {
/// let url = url::Url::parse("https://httpbin.org/get").unwrap();
/// let request = OutboundRequest::new(HttpMethod::GET, url);
/// let result = execute(&request, &ExecutionConfig::default()).await;
/// println!("{} in {:?}", result.status_label(), result.duration);
/// # }
/// ```
pub async fn execute(request: &OutboundRequest, config: &ExecutionConfig) -> ExecutionResult {
    let start_time = Instant::now();
    debug!("Sending {} {}", request.method, request.url);

    let result = match send(request, config).await {
        Ok(result) => {
            debug!("{} {} -> {}", request.method, request.url, result.status);
            result
        }
        Err(err) => {
            warn!("{} {} failed: {}", request.method, request.url, err);
            let class = err.error_class();
            ExecutionResult::failed(class, err.into_body())
        }
    };

    result.with_duration(start_time.elapsed())
}

/// Builds the reqwest client for one exchange.
pub fn build_client(config: &ExecutionConfig) -> Result<reqwest::Client, RequestError> {
    let redirect = if config.follow_redirects {
        reqwest::redirect::Policy::limited(config.max_redirects as usize)
    } else {
        reqwest::redirect::Policy::none()
    };

    reqwest::Client::builder()
        .timeout(config.timeout)
        .redirect(redirect)
        .danger_accept_invalid_certs(!config.validate_ssl)
        .build()
        .map_err(|e| RequestError::Build(e.to_string()))
}

fn to_reqwest_method(method: HttpMethod) -> reqwest::Method {
    match method {
        HttpMethod::GET => reqwest::Method::GET,
        HttpMethod::POST => reqwest::Method::POST,
        HttpMethod::PUT => reqwest::Method::PUT,
        HttpMethod::DELETE => reqwest::Method::DELETE,
        HttpMethod::PATCH => reqwest::Method::PATCH,
        HttpMethod::HEAD => reqwest::Method::HEAD,
    }
}

async fn send(
    request: &OutboundRequest,
    config: &ExecutionConfig,
) -> Result<ExecutionResult, RequestError> {
    let client = build_client(config)?;

    let mut req_builder = client.request(to_reqwest_method(request.method), request.url.clone());
    for (name, value) in &request.headers {
        req_builder = req_builder.header(name.as_str(), value.as_str());
    }
    if let Some(body) = &request.body {
        req_builder = req_builder.body(body.clone());
    }

    let mut response = req_builder.send().await?;

    let status = response.status();
    let status = status_line(status.as_u16(), status.canonical_reason());
    let headers = collect_headers(response.headers());
    let body = read_body(&mut response).await?;

    Ok(ExecutionResult::completed(status, headers, body))
}

/// Flattens response headers, joining repeated names with `", "`.
fn collect_headers(headers: &reqwest::header::HeaderMap) -> HashMap<String, String> {
    let mut collected: HashMap<String, String> = HashMap::new();
    for (name, value) in headers {
        let value = String::from_utf8_lossy(value.as_bytes());
        collected
            .entry(name.as_str().to_string())
            .and_modify(|existing| {
                existing.push_str(", ");
                existing.push_str(&value);
            })
            .or_insert_with(|| value.into_owned());
    }
    collected
}

/// Reads the body chunk by chunk so a mid-stream fault keeps what arrived.
async fn read_body(response: &mut reqwest::Response) -> Result<String, RequestError> {
    let mut buffer: Vec<u8> = Vec::new();
    loop {
        match response.chunk().await {
            Ok(Some(chunk)) => buffer.extend_from_slice(&chunk),
            Ok(None) => break,
            Err(e) => {
                return Err(RequestError::BodyRead {
                    message: e.to_string(),
                    partial: String::from_utf8_lossy(&buffer).into_owned(),
                })
            }
        }
    }
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}
