//! Shared JSON client over `gloo-net`.
//!
//! Every helper takes an API path (`/documentos/12`), attaches the bearer
//! token when one is stored and maps failures onto [`ApiError`]. Nothing is
//! retried.

use super::api_utils::{access_token, api_url};
use contracts::shared::api_error::ApiError;
use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

fn authorized(builder: RequestBuilder) -> RequestBuilder {
    match access_token() {
        Some(token) => builder.header("Authorization", &format!("Bearer {}", token)),
        None => builder,
    }
}

fn network(path: &str, e: gloo_net::Error) -> ApiError {
    log::error!("{}: request failed: {}", path, e);
    ApiError::Network(e.to_string())
}

fn decode(path: &str, e: impl std::fmt::Display) -> ApiError {
    log::error!("{}: cannot decode response: {}", path, e);
    ApiError::Decode(e.to_string())
}

async fn checked(path: &str, response: Response) -> Result<Response, ApiError> {
    if response.ok() {
        return Ok(response);
    }
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let error = ApiError::from_response(status, &body);
    log::warn!("{}: HTTP {}: {}", path, status, error);
    Err(error)
}

async fn send_builder(path: &str, builder: RequestBuilder) -> Result<Response, ApiError> {
    let response = authorized(builder)
        .header("Accept", "application/json")
        .send()
        .await
        .map_err(|e| network(path, e))?;
    checked(path, response).await
}

async fn send_json<B: Serialize>(
    path: &str,
    builder: RequestBuilder,
    body: &B,
) -> Result<Response, ApiError> {
    let request: Request = authorized(builder)
        .header("Accept", "application/json")
        .json(body)
        .map_err(|e| decode(path, e))?;
    let response = request.send().await.map_err(|e| network(path, e))?;
    checked(path, response).await
}

/// Parse a body that may be empty; an empty body decodes as JSON `null`.
async fn read_json<T: DeserializeOwned>(path: &str, response: Response) -> Result<T, ApiError> {
    let text = response.text().await.map_err(|e| network(path, e))?;
    let text = if text.trim().is_empty() { "null" } else { text.as_str() };
    serde_json::from_str(text).map_err(|e| decode(path, e))
}

pub async fn get_json<T: DeserializeOwned>(path: &str) -> Result<T, ApiError> {
    let response = send_builder(path, Request::get(&api_url(path))).await?;
    read_json(path, response).await
}

pub async fn post_json<B: Serialize, T: DeserializeOwned>(
    path: &str,
    body: &B,
) -> Result<T, ApiError> {
    let response = send_json(path, Request::post(&api_url(path)), body).await?;
    read_json(path, response).await
}

pub async fn put_json<B: Serialize, T: DeserializeOwned>(
    path: &str,
    body: &B,
) -> Result<T, ApiError> {
    let response = send_json(path, Request::put(&api_url(path)), body).await?;
    read_json(path, response).await
}

/// `POST` without a body, for action endpoints.
pub async fn post_empty<T: DeserializeOwned>(path: &str) -> Result<T, ApiError> {
    let response = send_builder(path, Request::post(&api_url(path))).await?;
    read_json(path, response).await
}

/// Raw response bytes, for PDF downloads.
pub async fn get_bytes(path: &str) -> Result<Vec<u8>, ApiError> {
    let response = send_builder(path, Request::get(&api_url(path))).await?;
    response.binary().await.map_err(|e| network(path, e))
}
