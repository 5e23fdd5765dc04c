//! HTTP client for the backend REST API.
//!
//! Every call attaches the session's bearer token. There is no retry,
//! timeout, or request deduplication; failures are reported as typed
//! [`ApiError`] values and left to each view to render.

use gloo_net::http::{Request, RequestBuilder, Response};
use lead_core::{
    ActivityLogEntry, ErrorResponse, Lead, LeadPayload, LoginPayload, LoginResponse, NotePayload,
    Tag, TagPayload, TagTogglePayload, User, UserPayload,
};
use serde::de::DeserializeOwned;
use thiserror::Error;
use wasm_bindgen::JsValue;
use web_sys::{File, FormData};

/// Errors from API operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    /// Transport-level failure: the request never got a response.
    #[error("network error: {0}")]
    Network(String),

    /// The server answered with a non-success status. Carries the body's
    /// `message` field when present; authorization failures land here too.
    #[error("{0}")]
    Server(String),

    /// The response body did not match the expected shape.
    #[error("failed to decode response: {0}")]
    Decode(String),
}

impl From<gloo_net::Error> for ApiError {
    fn from(err: gloo_net::Error) -> Self {
        ApiError::Network(err.to_string())
    }
}

fn js_error(value: JsValue) -> ApiError {
    ApiError::Network(format!("{value:?}"))
}

/// Result type for API operations.
pub type Result<T> = std::result::Result<T, ApiError>;

fn authorized(builder: RequestBuilder, token: &str) -> RequestBuilder {
    builder.header("Authorization", &format!("Bearer {token}"))
}

/// Map a non-success response to [`ApiError::Server`].
async fn expect_ok(response: Response) -> Result<Response> {
    if response.ok() {
        return Ok(response);
    }
    let message = match response.json::<ErrorResponse>().await {
        Ok(body) => body.message,
        Err(_) => format!("request failed with status {}", response.status()),
    };
    Err(ApiError::Server(message))
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    response
        .json::<T>()
        .await
        .map_err(|err| ApiError::Decode(err.to_string()))
}

/// POST /api/auth/login - exchange credentials for a token and profile.
pub async fn login(payload: &LoginPayload) -> Result<LoginResponse> {
    let response = Request::post("/api/auth/login").json(payload)?.send().await?;
    decode(expect_ok(response).await?).await
}

/// GET /api/leads - the full lead collection.
pub async fn fetch_leads(token: &str) -> Result<Vec<Lead>> {
    let response = authorized(Request::get("/api/leads"), token).send().await?;
    decode(expect_ok(response).await?).await
}

/// GET /api/leads/:id - a single lead.
pub async fn fetch_lead(token: &str, id: &str) -> Result<Lead> {
    let response = authorized(Request::get(&format!("/api/leads/{id}")), token)
        .send()
        .await?;
    decode(expect_ok(response).await?).await
}

/// POST /api/leads - create a lead.
pub async fn create_lead(token: &str, payload: &LeadPayload) -> Result<()> {
    let response = authorized(Request::post("/api/leads"), token)
        .json(payload)?
        .send()
        .await?;
    expect_ok(response).await?;
    Ok(())
}

/// PUT /api/leads/:id - update a lead.
pub async fn update_lead(token: &str, id: &str, payload: &LeadPayload) -> Result<()> {
    let response = authorized(Request::put(&format!("/api/leads/{id}")), token)
        .json(payload)?
        .send()
        .await?;
    expect_ok(response).await?;
    Ok(())
}

/// DELETE /api/leads/:id - delete a lead.
pub async fn delete_lead(token: &str, id: &str) -> Result<()> {
    let response = authorized(Request::delete(&format!("/api/leads/{id}")), token)
        .send()
        .await?;
    expect_ok(response).await?;
    Ok(())
}

/// POST /api/leads/:id/notes - append a note.
///
/// The server owns note ordering, so it returns the full updated lead.
pub async fn add_note(token: &str, id: &str, content: &str) -> Result<Lead> {
    let payload = NotePayload {
        content: content.to_string(),
    };
    let response = authorized(Request::post(&format!("/api/leads/{id}/notes")), token)
        .json(&payload)?
        .send()
        .await?;
    decode(expect_ok(response).await?).await
}

/// POST /api/leads/:id/tags - attach a tag.
pub async fn add_lead_tag(token: &str, id: &str, tag_id: &str) -> Result<()> {
    let payload = TagTogglePayload {
        tag_id: tag_id.to_string(),
    };
    let response = authorized(Request::post(&format!("/api/leads/{id}/tags")), token)
        .json(&payload)?
        .send()
        .await?;
    expect_ok(response).await?;
    Ok(())
}

/// DELETE /api/leads/:id/tags - detach a tag.
pub async fn remove_lead_tag(token: &str, id: &str, tag_id: &str) -> Result<()> {
    let payload = TagTogglePayload {
        tag_id: tag_id.to_string(),
    };
    let response = authorized(Request::delete(&format!("/api/leads/{id}/tags")), token)
        .json(&payload)?
        .send()
        .await?;
    expect_ok(response).await?;
    Ok(())
}

/// GET /api/leads/export - server-generated spreadsheet bytes.
pub async fn export_leads(token: &str) -> Result<Vec<u8>> {
    let response = authorized(Request::get("/api/leads/export"), token)
        .send()
        .await?;
    let response = expect_ok(response).await?;
    response
        .binary()
        .await
        .map_err(|err| ApiError::Decode(err.to_string()))
}

/// POST /api/leads/import - multipart spreadsheet upload.
pub async fn import_leads(token: &str, file: &File) -> Result<()> {
    let form = FormData::new().map_err(js_error)?;
    form.append_with_blob("file", file).map_err(js_error)?;
    let response = authorized(Request::post("/api/leads/import"), token)
        .body(form)?
        .send()
        .await?;
    expect_ok(response).await?;
    Ok(())
}

/// GET /api/tags - the tag catalog.
pub async fn fetch_tags(token: &str) -> Result<Vec<Tag>> {
    let response = authorized(Request::get("/api/tags"), token).send().await?;
    decode(expect_ok(response).await?).await
}

/// POST /api/tags - create a tag, returning it.
pub async fn create_tag(token: &str, name: &str) -> Result<Tag> {
    let payload = TagPayload {
        name: name.to_string(),
    };
    let response = authorized(Request::post("/api/tags"), token)
        .json(&payload)?
        .send()
        .await?;
    decode(expect_ok(response).await?).await
}

/// GET /api/users - all users.
pub async fn fetch_users(token: &str) -> Result<Vec<User>> {
    let response = authorized(Request::get("/api/users"), token).send().await?;
    decode(expect_ok(response).await?).await
}

/// POST /api/auth/register - create a user.
pub async fn register_user(token: &str, payload: &UserPayload) -> Result<()> {
    let response = authorized(Request::post("/api/auth/register"), token)
        .json(payload)?
        .send()
        .await?;
    expect_ok(response).await?;
    Ok(())
}

/// PUT /api/users/:id - edit a user.
pub async fn update_user(token: &str, id: &str, payload: &UserPayload) -> Result<()> {
    let response = authorized(Request::put(&format!("/api/users/{id}")), token)
        .json(payload)?
        .send()
        .await?;
    expect_ok(response).await?;
    Ok(())
}

/// DELETE /api/users/:id - delete a user.
pub async fn delete_user(token: &str, id: &str) -> Result<()> {
    let response = authorized(Request::delete(&format!("/api/users/{id}")), token)
        .send()
        .await?;
    expect_ok(response).await?;
    Ok(())
}

/// GET /api/users/:id/logs - a user's activity log.
pub async fn fetch_user_logs(token: &str, id: &str) -> Result<Vec<ActivityLogEntry>> {
    let response = authorized(Request::get(&format!("/api/users/{id}/logs")), token)
        .send()
        .await?;
    decode(expect_ok(response).await?).await
}
