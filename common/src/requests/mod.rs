//! JSON bodies of the REST API.
//!
//! Request types are sent by the browser and deserialized by the server;
//! response types go the other way. Field names match the wire format.

use serde::{Deserialize, Serialize};

use crate::model::document::{Document, DocumentId};

/// Body of `POST /content`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentPayload {
    pub title: String,
    pub body: String,
}

/// Body of `PUT /content/{id}`. Absent or empty fields leave the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentUpdate {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
}

/// Response of `GET /content`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentListResponse {
    pub contents: Vec<Document>,
}

/// Response of `GET /content/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentResponse {
    pub content: Document,
}

/// Response of `POST /content`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentCreatedResponse {
    pub message: String,
    pub content_id: DocumentId,
}

/// Response of `PUT /content/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentUpdatedResponse {
    pub message: String,
    pub content: Document,
}

/// Plain acknowledgement, e.g. the response of `DELETE /content/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Error body returned with every non-2xx status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: String,
}

/// Body of `POST /content/generate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub topic: String,
}

/// Response of `POST /content/generate`.
///
/// `generated` is Markdown; `saved_content_id` is always `None` because
/// generation never persists anything on its own.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateResponse {
    pub title: String,
    pub generated: String,
    #[serde(default)]
    pub saved_content_id: Option<DocumentId>,
}

/// Body of `POST /login`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Body of `POST /register`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}
