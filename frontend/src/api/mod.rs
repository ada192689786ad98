//! HTTP access to the backend.
//!
//! [`ApiClient`] is the browser implementation of the session's
//! [`DocumentRepository`] and [`GenerationService`] contracts, plus the
//! listing and account calls used by the dashboard and the login view.
//! Every request carries the session cookie; non-2xx statuses are classified
//! into [`ClientError`] from the status code and the `detail` of the body.

mod markdown;

use common::model::document::{Document, DocumentId};
use common::model::user::UserProfile;
use common::requests::{
    ContentCreatedResponse, ContentListResponse, ContentPayload, ContentResponse,
    ContentUpdatedResponse, ErrorResponse, GenerateRequest, GenerateResponse, LoginRequest,
    MessageResponse, RegisterRequest,
};
use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use web_sys::RequestCredentials;

use crate::session::{ClientError, DocumentRepository, GeneratedDraft, GenerationService};

pub use markdown::render_markdown;

const CONTENT_PATH: &str = "/content";
const GENERATE_PATH: &str = "/content/generate";
const LOGIN_PATH: &str = "/login";
const REGISTER_PATH: &str = "/register";
const LOGOUT_PATH: &str = "/logout";
const ME_PATH: &str = "/me";

/// Same-origin client; the backend serves both the API and this application.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ApiClient;

impl ApiClient {
    /// Lists the current user's documents.
    pub async fn list(&self) -> Result<Vec<Document>, ClientError> {
        let response = send(credentials(Request::get(CONTENT_PATH))).await?;
        let listing: ContentListResponse = decode(response).await?;
        Ok(listing.contents)
    }

    /// Profile of the logged-in user; `Unauthorized` when there is no session.
    pub async fn me(&self) -> Result<UserProfile, ClientError> {
        let response = send(credentials(Request::get(ME_PATH))).await?;
        decode(response).await
    }

    /// Opens a session and returns the profile behind it.
    pub async fn login(&self, email: &str, password: &str) -> Result<UserProfile, ClientError> {
        let body = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let response = send_json(Request::post(LOGIN_PATH), &body).await?;
        decode(response).await
    }

    /// Creates an account and opens a session for it.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<UserProfile, ClientError> {
        let body = RegisterRequest {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        };
        let response = send_json(Request::post(REGISTER_PATH), &body).await?;
        decode(response).await
    }

    pub async fn logout(&self) -> Result<(), ClientError> {
        let response = send(credentials(Request::get(LOGOUT_PATH))).await?;
        let _: MessageResponse = decode(response).await?;
        Ok(())
    }
}

impl DocumentRepository for ApiClient {
    async fn fetch_by_id(&self, id: DocumentId) -> Result<Document, ClientError> {
        let response = send(credentials(Request::get(&content_url(id)))).await?;
        let wrapped: ContentResponse = decode(response).await?;
        Ok(wrapped.content)
    }

    async fn create(&self, title: &str, body: &str) -> Result<Document, ClientError> {
        let payload = ContentPayload {
            title: title.to_string(),
            body: body.to_string(),
        };
        let response = send_json(Request::post(CONTENT_PATH), &payload).await?;
        let created: ContentCreatedResponse = decode(response).await?;
        Ok(Document {
            id: Some(created.content_id),
            title: payload.title,
            body: payload.body,
            ..Document::default()
        })
    }

    async fn update(
        &self,
        id: DocumentId,
        title: &str,
        body: &str,
    ) -> Result<Document, ClientError> {
        let payload = ContentPayload {
            title: title.to_string(),
            body: body.to_string(),
        };
        let response = send_json(Request::put(&content_url(id)), &payload).await?;
        let updated: ContentUpdatedResponse = decode(response).await?;
        Ok(updated.content)
    }

    async fn delete(&self, id: DocumentId) -> Result<(), ClientError> {
        let response = send(credentials(Request::delete(&content_url(id)))).await?;
        let _: MessageResponse = decode(response).await?;
        Ok(())
    }
}

impl GenerationService for ApiClient {
    async fn generate(&self, topic: &str) -> Result<GeneratedDraft, ClientError> {
        let request = GenerateRequest {
            topic: topic.to_string(),
        };
        let response = send_json(Request::post(GENERATE_PATH), &request).await?;
        let generated: GenerateResponse = decode(response).await?;
        Ok(GeneratedDraft {
            title: generated.title,
            markup: render_markdown(&generated.generated),
        })
    }
}

fn content_url(id: DocumentId) -> String {
    format!("{CONTENT_PATH}/{id}")
}

fn credentials(builder: RequestBuilder) -> RequestBuilder {
    builder.credentials(RequestCredentials::Include)
}

async fn send(builder: RequestBuilder) -> Result<Response, ClientError> {
    let response = builder
        .send()
        .await
        .map_err(|e| ClientError::Network(e.to_string()))?;
    check_status(response).await
}

async fn send_json<T: serde::Serialize>(
    builder: RequestBuilder,
    body: &T,
) -> Result<Response, ClientError> {
    let request = credentials(builder)
        .json(body)
        .map_err(|e| ClientError::Network(e.to_string()))?;
    let response = request
        .send()
        .await
        .map_err(|e| ClientError::Network(e.to_string()))?;
    check_status(response).await
}

async fn check_status(response: Response) -> Result<Response, ClientError> {
    if response.ok() {
        return Ok(response);
    }
    let status = response.status();
    let detail = match response.json::<ErrorResponse>().await {
        Ok(error) => error.detail,
        Err(_) => response.status_text(),
    };
    log::warn!("request to {} failed with {}: {}", response.url(), status, detail);
    Err(ClientError::from_status(status, detail))
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let status = response.status();
    response.json::<T>().await.map_err(|e| ClientError::Server {
        status,
        message: format!("unexpected response body: {e}"),
    })
}
