//! `POST /content/generate`: asks Gemini for a Markdown article about the
//! topic. The draft is only returned, never stored; the editor decides
//! whether to save it. Limited per user by the shared generation limiter.

use actix_web::{web, HttpRequest, HttpResponse, Responder};
use common::requests::{GenerateRequest, GenerateResponse};
use log::{info, warn};

use crate::services::auth::current_user;
use crate::services::ApiError;
use crate::state::AppState;

pub async fn process(
    req: HttpRequest,
    state: web::Data<AppState>,
    payload: web::Json<GenerateRequest>,
) -> impl Responder {
    match generate(&req, &state, &payload).await {
        Ok(generated) => HttpResponse::Created().json(generated),
        Err(e) => e.to_response(),
    }
}

async fn generate(
    req: &HttpRequest,
    state: &AppState,
    payload: &GenerateRequest,
) -> Result<GenerateResponse, ApiError> {
    // The connection is released before awaiting the model.
    let user = {
        let conn = state.connect()?;
        current_user(req, &conn)?
    };

    let topic = payload.topic.trim();
    if topic.is_empty() {
        return Err(ApiError::BadRequest("Topic cannot be empty".to_string()));
    }
    if !state.generation_limiter.try_acquire(user.id).await {
        warn!("generation rate limit hit by user {}", user.id);
        return Err(ApiError::RateLimited);
    }

    let generated = state.gemini.generate_article(topic).await?;
    info!("generated {} bytes for user {}", generated.len(), user.id);
    Ok(GenerateResponse {
        title: topic.to_string(),
        generated,
        saved_content_id: None,
    })
}
