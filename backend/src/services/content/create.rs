use actix_web::{web, HttpRequest, HttpResponse, Responder};
use common::requests::{ContentCreatedResponse, ContentPayload};
use log::info;

use crate::services::auth::current_user;
use crate::services::ApiError;
use crate::state::AppState;
use crate::store::contents;

pub async fn process(
    req: HttpRequest,
    state: web::Data<AppState>,
    payload: web::Json<ContentPayload>,
) -> impl Responder {
    match create_content(&req, &state, &payload) {
        Ok(created) => HttpResponse::Created().json(created),
        Err(e) => e.to_response(),
    }
}

fn create_content(
    req: &HttpRequest,
    state: &AppState,
    payload: &ContentPayload,
) -> Result<ContentCreatedResponse, ApiError> {
    let conn = state.connect()?;
    let user = current_user(req, &conn)?;
    let content_id = contents::insert(&conn, user.id, payload)?;
    info!("user {} created content {content_id}", user.id);
    Ok(ContentCreatedResponse {
        message: "Content created successfully".to_string(),
        content_id,
    })
}
