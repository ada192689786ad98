use actix_web::{web, HttpRequest, HttpResponse, Responder};
use common::model::document::DocumentId;
use common::requests::{ContentUpdate, ContentUpdatedResponse};
use log::info;

use crate::services::auth::current_user;
use crate::services::ApiError;
use crate::state::AppState;
use crate::store::contents;

pub async fn process(
    req: HttpRequest,
    state: web::Data<AppState>,
    content_id: web::Path<DocumentId>,
    payload: web::Json<ContentUpdate>,
) -> impl Responder {
    match update_content(&req, &state, content_id.into_inner(), &payload) {
        Ok(updated) => HttpResponse::Ok().json(updated),
        Err(e) => e.to_response(),
    }
}

fn update_content(
    req: &HttpRequest,
    state: &AppState,
    id: DocumentId,
    changes: &ContentUpdate,
) -> Result<ContentUpdatedResponse, ApiError> {
    let conn = state.connect()?;
    let user = current_user(req, &conn)?;
    let content = contents::update(&conn, user.id, id, changes)?;
    info!("user {} updated content {id}", user.id);
    Ok(ContentUpdatedResponse {
        message: "Content updated successfully".to_string(),
        content,
    })
}
