use actix_web::{web, HttpRequest, HttpResponse, Responder};
use common::model::document::DocumentId;
use common::requests::ContentResponse;

use crate::services::auth::current_user;
use crate::services::ApiError;
use crate::state::AppState;
use crate::store::contents;

/// `GET /content/{id}`: `404` for missing rows and for rows of other users.
pub async fn process(
    req: HttpRequest,
    state: web::Data<AppState>,
    content_id: web::Path<DocumentId>,
) -> impl Responder {
    match get_content(&req, &state, content_id.into_inner()) {
        Ok(content) => HttpResponse::Ok().json(content),
        Err(e) => e.to_response(),
    }
}

fn get_content(req: &HttpRequest, state: &AppState, id: DocumentId) -> Result<ContentResponse, ApiError> {
    let conn = state.connect()?;
    let user = current_user(req, &conn)?;
    Ok(ContentResponse {
        content: contents::get(&conn, user.id, id)?,
    })
}
