use actix_web::{web, HttpRequest, HttpResponse, Responder};
use common::model::document::DocumentId;
use common::requests::MessageResponse;
use log::info;

use crate::services::auth::current_user;
use crate::services::ApiError;
use crate::state::AppState;
use crate::store::contents;

pub async fn process(
    req: HttpRequest,
    state: web::Data<AppState>,
    content_id: web::Path<DocumentId>,
) -> impl Responder {
    match delete_content(&req, &state, content_id.into_inner()) {
        Ok(()) => HttpResponse::Ok().json(MessageResponse {
            message: "Content deleted successfully".to_string(),
        }),
        Err(e) => e.to_response(),
    }
}

fn delete_content(req: &HttpRequest, state: &AppState, id: DocumentId) -> Result<(), ApiError> {
    let conn = state.connect()?;
    let user = current_user(req, &conn)?;
    contents::delete(&conn, user.id, id)?;
    info!("user {} deleted content {id}", user.id);
    Ok(())
}
