use actix_web::{web, HttpRequest, HttpResponse, Responder};
use common::requests::ContentListResponse;

use crate::services::auth::current_user;
use crate::services::ApiError;
use crate::state::AppState;
use crate::store::contents;

pub async fn process(req: HttpRequest, state: web::Data<AppState>) -> impl Responder {
    match list_contents(&req, &state) {
        Ok(contents) => HttpResponse::Ok().json(contents),
        Err(e) => e.to_response(),
    }
}

fn list_contents(req: &HttpRequest, state: &AppState) -> Result<ContentListResponse, ApiError> {
    let conn = state.connect()?;
    let user = current_user(req, &conn)?;
    Ok(ContentListResponse {
        contents: contents::list(&conn, user.id)?,
    })
}
