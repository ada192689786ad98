use actix_web::{web, HttpRequest, HttpResponse, Responder};

use super::current_user;
use crate::services::ApiError;
use crate::state::AppState;

pub async fn process(req: HttpRequest, state: web::Data<AppState>) -> impl Responder {
    let result = state
        .connect()
        .map_err(ApiError::from)
        .and_then(|conn| current_user(&req, &conn));
    match result {
        Ok(user) => HttpResponse::Ok().json(user),
        Err(e) => e.to_response(),
    }
}
