use actix_web::{web, HttpRequest, HttpResponse, Responder};
use common::requests::MessageResponse;

use super::{removal_cookie, SESSION_COOKIE};
use crate::services::ApiError;
use crate::state::AppState;
use crate::store::users;

/// Deletes the session, if any, and always clears the cookie.
pub async fn process(req: HttpRequest, state: web::Data<AppState>) -> impl Responder {
    match logout(&req, &state) {
        Ok(()) => HttpResponse::Ok().cookie(removal_cookie()).json(MessageResponse {
            message: "Logged out successfully".to_string(),
        }),
        Err(e) => e.to_response(),
    }
}

fn logout(req: &HttpRequest, state: &AppState) -> Result<(), ApiError> {
    if let Some(cookie) = req.cookie(SESSION_COOKIE) {
        let conn = state.connect()?;
        users::delete_session(&conn, cookie.value())?;
    }
    Ok(())
}
