use actix_web::cookie::Cookie;
use actix_web::{web, HttpResponse, Responder};
use common::model::user::UserProfile;
use common::requests::LoginRequest;
use log::{info, warn};

use super::open_session;
use super::password::verify_password;
use crate::services::ApiError;
use crate::state::AppState;
use crate::store::users;

pub async fn process(state: web::Data<AppState>, payload: web::Json<LoginRequest>) -> impl Responder {
    match login(&state, &payload) {
        Ok((user, cookie)) => HttpResponse::Ok().cookie(cookie).json(user),
        Err(e) => e.to_response(),
    }
}

fn login(state: &AppState, payload: &LoginRequest) -> Result<(UserProfile, Cookie<'static>), ApiError> {
    let email = payload.email.trim().to_lowercase();
    let conn = state.connect()?;

    let (user, stored) = users::find_credentials(&conn, &email)?
        .ok_or_else(|| ApiError::InvalidCredentials("Invalid credentials".to_string()))?;
    if !verify_password(&payload.password, &stored) {
        warn!("wrong password for user {}", user.id);
        return Err(ApiError::InvalidCredentials("Invalid credentials".to_string()));
    }

    let cookie = open_session(&conn, user.id)?;
    info!("user {} logged in", user.id);
    Ok((user, cookie))
}
