use actix_web::{web, HttpResponse, Responder};
use common::model::user::UserProfile;
use common::requests::RegisterRequest;
use log::{error, info};

use super::open_session;
use super::password::hash_password;
use crate::services::ApiError;
use crate::state::AppState;
use crate::store::users;

const MIN_PASSWORD_CHARS: usize = 6;

pub async fn process(state: web::Data<AppState>, payload: web::Json<RegisterRequest>) -> impl Responder {
    match register(&state, &payload) {
        Ok((user, cookie)) => HttpResponse::Created().cookie(cookie).json(user),
        Err(e) => e.to_response(),
    }
}

fn register(
    state: &AppState,
    payload: &RegisterRequest,
) -> Result<(UserProfile, actix_web::cookie::Cookie<'static>), ApiError> {
    let name = payload.name.trim();
    let email = payload.email.trim().to_lowercase();
    if name.is_empty() || !email.contains('@') {
        return Err(ApiError::BadRequest("A name and a valid email are required".to_string()));
    }
    if payload.password.chars().count() < MIN_PASSWORD_CHARS {
        return Err(ApiError::BadRequest(format!(
            "Password must be at least {MIN_PASSWORD_CHARS} characters"
        )));
    }

    let password_hash = hash_password(&payload.password).map_err(|e| {
        error!("password hashing failed: {e}");
        ApiError::Internal("Could not register user".to_string())
    })?;
    let conn = state.connect()?;
    let user = users::create_user(&conn, name, &email, &password_hash)?;
    let cookie = open_session(&conn, user.id)?;
    info!("registered user {}", user.id);
    Ok((user, cookie))
}
