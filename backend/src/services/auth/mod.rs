//! Accounts and cookie sessions.
//!
//! A successful register or login stores a random token in the `sessions`
//! table and hands it to the browser in the HttpOnly `access_token` cookie.
//! Every protected handler resolves the cookie back to a user with
//! [`current_user`].

mod login;
mod logout;
mod me;
mod password;
mod register;

use actix_web::cookie::{time, Cookie, SameSite};
use actix_web::web::{get, post, ServiceConfig};
use actix_web::HttpRequest;
use common::model::user::UserProfile;
use rusqlite::Connection;
use uuid::Uuid;

use crate::services::ApiError;
use crate::store::users;

pub const SESSION_COOKIE: &str = "access_token";
const SESSION_MINUTES: i64 = 60;

/// Registers the account endpoints at the root of the application.
///
/// - `POST /register`: create an account and log in
/// - `POST /login`: open a session
/// - `GET /logout`: close the session and clear the cookie
/// - `GET /me`: profile of the current session
pub fn configure_routes(cfg: &mut ServiceConfig) {
    cfg.route("/register", post().to(register::process))
        .route("/login", post().to(login::process))
        .route("/logout", get().to(logout::process))
        .route("/me", get().to(me::process));
}

/// The user owning the request's session cookie.
pub fn current_user(req: &HttpRequest, conn: &Connection) -> Result<UserProfile, ApiError> {
    let cookie = req.cookie(SESSION_COOKIE).ok_or(ApiError::Unauthorized)?;
    users::session_user(conn, cookie.value())?.ok_or(ApiError::Unauthorized)
}

/// Stores a new session for `user_id` and returns its cookie.
fn open_session(conn: &Connection, user_id: i64) -> Result<Cookie<'static>, ApiError> {
    let token = format!("{}{}", Uuid::new_v4().simple(), Uuid::new_v4().simple());
    users::create_session(conn, user_id, &token, chrono::Duration::minutes(SESSION_MINUTES))?;
    Ok(Cookie::build(SESSION_COOKIE, token)
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::minutes(SESSION_MINUTES))
        .finish())
}

fn removal_cookie() -> Cookie<'static> {
    let mut cookie = Cookie::build(SESSION_COOKIE, "").path("/").finish();
    cookie.make_removal();
    cookie
}
