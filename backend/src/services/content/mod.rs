//! # Content Service Module
//!
//! Document CRUD and AI drafting under `/content`. Every endpoint requires a
//! session and only ever touches rows owned by its user.
//!
//! ## Registered Routes
//! - `GET /content`: the user's documents (`list`)
//! - `POST /content`: create a document, `201` with its id (`create`)
//! - `POST /content/generate`: draft an article about a topic, nothing is stored (`generate`)
//! - `GET /content/{id}`: one document (`get`)
//! - `PUT /content/{id}`: overwrite the non-empty fields sent (`update`)
//! - `DELETE /content/{id}`: remove a document (`delete`)

mod create;
mod delete;
mod generate;
mod get;
mod list;
mod update;

use actix_web::web::{delete, get, post, put, scope};
use actix_web::Scope;

const API_PATH: &str = "/content";

pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("", get().to(list::process))
        .route("", post().to(create::process))
        .route("/generate", post().to(generate::process))
        .route("/{content_id}", get().to(get::process))
        .route("/{content_id}", put().to(update::process))
        .route("/{content_id}", delete().to(delete::process))
}
