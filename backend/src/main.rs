mod config;
mod gemini;
mod services;
mod state;
mod store;

use std::thread;
use std::time::Duration;

use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer};
use env_logger::Env;
use include_dir::{include_dir, Dir};
use log::{error, info};
use mime_guess::from_path;
use serde_json::json;

use crate::config::Config;
use crate::state::AppState;

static STATIC_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/static/dist");

async fn serve_embedded(req: HttpRequest) -> HttpResponse {
    let path = req.path().trim_start_matches('/');
    let file_path = if path.is_empty() { "index.html" } else { path };

    match STATIC_DIR.get_file(file_path) {
        Some(file) => {
            let mime = from_path(file_path).first_or_octet_stream();
            HttpResponse::Ok()
                .content_type(mime.as_ref())
                .body(file.contents().to_vec())
        }
        None => match STATIC_DIR.get_file("index.html") {
            Some(index) => HttpResponse::Ok()
                .content_type("text/html; charset=utf-8")
                .body(index.contents().to_vec()),
            None => HttpResponse::NotFound().body("Not Found"),
        },
    }
}

async fn health() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "status": "ok" }))
}

/// Every route of the server; the embedded UI answers whatever is left.
fn configure_app(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().limit(10 * 1024 * 1024)) // 10 MB
        .route("/health", web::get().to(health))
        .configure(services::auth::configure_routes)
        .service(services::content::configure_routes())
        .default_service(web::route().to(serve_embedded));
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));
    let config = Config::from_env();
    let url = config.url();

    let conn = store::open(&config.db_path).map_err(std::io::Error::other)?;
    if let Err(e) = store::init_schema(&conn) {
        error!("could not prepare {}: {e}", config.db_path.display());
        return Err(std::io::Error::other(e));
    }
    drop(conn);

    if config.gemini_api_key.is_none() {
        info!("GEMINI_API_KEY is not set; generation requests will answer 503");
    }

    if config.open_browser {
        let url = url.clone();
        thread::spawn(move || {
            thread::sleep(Duration::from_millis(500));
            let _ = webbrowser::open(&url);
        });
    }

    let bind = (config.host.clone(), config.port);
    let app_state = AppState::new(config);

    info!("Server running at {}", url);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .configure(configure_app)
    })
    .bind(bind)?
    .run()
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::test;
    use common::model::user::UserProfile;
    use common::requests::{
        ContentCreatedResponse, ContentListResponse, ContentPayload, ContentResponse,
        ContentUpdatedResponse, ErrorResponse, LoginRequest, RegisterRequest,
    };
    use tempfile::TempDir;

    fn test_state(dir: &TempDir) -> AppState {
        let config = Config {
            db_path: dir.path().join("test.sqlite"),
            open_browser: false,
            ..Config::from_lookup(|_| None)
        };
        let conn = store::open(&config.db_path).expect("open");
        store::init_schema(&conn).expect("schema");
        AppState::new(config)
    }

    fn register(name: &str, email: &str) -> RegisterRequest {
        RegisterRequest {
            name: name.to_string(),
            email: email.to_string(),
            password: "secret-pass".to_string(),
        }
    }

    #[actix_web::test]
    async fn content_flow_is_owner_scoped() {
        let dir = TempDir::new().expect("tempdir");
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(test_state(&dir)))
                .configure(configure_app),
        )
        .await;

        // No session yet.
        let resp = test::call_service(&app, test::TestRequest::get().uri("/me").to_request()).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let resp = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/register")
                .set_json(register("Ada", "ada@example.com"))
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let ada_cookie = resp
            .response()
            .cookies()
            .find(|c| c.name() == services::auth::SESSION_COOKIE)
            .expect("session cookie")
            .into_owned();
        assert!(ada_cookie.http_only().unwrap_or(false));

        let me: UserProfile = test::call_and_read_body_json(
            &app,
            test::TestRequest::get().uri("/me").cookie(ada_cookie.clone()).to_request(),
        )
        .await;
        assert_eq!(me.email, "ada@example.com");

        let resp = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/content")
                .cookie(ada_cookie.clone())
                .set_json(ContentPayload {
                    title: "First".to_string(),
                    body: "<p>hello</p>".to_string(),
                })
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let created: ContentCreatedResponse = test::read_body_json(resp).await;
        let id = created.content_id;

        let updated: ContentUpdatedResponse = test::call_and_read_body_json(
            &app,
            test::TestRequest::put()
                .uri(&format!("/content/{id}"))
                .cookie(ada_cookie.clone())
                .set_json(ContentPayload {
                    title: String::new(),
                    body: "<p>edited</p>".to_string(),
                })
                .to_request(),
        )
        .await;
        assert_eq!(updated.content.title, "First");
        assert_eq!(updated.content.body, "<p>edited</p>");

        let listing: ContentListResponse = test::call_and_read_body_json(
            &app,
            test::TestRequest::get().uri("/content").cookie(ada_cookie.clone()).to_request(),
        )
        .await;
        assert_eq!(listing.contents.len(), 1);

        // A second user cannot see Ada's document.
        let resp = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/register")
                .set_json(register("Bob", "bob@example.com"))
                .to_request(),
        )
        .await;
        let bob_cookie = resp
            .response()
            .cookies()
            .find(|c| c.name() == services::auth::SESSION_COOKIE)
            .expect("session cookie")
            .into_owned();
        let resp = test::call_service(
            &app,
            test::TestRequest::get()
                .uri(&format!("/content/{id}"))
                .cookie(bob_cookie)
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let error: ErrorResponse = test::read_body_json(resp).await;
        assert_eq!(error.detail, "Content not found");

        let fetched: ContentResponse = test::call_and_read_body_json(
            &app,
            test::TestRequest::get()
                .uri(&format!("/content/{id}"))
                .cookie(ada_cookie.clone())
                .to_request(),
        )
        .await;
        assert_eq!(fetched.content.id, Some(id));

        let resp = test::call_service(
            &app,
            test::TestRequest::delete()
                .uri(&format!("/content/{id}"))
                .cookie(ada_cookie.clone())
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);

        // Logging out invalidates the old cookie.
        let resp = test::call_service(
            &app,
            test::TestRequest::get().uri("/logout").cookie(ada_cookie.clone()).to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);
        let resp = test::call_service(
            &app,
            test::TestRequest::get().uri("/content").cookie(ada_cookie).to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn login_checks_the_password() {
        let dir = TempDir::new().expect("tempdir");
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(test_state(&dir)))
                .configure(configure_app),
        )
        .await;

        test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/register")
                .set_json(register("Ada", "ada@example.com"))
                .to_request(),
        )
        .await;

        let resp = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/login")
                .set_json(LoginRequest {
                    email: "ada@example.com".to_string(),
                    password: "wrong".to_string(),
                })
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let resp = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/login")
                .set_json(LoginRequest {
                    email: "ADA@example.com".to_string(),
                    password: "secret-pass".to_string(),
                })
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);

        let resp = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/register")
                .set_json(register("Again", "ada@example.com"))
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn generation_without_a_key_is_unavailable() {
        let dir = TempDir::new().expect("tempdir");
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(test_state(&dir)))
                .configure(configure_app),
        )
        .await;
        let resp = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/register")
                .set_json(register("Ada", "ada@example.com"))
                .to_request(),
        )
        .await;
        let cookie = resp
            .response()
            .cookies()
            .find(|c| c.name() == services::auth::SESSION_COOKIE)
            .expect("session cookie")
            .into_owned();

        let resp = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/content/generate")
                .cookie(cookie)
                .set_json(common::requests::GenerateRequest {
                    topic: "Rust".to_string(),
                })
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
