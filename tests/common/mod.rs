// tests/common/mod.rs
#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    response::Response,
    Router,
};
use chamada::{
    db,
    models::{
        classroom::CreateClassroomForm,
        profile::{CurrentUser, UserType},
    },
    services::{code_generator::CodeGenerator, profile_service},
    state::AppState,
    web,
};
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    SqlitePool,
};
use std::{str::FromStr, time::Duration};
use tower::ServiceExt;
use tower_sessions::{cookie::Key, MemoryStore};

/// Base em memória com as migrações aplicadas. Uma só conexão, senão cada
/// conexão veria uma base diferente.
pub async fn test_pool() -> SqlitePool {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .expect("url sqlite")
        .foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
        .expect("pool em memória");
    db::run_migrations(&pool).await.expect("migrações");
    pool
}

pub fn test_state(pool: SqlitePool, seed: u64) -> AppState {
    AppState::new(pool, CodeGenerator::seeded(seed), Duration::from_secs(5))
}

/// Perfil inserido diretamente (hash fictício: não serve para login).
pub async fn create_profile(pool: &SqlitePool, name: &str, email: &str, user_type: UserType) -> CurrentUser {
    let profile = profile_service::insert_profile(pool, name, email, user_type, "hash-de-teste")
        .await
        .expect("inserir perfil");
    CurrentUser::from(&profile)
}

pub fn classroom_form(name: &str, period: &str, max_absences: &str, total_classes: &str) -> CreateClassroomForm {
    CreateClassroomForm {
        name: name.to_string(),
        period: period.to_string(),
        schedule: String::new(),
        max_absences: max_absences.to_string(),
        total_classes: total_classes.to_string(),
    }
}

pub async fn count_rows(pool: &SqlitePool, table: &str) -> i64 {
    sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM {}", table))
        .fetch_one(pool)
        .await
        .expect("contagem")
}

// --- Cliente HTTP com cookie de sessão ---

pub struct TestClient {
    app: Router,
    cookie: Option<String>,
}

impl TestClient {
    pub fn new(state: AppState) -> Self {
        let app = web::routes::create_app(state, MemoryStore::default(), Key::from(&[7u8; 64]));
        Self { app, cookie: None }
    }

    async fn send(&mut self, request: Request<Body>) -> Response {
        let response = self.app.clone().oneshot(request).await.expect("resposta");
        if let Some(value) = response.headers().get(header::SET_COOKIE) {
            let raw = value.to_str().expect("set-cookie ascii");
            let pair = raw.split(';').next().unwrap_or_default().to_string();
            self.cookie = Some(pair);
        }
        response
    }

    pub async fn get(&mut self, uri: &str) -> Response {
        let mut builder = Request::builder().method("GET").uri(uri);
        if let Some(cookie) = &self.cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        self.send(builder.body(Body::empty()).unwrap()).await
    }

    pub async fn post_form(&mut self, uri: &str, form: &[(&str, &str)]) -> Response {
        let body = form
            .iter()
            .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        if let Some(cookie) = &self.cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        self.send(builder.body(Body::from(body)).unwrap()).await
    }

    /// Regista uma conta pela rota /register (fica com a sessão aberta).
    pub async fn register(&mut self, name: &str, email: &str, user_type: &str) -> Response {
        self.post_form(
            "/register",
            &[
                ("name", name),
                ("email", email),
                ("password", "segredo123"),
                ("user_type", user_type),
            ],
        )
        .await
    }
}

/// Destino de um redirect, já com a query string descodificada.
pub fn location(response: &Response) -> String {
    assert!(
        response.status().is_redirection(),
        "esperava redirect, veio {}",
        response.status()
    );
    let raw = response
        .headers()
        .get(header::LOCATION)
        .expect("header Location")
        .to_str()
        .expect("location ascii");
    urlencoding::decode(raw).expect("location utf-8").into_owned()
}

pub async fn body_text(response: Response) -> String {
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("corpo");
    String::from_utf8(bytes.to_vec()).expect("corpo utf-8")
}
