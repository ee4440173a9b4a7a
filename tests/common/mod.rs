//! Shared harness: in-memory SQLite, temp upload/data dirs and a router.

#![allow(dead_code)]

use std::path::Path;
use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use sea_orm::{ConnectOptions, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use agritrack::config::{Config, ROLE_ADMIN, ROLE_STAFF};
use agritrack::infra::{AddressBook, Database, Migrator, Persistence};
use agritrack::services::{AuthService, Authenticator};
use agritrack::{create_router, AppState};

pub const SECRET: &str = "integration-test-secret-at-least-32-chars";
pub const ADMIN_PASSWORD: &str = "admin-password-1";

pub struct TestApp {
    pub router: Router,
    pub db: DatabaseConnection,
    pub config: Config,
    pub uploads: TempDir,
    _address_data: TempDir,
}

async fn memory_db() -> DatabaseConnection {
    // One connection, otherwise every pooled connection gets its own database
    let mut options = ConnectOptions::new("sqlite::memory:");
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);
    let db = sea_orm::Database::connect(options).await.unwrap();
    Migrator::up(&db, None).await.unwrap();
    db
}

fn write_address_data(dir: &Path) {
    std::fs::write(
        dir.join("provinces.json"),
        r#"[{"code":"0434","name":"Laguna"},{"code":"0410","name":"Batangas"}]"#,
    )
    .unwrap();
    std::fs::write(
        dir.join("municipalities.json"),
        r#"[
            {"code":"043411","name":"Los Baños","provinceCode":"0434"},
            {"code":"043403","name":"Bay","provinceCode":"0434"}
        ]"#,
    )
    .unwrap();
    std::fs::write(
        dir.join("barangays.json"),
        r#"[
            {"code":"043411004","name":"Batong Malake","municipalityCode":"043411"},
            {"code":"043411003","name":"Bambang","municipalityCode":"043411"}
        ]"#,
    )
    .unwrap();
}

impl TestApp {
    pub async fn spawn() -> Self {
        let db = memory_db().await;
        let uploads = tempfile::tempdir().unwrap();
        let address_data = tempfile::tempdir().unwrap();
        write_address_data(address_data.path());

        let mut config = Config::new("sqlite::memory:", SECRET);
        config.upload_dir = uploads.path().to_path_buf();
        config.address_data_dir = address_data.path().to_path_buf();

        let auth = Authenticator::new(Arc::new(Persistence::new(db.clone())), config.clone());
        auth.create_admin("admin".into(), ADMIN_PASSWORD.into(), ROLE_ADMIN.into())
            .await
            .unwrap();
        auth.create_admin("clerk".into(), "clerk-password-1".into(), ROLE_STAFF.into())
            .await
            .unwrap();

        let book = AddressBook::load(&config.address_data_dir).unwrap();
        let state = AppState::from_config(
            Arc::new(Database::from_connection(db.clone())),
            config.clone(),
            book,
        );

        Self {
            router: create_router(state),
            db,
            config,
            uploads,
            _address_data: address_data,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into()))
        };
        (status, body)
    }

    pub async fn login(&self, username: &str, password: &str) -> (StatusCode, Value) {
        self.send(json_request(
            Method::POST,
            "/api/auth/login",
            None,
            serde_json::json!({ "username": username, "password": password }),
        ))
        .await
    }

    pub async fn admin_token(&self) -> String {
        let (status, body) = self.login("admin", ADMIN_PASSWORD).await;
        assert_eq!(status, StatusCode::OK, "{body}");
        body["accessToken"].as_str().unwrap().to_string()
    }

    pub async fn get(&self, uri: &str, token: &str) -> (StatusCode, Value) {
        self.send(empty_request(Method::GET, uri, Some(token))).await
    }

    pub async fn delete(&self, uri: &str, token: &str) -> (StatusCode, Value) {
        self.send(empty_request(Method::DELETE, uri, Some(token)))
            .await
    }

    pub async fn post_json(&self, uri: &str, token: &str, body: Value) -> (StatusCode, Value) {
        self.send(json_request(Method::POST, uri, Some(token), body))
            .await
    }

    pub async fn put_json(&self, uri: &str, token: &str, body: Value) -> (StatusCode, Value) {
        self.send(json_request(Method::PUT, uri, Some(token), body))
            .await
    }

    /// Register a beneficiary through the multipart endpoint.
    pub async fn register(&self, token: &str, first: &str, last: &str) -> Value {
        let form = Form::new()
            .text("firstName", first)
            .text("lastName", last)
            .text("gender", "female")
            .text("province", "Laguna")
            .text("municipality", "Los Baños")
            .text("barangay", "Batong Malake");
        let (status, body) = self
            .send(form.request(Method::POST, "/api/beneficiaries", token))
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body
    }

    pub fn upload_exists(&self, name: &str) -> bool {
        self.uploads.path().join(name).exists()
    }
}

fn authorized(builder: axum::http::request::Builder, token: Option<&str>) -> axum::http::request::Builder {
    match token {
        Some(token) => builder.header(header::AUTHORIZATION, format!("Bearer {}", token)),
        None => builder,
    }
}

pub fn empty_request(method: Method, uri: &str, token: Option<&str>) -> Request<Body> {
    authorized(Request::builder().method(method).uri(uri), token)
        .body(Body::empty())
        .unwrap()
}

pub fn json_request(method: Method, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    authorized(Request::builder().method(method).uri(uri), token)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Minimal multipart/form-data encoder
pub struct Form {
    body: Vec<u8>,
}

const BOUNDARY: &str = "agritrack-test-boundary";

impl Form {
    pub fn new() -> Self {
        Self { body: Vec::new() }
    }

    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
        self
    }

    pub fn file(mut self, name: &str, file_name: &str, bytes: &[u8]) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        self.body.extend_from_slice(bytes);
        self.body.extend_from_slice(b"\r\n");
        self
    }

    pub fn request(mut self, method: Method, uri: &str, token: &str) -> Request<Body> {
        self.body
            .extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        authorized(Request::builder().method(method).uri(uri), Some(token))
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(self.body))
            .unwrap()
    }
}
