//! Router harness shared by the HTTP tests.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::body::{to_bytes, Body};
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use secrecy::SecretString;
use serde_json::Value;
use staffing_service::auth::issue_token;
use staffing_service::config::BootstrapUser;
use staffing_service::{create_app, AppState, Config, TokenSettings};
use test_utils::fixtures::{primary_key_pair, KeyPair};
use token_codec::{SignatureEncoding, StaticKeyProvider};
use tower::ServiceExt;

pub const USERNAME: &str = "admin";
pub const PASSWORD: &str = "correct horse battery staple";

pub struct TestApp {
    pub app: Router,
    pub state: AppState,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with(primary_key_pair(), SignatureEncoding::Raw).await
    }

    pub async fn with(keys: KeyPair, encoding: SignatureEncoding) -> Self {
        let config = Config {
            signature_encoding: encoding,
            ..Config::default()
        };
        let provider = StaticKeyProvider::new(keys.private_pem_str(), keys.public_pem_str());
        let state = AppState::in_memory(TokenSettings::from_config(&config, Arc::new(provider)));
        state
            .seed_user(&BootstrapUser {
                username: USERNAME.to_string(),
                password: SecretString::from(PASSWORD),
                email: "admin@example.com".to_string(),
            })
            .await
            .unwrap();

        Self {
            app: create_app(state.clone(), Duration::from_secs(5)),
            state,
        }
    }

    /// Token signed with the app's own key.
    pub fn token(&self) -> String {
        issue_token(&self.state.tokens, USERNAME).unwrap()
    }

    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
        }
        let body = match body {
            Some(json) => {
                builder = builder.header(CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        self.send_request(builder.body(body).unwrap()).await
    }

    pub async fn send_request(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };
        (status, json)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Method::GET, uri, Some(&self.token()), None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::POST, uri, Some(&self.token()), Some(body)).await
    }

    pub async fn put(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::PUT, uri, Some(&self.token()), Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Method::DELETE, uri, Some(&self.token()), None).await
    }
}
