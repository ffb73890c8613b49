#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use awards_api::config::ServerConfig;
use awards_api::router::build_app_router;
use awards_api::state::AppState;
use awards_core::dashboard::Dashboard;
use awards_core::gateway::{EntityGateway, GatewayError};
use awards_core::record::{field_text, Record};
use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

/// A backend write observed by [`MemoryGateway`].
#[derive(Debug, Clone, PartialEq)]
pub enum Write {
    Create { endpoint: String, body: Record },
    Update { endpoint: String, id: String, body: Record },
    Delete { endpoint: String, id: String },
}

/// In-memory stand-in for the REST backend.
///
/// Collections are keyed by endpoint segment. Records created without an
/// identifier get the next integer id in the endpoint's id field, which the
/// gateway learns from [`MemoryGateway::id_field`].
#[derive(Default)]
pub struct MemoryGateway {
    collections: Mutex<HashMap<String, Vec<Record>>>,
    id_fields: Mutex<HashMap<String, String>>,
    writes: Mutex<Vec<Write>>,
    fail: AtomicBool,
}

impl MemoryGateway {
    pub fn new() -> Arc<Self> {
        let gw = Self::default();
        for schema in awards_core::catalog::ALL {
            gw.id_fields
                .lock()
                .unwrap()
                .insert(schema.endpoint.to_string(), schema.id_field.to_string());
        }
        Arc::new(gw)
    }

    pub fn seed(&self, endpoint: &str, rows: Vec<Value>) {
        let rows = rows
            .into_iter()
            .map(|v| match v {
                Value::Object(m) => m,
                _ => panic!("seed rows must be objects"),
            })
            .collect();
        self.collections
            .lock()
            .unwrap()
            .insert(endpoint.to_string(), rows);
    }

    pub fn rows(&self, endpoint: &str) -> Vec<Record> {
        self.collections
            .lock()
            .unwrap()
            .get(endpoint)
            .cloned()
            .unwrap_or_default()
    }

    pub fn writes(&self) -> Vec<Write> {
        self.writes.lock().unwrap().clone()
    }

    pub fn set_failing(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    fn id_field(&self, endpoint: &str) -> String {
        self.id_fields
            .lock()
            .unwrap()
            .get(endpoint)
            .cloned()
            .unwrap_or_else(|| "id".into())
    }

    fn check(&self) -> Result<(), GatewayError> {
        if self.fail.load(Ordering::SeqCst) {
            Err(GatewayError::Network("connection refused".into()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl EntityGateway for MemoryGateway {
    async fn list(&self, endpoint: &str) -> Result<Vec<Record>, GatewayError> {
        self.check()?;
        Ok(self.rows(endpoint))
    }

    async fn create(&self, endpoint: &str, record: &Record) -> Result<(), GatewayError> {
        self.writes.lock().unwrap().push(Write::Create {
            endpoint: endpoint.to_string(),
            body: record.clone(),
        });
        self.check()?;

        let id_field = self.id_field(endpoint);
        let mut collections = self.collections.lock().unwrap();
        let rows = collections.entry(endpoint.to_string()).or_default();
        let mut stored = record.clone();
        stored.insert(id_field, Value::from(rows.len() as u64 + 1));
        rows.push(stored);
        Ok(())
    }

    async fn update(&self, endpoint: &str, id: &str, record: &Record) -> Result<(), GatewayError> {
        self.writes.lock().unwrap().push(Write::Update {
            endpoint: endpoint.to_string(),
            id: id.to_string(),
            body: record.clone(),
        });
        self.check()?;

        let id_field = self.id_field(endpoint);
        let mut collections = self.collections.lock().unwrap();
        let rows = collections.entry(endpoint.to_string()).or_default();
        match rows.iter_mut().find(|r| field_text(r, &id_field) == id) {
            Some(row) => {
                *row = record.clone();
                Ok(())
            }
            None => Err(GatewayError::Status {
                status: 404,
                body: String::new(),
            }),
        }
    }

    async fn delete(&self, endpoint: &str, id: &str) -> Result<(), GatewayError> {
        self.writes.lock().unwrap().push(Write::Delete {
            endpoint: endpoint.to_string(),
            id: id.to_string(),
        });
        self.check()?;

        let id_field = self.id_field(endpoint);
        let mut collections = self.collections.lock().unwrap();
        let rows = collections.entry(endpoint.to_string()).or_default();
        rows.retain(|r| field_text(r, &id_field) != id);
        Ok(())
    }
}

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        backend_url: "http://backend.test".to_string(),
    }
}

/// Build the full application router over `gateway`.
///
/// The returned router shares page state across clones, so tests can
/// issue several requests against the same pages.
pub fn build_test_app(gateway: Arc<MemoryGateway>) -> Router {
    let config = test_config();
    let state = AppState {
        dashboard: Arc::new(Dashboard::new(gateway)),
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> Response<Body> {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.clone().oneshot(request).await.unwrap()
}

pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None).await
}

pub async fn post(app: &Router, uri: &str) -> Response<Body> {
    send(app, Method::POST, uri, None).await
}

pub async fn put_json(app: &Router, uri: &str, body: Value) -> Response<Body> {
    send(app, Method::PUT, uri, Some(body)).await
}

pub async fn patch_json(app: &Router, uri: &str, body: Value) -> Response<Body> {
    send(app, Method::PATCH, uri, Some(body)).await
}

pub async fn delete(app: &Router, uri: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, None).await
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    String::from_utf8(body_bytes(response).await).unwrap()
}
