#![allow(dead_code)]

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;

use axum::body::Body;
use axum::extract::ConnectInfo;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use figment::{
    providers::{Format, Yaml},
    Figment,
};
use serde_json::Value;
use shortsgen::config::{Config, ConfigV1};
use shortsgen::routes::create_router;
use shortsgen::startup::build_state;

pub fn config_from_yaml(yaml: &str) -> ConfigV1 {
    let config: Config = Figment::new()
        .merge(Yaml::string(yaml))
        .extract()
        .expect("test config should parse");
    match config {
        Config::ConfigV1(c) => c,
    }
}

pub async fn build_app(config: ConfigV1) -> Router {
    let state = build_state(Arc::new(config)).await;
    create_router(state)
}

fn with_connect_info(mut request: Request<Body>) -> Request<Body> {
    request.extensions_mut().insert(ConnectInfo(SocketAddr::new(
        IpAddr::V4(Ipv4Addr::LOCALHOST),
        0,
    )));
    request
}

pub fn get(path: &str) -> Request<Body> {
    with_connect_info(
        Request::builder()
            .method(Method::GET)
            .uri(path)
            .body(Body::empty())
            .expect("failed to build request"),
    )
}

pub fn post_json(path: &str, bearer: Option<&str>, body: &Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri(path)
        .header("content-type", "application/json");
    if let Some(token) = bearer {
        builder = builder.header("Authorization", format!("Bearer {}", token));
    }
    with_connect_info(
        builder
            .body(Body::from(body.to_string()))
            .expect("failed to build request"),
    )
}

pub fn post_raw(path: &str, bearer: &str, body: &str) -> Request<Body> {
    with_connect_info(
        Request::builder()
            .method(Method::POST)
            .uri(path)
            .header("content-type", "application/json")
            .header("Authorization", format!("Bearer {}", bearer))
            .body(Body::from(body.to_string()))
            .expect("failed to build request"),
    )
}

pub const BOUNDARY: &str = "shortsgen-test-boundary";

/// A multipart body with a single `file` field.
pub fn post_file(path: &str, file_name: &str, content_type: &str, bytes: &[u8]) -> Request<Body> {
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

    with_connect_info(
        Request::builder()
            .method(Method::POST)
            .uri(path)
            .header(
                "content-type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .expect("failed to build request"),
    )
}

pub async fn body_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("failed to read body");
    serde_json::from_slice(&bytes).expect("body should be JSON")
}
