mod common;

use axum::http::{Method, Request, StatusCode};
use mockito::{Matcher, Server};
use serde_json::{json, Value};
use tower::ServiceExt;

use common::{body_json, build_app, config_from_yaml, post_json, post_raw};

const PROXY: &str = "/functions/v1/generate-video";

fn proxy_config(upstream_url: &str, store_url: Option<&str>) -> String {
    let store = match store_url {
        Some(url) => format!(
            "store:\n  enabled: true\n  type: supabase\n  url: \"{}\"\n  service_key: \"service-role\"\n",
            url
        ),
        None => "store:\n  enabled: false\n".to_string(),
    };
    format!(
        r#"
version: "1.0.0"
bind_address: "127.0.0.1:0"
logging:
  level: "debug"
  format: "json"
auth:
  timeout_in_ms: 2000
providers:
  - name: "Test tokens"
    type: "static"
    tokens:
      - token: "alice-token"
        id: "user-alice"
        email: "alice@example.com"
proxy:
  upstream_url: "{upstream_url}"
  service_key: "backend-secret"
{store}"#
    )
}

fn valid_body() -> Value {
    json!({
        "storyText": "The moon fell asleep. The stars kept watch.",
        "captionFont": "poppins",
        "imageStyle": "fantasy",
        "ttsModel": "2"
    })
}

#[tokio::test]
async fn missing_header_is_unauthorized() {
    let app = build_app(config_from_yaml(&proxy_config("http://127.0.0.1:9", None))).await;

    let response = app
        .oneshot(post_json(PROXY, None, &valid_body()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        body_json(response).await,
        json!({"error": "Missing authorization header"})
    );
}

#[tokio::test]
async fn unknown_token_is_unauthorized() {
    let app = build_app(config_from_yaml(&proxy_config("http://127.0.0.1:9", None))).await;

    let response = app
        .oneshot(post_json(PROXY, Some("mallory-token"), &valid_body()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await, json!({"error": "Unauthorized"}));
}

#[tokio::test]
async fn missing_parameters_are_rejected_before_upstream() {
    let mut upstream = Server::new_async().await;
    let m = upstream
        .mock("POST", "/api/generate-video")
        .expect(0)
        .create_async()
        .await;
    let app = build_app(config_from_yaml(&proxy_config(&upstream.url(), None))).await;

    let body = json!({"storyPrompt": "a heist", "captionFont": "roboto"});
    let response = app
        .oneshot(post_json(PROXY, Some("alice-token"), &body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await,
        json!({"error": "Missing required parameters"})
    );
    m.assert_async().await;
}

#[tokio::test]
async fn malformed_json_is_an_internal_error() {
    let app = build_app(config_from_yaml(&proxy_config("http://127.0.0.1:9", None))).await;

    let response = app
        .oneshot(post_raw(PROXY, "alice-token", "{not json"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body_json(response).await["error"].is_string());
}

#[tokio::test]
async fn upstream_failure_becomes_500() {
    let mut upstream = Server::new_async().await;
    let m = upstream
        .mock("POST", "/api/generate-video")
        .with_status(502)
        .with_body("bad gateway")
        .create_async()
        .await;
    let app = build_app(config_from_yaml(&proxy_config(&upstream.url(), None))).await;

    let response = app
        .oneshot(post_json(PROXY, Some("alice-token"), &valid_body()))
        .await
        .unwrap();
    m.assert_async().await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body_json(response).await,
        json!({"error": "Python API error: 502"})
    );
}

#[tokio::test]
async fn upstream_detail_is_passed_through() {
    let mut upstream = Server::new_async().await;
    let m = upstream
        .mock("POST", "/api/generate-video")
        .with_status(500)
        .with_header("content-type", "application/json")
        .with_body(r#"{"detail": "Error generating video: out of memory"}"#)
        .create_async()
        .await;
    let app = build_app(config_from_yaml(&proxy_config(&upstream.url(), None))).await;

    let response = app
        .oneshot(post_json(PROXY, Some("alice-token"), &valid_body()))
        .await
        .unwrap();
    m.assert_async().await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body_json(response).await,
        json!({"error": "Error generating video: out of memory"})
    );
}

#[tokio::test]
async fn success_forwards_urls_and_persists_story_and_scenes() {
    let mut upstream = Server::new_async().await;
    let generate = upstream
        .mock("POST", "/api/generate-video")
        .match_header("authorization", "Bearer backend-secret")
        .match_body(Matcher::PartialJson(json!({
            "userId": "user-alice",
            "storyText": "The moon fell asleep. The stars kept watch.",
            "imageStyle": "fantasy"
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "videoUrl": "/videos/abc.mp4",
                "captionsUrl": "/videos/abc_captions.json",
                "message": "Video generated successfully",
                "scenes": [{
                    "imagePrompt": "a sleeping moon",
                    "imageUrl": "/images/1.png",
                    "narrationText": "The moon fell asleep.",
                    "audioUrl": "/audio/1.wav",
                    "startTime": 0.0,
                    "endTime": 2.5
                }]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let mut supabase = Server::new_async().await;
    let stories = supabase
        .mock("POST", "/rest/v1/stories")
        .match_header("authorization", "Bearer service-role")
        .match_body(Matcher::Json(json!([{
            "title": "The moon fell asleep",
            "user_id": "user-alice"
        }])))
        .with_status(201)
        .with_header("content-type", "application/json")
        .with_body(r#"[{"id": "story-1", "title": "The moon fell asleep", "user_id": "user-alice"}]"#)
        .create_async()
        .await;
    let scenes = supabase
        .mock("POST", "/rest/v1/scenes")
        .match_body(Matcher::AllOf(vec![
            Matcher::Regex(r#""story_id":"story-1""#.to_string()),
            Matcher::Regex(r#""narration_text":"The moon fell asleep.""#.to_string()),
        ]))
        .with_status(201)
        .create_async()
        .await;

    let config = proxy_config(&upstream.url(), Some(&supabase.url()));
    let app = build_app(config_from_yaml(&config)).await;

    let response = app
        .oneshot(post_json(PROXY, Some("alice-token"), &valid_body()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({
            "videoUrl": "/videos/abc.mp4",
            "captionsUrl": "/videos/abc_captions.json",
            "message": "Video generated successfully"
        })
    );
    generate.assert_async().await;
    stories.assert_async().await;
    scenes.assert_async().await;
}

#[tokio::test]
async fn unreadable_scenes_are_skipped_not_fatal() {
    let mut upstream = Server::new_async().await;
    let generate = upstream
        .mock("POST", "/api/generate-video")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "videoUrl": "/v.mp4",
                "captionsUrl": "/c.json",
                "scenes": [
                    {"imagePrompt": null, "narrationText": "broken", "startTime": 0.0, "endTime": 1.0},
                    {"imagePrompt": "a quiet harbour", "narrationText": "Boats rest.", "startTime": 1.0, "endTime": 3.0}
                ]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let mut supabase = Server::new_async().await;
    let stories = supabase
        .mock("POST", "/rest/v1/stories")
        .with_status(201)
        .with_header("content-type", "application/json")
        .with_body(r#"[{"id": 9}]"#)
        .create_async()
        .await;
    let scenes = supabase
        .mock("POST", "/rest/v1/scenes")
        .match_body(Matcher::AllOf(vec![
            Matcher::Regex(r#""narration_text":"Boats rest.""#.to_string()),
            Matcher::Regex(r#""story_id":"9""#.to_string()),
        ]))
        .with_status(201)
        .create_async()
        .await;

    let config = proxy_config(&upstream.url(), Some(&supabase.url()));
    let app = build_app(config_from_yaml(&config)).await;

    let response = app
        .oneshot(post_json(PROXY, Some("alice-token"), &valid_body()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({
            "videoUrl": "/v.mp4",
            "captionsUrl": "/c.json",
            "message": "Video generated successfully"
        })
    );
    generate.assert_async().await;
    stories.assert_async().await;
    scenes.assert_async().await;
}

#[tokio::test]
async fn store_failure_does_not_fail_the_request() {
    let mut upstream = Server::new_async().await;
    let generate = upstream
        .mock("POST", "/api/generate-video")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"videoUrl": "v.mp4", "captionsUrl": "c.json"}"#)
        .create_async()
        .await;

    let mut supabase = Server::new_async().await;
    let stories = supabase
        .mock("POST", "/rest/v1/stories")
        .with_status(500)
        .with_body("db down")
        .create_async()
        .await;

    let config = proxy_config(&upstream.url(), Some(&supabase.url()));
    let app = build_app(config_from_yaml(&config)).await;

    let response = app
        .oneshot(post_json(PROXY, Some("alice-token"), &valid_body()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    generate.assert_async().await;
    stories.assert_async().await;
}

#[tokio::test]
async fn preflight_answers_with_cors_headers() {
    let app = build_app(config_from_yaml(&proxy_config("http://127.0.0.1:9", None))).await;

    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri(PROXY)
        .body(axum::body::Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert!(response.status().is_success());
    assert!(response
        .headers()
        .contains_key("access-control-allow-origin"));
}
