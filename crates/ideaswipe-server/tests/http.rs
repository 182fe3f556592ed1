use std::sync::Arc;

use async_trait::async_trait;
use ideaswipe_core::AiSettings;
use ideaswipe_server::{config::Config, router, state::AppState};
use ideaswipe_suggest::{IdeaError, IdeaService, TextGenerator};
use serde_json::{Value, json};
use tokio::net::TcpListener;

struct Canned(Result<&'static str, &'static str>);

#[async_trait]
impl TextGenerator for Canned {
    async fn complete(&self, _prompt: &str) -> Result<String, IdeaError> {
        self.0
            .map(str::to_string)
            .map_err(|status| IdeaError::RemoteCallFailed(status.to_string()))
    }
}

const IDEA_REPLY: &str = r#"Here is a strong one:
{
  "name": "Permitly",
  "tagline": "Construction permits in days, not months",
  "pitch": "Automates permit applications for general contractors.",
  "vibe": "B2B SaaS",
  "problem": "Permits delay 40% of projects",
  "solution": "Jurisdiction-aware form filling",
  "targetAudience": "Mid-size general contractors",
  "secretSauce": "Database of municipal requirements",
  "monetization": "Per-permit fee plus subscription",
  "hurdle": "Fragmented municipal systems",
  "firstStep": "Shadow five permit expediters"
}"#;

/// Serve the router on an ephemeral port and return its base URL.
async fn spawn(reply: Result<&'static str, &'static str>) -> String {
    let config = Config {
        port: 0,
        ai: AiSettings::default(),
    };
    let state = AppState::with_service(config, IdeaService::new(Arc::new(Canned(reply))));
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router(state)).await.unwrap();
    });
    format!("http://{addr}")
}

#[tokio::test]
async fn generate_returns_flat_idea() {
    let base = spawn(Ok(IDEA_REPLY)).await;
    let res = reqwest::Client::new()
        .post(format!("{base}/generate-idea"))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 200);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["name"], "Permitly");
    assert_eq!(body["targetAudience"], "Mid-size general contractors");
    assert_eq!(body.as_object().unwrap().len(), 11);
}

#[tokio::test]
async fn generate_rejects_other_methods() {
    let base = spawn(Ok(IDEA_REPLY)).await;
    let res = reqwest::get(format!("{base}/generate-idea")).await.unwrap();

    assert_eq!(res.status(), 405);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body, json!({ "error": "Method not allowed" }));
}

#[tokio::test]
async fn options_succeeds_and_allows_any_origin() {
    let base = spawn(Ok(IDEA_REPLY)).await;
    let client = reqwest::Client::new();

    let plain = client
        .request(reqwest::Method::OPTIONS, format!("{base}/refine-idea"))
        .send()
        .await
        .unwrap();
    assert_eq!(plain.status(), 200);

    let preflight = client
        .request(reqwest::Method::OPTIONS, format!("{base}/generate-idea"))
        .header("Origin", "https://example.com")
        .header("Access-Control-Request-Method", "POST")
        .send()
        .await
        .unwrap();
    assert!(preflight.status().is_success());
    assert_eq!(
        preflight.headers()["access-control-allow-origin"],
        "*"
    );
}

#[tokio::test]
async fn generate_failure_includes_details() {
    let base = spawn(Err("status 529")).await;
    let res = reqwest::Client::new()
        .post(format!("{base}/generate-idea"))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 500);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "text generation request failed: status 529");
    assert_eq!(body["details"], "Check server logs for more information");
}

#[tokio::test]
async fn refine_without_current_idea_is_bad_request() {
    let base = spawn(Ok(IDEA_REPLY)).await;
    let client = reqwest::Client::new();

    for body in ["{}", "", r#"{"currentIdea": null}"#] {
        let res = client
            .post(format!("{base}/refine-idea"))
            .header("Content-Type", "application/json")
            .body(body)
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), 400, "body {body:?}");
        let json: Value = res.json().await.unwrap();
        assert_eq!(json, json!({ "error": "Current idea is required" }));
    }
}

#[tokio::test]
async fn refine_returns_refined_idea() {
    let base = spawn(Ok(IDEA_REPLY)).await;
    let res = reqwest::Client::new()
        .post(format!("{base}/refine-idea"))
        .json(&json!({ "currentIdea": { "name": "Permit Helper" } }))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 200);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["name"], "Permitly");
}

#[tokio::test]
async fn refine_extraction_failure_hides_raw_text() {
    let base = spawn(Ok("Sorry, no idea today.")).await;
    let res = reqwest::Client::new()
        .post(format!("{base}/refine-idea"))
        .json(&json!({ "currentIdea": { "name": "Permit Helper" } }))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 500);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body, json!({ "error": "No valid JSON found in model response" }));
}
