//! Integration tests for OpenAiProvider against a local fake completion service

use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::post,
    Json, Router,
};
use basket_domain::{CompletionProvider, CompletionRequest};
use basket_llm::{Endpoint, LlmError, OpenAiProvider};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;

#[derive(Clone, Default)]
struct Seen {
    headers: Arc<Mutex<Vec<HeaderMap>>>,
    bodies: Arc<Mutex<Vec<Value>>>,
    queries: Arc<Mutex<Vec<HashMap<String, String>>>>,
}

async fn reply_with_milk(
    State(seen): State<Seen>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Json<Value> {
    seen.headers.lock().unwrap().push(headers);
    seen.bodies.lock().unwrap().push(body);
    seen.queries.lock().unwrap().push(query);

    Json(json!({
        "id": "chatcmpl-1",
        "choices": [{
            "index": 0,
            "message": {
                "role": "assistant",
                "content": "{\"itemName\":\"milk\",\"quantity\":\"1\",\"unit\":\"l\",\"brand\":\"amul\",\"priority\":\"LOW\",\"details\":\"\"}"
            },
            "finish_reason": "stop"
        }]
    }))
}

/// Start a fake service on an ephemeral port and return its base URL
async fn spawn_service(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

fn request() -> CompletionRequest {
    CompletionRequest::new("Extract JSON", "1l milk of amul brand", 0.2, 2000)
}

#[tokio::test]
async fn test_openai_round_trip() {
    let seen = Seen::default();
    let app = Router::new()
        .route("/v1/chat/completions", post(reply_with_milk))
        .with_state(seen.clone());
    let base = spawn_service(app).await;

    let provider = OpenAiProvider::new(
        Endpoint::OpenAi {
            base_url: format!("{}/v1", base),
            model: "gpt-3.5-turbo".to_string(),
        },
        "sk-test",
        Duration::from_secs(5),
    )
    .unwrap();

    let text = provider.complete(&request()).await.unwrap();
    assert!(text.contains("\"itemName\":\"milk\""));

    let headers = seen.headers.lock().unwrap();
    assert_eq!(headers[0]["authorization"], "Bearer sk-test");

    let bodies = seen.bodies.lock().unwrap();
    assert_eq!(bodies[0]["model"], "gpt-3.5-turbo");
    assert_eq!(bodies[0]["messages"][1]["content"], "1l milk of amul brand");
    assert_eq!(bodies[0]["max_tokens"], 2000);
}

#[tokio::test]
async fn test_azure_round_trip() {
    let seen = Seen::default();
    let app = Router::new()
        .route(
            "/openai/deployments/gpt-4.1/chat/completions",
            post(reply_with_milk),
        )
        .with_state(seen.clone());
    let base = spawn_service(app).await;

    let provider = OpenAiProvider::new(
        Endpoint::Azure {
            endpoint: base,
            deployment: "gpt-4.1".to_string(),
            api_version: "2024-02-15-preview".to_string(),
        },
        "azure-key",
        Duration::from_secs(5),
    )
    .unwrap();

    provider.complete(&request()).await.unwrap();

    let headers = seen.headers.lock().unwrap();
    assert_eq!(headers[0]["api-key"], "azure-key");
    assert!(headers[0].get("authorization").is_none());

    let queries = seen.queries.lock().unwrap();
    assert_eq!(queries[0]["api-version"], "2024-02-15-preview");
}

#[tokio::test]
async fn test_unauthorized_maps_to_authentication_error() {
    let app = Router::new().route(
        "/v1/chat/completions",
        post(|| async { (StatusCode::UNAUTHORIZED, "bad key").into_response() }),
    );
    let base = spawn_service(app).await;

    let provider = OpenAiProvider::new(
        Endpoint::OpenAi {
            base_url: format!("{}/v1", base),
            model: "gpt-3.5-turbo".to_string(),
        },
        "wrong",
        Duration::from_secs(5),
    )
    .unwrap();

    let result = provider.complete(&request()).await;
    assert!(matches!(result, Err(LlmError::Authentication(_))));
}

#[tokio::test]
async fn test_rate_limit_and_server_errors() {
    let app = Router::new()
        .route(
            "/limited/chat/completions",
            post(|| async { StatusCode::TOO_MANY_REQUESTS.into_response() }),
        )
        .route(
            "/broken/chat/completions",
            post(|| async { (StatusCode::BAD_GATEWAY, "upstream down").into_response() }),
        );
    let base = spawn_service(app).await;

    let limited = OpenAiProvider::new(
        Endpoint::OpenAi {
            base_url: format!("{}/limited", base),
            model: "m".to_string(),
        },
        "k",
        Duration::from_secs(5),
    )
    .unwrap();
    assert!(matches!(
        limited.complete(&request()).await,
        Err(LlmError::RateLimitExceeded)
    ));

    let broken = OpenAiProvider::new(
        Endpoint::OpenAi {
            base_url: format!("{}/broken", base),
            model: "m".to_string(),
        },
        "k",
        Duration::from_secs(5),
    )
    .unwrap();
    match broken.complete(&request()).await {
        Err(LlmError::Api { status, body }) => {
            assert_eq!(status, 502);
            assert_eq!(body, "upstream down");
        }
        other => panic!("Expected Api error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_empty_choices_is_invalid_response() {
    let app = Router::new().route(
        "/v1/chat/completions",
        post(|| async { Json(json!({ "choices": [] })) }),
    );
    let base = spawn_service(app).await;

    let provider = OpenAiProvider::new(
        Endpoint::OpenAi {
            base_url: format!("{}/v1", base),
            model: "m".to_string(),
        },
        "k",
        Duration::from_secs(5),
    )
    .unwrap();

    assert!(matches!(
        provider.complete(&request()).await,
        Err(LlmError::InvalidResponse(_))
    ));
}

#[tokio::test]
async fn test_slow_service_times_out() {
    let app = Router::new().route(
        "/v1/chat/completions",
        post(|| async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Json(json!({ "choices": [] }))
        }),
    );
    let base = spawn_service(app).await;

    let provider = OpenAiProvider::new(
        Endpoint::OpenAi {
            base_url: format!("{}/v1", base),
            model: "m".to_string(),
        },
        "k",
        Duration::from_millis(200),
    )
    .unwrap();

    assert!(matches!(
        provider.complete(&request()).await,
        Err(LlmError::Timeout(_))
    ));
}
