//! Exercises the chat-completion provider against a local axum server.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::{
    http::{HeaderMap, StatusCode},
    routing::post,
    Json, Router,
};
use semantic::ProviderConfig;
use serde_json::{json, Value};
use summarize::{
    ChatCompletionProvider, CompletionError, CompletionProvider, LocalSummaryConfig,
    SummarizationService, SummaryOrigin, SYSTEM_PROMPT,
};

async fn spawn(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}/v1")
}

fn config(base_url: String) -> ProviderConfig {
    ProviderConfig {
        api_key: "sk-test".into(),
        base_url,
        model: "gpt-4o-mini".into(),
        timeout_secs: 1,
    }
}

fn completion(content: &str) -> Value {
    json!({
        "id": "chatcmpl-1",
        "object": "chat.completion",
        "choices": [{"index": 0, "message": {"role": "assistant", "content": content}}]
    })
}

/// Router that counts hits and always answers with `status`.
fn failing_router(status: StatusCode, hits: Arc<AtomicUsize>) -> Router {
    Router::new().route(
        "/v1/chat/completions",
        post(move || {
            let hits = hits.clone();
            async move {
                hits.fetch_add(1, Ordering::SeqCst);
                (status, "upstream trouble")
            }
        }),
    )
}

const NOTE: &str = "Binary heaps keep the minimum at the root. Insert is logarithmic. \
                    Heapify is linear. Heaps back priority queues.";

#[tokio::test]
async fn request_carries_model_messages_and_temperature() -> anyhow::Result<()> {
    let router = Router::new().route(
        "/v1/chat/completions",
        post(|headers: HeaderMap, Json(body): Json<Value>| async move {
            let authorized = headers
                .get("authorization")
                .and_then(|v| v.to_str().ok())
                == Some("Bearer sk-test");
            let well_formed = body["model"] == "gpt-4o-mini"
                && body["messages"][0]["role"] == "system"
                && body["messages"][0]["content"] == SYSTEM_PROMPT
                && body["messages"][1]["role"] == "user"
                && body["messages"][1]["content"]
                    .as_str()
                    .is_some_and(|c| c.ends_with("hello"))
                && (body["temperature"].as_f64().unwrap_or_default() - 0.2).abs() < 1e-6;
            if authorized && well_formed {
                (StatusCode::OK, Json(completion("{\"summary\": \"hi\", \"keywords\": []}")))
            } else {
                (StatusCode::BAD_REQUEST, Json(json!({"error": body})))
            }
        }),
    );
    let base = spawn(router).await;

    let provider = ChatCompletionProvider::new(&config(base))?;
    let content = provider
        .complete(SYSTEM_PROMPT, &summarize::build_prompt("hello"))
        .await
        .map_err(|e| anyhow::anyhow!(e.to_string()))?;
    assert_eq!(content, "{\"summary\": \"hi\", \"keywords\": []}");
    Ok(())
}

#[tokio::test]
async fn status_and_envelope_errors_are_classified() {
    let router = Router::new()
        .route(
            "/v1/chat/completions",
            post(|| async { (StatusCode::UNAUTHORIZED, "no") }),
        );
    let base = spawn(router).await;
    let provider = ChatCompletionProvider::new(&config(base)).unwrap();
    assert_eq!(
        provider.complete("s", "u").await,
        Err(CompletionError::Status(401, "no".into()))
    );

    let router = Router::new().route(
        "/v1/chat/completions",
        post(|| async { Json(json!({"choices": []})) }),
    );
    let base = spawn(router).await;
    let provider = ChatCompletionProvider::new(&config(base)).unwrap();
    assert_eq!(provider.complete("s", "u").await, Err(CompletionError::NoChoices));

    let router = Router::new().route("/v1/chat/completions", post(|| async { "plain text" }));
    let base = spawn(router).await;
    let provider = ChatCompletionProvider::new(&config(base)).unwrap();
    assert!(matches!(
        provider.complete("s", "u").await,
        Err(CompletionError::Envelope(_))
    ));
}

#[tokio::test]
async fn wrapped_json_reply_is_decoded() {
    let router = Router::new().route(
        "/v1/chat/completions",
        post(|| async {
            Json(completion(
                "Sure!\n```json\n{\"summary\": \"Heaps in brief.\", \"keywords\": [\"heap\", \"priority queue\"]}\n```",
            ))
        }),
    );
    let base = spawn(router).await;

    let service = SummarizationService::new(&config(base), LocalSummaryConfig::default());
    let r = service.summarize(NOTE).await.unwrap();
    assert_eq!(r.origin, SummaryOrigin::Remote);
    assert_eq!(r.summary, "Heaps in brief.");
    assert_eq!(r.keywords, vec!["heap", "priority queue"]);
}

#[tokio::test]
async fn prose_reply_becomes_raw_summary() {
    let router = Router::new().route(
        "/v1/chat/completions",
        post(|| async { Json(completion("  Heaps are trees with an ordering rule.  ")) }),
    );
    let base = spawn(router).await;

    let service = SummarizationService::new(&config(base), LocalSummaryConfig::default());
    let r = service.summarize(NOTE).await.unwrap();
    assert_eq!(r.origin, SummaryOrigin::RemoteRaw);
    assert_eq!(r.summary, "Heaps are trees with an ordering rule.");
    assert!(r.keywords.is_empty());
}

#[tokio::test]
async fn two_server_errors_fall_back_to_local() {
    let hits = Arc::new(AtomicUsize::new(0));
    let base = spawn(failing_router(StatusCode::INTERNAL_SERVER_ERROR, hits.clone())).await;

    let service = SummarizationService::new(&config(base), LocalSummaryConfig::default());
    let r = service.summarize(NOTE).await.unwrap();

    assert_eq!(hits.load(Ordering::SeqCst), 2);
    assert_eq!(r.origin, SummaryOrigin::Local);
    assert_eq!(
        r.summary,
        "Binary heaps keep the minimum at the root.Insert is logarithmic.Heapify is linear."
    );
    assert_eq!(r.keywords[0], "heaps");
}

#[tokio::test]
async fn timeouts_fall_back_to_local() {
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = hits.clone();
    let router = Router::new().route(
        "/v1/chat/completions",
        post(move || {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_secs(3)).await;
                Json(completion("{\"summary\": \"late\"}"))
            }
        }),
    );
    let base = spawn(router).await;

    let service = SummarizationService::new(&config(base), LocalSummaryConfig::default());
    let r = service.summarize(NOTE).await.unwrap();
    assert_eq!(r.origin, SummaryOrigin::Local);
    assert_eq!(hits.load(Ordering::SeqCst), 2);
}
