//! End-to-end tests against the router served over a loopback socket.

#![allow(clippy::unwrap_used, reason = "test code")]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use readoku_core::{LedgerConfig, NewStory, Story, UserId};
use readoku_http::{AppState, USER_ID_HEADER, create_router};
use readoku_llm::{LlmError, StoryGenerator};
use readoku_storage::traits::{StoryStore, UserStore};
use readoku_storage::{MemoryStorage, StorageBackend};
use reqwest::StatusCode;
use serde_json::Value;

struct EchoGenerator;

#[async_trait]
impl StoryGenerator for EchoGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        Ok(format!("a story about {prompt}"))
    }
}

struct TestServer {
    base: String,
    memory: MemoryStorage,
    client: reqwest::Client,
}

impl TestServer {
    async fn start() -> Self {
        let memory = MemoryStorage::new();
        let storage = Arc::new(StorageBackend::Memory(memory.clone()));
        let config = LedgerConfig {
            daily_limit: readoku_core::DailyLimit::new(1).unwrap(),
            ..LedgerConfig::default()
        };
        let state = Arc::new(AppState::new(
            storage,
            Arc::new(EchoGenerator),
            config,
            "http://localhost:5173".to_owned(),
        ));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, create_router(state)).await.unwrap();
        });
        Self { base: format!("http://{addr}"), memory, client: reqwest::Client::new() }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base)
    }

    async fn user(&self) -> UserId {
        static NEXT: AtomicUsize = AtomicUsize::new(0);
        let n = NEXT.fetch_add(1, Ordering::Relaxed);
        self.memory.create_user(&format!("reader{n}@example.com")).await.unwrap()
    }

    async fn story(&self, user: UserId, content: &str) -> Story {
        let story =
            NewStory::from_generated(user, "t".to_owned(), content.to_owned(), chrono::Utc::now());
        self.memory.create_story(&story).await.unwrap()
    }

    fn get(&self, user: UserId, path: &str) -> reqwest::RequestBuilder {
        self.client.get(self.url(path)).header(USER_ID_HEADER, user.0.to_string())
    }

    fn post(&self, user: UserId, path: &str) -> reqwest::RequestBuilder {
        self.client.post(self.url(path)).header(USER_ID_HEADER, user.0.to_string())
    }

    fn delete(&self, user: UserId, path: &str) -> reqwest::RequestBuilder {
        self.client.delete(self.url(path)).header(USER_ID_HEADER, user.0.to_string())
    }
}

#[tokio::test]
async fn health_and_version() {
    let server = TestServer::start().await;
    let body = reqwest::get(server.url("/health")).await.unwrap().text().await.unwrap();
    assert_eq!(body, "ok");

    let res = reqwest::get(server.url("/db-health")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let version: Value =
        reqwest::get(server.url("/api/version")).await.unwrap().json().await.unwrap();
    assert_eq!(version["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn missing_identity_is_unauthorized() {
    let server = TestServer::start().await;
    let res = reqwest::get(server.url("/api/v1/users/me/stats")).await.unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body: Value = res.json().await.unwrap();
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn read_undo_and_stats_flow() {
    let server = TestServer::start().await;
    let user = server.user().await;
    let story = server.story(user, "one two three four five").await;
    let path = format!("/api/v1/stories/{}/read", story.id);

    let res = server.post(user, &path).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);

    let stats: Value =
        server.get(user, "/api/v1/users/me/stats").send().await.unwrap().json().await.unwrap();
    assert_eq!(stats["total_word_count"], 5);
    assert_eq!(stats["today_word_count"], 5);
    assert_eq!(stats["daily_word_count_last_n_days"].as_object().unwrap().len(), 7);

    let detail: Value = server
        .get(user, &format!("/api/v1/stories/{}", story.id))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(detail["read_count"], 1);

    let res = server.delete(user, &format!("{path}/latest")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NO_CONTENT);
    let res = server.delete(user, &format!("{path}/latest")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn foreign_story_is_not_found() {
    let server = TestServer::start().await;
    let owner = server.user().await;
    let story = server.story(owner, "text").await;

    let res = server
        .post(UserId(owner.0 + 1000), &format!("/api/v1/stories/{}/read", story.id))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn generation_is_limited_per_day() {
    let server = TestServer::start().await;
    let user = server.user().await;

    let res = server
        .post(user, "/api/v1/stories")
        .json(&serde_json::json!({ "prompt": "a fox" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let story: Value = res.json().await.unwrap();
    assert_eq!(story["title"], "a fox");
    assert_eq!(story["word_count"], 5);

    let status: Value = server
        .get(user, "/api/v1/users/me/generation-status")
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(status["current_count"], 1);
    assert_eq!(status["remaining"], 0);

    let res = server
        .post(user, "/api/v1/stories")
        .json(&serde_json::json!({ "prompt": "a bear" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::TOO_MANY_REQUESTS);

    let list: Value =
        server.get(user, "/api/v1/stories?page=0").send().await.unwrap().json().await.unwrap();
    assert_eq!(list["total_count"], 1);
    assert_eq!(list["total_pages"], 1);
    assert_eq!(list["current_page"], 1);
}

#[tokio::test]
async fn blank_prompt_is_bad_request() {
    let server = TestServer::start().await;
    let user = server.user().await;
    let res = server
        .post(user, "/api/v1/stories")
        .json(&serde_json::json!({ "prompt": "  " }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}
