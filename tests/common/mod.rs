use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use uuid::Uuid;

use inquiry::audit::{AuditStore, StoreError};
use inquiry::config::{AuditSinkMode, Config, MailConfig, ProviderConfig, RuntimeMode};
use inquiry::email::{EmailProvider, OutboundEmail, ProviderError};
use inquiry::models::{EmailLog, EmailLogFilter, NewEmailLog};

pub const OPERATOR_INBOX: &str = "owner@example.com";
pub const SENDER: &str = "Inquiry <noreply@example.com>";

#[derive(Clone, Copy)]
pub enum StoreMode {
    Healthy,
    Failing,
    Slow(Duration),
}

/// In-memory audit store. Records are kept in insertion order.
pub struct MemoryStore {
    records: Mutex<Vec<EmailLog>>,
    mode: StoreMode,
}

impl MemoryStore {
    pub fn new(mode: StoreMode) -> Arc<Self> {
        Arc::new(Self {
            records: Mutex::new(Vec::new()),
            mode,
        })
    }

    pub fn records(&self) -> Vec<EmailLog> {
        self.records.lock().unwrap().clone()
    }

    fn matching(&self, filter: &EmailLogFilter) -> Vec<EmailLog> {
        self.records
            .lock()
            .unwrap()
            .iter()
            .rev()
            .filter(|r| filter.status.is_none_or(|s| r.status == s.as_str()))
            .filter(|r| {
                filter
                    .sender_email
                    .as_ref()
                    .is_none_or(|s| &r.sender_email == s)
            })
            .cloned()
            .collect()
    }

    fn check_available(&self) -> Result<(), StoreError> {
        match self.mode {
            StoreMode::Failing => Err(StoreError::from("store unavailable")),
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl AuditStore for MemoryStore {
    async fn insert(&self, entry: &NewEmailLog) -> Result<String, StoreError> {
        if let StoreMode::Slow(delay) = self.mode {
            tokio::time::sleep(delay).await;
        }
        self.check_available()?;

        let id = Uuid::now_v7();
        self.records.lock().unwrap().push(EmailLog {
            id,
            sender_email: entry.sender_email.clone(),
            sender_name: entry.sender_name.clone(),
            question: entry.question.clone(),
            email_content: entry.email_content.clone(),
            provider_message_id: entry.provider_message_id.clone(),
            status: entry.status.as_str().to_string(),
            error_message: entry.error_message.clone(),
            timestamp: Utc::now(),
        });
        Ok(id.to_string())
    }

    async fn find(&self, filter: &EmailLogFilter, limit: i64) -> Result<Vec<EmailLog>, StoreError> {
        self.check_available()?;
        Ok(self
            .matching(filter)
            .into_iter()
            .take(limit as usize)
            .collect())
    }

    async fn count(&self, filter: &EmailLogFilter) -> Result<i64, StoreError> {
        self.check_available()?;
        Ok(self.matching(filter).len() as i64)
    }

    async fn distinct_senders(&self) -> Result<Vec<String>, StoreError> {
        self.check_available()?;
        let mut senders: Vec<String> = self
            .records
            .lock()
            .unwrap()
            .iter()
            .map(|r| r.sender_email.clone())
            .collect();
        senders.sort();
        senders.dedup();
        Ok(senders)
    }
}

/// Email provider that records what it was asked to send.
pub struct StubProvider {
    sent: Mutex<Vec<OutboundEmail>>,
    outcome: Result<Option<String>, String>,
}

impl StubProvider {
    pub fn accepting(id: &str) -> Arc<Self> {
        Arc::new(Self {
            sent: Mutex::new(Vec::new()),
            outcome: Ok(Some(id.to_string())),
        })
    }

    pub fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            sent: Mutex::new(Vec::new()),
            outcome: Err(message.to_string()),
        })
    }

    pub fn sent(&self) -> Vec<OutboundEmail> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl EmailProvider for StubProvider {
    fn name(&self) -> &str {
        "stub"
    }

    async fn send(&self, email: &OutboundEmail) -> Result<Option<String>, ProviderError> {
        self.sent.lock().unwrap().push(email.clone());
        self.outcome.clone().map_err(ProviderError::from)
    }
}

/// A running test server wired to in-memory collaborators.
pub struct TestApp {
    pub addr: SocketAddr,
    pub client: Client,
    pub store: Arc<MemoryStore>,
    pub provider: Arc<StubProvider>,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub async fn post_json(&self, path: &str, body: &Value) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .expect("post request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    pub async fn post_raw(&self, path: &str, content_type: &str, body: &str) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(self.url(path))
            .header("content-type", content_type)
            .body(body.to_string())
            .send()
            .await
            .expect("post request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    pub async fn submit(&self, body: &Value) -> (Value, StatusCode) {
        self.post_json("/submit", body).await
    }

    pub async fn get(&self, path: &str) -> (Value, StatusCode) {
        let resp = self
            .client
            .get(self.url(path))
            .send()
            .await
            .expect("get request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    /// Wait for detached audit writes to land.
    pub async fn wait_for_records(&self, count: usize) -> Vec<EmailLog> {
        for _ in 0..100 {
            let records = self.store.records();
            if records.len() >= count {
                return records;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        self.store.records()
    }
}

pub fn test_config(base_url: String, audit_sink: AuditSinkMode) -> Config {
    Config {
        database_url: "postgres://unused".to_string(),
        host: "127.0.0.1".parse().unwrap(),
        port: 0,
        base_url,
        mode: RuntimeMode::Development,
        log_level: "warn".to_string(),
        max_body_size: 65_536,
        cors_origins: vec![],
        mail: MailConfig {
            from: SENDER.to_string(),
            to: OPERATOR_INBOX.to_string(),
            site_name: "Inquiry".to_string(),
        },
        provider: ProviderConfig::Resend {
            api_key: "unused".to_string(),
            api_url: "http://127.0.0.1:9".to_string(),
        },
        audit_sink,
    }
}

pub async fn spawn_app(store: Arc<MemoryStore>, provider: Arc<StubProvider>) -> TestApp {
    spawn_app_with_sink(store, provider, AuditSinkMode::Store).await
}

pub async fn spawn_app_with_sink(
    store: Arc<MemoryStore>,
    provider: Arc<StubProvider>,
    audit_sink: AuditSinkMode,
) -> TestApp {
    // Bind first so the HTTP audit sink can address this server.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind to random port");
    let addr = listener.local_addr().unwrap();

    let config = test_config(format!("http://{addr}"), audit_sink);
    let state = inquiry::build_state(config, store.clone(), provider.clone())
        .expect("Failed to build state");
    let app = inquiry::build_app(state);

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server failed");
    });

    TestApp {
        addr,
        client: Client::new(),
        store,
        provider,
    }
}
