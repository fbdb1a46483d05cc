//! Async HTTP client wrapping the LostLink JSON API.

use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use lostlink_core::{
  intake::ItemDraft,
  item::{Item, ItemId, ItemKind},
  report::{Summary, Tally},
  settings::NotificationSettings,
};
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Connection settings for the LostLink API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
  pub base_url: String,
  pub email:    String,
  pub password: String,
}

// ─── Response bodies ─────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct LoginResponse {
  pub email:      String,
  pub registered: bool,
}

#[derive(Debug, Deserialize)]
pub struct MatchPair {
  pub lost:  Item,
  pub found: Item,
}

#[derive(Debug, Deserialize)]
pub struct Dashboard {
  pub summary: Summary,
  pub matches: Vec<MatchPair>,
}

#[derive(Debug, Deserialize)]
pub struct TestSent {
  pub message: String,
}

#[derive(Serialize)]
struct ParseBody<'a> {
  description: &'a str,
  draft:       &'a ItemDraft,
}

/// Collection path segment for `kind`.
fn collection(kind: ItemKind) -> &'static str {
  match kind {
    ItemKind::Lost => "/lost",
    ItemKind::Found => "/found",
  }
}

/// Turn a non-2xx response into an error carrying the server's message.
async fn check(resp: Response, what: &str) -> Result<Response> {
  let status = resp.status();
  if status.is_success() {
    return Ok(resp);
  }
  let message = resp
    .json::<Value>()
    .await
    .ok()
    .and_then(|v| v.get("error").and_then(Value::as_str).map(str::to_owned));
  Err(match message {
    Some(m) => anyhow!("{what} → {status}: {m}"),
    None => anyhow!("{what} → {status}"),
  })
}

/// Async HTTP client for the LostLink JSON REST API.
///
/// Cheap to clone: the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct ApiClient {
  client: Client,
  config: ApiConfig,
}

impl ApiClient {
  pub fn new(config: ApiConfig) -> Result<Self> {
    let client = Client::builder()
      .timeout(Duration::from_secs(30))
      .build()
      .context("failed to build HTTP client")?;
    Ok(Self { client, config })
  }

  fn url(&self, path: &str) -> String {
    format!("{}/api{}", self.config.base_url.trim_end_matches('/'), path)
  }

  fn auth(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
    if self.config.email.is_empty() {
      req
    } else {
      req.basic_auth(&self.config.email, Some(&self.config.password))
    }
  }

  async fn get_json<T: for<'de> Deserialize<'de>>(&self, path: &str, query: &[(&str, &str)]) -> Result<T> {
    let what = format!("GET {path}");
    let resp = self
      .auth(self.client.get(self.url(path)))
      .query(query)
      .send()
      .await
      .with_context(|| format!("{what} failed"))?;
    check(resp, &what)
      .await?
      .json()
      .await
      .with_context(|| format!("deserialising {path}"))
  }

  // ── Account ────────────────────────────────────────────────────────────────

  /// `POST /api/login`
  pub async fn login(&self) -> Result<LoginResponse> {
    let resp = self
      .client
      .post(self.url("/login"))
      .json(&serde_json::json!({
        "email": self.config.email,
        "password": self.config.password,
      }))
      .send()
      .await
      .context("POST /login failed")?;
    check(resp, "POST /login")
      .await?
      .json()
      .await
      .context("deserialising login response")
  }

  // ── Items ──────────────────────────────────────────────────────────────────

  /// `GET /api/{kind}[?q=...]`
  pub async fn list(&self, kind: ItemKind, query: Option<&str>) -> Result<Vec<Item>> {
    let params: Vec<(&str, &str)> = query.map(|q| vec![("q", q)]).unwrap_or_default();
    self.get_json(collection(kind), &params).await
  }

  /// `GET /api/{kind}/{id}`
  pub async fn get(&self, kind: ItemKind, id: ItemId) -> Result<Item> {
    self
      .get_json(&format!("{}/{id}", collection(kind)), &[])
      .await
  }

  /// `POST /api/{kind}`
  pub async fn create(&self, kind: ItemKind, draft: &ItemDraft) -> Result<Item> {
    let path = collection(kind);
    let what = format!("POST {path}");
    let resp = self
      .auth(self.client.post(self.url(path)))
      .json(draft)
      .send()
      .await
      .with_context(|| format!("{what} failed"))?;
    check(resp, &what)
      .await?
      .json()
      .await
      .context("deserialising created item")
  }

  /// `PUT /api/{kind}/{id}`
  pub async fn update(&self, kind: ItemKind, id: ItemId, draft: &ItemDraft) -> Result<Item> {
    let path = format!("{}/{id}", collection(kind));
    let what = format!("PUT {path}");
    let resp = self
      .auth(self.client.put(self.url(&path)))
      .json(draft)
      .send()
      .await
      .with_context(|| format!("{what} failed"))?;
    check(resp, &what)
      .await?
      .json()
      .await
      .context("deserialising updated item")
  }

  /// `DELETE /api/{kind}/{id}`
  pub async fn delete(&self, kind: ItemKind, id: ItemId) -> Result<()> {
    let path = format!("{}/{id}", collection(kind));
    let what = format!("DELETE {path}");
    let resp = self
      .auth(self.client.delete(self.url(&path)))
      .send()
      .await
      .with_context(|| format!("{what} failed"))?;
    check(resp, &what).await?;
    Ok(())
  }

  // ── Intake ─────────────────────────────────────────────────────────────────

  /// `POST /api/intake/parse`: returns `draft` prefilled from `description`.
  pub async fn parse(&self, description: &str, draft: &ItemDraft) -> Result<ItemDraft> {
    let resp = self
      .auth(self.client.post(self.url("/intake/parse")))
      .json(&ParseBody { description, draft })
      .send()
      .await
      .context("POST /intake/parse failed")?;
    check(resp, "POST /intake/parse")
      .await?
      .json()
      .await
      .context("deserialising prefilled draft")
  }

  // ── Views ──────────────────────────────────────────────────────────────────

  /// `GET /api/matches`
  pub async fn matches(&self) -> Result<Vec<MatchPair>> { self.get_json("/matches", &[]).await }

  /// `GET /api/dashboard`
  pub async fn dashboard(&self) -> Result<Dashboard> { self.get_json("/dashboard", &[]).await }

  /// `GET /api/reports/locations`
  pub async fn locations(&self) -> Result<Vec<Tally>> {
    self.get_json("/reports/locations", &[]).await
  }

  /// `GET /api/reports/statuses`
  pub async fn statuses(&self) -> Result<Vec<Tally>> {
    self.get_json("/reports/statuses", &[]).await
  }

  /// `GET /api/handovers[?q=...]`
  pub async fn handovers(&self, query: Option<&str>) -> Result<Vec<Item>> {
    let params: Vec<(&str, &str)> = query.map(|q| vec![("q", q)]).unwrap_or_default();
    self.get_json("/handovers", &params).await
  }

  /// `GET /api/reports/export.csv`: the raw CSV text.
  pub async fn export_csv(&self) -> Result<String> {
    let resp = self
      .auth(self.client.get(self.url("/reports/export.csv")))
      .send()
      .await
      .context("GET /reports/export.csv failed")?;
    check(resp, "GET /reports/export.csv")
      .await?
      .text()
      .await
      .context("reading CSV body")
  }

  // ── Settings ───────────────────────────────────────────────────────────────

  /// `GET /api/settings/notifications`: the password comes back blank.
  pub async fn settings(&self) -> Result<NotificationSettings> {
    self.get_json("/settings/notifications", &[]).await
  }

  /// `PUT /api/settings/notifications`
  pub async fn put_settings(&self, settings: &NotificationSettings) -> Result<NotificationSettings> {
    let resp = self
      .auth(self.client.put(self.url("/settings/notifications")))
      .json(settings)
      .send()
      .await
      .context("PUT /settings/notifications failed")?;
    check(resp, "PUT /settings/notifications")
      .await?
      .json()
      .await
      .context("deserialising settings")
  }

  /// `POST /api/settings/notifications/test`
  pub async fn send_test_email(&self) -> Result<TestSent> {
    let resp = self
      .auth(self.client.post(self.url("/settings/notifications/test")))
      .send()
      .await
      .context("POST /settings/notifications/test failed")?;
    check(resp, "POST /settings/notifications/test")
      .await?
      .json()
      .await
      .context("deserialising test-send response")
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;
  use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_partial_json, header, method, path, query_param},
  };

  use super::*;

  fn client(server: &MockServer) -> ApiClient {
    ApiClient::new(ApiConfig {
      base_url: format!("{}/", server.uri()),
      email:    "a@b.com".into(),
      password: "x".into(),
    })
    .unwrap()
  }

  // base64("a@b.com:x")
  const BASIC: &str = "Basic YUBiLmNvbTp4";

  fn laptop(id: ItemId) -> Value {
    json!({
      "id": id,
      "item": "Dell XPS Laptop",
      "location": "Amriteshwari Hall",
      "date": "2023-10-28",
      "status": "Pending"
    })
  }

  #[tokio::test]
  async fn list_sends_auth_and_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
      .and(path("/api/lost"))
      .and(query_param("q", "dell"))
      .and(header("authorization", BASIC))
      .respond_with(ResponseTemplate::new(200).set_body_json(json!([laptop(2)])))
      .expect(1)
      .mount(&server)
      .await;

    let items = client(&server).list(ItemKind::Lost, Some("dell")).await.unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].id, 2);
    assert_eq!(items[0].name(), "Dell XPS Laptop");
  }

  #[tokio::test]
  async fn server_error_message_is_surfaced() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
      .and(path("/api/found"))
      .respond_with(
        ResponseTemplate::new(422).set_body_json(json!({ "error": "location is required" })),
      )
      .mount(&server)
      .await;

    let draft = ItemDraft::default();
    let err = client(&server).create(ItemKind::Found, &draft).await.unwrap_err();
    let text = err.to_string();
    assert!(text.contains("422"), "{text}");
    assert!(text.contains("location is required"), "{text}");
  }

  #[tokio::test]
  async fn parse_posts_description_with_draft() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
      .and(path("/api/intake/parse"))
      .and(body_partial_json(json!({ "description": "blue bottle in the library" })))
      .respond_with(ResponseTemplate::new(200).set_body_json(json!({
        "item": "Water Bottle",
        "location": "Library",
        "date": "2024-03-08",
        "status": "Pending",
        "specification": "blue"
      })))
      .mount(&server)
      .await;

    let draft = client(&server)
      .parse("blue bottle in the library", &ItemDraft::default())
      .await
      .unwrap();
    assert_eq!(draft.item, "Water Bottle");
    assert_eq!(draft.date, "2024-03-08");
  }

  #[tokio::test]
  async fn login_does_not_send_basic_auth() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
      .and(path("/api/login"))
      .and(body_partial_json(json!({ "email": "a@b.com", "password": "x" })))
      .respond_with(
        ResponseTemplate::new(200).set_body_json(json!({ "email": "a@b.com", "registered": true })),
      )
      .mount(&server)
      .await;

    let resp = client(&server).login().await.unwrap();
    assert!(resp.registered);
    assert_eq!(resp.email, "a@b.com");
  }

  #[tokio::test]
  async fn export_returns_raw_text() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
      .and(path("/api/reports/export.csv"))
      .respond_with(
        ResponseTemplate::new(200)
          .insert_header("content-type", "text/csv; charset=utf-8")
          .set_body_string("ID,Type,Item,Location,Date,Status,Specification"),
      )
      .mount(&server)
      .await;

    let csv = client(&server).export_csv().await.unwrap();
    assert_eq!(csv, "ID,Type,Item,Location,Date,Status,Specification");
  }
}
