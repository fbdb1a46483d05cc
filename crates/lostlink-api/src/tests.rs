//! Router-level tests driving the API through `tower::ServiceExt::oneshot`.

use std::{fmt, sync::atomic::Ordering};

use axum::{
  Router,
  body::Body,
  http::{Request, StatusCode, header},
  response::Response,
};
use base64::{Engine as _, engine::general_purpose::STANDARD as B64};
use chrono::NaiveDate;
use lostlink_core::{
  credential::{AdminCredential, CredentialStore, MemoryCredentialStore},
  error::PARSE_FAILED_MESSAGE,
  ledger::Ledger,
  parser::{ItemParser, ParsedItem},
  sample,
};
use serde_json::{Value, json};
use tower::ServiceExt as _;

use crate::{AppState, api_router};

// ─── Fixtures ────────────────────────────────────────────────────────────────

#[derive(Debug)]
struct Offline;

impl fmt::Display for Offline {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str("parser offline") }
}

impl std::error::Error for Offline {}

/// Replies with a fixed parse, or fails when `reply` is `None`.
struct StubParser {
  reply: Option<ParsedItem>,
}

impl ItemParser for StubParser {
  type Error = Offline;

  async fn parse_description(
    &self,
    _description: &str,
    _today: NaiveDate,
  ) -> Result<ParsedItem, Offline> {
    self.reply.clone().ok_or(Offline)
  }
}

type TestState = AppState<MemoryCredentialStore, StubParser>;

const EMAIL: &str = "desk@campus.edu";
const PASSWORD: &str = "secret";

async fn make_state(ledger: Ledger, reply: Option<ParsedItem>) -> TestState {
  let credentials = MemoryCredentialStore::new();
  credentials
    .save(AdminCredential::new(EMAIL, PASSWORD))
    .await
    .unwrap();
  AppState::new(ledger, credentials, StubParser { reply })
}

async fn sample_state() -> TestState { make_state(sample::ledger(), None).await }

fn app(state: TestState) -> Router { api_router(state) }

fn auth_header(email: &str, password: &str) -> String {
  format!("Basic {}", B64.encode(format!("{email}:{password}")))
}

async fn send(state: TestState, method: &str, uri: &str, body: Option<Value>) -> Response {
  let mut builder = Request::builder()
    .method(method)
    .uri(uri)
    .header(header::AUTHORIZATION, auth_header(EMAIL, PASSWORD));
  let body = match body {
    Some(v) => {
      builder = builder.header(header::CONTENT_TYPE, "application/json");
      Body::from(v.to_string())
    }
    None => Body::empty(),
  };
  app(state).oneshot(builder.body(body).unwrap()).await.unwrap()
}

async fn body_text(resp: Response) -> String {
  let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
    .await
    .unwrap();
  String::from_utf8(bytes.to_vec()).unwrap()
}

async fn body_json(resp: Response) -> Value {
  serde_json::from_str(&body_text(resp).await).unwrap()
}

// ── Auth ─────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn missing_credentials_return_401_with_challenge() {
  let state = sample_state().await;
  let req = Request::builder().uri("/lost").body(Body::empty()).unwrap();
  let resp = app(state).oneshot(req).await.unwrap();
  assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
  assert!(resp.headers().contains_key(header::WWW_AUTHENTICATE));
}

#[tokio::test]
async fn wrong_password_returns_401() {
  let state = sample_state().await;
  let req = Request::builder()
    .uri("/lost")
    .header(header::AUTHORIZATION, auth_header(EMAIL, "nope"))
    .body(Body::empty())
    .unwrap();
  let resp = app(state).oneshot(req).await.unwrap();
  assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn nothing_is_accessible_before_registration() {
  let state = AppState::new(Ledger::new(), MemoryCredentialStore::new(), StubParser {
    reply: None,
  });
  let resp = send(state, "GET", "/dashboard", None).await;
  assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn first_login_registers_then_checks() {
  let state = AppState::new(Ledger::new(), MemoryCredentialStore::new(), StubParser {
    reply: None,
  });

  let login = |email: &str, password: &str| {
    Request::builder()
      .method("POST")
      .uri("/login")
      .header(header::CONTENT_TYPE, "application/json")
      .body(Body::from(json!({ "email": email, "password": password }).to_string()))
      .unwrap()
  };

  let resp = app(state.clone()).oneshot(login("a@b.com", "x")).await.unwrap();
  assert_eq!(resp.status(), StatusCode::OK);
  assert_eq!(body_json(resp).await, json!({ "email": "a@b.com", "registered": true }));

  let resp = app(state.clone()).oneshot(login("a@b.com", "y")).await.unwrap();
  assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
  assert_eq!(body_json(resp).await["error"], "Invalid email or password.");

  let resp = app(state).oneshot(login("a@b.com", "x")).await.unwrap();
  assert_eq!(body_json(resp).await["registered"], false);
}

#[tokio::test]
async fn incomplete_registration_is_rejected() {
  let state = AppState::new(Ledger::new(), MemoryCredentialStore::new(), StubParser {
    reply: None,
  });
  let req = Request::builder()
    .method("POST")
    .uri("/login")
    .header(header::CONTENT_TYPE, "application/json")
    .body(Body::from(json!({ "email": "a@b.com", "password": "" }).to_string()))
    .unwrap();
  let resp = app(state).oneshot(req).await.unwrap();
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  assert_eq!(
    body_json(resp).await["error"],
    "Please provide a valid email and password to register."
  );
}

// ── Items ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn list_and_search_lost_items() {
  let state = sample_state().await;

  let all = body_json(send(state.clone(), "GET", "/lost", None).await).await;
  assert_eq!(all.as_array().unwrap().len(), 5);

  let hits = body_json(send(state, "GET", "/lost?q=LIBRARY", None).await).await;
  let hits = hits.as_array().unwrap();
  assert!(!hits.is_empty());
  assert!(hits.iter().all(|i| {
    let text = format!("{} {}", i["item"], i["location"]).to_lowercase();
    text.contains("library")
  }));
}

#[tokio::test]
async fn unknown_collection_is_404() {
  let resp = send(sample_state().await, "GET", "/misplaced", None).await;
  assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn create_then_get_round_trip() {
  let state = make_state(Ledger::new(), None).await;
  let resp = send(
    state.clone(),
    "POST",
    "/found",
    Some(json!({
      "item": "  Blue Umbrella ",
      "location": "Canteen",
      "date": "2024-03-09",
      "specification": "folding"
    })),
  )
  .await;
  assert_eq!(resp.status(), StatusCode::CREATED);
  let created = body_json(resp).await;
  assert_eq!(created["item"], "Blue Umbrella");
  assert_eq!(created["status"], "Pending");
  let id = created["id"].as_i64().unwrap();

  let fetched = body_json(send(state.clone(), "GET", &format!("/found/{id}"), None).await).await;
  assert_eq!(fetched, created);

  let lost = body_json(send(state, "GET", "/lost", None).await).await;
  assert_eq!(lost, json!([]));
}

#[tokio::test]
async fn create_with_missing_location_is_422() {
  let state = make_state(Ledger::new(), None).await;
  let resp = send(
    state.clone(),
    "POST",
    "/lost",
    Some(json!({ "item": "Keys", "location": "   ", "date": "2024-03-09" })),
  )
  .await;
  assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
  assert_eq!(body_json(resp).await["error"], "location is required");
  assert_eq!(state.ledger.read().await.lost().len(), 0);
}

#[tokio::test]
async fn malformed_body_is_a_json_400() {
  let req = Request::builder()
    .method("POST")
    .uri("/lost")
    .header(header::AUTHORIZATION, auth_header(EMAIL, PASSWORD))
    .header(header::CONTENT_TYPE, "application/json")
    .body(Body::from("{not json"))
    .unwrap();
  let resp = app(sample_state().await).oneshot(req).await.unwrap();
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  let body = body_json(resp).await;
  assert!(body["error"].as_str().unwrap().contains("JSON"), "{body}");
}

#[tokio::test]
async fn mistyped_field_is_a_json_422() {
  let resp = send(sample_state().await, "POST", "/found", Some(json!({ "item": 5 }))).await;
  assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
  assert!(body_json(resp).await["error"].is_string());
}

#[tokio::test]
async fn non_numeric_id_is_a_json_400() {
  let resp = send(sample_state().await, "GET", "/lost/abc", None).await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  let body = body_json(resp).await;
  assert!(body["error"].as_str().unwrap().contains("abc"), "{body}");
}

#[tokio::test]
async fn update_keeps_id_and_replaces_fields() {
  let state = sample_state().await;
  let resp = send(
    state.clone(),
    "PUT",
    "/lost/2",
    Some(json!({
      "item": "Dell XPS Laptop",
      "location": "Amriteshwari Hall",
      "date": "2024-03-01",
      "status": "Claimed",
      "owner": { "registerNumber": "CB.EN.U4CSE21001", "year": "3", "dept": "CSE", "name": "Asha" }
    })),
  )
  .await;
  assert_eq!(resp.status(), StatusCode::OK);
  let item = body_json(resp).await;
  assert_eq!(item["id"], 2);
  assert_eq!(item["status"], "Claimed");
  assert_eq!(item["owner"]["registerNumber"], "CB.EN.U4CSE21001");
  assert!(item.get("specification").is_none());
}

#[tokio::test]
async fn update_missing_item_is_404_and_changes_nothing() {
  let state = sample_state().await;
  let before = state.ledger.read().await.clone();
  let resp = send(
    state.clone(),
    "PUT",
    "/found/999",
    Some(json!({ "item": "Keys", "location": "Gate", "date": "2024-03-09" })),
  )
  .await;
  assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  assert_eq!(*state.ledger.read().await, before);
}

#[tokio::test]
async fn delete_then_get_is_404() {
  let state = sample_state().await;
  let resp = send(state.clone(), "DELETE", "/found/101", None).await;
  assert_eq!(resp.status(), StatusCode::NO_CONTENT);
  assert_eq!(state.ledger.read().await.found().len(), 3);

  let resp = send(state.clone(), "GET", "/found/101", None).await;
  assert_eq!(resp.status(), StatusCode::NOT_FOUND);

  let resp = send(state, "DELETE", "/found/101", None).await;
  assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// ── Derived views ────────────────────────────────────────────────────────────

#[tokio::test]
async fn matches_include_the_laptop_pair() {
  let matches = body_json(send(sample_state().await, "GET", "/matches", None).await).await;
  let pairs: Vec<(i64, i64)> = matches
    .as_array()
    .unwrap()
    .iter()
    .map(|m| (m["lost"]["id"].as_i64().unwrap(), m["found"]["id"].as_i64().unwrap()))
    .collect();
  assert!(pairs.contains(&(2, 102)), "{pairs:?}");
}

#[tokio::test]
async fn claiming_one_side_removes_the_match() {
  let state = sample_state().await;
  send(
    state.clone(),
    "PUT",
    "/found/102",
    Some(json!({
      "item": "Dell XPS Laptop",
      "location": "Amriteshwari Hall",
      "date": "2024-03-01",
      "status": "Claimed"
    })),
  )
  .await;
  let matches = body_json(send(state, "GET", "/matches", None).await).await;
  assert!(
    matches
      .as_array()
      .unwrap()
      .iter()
      .all(|m| m["found"]["id"] != 102)
  );
}

#[tokio::test]
async fn dashboard_summary() {
  let body = body_json(send(sample_state().await, "GET", "/dashboard", None).await).await;
  assert_eq!(body["summary"]["totalLost"], 5);
  assert_eq!(body["summary"]["totalFound"], 4);
  assert_eq!(body["summary"]["totalClaimed"], 2);
  assert_eq!(body["summary"]["totalPending"], 6);
  assert!(body["matches"].is_array());
}

#[tokio::test]
async fn status_report_counts() {
  let body = body_json(send(sample_state().await, "GET", "/reports/statuses", None).await).await;
  let total: u64 = body
    .as_array()
    .unwrap()
    .iter()
    .map(|t| t["count"].as_u64().unwrap())
    .sum();
  assert_eq!(total, 9);
}

#[tokio::test]
async fn csv_export_is_an_attachment() {
  let resp = send(sample_state().await, "GET", "/reports/export.csv", None).await;
  assert_eq!(resp.status(), StatusCode::OK);
  assert_eq!(
    resp.headers().get(header::CONTENT_TYPE).unwrap(),
    "text/csv; charset=utf-8"
  );
  let disposition = resp
    .headers()
    .get(header::CONTENT_DISPOSITION)
    .unwrap()
    .to_str()
    .unwrap()
    .to_owned();
  assert!(disposition.contains("lost_and_found_report.csv"), "{disposition}");

  let body = body_text(resp).await;
  let mut lines = body.lines();
  assert_eq!(lines.next(), Some("ID,Type,Item,Location,Date,Status,Specification"));
  assert!(!body.ends_with('\n'));
}

#[tokio::test]
async fn handovers_list_only_claimed_items() {
  let body = body_json(send(sample_state().await, "GET", "/handovers", None).await).await;
  let items = body.as_array().unwrap();
  assert_eq!(items.len(), 2);
  assert!(items.iter().all(|i| i["status"] == "Claimed"));
}

// ── Intake ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn parse_prefills_and_keeps_status() {
  let reply = ParsedItem {
    item:          "Water Bottle".into(),
    location:      "Library".into(),
    date:          "2024-03-08".into(),
    specification: "blue, steel".into(),
  };
  let state = make_state(Ledger::new(), Some(reply)).await;
  let resp = send(
    state.clone(),
    "POST",
    "/intake/parse",
    Some(json!({
      "description": "found a blue steel bottle in the library yesterday",
      "draft": { "item": "", "location": "", "date": "2024-03-09", "status": "Archived" }
    })),
  )
  .await;
  assert_eq!(resp.status(), StatusCode::OK);
  let draft = body_json(resp).await;
  assert_eq!(draft["item"], "Water Bottle");
  assert_eq!(draft["date"], "2024-03-08");
  assert_eq!(draft["status"], "Archived");

  assert!(state.ledger.read().await.found().is_empty());
}

#[tokio::test]
async fn parse_failure_is_502_with_advisory() {
  let state = make_state(Ledger::new(), None).await;
  let resp = send(state, "POST", "/intake/parse", Some(json!({ "description": "keys" }))).await;
  assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
  assert_eq!(body_json(resp).await["error"], PARSE_FAILED_MESSAGE);
}

#[tokio::test]
async fn parse_empty_description_is_400() {
  let state = make_state(Ledger::new(), None).await;
  let resp = send(state, "POST", "/intake/parse", Some(json!({ "description": "  " }))).await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// ── Settings ─────────────────────────────────────────────────────────────────

fn complete_settings() -> Value {
  json!({
    "enabled": true,
    "senderEmail": "desk@campus.edu",
    "password": "app-password",
    "smtpServer": "smtp.campus.edu",
    "smtpPort": "587"
  })
}

#[tokio::test]
async fn settings_password_is_never_returned() {
  let state = sample_state().await;
  let put = body_json(
    send(state.clone(), "PUT", "/settings/notifications", Some(complete_settings())).await,
  )
  .await;
  assert_eq!(put["password"], "");

  let got = body_json(send(state.clone(), "GET", "/settings/notifications", None).await).await;
  assert_eq!(got["senderEmail"], "desk@campus.edu");
  assert_eq!(got["password"], "");
  assert_eq!(state.settings.read().await.password, "app-password");
}

#[tokio::test]
async fn test_send_requires_complete_settings() {
  let resp = send(sample_state().await, "POST", "/settings/notifications/test", None).await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  assert_eq!(
    body_json(resp).await["error"],
    "Please fill in all email fields before sending a test."
  );
}

#[tokio::test]
async fn test_send_reports_recipient() {
  let state = sample_state().await;
  send(state.clone(), "PUT", "/settings/notifications", Some(complete_settings())).await;
  let resp = send(state.clone(), "POST", "/settings/notifications/test", None).await;
  assert_eq!(resp.status(), StatusCode::OK);
  assert_eq!(
    body_json(resp).await["message"],
    "A test email has been sent to desk@campus.edu."
  );
  assert!(!state.mail_test_in_flight.load(Ordering::Acquire));
}

#[tokio::test]
async fn concurrent_test_send_is_409() {
  let state = sample_state().await;
  send(state.clone(), "PUT", "/settings/notifications", Some(complete_settings())).await;
  state.mail_test_in_flight.store(true, Ordering::Release);
  let resp = send(state, "POST", "/settings/notifications/test", None).await;
  assert_eq!(resp.status(), StatusCode::CONFLICT);
}
