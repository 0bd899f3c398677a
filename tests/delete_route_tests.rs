use axum::{
    Json, Router,
    body::{Body, Bytes, to_bytes},
    extract::State,
    http::{HeaderMap, Method, Request, StatusCode, Uri, header},
    response::Response,
};
use chrono::Utc;
use async_trait::async_trait;
use reminder_relay::RelayError;
use reminder_relay::config::Config;
use reminder_relay::db::{DbActorHandle, DbReminder, ReminderCreate, ReminderStore};
use reminder_relay::server::router::{RelayState, relay_router};
use serde_json::{Value, json};
use std::{
    sync::{Arc, Mutex},
    time::{SystemTime, UNIX_EPOCH},
};
use tokio::net::TcpListener;
use tower::ServiceExt;
use url::Url;

#[derive(Clone)]
struct MockScheduler {
    paths: Arc<Mutex<Vec<(Method, String, Option<String>)>>>,
    status: StatusCode,
    reply: Value,
}

async fn scheduler_handler(
    State(mock): State<MockScheduler>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    _body: Bytes,
) -> (StatusCode, Json<Value>) {
    let auth = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    mock.paths
        .lock()
        .unwrap()
        .push((method, uri.path().to_string(), auth));
    (mock.status, Json(mock.reply.clone()))
}

async fn spawn_scheduler(status: StatusCode, reply: Value) -> (MockScheduler, Url) {
    let mock = MockScheduler {
        paths: Arc::new(Mutex::new(Vec::new())),
        status,
        reply,
    };
    let app = Router::new()
        .fallback(scheduler_handler)
        .with_state(mock.clone());
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind listener");
    let addr = listener.local_addr().expect("local addr");
    let base = Url::parse(&format!("http://{}", addr)).expect("valid base url");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("server run");
    });

    (mock, base)
}

fn unique_database_url(prefix: &str) -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system time before UNIX_EPOCH")
        .as_nanos();

    let mut temp_path = std::env::temp_dir();
    temp_path.push(format!(
        "reminder-relay-{prefix}-{}-{}.sqlite",
        std::process::id(),
        nanos
    ));
    format!("sqlite:{}", temp_path.display())
}

/// Store whose row deletion fails, standing in for an unreachable database.
struct FailingStore;

#[async_trait]
impl ReminderStore for FailingStore {
    async fn claim_pending(&self, _id: &str) -> Result<Option<DbReminder>, RelayError> {
        Err(RelayError::UnexpectedError("store down".to_string()))
    }

    async fn delete(&self, _id: &str) -> Result<u64, RelayError> {
        Err(RelayError::UnexpectedError("store down".to_string()))
    }

    async fn get(&self, _id: &str) -> Result<Option<DbReminder>, RelayError> {
        Err(RelayError::UnexpectedError("store down".to_string()))
    }

    async fn insert(&self, _create: ReminderCreate) -> Result<String, RelayError> {
        Err(RelayError::UnexpectedError("store down".to_string()))
    }
}

async fn insert_reminder(db: &DbActorHandle, id: &str) {
    db.insert(ReminderCreate {
        id: Some(id.to_string()),
        title: "t".to_string(),
        content: "c".to_string(),
        remind_time: Utc::now(),
        cron_job_id: Some("4711".to_string()),
    })
    .await
    .expect("insert reminder");
}

async fn send(app: &Router, method: &str, uri: &str, body: &str) -> Response {
    app.clone()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .expect("failed to build request"),
        )
        .await
        .expect("request failed")
}

async fn json_body(resp: Response) -> Value {
    let bytes = to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("json body")
}

fn assert_cors(resp: &Response) {
    let h = resp.headers();
    assert_eq!(h.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(), "*");
    assert_eq!(
        h.get(header::ACCESS_CONTROL_ALLOW_METHODS).unwrap(),
        "DELETE, OPTIONS"
    );
    assert_eq!(
        h.get(header::ACCESS_CONTROL_ALLOW_HEADERS).unwrap(),
        "Content-Type"
    );
}

#[tokio::test]
async fn delete_removes_row_and_cleans_up_job() {
    let (scheduler, base) = spawn_scheduler(StatusCode::OK, json!({"success": true})).await;
    let db = reminder_relay::db::spawn(&unique_database_url("delete-ok")).await;
    insert_reminder(&db, "r-del").await;

    let mut cfg = Config::default();
    cfg.scheduler.api_key = Some("cron-api-key".to_string());
    cfg.scheduler.api_base = base;
    let app = relay_router(RelayState::new(&cfg, Arc::new(db.clone())));

    let resp = send(&app, "DELETE", "/api/reminders/r-del", r#"{"cronJobId":"4711"}"#).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_cors(&resp);
    assert_eq!(json_body(resp).await, json!({"success": true}));

    assert!(db.get("r-del").await.unwrap().is_none());
    let calls = scheduler.paths.lock().unwrap().clone();
    assert_eq!(
        calls,
        vec![(
            Method::DELETE,
            "/jobs/4711".to_string(),
            Some("Bearer cron-api-key".to_string())
        )]
    );
}

#[tokio::test]
async fn unknown_id_and_empty_body_still_succeed() {
    let db = reminder_relay::db::spawn(&unique_database_url("delete-unknown")).await;
    let app = relay_router(RelayState::new(&Config::default(), Arc::new(db)));

    let resp = send(&app, "DELETE", "/api/reminders/nope", "").await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(json_body(resp).await, json!({"success": true}));

    // No scheduler key: the job id is accepted and cleanup is skipped.
    let resp = send(&app, "DELETE", "/api/reminders/nope", r#"{"cronJobId":1}"#).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn scheduler_failures_do_not_fail_the_delete() {
    for (status, reply) in [
        (StatusCode::INTERNAL_SERVER_ERROR, json!({"error": "boom"})),
        (StatusCode::OK, json!({"success": false, "error": "job not found"})),
    ] {
        let (scheduler, base) = spawn_scheduler(status, reply).await;
        let db = reminder_relay::db::spawn(&unique_database_url("delete-cronfail")).await;
        insert_reminder(&db, "r-cron").await;

        let mut cfg = Config::default();
        cfg.scheduler.api_key = Some("k".to_string());
        cfg.scheduler.api_base = base;
        let app = relay_router(RelayState::new(&cfg, Arc::new(db.clone())));

        let resp = send(&app, "DELETE", "/api/reminders/r-cron", r#"{"cronJobId":"4711"}"#).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(json_body(resp).await, json!({"success": true}));
        assert!(db.get("r-cron").await.unwrap().is_none());
        assert!(!scheduler.paths.lock().unwrap().is_empty());
    }
}

#[tokio::test]
async fn other_methods_are_rejected_with_cors() {
    let db = reminder_relay::db::spawn(&unique_database_url("delete-405")).await;
    insert_reminder(&db, "r-keep").await;
    let app = relay_router(RelayState::new(&Config::default(), Arc::new(db.clone())));

    for method in ["GET", "POST", "PATCH"] {
        let resp = send(&app, method, "/api/reminders/r-keep", "").await;
        assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED, "{method}");
        assert_cors(&resp);
        assert_eq!(json_body(resp).await, json!({"error": "Method not allowed"}));
    }

    assert!(db.get("r-keep").await.unwrap().is_some());
}

#[tokio::test]
async fn preflight_is_empty_ok_with_cors() {
    let db = reminder_relay::db::spawn(&unique_database_url("delete-options")).await;
    let app = relay_router(RelayState::new(&Config::default(), Arc::new(db)));

    let resp = send(&app, "OPTIONS", "/api/reminders/anything", "").await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_cors(&resp);
    let bytes = to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("read body");
    assert!(bytes.is_empty());
}

#[tokio::test]
async fn malformed_body_is_an_internal_error() {
    let db = reminder_relay::db::spawn(&unique_database_url("delete-badjson")).await;
    insert_reminder(&db, "r-bad").await;
    let app = relay_router(RelayState::new(&Config::default(), Arc::new(db.clone())));

    let resp = send(&app, "DELETE", "/api/reminders/r-bad", "{not json").await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_cors(&resp);
    let body = json_body(resp).await;
    assert_eq!(body["success"], json!(false));
    assert!(body["error"].is_string());

    assert!(db.get("r-bad").await.unwrap().is_some());
}

#[tokio::test]
async fn store_failure_is_an_internal_error_with_cors() {
    let (scheduler, base) = spawn_scheduler(StatusCode::OK, json!({"success": true})).await;

    let mut cfg = Config::default();
    cfg.scheduler.api_key = Some("k".to_string());
    cfg.scheduler.api_base = base;
    let app = relay_router(RelayState::new(&cfg, Arc::new(FailingStore)));

    let resp = send(&app, "DELETE", "/api/reminders/r-1", r#"{"cronJobId":"4711"}"#).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_cors(&resp);
    assert_eq!(
        json_body(resp).await,
        json!({"success": false, "error": "Unexpected error: store down"})
    );

    // The row store is authoritative: no job cleanup after a failed row delete.
    assert!(scheduler.paths.lock().unwrap().is_empty());
}
