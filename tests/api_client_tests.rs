use axum::{
    Json, Router,
    body::to_bytes,
    extract::Request,
    http::{HeaderMap, StatusCode, header},
    response::IntoResponse,
    routing::{get, post},
};
use sakhi_binding::client::{ApiClient, ApiErrorKind, ClientError, MemoryTokenStore};
use sakhi_binding::types::clinic::{
    AppointmentQuery, AppointmentStatus, AppointmentStatusUpdate, AssistantRequest,
    LoginCredentials,
};
use serde_json::{Value, json};
use std::sync::Arc;
use tokio::net::TcpListener;
use url::Url;

/// Answers every request with a description of what it received.
async fn echo(req: Request) -> Json<Value> {
    let (parts, body) = req.into_parts();
    let header = |name: &str| {
        parts
            .headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    let method = parts.method.to_string();
    let path = parts.uri.path().to_string();
    let query = parts.uri.query().map(str::to_string);
    let authorization = header("authorization");
    let ngrok = header("ngrok-skip-browser-warning");
    let content_type = header("content-type");
    let cookie = header("cookie");
    let bytes = to_bytes(body, usize::MAX).await.unwrap_or_default();
    let body: Value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    Json(json!({
        "method": method,
        "path": path,
        "query": query,
        "authorization": authorization,
        "ngrok": ngrok,
        "content_type": content_type,
        "cookie": cookie,
        "body": body,
    }))
}

async fn login() -> impl IntoResponse {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::SET_COOKIE,
        "sid=clinic-session; Path=/".parse().expect("valid cookie"),
    );
    (headers, Json(json!({ "success": true, "user": { "name": "Dr. Rao" } })))
}

async fn spawn_clinic_api() -> Url {
    let app = Router::new()
        .route("/api/auth/login", post(login))
        .route(
            "/api/appointments/{id}",
            get(|| async {
                (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "error": "appointment is archived", "code": "ARCHIVED" })),
                )
            }),
        )
        .route(
            "/api/patients/{id}/clinical-notes",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "note store offline") }).post(echo),
        )
        .route(
            "/api/control-tower/live-queue",
            get(|| async { StatusCode::NOT_FOUND }),
        )
        .route(
            "/api/dashboard/summary",
            get(|| async { Json(json!({ "success": false, "error": "clinic not configured" })) }),
        )
        .route(
            "/api/dashboard/cro",
            get(|| async {
                Json(json!({
                    "success": true,
                    "data": { "kpis": { "conversionRate": 18.0, "patientChurnRate": 2.5 } }
                }))
            }),
        )
        .route(
            "/api/internal-assistant/chat",
            post(|Json(body): Json<Value>| async move {
                Json(json!({ "reply": format!("ack {}", body["message"]), "type": "text" }))
            }),
        )
        .fallback(echo);

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind fake clinic api");
    let addr = listener.local_addr().expect("no local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("fake clinic api crashed");
    });
    Url::parse(&format!("http://{addr}")).expect("invalid url")
}

fn client(base: Url, store: MemoryTokenStore) -> ApiClient {
    ApiClient::new(base, Arc::new(store)).expect("failed to build client")
}

#[tokio::test]
async fn requests_carry_fixed_headers_and_bearer() {
    let store = MemoryTokenStore::new();
    store.set_item("user", r#"{"token":"tok-123"}"#);
    let api = client(spawn_clinic_api().await, store);

    let echo = api.get_leads().await.expect("request failed");
    assert_eq!(echo["method"], "GET");
    assert_eq!(echo["path"], "/api/leads");
    assert_eq!(echo["authorization"], "Bearer tok-123");
    assert_eq!(echo["ngrok"], "true");
    assert_eq!(echo["content_type"], "application/json");
}

#[tokio::test]
async fn no_token_means_no_authorization_header() {
    let api = client(spawn_clinic_api().await, MemoryTokenStore::new());

    let echo = api.get_patients().await.expect("request failed");
    assert_eq!(echo["authorization"], Value::Null);
}

#[tokio::test]
async fn session_cookie_is_sent_back() {
    let api = client(spawn_clinic_api().await, MemoryTokenStore::new());

    api.login(&LoginCredentials {
        email: "rao@clinic.example".into(),
        password: "pw".into(),
    })
    .await
    .expect("login failed");

    let echo = api.get_lead("L-1").await.expect("request failed");
    assert_eq!(echo["path"], "/api/leads/L-1");
    assert_eq!(echo["cookie"], "sid=clinic-session");
}

#[tokio::test]
async fn json_error_body_drives_message() {
    let api = client(spawn_clinic_api().await, MemoryTokenStore::new());

    let err = api.get_appointment("A-9").await.unwrap_err();
    let err = match err {
        ClientError::Api(e) => e,
        other => panic!("expected ApiError, got {other:?}"),
    };
    assert_eq!(err.kind, ApiErrorKind::Http);
    assert_eq!(err.status, StatusCode::BAD_REQUEST);
    assert_eq!(err.message, "appointment is archived");
    assert_eq!(
        err.data,
        Some(json!({ "error": "appointment is archived", "code": "ARCHIVED" }))
    );
}

#[tokio::test]
async fn text_error_body_becomes_message() {
    let api = client(spawn_clinic_api().await, MemoryTokenStore::new());

    let err = api.get_clinical_notes("P-1").await.unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::INTERNAL_SERVER_ERROR));
    assert_eq!(err.to_string(), "note store offline");
}

#[tokio::test]
async fn empty_error_body_uses_status_line() {
    let api = client(spawn_clinic_api().await, MemoryTokenStore::new());

    let err = api.get_live_queue().await.unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
    assert_eq!(err.to_string(), "Request failed 404 Not Found");
}

#[tokio::test]
async fn success_false_raises_application_error() {
    let api = client(spawn_clinic_api().await, MemoryTokenStore::new());

    let err = api.get_dashboard_summary().await.unwrap_err();
    let err = match err {
        ClientError::Api(e) => e,
        other => panic!("expected ApiError, got {other:?}"),
    };
    assert_eq!(err.kind, ApiErrorKind::Application);
    assert_eq!(err.status, StatusCode::OK);
    assert_eq!(err.message, "clinic not configured");
}

#[tokio::test]
async fn typed_responses_decode() {
    let api = client(spawn_clinic_api().await, MemoryTokenStore::new());

    let dash = api.get_cro_dashboard().await.expect("request failed");
    assert!(dash.success);
    assert_eq!(dash.data.kpis.conversion_rate, Some(18.0));
    assert_eq!(dash.data.kpis.patient_churn_rate, Some(2.5));

    let reply = api
        .internal_assistant_chat(&AssistantRequest {
            message: Some("book Meera for Monday".into()),
            ..Default::default()
        })
        .await
        .expect("request failed");
    assert_eq!(reply.reply, "ack \"book Meera for Monday\"");
    assert_eq!(reply.kind.as_deref(), Some("text"));
}

#[tokio::test]
async fn appointment_query_is_only_sent_when_set() {
    let api = client(spawn_clinic_api().await, MemoryTokenStore::new());

    let echo = api
        .get_appointments(&AppointmentQuery::default())
        .await
        .expect("request failed");
    assert_eq!(echo["path"], "/api/appointments");
    assert_eq!(echo["query"], Value::Null);

    let echo = api
        .get_appointments(&AppointmentQuery {
            date: Some("2026-10-19".into()),
            doctor_id: Some("D-3".into()),
        })
        .await
        .expect("request failed");
    assert_eq!(echo["query"], "date=2026-10-19&doctor_id=D-3");
}

#[tokio::test]
async fn patient_search_and_writes() {
    let api = client(spawn_clinic_api().await, MemoryTokenStore::new());

    let echo = api.search_patients("98765").await.expect("request failed");
    assert_eq!(echo["path"], "/api/patients");
    assert_eq!(echo["query"], "q=98765");

    let echo = api
        .save_clinical_note("P-1", "Follicle scan on day 12")
        .await
        .expect("request failed");
    assert_eq!(echo["method"], "POST");
    assert_eq!(echo["path"], "/api/patients/P-1/clinical-notes");
    assert_eq!(echo["body"], json!({ "note": "Follicle scan on day 12" }));

    let echo = api
        .update_appointment_status(
            "A-1",
            &AppointmentStatusUpdate {
                status: AppointmentStatus::Canceled,
                cancellation_reason: Some("patient travelling".into()),
            },
        )
        .await
        .expect("request failed");
    assert_eq!(echo["method"], "PATCH");
    assert_eq!(echo["path"], "/api/appointments/A-1/status");
    assert_eq!(
        echo["body"],
        json!({ "status": "Canceled", "cancellation_reason": "patient travelling" })
    );

    let echo = api.re_engage_lead("L-5").await.expect("request failed");
    assert_eq!(echo["method"], "POST");
    assert_eq!(echo["path"], "/api/leads/L-5/re-engage");
}

#[tokio::test]
async fn document_upload_is_base64_json() {
    let api = client(spawn_clinic_api().await, MemoryTokenStore::new());

    let echo = api
        .upload_patient_document("P-2", "hsg.png", Some("image/png"), b"\x89PNG")
        .await
        .expect("request failed");
    assert_eq!(echo["path"], "/api/patients/P-2/documents");
    assert_eq!(
        echo["body"],
        json!({
            "name": "hsg.png",
            "document_type": "Uploaded",
            "contentType": "image/png",
            "base64": "iVBORw=="
        })
    );
}
