//! Shared fixtures for the integration tests.
//!
//! `StubServer::start()` runs a small axum app on its own thread and runtime
//! that imitates the reservation backend: bearer-token auth, paginated lists
//! with `x-total-count`, CRUD echoes, approval, report, and the public guest
//! endpoint. Every request is recorded so tests can assert on what the SDK
//! actually sent.

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::{header, HeaderMap, HeaderValue, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use booking_dashboard_sdk::BookingSdk;
use serde_json::{json, Value};
use tokio::sync::oneshot;

pub const TOKEN: &str = "test-token";
pub const USERNAME: &str = "admin";
pub const PASSWORD: &str = "admin";

/// One request as seen by the stub.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub authorization: Option<String>,
    pub body: Option<Value>,
}

impl Recorded {
    pub fn param(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

pub struct Stub {
    pub requests: Mutex<Vec<Recorded>>,
    /// Artificial latency applied to every response.
    pub delay_ms: AtomicU64,
    /// When set, paged lists are sent without `x-total-count`.
    pub omit_total: AtomicBool,
    pub reservations: Vec<Value>,
    pub customers: Vec<Value>,
    pub payments: Vec<Value>,
    pub services: Vec<Value>,
    pub finance_entries: Vec<Value>,
    pub appointments: Vec<Value>,
    pub appointment_types: Vec<Value>,
}

impl Stub {
    fn new() -> Self {
        Self {
            requests: Mutex::new(Vec::new()),
            delay_ms: AtomicU64::new(0),
            omit_total: AtomicBool::new(false),
            reservations: reservations(),
            customers: customers(),
            payments: payments(),
            services: services(),
            finance_entries: finance_entries(),
            appointments: appointments(),
            appointment_types: appointment_types(),
        }
    }

    fn collection(&self, name: &str) -> Option<&Vec<Value>> {
        match name {
            "reservations" => Some(&self.reservations),
            "customers" => Some(&self.customers),
            "payments" => Some(&self.payments),
            "offered-services" => Some(&self.services),
            "finance-entries" => Some(&self.finance_entries),
            "appointments" => Some(&self.appointments),
            "appointment-types" => Some(&self.appointment_types),
            _ => None,
        }
    }
}

pub struct StubServer {
    pub base_url: String,
    pub stub: Arc<Stub>,
    shutdown: Option<oneshot::Sender<()>>,
    thread: Option<thread::JoinHandle<()>>,
}

/// Route SDK logs to the test harness; `RUST_LOG=booking_dashboard_sdk=debug`
/// shows every request.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

impl StubServer {
    pub fn start() -> Self {
        init_tracing();
        let stub = Arc::new(Stub::new());
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.set_nonblocking(true).unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = oneshot::channel::<()>();

        let app = Router::new().fallback(handle).with_state(Arc::clone(&stub));
        let thread = thread::spawn(move || {
            let rt = tokio::runtime::Builder::new_multi_thread()
                .worker_threads(2)
                .enable_all()
                .build()
                .unwrap();
            rt.block_on(async move {
                let listener = tokio::net::TcpListener::from_std(listener).unwrap();
                axum::serve(listener, app)
                    .with_graceful_shutdown(async {
                        let _ = rx.await;
                    })
                    .await
                    .unwrap();
            });
        });

        Self {
            base_url: format!("http://{}/api", addr),
            stub,
            shutdown: Some(tx),
            thread: Some(thread),
        }
    }

    pub fn set_delay(&self, delay: Duration) {
        self.stub
            .delay_ms
            .store(delay.as_millis() as u64, Ordering::SeqCst);
    }

    /// Serve paged lists with or without the total header.
    pub fn set_omit_total(&self, omit: bool) {
        self.stub.omit_total.store(omit, Ordering::SeqCst);
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.stub.requests.lock().unwrap().clone()
    }

    /// Most recent request whose path equals `path`.
    pub fn last_request(&self, path: &str) -> Option<Recorded> {
        self.requests().into_iter().rev().find(|r| r.path == path)
    }

    /// SDK pointed at this server, already holding a valid token.
    pub fn sdk(&self) -> BookingSdk {
        BookingSdk::builder()
            .base_url(&self.base_url)
            .token(TOKEN)
            .build()
            .unwrap()
    }

    /// SDK pointed at this server with no token.
    pub fn anonymous_sdk(&self) -> BookingSdk {
        BookingSdk::builder().base_url(&self.base_url).build().unwrap()
    }
}

impl Drop for StubServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

// ---------------------------------------------------------------------------
// Routing
// ---------------------------------------------------------------------------

async fn handle(
    State(stub): State<Arc<Stub>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let path = uri.path().trim_start_matches("/api/").to_string();
    let query = Query::<Vec<(String, String)>>::try_from_uri(&uri)
        .map(|q| q.0)
        .unwrap_or_default();
    let authorization = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let body = serde_json::from_slice::<Value>(&body).ok();

    stub.requests.lock().unwrap().push(Recorded {
        method: method.to_string(),
        path: path.clone(),
        query: query.clone(),
        authorization: authorization.clone(),
        body: body.clone(),
    });

    let delay = stub.delay_ms.load(Ordering::SeqCst);
    if delay > 0 {
        tokio::time::sleep(Duration::from_millis(delay)).await;
    }

    let public = (method == Method::POST && path == "authenticate") || path.starts_with("public/");
    let expected = format!("Bearer {}", TOKEN);
    if !public && authorization.as_deref() != Some(expected.as_str()) {
        return (StatusCode::UNAUTHORIZED, Json(json!({"title": "Unauthorized"}))).into_response();
    }

    let segments: Vec<&str> = path.split('/').collect();
    match (method.as_str(), segments.as_slice()) {
        ("POST", ["authenticate"]) => {
            let body = body.unwrap_or(Value::Null);
            if body["username"] == USERNAME && body["password"] == PASSWORD {
                Json(json!({"id_token": TOKEN})).into_response()
            } else {
                StatusCode::UNAUTHORIZED.into_response()
            }
        }
        ("GET", ["authenticate"]) => (
            [(header::CONTENT_TYPE, "text/plain;charset=UTF-8")],
            USERNAME,
        )
            .into_response(),
        ("GET", ["account"]) => Json(json!({
            "id": 1,
            "login": USERNAME,
            "firstName": "Administrator",
            "email": "admin@localhost",
            "activated": true,
            "langKey": "en",
            "authorities": ["ROLE_USER", "ROLE_ADMIN"]
        }))
        .into_response(),
        ("GET", ["reservations", "upcoming"]) => {
            let size = param(&query, "size").unwrap_or(5);
            let items: Vec<Value> = stub.reservations.iter().take(size).cloned().collect();
            Json(items).into_response()
        }
        ("GET", ["reservations", "report"]) => Json(json!({
            "totalReservations": 5,
            "distinctCustomers": 4,
            "distinctBusinesses": 1,
            "upcomingReservations": 3,
            "statusCounts": {"PENDING": 2, "CONFIRMED": 1, "COMPLETED": 1, "CANCELLED": 1},
            "rangeStart": query.iter().find(|(k, _)| k == "start").map(|(_, v)| v.clone()),
            "rangeEnd": null
        }))
        .into_response(),
        ("GET", ["reservations", "my"]) => paged(&stub, &stub.reservations, &query),
        ("PUT", ["reservations", id, "approve"]) => match find(&stub.reservations, id) {
            Some(mut r) => {
                r["status"] = json!("CONFIRMED");
                if let Some(notes) = body.as_ref().and_then(|b| b.get("notes")) {
                    r["notes"] = notes.clone();
                }
                Json(r).into_response()
            }
            None => StatusCode::NOT_FOUND.into_response(),
        },
        ("POST", ["public", "reservations"]) => {
            let body = body.unwrap_or(Value::Null);
            Json(json!({
                "id": 500,
                "date": body["reservationDate"],
                "status": "PENDING",
                "notes": body["notes"],
                "customer": {
                    "id": 77,
                    "firstName": body["firstName"],
                    "lastName": body["lastName"],
                    "email": body["email"]
                },
                "service": {"id": body["offeredServiceId"]}
            }))
            .into_response()
        }
        ("PUT", ["appointments", id, "status"]) => match find(&stub.appointments, id) {
            Some(mut a) => {
                if let Some(status) = body.as_ref().and_then(|b| b.get("status")) {
                    a["status"] = status.clone();
                }
                Json(a).into_response()
            }
            None => StatusCode::NOT_FOUND.into_response(),
        },
        ("GET", ["finance-entries"]) => Json(stub.finance_entries.clone()).into_response(),
        ("GET", [collection]) => match stub.collection(collection) {
            Some(items) => paged(&stub, items, &query),
            None => StatusCode::NOT_FOUND.into_response(),
        },
        ("GET", [collection, id]) => {
            match stub.collection(collection).and_then(|items| find(items, id)) {
                Some(item) => Json(item).into_response(),
                None => StatusCode::NOT_FOUND.into_response(),
            }
        }
        ("POST", [_]) => {
            let mut created = body.unwrap_or_else(|| json!({}));
            created["id"] = json!(99);
            (StatusCode::CREATED, Json(created)).into_response()
        }
        ("PUT", [_, _]) => Json(body.unwrap_or(Value::Null)).into_response(),
        ("DELETE", [_, _]) => StatusCode::NO_CONTENT.into_response(),
        _ => StatusCode::NOT_FOUND.into_response(),
    }
}

fn param(query: &[(String, String)], key: &str) -> Option<usize> {
    query
        .iter()
        .find(|(k, _)| k == key)
        .and_then(|(_, v)| v.parse().ok())
}

fn find(items: &[Value], id: &str) -> Option<Value> {
    let id: i64 = id.parse().ok()?;
    items.iter().find(|v| v["id"] == id).cloned()
}

/// Slice by `page`/`size` and report the full length in `x-total-count`
/// unless the stub is set to leave it out.
fn paged(stub: &Stub, items: &[Value], query: &[(String, String)]) -> Response {
    let page = param(query, "page").unwrap_or(0);
    let size = param(query, "size").unwrap_or(20).max(1);
    let slice: Vec<Value> = items.iter().skip(page * size).take(size).cloned().collect();
    let mut headers = HeaderMap::new();
    if !stub.omit_total.load(Ordering::SeqCst) {
        headers.insert("x-total-count", HeaderValue::from(items.len()));
    }
    (headers, Json(slice)).into_response()
}

// ---------------------------------------------------------------------------
// Fixture data
// ---------------------------------------------------------------------------

fn customer(id: i64, first: &str, last: &str, email: &str, phone: &str) -> Value {
    json!({"id": id, "firstName": first, "lastName": last, "email": email, "phone": phone})
}

pub fn customers() -> Vec<Value> {
    vec![
        customer(1, "Ada", "Lovelace", "ada@example.com", "555-0101"),
        customer(2, "Alan", "Turing", "alan@example.com", "555-0102"),
        customer(3, "Grace", "Hopper", "grace@example.com", "555-0103"),
    ]
}

pub fn services() -> Vec<Value> {
    vec![
        json!({"id": 1, "name": "Haircut", "duration": 30, "price": 25.00, "business": {"id": 1, "name": "Studio"}}),
        json!({"id": 2, "name": "Massage", "duration": 60, "price": "60.00", "business": {"id": 1, "name": "Studio"}}),
    ]
}

fn reservation(id: i64, date: &str, status: &str, customer: i64, service: &Value) -> Value {
    json!({
        "id": id,
        "date": date,
        "status": status,
        "customer": {"id": customer},
        "service": service,
        "business": {"id": 1, "name": "Studio", "type": "HAIRDRESSER"}
    })
}

/// Three future reservations (one for a customer that does not exist) and
/// two past ones.
pub fn reservations() -> Vec<Value> {
    let services = services();
    let (haircut, massage) = (&services[0], &services[1]);
    vec![
        reservation(1, "2099-01-10T10:00:00Z", "PENDING", 1, haircut),
        reservation(2, "2099-01-05T09:00:00Z", "CONFIRMED", 2, massage),
        reservation(3, "2020-05-01T12:00:00Z", "COMPLETED", 1, haircut),
        reservation(4, "2020-06-01T12:00:00Z", "CANCELLED", 3, haircut),
        reservation(5, "2099-02-01T08:00:00Z", "PENDING", 42, haircut),
    ]
}

pub fn payments() -> Vec<Value> {
    vec![
        json!({"id": 1, "amount": 100, "method": "CASH", "status": "PAID", "customer": {"id": 1}, "reservation": {"id": 3}}),
        json!({"id": 2, "amount": 50, "method": "CREDIT_CARD", "status": "PENDING", "customer": {"id": 2}, "reservation": {"id": 2}}),
        json!({"id": 3, "amount": 25, "method": "CASH", "status": "REFUNDED", "customer": {"id": 3}, "reservation": {"id": 4}}),
    ]
}

pub fn finance_entries() -> Vec<Value> {
    vec![
        json!({"id": 1, "entryDate": "2024-01-15", "type": "INCOME", "amount": 1200, "description": "January sales"}),
        json!({"id": 2, "entryDate": "2024-01-31", "type": "EXPENSE", "amount": 300, "description": "Rent",
               "document": {"id": 9, "fileName": "rent.pdf", "contentType": "application/pdf", "size": 2048}}),
        json!({"id": 3, "entryDate": "2024-02-02", "type": "EXPENSE", "amount": 80}),
    ]
}

fn appointment(id: i64, title: &str, date: &str, status: &str, participant: i64) -> Value {
    json!({
        "id": id,
        "title": title,
        "appointmentDate": date,
        "duration": 45,
        "status": status,
        "type": {"id": 1, "name": "Consultation", "color": "#1E90FF", "isActive": true},
        "participants": [{"id": participant, "login": "staff", "firstName": "Sam", "lastName": "Staff", "email": "sam@example.com"}]
    })
}

pub fn appointments() -> Vec<Value> {
    vec![
        appointment(1, "Supplier call", "2099-03-01T09:00:00Z", "PLANNED", 3),
        appointment(2, "Team sync", "2020-01-10T14:00:00Z", "COMPLETED", 3),
    ]
}

pub fn appointment_types() -> Vec<Value> {
    vec![
        json!({"id": 1, "name": "Consultation", "color": "#1E90FF", "isActive": true}),
        json!({"id": 2, "name": "Delivery", "color": "orange", "isActive": false}),
    ]
}
