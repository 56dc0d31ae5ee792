//! End-to-end flows against an in-process axum backend over real HTTP.

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, patch, post};
use axum::{Json, Router};
use parking_lot::Mutex;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;

use resto_client::{
    ApiClient, ApiError, HttpTransport, LayoutVariant, MemorySessionStore, Order, Page,
    SessionSnapshot, SessionStore,
};

const GOOD_TOKEN: &str = "kitchen-token";

#[derive(Clone, Default)]
struct Backend {
    orders: Arc<Mutex<Vec<Value>>>,
    hits: Arc<Mutex<HashMap<String, usize>>>,
}

impl Backend {
    fn with_orders() -> Self {
        let backend = Backend::default();
        *backend.orders.lock() = vec![
            json!({"id": "o1", "status": {"id": 1, "name": "Pending"}, "restaurantId": "r1"}),
            json!({"id": "o2", "status": "Preparing", "restaurantId": "r1"}),
        ];
        backend
    }

    fn hit(&self, route: &str) {
        *self.hits.lock().entry(route.to_string()).or_default() += 1;
    }

    fn hits(&self, route: &str) -> usize {
        self.hits.lock().get(route).copied().unwrap_or(0)
    }

    fn total_hits(&self) -> usize {
        self.hits.lock().values().sum()
    }
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == format!("Bearer {}", GOOD_TOKEN))
}

fn unauthorized() -> (StatusCode, Json<Value>) {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({"statusCode": 401, "message": "Invalid or expired token"})),
    )
}

async fn login(State(backend): State<Backend>, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    backend.hit("login");
    if body["password"] != "secret" {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"message": ["password is incorrect"]})),
        );
    }
    (
        StatusCode::OK,
        Json(json!({
            "success": true,
            "data": {
                "access_token": GOOD_TOKEN,
                "refresh_token": "r1",
                "user": {"_id": "u7", "fullName": "Kim Cook", "role": {"roleName": "RestaurantStaff"}}
            }
        })),
    )
}

async fn kitchen_queue(State(backend): State<Backend>, headers: HeaderMap) -> (StatusCode, Json<Value>) {
    backend.hit("kitchen-queue");
    if !authorized(&headers) {
        return unauthorized();
    }
    (StatusCode::OK, Json(Value::Array(backend.orders.lock().clone())))
}

async fn my_orders(State(backend): State<Backend>, headers: HeaderMap) -> (StatusCode, Json<Value>) {
    backend.hit("my-orders");
    if !authorized(&headers) {
        return unauthorized();
    }
    let orders = backend.orders.lock().clone();
    let total = orders.len();
    (
        StatusCode::OK,
        Json(json!({"data": orders, "total": total.to_string(), "page": 1, "limit": 10})),
    )
}

async fn cancel_order(
    State(backend): State<Backend>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> (StatusCode, Json<Value>) {
    backend.hit("cancel");
    if !authorized(&headers) {
        return unauthorized();
    }
    let mut orders = backend.orders.lock();
    match orders.iter_mut().find(|o| o["id"] == id.as_str()) {
        Some(order) => {
            order["status"] = json!({"id": 9, "name": "Cancelled"});
            (StatusCode::OK, Json(order.clone()))
        }
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({"message": format!("Order {} not found", id), "error": "Not Found"})),
        ),
    }
}

async fn spawn_backend(backend: Backend) -> String {
    let app = Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/orders/kitchen-queue", get(kitchen_queue))
        .route("/api/orders/my-orders", get(my_orders))
        .route("/api/orders/:id/cancel", patch(cancel_order))
        .with_state(backend);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}/api", addr)
}

fn client_for(base_url: &str, store: Arc<MemorySessionStore>) -> ApiClient<HttpTransport> {
    ApiClient::new(HttpTransport::new(base_url).unwrap(), store)
}

fn status_of(page: &Value, id: &str) -> String {
    let page: Page<Order> = serde_json::from_value(page.clone()).unwrap();
    page.data
        .iter()
        .find(|o| o.id == id)
        .map(|o| o.status_name().to_string())
        .unwrap_or_default()
}

#[tokio::test]
async fn test_cancel_refreshes_kitchen_and_my_orders_views() {
    let backend = Backend::with_orders();
    let base_url = spawn_backend(backend.clone()).await;
    let store = Arc::new(MemorySessionStore::new());
    let client = client_for(&base_url, store.clone());

    client
        .mutate("login", json!({"email": "kim@resto.io", "password": "secret"}))
        .await
        .unwrap();
    assert_eq!(client.layout(), LayoutVariant::RestaurantStaff);
    assert_eq!(store.load().unwrap().token.as_deref(), Some(GOOD_TOKEN));

    let kitchen = client.subscribe("get_kitchen_queue", json!({})).await.unwrap();
    let mine = client.subscribe("get_my_orders", json!({"page": 1})).await.unwrap();
    assert_eq!(status_of(&kitchen.current(), "o1"), "Pending");
    assert_eq!(mine.current()["total"], 2);

    let cancelled = client.mutate("cancel_order", json!({"id": "o1"})).await.unwrap();
    assert_eq!(cancelled["status"]["name"], "Cancelled");

    assert_eq!(status_of(&kitchen.current(), "o1"), "Cancelled");
    assert_eq!(status_of(&mine.current(), "o1"), "Cancelled");
    assert_eq!(status_of(&mine.current(), "o2"), "Preparing");
    assert_eq!(backend.hits("kitchen-queue"), 2);
    assert_eq!(backend.hits("my-orders"), 2);
}

#[tokio::test]
async fn test_concurrent_subscribers_share_one_request() {
    let backend = Backend::with_orders();
    let base_url = spawn_backend(backend.clone()).await;
    let store = Arc::new(MemorySessionStore::with_session(SessionSnapshot::new(
        Some(GOOD_TOKEN.to_string()),
        None,
    )));
    let client = client_for(&base_url, store);

    let (a, b) = tokio::join!(
        client.subscribe("get_kitchen_queue", json!({})),
        client.subscribe("get_kitchen_queue", json!({})),
    );
    let (a, b) = (a.unwrap(), b.unwrap());

    assert_eq!(a.current(), b.current());
    assert_eq!(backend.hits("kitchen-queue"), 1);
    assert_eq!(client.cache().subscribers(a.key()), 2);
}

#[tokio::test]
async fn test_expired_token_is_purged_on_401() {
    let backend = Backend::with_orders();
    let base_url = spawn_backend(backend.clone()).await;
    let store = Arc::new(MemorySessionStore::with_session(SessionSnapshot::new(
        Some("expired".to_string()),
        None,
    )));
    let client = client_for(&base_url, store.clone());
    assert!(client.is_authenticated());

    let err = client
        .mutate("cancel_order", json!({"id": "o1"}))
        .await
        .unwrap_err();

    match &err {
        ApiError::Unauthorized { body, .. } => assert_eq!(body["statusCode"], 401),
        other => panic!("expected unauthorized, got {:?}", other),
    }
    assert_eq!(err.display_message(), "Invalid or expired token");
    assert!(!client.is_authenticated());
    assert_eq!(store.load().unwrap().token, None);
    assert_eq!(backend.orders.lock()[0]["status"]["name"], "Pending");
}

#[tokio::test]
async fn test_server_error_envelope_reaches_the_caller() {
    let backend = Backend::with_orders();
    let base_url = spawn_backend(backend.clone()).await;
    let store = Arc::new(MemorySessionStore::with_session(SessionSnapshot::new(
        Some(GOOD_TOKEN.to_string()),
        None,
    )));
    let client = client_for(&base_url, store);

    let err = client
        .mutate("cancel_order", json!({"id": "o9"}))
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(404));
    assert_eq!(err.display_message(), "Order o9 not found");

    let err = client
        .mutate("login", json!({"email": "kim@resto.io", "password": "wrong"}))
        .await
        .unwrap_err();
    assert_eq!(err.display_message(), "password is incorrect");
    assert!(client.is_authenticated());
}

#[tokio::test]
async fn test_invalid_arguments_never_leave_the_client() {
    let backend = Backend::with_orders();
    let base_url = spawn_backend(backend.clone()).await;
    let client = client_for(&base_url, Arc::new(MemorySessionStore::new()));

    let err = client
        .mutate(
            "create_address",
            json!({"userId": "not-a-uuid", "street": "", "city": "Oslo", "country": "NO"}),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Validation(_)));
    assert_eq!(err.display_message(), "User id must be a valid ID, Street is required");
    assert_eq!(backend.total_hits(), 0);
}
