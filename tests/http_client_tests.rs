//! HTTP client tests against an in-process REST backend
//!
//! A small axum app stands in for the station API so the reqwest client is
//! exercised over a real socket: verbs, paths, bodies and status mapping.

use anyhow::Result;
use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};
use serde_json::{Value, json};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use station::prelude::*;

// =============================================================================
// Test Backend
// =============================================================================

#[derive(Clone, Default)]
struct Backend {
    records: Arc<Mutex<Vec<Value>>>,
    next_id: Arc<AtomicUsize>,
}

impl Backend {
    fn with(records: Vec<Value>) -> Self {
        let backend = Self::default();
        *backend.records.lock().unwrap() = records;
        backend
    }

    fn records(&self) -> Vec<Value> {
        self.records.lock().unwrap().clone()
    }
}

async fn list_records(State(backend): State<Backend>) -> Json<Vec<Value>> {
    Json(backend.records())
}

async fn create_record(
    State(backend): State<Backend>,
    Json(mut body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let n = backend.next_id.fetch_add(1, Ordering::SeqCst);
    body["_id"] = json!(format!("id-{}", n));
    backend.records.lock().unwrap().push(body.clone());
    (StatusCode::CREATED, Json(body))
}

async fn update_record(
    State(backend): State<Backend>,
    Path(id): Path<String>,
    Json(mut body): Json<Value>,
) -> Result<Json<Value>, StatusCode> {
    let mut records = backend.records.lock().unwrap();
    let slot = records
        .iter_mut()
        .find(|r| r["_id"] == id.as_str())
        .ok_or(StatusCode::NOT_FOUND)?;
    body["_id"] = json!(id);
    *slot = body.clone();
    Ok(Json(body))
}

async fn delete_record(State(backend): State<Backend>, Path(id): Path<String>) -> StatusCode {
    let mut records = backend.records.lock().unwrap();
    let before = records.len();
    records.retain(|r| r["_id"] != id.as_str());
    if records.len() < before {
        StatusCode::NO_CONTENT
    } else {
        StatusCode::NOT_FOUND
    }
}

fn collection(path: &str, backend: Backend) -> Router {
    Router::new()
        .route(&format!("/{}", path), get(list_records).post(create_record))
        .route(
            &format!("/{}/{{id}}", path),
            axum::routing::put(update_record).delete(delete_record),
        )
        .with_state(backend)
}

async fn serve(app: Router) -> Result<String> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    Ok(format!("http://{}/api", addr))
}

fn api(app: Router) -> Router {
    Router::new().nest("/api", app)
}

fn client<R: Resource>(base_url: &str) -> HttpResourceClient<R> {
    HttpResourceClient::new(reqwest::Client::new(), base_url)
}

fn sale_json(id: &str, product_id: &str) -> Value {
    json!({
        "_id": id,
        "productId": product_id,
        "volume": 3,
        "totalSalePrice": 7.5,
        "paymentMethod": "Cash",
        "date": "2024-06-10T00:00:00Z"
    })
}

// =============================================================================
// Client round trips
// =============================================================================

#[tokio::test]
async fn test_list_decodes_wire_records() -> Result<()> {
    let sales = Backend::with(vec![sale_json("s-1", "p-1"), sale_json("s-2", "p-2")]);
    let base = serve(api(collection("sales", sales))).await?;

    let records = client::<Sale>(&base).list().await?;

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].id.as_str(), "s-1");
    assert_eq!(records[1].data.product_id.as_str(), "p-2");
    assert_eq!(records[0].data.volume, 3);
    Ok(())
}

#[tokio::test]
async fn test_create_update_delete_round_trip() -> Result<()> {
    let sales = Backend::default();
    let base = serve(api(collection("sales", sales.clone()))).await?;
    let client = client::<Sale>(&base);

    let form = Sale::blank_form()
        .with("productId", "p-9")
        .with("volume", "5")
        .with("totalSalePrice", "12.5")
        .with("paymentMethod", "Card")
        .with("date", "2024-07-01");
    let payload = Sale::from_form(&form, FormMode::Create)?;

    let created = client.create(&payload).await?;
    assert_eq!(created.id.as_str(), "id-0");
    assert_eq!(created.data, payload);

    // request body carries data fields only
    let stored = sales.records();
    assert_eq!(stored[0]["productId"], "p-9");
    assert_eq!(stored[0]["paymentMethod"], "Card");

    let mut changed = payload.clone();
    changed.volume = 6;
    let updated = client.update(&created.id, &changed).await?;
    assert_eq!(updated, Record::new("id-0", changed.clone()));
    assert_eq!(client.list().await?, vec![updated]);

    client.delete(&created.id).await?;
    assert!(client.list().await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_unknown_id_maps_to_status_error() -> Result<()> {
    let base = serve(api(collection("sales", Backend::default()))).await?;
    let client = client::<Sale>(&base);

    let err = client.delete(&RecordId::new("nope")).await.unwrap_err();

    assert_eq!(err.status(), Some(404));
    assert_eq!(err.operation(), Operation::Delete);
    assert_eq!(err.error_code(), "TRANSPORT_STATUS");
    Ok(())
}

#[tokio::test]
async fn test_server_error_and_garbage_body() -> Result<()> {
    let app = Router::new()
        .route(
            "/employees",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "database down") }),
        )
        .route("/products", get(|| async { "<html>not json</html>" }));
    let base = serve(api(app)).await?;

    let err = client::<Employee>(&base).list().await.unwrap_err();
    assert_eq!(err.status(), Some(500));
    assert!(matches!(err, TransportError::Status { ref body, .. } if body == "database down"));

    let err = client::<Product>(&base).list().await.unwrap_err();
    assert_eq!(err.error_code(), "TRANSPORT_DECODE");
    Ok(())
}

#[tokio::test]
async fn test_empty_update_response_echoes_payload() -> Result<()> {
    let app = Router::new().route(
        "/users/{id}",
        axum::routing::put(|| async { StatusCode::NO_CONTENT }),
    );
    let base = serve(api(app)).await?;

    let user = User {
        first_name: "Ama".to_string(),
        last_name: "Weera".to_string(),
        user_type: "User".to_string(),
        phone: "0700000000".to_string(),
        email: "ama@station.lk".to_string(),
        password: None,
        address: "Jaffna".to_string(),
    };
    let record = client::<User>(&base)
        .update(&RecordId::new("u-7"), &user)
        .await?;

    assert_eq!(record, Record::new("u-7", user));
    Ok(())
}

#[tokio::test]
async fn test_unreachable_server_is_network_error() -> Result<()> {
    let listener = std::net::TcpListener::bind("127.0.0.1:0")?;
    let addr = listener.local_addr()?;
    drop(listener);

    let err = client::<Sale>(&format!("http://{}", addr))
        .list()
        .await
        .unwrap_err();

    assert_eq!(err.error_code(), "TRANSPORT_NETWORK");
    Ok(())
}

#[tokio::test]
async fn test_path_override_from_config() -> Result<()> {
    let expenses = Backend::with(vec![json!({
        "_id": "x-1",
        "type": "Water",
        "amount": 42.0,
        "date": "2024-02-01T00:00:00Z"
    })]);
    let base = serve(api(collection("utilityexpenses", expenses))).await?;

    let config = ConsoleConfig::from_yaml_str(&format!(
        "api:\n  base_url: {}\nresources:\n  utility-expenses:\n    path: utilityexpenses\n",
        base
    ))?;
    let client = HttpResourceClient::<UtilityExpense>::from_config(config.http_client()?, &config);

    let records = client.list().await?;
    assert_eq!(records[0].data.kind, "Water");
    assert_eq!(records[0].data.description, None);
    Ok(())
}

// =============================================================================
// Screen over HTTP
// =============================================================================

#[tokio::test]
async fn test_sale_screen_over_http() -> Result<()> {
    let sales = Backend::with(vec![sale_json("s-1", "p-1"), sale_json("s-2", "p-2")]);
    let products = Backend::with(vec![json!({
        "_id": "p-1",
        "name": "Engine Oil",
        "category": "Lubricants",
        "quantity": 10,
        "pricePerUnit": 2.5,
        "lastRestockDate": "2024-01-01T00:00:00Z"
    })]);
    let app = collection("sales", sales.clone()).merge(collection("products", products));
    let base = serve(api(app)).await?;

    let notifier = RecordingNotifier::new();
    let mut screen = Screen::new(client::<Sale>(&base))
        .with_lookup::<Product, _>(client::<Product>(&base))
        .with_notifier(std::sync::Arc::new(notifier.clone()));
    screen.load().await?;

    screen.search("engine");
    assert_eq!(screen.visible().len(), 1);
    assert_eq!(screen.visible()[0].id.as_str(), "s-1");

    screen.delete(&RecordId::new("s-1"), Confirmation::Confirmed).await?;
    assert_eq!(sales.records().len(), 1);
    assert!(screen.visible().is_empty());
    assert!(
        notifier
            .notifications()
            .iter()
            .any(|n| n.message == "Sale deleted successfully!")
    );
    Ok(())
}
