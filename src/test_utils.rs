use std::sync::{Arc, Mutex};

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::Router;
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Raw request bodies received by the fake `/predict` route.
pub type RecordedBodies = Arc<Mutex<Vec<String>>>;

/// Canned answers of the fake scoring service.
#[derive(Clone)]
pub struct FakeService {
    pub predict: (StatusCode, String),
    pub performance: (StatusCode, String),
    pub importance: (StatusCode, String),
}

impl Default for FakeService {
    fn default() -> Self {
        Self {
            predict: (StatusCode::OK, json!({"prediction": 1}).to_string()),
            performance: (
                StatusCode::OK,
                json!({"TP": 620, "TN": 505, "FP": 180, "FN": 195}).to_string(),
            ),
            importance: (
                StatusCode::OK,
                json!([
                    {"name": "loyalty", "value": 2.31},
                    {"name": "purchases", "value": 0.19},
                    {"name": "discounts x loyalty", "value": 0.12},
                    {"name": "discounts", "value": 0.08},
                    {"name": "age", "value": 0.02}
                ])
                .to_string(),
            ),
        }
    }
}

fn canned((status, body): (StatusCode, String)) -> impl IntoResponse {
    (status, [("content-type", "application/json")], body)
}

impl FakeService {
    pub fn router(self, recorded: RecordedBodies) -> Router {
        let FakeService {
            predict,
            performance,
            importance,
        } = self;
        Router::new()
            .route(
                "/predict",
                post(move |body: String| {
                    let recorded = recorded.clone();
                    let predict = predict.clone();
                    async move {
                        recorded.lock().unwrap().push(body);
                        canned(predict)
                    }
                }),
            )
            .route(
                "/performance",
                get(move || {
                    let performance = performance.clone();
                    async move { canned(performance) }
                }),
            )
            .route(
                "/importance",
                get(move || {
                    let importance = importance.clone();
                    async move { canned(importance) }
                }),
            )
    }

    /// Serves the fake on a loopback port and returns its base URL.
    pub async fn spawn(self) -> (String, RecordedBodies) {
        init_test_tracing();
        let recorded = RecordedBodies::default();
        let app = self.router(recorded.clone());
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind fake scoring service");
        let address = listener.local_addr().expect("Failed to read local address");
        tokio::spawn(async move {
            axum::serve(listener, app)
                .await
                .expect("Fake scoring service stopped");
        });
        (format!("http://{}", address), recorded)
    }
}

/// A base URL nothing is listening on.
pub async fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind probe listener");
    let address = listener.local_addr().expect("Failed to read local address");
    drop(listener);
    format!("http://{}", address)
}

/// Parses a recorded request body.
pub fn parse(body: &str) -> Value {
    serde_json::from_str(body).expect("recorded body is not JSON")
}

/// Initialize tracing for tests with output to STDERR.
///
/// The log level is determined by the RUST_LOG environment variable,
/// defaulting to WARN if not set. Only the first call installs a subscriber.
fn init_test_tracing() {
    let log_level = std::env::var("RUST_LOG")
        .ok()
        .and_then(|level| match level.to_uppercase().as_str() {
            "ERROR" => Some(Level::ERROR),
            "WARN" => Some(Level::WARN),
            "INFO" => Some(Level::INFO),
            "DEBUG" => Some(Level::DEBUG),
            "TRACE" => Some(Level::TRACE),
            _ => None,
        })
        .unwrap_or(Level::WARN);

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}
