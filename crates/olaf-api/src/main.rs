//! olaf-api - webhook HTTP server for OLAF.
//!
//! Receives WhatsApp webhook deliveries, authenticates them, and hands
//! each user message to the dispatcher as a background unit of work. The
//! webhook handler always answers fast, independent of downstream
//! outcome.

mod config;

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use tower_http::{
    limit::RequestBodyLimitLayer,
    request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing::{error, info, warn};
use uuid::Uuid;

use olaf_core::{defaults, ClassifierBackend};
use olaf_db::Database;
use olaf_inference::{ClassifierConfig, FallbackClassifier};
use olaf_pipeline::Dispatcher;
use olaf_wa::{check_verification, extract_inbound, verify_signature, VerifyParams, WaClient, WebhookPayload};

use config::AppConfig;

/// Generates time-ordered UUIDv7 request correlation IDs.
#[derive(Clone, Default)]
struct MakeRequestUuidV7;

impl MakeRequestId for MakeRequestUuidV7 {
    fn make_request_id<B>(&mut self, _request: &axum::http::Request<B>) -> Option<RequestId> {
        let id = Uuid::now_v7().to_string().parse().ok()?;
        Some(RequestId::new(id))
    }
}

#[derive(Clone)]
struct AppState {
    dispatcher: Arc<Dispatcher>,
    app_secret: String,
    verify_token: String,
}

fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json_logs = std::env::var("OLAF_LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = AppConfig::from_env()?;

    let db = Database::connect(&config.database_url).await?;
    olaf_db::MIGRATOR.run(db.pool()).await?;
    info!(subsystem = "api", "Database ready");

    let messenger = Arc::new(WaClient::new(
        config.wa_phone_id.clone(),
        config.wa_bearer_token.clone(),
    )?);

    let classifier: Option<Arc<dyn ClassifierBackend>> = if config.classifier_enabled {
        Some(Arc::new(FallbackClassifier::new(ClassifierConfig::from_env())?))
    } else {
        info!(subsystem = "api", "No classifier configured; fallback path disabled");
        None
    };

    let dispatcher = Arc::new(Dispatcher::new(
        Arc::new(olaf_db::PgInboundMessageRepository::new(db.pool().clone())),
        Arc::new(olaf_db::PgUserRepository::new(db.pool().clone())),
        Arc::new(olaf_db::PgFoodItemRepository::new(db.pool().clone())),
        classifier,
        messenger,
    ));

    let state = AppState {
        dispatcher,
        app_secret: config.meta_app_secret.clone(),
        verify_token: config.meta_verify_token.clone(),
    };

    let app = Router::new()
        .route("/health", get(health))
        .route("/webhook", get(verify_webhook).post(inbound_webhook))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
        .layer(TraceLayer::new_for_http())
        .layer(RequestBodyLimitLayer::new(defaults::MAX_WEBHOOK_BODY_BYTES))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!(subsystem = "api", addr = %config.bind_addr, "Listening");
    axum::serve(listener, app).await?;

    Ok(())
}

/// Liveness check.
async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "time": chrono::Utc::now().to_rfc3339(),
    }))
}

/// WhatsApp webhook verification handshake (GET).
async fn verify_webhook(
    State(state): State<AppState>,
    Query(params): Query<VerifyParams>,
) -> Response {
    match check_verification(&params, &state.verify_token) {
        Some(challenge) => {
            info!(subsystem = "api", op = "verify", "Webhook verified");
            (StatusCode::OK, challenge).into_response()
        }
        None => {
            warn!(subsystem = "api", op = "verify", "Invalid verify token");
            (StatusCode::FORBIDDEN, "Bad verify token").into_response()
        }
    }
}

/// Inbound webhook handler (POST).
///
/// Verifies the delivery signature over the raw body, extracts the user
/// message, spawns the dispatch, and acknowledges immediately. Every
/// downstream failure is handled in the background task; the platform
/// never sees it.
async fn inbound_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let signature = headers
        .get("x-hub-signature-256")
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();

    if !verify_signature(&state.app_secret, &body, signature) {
        warn!(subsystem = "api", op = "inbound", "Invalid webhook signature");
        return (
            StatusCode::FORBIDDEN,
            Json(serde_json::json!({ "status": "invalid-signature" })),
        )
            .into_response();
    }

    let payload: WebhookPayload = match serde_json::from_slice(&body) {
        Ok(payload) => payload,
        Err(e) => {
            warn!(subsystem = "api", op = "inbound", error = %e, "Unparseable webhook body");
            return (
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({ "status": "invalid-payload" })),
            )
                .into_response();
        }
    };

    let Some(message) = extract_inbound(&payload) else {
        return Json(serde_json::json!({ "status": "ignored-no-message" })).into_response();
    };

    let dispatcher = state.dispatcher.clone();
    tokio::spawn(async move {
        if let Err(e) = dispatcher.handle(&message).await {
            error!(
                subsystem = "api",
                op = "process",
                message_id = %message.message_id,
                error = %e,
                "Background processing failed"
            );
        }
    });

    Json(serde_json::json!({ "status": "ok" })).into_response()
}
