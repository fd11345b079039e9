//! Axum-based gateway for the course load advisor. Config-driven via CoreConfig.

mod handlers;

use advisor_core::{CoreConfig, KnowledgeBase, RuleType, StudentRoster};
use axum::http::Method;
use axum::{
    extract::State,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Pre-flight check: config loads, both data files parse, port is free.
fn run_verify() -> Result<(), String> {
    let config = CoreConfig::load().map_err(|e| format!("Config load failed: {}", e))?;

    print!("Checking knowledge base {}... ", config.knowledge_base_path);
    let kb = KnowledgeBase::from_path(&config.knowledge_base_path)
        .map_err(|e| format!("knowledge base unreadable: {}", e))?;
    let per_type: Vec<String> = RuleType::all()
        .iter()
        .map(|t| format!("{} {}", t.label(), kb.of_type(*t).count()))
        .collect();
    println!("OK ({} rules: {})", kb.len(), per_type.join(", "));

    print!("Checking student roster {}... ", config.student_data_path);
    let roster = StudentRoster::from_path(&config.student_data_path)
        .map_err(|e| format!("student roster unreadable: {}", e))?;
    println!("OK ({} students)", roster.len());

    let port = config.port;
    print!("Checking port {}... ", port);
    let addr = std::net::SocketAddr::from(([127, 0, 0, 1], port));
    match std::net::TcpListener::bind(addr) {
        Ok(listener) => {
            drop(listener);
            println!("OK (available)");
        }
        Err(e) => {
            return Err(format!("Port {} BLOCKED: {}", port, e));
        }
    }

    println!("\nAll checks passed. Ready to start the advisor gateway.");
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Load .env file if present (before any env::var calls)
    if let Err(e) = dotenvy::dotenv() {
        eprintln!("[advisor-gateway] .env not loaded: {} (using system environment)", e);
    }

    if std::env::args().any(|a| a == "--verify") {
        match run_verify() {
            Ok(()) => std::process::exit(0),
            Err(e) => {
                eprintln!("PRE-FLIGHT FAILED: {}", e);
                std::process::exit(1);
            }
        }
    }

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Arc::new(CoreConfig::load()?);
    let app = build_app(AppState {
        config: Arc::clone(&config),
    });

    let addr = std::net::SocketAddr::from(([127, 0, 0, 1], config.port));
    tracing::info!(target: "advisor::gateway", "{} listening on {}", config.app_name, addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_app(state: AppState) -> Router {
    let frontend_enabled = state.config.frontend_enabled;
    let frontend_dir = std::path::PathBuf::from(&state.config.frontend_dir);

    // Browsers on the same machine only; the page itself is served same-origin.
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(|origin: &axum::http::HeaderValue, _| {
            let s = origin.to_str().unwrap_or("");
            s.starts_with("http://localhost:") || s.starts_with("http://127.0.0.1:")
        }))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(tower_http::cors::Any);

    let mut app = Router::new()
        .route("/get_advice", post(handlers::advice::get_advice))
        .route("/submit-rating", post(handlers::feedback::submit_rating))
        .route("/v1/status", get(status))
        .route("/api/v1/health", get(health))
        .with_state(state);

    if frontend_enabled {
        // `/` -> index.html, `/ui/*` -> everything else in the frontend directory
        app = app
            .route_service("/", ServeFile::new(frontend_dir.join("index.html")))
            .nest_service("/ui", ServeDir::new(frontend_dir));
    }

    app.layer(cors)
}

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) config: Arc<CoreConfig>,
}

/// GET /api/v1/health – liveness check for UI and scripts.
async fn health() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({ "status": "ok" }))
}

/// GET /v1/status – app identity and configured data sources.
async fn status(State(state): State<AppState>) -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "app_name": state.config.app_name,
        "port": state.config.port,
        "knowledge_base_path": state.config.knowledge_base_path,
        "student_data_path": state.config.student_data_path,
        "frontend_enabled": state.config.frontend_enabled,
    }))
}
