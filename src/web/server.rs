use axum::{
    extract::{DefaultBodyLimit, State},
    http::{HeaderName, HeaderValue, StatusCode},
    response::Json,
    routing::{get, post},
    Router,
};
use serde::Serialize;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tower::limit::ConcurrencyLimitLayer;
use tower::ServiceBuilder;
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::timeout::TimeoutLayer;
use tracing::{debug, info};

use crate::cli::ServeArgs;
use crate::core::result::NormalizationResult;
use crate::core::sample::SampleInput;
use crate::manifest::store::ManifestTable;
use crate::matching::engine::{MatchingConfig, Normalizer};
use crate::utils::validation::{validate_batch_size, validate_field, ValidationError};

/// Security configuration constants to prevent `DoS` attacks
pub const MAX_BODY_SIZE: usize = 1024 * 1024; // 1MB
pub const MAX_CONCURRENT_REQUESTS: usize = 100;
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Shared application state
pub struct AppState {
    /// Current manifest; swapped whole on reload
    pub manifest: RwLock<Arc<ManifestTable>>,
    /// File the manifest was loaded from, if any
    pub manifest_path: Option<PathBuf>,
    pub config: MatchingConfig,
}

impl AppState {
    pub fn new(
        manifest: ManifestTable,
        manifest_path: Option<PathBuf>,
        config: MatchingConfig,
    ) -> Self {
        Self {
            manifest: RwLock::new(Arc::new(manifest)),
            manifest_path,
            config,
        }
    }

    /// Snapshot of the current manifest. Requests keep the snapshot they started
    /// with even if a reload lands mid-request.
    pub async fn current(&self) -> Arc<ManifestTable> {
        Arc::clone(&*self.manifest.read().await)
    }
}

/// Enhanced error response
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub error_type: String,
    pub details: Option<String>,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

#[derive(Serialize)]
struct ManifestSummary {
    sections: usize,
    rows: usize,
    strict: bool,
}

/// Create a safe error response that prevents information disclosure
/// while logging detailed errors server-side for debugging
pub fn create_safe_error_response(
    error_type: &str,
    user_message: &str,
    internal_error: Option<&str>,
) -> ErrorResponse {
    // Log detailed error server-side for debugging (not exposed to client)
    if let Some(internal_msg) = internal_error {
        tracing::error!("Internal error ({}): {}", error_type, internal_msg);
    }

    ErrorResponse {
        error: user_message.to_string(),
        error_type: error_type.to_string(),
        details: None, // Never expose internal details to prevent information disclosure
    }
}

fn validation_error(err: &ValidationError) -> ApiError {
    (
        StatusCode::BAD_REQUEST,
        Json(create_safe_error_response(
            "validation_error",
            &err.to_string(),
            None,
        )),
    )
}

fn validate_request(request: &SampleInput) -> Result<(), ApiError> {
    validate_field("section", &request.section).map_err(|e| validation_error(&e))?;
    validate_field("row", &request.row).map_err(|e| validation_error(&e))
}

/// Run the web server
///
/// # Errors
///
/// Returns an error if the manifest cannot be loaded, the tokio runtime cannot be
/// created, or the server fails to start.
pub fn run(args: ServeArgs) -> anyhow::Result<()> {
    // Build tokio runtime
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async move { run_server(args).await })
}

/// Create the application router with all routes and middleware configured.
///
/// Rate limiting needs the peer address, so it is added by the server rather
/// than here.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/normalize", post(normalize_handler))
        .route("/api/normalize/batch", post(batch_handler))
        .route("/api/manifest", get(manifest_handler))
        .route("/api/manifest/reload", post(reload_handler))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                // Security headers
                .layer(SetResponseHeaderLayer::if_not_present(
                    HeaderName::from_static("x-content-type-options"),
                    HeaderValue::from_static("nosniff"),
                ))
                .layer(SetResponseHeaderLayer::if_not_present(
                    HeaderName::from_static("x-frame-options"),
                    HeaderValue::from_static("DENY"),
                ))
                .layer(SetResponseHeaderLayer::if_not_present(
                    HeaderName::from_static("referrer-policy"),
                    HeaderValue::from_static("no-referrer"),
                ))
                // Request timeout to prevent slow client attacks
                .layer(TimeoutLayer::with_status_code(
                    StatusCode::REQUEST_TIMEOUT,
                    Duration::from_secs(REQUEST_TIMEOUT_SECS),
                ))
                // Limit concurrent requests to prevent DOS
                .layer(ConcurrencyLimitLayer::new(MAX_CONCURRENT_REQUESTS))
                .layer(DefaultBodyLimit::max(MAX_BODY_SIZE)),
        )
}

async fn run_server(args: ServeArgs) -> anyhow::Result<()> {
    let manifest = tokio::task::spawn_blocking({
        let path = args.manifest.clone();
        move || ManifestTable::load(&path)
    })
    .await??;
    info!(
        sections = manifest.len(),
        rows = manifest.row_count(),
        "manifest loaded"
    );

    let config = MatchingConfig {
        strict: args.strict,
    };
    let state = Arc::new(AppState::new(manifest, Some(args.manifest), config));

    // Configure IP-based rate limiting
    let governor_conf = GovernorConfigBuilder::default()
        .per_second(10) // 10 requests per second per IP
        .burst_size(50) // Allow bursts of 50 requests
        .finish()
        .ok_or_else(|| anyhow::anyhow!("Invalid rate limiter configuration"))?;

    let app = create_router(state).layer(GovernorLayer {
        config: Arc::new(governor_conf),
    });

    let addr = format!("{}:{}", args.address, args.port);
    println!("Starting section-normalizer server at http://{addr}");

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

/// Normalize one section/row pair
async fn normalize_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SampleInput>,
) -> Result<Json<NormalizationResult>, ApiError> {
    validate_request(&request)?;

    let manifest = state.current().await;
    let result =
        Normalizer::with_config(&manifest, state.config).normalize(&request.section, &request.row);
    debug!(section = %request.section, row = %request.row, %result, "normalized");

    Ok(Json(result))
}

/// Normalize a batch of pairs; results are in request order
async fn batch_handler(
    State(state): State<Arc<AppState>>,
    Json(requests): Json<Vec<SampleInput>>,
) -> Result<Json<Vec<NormalizationResult>>, ApiError> {
    validate_batch_size(requests.len()).map_err(|e| validation_error(&e))?;
    for request in &requests {
        validate_request(request)?;
    }

    let manifest = state.current().await;
    let normalizer = Normalizer::with_config(&manifest, state.config);
    let results = requests
        .iter()
        .map(|r| normalizer.normalize(&r.section, &r.row))
        .collect();

    Ok(Json(results))
}

/// Summary of the loaded manifest
async fn manifest_handler(State(state): State<Arc<AppState>>) -> Json<ManifestSummary> {
    let manifest = state.current().await;
    Json(ManifestSummary {
        sections: manifest.len(),
        rows: manifest.row_count(),
        strict: state.config.strict,
    })
}

/// Re-read the manifest file and swap it in
async fn reload_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ManifestSummary>, ApiError> {
    let Some(path) = state.manifest_path.clone() else {
        return Err((
            StatusCode::CONFLICT,
            Json(create_safe_error_response(
                "reload_unavailable",
                "Manifest was not loaded from a file",
                None,
            )),
        ));
    };

    let loaded = tokio::task::spawn_blocking(move || ManifestTable::load(&path)).await;
    let manifest = match loaded {
        Ok(Ok(manifest)) => manifest,
        Ok(Err(e)) => {
            return Err((
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(create_safe_error_response(
                    "manifest_error",
                    "Failed to reload manifest; the previous manifest is still in use",
                    Some(&e.to_string()),
                )),
            ));
        }
        Err(e) => {
            return Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(create_safe_error_response(
                    "internal_error",
                    "Failed to reload manifest",
                    Some(&e.to_string()),
                )),
            ));
        }
    };

    let summary = ManifestSummary {
        sections: manifest.len(),
        rows: manifest.row_count(),
        strict: state.config.strict,
    };
    *state.manifest.write().await = Arc::new(manifest);
    info!(
        sections = summary.sections,
        rows = summary.rows,
        "manifest reloaded"
    );

    Ok(Json(summary))
}
