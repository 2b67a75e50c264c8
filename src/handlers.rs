use crate::badge::render_badge;
use crate::config::Config;
use crate::errors::AppError;
use crate::htb_client::HtbClient;
use crate::validation::{resolve_layout, validate_id};
use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub const SVG_CONTENT_TYPE: &str = "image/svg+xml";
pub const BADGE_CACHE_CONTROL: &str = "s-maxage=3600, stale-while-revalidate";

/// Shared application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Config,
    /// Client for the HTB profile API.
    pub htb_client: HtbClient,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self, AppError> {
        let htb_client = HtbClient::new(&config)?;
        Ok(Self { config, htb_client })
    }
}

/// Query string accepted by the badge endpoint.
///
/// Built from raw key/value pairs so that missing, malformed or repeated
/// parameters all reach the validator instead of the extractor.
#[derive(Debug, Default, PartialEq)]
pub struct BadgeQuery {
    pub id: Option<String>,
    pub layout: Option<String>,
}

impl BadgeQuery {
    /// Repeated keys are joined with `,`, which no valid id or layout contains.
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        let join = |key: &str| {
            let values: Vec<&str> = pairs
                .iter()
                .filter(|(k, _)| k == key)
                .map(|(_, v)| v.as_str())
                .collect();
            (!values.is_empty()).then(|| values.join(","))
        };

        Self {
            id: join("id"),
            layout: join("layout"),
        }
    }
}

/// Builds the application router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/htb", get(htb_badge))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Health check endpoint.
pub async fn health() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "service": "htb-badge",
            "version": env!("CARGO_PKG_VERSION")
        })),
    )
}

/// GET /api/htb?id=<digits>[&layout=full|compact]
///
/// Validates the id, fetches the profile from HTB and answers with the
/// rendered SVG badge. Caching is left to the CDN via `Cache-Control`.
///
/// # Returns
///
/// * `Result<Response, AppError>` - The SVG badge or a plain-text error.
pub async fn htb_badge(
    State(state): State<Arc<AppState>>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Response, AppError> {
    let params = BadgeQuery::from_pairs(&pairs);
    tracing::info!("GET /api/htb - params: {:?}", params);

    let id = validate_id(params.id.as_deref())?;
    let layout = resolve_layout(params.layout.as_deref(), state.config.layout)?;

    let profile = state.htb_client.fetch_profile(id).await?;
    let svg = render_badge(&profile, layout);

    tracing::info!("Rendered {} badge for profile {}", layout, id);

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, SVG_CONTENT_TYPE),
            (header::CACHE_CONTROL, BADGE_CACHE_CONTROL),
        ],
        svg,
    )
        .into_response())
}
