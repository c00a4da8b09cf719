use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fundrec_core::domain::contract::RunRequest;
use fundrec_core::domain::fund::ScoredFund;
use fundrec_core::domain::recommendation::RecommendationSnapshot;
use fundrec_core::engine::recommend;
use fundrec_core::engine::score::ScoredUniverse;
use fundrec_core::report::{export_recommendations_csv, REPORT_FILE_NAME};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = fundrec_core::config::Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .with(sentry_tracing::layer())
        .init();

    let universe: Option<Arc<ScoredUniverse>> = match settings.require_fund_universe_path() {
        Ok(path) => match fundrec_core::universe::load_scored_universe(path) {
            Ok(u) => Some(Arc::new(u)),
            Err(e) => {
                sentry_anyhow::capture_anyhow(&e);
                tracing::error!(error = %format!("{e:#}"), "fund universe load failed; starting API in degraded mode");
                None
            }
        },
        Err(e) => {
            sentry_anyhow::capture_anyhow(&e);
            tracing::error!(error = %e, "FUND_UNIVERSE_PATH missing; starting API in degraded mode");
            None
        }
    };

    let app = router(AppState { universe });

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], settings.port));
    tracing::info!(%addr, "api listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

fn router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/funds", get(get_funds))
        .route("/recommendations", get(get_recommendations))
        .route("/recommendations/export.csv", get(export_recommendations))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

async fn healthz() -> &'static str {
    "ok"
}

#[derive(Debug, Clone)]
struct AppState {
    universe: Option<Arc<ScoredUniverse>>,
}

impl AppState {
    fn universe(&self) -> Result<&ScoredUniverse, StatusCode> {
        self.universe
            .as_deref()
            .ok_or(StatusCode::SERVICE_UNAVAILABLE)
    }
}

async fn get_funds(State(state): State<AppState>) -> Result<Json<Vec<ScoredFund>>, StatusCode> {
    let universe = state.universe()?;
    Ok(Json(universe.funds().to_vec()))
}

async fn get_recommendations(
    State(state): State<AppState>,
    Query(req): Query<RunRequest>,
) -> Result<Json<RecommendationSnapshot>, (StatusCode, String)> {
    let snapshot = run(&state, req)?;
    Ok(Json(snapshot))
}

async fn export_recommendations(
    State(state): State<AppState>,
    Query(req): Query<RunRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let snapshot = run(&state, req)?;
    let csv = export_recommendations_csv(&snapshot).map_err(|e| {
        sentry_anyhow::capture_anyhow(&e);
        (StatusCode::INTERNAL_SERVER_ERROR, "report export failed".to_string())
    })?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{REPORT_FILE_NAME}\""),
            ),
        ],
        csv,
    ))
}

fn run(state: &AppState, req: RunRequest) -> Result<RecommendationSnapshot, (StatusCode, String)> {
    let universe = state
        .universe()
        .map_err(|status| (status, "fund universe unavailable".to_string()))?;

    let params = req.validate_and_into_params().map_err(|e| {
        tracing::warn!(error = %e, "rejected run request");
        (StatusCode::BAD_REQUEST, e.to_string())
    })?;

    recommend(universe, &params).map_err(|e| {
        tracing::warn!(error = %e, "recommendation run failed");
        (StatusCode::UNPROCESSABLE_ENTITY, e.to_string())
    })
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}

fn init_sentry(settings: &fundrec_core::config::Settings) -> Option<sentry::ClientInitGuard> {
    let dsn = settings.sentry_dsn.as_deref()?;
    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    )))
}
