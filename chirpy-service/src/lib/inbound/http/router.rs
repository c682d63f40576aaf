use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::delete;
use axum::routing::get;
use axum::routing::post;
use axum::routing::put;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::admin::healthz;
use super::handlers::admin::metrics;
use super::handlers::admin::reset;
use super::handlers::create_account::create_account;
use super::handlers::create_chirp::create_chirp;
use super::handlers::delete_chirp::delete_chirp;
use super::handlers::get_chirp::get_chirp;
use super::handlers::list_chirps::list_chirps;
use super::handlers::login::login;
use super::handlers::polka_webhook::polka_webhook;
use super::handlers::refresh::refresh;
use super::handlers::revoke::revoke;
use super::handlers::update_account::update_account;
use super::middleware::authenticate as auth_middleware;
use super::middleware::count_hits;
use crate::account::ports::AccountServicePort;
use crate::chirp::ports::ChirpServicePort;
use crate::session::ports::SessionServicePort;

/// Request counter exposed on `/admin/metrics`.
#[derive(Debug, Default)]
pub struct Metrics {
    hits: AtomicU64,
}

impl Metrics {
    pub fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    pub fn reset(&self) {
        self.hits.store(0, Ordering::Relaxed);
    }
}

#[derive(Clone)]
pub struct AppState {
    pub account_service: Arc<dyn AccountServicePort>,
    pub session_service: Arc<dyn SessionServicePort>,
    pub chirp_service: Arc<dyn ChirpServicePort>,
    pub polka_api_key: Arc<str>,
    pub development: bool,
    pub metrics: Arc<Metrics>,
}

impl AppState {
    pub fn new(
        account_service: Arc<dyn AccountServicePort>,
        session_service: Arc<dyn SessionServicePort>,
        chirp_service: Arc<dyn ChirpServicePort>,
        polka_api_key: &str,
        development: bool,
    ) -> Self {
        Self {
            account_service,
            session_service,
            chirp_service,
            polka_api_key: Arc::from(polka_api_key),
            development,
            metrics: Arc::new(Metrics::default()),
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    let authenticated = || middleware::from_fn_with_state(state.clone(), auth_middleware);

    let api_routes = Router::new()
        .route("/api/healthz", get(healthz))
        .route(
            "/api/users",
            post(create_account).merge(put(update_account).route_layer(authenticated())),
        )
        .route("/api/login", post(login))
        .route("/api/refresh", post(refresh))
        .route("/api/revoke", post(revoke))
        .route(
            "/api/chirps",
            get(list_chirps).merge(post(create_chirp).route_layer(authenticated())),
        )
        .route(
            "/api/chirps/:chirp_id",
            get(get_chirp).merge(delete(delete_chirp).route_layer(authenticated())),
        )
        .route("/api/polka/webhooks", post(polka_webhook))
        .layer(middleware::from_fn_with_state(state.clone(), count_hits));

    let admin_routes = Router::new()
        .route("/admin/metrics", get(metrics))
        .route("/admin/reset", post(reset));

    // Headers are left out of the span: they carry bearer tokens and API keys.
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(api_routes)
        .merge(admin_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
