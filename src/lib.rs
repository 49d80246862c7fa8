pub mod audit;
pub mod config;
pub mod db;
pub mod email;
pub mod error;
pub mod models;
pub mod routes;
pub mod state;
pub mod submission;

use std::sync::Arc;

use axum::http::{header, HeaderName, HeaderValue, Method};
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::audit::{AuditLogger, AuditSink, AuditStore, HttpSink, StoreSink};
use crate::config::{AuditSinkMode, Config};
use crate::email::EmailProvider;
use crate::state::{AppState, SharedState};

/// Wire injected collaborators into shared state.
pub fn build_state(
    config: Config,
    store: Arc<dyn AuditStore>,
    provider: Arc<dyn EmailProvider>,
) -> Result<SharedState, String> {
    let sink: Arc<dyn AuditSink> = match config.audit_sink {
        AuditSinkMode::Store => Arc::new(StoreSink::new(store.clone())),
        AuditSinkMode::Http => {
            tracing::info!("Audit records go through {}/audit-log", config.base_url);
            Arc::new(HttpSink::new(&config.base_url)?)
        }
    };

    Ok(Arc::new(AppState {
        config,
        store,
        provider,
        audit: AuditLogger::new(sink),
    }))
}

pub fn build_app(state: SharedState) -> Router {
    let cors = cors_layer(&state.config.cors_origins);

    let mut app = Router::new()
        .merge(routes::api_routes())
        .route("/health", axum::routing::get(health))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(RequestBodyLimitLayer::new(state.config.max_body_size)),
        )
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("x-content-type-options"),
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("x-frame-options"),
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("referrer-policy"),
            HeaderValue::from_static("strict-origin-when-cross-origin"),
        ));

    if let Some(cors) = cors {
        app = app.layer(cors);
    }

    app.with_state(state)
}

fn cors_layer(origins: &[String]) -> Option<CorsLayer> {
    if origins.is_empty() {
        return None;
    }

    let allow_origin = if origins.iter().any(|o| o == "*") {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(
            origins
                .iter()
                .filter_map(|o| HeaderValue::from_str(o).ok())
                .collect::<Vec<_>>(),
        )
    };

    Some(
        CorsLayer::new()
            .allow_origin(allow_origin)
            .allow_methods([Method::GET, Method::POST])
            .allow_headers([header::CONTENT_TYPE]),
    )
}

async fn health() -> &'static str {
    "ok"
}
