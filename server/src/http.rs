use std::{
    net::{IpAddr, SocketAddr},
    sync::Arc,
};

use anyhow::Context;
use axum::{
    Json, Router,
    extract::{FromRef, State},
    http::{self, HeaderName, HeaderValue, Method},
    response::IntoResponse,
    routing::get,
};
use axum_extra::extract::cookie::{Key, PrivateCookieJar};
use chrono::Utc;
use entity::{session, user};
use platform_db::DbPool;
use sea_orm::{ConnectionTrait, EntityTrait, Statement};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing::info;
use uuid::Uuid;

use crate::{config::AppConfig, error::ApiError, routes};

pub const SESSION_COOKIE: &str = "__Host-crm_session";

#[derive(Clone)]
pub struct AppState {
    pub db: DbPool,
    pub config: Arc<AppConfig>,
    pub cookie_key: Key,
}

impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.cookie_key.clone()
    }
}

/// The authenticated caller, as loaded from the session cookie. Mirrors the
/// sanitized user shape returned by the auth endpoints.
#[derive(Clone, Debug, Serialize)]
pub struct CurrentUser {
    pub id: Uuid,
    pub name: String,
    pub username: String,
}

#[derive(Clone, Debug)]
pub struct ServeConfig {
    addr: SocketAddr,
}

impl ServeConfig {
    pub fn new(host: IpAddr, port: u16) -> Self {
        Self {
            addr: SocketAddr::from((host, port)),
        }
    }
}

pub async fn serve(config: ServeConfig, state: AppState) -> anyhow::Result<()> {
    let router = build_router(state);
    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("failed to bind {}", config.addr))?;

    info!(%config.addr, "crm server listening");
    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;
    Ok(())
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed = origins
        .iter()
        .filter_map(|origin| origin.parse::<HeaderValue>().ok())
        .collect::<Vec<_>>();
    let allow_origin = if allowed.is_empty() {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(allowed)
    };
    CorsLayer::new()
        .allow_credentials(true)
        .allow_headers([http::header::CONTENT_TYPE])
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_origin(allow_origin)
}

pub fn build_router(state: AppState) -> Router {
    let request_id = MakeRequestUuid;
    let header_name = HeaderName::from_static("x-request-id");
    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .nest("/api/auth", routes::auth::router())
        .nest("/api/clients", routes::clients::router())
        .nest("/api/partners", routes::partners::router())
        .nest("/api/opportunities", routes::opportunities::router())
        .nest("/api/transactions", routes::transactions::router())
        .nest("/api/activities", routes::activities::router())
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(header_name.clone(), request_id))
                .layer(PropagateRequestIdLayer::new(header_name))
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer(&state.config.cors_allowed_origins)),
        )
        .with_state(state)
}

async fn root_handler() -> &'static str {
    "Backend do CRM Financeiro está em execução!"
}

async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    let backend = state.db.get_database_backend();
    let db_ok = state
        .db
        .execute(Statement::from_string(backend, "SELECT 1".to_string()))
        .await
        .is_ok();
    Json(HealthResponse {
        ok: db_ok,
        db_ok,
        version: env!("CARGO_PKG_VERSION"),
    })
}

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    db_ok: bool,
    version: &'static str,
}

/// Resolve the session cookie to the calling user, expiring stale sessions
/// on the way.
pub async fn load_session(
    state: &AppState,
    jar: &PrivateCookieJar,
) -> Result<CurrentUser, ApiError> {
    let cookie = jar
        .get(SESSION_COOKIE)
        .ok_or(ApiError::Unauthorized("Não autenticado."))?;
    let session_id = Uuid::parse_str(cookie.value())
        .map_err(|_| ApiError::Unauthorized("Não autenticado."))?;
    let session = session::Entity::find_by_id(session_id)
        .one(&state.db)
        .await
        .map_err(|err| ApiError::store("Ocorreu um erro no servidor.", err))?
        .ok_or(ApiError::Unauthorized("Não autenticado."))?;
    if session.expires_at.with_timezone(&Utc) < Utc::now() {
        let _ = session::Entity::delete_by_id(session_id)
            .exec(&state.db)
            .await;
        return Err(ApiError::Unauthorized("Não autenticado."));
    }
    let user = user::Entity::find_by_id(session.user_id)
        .one(&state.db)
        .await
        .map_err(|err| ApiError::store("Ocorreu um erro no servidor.", err))?
        .ok_or(ApiError::Unauthorized("Não autenticado."))?;
    Ok(CurrentUser {
        id: user.id,
        name: user.name,
        username: user.username,
    })
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install CTRL+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        signal(SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    ctrl_c.await;

    #[cfg(unix)]
    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    };
}
