use argon2::Argon2;
use argon2::password_hash::{
    PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng,
};
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use axum_extra::extract::cookie::{Cookie, PrivateCookieJar, SameSite};
use chrono::{Duration, Utc};
use entity::{session, user};
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::{ActiveModelTrait, ActiveValue::Set, ColumnTrait, EntityTrait, QueryFilter};
use serde::{Deserialize, Serialize};
use serde_json::json;
use time::Duration as TimeDuration;
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::http::{AppState, SESSION_COOKIE, load_session};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/me", get(me))
}

/// Public view of a user row; the password hash never leaves the server.
#[derive(Serialize)]
struct SanitizedUser {
    id: Uuid,
    name: String,
    username: String,
}

impl From<user::Model> for SanitizedUser {
    fn from(model: user::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            username: model.username,
        }
    }
}

#[derive(Deserialize)]
struct RegisterPayload {
    username: Option<String>,
    password: Option<String>,
    name: Option<String>,
}

async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterPayload>,
) -> ApiResult<(StatusCode, Json<serde_json::Value>)> {
    let (Some(username), Some(password), Some(name)) =
        (payload.username, payload.password, payload.name)
    else {
        return Err(ApiError::validation("Todos os campos são obrigatórios."));
    };
    if username.is_empty() || password.is_empty() || name.is_empty() {
        return Err(ApiError::validation("Todos os campos são obrigatórios."));
    }

    let existing = user::Entity::find()
        .filter(user::Column::Username.eq(username.clone()))
        .one(&state.db)
        .await
        .map_err(|err| ApiError::store("Ocorreu um erro no servidor.", err))?;
    if existing.is_some() {
        return Err(ApiError::validation(
            "Este nome de usuário já está em uso.",
        ));
    }

    let salt = SaltString::generate(&mut OsRng);
    let password_hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|err| {
            ApiError::store(
                "Ocorreu um erro no servidor.",
                anyhow::anyhow!("password hash: {err}"),
            )
        })?
        .to_string();

    let now: DateTimeWithTimeZone = Utc::now().into();
    let created = user::ActiveModel {
        id: Set(Uuid::new_v4()),
        username: Set(username),
        password_hash: Set(password_hash),
        name: Set(name),
        created_at: Set(now),
    }
    .insert(&state.db)
    .await
    .map_err(|err| ApiError::store("Ocorreu um erro no servidor.", err))?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Usuário registrado com sucesso!",
            "user": SanitizedUser::from(created),
        })),
    ))
}

#[derive(Deserialize)]
struct LoginPayload {
    username: Option<String>,
    password: Option<String>,
}

async fn login(
    State(state): State<AppState>,
    jar: PrivateCookieJar,
    Json(payload): Json<LoginPayload>,
) -> ApiResult<(PrivateCookieJar, Json<serde_json::Value>)> {
    let (Some(username), Some(password)) = (payload.username, payload.password) else {
        return Err(ApiError::Unauthorized("Credenciais inválidas."));
    };

    let user = user::Entity::find()
        .filter(user::Column::Username.eq(username))
        .one(&state.db)
        .await
        .map_err(|err| ApiError::store("Ocorreu um erro no servidor.", err))?
        .ok_or(ApiError::Unauthorized("Credenciais inválidas."))?;

    let parsed_hash = PasswordHash::new(&user.password_hash).map_err(|err| {
        ApiError::store(
            "Ocorreu um erro no servidor.",
            anyhow::anyhow!("stored hash unparseable: {err}"),
        )
    })?;
    if Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_err()
    {
        return Err(ApiError::Unauthorized("Credenciais inválidas."));
    }

    let ttl_hours = state.config.session_ttl_hours;
    let now = Utc::now();
    let session_id = Uuid::new_v4();
    session::ActiveModel {
        id: Set(session_id),
        user_id: Set(user.id),
        created_at: Set(now.into()),
        expires_at: Set((now + Duration::hours(ttl_hours)).into()),
    }
    .insert(&state.db)
    .await
    .map_err(|err| ApiError::store("Ocorreu um erro no servidor.", err))?;

    let cookie = Cookie::build((SESSION_COOKIE, session_id.to_string()))
        .path("/")
        .http_only(true)
        .secure(true)
        .same_site(SameSite::Lax)
        .max_age(TimeDuration::hours(ttl_hours))
        .build();
    let jar = jar.add(cookie);

    Ok((
        jar,
        Json(json!({
            "message": "Login realizado com sucesso!",
            "user": SanitizedUser::from(user),
        })),
    ))
}

async fn logout(
    State(state): State<AppState>,
    jar: PrivateCookieJar,
) -> (PrivateCookieJar, Json<serde_json::Value>) {
    // Session-row removal is best-effort; the cookie is cleared either way.
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        if let Ok(session_id) = Uuid::parse_str(cookie.value()) {
            let _ = session::Entity::delete_by_id(session_id)
                .exec(&state.db)
                .await;
        }
    }
    let jar = jar.remove(Cookie::build((SESSION_COOKIE, "")).path("/").build());
    (
        jar,
        Json(json!({ "message": "Logout realizado com sucesso!" })),
    )
}

async fn me(
    State(state): State<AppState>,
    jar: PrivateCookieJar,
) -> ApiResult<Json<serde_json::Value>> {
    let current = load_session(&state, &jar).await?;
    Ok(Json(json!({ "user": current })))
}
