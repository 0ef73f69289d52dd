use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use axum_extra::extract::cookie::Key;
use http_body_util::BodyExt;
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectionTrait, Database, DatabaseBackend, Statement};
use serde_json::{Value, json};
use server::config::AppConfig;
use server::http::{AppState, build_router};
use tower::ServiceExt;
use url::Url;
use uuid::Uuid;

/// Spins up a disposable database per test run. Returns `None` (skipping
/// the test) when `TEST_DATABASE_URL` is not set.
struct TestContext {
    router: Router,
    admin_url: String,
    db_name: String,
}

impl TestContext {
    async fn new() -> Option<Self> {
        let base = match std::env::var("TEST_DATABASE_URL") {
            Ok(url) => url,
            Err(_) => {
                eprintln!("skipping HTTP API tests: TEST_DATABASE_URL not set");
                return None;
            }
        };
        let (admin_url, db_name, test_url) = build_urls(&base)?;
        let admin = Database::connect(&admin_url).await.ok()?;
        let drop_sql = format!("DROP DATABASE IF EXISTS \"{}\" WITH (FORCE);", db_name);
        let create_sql = format!("CREATE DATABASE \"{}\";", db_name);
        let _ = admin
            .execute(Statement::from_string(DatabaseBackend::Postgres, drop_sql))
            .await;
        admin
            .execute(Statement::from_string(
                DatabaseBackend::Postgres,
                create_sql,
            ))
            .await
            .ok()?;
        let db = Database::connect(&test_url).await.ok()?;
        Migrator::up(&db, None).await.ok()?;

        let config = AppConfig {
            cookie_key: Key::generate(),
            cors_allowed_origins: vec!["http://localhost:5173".to_string()],
            session_ttl_hours: 24,
        };
        let cookie_key = config.cookie_key.clone();
        let state = AppState {
            db,
            config: Arc::new(config),
            cookie_key,
        };
        Some(Self {
            router: build_router(state),
            admin_url,
            db_name,
        })
    }

    async fn cleanup(self) {
        let Self {
            router,
            admin_url,
            db_name,
        } = self;
        drop(router);
        if let Ok(admin) = Database::connect(&admin_url).await {
            let drop_sql = format!("DROP DATABASE IF EXISTS \"{}\" WITH (FORCE);", db_name);
            let _ = admin
                .execute(Statement::from_string(DatabaseBackend::Postgres, drop_sql))
                .await;
        }
    }

    async fn request(
        &self,
        method: &str,
        uri: &str,
        body: Option<Value>,
        cookie: Option<&str>,
    ) -> (StatusCode, Value, Option<String>) {
        let mut builder = Request::builder().method(method).uri(uri);
        if body.is_some() {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
        }
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        let request = builder
            .body(match body {
                Some(value) => Body::from(value.to_string()),
                None => Body::empty(),
            })
            .unwrap();
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let set_cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|value| value.to_str().ok())
            .map(|raw| raw.split(';').next().unwrap_or_default().to_string());
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, json, set_cookie)
    }
}

fn build_urls(base: &str) -> Option<(String, String, String)> {
    let url = Url::parse(base).ok()?;
    let db_path = url.path().trim_start_matches('/').to_string();
    let base_name = if db_path.is_empty() {
        "crm_test".to_string()
    } else {
        db_path
    };
    let db_name = format!("{}_{}", base_name, Uuid::new_v4().simple());
    let mut admin_url = url.clone();
    admin_url.set_path("/postgres");
    let mut test_url = url.clone();
    test_url.set_path(&format!("/{}", db_name));
    Some((admin_url.to_string(), db_name, test_url.to_string()))
}

async fn create_client(ctx: &TestContext, name: &str) -> Value {
    let (status, body, _) = ctx
        .request(
            "POST",
            "/api/clients",
            Some(json!({
                "name": name,
                "email": format!("{}@cliente.test", name.to_lowercase().replace(' ', ".")),
                "type": "PF",
            })),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "create client: {body}");
    body
}

#[tokio::test]
async fn auth_roundtrip() {
    let Some(ctx) = TestContext::new().await else {
        return;
    };

    let (status, body, _) = ctx.request("GET", "/api/auth/me", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Não autenticado.");

    let (status, body, _) = ctx
        .request(
            "POST",
            "/api/auth/register",
            Some(json!({ "username": "ana", "password": "segredo12", "name": "Ana Lima" })),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "register: {body}");
    assert_eq!(body["user"]["username"], "ana");
    assert!(body["user"].get("password").is_none());
    assert!(body["user"].get("passwordHash").is_none());

    // Duplicate username is rejected up front.
    let (status, body, _) = ctx
        .request(
            "POST",
            "/api/auth/register",
            Some(json!({ "username": "ana", "password": "outra", "name": "Outra Ana" })),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Este nome de usuário já está em uso.");

    let (status, body, _) = ctx
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "username": "ana", "password": "errada" })),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Credenciais inválidas.");

    let (status, body, cookie) = ctx
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "username": "ana", "password": "segredo12" })),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK, "login: {body}");
    let cookie = cookie.expect("login sets the session cookie");

    let (status, body, _) = ctx
        .request("GET", "/api/auth/me", None, Some(&cookie))
        .await;
    assert_eq!(status, StatusCode::OK, "me: {body}");
    assert_eq!(body["user"]["name"], "Ana Lima");

    let (status, _, _) = ctx
        .request("POST", "/api/auth/logout", Some(json!({})), Some(&cookie))
        .await;
    assert_eq!(status, StatusCode::OK);

    // The session row is gone; the old cookie no longer authenticates.
    let (status, _, _) = ctx
        .request("GET", "/api/auth/me", None, Some(&cookie))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    ctx.cleanup().await;
}

#[tokio::test]
async fn client_creation_validates_required_fields() {
    let Some(ctx) = TestContext::new().await else {
        return;
    };

    let (status, body, _) = ctx
        .request(
            "POST",
            "/api/clients",
            Some(json!({ "name": "", "email": "a@b.com", "type": "PF" })),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Nome, e-mail e tipo são obrigatórios.");

    // Nothing was created and no side effects happened.
    let (status, body, _) = ctx.request("GET", "/api/clients", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 0);

    ctx.cleanup().await;
}

#[tokio::test]
async fn client_defaults_and_crud() {
    let Some(ctx) = TestContext::new().await else {
        return;
    };

    let created = create_client(&ctx, "Maria Souza").await;
    assert_eq!(created["walletValue"], json!(0.0));
    assert_eq!(created["complianceStatus"], "Pendente");
    assert_eq!(created["financialProfile"]["investorProfile"], "Moderado");
    assert_eq!(created["servicePreferences"], json!([]));
    let id = created["id"].as_str().unwrap().to_string();

    let (status, body, _) = ctx
        .request(
            "PUT",
            &format!("/api/clients/{id}"),
            Some(json!({ "complianceStatus": "Aprovado", "walletValue": 1250.75 })),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK, "update: {body}");
    assert_eq!(body["complianceStatus"], "Aprovado");
    assert_eq!(body["walletValue"], json!(1250.75));
    // Untouched fields survive the partial update.
    assert_eq!(body["name"], "Maria Souza");

    let (status, body, _) = ctx
        .request("GET", &format!("/api/clients/{id}"), None, None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["complianceStatus"], "Aprovado");

    let (status, _, _) = ctx
        .request("DELETE", &format!("/api/clients/{id}"), None, None)
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body, _) = ctx
        .request("GET", &format!("/api/clients/{id}"), None, None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Cliente não encontrado.");

    ctx.cleanup().await;
}

#[tokio::test]
async fn opportunity_stage_move_persists() {
    let Some(ctx) = TestContext::new().await else {
        return;
    };

    let client = create_client(&ctx, "João Pereira").await;
    let client_id = client["id"].as_str().unwrap();

    let (status, created, _) = ctx
        .request(
            "POST",
            "/api/opportunities",
            Some(json!({
                "title": "Fundo Multimercado",
                "clientId": client_id,
                "stage": "Negociação",
                "responsible": "Ana",
            })),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "create: {created}");
    assert_eq!(created["stage"], "Negociação");
    assert_eq!(created["clientName"], "João Pereira");
    // No estimate supplied: the amount normalizes to 0.
    assert_eq!(created["estimatedValue"], json!(0.0));
    let id = created["id"].as_str().unwrap().to_string();

    let (status, updated, _) = ctx
        .request(
            "PUT",
            &format!("/api/opportunities/{id}"),
            Some(json!({ "stage": "Ganho" })),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK, "move: {updated}");
    assert_eq!(updated["stage"], "Ganho");
    // The partial update left everything else alone.
    assert_eq!(updated["title"], "Fundo Multimercado");
    assert_eq!(updated["responsible"], "Ana");

    let (status, body, _) = ctx
        .request(
            "PUT",
            &format!("/api/opportunities/{}", Uuid::new_v4()),
            Some(json!({ "stage": "Ganho" })),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Oportunidade não encontrada.");

    ctx.cleanup().await;
}

#[tokio::test]
async fn collections_list_newest_first() {
    let Some(ctx) = TestContext::new().await else {
        return;
    };

    for name in ["Alfa Capital", "Beta Invest"] {
        let (status, body, _) = ctx
            .request("POST", "/api/partners", Some(json!({ "name": name })), None)
            .await;
        assert_eq!(status, StatusCode::CREATED, "partner: {body}");
        tokio::time::sleep(Duration::from_millis(20)).await;
    }

    let (status, body, _) = ctx.request("GET", "/api/partners", None, None).await;
    assert_eq!(status, StatusCode::OK);
    let partners = body.as_array().unwrap();
    assert_eq!(partners.len(), 2);
    assert_eq!(partners[0]["name"], "Beta Invest");
    assert_eq!(partners[1]["name"], "Alfa Capital");
    assert_eq!(partners[0]["totalVolume"], json!(0.0));

    ctx.cleanup().await;
}

#[tokio::test]
async fn activities_list_by_due_date() {
    let Some(ctx) = TestContext::new().await else {
        return;
    };

    let soon = "2026-03-01T12:00:00Z";
    let later = "2026-04-01T12:00:00Z";
    for (title, due) in [("Ligação trimestral", soon), ("Revisão de carteira", later)] {
        let (status, body, _) = ctx
            .request(
                "POST",
                "/api/activities",
                Some(json!({
                    "title": title,
                    "type": "Ligação",
                    "dueDate": due,
                    "priority": "Média",
                    "status": "A Fazer",
                })),
                None,
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "activity: {body}");
    }

    // Missing required fields never reach the store.
    let (status, body, _) = ctx
        .request(
            "POST",
            "/api/activities",
            Some(json!({ "title": "Sem prazo", "type": "Ligação" })),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Campos obrigatórios ausentes.");

    let (status, body, _) = ctx.request("GET", "/api/activities", None, None).await;
    assert_eq!(status, StatusCode::OK);
    let activities = body.as_array().unwrap();
    assert_eq!(activities.len(), 2);
    assert_eq!(activities[0]["title"], "Revisão de carteira");
    assert_eq!(activities[1]["title"], "Ligação trimestral");

    ctx.cleanup().await;
}

#[tokio::test]
async fn transaction_money_normalization() {
    let Some(ctx) = TestContext::new().await else {
        return;
    };

    let client = create_client(&ctx, "Carla Dias").await;
    let client_id = client["id"].as_str().unwrap();

    let (status, created, _) = ctx
        .request(
            "POST",
            "/api/transactions",
            Some(json!({
                "clientId": client_id,
                "type": "Compra",
                "status": "Reservado",
                "product": { "description": "CDB Banco Alfa" },
            })),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "create: {created}");
    // value defaults to 0; unitValue stays null.
    assert_eq!(created["value"], json!(0.0));
    assert_eq!(created["unitValue"], Value::Null);
    assert_eq!(created["clientName"], "Carla Dias");

    let (status, body, _) = ctx
        .request(
            "POST",
            "/api/transactions",
            Some(json!({ "clientId": client_id, "type": "Compra" })),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Cliente, tipo e status são obrigatórios.");

    ctx.cleanup().await;
}
