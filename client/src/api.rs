//! Typed access to the HTTP API. Workflows depend on the [`CrmApi`] trait
//! so tests can substitute a recording fake; [`HttpApi`] is the real
//! transport.

use async_trait::async_trait;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde::ser::Serialize;
use thiserror::Error;
use uuid::Uuid;

use crate::types::{
    Activity, AuthUser, ClientSummary, NewActivity, NewOpportunity, NewTransaction, Opportunity,
    OpportunityStage, Transaction,
};

#[derive(Debug, Error)]
pub enum ApiClientError {
    /// The server rejected the request; carries the `message` body.
    #[error("{0}")]
    Api(String),
    #[error("Falha na requisição à API.")]
    Transport(#[from] reqwest::Error),
}

/// The calls the application state and the workflows are built on.
#[async_trait]
pub trait CrmApi: Send + Sync {
    async fn list_clients(&self) -> Result<Vec<ClientSummary>, ApiClientError>;
    async fn list_opportunities(&self) -> Result<Vec<Opportunity>, ApiClientError>;
    async fn list_activities(&self) -> Result<Vec<Activity>, ApiClientError>;
    async fn create_opportunity(
        &self,
        input: &NewOpportunity,
    ) -> Result<Opportunity, ApiClientError>;
    async fn update_opportunity_stage(
        &self,
        id: Uuid,
        stage: OpportunityStage,
    ) -> Result<Opportunity, ApiClientError>;
    async fn create_activity(&self, input: &NewActivity) -> Result<Activity, ApiClientError>;
    async fn create_transaction(
        &self,
        input: &NewTransaction,
    ) -> Result<Transaction, ApiClientError>;
}

pub struct HttpApi {
    base_url: String,
    inner: reqwest::Client,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

#[derive(Deserialize)]
struct UserEnvelope {
    user: AuthUser,
}

impl HttpApi {
    /// `base_url` is the API root, e.g. `http://localhost:3000/api`. The
    /// underlying client keeps a cookie store so the session survives
    /// across calls.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiClientError> {
        let inner = reqwest::Client::builder().cookie_store(true).build()?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            inner,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiClientError> {
        let response = self.inner.get(self.url(path)).send().await?;
        Self::decode(response).await
    }

    async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiClientError> {
        let response = self.inner.post(self.url(path)).json(body).send().await?;
        Self::decode(response).await
    }

    async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiClientError> {
        let response = self.inner.put(self.url(path)).json(body).send().await?;
        Self::decode(response).await
    }

    async fn decode<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ApiClientError> {
        if response.status().is_success() {
            return Ok(response.json().await?);
        }
        let message = response
            .json::<ErrorBody>()
            .await
            .map(|body| body.message)
            .unwrap_or_else(|_| "Falha na requisição à API.".to_string());
        Err(ApiClientError::Api(message))
    }

    pub async fn register(
        &self,
        username: &str,
        password: &str,
        name: &str,
    ) -> Result<AuthUser, ApiClientError> {
        let body = serde_json::json!({
            "username": username,
            "password": password,
            "name": name,
        });
        let envelope: UserEnvelope = self.post("/auth/register", &body).await?;
        Ok(envelope.user)
    }

    pub async fn login(
        &self,
        username: &str,
        password: &str,
    ) -> Result<AuthUser, ApiClientError> {
        let body = serde_json::json!({ "username": username, "password": password });
        let envelope: UserEnvelope = self.post("/auth/login", &body).await?;
        Ok(envelope.user)
    }

    pub async fn logout(&self) -> Result<(), ApiClientError> {
        let _: serde_json::Value = self.post("/auth/logout", &serde_json::json!({})).await?;
        Ok(())
    }

    pub async fn me(&self) -> Result<AuthUser, ApiClientError> {
        let envelope: UserEnvelope = self.get("/auth/me").await?;
        Ok(envelope.user)
    }
}

#[async_trait]
impl CrmApi for HttpApi {
    async fn list_clients(&self) -> Result<Vec<ClientSummary>, ApiClientError> {
        self.get("/clients").await
    }

    async fn list_opportunities(&self) -> Result<Vec<Opportunity>, ApiClientError> {
        self.get("/opportunities").await
    }

    async fn list_activities(&self) -> Result<Vec<Activity>, ApiClientError> {
        self.get("/activities").await
    }

    async fn create_opportunity(
        &self,
        input: &NewOpportunity,
    ) -> Result<Opportunity, ApiClientError> {
        self.post("/opportunities", input).await
    }

    async fn update_opportunity_stage(
        &self,
        id: Uuid,
        stage: OpportunityStage,
    ) -> Result<Opportunity, ApiClientError> {
        let body = serde_json::json!({ "stage": stage });
        self.put(&format!("/opportunities/{id}"), &body).await
    }

    async fn create_activity(&self, input: &NewActivity) -> Result<Activity, ApiClientError> {
        self.post("/activities", input).await
    }

    async fn create_transaction(
        &self,
        input: &NewTransaction,
    ) -> Result<Transaction, ApiClientError> {
        self.post("/transactions", input).await
    }
}
