use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
};
use chrono::{DateTime, Utc};
use entity::{client, transaction};
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::{ActiveModelTrait, ActiveValue::Set, EntityTrait, QueryOrder};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::http::AppState;
use crate::routes::{money, optional_money, to_decimal};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/{id}", put(update).delete(remove))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionResponse {
    pub id: Uuid,
    pub client_id: Uuid,
    pub client_name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub product: Option<Value>,
    pub value: f64,
    pub unit_value: Option<f64>,
    pub quantity: Option<i64>,
    pub reservation_date: Option<DateTime<Utc>>,
    pub liquidation_date: Option<DateTime<Utc>>,
    pub timestamp: DateTime<Utc>,
    pub status: String,
    pub institution: Option<String>,
    pub doc_ref: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TransactionResponse {
    fn from_model(model: transaction::Model, client: Option<client::Model>) -> Self {
        Self {
            id: model.id,
            client_id: model.client_id,
            client_name: client.map(|c| c.name).unwrap_or_default(),
            kind: model.kind,
            product: model.product,
            value: money(model.value),
            unit_value: optional_money(model.unit_value),
            quantity: model.quantity,
            reservation_date: model.reservation_date.map(Into::into),
            liquidation_date: model.liquidation_date.map(Into::into),
            timestamp: model.timestamp.into(),
            status: model.status,
            institution: model.institution,
            doc_ref: model.doc_ref,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateTransactionPayload {
    client_id: Option<Uuid>,
    #[serde(rename = "type")]
    kind: Option<String>,
    status: Option<String>,
    product: Option<Value>,
    value: Option<f64>,
    unit_value: Option<f64>,
    quantity: Option<i64>,
    reservation_date: Option<DateTime<Utc>>,
    liquidation_date: Option<DateTime<Utc>>,
    timestamp: Option<DateTime<Utc>>,
    institution: Option<String>,
    doc_ref: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateTransactionPayload {
    client_id: Option<Uuid>,
    #[serde(rename = "type")]
    kind: Option<String>,
    status: Option<String>,
    product: Option<Value>,
    value: Option<f64>,
    unit_value: Option<f64>,
    quantity: Option<i64>,
    reservation_date: Option<DateTime<Utc>>,
    liquidation_date: Option<DateTime<Utc>>,
    timestamp: Option<DateTime<Utc>>,
    institution: Option<String>,
    doc_ref: Option<String>,
}

async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<TransactionResponse>>> {
    let rows = transaction::Entity::find()
        .find_also_related(client::Entity)
        .order_by_desc(transaction::Column::Timestamp)
        .all(&state.db)
        .await
        .map_err(|err| ApiError::store("Erro ao buscar transações.", err))?;
    Ok(Json(
        rows.into_iter()
            .map(|(model, client)| TransactionResponse::from_model(model, client))
            .collect(),
    ))
}

async fn create(
    State(state): State<AppState>,
    Json(payload): Json<CreateTransactionPayload>,
) -> ApiResult<(StatusCode, Json<TransactionResponse>)> {
    let (Some(client_id), Some(kind), Some(status)) =
        (payload.client_id, payload.kind, payload.status)
    else {
        return Err(ApiError::validation(
            "Cliente, tipo e status são obrigatórios.",
        ));
    };
    if kind.is_empty() || status.is_empty() {
        return Err(ApiError::validation(
            "Cliente, tipo e status são obrigatórios.",
        ));
    }

    let now: DateTimeWithTimeZone = Utc::now().into();
    let created = transaction::ActiveModel {
        id: Set(Uuid::new_v4()),
        client_id: Set(client_id),
        kind: Set(kind),
        product: Set(payload.product),
        value: Set(Some(to_decimal(payload.value.unwrap_or(0.0)))),
        unit_value: Set(payload.unit_value.map(to_decimal)),
        quantity: Set(payload.quantity),
        reservation_date: Set(payload.reservation_date.map(Into::into)),
        liquidation_date: Set(payload.liquidation_date.map(Into::into)),
        timestamp: Set(payload.timestamp.map(Into::into).unwrap_or(now)),
        status: Set(status),
        institution: Set(payload.institution),
        doc_ref: Set(payload.doc_ref),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(&state.db)
    .await
    .map_err(|err| ApiError::store("Erro ao criar transação.", err))?;

    let client = load_client(&state, created.client_id).await?;
    Ok((
        StatusCode::CREATED,
        Json(TransactionResponse::from_model(created, client)),
    ))
}

async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateTransactionPayload>,
) -> ApiResult<Json<TransactionResponse>> {
    let existing = transaction::Entity::find_by_id(id)
        .one(&state.db)
        .await
        .map_err(|err| ApiError::store("Erro ao atualizar transação.", err))?
        .ok_or(ApiError::NotFound("Transação não encontrada."))?;

    let mut active: transaction::ActiveModel = existing.into();
    if let Some(client_id) = payload.client_id {
        active.client_id = Set(client_id);
    }
    if let Some(kind) = payload.kind {
        active.kind = Set(kind);
    }
    if let Some(status) = payload.status {
        active.status = Set(status);
    }
    if let Some(product) = payload.product {
        active.product = Set(Some(product));
    }
    if let Some(value) = payload.value {
        active.value = Set(Some(to_decimal(value)));
    }
    if let Some(unit_value) = payload.unit_value {
        active.unit_value = Set(Some(to_decimal(unit_value)));
    }
    if let Some(quantity) = payload.quantity {
        active.quantity = Set(Some(quantity));
    }
    if let Some(reservation) = payload.reservation_date {
        active.reservation_date = Set(Some(reservation.into()));
    }
    if let Some(liquidation) = payload.liquidation_date {
        active.liquidation_date = Set(Some(liquidation.into()));
    }
    if let Some(timestamp) = payload.timestamp {
        active.timestamp = Set(timestamp.into());
    }
    if let Some(institution) = payload.institution {
        active.institution = Set(Some(institution));
    }
    if let Some(doc_ref) = payload.doc_ref {
        active.doc_ref = Set(Some(doc_ref));
    }
    active.updated_at = Set(Utc::now().into());

    let updated = active
        .update(&state.db)
        .await
        .map_err(|err| ApiError::store("Erro ao atualizar transação.", err))?;
    let client = load_client(&state, updated.client_id).await?;
    Ok(Json(TransactionResponse::from_model(updated, client)))
}

async fn remove(State(state): State<AppState>, Path(id): Path<Uuid>) -> ApiResult<StatusCode> {
    let res = transaction::Entity::delete_by_id(id)
        .exec(&state.db)
        .await
        .map_err(|err| ApiError::store("Erro ao remover transação.", err))?;
    if res.rows_affected == 0 {
        return Err(ApiError::NotFound("Transação não encontrada."));
    }
    Ok(StatusCode::NO_CONTENT)
}

async fn load_client(state: &AppState, client_id: Uuid) -> ApiResult<Option<client::Model>> {
    client::Entity::find_by_id(client_id)
        .one(&state.db)
        .await
        .map_err(|err| ApiError::store("Erro ao buscar transações.", err))
}
