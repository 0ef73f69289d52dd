use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
};
use chrono::{DateTime, Utc};
use entity::partner;
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::{ActiveModelTrait, ActiveValue::Set, EntityTrait, QueryOrder};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::http::AppState;
use crate::routes::{json_array, money, to_decimal};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/{id}", put(update).delete(remove))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PartnerResponse {
    pub id: Uuid,
    pub name: String,
    pub phone: Option<String>,
    pub address: Option<Value>,
    pub responsible_persons: Value,
    pub contract: Option<Value>,
    pub indicated_clients_count: i32,
    pub total_volume: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<partner::Model> for PartnerResponse {
    fn from(model: partner::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            phone: model.phone,
            address: model.address,
            responsible_persons: model.responsible_persons,
            contract: model.contract,
            indicated_clients_count: model.indicated_clients_count,
            total_volume: money(model.total_volume),
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreatePartnerPayload {
    name: Option<String>,
    phone: Option<String>,
    address: Option<Value>,
    responsible_persons: Option<Value>,
    contract: Option<Value>,
    indicated_clients_count: Option<i32>,
    total_volume: Option<f64>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdatePartnerPayload {
    name: Option<String>,
    phone: Option<String>,
    address: Option<Value>,
    responsible_persons: Option<Value>,
    contract: Option<Value>,
    indicated_clients_count: Option<i32>,
    total_volume: Option<f64>,
}

async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<PartnerResponse>>> {
    let rows = partner::Entity::find()
        .order_by_desc(partner::Column::CreatedAt)
        .all(&state.db)
        .await
        .map_err(|err| ApiError::store("Erro ao buscar parceiros.", err))?;
    Ok(Json(rows.into_iter().map(PartnerResponse::from).collect()))
}

async fn create(
    State(state): State<AppState>,
    Json(payload): Json<CreatePartnerPayload>,
) -> ApiResult<(StatusCode, Json<PartnerResponse>)> {
    let Some(name) = payload.name.filter(|name| !name.is_empty()) else {
        return Err(ApiError::validation("Nome é obrigatório."));
    };

    let now: DateTimeWithTimeZone = Utc::now().into();
    let created = partner::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name),
        phone: Set(payload.phone),
        address: Set(payload.address),
        responsible_persons: Set(json_array(payload.responsible_persons)),
        contract: Set(payload.contract),
        indicated_clients_count: Set(payload.indicated_clients_count.unwrap_or(0)),
        total_volume: Set(Some(to_decimal(payload.total_volume.unwrap_or(0.0)))),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(&state.db)
    .await
    .map_err(|err| ApiError::store("Erro ao criar parceiro.", err))?;

    Ok((StatusCode::CREATED, Json(PartnerResponse::from(created))))
}

async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdatePartnerPayload>,
) -> ApiResult<Json<PartnerResponse>> {
    let existing = partner::Entity::find_by_id(id)
        .one(&state.db)
        .await
        .map_err(|err| ApiError::store("Erro ao atualizar parceiro.", err))?
        .ok_or(ApiError::NotFound("Parceiro não encontrado."))?;

    let mut active: partner::ActiveModel = existing.into();
    if let Some(name) = payload.name {
        active.name = Set(name);
    }
    if let Some(phone) = payload.phone {
        active.phone = Set(Some(phone));
    }
    if let Some(address) = payload.address {
        active.address = Set(Some(address));
    }
    if let Some(persons) = payload.responsible_persons {
        active.responsible_persons = Set(persons);
    }
    if let Some(contract) = payload.contract {
        active.contract = Set(Some(contract));
    }
    if let Some(count) = payload.indicated_clients_count {
        active.indicated_clients_count = Set(count);
    }
    if let Some(volume) = payload.total_volume {
        active.total_volume = Set(Some(to_decimal(volume)));
    }
    active.updated_at = Set(Utc::now().into());

    let updated = active
        .update(&state.db)
        .await
        .map_err(|err| ApiError::store("Erro ao atualizar parceiro.", err))?;
    Ok(Json(PartnerResponse::from(updated)))
}

async fn remove(State(state): State<AppState>, Path(id): Path<Uuid>) -> ApiResult<StatusCode> {
    let res = partner::Entity::delete_by_id(id)
        .exec(&state.db)
        .await
        .map_err(|err| ApiError::store("Erro ao remover parceiro.", err))?;
    if res.rows_affected == 0 {
        return Err(ApiError::NotFound("Parceiro não encontrado."));
    }
    Ok(StatusCode::NO_CONTENT)
}
