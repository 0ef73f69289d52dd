use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
};
use chrono::{DateTime, Utc};
use entity::{client, opportunity};
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::{ActiveModelTrait, ActiveValue::Set, EntityTrait, QueryOrder};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::http::AppState;
use crate::routes::{money, to_decimal};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/{id}", put(update).delete(remove))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OpportunityResponse {
    pub id: Uuid,
    pub title: String,
    pub client_id: Uuid,
    pub client_name: String,
    pub source: Option<String>,
    pub estimated_value: f64,
    pub stage: opportunity::Stage,
    pub probability: i32,
    pub expected_close_date: Option<DateTime<Utc>>,
    pub responsible: Option<String>,
    pub next_action: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl OpportunityResponse {
    fn from_model(model: opportunity::Model, client: Option<client::Model>) -> Self {
        Self {
            id: model.id,
            title: model.title,
            client_id: model.client_id,
            client_name: client.map(|c| c.name).unwrap_or_default(),
            source: model.source,
            estimated_value: money(model.estimated_value),
            stage: model.stage,
            probability: model.probability,
            expected_close_date: model.expected_close_date.map(Into::into),
            responsible: model.responsible,
            next_action: model.next_action,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateOpportunityPayload {
    title: Option<String>,
    client_id: Option<Uuid>,
    stage: Option<opportunity::Stage>,
    source: Option<String>,
    estimated_value: Option<f64>,
    probability: Option<i32>,
    expected_close_date: Option<DateTime<Utc>>,
    responsible: Option<String>,
    next_action: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateOpportunityPayload {
    title: Option<String>,
    client_id: Option<Uuid>,
    stage: Option<opportunity::Stage>,
    source: Option<String>,
    estimated_value: Option<f64>,
    probability: Option<i32>,
    expected_close_date: Option<DateTime<Utc>>,
    responsible: Option<String>,
    next_action: Option<String>,
}

async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<OpportunityResponse>>> {
    let rows = opportunity::Entity::find()
        .find_also_related(client::Entity)
        .order_by_desc(opportunity::Column::CreatedAt)
        .all(&state.db)
        .await
        .map_err(|err| ApiError::store("Erro ao buscar oportunidades.", err))?;
    Ok(Json(
        rows.into_iter()
            .map(|(model, client)| OpportunityResponse::from_model(model, client))
            .collect(),
    ))
}

async fn create(
    State(state): State<AppState>,
    Json(payload): Json<CreateOpportunityPayload>,
) -> ApiResult<(StatusCode, Json<OpportunityResponse>)> {
    let (Some(title), Some(client_id), Some(stage)) =
        (payload.title, payload.client_id, payload.stage)
    else {
        return Err(ApiError::validation(
            "Título, cliente e estágio são obrigatórios.",
        ));
    };
    if title.is_empty() {
        return Err(ApiError::validation(
            "Título, cliente e estágio são obrigatórios.",
        ));
    }

    let now: DateTimeWithTimeZone = Utc::now().into();
    let created = opportunity::ActiveModel {
        id: Set(Uuid::new_v4()),
        title: Set(title),
        client_id: Set(client_id),
        source: Set(payload.source),
        estimated_value: Set(Some(to_decimal(payload.estimated_value.unwrap_or(0.0)))),
        stage: Set(stage),
        probability: Set(payload.probability.unwrap_or(0)),
        expected_close_date: Set(payload.expected_close_date.map(Into::into)),
        responsible: Set(payload.responsible),
        next_action: Set(payload.next_action),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(&state.db)
    .await
    .map_err(|err| ApiError::store("Erro ao criar oportunidade.", err))?;

    let client = load_client(&state, created.client_id).await?;
    Ok((
        StatusCode::CREATED,
        Json(OpportunityResponse::from_model(created, client)),
    ))
}

async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateOpportunityPayload>,
) -> ApiResult<Json<OpportunityResponse>> {
    let existing = opportunity::Entity::find_by_id(id)
        .one(&state.db)
        .await
        .map_err(|err| ApiError::store("Erro ao atualizar oportunidade.", err))?
        .ok_or(ApiError::NotFound("Oportunidade não encontrada."))?;

    let mut active: opportunity::ActiveModel = existing.into();
    if let Some(title) = payload.title {
        active.title = Set(title);
    }
    if let Some(client_id) = payload.client_id {
        active.client_id = Set(client_id);
    }
    if let Some(stage) = payload.stage {
        active.stage = Set(stage);
    }
    if let Some(source) = payload.source {
        active.source = Set(Some(source));
    }
    if let Some(value) = payload.estimated_value {
        active.estimated_value = Set(Some(to_decimal(value)));
    }
    if let Some(probability) = payload.probability {
        active.probability = Set(probability);
    }
    if let Some(close_date) = payload.expected_close_date {
        active.expected_close_date = Set(Some(close_date.into()));
    }
    if let Some(responsible) = payload.responsible {
        active.responsible = Set(Some(responsible));
    }
    if let Some(next_action) = payload.next_action {
        active.next_action = Set(Some(next_action));
    }
    active.updated_at = Set(Utc::now().into());

    let updated = active
        .update(&state.db)
        .await
        .map_err(|err| ApiError::store("Erro ao atualizar oportunidade.", err))?;
    let client = load_client(&state, updated.client_id).await?;
    Ok(Json(OpportunityResponse::from_model(updated, client)))
}

async fn remove(State(state): State<AppState>, Path(id): Path<Uuid>) -> ApiResult<StatusCode> {
    let res = opportunity::Entity::delete_by_id(id)
        .exec(&state.db)
        .await
        .map_err(|err| ApiError::store("Erro ao remover oportunidade.", err))?;
    if res.rows_affected == 0 {
        return Err(ApiError::NotFound("Oportunidade não encontrada."));
    }
    Ok(StatusCode::NO_CONTENT)
}

async fn load_client(state: &AppState, client_id: Uuid) -> ApiResult<Option<client::Model>> {
    client::Entity::find_by_id(client_id)
        .one(&state.db)
        .await
        .map_err(|err| ApiError::store("Erro ao buscar oportunidades.", err))
}
