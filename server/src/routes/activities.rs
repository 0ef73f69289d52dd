use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
};
use chrono::{DateTime, Utc};
use entity::activity;
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::{ActiveModelTrait, ActiveValue::Set, EntityTrait, QueryOrder};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::http::AppState;
use crate::routes::json_array;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/{id}", put(update).delete(remove))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityResponse {
    pub id: Uuid,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: activity::Kind,
    pub client_id: Option<Uuid>,
    pub opportunity_id: Option<Uuid>,
    pub assessor: Option<String>,
    pub guests: Value,
    pub location: Option<String>,
    pub due_date: DateTime<Utc>,
    pub priority: activity::Priority,
    pub status: activity::Status,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<activity::Model> for ActivityResponse {
    fn from(model: activity::Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            kind: model.kind,
            client_id: model.client_id,
            opportunity_id: model.opportunity_id,
            assessor: model.assessor,
            guests: model.guests,
            location: model.location,
            due_date: model.due_date.into(),
            priority: model.priority,
            status: model.status,
            notes: model.notes,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateActivityPayload {
    title: Option<String>,
    #[serde(rename = "type")]
    kind: Option<activity::Kind>,
    due_date: Option<DateTime<Utc>>,
    priority: Option<activity::Priority>,
    status: Option<activity::Status>,
    client_id: Option<Uuid>,
    opportunity_id: Option<Uuid>,
    assessor: Option<String>,
    guests: Option<Value>,
    location: Option<String>,
    notes: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateActivityPayload {
    title: Option<String>,
    #[serde(rename = "type")]
    kind: Option<activity::Kind>,
    due_date: Option<DateTime<Utc>>,
    priority: Option<activity::Priority>,
    status: Option<activity::Status>,
    client_id: Option<Uuid>,
    opportunity_id: Option<Uuid>,
    assessor: Option<String>,
    guests: Option<Value>,
    location: Option<String>,
    notes: Option<String>,
}

async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<ActivityResponse>>> {
    let rows = activity::Entity::find()
        .order_by_desc(activity::Column::DueDate)
        .all(&state.db)
        .await
        .map_err(|err| ApiError::store("Erro ao buscar atividades.", err))?;
    Ok(Json(rows.into_iter().map(ActivityResponse::from).collect()))
}

async fn create(
    State(state): State<AppState>,
    Json(payload): Json<CreateActivityPayload>,
) -> ApiResult<(StatusCode, Json<ActivityResponse>)> {
    let (Some(title), Some(due_date), Some(priority), Some(status), Some(kind)) = (
        payload.title,
        payload.due_date,
        payload.priority,
        payload.status,
        payload.kind,
    ) else {
        return Err(ApiError::validation("Campos obrigatórios ausentes."));
    };
    if title.is_empty() {
        return Err(ApiError::validation("Campos obrigatórios ausentes."));
    }

    let now: DateTimeWithTimeZone = Utc::now().into();
    let created = activity::ActiveModel {
        id: Set(Uuid::new_v4()),
        title: Set(title),
        kind: Set(kind),
        client_id: Set(payload.client_id),
        opportunity_id: Set(payload.opportunity_id),
        assessor: Set(payload.assessor),
        guests: Set(json_array(payload.guests)),
        location: Set(payload.location),
        due_date: Set(due_date.into()),
        priority: Set(priority),
        status: Set(status),
        notes: Set(payload.notes),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(&state.db)
    .await
    .map_err(|err| ApiError::store("Erro ao criar atividade.", err))?;

    Ok((StatusCode::CREATED, Json(ActivityResponse::from(created))))
}

async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateActivityPayload>,
) -> ApiResult<Json<ActivityResponse>> {
    let existing = activity::Entity::find_by_id(id)
        .one(&state.db)
        .await
        .map_err(|err| ApiError::store("Erro ao atualizar atividade.", err))?
        .ok_or(ApiError::NotFound("Atividade não encontrada."))?;

    let mut active: activity::ActiveModel = existing.into();
    if let Some(title) = payload.title {
        active.title = Set(title);
    }
    if let Some(kind) = payload.kind {
        active.kind = Set(kind);
    }
    if let Some(due_date) = payload.due_date {
        active.due_date = Set(due_date.into());
    }
    if let Some(priority) = payload.priority {
        active.priority = Set(priority);
    }
    if let Some(status) = payload.status {
        active.status = Set(status);
    }
    if let Some(client_id) = payload.client_id {
        active.client_id = Set(Some(client_id));
    }
    if let Some(opportunity_id) = payload.opportunity_id {
        active.opportunity_id = Set(Some(opportunity_id));
    }
    if let Some(assessor) = payload.assessor {
        active.assessor = Set(Some(assessor));
    }
    if let Some(guests) = payload.guests {
        active.guests = Set(guests);
    }
    if let Some(location) = payload.location {
        active.location = Set(Some(location));
    }
    if let Some(notes) = payload.notes {
        active.notes = Set(Some(notes));
    }
    active.updated_at = Set(Utc::now().into());

    let updated = active
        .update(&state.db)
        .await
        .map_err(|err| ApiError::store("Erro ao atualizar atividade.", err))?;
    Ok(Json(ActivityResponse::from(updated)))
}

async fn remove(State(state): State<AppState>, Path(id): Path<Uuid>) -> ApiResult<StatusCode> {
    let res = activity::Entity::delete_by_id(id)
        .exec(&state.db)
        .await
        .map_err(|err| ApiError::store("Erro ao remover atividade.", err))?;
    if res.rows_affected == 0 {
        return Err(ApiError::NotFound("Atividade não encontrada."));
    }
    Ok(StatusCode::NO_CONTENT)
}
