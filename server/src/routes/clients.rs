use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};
use chrono::{DateTime, Utc};
use entity::{client, partner};
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::{ActiveModelTrait, ActiveValue::Set, EntityTrait, QueryOrder};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::http::AppState;
use crate::routes::{json_array, money, to_decimal};

use super::partners::PartnerResponse;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/{id}", get(get_by_id).put(update).delete(remove))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(rename = "type")]
    pub kind: client::Kind,
    pub phone: Option<String>,
    pub cpf: Option<String>,
    pub cnpj: Option<String>,
    pub sector: Option<String>,
    pub service_preferences: Value,
    pub advisors: Value,
    pub compliance_status: String,
    pub wallet_value: f64,
    pub financial_profile: Value,
    pub address: Option<Value>,
    pub contact_persons: Value,
    pub partners: Value,
    pub citizenship: Option<String>,
    pub interaction_history: Value,
    pub reminders: Value,
    pub partner_id: Option<Uuid>,
    pub partner: Option<PartnerResponse>,
    pub last_activity: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn default_financial_profile() -> Value {
    json!({
        "investorProfile": "Moderado",
        "assetPreferences": [],
        "financialNeeds": [],
        "meetingAgendaSuggestions": [],
    })
}

impl ClientResponse {
    fn from_model(model: client::Model, partner: Option<partner::Model>) -> Self {
        Self {
            id: model.id,
            name: model.name,
            email: model.email,
            kind: model.kind,
            phone: model.phone,
            cpf: model.cpf,
            cnpj: model.cnpj,
            sector: model.sector,
            service_preferences: model.service_preferences,
            advisors: model.advisors,
            compliance_status: model.compliance_status,
            wallet_value: money(model.wallet_value),
            financial_profile: model
                .financial_profile
                .unwrap_or_else(default_financial_profile),
            address: model.address,
            contact_persons: model.contact_persons,
            partners: model.partner_data,
            citizenship: model.citizenship,
            interaction_history: model.interaction_history,
            reminders: model.reminders,
            partner_id: model.partner_id,
            partner: partner.map(PartnerResponse::from),
            last_activity: model.last_activity.map(Into::into),
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateClientPayload {
    name: Option<String>,
    email: Option<String>,
    #[serde(rename = "type")]
    kind: Option<client::Kind>,
    phone: Option<String>,
    cpf: Option<String>,
    cnpj: Option<String>,
    sector: Option<String>,
    service_preferences: Option<Value>,
    advisors: Option<Value>,
    compliance_status: Option<String>,
    wallet_value: Option<f64>,
    financial_profile: Option<Value>,
    address: Option<Value>,
    contact_persons: Option<Value>,
    partners: Option<Value>,
    partner_data: Option<Value>,
    citizenship: Option<String>,
    interaction_history: Option<Value>,
    reminders: Option<Value>,
    partner_id: Option<Uuid>,
    last_activity: Option<DateTime<Utc>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateClientPayload {
    name: Option<String>,
    email: Option<String>,
    #[serde(rename = "type")]
    kind: Option<client::Kind>,
    phone: Option<String>,
    cpf: Option<String>,
    cnpj: Option<String>,
    sector: Option<String>,
    service_preferences: Option<Value>,
    advisors: Option<Value>,
    compliance_status: Option<String>,
    wallet_value: Option<f64>,
    financial_profile: Option<Value>,
    address: Option<Value>,
    contact_persons: Option<Value>,
    partner_data: Option<Value>,
    citizenship: Option<String>,
    interaction_history: Option<Value>,
    reminders: Option<Value>,
    partner_id: Option<Uuid>,
    last_activity: Option<DateTime<Utc>>,
}

async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<ClientResponse>>> {
    let rows = client::Entity::find()
        .find_also_related(partner::Entity)
        .order_by_desc(client::Column::CreatedAt)
        .all(&state.db)
        .await
        .map_err(|err| ApiError::store("Erro interno ao buscar clientes.", err))?;
    Ok(Json(
        rows.into_iter()
            .map(|(model, partner)| ClientResponse::from_model(model, partner))
            .collect(),
    ))
}

async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ClientResponse>> {
    let row = client::Entity::find_by_id(id)
        .find_also_related(partner::Entity)
        .one(&state.db)
        .await
        .map_err(|err| ApiError::store("Erro interno ao buscar cliente.", err))?
        .ok_or(ApiError::NotFound("Cliente não encontrado."))?;
    Ok(Json(ClientResponse::from_model(row.0, row.1)))
}

async fn create(
    State(state): State<AppState>,
    Json(payload): Json<CreateClientPayload>,
) -> ApiResult<(StatusCode, Json<ClientResponse>)> {
    let (Some(name), Some(email), Some(kind)) = (payload.name, payload.email, payload.kind) else {
        return Err(ApiError::validation("Nome, e-mail e tipo são obrigatórios."));
    };
    if name.is_empty() || email.is_empty() {
        return Err(ApiError::validation("Nome, e-mail e tipo são obrigatórios."));
    }

    let now: DateTimeWithTimeZone = Utc::now().into();
    let partner_data = payload.partner_data.or(payload.partners);
    let created = client::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name),
        email: Set(email),
        kind: Set(kind),
        phone: Set(payload.phone),
        cpf: Set(payload.cpf),
        cnpj: Set(payload.cnpj),
        sector: Set(payload.sector),
        service_preferences: Set(json_array(payload.service_preferences)),
        advisors: Set(json_array(payload.advisors)),
        compliance_status: Set(payload
            .compliance_status
            .unwrap_or_else(|| "Pendente".to_string())),
        wallet_value: Set(Some(to_decimal(payload.wallet_value.unwrap_or(0.0)))),
        financial_profile: Set(payload.financial_profile),
        address: Set(payload.address),
        contact_persons: Set(json_array(payload.contact_persons)),
        partner_data: Set(json_array(partner_data)),
        citizenship: Set(payload.citizenship),
        interaction_history: Set(json_array(payload.interaction_history)),
        reminders: Set(json_array(payload.reminders)),
        partner_id: Set(payload.partner_id),
        last_activity: Set(Some(
            payload.last_activity.map(Into::into).unwrap_or(now),
        )),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(&state.db)
    .await
    .map_err(|err| ApiError::store("Erro ao criar cliente.", err))?;

    let partner = load_partner(&state, created.partner_id).await?;
    Ok((
        StatusCode::CREATED,
        Json(ClientResponse::from_model(created, partner)),
    ))
}

async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateClientPayload>,
) -> ApiResult<Json<ClientResponse>> {
    let existing = client::Entity::find_by_id(id)
        .one(&state.db)
        .await
        .map_err(|err| ApiError::store("Erro ao atualizar cliente.", err))?
        .ok_or(ApiError::NotFound("Cliente não encontrado."))?;

    let mut active: client::ActiveModel = existing.into();
    if let Some(name) = payload.name {
        active.name = Set(name);
    }
    if let Some(email) = payload.email {
        active.email = Set(email);
    }
    if let Some(kind) = payload.kind {
        active.kind = Set(kind);
    }
    if let Some(phone) = payload.phone {
        active.phone = Set(Some(phone));
    }
    if let Some(cpf) = payload.cpf {
        active.cpf = Set(Some(cpf));
    }
    if let Some(cnpj) = payload.cnpj {
        active.cnpj = Set(Some(cnpj));
    }
    if let Some(sector) = payload.sector {
        active.sector = Set(Some(sector));
    }
    if let Some(prefs) = payload.service_preferences {
        active.service_preferences = Set(prefs);
    }
    if let Some(advisors) = payload.advisors {
        active.advisors = Set(advisors);
    }
    if let Some(status) = payload.compliance_status {
        active.compliance_status = Set(status);
    }
    if let Some(value) = payload.wallet_value {
        active.wallet_value = Set(Some(to_decimal(value)));
    }
    if let Some(profile) = payload.financial_profile {
        active.financial_profile = Set(Some(profile));
    }
    if let Some(address) = payload.address {
        active.address = Set(Some(address));
    }
    if let Some(persons) = payload.contact_persons {
        active.contact_persons = Set(persons);
    }
    if let Some(partner_data) = payload.partner_data {
        active.partner_data = Set(partner_data);
    }
    if let Some(citizenship) = payload.citizenship {
        active.citizenship = Set(Some(citizenship));
    }
    if let Some(history) = payload.interaction_history {
        active.interaction_history = Set(history);
    }
    if let Some(reminders) = payload.reminders {
        active.reminders = Set(reminders);
    }
    if let Some(partner_id) = payload.partner_id {
        active.partner_id = Set(Some(partner_id));
    }
    if let Some(last_activity) = payload.last_activity {
        active.last_activity = Set(Some(last_activity.into()));
    }
    active.updated_at = Set(Utc::now().into());

    let updated = active
        .update(&state.db)
        .await
        .map_err(|err| ApiError::store("Erro ao atualizar cliente.", err))?;
    let partner = load_partner(&state, updated.partner_id).await?;
    Ok(Json(ClientResponse::from_model(updated, partner)))
}

async fn remove(State(state): State<AppState>, Path(id): Path<Uuid>) -> ApiResult<StatusCode> {
    let res = client::Entity::delete_by_id(id)
        .exec(&state.db)
        .await
        .map_err(|err| ApiError::store("Erro ao remover cliente.", err))?;
    if res.rows_affected == 0 {
        return Err(ApiError::NotFound("Cliente não encontrado."));
    }
    Ok(StatusCode::NO_CONTENT)
}

async fn load_partner(
    state: &AppState,
    partner_id: Option<Uuid>,
) -> ApiResult<Option<partner::Model>> {
    let Some(partner_id) = partner_id else {
        return Ok(None);
    };
    partner::Entity::find_by_id(partner_id)
        .one(&state.db)
        .await
        .map_err(|err| ApiError::store("Erro interno ao buscar cliente.", err))
}
