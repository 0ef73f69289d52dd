//! Wire types, mirroring the JSON shapes the server produces and accepts.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OpportunityStage {
    #[serde(rename = "Pesquisa")]
    Pesquisa,
    #[serde(rename = "Qualificação")]
    Qualificacao,
    #[serde(rename = "Proposta")]
    Proposta,
    #[serde(rename = "Negociação")]
    Negociacao,
    #[serde(rename = "Ganho")]
    Ganho,
    #[serde(rename = "Perdido")]
    Perdido,
}

/// Funnel order, as rendered on the kanban board.
pub const ALL_OPPORTUNITY_STAGES: [OpportunityStage; 6] = [
    OpportunityStage::Pesquisa,
    OpportunityStage::Qualificacao,
    OpportunityStage::Proposta,
    OpportunityStage::Negociacao,
    OpportunityStage::Ganho,
    OpportunityStage::Perdido,
];

impl OpportunityStage {
    pub fn label(self) -> &'static str {
        match self {
            OpportunityStage::Pesquisa => "Pesquisa",
            OpportunityStage::Qualificacao => "Qualificação",
            OpportunityStage::Proposta => "Proposta",
            OpportunityStage::Negociacao => "Negociação",
            OpportunityStage::Ganho => "Ganho",
            OpportunityStage::Perdido => "Perdido",
        }
    }
}

impl fmt::Display for OpportunityStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActivityType {
    #[serde(rename = "Reunião")]
    Reuniao,
    #[serde(rename = "Ligação")]
    Ligacao,
    #[serde(rename = "E-mail")]
    Email,
    #[serde(rename = "Operacional")]
    Operacional,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActivityPriority {
    #[serde(rename = "Alta")]
    Alta,
    #[serde(rename = "Média")]
    Media,
    #[serde(rename = "Baixa")]
    Baixa,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActivityStatus {
    #[serde(rename = "A Fazer")]
    AFazer,
    #[serde(rename = "Em Andamento")]
    EmAndamento,
    #[serde(rename = "Concluída")]
    Concluida,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Opportunity {
    pub id: Uuid,
    pub title: String,
    pub client_id: Uuid,
    #[serde(default)]
    pub client_name: String,
    #[serde(default)]
    pub source: Option<String>,
    pub estimated_value: f64,
    pub stage: OpportunityStage,
    pub probability: i32,
    #[serde(default)]
    pub expected_close_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub responsible: Option<String>,
    #[serde(default)]
    pub next_action: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOpportunity {
    pub title: String,
    pub client_id: Option<Uuid>,
    pub stage: Option<OpportunityStage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub probability: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_close_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub responsible: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_action: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: Uuid,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: ActivityType,
    #[serde(default)]
    pub client_id: Option<Uuid>,
    #[serde(default)]
    pub opportunity_id: Option<Uuid>,
    #[serde(default)]
    pub assessor: Option<String>,
    #[serde(default)]
    pub guests: Value,
    #[serde(default)]
    pub location: Option<String>,
    pub due_date: DateTime<Utc>,
    pub priority: ActivityPriority,
    pub status: ActivityStatus,
    #[serde(default)]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewActivity {
    pub title: String,
    #[serde(rename = "type")]
    pub kind: ActivityType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opportunity_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assessor: Option<String>,
    pub due_date: DateTime<Utc>,
    pub priority: ActivityPriority,
    pub status: ActivityStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: Uuid,
    pub client_id: Uuid,
    #[serde(default)]
    pub client_name: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub product: Option<Product>,
    pub value: f64,
    #[serde(default)]
    pub unit_value: Option<f64>,
    #[serde(default)]
    pub quantity: Option<i64>,
    #[serde(default)]
    pub reservation_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub liquidation_date: Option<DateTime<Utc>>,
    pub timestamp: DateTime<Utc>,
    pub status: String,
    #[serde(default)]
    pub institution: Option<String>,
    #[serde(default)]
    pub doc_ref: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction {
    pub client_id: Option<Uuid>,
    #[serde(rename = "type")]
    pub kind: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product: Option<Product>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reservation_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub liquidation_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub institution: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doc_ref: Option<String>,
}

/// The slice of a client record the board and the workflows care about.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientSummary {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: Uuid,
    pub name: String,
    pub username: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: Uuid,
    pub title: String,
    pub message: String,
    pub date: DateTime<Utc>,
    pub read: bool,
}

#[derive(Debug, Clone)]
pub struct NewNotification {
    pub title: String,
    pub message: String,
}
