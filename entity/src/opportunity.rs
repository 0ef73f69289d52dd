use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "opportunity")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: Uuid,
    pub title: String,
    #[sea_orm(indexed)]
    pub client_id: Uuid,
    pub source: Option<String>,
    #[sea_orm(column_type = "Decimal(Some((18, 2)))", nullable)]
    pub estimated_value: Option<Decimal>,
    pub stage: Stage,
    pub probability: i32,
    pub expected_close_date: Option<DateTimeWithTimeZone>,
    pub responsible: Option<String>,
    pub next_action: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::client::Entity",
        from = "Column::ClientId",
        to = "super::client::Column::Id",
        on_delete = "Cascade"
    )]
    Client,
}

impl Related<super::client::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Client.def()
    }
}

/// Estágio do funil. Os valores persistidos são os rótulos exibidos no
/// quadro kanban, na ordem do funil.
#[derive(Copy, Clone, Debug, EnumIter, DeriveActiveEnum, Eq, PartialEq, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(Some(32))")]
pub enum Stage {
    #[sea_orm(string_value = "Pesquisa")]
    #[serde(rename = "Pesquisa")]
    Pesquisa,
    #[sea_orm(string_value = "Qualificação")]
    #[serde(rename = "Qualificação")]
    Qualificacao,
    #[sea_orm(string_value = "Proposta")]
    #[serde(rename = "Proposta")]
    Proposta,
    #[sea_orm(string_value = "Negociação")]
    #[serde(rename = "Negociação")]
    Negociacao,
    #[sea_orm(string_value = "Ganho")]
    #[serde(rename = "Ganho")]
    Ganho,
    #[sea_orm(string_value = "Perdido")]
    #[serde(rename = "Perdido")]
    Perdido,
}

impl ActiveModelBehavior for ActiveModel {}
