use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "activity")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: Uuid,
    pub title: String,
    pub kind: Kind,
    #[sea_orm(indexed)]
    pub client_id: Option<Uuid>,
    #[sea_orm(indexed)]
    pub opportunity_id: Option<Uuid>,
    pub assessor: Option<String>,
    pub guests: Json,
    pub location: Option<String>,
    pub due_date: DateTimeWithTimeZone,
    pub priority: Priority,
    pub status: Status,
    pub notes: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::client::Entity",
        from = "Column::ClientId",
        to = "super::client::Column::Id",
        on_delete = "SetNull"
    )]
    Client,
    #[sea_orm(
        belongs_to = "super::opportunity::Entity",
        from = "Column::OpportunityId",
        to = "super::opportunity::Column::Id",
        on_delete = "SetNull"
    )]
    Opportunity,
}

impl Related<super::client::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Client.def()
    }
}

impl Related<super::opportunity::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Opportunity.def()
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveActiveEnum, Eq, PartialEq, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(Some(32))")]
pub enum Kind {
    #[sea_orm(string_value = "Reunião")]
    #[serde(rename = "Reunião")]
    Reuniao,
    #[sea_orm(string_value = "Ligação")]
    #[serde(rename = "Ligação")]
    Ligacao,
    #[sea_orm(string_value = "E-mail")]
    #[serde(rename = "E-mail")]
    Email,
    #[sea_orm(string_value = "Operacional")]
    #[serde(rename = "Operacional")]
    Operacional,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveActiveEnum, Eq, PartialEq, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(Some(16))")]
pub enum Priority {
    #[sea_orm(string_value = "Alta")]
    #[serde(rename = "Alta")]
    Alta,
    #[sea_orm(string_value = "Média")]
    #[serde(rename = "Média")]
    Media,
    #[sea_orm(string_value = "Baixa")]
    #[serde(rename = "Baixa")]
    Baixa,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveActiveEnum, Eq, PartialEq, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(Some(32))")]
pub enum Status {
    #[sea_orm(string_value = "A Fazer")]
    #[serde(rename = "A Fazer")]
    AFazer,
    #[sea_orm(string_value = "Em Andamento")]
    #[serde(rename = "Em Andamento")]
    EmAndamento,
    #[sea_orm(string_value = "Concluída")]
    #[serde(rename = "Concluída")]
    Concluida,
}

impl ActiveModelBehavior for ActiveModel {}
