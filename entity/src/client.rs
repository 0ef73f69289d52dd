use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "client")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub kind: Kind,
    pub phone: Option<String>,
    pub cpf: Option<String>,
    pub cnpj: Option<String>,
    pub sector: Option<String>,
    pub service_preferences: Json,
    pub advisors: Json,
    pub compliance_status: String,
    #[sea_orm(column_type = "Decimal(Some((18, 2)))", nullable)]
    pub wallet_value: Option<Decimal>,
    pub financial_profile: Option<Json>,
    pub address: Option<Json>,
    pub contact_persons: Json,
    pub partner_data: Json,
    pub citizenship: Option<String>,
    pub interaction_history: Json,
    pub reminders: Json,
    #[sea_orm(indexed)]
    pub partner_id: Option<Uuid>,
    pub last_activity: Option<DateTimeWithTimeZone>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::partner::Entity",
        from = "Column::PartnerId",
        to = "super::partner::Column::Id",
        on_delete = "SetNull"
    )]
    Partner,
}

impl Related<super::partner::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Partner.def()
    }
}

/// Pessoa física ou jurídica.
#[derive(Copy, Clone, Debug, EnumIter, DeriveActiveEnum, Eq, PartialEq, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(Some(8))")]
pub enum Kind {
    #[sea_orm(string_value = "PF")]
    #[serde(rename = "PF")]
    Pf,
    #[sea_orm(string_value = "PJ")]
    #[serde(rename = "PJ")]
    Pj,
}

impl ActiveModelBehavior for ActiveModel {}
