use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "transaction")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: Uuid,
    #[sea_orm(indexed)]
    pub client_id: Uuid,
    pub kind: String,
    pub product: Option<Json>,
    #[sea_orm(column_type = "Decimal(Some((18, 2)))", nullable)]
    pub value: Option<Decimal>,
    #[sea_orm(column_type = "Decimal(Some((18, 6)))", nullable)]
    pub unit_value: Option<Decimal>,
    pub quantity: Option<i64>,
    pub reservation_date: Option<DateTimeWithTimeZone>,
    pub liquidation_date: Option<DateTimeWithTimeZone>,
    pub timestamp: DateTimeWithTimeZone,
    pub status: String,
    pub institution: Option<String>,
    pub doc_ref: Option<String>,
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

impl ActiveModelBehavior for ActiveModel {}
