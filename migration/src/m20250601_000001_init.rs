use sea_orm_migration::prelude::*;

#[derive(DeriveIden)]
enum User {
    Table,
    Id,
    Username,
    PasswordHash,
    Name,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Session {
    Table,
    Id,
    UserId,
    CreatedAt,
    ExpiresAt,
}

#[derive(DeriveIden)]
enum Partner {
    Table,
    Id,
    Name,
    Phone,
    Address,
    ResponsiblePersons,
    Contract,
    IndicatedClientsCount,
    TotalVolume,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Client {
    Table,
    Id,
    Name,
    Email,
    Kind,
    Phone,
    Cpf,
    Cnpj,
    Sector,
    ServicePreferences,
    Advisors,
    ComplianceStatus,
    WalletValue,
    FinancialProfile,
    Address,
    ContactPersons,
    PartnerData,
    Citizenship,
    InteractionHistory,
    Reminders,
    PartnerId,
    LastActivity,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Opportunity {
    Table,
    Id,
    Title,
    ClientId,
    Source,
    EstimatedValue,
    Stage,
    Probability,
    ExpectedCloseDate,
    Responsible,
    NextAction,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Transaction {
    Table,
    Id,
    ClientId,
    Kind,
    Product,
    Value,
    UnitValue,
    Quantity,
    ReservationDate,
    LiquidationDate,
    Timestamp,
    Status,
    Institution,
    DocRef,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Activity {
    Table,
    Id,
    Title,
    Kind,
    ClientId,
    OpportunityId,
    Assessor,
    Guests,
    Location,
    DueDate,
    Priority,
    Status,
    Notes,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(User::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(User::Id).uuid().not_null().primary_key())
                    .col(
                        ColumnDef::new(User::Username)
                            .string_len(128)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(User::PasswordHash).string_len(256).not_null())
                    .col(ColumnDef::new(User::Name).string_len(256).not_null())
                    .col(
                        ColumnDef::new(User::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Session::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Session::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Session::UserId).uuid().not_null())
                    .col(
                        ColumnDef::new(Session::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Session::ExpiresAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_session_user")
                            .from(Session::Table, Session::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_session_user")
                    .table(Session::Table)
                    .col(Session::UserId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Partner::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Partner::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Partner::Name).string_len(256).not_null())
                    .col(ColumnDef::new(Partner::Phone).string_len(64))
                    .col(ColumnDef::new(Partner::Address).json_binary())
                    .col(
                        ColumnDef::new(Partner::ResponsiblePersons)
                            .json_binary()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Partner::Contract).json_binary())
                    .col(
                        ColumnDef::new(Partner::IndicatedClientsCount)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Partner::TotalVolume).decimal_len(18, 2))
                    .col(
                        ColumnDef::new(Partner::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Partner::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Client::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Client::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Client::Name).string_len(256).not_null())
                    .col(ColumnDef::new(Client::Email).string_len(320).not_null())
                    .col(ColumnDef::new(Client::Kind).string_len(8).not_null())
                    .col(ColumnDef::new(Client::Phone).string_len(64))
                    .col(ColumnDef::new(Client::Cpf).string_len(32))
                    .col(ColumnDef::new(Client::Cnpj).string_len(32))
                    .col(ColumnDef::new(Client::Sector).string_len(128))
                    .col(
                        ColumnDef::new(Client::ServicePreferences)
                            .json_binary()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Client::Advisors).json_binary().not_null())
                    .col(
                        ColumnDef::new(Client::ComplianceStatus)
                            .string_len(64)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Client::WalletValue).decimal_len(18, 2))
                    .col(ColumnDef::new(Client::FinancialProfile).json_binary())
                    .col(ColumnDef::new(Client::Address).json_binary())
                    .col(
                        ColumnDef::new(Client::ContactPersons)
                            .json_binary()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Client::PartnerData).json_binary().not_null())
                    .col(ColumnDef::new(Client::Citizenship).string_len(64))
                    .col(
                        ColumnDef::new(Client::InteractionHistory)
                            .json_binary()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Client::Reminders).json_binary().not_null())
                    .col(ColumnDef::new(Client::PartnerId).uuid())
                    .col(ColumnDef::new(Client::LastActivity).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(Client::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Client::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_client_partner")
                            .from(Client::Table, Client::PartnerId)
                            .to(Partner::Table, Partner::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_client_partner")
                    .table(Client::Table)
                    .col(Client::PartnerId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Opportunity::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Opportunity::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Opportunity::Title).string_len(256).not_null())
                    .col(ColumnDef::new(Opportunity::ClientId).uuid().not_null())
                    .col(ColumnDef::new(Opportunity::Source).string_len(128))
                    .col(ColumnDef::new(Opportunity::EstimatedValue).decimal_len(18, 2))
                    .col(ColumnDef::new(Opportunity::Stage).string_len(32).not_null())
                    .col(ColumnDef::new(Opportunity::Probability).integer().not_null())
                    .col(
                        ColumnDef::new(Opportunity::ExpectedCloseDate)
                            .timestamp_with_time_zone(),
                    )
                    .col(ColumnDef::new(Opportunity::Responsible).string_len(128))
                    .col(ColumnDef::new(Opportunity::NextAction).string_len(512))
                    .col(
                        ColumnDef::new(Opportunity::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Opportunity::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_opportunity_client")
                            .from(Opportunity::Table, Opportunity::ClientId)
                            .to(Client::Table, Client::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_opportunity_client")
                    .table(Opportunity::Table)
                    .col(Opportunity::ClientId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Transaction::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Transaction::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Transaction::ClientId).uuid().not_null())
                    .col(ColumnDef::new(Transaction::Kind).string_len(64).not_null())
                    .col(ColumnDef::new(Transaction::Product).json_binary())
                    .col(ColumnDef::new(Transaction::Value).decimal_len(18, 2))
                    .col(ColumnDef::new(Transaction::UnitValue).decimal_len(18, 6))
                    .col(ColumnDef::new(Transaction::Quantity).big_integer())
                    .col(
                        ColumnDef::new(Transaction::ReservationDate)
                            .timestamp_with_time_zone(),
                    )
                    .col(
                        ColumnDef::new(Transaction::LiquidationDate)
                            .timestamp_with_time_zone(),
                    )
                    .col(
                        ColumnDef::new(Transaction::Timestamp)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Transaction::Status).string_len(64).not_null())
                    .col(ColumnDef::new(Transaction::Institution).string_len(128))
                    .col(ColumnDef::new(Transaction::DocRef).string_len(128))
                    .col(
                        ColumnDef::new(Transaction::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Transaction::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_transaction_client")
                            .from(Transaction::Table, Transaction::ClientId)
                            .to(Client::Table, Client::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_transaction_client")
                    .table(Transaction::Table)
                    .col(Transaction::ClientId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_transaction_timestamp")
                    .table(Transaction::Table)
                    .col(Transaction::Timestamp)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Activity::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Activity::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Activity::Title).string_len(256).not_null())
                    .col(ColumnDef::new(Activity::Kind).string_len(32).not_null())
                    .col(ColumnDef::new(Activity::ClientId).uuid())
                    .col(ColumnDef::new(Activity::OpportunityId).uuid())
                    .col(ColumnDef::new(Activity::Assessor).string_len(128))
                    .col(ColumnDef::new(Activity::Guests).json_binary().not_null())
                    .col(ColumnDef::new(Activity::Location).string_len(256))
                    .col(
                        ColumnDef::new(Activity::DueDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Activity::Priority).string_len(16).not_null())
                    .col(ColumnDef::new(Activity::Status).string_len(32).not_null())
                    .col(ColumnDef::new(Activity::Notes).text())
                    .col(
                        ColumnDef::new(Activity::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Activity::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_activity_client")
                            .from(Activity::Table, Activity::ClientId)
                            .to(Client::Table, Client::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_activity_opportunity")
                            .from(Activity::Table, Activity::OpportunityId)
                            .to(Opportunity::Table, Opportunity::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_activity_client")
                    .table(Activity::Table)
                    .col(Activity::ClientId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_activity_due_date")
                    .table(Activity::Table)
                    .col(Activity::DueDate)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Activity::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Transaction::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Opportunity::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Client::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Partner::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Session::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(User::Table).if_exists().to_owned())
            .await
    }
}
