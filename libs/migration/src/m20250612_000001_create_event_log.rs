use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(IntegrationEventLog::Table)
                    .if_not_exists()
                    .col(pk_uuid(IntegrationEventLog::EventId))
                    .col(string(IntegrationEventLog::EventTypeName))
                    .col(string_len(IntegrationEventLog::State, 32).default("not_published"))
                    .col(integer(IntegrationEventLog::TimesSent).default(0))
                    .col(
                        timestamp_with_time_zone(IntegrationEventLog::CreationTime)
                            .default(Expr::current_timestamp()),
                    )
                    .col(json_binary(IntegrationEventLog::Content))
                    .to_owned(),
            )
            .await?;

        // The publisher scans for entries that are not yet published
        manager
            .create_index(
                Index::create()
                    .name("idx_integration_event_log_state")
                    .table(IntegrationEventLog::Table)
                    .col(IntegrationEventLog::State)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(IntegrationEventLog::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum IntegrationEventLog {
    Table,
    EventId,
    EventTypeName,
    State,
    TimesSent,
    CreationTime,
    Content,
}
