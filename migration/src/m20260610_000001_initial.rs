use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::Statement;

/// Play Records (one row per completed play at the totem)
#[derive(DeriveIden)]
enum PlayRecords {
    Table,
    Id,
    ParticipantId,
    ParticipantName,
    TenureDays,
    Won,
    Prize,
    CreatedAt,
}

/// Game Settings (single operator-controlled row, id = 1)
#[derive(DeriveIden)]
enum GameSettings {
    Table,
    Id,
    EmergencyMode,
    UpdatedAt,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Prize stock itself is not a table: the catalog ships as a JSON file
/// converted from the event stock sheet and is loaded once at startup.
/// Distributed counts are always derived from winning play_records rows.
#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PlayRecords::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PlayRecords::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(PlayRecords::ParticipantId)
                            .string_len(64)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PlayRecords::ParticipantName)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PlayRecords::TenureDays)
                            .big_integer()
                            .null(), // NULL = hire date unknown at play time
                    )
                    .col(ColumnDef::new(PlayRecords::Won).boolean().not_null())
                    .col(
                        ColumnDef::new(PlayRecords::Prize)
                            .string_len(255)
                            .null(), // set iff won
                    )
                    .col(
                        ColumnDef::new(PlayRecords::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .to_owned(),
            )
            .await?;

        // one-play-per-participant lookups
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_play_records_participant")
                    .table(PlayRecords::Table)
                    .col(PlayRecords::ParticipantId)
                    .to_owned(),
            )
            .await?;

        // winner scans (inventory derivation, admin stats)
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_play_records_won")
                    .table(PlayRecords::Table)
                    .col(PlayRecords::Won)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(GameSettings::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(GameSettings::Id)
                            .big_integer()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(GameSettings::EmergencyMode)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(GameSettings::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .to_owned(),
            )
            .await?;

        // Seed the settings row. Emergency mode starts off.
        let conn = manager.get_connection();
        let insert_sql = r#"
INSERT INTO game_settings (id, emergency_mode)
VALUES (1, FALSE)
ON CONFLICT (id) DO NOTHING;
"#;
        conn.execute(Statement::from_string(
            manager.get_database_backend(),
            insert_sql.to_string(),
        ))
        .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(
                Table::drop()
                    .if_exists()
                    .table(GameSettings::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(
                Table::drop()
                    .if_exists()
                    .table(PlayRecords::Table)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }
}
