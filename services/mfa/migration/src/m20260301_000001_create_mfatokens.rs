use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(MfaTokens::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(MfaTokens::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(MfaTokens::UserId).big_integer().not_null())
                    .col(ColumnDef::new(MfaTokens::Token).string().not_null())
                    .col(
                        ColumnDef::new(MfaTokens::Expiry)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MfaTokens::IsUsed)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .to_owned(),
            )
            .await?;

        // Serves the active-token lookup: user_id = ? AND is_used = false ORDER BY id DESC.
        manager
            .create_index(
                Index::create()
                    .table(MfaTokens::Table)
                    .col(MfaTokens::UserId)
                    .col(MfaTokens::IsUsed)
                    .col(MfaTokens::Id)
                    .name("idx_mfatokens_user_id_is_used_id")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(MfaTokens::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum MfaTokens {
    #[iden = "mfatokens"]
    Table,
    Id,
    UserId,
    Token,
    Expiry,
    IsUsed,
}
