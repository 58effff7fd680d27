use sea_orm_migration::sea_query::extension::postgres::Type;
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create record_status enum, shared by sellers and products
        manager
            .create_type(
                Type::create()
                    .as_enum(RecordStatus::Enum)
                    .values([RecordStatus::Active, RecordStatus::Deleted])
                    .to_owned(),
            )
            .await?;

        // Create sellers table
        manager
            .create_table(
                Table::create()
                    .table(Sellers::Table)
                    .if_not_exists()
                    .col(pk_uuid(Sellers::Id))
                    .col(string(Sellers::Name))
                    .col(string_uniq(Sellers::Username))
                    .col(string(Sellers::PasswordHash))
                    .col(
                        ColumnDef::new(Sellers::Status)
                            .enumeration(
                                RecordStatus::Enum,
                                [RecordStatus::Active, RecordStatus::Deleted],
                            )
                            .not_null()
                            .default("active"),
                    )
                    .col(
                        timestamp_with_time_zone(Sellers::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Sellers::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Create indexes
        manager
            .create_index(
                Index::create()
                    .name("idx_sellers_username")
                    .table(Sellers::Table)
                    .col(Sellers::Username)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_sellers_status")
                    .table(Sellers::Table)
                    .col(Sellers::Status)
                    .to_owned(),
            )
            .await?;

        // Add updated_at trigger
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE TRIGGER sellers_touch_updated_at
                    BEFORE UPDATE ON sellers
                    FOR EACH ROW
                    EXECUTE FUNCTION util.touch_updated_at()
                "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared("DROP TRIGGER IF EXISTS sellers_touch_updated_at ON sellers")
            .await?;

        manager
            .drop_table(Table::drop().table(Sellers::Table).to_owned())
            .await?;

        manager
            .drop_type(Type::drop().name(RecordStatus::Enum).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Sellers {
    Table,
    Id,
    Name,
    Username,
    PasswordHash,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum RecordStatus {
    #[sea_orm(iden = "record_status")]
    Enum,
    #[sea_orm(iden = "active")]
    Active,
    #[sea_orm(iden = "deleted")]
    Deleted,
}
