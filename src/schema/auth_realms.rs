use sea_orm::{ConnectionTrait, DatabaseConnection, DbBackend, Statement};
use sea_orm_migration::prelude::*;

pub async fn apply(
    manager: &SchemaManager<'_>,
    conn: &DatabaseConnection,
) -> Result<(), DbErr> {
    if !manager.has_table("auth_realms").await? {
        manager
            .create_table(
                Table::create()
                    .table(AuthRealms::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AuthRealms::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(AuthRealms::Account).string().not_null())
                    .col(ColumnDef::new(AuthRealms::Name).string().not_null())
                    .col(
                        ColumnDef::new(AuthRealms::CustomResource)
                            .json_binary()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AuthRealms::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(SimpleExpr::Custom("now()".into())),
                    )
                    .col(
                        ColumnDef::new(AuthRealms::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(SimpleExpr::Custom("now()".into())),
                    )
                    .col(ColumnDef::new(AuthRealms::DeletedAt).timestamp_with_time_zone())
                    .to_owned(),
            )
            .await?;

        conn
            .execute(Statement::from_string(
                DbBackend::Postgres,
                "ALTER TABLE auth_realms ADD CONSTRAINT auth_realms_required_check \
                 CHECK (account <> '' AND name <> '')"
                    .to_string(),
            ))
            .await?;
    }

    // Partial so a soft-deleted realm does not block reusing its name.
    conn
        .execute(Statement::from_string(
            DbBackend::Postgres,
            "CREATE UNIQUE INDEX IF NOT EXISTS auth_realms_account_name_unique \
             ON auth_realms (account, name) WHERE deleted_at IS NULL"
                .to_string(),
        ))
        .await?;

    conn
        .execute(Statement::from_string(
            DbBackend::Postgres,
            "CREATE INDEX IF NOT EXISTS auth_realms_account_idx \
             ON auth_realms (account) WHERE deleted_at IS NULL"
                .to_string(),
        ))
        .await?;

    Ok(())
}

#[derive(Iden)]
enum AuthRealms {
    Table,
    Id,
    Account,
    Name,
    CustomResource,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}
