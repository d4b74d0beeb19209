use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250901_000001_create_customers_table::Migration),
            Box::new(m20250901_000002_create_jobs_table::Migration),
            Box::new(m20250901_000003_create_invoices_table::Migration),
        ]
    }
}

// Migration implementations

mod m20250901_000001_create_customers_table {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250901_000001_create_customers_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Customers::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Customers::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Customers::Name).string().not_null())
                        .col(ColumnDef::new(Customers::Phone).string().not_null())
                        .col(ColumnDef::new(Customers::Email).string().null())
                        .col(ColumnDef::new(Customers::Address).string().null())
                        .col(
                            ColumnDef::new(Customers::CreatedAt)
                                .timestamp()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Customers::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum Customers {
        Table,
        Id,
        Name,
        Phone,
        Email,
        Address,
        CreatedAt,
    }
}

mod m20250901_000002_create_jobs_table {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250901_000002_create_jobs_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Jobs::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Jobs::Id).uuid().primary_key().not_null())
                        .col(ColumnDef::new(Jobs::CustomerId).uuid().not_null())
                        .col(ColumnDef::new(Jobs::CustomerName).string().not_null())
                        .col(ColumnDef::new(Jobs::CustomerPhone).string().not_null())
                        .col(ColumnDef::new(Jobs::CustomerAddress).string().not_null())
                        .col(ColumnDef::new(Jobs::JobType).string().not_null())
                        .col(
                            ColumnDef::new(Jobs::Status)
                                .string()
                                .not_null()
                                .default("Quoted"),
                        )
                        .col(ColumnDef::new(Jobs::Materials).json().not_null())
                        .col(
                            ColumnDef::new(Jobs::LaborHours)
                                .decimal()
                                .not_null()
                                .default(0),
                        )
                        .col(ColumnDef::new(Jobs::LaborRate).decimal().not_null())
                        .col(ColumnDef::new(Jobs::MarkupPercent).decimal().not_null())
                        .col(
                            ColumnDef::new(Jobs::MaterialsTotal)
                                .decimal()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(Jobs::LaborTotal)
                                .decimal()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(Jobs::QuoteTotal)
                                .decimal()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(Jobs::Notes)
                                .text()
                                .not_null()
                                .default(""),
                        )
                        .col(ColumnDef::new(Jobs::ScheduledDate).date().null())
                        .col(ColumnDef::new(Jobs::CompletedDate).timestamp().null())
                        .col(ColumnDef::new(Jobs::CreatedAt).timestamp().not_null())
                        .col(ColumnDef::new(Jobs::UpdatedAt).timestamp().not_null())
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_jobs_status")
                        .table(Jobs::Table)
                        .col(Jobs::Status)
                        .if_not_exists()
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Jobs::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum Jobs {
        Table,
        Id,
        CustomerId,
        CustomerName,
        CustomerPhone,
        CustomerAddress,
        JobType,
        Status,
        Materials,
        LaborHours,
        LaborRate,
        MarkupPercent,
        MaterialsTotal,
        LaborTotal,
        QuoteTotal,
        Notes,
        ScheduledDate,
        CompletedDate,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20250901_000003_create_invoices_table {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250901_000003_create_invoices_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Invoices::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Invoices::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Invoices::JobId).uuid().not_null())
                        .col(ColumnDef::new(Invoices::CustomerId).uuid().not_null())
                        .col(ColumnDef::new(Invoices::CustomerName).string().not_null())
                        .col(ColumnDef::new(Invoices::Amount).decimal().not_null())
                        .col(
                            ColumnDef::new(Invoices::Status)
                                .string()
                                .not_null()
                                .default("Pending"),
                        )
                        .col(ColumnDef::new(Invoices::DueDate).date().not_null())
                        .col(ColumnDef::new(Invoices::PaidDate).timestamp().null())
                        .col(
                            ColumnDef::new(Invoices::CreatedAt)
                                .timestamp()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_invoices_job_id")
                        .table(Invoices::Table)
                        .col(Invoices::JobId)
                        .if_not_exists()
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Invoices::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum Invoices {
        Table,
        Id,
        JobId,
        CustomerId,
        CustomerName,
        Amount,
        Status,
        DueDate,
        PaidDate,
        CreatedAt,
    }
}
