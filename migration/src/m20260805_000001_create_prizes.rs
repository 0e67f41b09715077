use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::Statement;

/// Prizes (转盘奖品配置表)
#[derive(DeriveIden)]
enum Prizes {
    Table,
    Id,
    Title,
    ThumbnailUrl,
    Content,
    StartTime,
    EndTime,
    QuantityRemaining,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

/// 字段说明:
/// - start_time / end_time: 奖品活动窗口，窗口临近结束时全局中奖率上升
/// - quantity_remaining: 剩余库存 (NULL 表示配置缺失，加载时会被剔除)
/// - is_active: 运营开关，关闭后不再进入奖池
#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Prizes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Prizes::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Prizes::Title).string_len(255).not_null())
                    .col(ColumnDef::new(Prizes::ThumbnailUrl).string_len(1024).null())
                    .col(ColumnDef::new(Prizes::Content).text().null())
                    .col(
                        ColumnDef::new(Prizes::StartTime)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Prizes::EndTime)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Prizes::QuantityRemaining)
                            .big_integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Prizes::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Prizes::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .col(
                        ColumnDef::new(Prizes::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .to_owned(),
            )
            .await?;

        // 奖品标题唯一（种子数据幂等依赖该约束）
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_prizes_title_unique")
                    .table(Prizes::Table)
                    .col(Prizes::Title)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // 奖池查询索引（is_active + start_time 过滤）
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_prizes_active_start")
                    .table(Prizes::Table)
                    .col(Prizes::IsActive)
                    .col(Prizes::StartTime)
                    .to_owned(),
            )
            .await?;

        // 初始化奖品数据：窗口相对当前时间，方便本地联调
        let conn = manager.get_connection();
        let insert_sql = r#"
INSERT INTO prizes (title, thumbnail_url, content, start_time, end_time, quantity_remaining, is_active)
VALUES
 ('Coffee Voucher', NULL, 'One free coffee at the counter', NOW(), NOW() + INTERVAL '30 days', 50, TRUE),
 ('Movie Ticket', NULL, 'Single admission, any weekday showing', NOW(), NOW() + INTERVAL '14 days', 20, TRUE),
 ('Grand Hamper', NULL, 'Gift hamper, collect at front desk', NOW(), NOW() + INTERVAL '60 days', 3, TRUE)
ON CONFLICT (title) DO NOTHING;
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
            .drop_table(Table::drop().if_exists().table(Prizes::Table).to_owned())
            .await?;

        Ok(())
    }
}
