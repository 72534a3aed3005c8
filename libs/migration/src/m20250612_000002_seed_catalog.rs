use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared(
                r#"
            INSERT INTO catalog_brand (id, brand)
            VALUES
                (1, 'Daybird'),
                (2, 'Gravitator'),
                (3, 'Solstix'),
                (4, 'Quester'),
                (5, 'Zephyr')
            ON CONFLICT (id) DO NOTHING
            "#,
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                r#"
            INSERT INTO catalog_type (id, type)
            VALUES
                (1, 'Mountain Bike'),
                (2, 'Road Bike'),
                (3, 'Helmet'),
                (4, 'Cycling Gear')
            ON CONFLICT (id) DO NOTHING
            "#,
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                r#"
            INSERT INTO catalog_item (
                id, name, description, price, picture_file_name,
                catalog_type_id, catalog_brand_id,
                available_stock, restock_threshold, max_stock_threshold, on_reorder
            )
            VALUES
                (1, 'Alpine Peak Climber', 'Lightweight full-suspension frame built for steep ascents', 1299.00, '1.webp', 1, 1, 12, 3, 50, false),
                (2, 'Summit Pro Carbon', 'Carbon fiber road frame with aero tube shaping', 2499.00, '2.webp', 2, 2, 6, 2, 30, false),
                (3, 'Trailblazer Scout', 'Entry-level hardtail with hydraulic disc brakes', 649.50, '3.webp', 1, 3, 25, 5, 80, false),
                (4, 'Velocity Aero Helmet', 'Wind-tunnel tested shell with magnetic buckle', 189.99, '4.webp', 3, 2, 40, 10, 120, false),
                (5, 'Ridge Runner Gloves', 'Padded palm with touchscreen-friendly fingertips', 34.95, '5.webp', 4, 4, 80, 20, 200, false),
                (6, 'Gravel Grinder 700c', 'All-road geometry with clearance for 45mm tyres', 1150.00, '6.webp', 2, 5, 9, 3, 40, false)
            ON CONFLICT (id) DO NOTHING
            "#,
            )
            .await?;

        // Keep the sequences ahead of the seeded ids
        manager
            .get_connection()
            .execute_unprepared(
                r#"
            SELECT setval(pg_get_serial_sequence('catalog_brand', 'id'), (SELECT MAX(id) FROM catalog_brand));
            SELECT setval(pg_get_serial_sequence('catalog_type', 'id'), (SELECT MAX(id) FROM catalog_type));
            SELECT setval(pg_get_serial_sequence('catalog_item', 'id'), (SELECT MAX(id) FROM catalog_item));
            "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared("DELETE FROM catalog_item WHERE id BETWEEN 1 AND 6")
            .await?;

        manager
            .get_connection()
            .execute_unprepared("DELETE FROM catalog_type WHERE id BETWEEN 1 AND 4")
            .await?;

        manager
            .get_connection()
            .execute_unprepared("DELETE FROM catalog_brand WHERE id BETWEEN 1 AND 5")
            .await?;

        Ok(())
    }
}
