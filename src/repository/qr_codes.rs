//! QR code storage on Repository

use async_trait::async_trait;

use super::{QrCodeStore, Repository};
use crate::{
    error::{AppError, AppResult},
    models::{QrCode, QrCodeInput},
};

#[async_trait]
impl QrCodeStore for Repository {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<QrCode>> {
        let row = sqlx::query_as::<_, QrCode>("SELECT * FROM qr_codes WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn list_by_shop(&self, shop: &str) -> AppResult<Vec<QrCode>> {
        let rows = sqlx::query_as::<_, QrCode>(
            "SELECT * FROM qr_codes WHERE shop = $1 ORDER BY id DESC"
        )
        .bind(shop)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn create(&self, shop: &str, data: &QrCodeInput) -> AppResult<QrCode> {
        let row = sqlx::query_as::<_, QrCode>(
            r#"
            INSERT INTO qr_codes (shop, title, product_id, product_handle, product_variant_id, destination)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(shop)
        .bind(&data.title)
        .bind(&data.product_id)
        .bind(&data.product_handle)
        .bind(&data.product_variant_id)
        .bind(data.destination)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn update(&self, id: i32, data: &QrCodeInput) -> AppResult<QrCode> {
        sqlx::query_as::<_, QrCode>(
            r#"
            UPDATE qr_codes
            SET title = $2, product_id = $3, product_handle = $4, product_variant_id = $5, destination = $6
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&data.title)
        .bind(&data.product_id)
        .bind(&data.product_handle)
        .bind(&data.product_variant_id)
        .bind(data.destination)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("QR code {} not found", id)))
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM qr_codes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("QR code {} not found", id)));
        }
        Ok(())
    }

    async fn increment_scans(&self, id: i32) -> AppResult<Option<QrCode>> {
        let row = sqlx::query_as::<_, QrCode>(
            "UPDATE qr_codes SET scans = scans + 1 WHERE id = $1 RETURNING *"
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }
}

#[cfg(test)]
mod tests {
    const SCHEMA: &str = include_str!("../../migrations/20240101000000_create_qr_codes.sql");

    fn column(name: &str) -> &'static str {
        SCHEMA
            .lines()
            .map(str::trim)
            .find(|line| line.starts_with(&format!("{} ", name)))
            .unwrap()
    }

    #[test]
    fn test_free_text_columns_are_unbounded() {
        for name in ["shop", "title", "product_id", "product_handle", "product_variant_id"] {
            let definition = column(name);
            assert!(definition.contains(" TEXT "), "{}", definition);
            assert!(!definition.contains("VARCHAR"), "{}", definition);
        }
    }
}
