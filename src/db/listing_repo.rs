// src/db/listing_repo.rs

use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::{
    common::error::AppError,
    models::listing::{OverstayPolicy, StorageListing, UpdateStorageListingRequest},
};

#[derive(Clone)]
pub struct ListingRepository {
    pool: PgPool,
}

impl ListingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<StorageListing>, AppError> {
        let listing =
            sqlx::query_as::<_, StorageListing>("SELECT * FROM storage_listings WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(listing)
    }

    pub async fn find_by_kitchen(&self, kitchen_id: i64) -> Result<Vec<StorageListing>, AppError> {
        let listings = sqlx::query_as::<_, StorageListing>(
            "SELECT * FROM storage_listings WHERE kitchen_id = $1 ORDER BY id",
        )
        .bind(kitchen_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(listings)
    }

    pub async fn create(
        &self,
        kitchen_id: i64,
        name: &str,
        storage_type: &str,
        pricing_model: &str,
        base_price: Decimal,
        status: &str,
        is_active: bool,
        policy: OverstayPolicy,
    ) -> Result<StorageListing, AppError> {
        let listing = sqlx::query_as::<_, StorageListing>(
            r#"
            INSERT INTO storage_listings
                (kitchen_id, name, storage_type, pricing_model, base_price,
                 status, is_active,
                 overstay_grace_period_days, overstay_penalty_rate,
                 overstay_max_penalty_days, overstay_policy_text)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING *
            "#,
        )
        .bind(kitchen_id)
        .bind(name)
        .bind(storage_type)
        .bind(pricing_model)
        .bind(base_price)
        .bind(status)
        .bind(is_active)
        .bind(policy.grace_period_days)
        .bind(policy.penalty_rate)
        .bind(policy.max_penalty_days)
        .bind(policy.policy_text)
        .fetch_one(&self.pool)
        .await?;

        Ok(listing)
    }

    // Patch parcial: campos ausentes no payload mantêm o valor atual da linha.
    pub async fn update(
        &self,
        id: i64,
        input: UpdateStorageListingRequest,
    ) -> Result<Option<StorageListing>, AppError> {
        let listing = sqlx::query_as::<_, StorageListing>(
            r#"
            UPDATE storage_listings SET
                name                       = COALESCE($2, name),
                storage_type               = COALESCE($3, storage_type),
                pricing_model              = COALESCE($4, pricing_model),
                base_price                 = COALESCE($5, base_price),
                status                     = COALESCE($6, status),
                is_active                  = COALESCE($7, is_active),
                overstay_grace_period_days = COALESCE($8, overstay_grace_period_days),
                overstay_penalty_rate      = COALESCE($9, overstay_penalty_rate),
                overstay_max_penalty_days  = COALESCE($10, overstay_max_penalty_days),
                overstay_policy_text       = COALESCE($11, overstay_policy_text),
                updated_at                 = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(input.name)
        .bind(input.storage_type)
        .bind(input.pricing_model)
        .bind(input.base_price)
        .bind(input.status)
        .bind(input.is_active)
        .bind(input.overstay_grace_period_days)
        .bind(input.overstay_penalty_rate)
        .bind(input.overstay_max_penalty_days)
        .bind(input.overstay_policy_text)
        .fetch_optional(&self.pool)
        .await?;

        Ok(listing)
    }

    // Remoção definitiva; não há soft-delete para anúncios.
    pub async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM storage_listings WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
