// src/db/catalog_repo.rs

use sqlx::PgPool;

use crate::{
    common::error::AppError,
    models::catalog::{Kitchen, Location, OverstayDefaults},
};

// Repositório das entidades de catálogo: localidades, cozinhas e os
// padrões de política de permanência excedida de cada localidade.
#[derive(Clone)]
pub struct CatalogRepository {
    pool: PgPool,
}

impl CatalogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_kitchen_by_id(&self, id: i64) -> Result<Option<Kitchen>, AppError> {
        let kitchen = sqlx::query_as::<_, Kitchen>("SELECT * FROM kitchens WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(kitchen)
    }

    // Todas as localidades pertencentes a um gerente.
    pub async fn find_locations_by_manager(
        &self,
        manager_id: i64,
    ) -> Result<Vec<Location>, AppError> {
        let locations =
            sqlx::query_as::<_, Location>("SELECT * FROM locations WHERE manager_id = $1")
                .bind(manager_id)
                .fetch_all(&self.pool)
                .await?;

        Ok(locations)
    }

    // Padrões de política da localidade. Nem toda localidade configura isso,
    // então a ausência é um resultado normal.
    pub async fn find_overstay_defaults(
        &self,
        location_id: i64,
    ) -> Result<Option<OverstayDefaults>, AppError> {
        let defaults = sqlx::query_as::<_, OverstayDefaults>(
            "SELECT * FROM location_overstay_defaults WHERE location_id = $1",
        )
        .bind(location_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(defaults)
    }
}
