// src/models/listing.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

// Status que tornam um anúncio visível para chefs (junto com is_active).
pub const VISIBLE_STATUSES: [&str; 2] = ["approved", "active"];

// Anúncio de um espaço de armazenamento alugável dentro de uma cozinha.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StorageListing {
    #[schema(example = 42)]
    pub id: i64,
    #[schema(example = 12)]
    pub kitchen_id: i64,
    #[schema(example = "Freezer A")]
    pub name: String,
    #[schema(example = "freezer")]
    pub storage_type: String,
    #[schema(example = "daily")]
    pub pricing_model: String,
    pub base_price: Decimal,
    // Status livre; "approved" e "active" são os valores visíveis para chefs.
    #[schema(example = "active")]
    pub status: String,
    pub is_active: bool,
    pub overstay_grace_period_days: Option<i32>,
    pub overstay_penalty_rate: Option<Decimal>,
    pub overstay_max_penalty_days: Option<i32>,
    pub overstay_policy_text: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl StorageListing {
    // Regra de visibilidade para chefs: as duas condições são independentes.
    pub fn is_visible_to_chefs(&self) -> bool {
        self.is_active && VISIBLE_STATUSES.contains(&self.status.as_str())
    }
}

// Política de permanência excedida já resolvida para um anúncio novo
// (payload do gerente > padrão da localidade > constante de fallback).
#[derive(Debug, Clone, PartialEq)]
pub struct OverstayPolicy {
    pub grace_period_days: i32,
    pub penalty_rate: Decimal,
    pub max_penalty_days: i32,
    // Texto de política não tem fallback literal; pode ficar ausente.
    pub policy_text: Option<String>,
}

// Patch parcial de um anúncio. Qualquer campo pode ser alterado pelo
// gerente, inclusive status e is_active; campos ausentes não mudam.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStorageListingRequest {
    pub name: Option<String>,
    pub storage_type: Option<String>,
    pub pricing_model: Option<String>,
    pub base_price: Option<Decimal>,
    pub status: Option<String>,
    pub is_active: Option<bool>,
    pub overstay_grace_period_days: Option<i32>,
    pub overstay_penalty_rate: Option<Decimal>,
    pub overstay_max_penalty_days: Option<i32>,
    pub overstay_policy_text: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn listing(status: &str, is_active: bool) -> StorageListing {
        StorageListing {
            id: 1,
            kitchen_id: 12,
            name: "Freezer A".into(),
            storage_type: "freezer".into(),
            pricing_model: "daily".into(),
            base_price: Decimal::new(2000, 2),
            status: status.into(),
            is_active,
            overstay_grace_period_days: None,
            overstay_penalty_rate: None,
            overstay_max_penalty_days: None,
            overstay_policy_text: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn visibilidade_exige_status_aprovado_ou_ativo() {
        assert!(listing("approved", true).is_visible_to_chefs());
        assert!(listing("active", true).is_visible_to_chefs());
        assert!(!listing("pending", true).is_visible_to_chefs());
        assert!(!listing("rejected", true).is_visible_to_chefs());
    }

    #[test]
    fn visibilidade_exige_is_active() {
        // As duas condições são necessárias de forma independente.
        assert!(!listing("approved", false).is_visible_to_chefs());
        assert!(!listing("active", false).is_visible_to_chefs());
    }
}
