// src/models/catalog.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

// Localidade física, pertence a um único gerente.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub id: i64,
    pub manager_id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

// Cozinha dentro de uma localidade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Kitchen {
    pub id: i64,
    pub location_id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

// Política de permanência excedida configurada por localidade.
// Todos os campos são opcionais: a localidade pode definir só alguns deles.
#[derive(Debug, Clone, Default, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OverstayDefaults {
    pub location_id: i64,
    pub grace_period_days: Option<i32>,
    pub penalty_rate: Option<Decimal>,
    pub max_penalty_days: Option<i32>,
    pub policy_text: Option<String>,
}
