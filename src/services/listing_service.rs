// src/services/listing_service.rs

use rust_decimal::Decimal;

use crate::{
    common::error::AppError,
    db::{CatalogRepository, ListingRepository},
    models::{
        catalog::{Kitchen, Location, OverstayDefaults},
        listing::{OverstayPolicy, StorageListing, UpdateStorageListingRequest},
    },
};

// Fallbacks literais da política de permanência excedida, usados quando nem
// o payload nem a localidade definem o campo. Texto de política não tem fallback.
const DEFAULT_GRACE_PERIOD_DAYS: i32 = 3;
const DEFAULT_MAX_PENALTY_DAYS: i32 = 30;
fn default_penalty_rate() -> Decimal {
    Decimal::new(10, 2) // 0.10
}

// Anúncios criados pelo gerente entram aprovados direto, sem etapa de admin.
const MANAGER_CREATED_STATUS: &str = "active";
const MANAGER_CREATED_IS_ACTIVE: bool = true;

// Resultado da verificação de posse da cadeia gerente → localidade → cozinha.
// A ordem importa: inexistência tem precedência sobre negação, para não
// revelar via 403 a existência de cozinhas alheias.
#[derive(Debug, Clone, PartialEq)]
pub enum KitchenAccess {
    NotFound,
    Denied,
    Allowed(Kitchen),
}

// Decisão pura: cozinha inexistente antes de qualquer teste de posse;
// depois, pertencimento da localidade da cozinha ao conjunto do gerente.
fn decide_kitchen_access(kitchen: Option<Kitchen>, owned: &[Location]) -> KitchenAccess {
    let Some(kitchen) = kitchen else {
        return KitchenAccess::NotFound;
    };
    if owned.iter().any(|loc| loc.id == kitchen.location_id) {
        KitchenAccess::Allowed(kitchen)
    } else {
        KitchenAccess::Denied
    }
}

// Mescla campo a campo: valor do payload vence sempre (inclusive zero),
// senão o padrão da localidade, senão a constante de fallback.
fn resolve_overstay_policy(
    grace_period_days: Option<i32>,
    penalty_rate: Option<Decimal>,
    max_penalty_days: Option<i32>,
    policy_text: Option<String>,
    defaults: Option<&OverstayDefaults>,
) -> OverstayPolicy {
    OverstayPolicy {
        grace_period_days: grace_period_days
            .or_else(|| defaults.and_then(|d| d.grace_period_days))
            .unwrap_or(DEFAULT_GRACE_PERIOD_DAYS),
        penalty_rate: penalty_rate
            .or_else(|| defaults.and_then(|d| d.penalty_rate))
            .unwrap_or_else(default_penalty_rate),
        max_penalty_days: max_penalty_days
            .or_else(|| defaults.and_then(|d| d.max_penalty_days))
            .unwrap_or(DEFAULT_MAX_PENALTY_DAYS),
        policy_text: policy_text.or_else(|| defaults.and_then(|d| d.policy_text.clone())),
    }
}

// DELETE sem linha afetada significa que o anúncio já não existia.
fn deletion_result(deleted: bool) -> Result<(), AppError> {
    if deleted {
        Ok(())
    } else {
        Err(AppError::ListingNotFound)
    }
}

#[derive(Clone)]
pub struct StorageListingService {
    listing_repo: ListingRepository,
    catalog_repo: CatalogRepository,
}

impl StorageListingService {
    pub fn new(listing_repo: ListingRepository, catalog_repo: CatalogRepository) -> Self {
        Self {
            listing_repo,
            catalog_repo,
        }
    }

    // Verificação de posse centralizada, consumida por todas as rotas de
    // gerente para manter sempre a ordem 404-antes-de-403.
    pub async fn kitchen_access(
        &self,
        manager_id: i64,
        kitchen_id: i64,
    ) -> Result<KitchenAccess, AppError> {
        let kitchen = self.catalog_repo.find_kitchen_by_id(kitchen_id).await?;
        if kitchen.is_none() {
            // Não busca as localidades do gerente para uma cozinha inexistente.
            return Ok(KitchenAccess::NotFound);
        }

        let owned = self
            .catalog_repo
            .find_locations_by_manager(manager_id)
            .await?;

        Ok(decide_kitchen_access(kitchen, &owned))
    }

    async fn authorize_kitchen(
        &self,
        manager_id: i64,
        kitchen_id: i64,
    ) -> Result<Kitchen, AppError> {
        match self.kitchen_access(manager_id, kitchen_id).await? {
            KitchenAccess::Allowed(kitchen) => Ok(kitchen),
            KitchenAccess::Denied => Err(AppError::AccessDenied),
            KitchenAccess::NotFound => Err(AppError::KitchenNotFound),
        }
    }

    // Busca o anúncio e valida a cadeia de posse do gerente sobre ele.
    async fn authorize_listing(
        &self,
        manager_id: i64,
        listing_id: i64,
    ) -> Result<StorageListing, AppError> {
        let listing = self
            .listing_repo
            .find_by_id(listing_id)
            .await?
            .ok_or(AppError::ListingNotFound)?;

        self.authorize_kitchen(manager_id, listing.kitchen_id)
            .await?;

        Ok(listing)
    }

    // Gerentes veem o conjunto completo da cozinha, sem filtro de status.
    pub async fn list_for_manager(
        &self,
        manager_id: i64,
        kitchen_id: i64,
    ) -> Result<Vec<StorageListing>, AppError> {
        self.authorize_kitchen(manager_id, kitchen_id).await?;
        self.listing_repo.find_by_kitchen(kitchen_id).await
    }

    pub async fn get_for_manager(
        &self,
        manager_id: i64,
        listing_id: i64,
    ) -> Result<StorageListing, AppError> {
        self.authorize_listing(manager_id, listing_id).await
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create_for_manager(
        &self,
        manager_id: i64,
        kitchen_id: i64,
        name: &str,
        storage_type: &str,
        pricing_model: &str,
        base_price: Decimal,
        overstay_grace_period_days: Option<i32>,
        overstay_penalty_rate: Option<Decimal>,
        overstay_max_penalty_days: Option<i32>,
        overstay_policy_text: Option<String>,
    ) -> Result<StorageListing, AppError> {
        let kitchen = self.authorize_kitchen(manager_id, kitchen_id).await?;

        let defaults = self
            .catalog_repo
            .find_overstay_defaults(kitchen.location_id)
            .await?;

        let policy = resolve_overstay_policy(
            overstay_grace_period_days,
            overstay_penalty_rate,
            overstay_max_penalty_days,
            overstay_policy_text,
            defaults.as_ref(),
        );

        // Status e is_active são forçados na criação, ignorando o payload.
        self.listing_repo
            .create(
                kitchen_id,
                name,
                storage_type,
                pricing_model,
                base_price,
                MANAGER_CREATED_STATUS,
                MANAGER_CREATED_IS_ACTIVE,
                policy,
            )
            .await
    }

    pub async fn update_for_manager(
        &self,
        manager_id: i64,
        listing_id: i64,
        input: UpdateStorageListingRequest,
    ) -> Result<StorageListing, AppError> {
        self.authorize_listing(manager_id, listing_id).await?;

        // Entre a checagem acima e o UPDATE o anúncio pode sumir; nesse caso
        // respondemos 404 em vez de falhar com erro de banco.
        self.listing_repo
            .update(listing_id, input)
            .await?
            .ok_or(AppError::ListingNotFound)
    }

    pub async fn delete_for_manager(
        &self,
        manager_id: i64,
        listing_id: i64,
    ) -> Result<(), AppError> {
        self.authorize_listing(manager_id, listing_id).await?;

        // Mesma janela do update: alvo que sumiu entre a checagem e o DELETE
        // responde 404, não sucesso.
        let deleted = self.listing_repo.delete(listing_id).await?;
        deletion_result(deleted)
    }

    // Chefs veem qualquer cozinha, mas só anúncios aprovados e ativos.
    // O filtro é feito em memória sobre o conjunto completo da cozinha.
    pub async fn list_visible_for_chef(
        &self,
        kitchen_id: i64,
    ) -> Result<Vec<StorageListing>, AppError> {
        let listings = self.listing_repo.find_by_kitchen(kitchen_id).await?;
        Ok(listings
            .into_iter()
            .filter(StorageListing::is_visible_to_chefs)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn kitchen(id: i64, location_id: i64) -> Kitchen {
        Kitchen {
            id,
            location_id,
            name: format!("Cozinha {}", id),
            created_at: Utc::now(),
        }
    }

    fn location(id: i64, manager_id: i64) -> Location {
        Location {
            id,
            manager_id,
            name: format!("Localidade {}", id),
            created_at: Utc::now(),
        }
    }

    fn created_listing(status: &str, is_active: bool) -> StorageListing {
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
    fn criacao_pelo_gerente_entra_ativa_e_visivel() {
        // Estado forçado na criação, independente do payload.
        assert_eq!(MANAGER_CREATED_STATUS, "active");
        assert!(MANAGER_CREATED_IS_ACTIVE);

        // Um anúncio recém-criado pelo gerente já aparece para chefs.
        let listing = created_listing(MANAGER_CREATED_STATUS, MANAGER_CREATED_IS_ACTIVE);
        assert!(listing.is_visible_to_chefs());
    }

    #[test]
    fn remocao_sem_linha_afetada_vira_404() {
        assert!(deletion_result(true).is_ok());
        assert!(matches!(
            deletion_result(false),
            Err(AppError::ListingNotFound)
        ));
    }

    #[test]
    fn cozinha_inexistente_precede_negacao() {
        // Mesmo sem nenhuma localidade, inexistência responde primeiro.
        let access = decide_kitchen_access(None, &[]);
        assert_eq!(access, KitchenAccess::NotFound);
    }

    #[test]
    fn gerente_dono_da_localidade_tem_acesso() {
        // Cozinha 12 fica na localidade 5, que pertence ao gerente 7.
        let owned = vec![location(5, 7), location(8, 7)];
        let access = decide_kitchen_access(Some(kitchen(12, 5)), &owned);
        assert!(matches!(access, KitchenAccess::Allowed(k) if k.id == 12));
    }

    #[test]
    fn gerente_sem_a_localidade_e_negado() {
        // Gerente 9 não possui a localidade 5.
        let owned = vec![location(3, 9)];
        let access = decide_kitchen_access(Some(kitchen(12, 5)), &owned);
        assert_eq!(access, KitchenAccess::Denied);
    }

    #[test]
    fn politica_usa_padrao_da_localidade_quando_omitida() {
        // Localidade define apenas o período de carência.
        let defaults = OverstayDefaults {
            location_id: 5,
            grace_period_days: Some(5),
            penalty_rate: None,
            max_penalty_days: None,
            policy_text: None,
        };

        let policy = resolve_overstay_policy(None, None, None, None, Some(&defaults));

        assert_eq!(policy.grace_period_days, 5);
        assert_eq!(policy.penalty_rate, Decimal::new(10, 2));
        assert_eq!(policy.max_penalty_days, 30);
        assert_eq!(policy.policy_text, None);
    }

    #[test]
    fn politica_cai_nos_fallbacks_sem_localidade() {
        let policy = resolve_overstay_policy(None, None, None, None, None);

        assert_eq!(policy.grace_period_days, 3);
        assert_eq!(policy.penalty_rate, Decimal::new(10, 2));
        assert_eq!(policy.max_penalty_days, 30);
        assert_eq!(policy.policy_text, None);
    }

    #[test]
    fn valor_do_payload_vence_inclusive_zero() {
        let defaults = OverstayDefaults {
            location_id: 5,
            grace_period_days: Some(5),
            penalty_rate: Some(Decimal::new(25, 2)),
            max_penalty_days: Some(60),
            policy_text: Some("Texto da localidade".into()),
        };

        let policy = resolve_overstay_policy(
            Some(0),
            Some(Decimal::ZERO),
            Some(0),
            Some("Texto do gerente".into()),
            Some(&defaults),
        );

        // Zero explícito é um valor fornecido, nunca sobrescrito.
        assert_eq!(policy.grace_period_days, 0);
        assert_eq!(policy.penalty_rate, Decimal::ZERO);
        assert_eq!(policy.max_penalty_days, 0);
        assert_eq!(policy.policy_text.as_deref(), Some("Texto do gerente"));
    }
}
