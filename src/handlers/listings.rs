// src/handlers/listings.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use axum_extra::extract::WithRejection;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{
        auth::AuthenticatedUser,
        rbac::{ChefRole, ManagerRole, RequireRole},
    },
    models::listing::{StorageListing, UpdateStorageListingRequest},
};

// Os IDs chegam como texto na URL; validamos aqui antes de tocar o banco.
fn parse_positive_id(raw: &str, param: &str) -> Result<i64, AppError> {
    match raw.parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(AppError::InvalidParam(format!(
            "O parâmetro '{}' deve ser um inteiro positivo.",
            param
        ))),
    }
}

// ---
// Payload: criação de anúncio pelo gerente
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateListingPayload {
    #[validate(
        required(message = "O campo 'kitchenId' é obrigatório."),
        range(min = 1, message = "O campo 'kitchenId' deve ser positivo.")
    )]
    pub kitchen_id: Option<i64>,

    #[validate(
        required(message = "O campo 'name' é obrigatório."),
        length(min = 1, message = "O campo 'name' é obrigatório.")
    )]
    pub name: Option<String>,

    #[validate(
        required(message = "O campo 'storageType' é obrigatório."),
        length(min = 1, message = "O campo 'storageType' é obrigatório.")
    )]
    pub storage_type: Option<String>,

    #[validate(
        required(message = "O campo 'pricingModel' é obrigatório."),
        length(min = 1, message = "O campo 'pricingModel' é obrigatório.")
    )]
    pub pricing_model: Option<String>,

    #[validate(required(message = "O campo 'basePrice' é obrigatório."))]
    pub base_price: Option<Decimal>,

    // Campos de política: ausentes caem nos padrões da localidade.
    pub overstay_grace_period_days: Option<i32>,
    pub overstay_penalty_rate: Option<Decimal>,
    pub overstay_max_penalty_days: Option<i32>,
    pub overstay_policy_text: Option<String>,
}

// ---
// Handler: listagem completa de uma cozinha (gerente)
// ---
#[utoipa::path(
    get,
    path = "/manager/kitchens/{kitchenId}/storage-listings",
    tag = "Storage Listings",
    params(("kitchenId" = String, Path, description = "ID da cozinha")),
    responses(
        (status = 200, description = "Todos os anúncios da cozinha, inclusive inativos", body = Vec<StorageListing>),
        (status = 400, description = "ID inválido"),
        (status = 403, description = "Cozinha de outro gerente"),
        (status = 404, description = "Cozinha não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_kitchen_listings(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    _guard: RequireRole<ManagerRole>,
    Path(kitchen_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let kitchen_id = parse_positive_id(&kitchen_id, "kitchenId")
        .map_err(|e| e.to_api_error(app_state.is_production))?;

    let listings = app_state
        .listing_service
        .list_for_manager(user.0.id, kitchen_id)
        .await
        .map_err(|e| e.to_api_error(app_state.is_production))?;

    Ok((StatusCode::OK, Json(listings)))
}

// ---
// Handler: detalhe de um anúncio (gerente)
// ---
#[utoipa::path(
    get,
    path = "/manager/storage-listings/{listingId}",
    tag = "Storage Listings",
    params(("listingId" = String, Path, description = "ID do anúncio")),
    responses(
        (status = 200, description = "Anúncio encontrado", body = StorageListing),
        (status = 400, description = "ID inválido"),
        (status = 403, description = "Anúncio de outro gerente"),
        (status = 404, description = "Anúncio não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_listing(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    _guard: RequireRole<ManagerRole>,
    Path(listing_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let listing_id = parse_positive_id(&listing_id, "listingId")
        .map_err(|e| e.to_api_error(app_state.is_production))?;

    let listing = app_state
        .listing_service
        .get_for_manager(user.0.id, listing_id)
        .await
        .map_err(|e| e.to_api_error(app_state.is_production))?;

    Ok((StatusCode::OK, Json(listing)))
}

// ---
// Handler: criação de anúncio (gerente)
// ---
#[utoipa::path(
    post,
    path = "/manager/storage-listings",
    tag = "Storage Listings",
    request_body = CreateListingPayload,
    responses(
        (status = 201, description = "Anúncio criado já ativo", body = StorageListing),
        (status = 400, description = "Campos obrigatórios ausentes"),
        (status = 403, description = "Cozinha de outro gerente"),
        (status = 404, description = "Cozinha não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_listing(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    _guard: RequireRole<ManagerRole>,
    // Corpo que não casa com o payload vira 400, não o 422 padrão do axum.
    WithRejection(Json(payload), _): WithRejection<Json<CreateListingPayload>, ApiError>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(app_state.is_production))?;

    // O `validate` acima garante a presença; os unwraps não disparam.
    let listing = app_state
        .listing_service
        .create_for_manager(
            user.0.id,
            payload.kitchen_id.unwrap(),
            &payload.name.unwrap(),
            &payload.storage_type.unwrap(),
            &payload.pricing_model.unwrap(),
            payload.base_price.unwrap(),
            payload.overstay_grace_period_days,
            payload.overstay_penalty_rate,
            payload.overstay_max_penalty_days,
            payload.overstay_policy_text,
        )
        .await
        .map_err(|e| e.to_api_error(app_state.is_production))?;

    Ok((StatusCode::CREATED, Json(listing)))
}

// ---
// Handler: atualização parcial (gerente)
// ---
#[utoipa::path(
    put,
    path = "/manager/storage-listings/{listingId}",
    tag = "Storage Listings",
    params(("listingId" = String, Path, description = "ID do anúncio")),
    request_body = UpdateStorageListingRequest,
    responses(
        (status = 200, description = "Anúncio atualizado", body = StorageListing),
        (status = 400, description = "ID inválido"),
        (status = 403, description = "Anúncio de outro gerente"),
        (status = 404, description = "Anúncio não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_listing(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    _guard: RequireRole<ManagerRole>,
    Path(listing_id): Path<String>,
    WithRejection(Json(payload), _): WithRejection<Json<UpdateStorageListingRequest>, ApiError>,
) -> Result<impl IntoResponse, ApiError> {
    let listing_id = parse_positive_id(&listing_id, "listingId")
        .map_err(|e| e.to_api_error(app_state.is_production))?;

    let listing = app_state
        .listing_service
        .update_for_manager(user.0.id, listing_id, payload)
        .await
        .map_err(|e| e.to_api_error(app_state.is_production))?;

    Ok((StatusCode::OK, Json(listing)))
}

// ---
// Handler: remoção definitiva (gerente)
// ---
#[utoipa::path(
    delete,
    path = "/manager/storage-listings/{listingId}",
    tag = "Storage Listings",
    params(("listingId" = String, Path, description = "ID do anúncio")),
    responses(
        (status = 200, description = "Anúncio removido"),
        (status = 400, description = "ID inválido"),
        (status = 403, description = "Anúncio de outro gerente"),
        (status = 404, description = "Anúncio não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_listing(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    _guard: RequireRole<ManagerRole>,
    Path(listing_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let listing_id = parse_positive_id(&listing_id, "listingId")
        .map_err(|e| e.to_api_error(app_state.is_production))?;

    app_state
        .listing_service
        .delete_for_manager(user.0.id, listing_id)
        .await
        .map_err(|e| e.to_api_error(app_state.is_production))?;

    Ok((StatusCode::OK, Json(json!({ "success": true }))))
}

// ---
// Handler: vitrine de uma cozinha (chef)
// ---
#[utoipa::path(
    get,
    path = "/chef/kitchens/{kitchenId}/storage-listings",
    tag = "Storage Listings",
    params(("kitchenId" = String, Path, description = "ID da cozinha")),
    responses(
        (status = 200, description = "Anúncios aprovados e ativos da cozinha", body = Vec<StorageListing>),
        (status = 400, description = "ID inválido")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_visible_listings(
    State(app_state): State<AppState>,
    _guard: RequireRole<ChefRole>,
    Path(kitchen_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let kitchen_id = parse_positive_id(&kitchen_id, "kitchenId")
        .map_err(|e| e.to_api_error(app_state.is_production))?;

    // Qualquer chef autenticado pode consultar qualquer cozinha; cozinha
    // inexistente responde lista vazia, não 404.
    let listings = app_state
        .listing_service
        .list_visible_for_chef(kitchen_id)
        .await
        .map_err(|e| e.to_api_error(app_state.is_production))?;

    Ok((StatusCode::OK, Json(listings)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aceita_inteiros_positivos() {
        assert_eq!(parse_positive_id("12", "kitchenId").unwrap(), 12);
        assert_eq!(parse_positive_id("1", "listingId").unwrap(), 1);
    }

    #[test]
    fn rejeita_nao_numericos() {
        assert!(parse_positive_id("abc", "kitchenId").is_err());
        assert!(parse_positive_id("12x", "kitchenId").is_err());
        assert!(parse_positive_id("", "kitchenId").is_err());
        assert!(parse_positive_id("1.5", "kitchenId").is_err());
    }

    #[test]
    fn rejeita_zero_e_negativos() {
        assert!(parse_positive_id("0", "kitchenId").is_err());
        assert!(parse_positive_id("-3", "kitchenId").is_err());
    }

    fn create_payload(
        kitchen_id: Option<i64>,
        name: Option<&str>,
        storage_type: Option<&str>,
        pricing_model: Option<&str>,
        base_price: Option<Decimal>,
    ) -> CreateListingPayload {
        CreateListingPayload {
            kitchen_id,
            name: name.map(String::from),
            storage_type: storage_type.map(String::from),
            pricing_model: pricing_model.map(String::from),
            base_price,
            overstay_grace_period_days: None,
            overstay_penalty_rate: None,
            overstay_max_penalty_days: None,
            overstay_policy_text: None,
        }
    }

    #[test]
    fn payload_completo_passa_na_validacao() {
        let payload = create_payload(
            Some(12),
            Some("Freezer A"),
            Some("freezer"),
            Some("daily"),
            Some(Decimal::new(2000, 2)),
        );
        assert!(payload.validate().is_ok());
    }

    #[test]
    fn criacao_exige_cada_campo_obrigatorio() {
        // A validação roda antes de qualquer chamada ao service: payload
        // inválido nunca chega ao repositório.
        let price = Decimal::new(2000, 2);
        let faltando = [
            create_payload(None, Some("Freezer A"), Some("freezer"), Some("daily"), Some(price)),
            create_payload(Some(12), None, Some("freezer"), Some("daily"), Some(price)),
            create_payload(Some(12), Some("Freezer A"), None, Some("daily"), Some(price)),
            create_payload(Some(12), Some("Freezer A"), Some("freezer"), None, Some(price)),
            create_payload(Some(12), Some("Freezer A"), Some("freezer"), Some("daily"), None),
        ];

        for payload in faltando {
            assert!(payload.validate().is_err());
        }
    }

    #[tokio::test]
    async fn corpo_incompativel_com_payload_vira_400() {
        use axum::{body::Body, http::Request, routing::put, Router};
        use tower::ServiceExt;

        async fn apenas_extrai(
            WithRejection(Json(_), _): WithRejection<Json<UpdateStorageListingRequest>, ApiError>,
        ) -> StatusCode {
            StatusCode::OK
        }

        let app = Router::new().route("/anuncios", put(apenas_extrai));

        // JSON sintaticamente válido, mas isActive não é booleano.
        let response = app
            .oneshot(
                Request::builder()
                    .method("PUT")
                    .uri("/anuncios")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"isActive": "sim"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
