// src/docs.rs

use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::OpenApi;

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::register,
        handlers::auth::login,
        handlers::auth::get_me,

        // --- Storage Listings (gerente) ---
        handlers::listings::list_kitchen_listings,
        handlers::listings::get_listing,
        handlers::listings::create_listing,
        handlers::listings::update_listing,
        handlers::listings::delete_listing,

        // --- Storage Listings (chef) ---
        handlers::listings::list_visible_listings,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::UserRole,
            models::auth::User,
            models::auth::RegisterUserPayload,
            models::auth::LoginUserPayload,
            models::auth::AuthResponse,

            // --- Catálogo ---
            models::catalog::Location,
            models::catalog::Kitchen,
            models::catalog::OverstayDefaults,

            // --- Anúncios ---
            models::listing::StorageListing,
            models::listing::UpdateStorageListingRequest,
            handlers::listings::CreateListingPayload,
        )
    ),
    tags(
        (name = "Auth", description = "Autenticação e Registro"),
        (name = "Storage Listings", description = "Anúncios de armazenamento nas cozinhas")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}
