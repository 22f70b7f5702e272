// src/config.rs

use sqlx::{postgres::PgPoolOptions, PgPool};
use std::{env, time::Duration};

use crate::{
    db::{CatalogRepository, ListingRepository, UserRepository},
    services::{auth::AuthService, listing_service::StorageListingService},
};

#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    // Lido uma única vez na inicialização; controla a verbosidade dos erros 500.
    pub is_production: bool,
    pub auth_service: AuthService,
    pub listing_service: StorageListingService,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL deve ser definida");
        let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET deve ser definido");
        let is_production = env::var("APP_ENV")
            .map(|v| v == "production")
            .unwrap_or(false);

        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        // --- Monta o gráfico de dependências ---
        let user_repo = UserRepository::new(db_pool.clone());
        let catalog_repo = CatalogRepository::new(db_pool.clone());
        let listing_repo = ListingRepository::new(db_pool.clone());

        let auth_service = AuthService::new(user_repo, jwt_secret);
        let listing_service = StorageListingService::new(listing_repo, catalog_repo);

        Ok(Self {
            db_pool,
            is_production,
            auth_service,
            listing_service,
        })
    }
}
