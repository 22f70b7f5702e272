// src/middleware/rbac.rs

use axum::{
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
};
use std::marker::PhantomData;

use crate::{common::error::ApiError, models::auth::User, models::auth::UserRole};

/// 1. O Trait que define o que é um Papel exigido por uma rota
pub trait RoleDef: Send + Sync + 'static {
    fn role() -> UserRole;
    fn label() -> &'static str;
}

/// 2. O Extractor (Guardião)
pub struct RequireRole<T>(pub PhantomData<T>);

// 3. Implementação do FromRequestParts

impl<T, S> FromRequestParts<S> for RequireRole<T>
where
    T: RoleDef,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // A. Extrai o usuário injetado pelo auth_guard
        let user = parts.extensions.get::<User>().ok_or(ApiError::new(
            StatusCode::UNAUTHORIZED,
            "Usuário não autenticado.",
        ))?;

        // B. Compara o papel do usuário com o papel exigido
        if user.role != T::role() {
            return Err(ApiError::new(
                StatusCode::FORBIDDEN,
                format!("Acesso restrito ao papel '{}'.", T::label()),
            ));
        }

        Ok(RequireRole(PhantomData))
    }
}

// ---
// DEFINIÇÃO DOS PAPÉIS (TIPOS)
// ---

pub struct ManagerRole;
impl RoleDef for ManagerRole {
    fn role() -> UserRole {
        UserRole::Manager
    }
    fn label() -> &'static str {
        "manager"
    }
}

pub struct ChefRole;
impl RoleDef for ChefRole {
    fn role() -> UserRole {
        UserRole::Chef
    }
    fn label() -> &'static str {
        "chef"
    }
}
