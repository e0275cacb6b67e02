use actix_web::{dev::Payload, http::header::AUTHORIZATION, web, FromRequest, HttpRequest};
use std::future::{ready, Ready};
use std::marker::PhantomData;

use crate::models::Role;
use crate::services::{Claims, JwtKeys};
use crate::state::AppState;
use crate::utils::error::AppError;

/// Outcome of a successful role check
#[derive(Debug, Clone, PartialEq)]
pub enum Access {
    /// Endpoint declares no required role
    Open,
    Granted(Claims),
}

/// Extracts the token from `Bearer <token>`
pub fn bearer_token(header: Option<&str>) -> Result<&str, AppError> {
    let header = header
        .ok_or_else(|| AppError::Unauthorized("Missing authorization header".to_string()))?;

    match header.strip_prefix("Bearer ") {
        Some(token) if !token.trim().is_empty() => Ok(token.trim()),
        _ => Err(AppError::Unauthorized("Invalid token format".to_string())),
    }
}

/// Role guard. ADMIN satisfies every requirement.
pub fn authorize(header: Option<&str>, required: &[Role], keys: &JwtKeys) -> Result<Access, AppError> {
    if required.is_empty() {
        return Ok(Access::Open);
    }

    let claims = keys.verify(bearer_token(header)?)?;

    if claims.role == Role::Admin || required.contains(&claims.role) {
        Ok(Access::Granted(claims))
    } else {
        log::warn!(
            "⛔ {} ({}) lacks required role {:?}",
            claims.email,
            claims.role,
            required
        );
        Err(AppError::Forbidden("Insufficient permissions".to_string()))
    }
}

/// Role set declared by an endpoint
pub trait RoleRequirement {
    const ROLES: &'static [Role];
}

pub struct AdminOnly;

impl RoleRequirement for AdminOnly {
    const ROLES: &'static [Role] = &[Role::Admin];
}

pub struct UserOrAbove;

impl RoleRequirement for UserOrAbove {
    const ROLES: &'static [Role] = &[Role::User];
}

/// Handler argument that runs the role guard before the handler body.
/// Put it first so it is checked before the request body is parsed.
pub struct Authorized<R: RoleRequirement> {
    pub access: Access,
    _requirement: PhantomData<R>,
}

impl<R: RoleRequirement> Authorized<R> {
    pub fn claims(&self) -> Option<&Claims> {
        match &self.access {
            Access::Granted(claims) => Some(claims),
            Access::Open => None,
        }
    }
}

impl<R: RoleRequirement> FromRequest for Authorized<R> {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let result = match req.app_data::<web::Data<AppState>>() {
            Some(state) => {
                let header = req.headers().get(AUTHORIZATION).and_then(|v| v.to_str().ok());
                authorize(header, R::ROLES, &state.jwt).map(|access| Authorized {
                    access,
                    _requirement: PhantomData,
                })
            }
            None => Err(AppError::Internal("Application state not configured".to_string())),
        };

        ready(result)
    }
}
