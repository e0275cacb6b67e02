use bcrypt::{hash, verify};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::config::JwtConfig;
use crate::database::UserStore;
use crate::models::{
    LoginRequest, LoginResponse, NewUser, RegisterRequest, RegisterResponse, Role, User, UserInfo,
};
use crate::utils::error::AppError;

/// bcrypt work factor for stored passwords
pub const PASSWORD_HASH_COST: u32 = 10;

const INVALID_CREDENTIALS: &str = "Invalid credentials";

// JWT Claims
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Claims {
    pub sub: String, // user id
    pub email: String,
    pub role: Role,
    pub iat: usize, // issued at
    pub exp: usize, // expiration
    pub jti: String,
    pub aud: String,
    pub iss: String,
}

/// Signing and verification keys plus the claim policy that goes with them
#[derive(Clone)]
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    issuer: String,
    audience: String,
    ttl: Duration,
}

impl JwtKeys {
    pub fn new(config: &JwtConfig) -> Self {
        JwtKeys {
            encoding: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding: DecodingKey::from_secret(config.secret.as_bytes()),
            issuer: config.issuer.clone(),
            audience: config.audience.clone(),
            ttl: Duration::seconds(config.expiration_secs),
        }
    }

    pub fn ttl_secs(&self) -> i64 {
        self.ttl.num_seconds()
    }

    pub fn issue(&self, user: &User) -> Result<String, AppError> {
        self.issue_with_ttl(user, self.ttl)
    }

    fn issue_with_ttl(&self, user: &User, ttl: Duration) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user.id.clone(),
            email: user.email.clone(),
            role: user.role,
            iat: now.timestamp() as usize,
            exp: (now + ttl).timestamp().max(0) as usize,
            jti: Uuid::new_v4().to_string(),
            aud: self.audience.clone(),
            iss: self.issuer.clone(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AppError::Internal(format!("Failed to generate token: {}", e)))
    }

    /// Checks signature, expiry, issuer and audience.
    pub fn verify(&self, token: &str) -> Result<Claims, AppError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[self.audience.as_str()]);
        validation.set_issuer(&[self.issuer.as_str()]);

        decode::<Claims>(token, &self.decoding, &validation)
            .map(|data| data.claims)
            .map_err(|e| {
                log::debug!("Token rejected: {}", e);
                AppError::Unauthorized("Invalid or expired token".to_string())
            })
    }
}

pub fn hash_password(password: &str) -> Result<String, AppError> {
    hash(password, PASSWORD_HASH_COST)
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

// User registration
pub async fn register(
    users: &dyn UserStore,
    request: &RegisterRequest,
) -> Result<RegisterResponse, AppError> {
    // Validate the email as it will be stored
    let request = RegisterRequest {
        email: normalize_email(&request.email),
        password: request.password.clone(),
        role: request.role,
    };
    request.validate()?;

    let RegisterRequest {
        email,
        password,
        role,
    } = request;
    let role = role.unwrap_or_default();

    if users.find_by_email(&email).await?.is_some() {
        return Err(AppError::Conflict("User already exists".to_string()));
    }

    let password_hash = hash_password(&password)?;

    // The store maps a unique-index race to Conflict as well
    let user = users
        .create(NewUser {
            email,
            password_hash,
            role,
        })
        .await?;

    log::info!("✅ User registered successfully: {} ({})", user.email, user.role);

    Ok(RegisterResponse {
        message: "User registered successfully".to_string(),
        user: UserInfo::from(&user),
    })
}

// User login
pub async fn login(
    users: &dyn UserStore,
    keys: &JwtKeys,
    request: &LoginRequest,
) -> Result<LoginResponse, AppError> {
    request.validate()?;

    let email = normalize_email(&request.email);

    // Unknown email and wrong password must be indistinguishable
    let user = users
        .find_by_email(&email)
        .await?
        .ok_or_else(|| AppError::Unauthorized(INVALID_CREDENTIALS.to_string()))?;

    let valid = verify(&request.password, &user.password_hash)
        .map_err(|e| AppError::Internal(format!("Password verification error: {}", e)))?;

    if !valid {
        return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()));
    }

    let access_token = keys.issue(&user)?;

    Ok(LoginResponse {
        access_token,
        token_type: "Bearer".to_string(),
        expires_in: keys.ttl_secs(),
    })
}
