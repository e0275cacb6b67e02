use std::env;
use std::fmt;

const DEFAULT_JWT_EXPIRATION_SECS: i64 = 3600;
const MAX_JWT_EXPIRATION_SECS: i64 = 30 * 24 * 60 * 60;
const DEFAULT_SYNC_INTERVAL_SECS: u64 = 15 * 60;
const MIN_SYNC_INTERVAL_SECS: u64 = 60;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{key} has an invalid value '{value}'")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub cors_allowed_origins: Vec<String>,
    pub jwt: JwtConfig,
    pub catalog: CatalogConfig,
    pub sync: SyncConfig,
}

#[derive(Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub expiration_secs: i64,
}

// Never print the signing secret
impl fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"***")
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .field("expiration_secs", &self.expiration_secs)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct CatalogConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone)]
pub struct SyncConfig {
    pub enabled: bool,
    pub interval_secs: u64,
}

impl AppConfig {
    /// Reads the configuration from the process environment.
    /// Call `dotenv().ok()` first if a `.env` file should be honoured.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let database_url = get("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;

        // No default secret
        let secret = get("JWT_SECRET").ok_or(ConfigError::Missing("JWT_SECRET"))?;

        let expiration_secs: i64 = parse_or(&get, "JWT_EXPIRATION_SECS", DEFAULT_JWT_EXPIRATION_SECS)?;
        if !(1..=MAX_JWT_EXPIRATION_SECS).contains(&expiration_secs) {
            return Err(ConfigError::Invalid {
                key: "JWT_EXPIRATION_SECS",
                value: expiration_secs.to_string(),
            });
        }

        let enabled = match get("CATALOG_SYNC_ENABLED") {
            None => true,
            Some(v) => match v.to_lowercase().as_str() {
                "true" | "1" | "yes" => true,
                "false" | "0" | "no" => false,
                _ => {
                    return Err(ConfigError::Invalid {
                        key: "CATALOG_SYNC_ENABLED",
                        value: v,
                    })
                }
            },
        };

        let interval_secs: u64 =
            parse_or(&get, "CATALOG_SYNC_INTERVAL_SECS", DEFAULT_SYNC_INTERVAL_SECS)?;

        let cors_allowed_origins = get("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|| "http://localhost:3000".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Ok(AppConfig {
            host: get("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_or(&get, "PORT", 3000)?,
            database_url,
            cors_allowed_origins,
            jwt: JwtConfig {
                secret,
                issuer: get("JWT_ISSUER").unwrap_or_else(|| "movie-catalog-service".to_string()),
                audience: get("JWT_AUDIENCE").unwrap_or_else(|| "movie-catalog-api".to_string()),
                expiration_secs,
            },
            catalog: CatalogConfig {
                base_url: get("SWAPI_BASE_URL")
                    .unwrap_or_else(|| "https://swapi.dev/api".to_string())
                    .trim_end_matches('/')
                    .to_string(),
                timeout_secs: parse_or(&get, "SWAPI_TIMEOUT_SECS", 30)?,
            },
            sync: SyncConfig {
                enabled,
                interval_secs: interval_secs.max(MIN_SYNC_INTERVAL_SECS),
            },
        })
    }
}

fn parse_or<T, G>(get: &G, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    G: Fn(&str) -> Option<String>,
{
    match get(key) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
    }
}
