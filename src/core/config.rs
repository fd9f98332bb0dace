use std::env;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub admin: AdminConfig,
    pub session: SessionConfig,
    pub firebase: FirebaseConfig,
    pub geocoding: GeocodingConfig,
    pub boundary: BoundaryConfig,
    pub swagger: SwaggerConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
}

/// The single shared admin credential pair guarding the dashboard
#[derive(Clone)]
pub struct AdminConfig {
    pub username: String,
    pub password: String,
}

// Keep the password out of logs
impl std::fmt::Debug for AdminConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminConfig")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub ttl: Duration,
    /// Adds the `Secure` attribute to the session cookie (enable behind HTTPS)
    pub cookie_secure: bool,
}

/// Firebase Realtime Database connection used as the trainer record source
#[derive(Clone)]
pub struct FirebaseConfig {
    /// Database root, e.g. https://<project>-default-rtdb.<region>.firebasedatabase.app
    pub database_url: String,
    /// Node holding one child per trainer
    pub trainers_path: String,
    /// Database secret or ID token passed as the `auth` query parameter
    pub auth_token: Option<String>,
}

impl std::fmt::Debug for FirebaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FirebaseConfig")
            .field("database_url", &self.database_url)
            .field("trainers_path", &self.trainers_path)
            .field("auth_token", &self.auth_token.as_ref().map(|_| "***"))
            .finish()
    }
}

/// Reverse geocoding providers and per-render memoization
#[derive(Clone)]
pub struct GeocodingConfig {
    /// API Ninjas key for the primary provider; the primary is skipped when absent
    pub api_ninjas_key: Option<String>,
    pub api_ninjas_base_url: String,
    pub nominatim_base_url: String,
    pub user_agent: String,
    pub timeout: Option<Duration>,
    pub memoize: bool,
    /// Decimal places used to build the memo key
    pub memo_precision: u32,
}

impl std::fmt::Debug for GeocodingConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeocodingConfig")
            .field("api_ninjas_key", &self.api_ninjas_key.as_ref().map(|_| "***"))
            .field("api_ninjas_base_url", &self.api_ninjas_base_url)
            .field("nominatim_base_url", &self.nominatim_base_url)
            .field("user_agent", &self.user_agent)
            .field("timeout", &self.timeout)
            .field("memoize", &self.memoize)
            .field("memo_precision", &self.memo_precision)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct BoundaryConfig {
    /// GeoJSON FeatureCollection with one feature per state
    pub file: String,
    /// Feature property holding the state name
    pub name_property: String,
}

#[derive(Debug, Clone)]
pub struct SwaggerConfig {
    pub username: Option<String>,
    pub password: Option<String>,
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        // Load .env file if exists, ignore if not found (optional for production)
        if let Err(e) = dotenvy::dotenv() {
            if !e.to_string().contains("not found") {
                eprintln!("Warning: Error loading .env file: {}", e);
            }
        }

        Ok(Config {
            app: AppConfig::from_env()?,
            admin: AdminConfig::from_env()?,
            session: SessionConfig::from_env()?,
            firebase: FirebaseConfig::from_env()?,
            geocoding: GeocodingConfig::from_env()?,
            boundary: BoundaryConfig::from_env()?,
            swagger: SwaggerConfig::from_env()?,
        })
    }
}

/// Reads an optional variable, treating an empty value as unset
fn optional_var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn parse_bool(key: &str, raw: &str) -> Result<bool, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(format!("{} must be a boolean (true/false)", key)),
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, String> {
        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|e| format!("Invalid PORT: {}", e))?;

        // Parse CORS allowed origins from comma-separated string
        let cors_allowed_origins = env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Ok(Self {
            host,
            port,
            cors_allowed_origins,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl AdminConfig {
    pub fn from_env() -> Result<Self, String> {
        let username = optional_var("ADMIN_USERNAME")
            .ok_or_else(|| "ADMIN_USERNAME environment variable is required".to_string())?;
        let password = optional_var("ADMIN_PASSWORD")
            .ok_or_else(|| "ADMIN_PASSWORD environment variable is required".to_string())?;

        Ok(Self { username, password })
    }
}

impl SessionConfig {
    const DEFAULT_TTL_SECS: u64 = 12 * 60 * 60; // 12 hours

    pub fn from_env() -> Result<Self, String> {
        let ttl_secs = env::var("SESSION_TTL_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_TTL_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "SESSION_TTL_SECS must be a valid number".to_string())?;

        let cookie_secure = match optional_var("SESSION_COOKIE_SECURE") {
            Some(raw) => parse_bool("SESSION_COOKIE_SECURE", &raw)?,
            None => false,
        };

        Ok(Self {
            ttl: Duration::from_secs(ttl_secs),
            cookie_secure,
        })
    }
}

impl FirebaseConfig {
    pub fn from_env() -> Result<Self, String> {
        let database_url = optional_var("FIREBASE_DATABASE_URL")
            .ok_or_else(|| "FIREBASE_DATABASE_URL environment variable is required".to_string())?
            .trim_end_matches('/')
            .to_string();

        let trainers_path = env::var("FIREBASE_TRAINERS_PATH")
            .unwrap_or_else(|_| "trainers".to_string())
            .trim_matches('/')
            .to_string();

        if trainers_path.is_empty() {
            return Err("FIREBASE_TRAINERS_PATH must not be empty".to_string());
        }

        Ok(Self {
            database_url,
            trainers_path,
            auth_token: optional_var("FIREBASE_AUTH_TOKEN"),
        })
    }
}

impl GeocodingConfig {
    const DEFAULT_API_NINJAS_BASE_URL: &'static str = "https://api.api-ninjas.com";
    const DEFAULT_NOMINATIM_BASE_URL: &'static str = "https://nominatim.openstreetmap.org";
    const DEFAULT_USER_AGENT: &'static str = "TrainerLocator/1.0 (trainer-location-dashboard)";
    const DEFAULT_MEMO_PRECISION: u32 = 4; // ~11 m
    const MAX_MEMO_PRECISION: u32 = 10;

    pub fn from_env() -> Result<Self, String> {
        let timeout = match optional_var("GEOCODE_TIMEOUT_SECS") {
            Some(raw) => Some(Duration::from_secs(raw.parse::<u64>().map_err(|_| {
                "GEOCODE_TIMEOUT_SECS must be a valid number".to_string()
            })?)),
            None => None,
        };

        let memoize = match optional_var("GEOCODE_MEMOIZE") {
            Some(raw) => parse_bool("GEOCODE_MEMOIZE", &raw)?,
            None => true,
        };

        let memo_precision = env::var("GEOCODE_MEMO_PRECISION")
            .unwrap_or_else(|_| Self::DEFAULT_MEMO_PRECISION.to_string())
            .parse::<u32>()
            .map_err(|_| "GEOCODE_MEMO_PRECISION must be a valid number".to_string())?;

        if memo_precision > Self::MAX_MEMO_PRECISION {
            return Err(format!(
                "GEOCODE_MEMO_PRECISION must be at most {}",
                Self::MAX_MEMO_PRECISION
            ));
        }

        Ok(Self {
            api_ninjas_key: optional_var("API_NINJAS_KEY"),
            api_ninjas_base_url: optional_var("API_NINJAS_BASE_URL")
                .unwrap_or_else(|| Self::DEFAULT_API_NINJAS_BASE_URL.to_string()),
            nominatim_base_url: optional_var("NOMINATIM_BASE_URL")
                .unwrap_or_else(|| Self::DEFAULT_NOMINATIM_BASE_URL.to_string()),
            user_agent: optional_var("GEOCODE_USER_AGENT")
                .unwrap_or_else(|| Self::DEFAULT_USER_AGENT.to_string()),
            timeout,
            memoize,
            memo_precision,
        })
    }
}

impl BoundaryConfig {
    pub fn from_env() -> Result<Self, String> {
        Ok(Self {
            file: optional_var("BOUNDARY_FILE")
                .unwrap_or_else(|| "data/india_states.geojson".to_string()),
            name_property: optional_var("BOUNDARY_NAME_PROPERTY")
                .unwrap_or_else(|| "ST_NM".to_string()),
        })
    }
}

impl SwaggerConfig {
    pub fn from_env() -> Result<Self, String> {
        // Only use credentials if they are non-empty
        let username = optional_var("SWAGGER_USERNAME");
        let password = optional_var("SWAGGER_PASSWORD");
        let title = env::var("SWAGGER_TITLE").unwrap_or_else(|_| "Trainer Locator API".to_string());
        let version = env::var("SWAGGER_VERSION").unwrap_or_else(|_| "0.1.0".to_string());
        let description = env::var("SWAGGER_DESCRIPTION")
            .unwrap_or_else(|_| "API documentation for the trainer location dashboard".to_string());

        Ok(Self {
            username,
            password,
            title,
            version,
            description,
        })
    }

    /// Returns credentials in "username:password" format if auth is enabled
    pub fn credentials(&self) -> Option<String> {
        match (&self.username, &self.password) {
            (Some(user), Some(pass)) => Some(format!("{}:{}", user, pass)),
            _ => None,
        }
    }
}
