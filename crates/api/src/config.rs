use std::path::PathBuf;

/// Server configuration loaded from environment variables.
///
/// All fields except the secrets have defaults suitable for local
/// development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// The single administrator's email address. The Access Guard compares
    /// resolved session emails against this, case-sensitively.
    pub admin_email: String,
    /// Directory of built frontend assets served as the router fallback.
    pub static_dir: PathBuf,
    /// Session token verification settings.
    pub session: SessionConfig,
    /// Identity provider API settings.
    pub identity: IdentityConfig,
}

/// Settings for validating the identity provider's session tokens.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// HMAC-SHA256 secret shared with the identity provider.
    pub secret: String,
}

/// Settings for the identity provider's backend API.
#[derive(Debug, Clone)]
pub struct IdentityConfig {
    /// Base URL of the provider's REST API.
    pub base_url: String,
    /// Server-side API key.
    pub secret_key: String,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                 |
    /// |------------------------|-------------------------|
    /// | `HOST`                 | `0.0.0.0`               |
    /// | `PORT`                 | `3000`                  |
    /// | `CORS_ORIGINS`         | `http://localhost:3000` |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                    |
    /// | `ADMIN_EMAIL`          | **required**            |
    /// | `STATIC_DIR`           | `public`                |
    /// | `SESSION_SECRET`       | **required**            |
    /// | `IDENTITY_API_URL`     | `https://api.clerk.com` |
    /// | `IDENTITY_SECRET_KEY`  | **required**            |
    ///
    /// # Panics
    ///
    /// Panics if a required variable is missing or a numeric one is
    /// malformed; configuration errors should stop startup.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let admin_email =
            std::env::var("ADMIN_EMAIL").expect("ADMIN_EMAIL must be set in the environment");
        assert!(!admin_email.is_empty(), "ADMIN_EMAIL must not be empty");

        let static_dir = PathBuf::from(std::env::var("STATIC_DIR").unwrap_or_else(|_| "public".into()));

        let secret = std::env::var("SESSION_SECRET")
            .expect("SESSION_SECRET must be set in the environment");
        assert!(!secret.is_empty(), "SESSION_SECRET must not be empty");

        let identity = IdentityConfig {
            base_url: std::env::var("IDENTITY_API_URL")
                .unwrap_or_else(|_| "https://api.clerk.com".into()),
            secret_key: std::env::var("IDENTITY_SECRET_KEY")
                .expect("IDENTITY_SECRET_KEY must be set in the environment"),
        };

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            admin_email,
            static_dir,
            session: SessionConfig { secret },
            identity,
        }
    }
}
