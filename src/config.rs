use anyhow::Context;
use serde::Deserialize;

/// How the login token travels back to the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenTransport {
    /// Token only in the response body, presented back as `Authorization: Bearer`.
    Bearer,
    /// Token also set as an httpOnly cookie, accepted when the header is absent.
    Cookie,
}

impl TokenTransport {
    fn parse(raw: &str) -> anyhow::Result<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "bearer" => Ok(Self::Bearer),
            "cookie" => Ok(Self::Cookie),
            other => anyhow::bail!("AUTH_TRANSPORT must be `bearer` or `cookie`, got `{other}`"),
        }
    }

    pub fn default_ttl_minutes(self) -> i64 {
        match self {
            TokenTransport::Bearer => 60,
            TokenTransport::Cookie => 60 * 24 * 7,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub ttl_minutes: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt: JwtConfig,
    pub transport: TokenTransport,
    pub production: bool,
    pub host: String,
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key/value source; `from_env` passes the process environment.
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let database_url = get("DATABASE_URL").context("DATABASE_URL must be set")?;

        let secret = get("JWT_SECRET").context("JWT_SECRET must be set")?;
        anyhow::ensure!(!secret.trim().is_empty(), "JWT_SECRET must not be empty");

        let transport = match get("AUTH_TRANSPORT") {
            Some(v) => TokenTransport::parse(&v)?,
            None => TokenTransport::Bearer,
        };

        let ttl_minutes = match get("JWT_TTL_MINUTES") {
            Some(v) => {
                let minutes = v
                    .trim()
                    .parse::<i64>()
                    .with_context(|| format!("JWT_TTL_MINUTES is not a number: {v}"))?;
                anyhow::ensure!(minutes > 0, "JWT_TTL_MINUTES must be positive");
                minutes
            }
            None => transport.default_ttl_minutes(),
        };

        let jwt = JwtConfig {
            secret,
            issuer: get("JWT_ISSUER").unwrap_or_else(|| "routekeeper".into()),
            audience: get("JWT_AUDIENCE").unwrap_or_else(|| "routekeeper-users".into()),
            ttl_minutes,
        };

        let port = get("APP_PORT")
            .or_else(|| get("PORT"))
            .unwrap_or_else(|| "8080".into());
        let port = port
            .parse::<u16>()
            .with_context(|| format!("invalid listen port: {port}"))?;

        Ok(Self {
            database_url,
            jwt,
            transport,
            production: get("APP_ENV")
                .map(|v| v.eq_ignore_ascii_case("production"))
                .unwrap_or(false),
            host: get("APP_HOST").unwrap_or_else(|| "0.0.0.0".into()),
            port,
        })
    }
}
