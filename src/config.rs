use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub access_ttl_hours: i64,
    pub refresh_ttl_days: i64,
}

/// How PUT /profile/links and /profile/shops treat click counters.
///
/// `Merge` keeps the stored counter for any submitted entry whose id matches
/// an existing item; `Full` reproduces blind-replace semantics where the
/// counter becomes whatever the caller supplied (or zero).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReplaceStrategy {
    Full,
    Merge,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt: JwtConfig,
    pub replace_strategy: ReplaceStrategy,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")?;
        let jwt = JwtConfig {
            secret: std::env::var("JWT_SECRET")?,
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "linkpage".into()),
            audience: std::env::var("JWT_AUDIENCE").unwrap_or_else(|_| "linkpage-users".into()),
            access_ttl_hours: std::env::var("JWT_ACCESS_TTL_HOURS")
                .ok()
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or(1),
            refresh_ttl_days: std::env::var("JWT_REFRESH_TTL_DAYS")
                .ok()
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or(7),
        };
        let replace_strategy = match std::env::var("REPLACE_STRATEGY").ok().as_deref() {
            None | Some("merge") => ReplaceStrategy::Merge,
            Some("full") => ReplaceStrategy::Full,
            Some(other) => anyhow::bail!("unsupported REPLACE_STRATEGY: {other}"),
        };
        Ok(Self {
            database_url,
            jwt,
            replace_strategy,
        })
    }
}
