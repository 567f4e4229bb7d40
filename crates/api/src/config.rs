use std::env;
use std::str::FromStr;

/// Which column the `emails` table treats as the deduplication key.
///
/// The legacy schema keys on the client-supplied id, so the same email
/// can subscribe repeatedly under fresh ids; the apparent product
/// intent is one subscription per address. Neither reading is assumed
/// correct — the operator picks one explicitly via `LEAD_UNIQUENESS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeadUniqueness {
    /// `unique-by-id`: only the primary key dedups (legacy behavior).
    ById,
    /// `unique-by-email`: one subscription per email address.
    ByEmail,
}

impl FromStr for LeadUniqueness {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "unique-by-id" => Ok(LeadUniqueness::ById),
            "unique-by-email" => Ok(LeadUniqueness::ByEmail),
            other => Err(format!(
                "expected 'unique-by-id' or 'unique-by-email', got '{other}'"
            )),
        }
    }
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Server host to bind to.
    pub host: String,
    /// Server port to bind to.
    pub port: u16,
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// Maximum database connections in the pool.
    pub db_max_connections: u32,
    /// Minimum database connections in the pool.
    pub db_min_connections: u32,
    /// Event bus channel capacity.
    pub event_bus_capacity: usize,
    /// Deduplication policy for the subscriber ledger.
    pub lead_uniqueness: LeadUniqueness,
    /// Log level (e.g., "info", "debug", "trace").
    pub log_level: String,
}

impl AppConfig {
    /// Load configuration from environment variables with sensible defaults.
    pub fn from_env() -> Result<Self, env::VarError> {
        Ok(Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "3030".to_string())
                .parse()
                .expect("PORT must be a valid u16"),
            database_url: env::var("DATABASE_URL")?,
            db_max_connections: env::var("DB_MAX_CONNECTIONS")
                .unwrap_or_else(|_| "20".to_string())
                .parse()
                .expect("DB_MAX_CONNECTIONS must be a valid u32"),
            db_min_connections: env::var("DB_MIN_CONNECTIONS")
                .unwrap_or_else(|_| "5".to_string())
                .parse()
                .expect("DB_MIN_CONNECTIONS must be a valid u32"),
            event_bus_capacity: env::var("EVENT_BUS_CAPACITY")
                .unwrap_or_else(|_| "1024".to_string())
                .parse()
                .expect("EVENT_BUS_CAPACITY must be a valid usize"),
            lead_uniqueness: env::var("LEAD_UNIQUENESS")
                .map(|v| {
                    v.parse()
                        .expect("LEAD_UNIQUENESS must be unique-by-id or unique-by-email")
                })
                .unwrap_or(LeadUniqueness::ById),
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
        })
    }

    /// Build the socket address string.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniqueness_parses_both_policies() {
        assert_eq!(
            "unique-by-id".parse::<LeadUniqueness>(),
            Ok(LeadUniqueness::ById)
        );
        assert_eq!(
            "unique-by-email".parse::<LeadUniqueness>(),
            Ok(LeadUniqueness::ByEmail)
        );
        assert!("by-vibes".parse::<LeadUniqueness>().is_err());
    }
}
