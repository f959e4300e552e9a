use anyhow::{Context, Result, bail};

pub const DEFAULT_DATABASE_URL: &str = "sqlite://club.db";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub max_connections: u32,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
            max_connections: match std::env::var("DATABASE_MAX_CONNECTIONS") {
                Ok(value) => parse_max_connections(&value)?,
                Err(_) => DEFAULT_MAX_CONNECTIONS,
            },
        })
    }

    /// Database location without anything that looks like credentials
    pub fn redacted_database_url(&self) -> &str {
        self.database_url
            .split('@')
            .next_back()
            .unwrap_or("unknown")
    }
}

fn parse_max_connections(value: &str) -> Result<u32> {
    let max_connections: u32 = value
        .trim()
        .parse()
        .context("DATABASE_MAX_CONNECTIONS must be a number")?;
    if max_connections == 0 {
        bail!("DATABASE_MAX_CONNECTIONS must be at least 1");
    }
    Ok(max_connections)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redacted_database_url() {
        let config = Config {
            database_url: "sqlite://user:secret@/var/lib/club.db".to_string(),
            max_connections: 1,
        };
        assert_eq!(config.redacted_database_url(), "/var/lib/club.db");

        let config = Config {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            max_connections: 1,
        };
        assert_eq!(config.redacted_database_url(), DEFAULT_DATABASE_URL);
    }

    #[test]
    fn test_parse_max_connections() {
        assert_eq!(parse_max_connections("8").unwrap(), 8);
        assert_eq!(parse_max_connections(" 1 ").unwrap(), 1);

        assert!(parse_max_connections("0").is_err());
        assert!(parse_max_connections("-1").is_err());
        assert!(parse_max_connections("five").is_err());
    }
}
