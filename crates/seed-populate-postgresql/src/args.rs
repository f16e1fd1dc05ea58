//! CLI argument definitions for the PostgreSQL seeder.

use clap::{Args, ValueEnum};
use seed_populate::{CommonSeedArgs, MigrationArgs};
use std::fmt;

/// `sslmode` connection parameter.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SslMode {
    #[default]
    Disable,
    Prefer,
    Require,
}

impl SslMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SslMode::Disable => "disable",
            SslMode::Prefer => "prefer",
            SslMode::Require => "require",
        }
    }
}

impl fmt::Display for SslMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// PostgreSQL connection arguments.
#[derive(Args, Clone, Debug)]
pub struct PostgreSQLConnectionArgs {
    /// Database host
    #[arg(long = "pg-host", env = "POSTGRES_HOST", default_value = "localhost")]
    pub host: String,

    /// Database port
    #[arg(long = "pg-port", env = "POSTGRES_PORT", default_value = "5432")]
    pub port: u16,

    /// Database user
    #[arg(long = "pg-user", env = "POSTGRES_USER", default_value = "postgres")]
    pub user: String,

    /// Database password
    #[arg(
        long = "pg-password",
        env = "POSTGRES_PASSWORD",
        default_value = "",
        hide_env_values = true
    )]
    pub password: String,

    /// Database name
    #[arg(long = "pg-dbname", env = "POSTGRES_DB", default_value = "postgres")]
    pub dbname: String,

    /// TLS mode (only `disable` and `prefer` work without TLS support)
    #[arg(long = "pg-sslmode", env = "POSTGRES_SSLMODE", value_enum, default_value_t = SslMode::Disable)]
    pub sslmode: SslMode,
}

impl Default for PostgreSQLConnectionArgs {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 5432,
            user: "postgres".to_string(),
            password: String::new(),
            dbname: "postgres".to_string(),
            sslmode: SslMode::Disable,
        }
    }
}

impl PostgreSQLConnectionArgs {
    /// `key=value` connection string accepted by `tokio_postgres::connect`.
    pub fn connection_string(&self) -> String {
        self.format(&self.password)
    }

    /// Connection string with the password masked, for logging.
    pub fn masked(&self) -> String {
        self.format("***")
    }

    fn format(&self, password: &str) -> String {
        format!(
            "user={} password={} dbname={} host={} port={} sslmode={}",
            quote(&self.user),
            quote(password),
            quote(&self.dbname),
            quote(&self.host),
            self.port,
            self.sslmode
        )
    }
}

/// Quote a connection-string value when it is empty or contains spaces or quotes.
fn quote(value: &str) -> String {
    if !value.is_empty() && !value.contains([' ', '\'', '\\']) {
        return value.to_string();
    }
    let escaped = value.replace('\\', "\\\\").replace('\'', "\\'");
    format!("'{escaped}'")
}

/// PostgreSQL-specific seed arguments.
#[derive(Args, Clone, Debug)]
pub struct PostgreSQLSeedArgs {
    #[command(flatten)]
    pub connection: PostgreSQLConnectionArgs,

    #[command(flatten)]
    pub migrations: MigrationArgs,

    #[command(flatten)]
    pub common: CommonSeedArgs,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_string() {
        let args = PostgreSQLConnectionArgs {
            password: "secret".to_string(),
            dbname: "forum".to_string(),
            ..Default::default()
        };

        assert_eq!(
            args.connection_string(),
            "user=postgres password=secret dbname=forum host=localhost port=5432 sslmode=disable"
        );
    }

    #[test]
    fn test_masked_hides_password() {
        let args = PostgreSQLConnectionArgs {
            password: "secret".to_string(),
            ..Default::default()
        };

        let masked = args.masked();
        assert!(!masked.contains("secret"));
        assert!(masked.contains("password=***"));
    }

    #[test]
    fn test_quoting() {
        assert_eq!(quote("plain"), "plain");
        assert_eq!(quote(""), "''");
        assert_eq!(quote("two words"), "'two words'");
        assert_eq!(quote("it's"), "'it\\'s'");
    }
}
