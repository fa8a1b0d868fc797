use std::env;
use std::fmt;
use std::str::FromStr;

use crate::error::AppError;

/// Runtime environment; selects which database name is used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeEnv {
    Prod,
    /// Enforces the `_test` database-name safety rule
    Test,
}

impl FromStr for RuntimeEnv {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "prod" => Ok(Self::Prod),
            "test" => Ok(Self::Test),
            other => Err(AppError::config(format!(
                "unknown runtime env '{other}' (expected prod|test)"
            ))),
        }
    }
}

/// Database engine and storage mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbKind {
    Postgres,
    SqliteFile,
    SqliteMemory,
}

impl DbKind {
    /// Reads `RPS_DB_KIND`, defaulting to Postgres.
    pub fn from_env() -> Result<Self, AppError> {
        match env::var("RPS_DB_KIND") {
            Ok(raw) => raw.parse(),
            Err(_) => Ok(Self::Postgres),
        }
    }

    pub fn is_sqlite(self) -> bool {
        matches!(self, Self::SqliteFile | Self::SqliteMemory)
    }
}

impl FromStr for DbKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "postgres" | "pg" => Ok(Self::Postgres),
            "sqlite-file" | "sqlite" => Ok(Self::SqliteFile),
            "sqlite-memory" | "memory" => Ok(Self::SqliteMemory),
            other => Err(AppError::config(format!(
                "unknown db kind '{other}' (expected postgres|sqlite-file|sqlite-memory)"
            ))),
        }
    }
}

impl fmt::Display for DbKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Postgres => "postgres",
            Self::SqliteFile => "sqlite-file",
            Self::SqliteMemory => "sqlite-memory",
        })
    }
}

/// Per-connection session settings applied from the pool's connect hook.
#[derive(Debug, Clone)]
pub enum DbSettings {
    Sqlite {
        busy_timeout_ms: u32,
    },
    Postgres {
        app_name: String,
        statement_timeout: String,
    },
}

impl DbSettings {
    pub fn for_kind(kind: DbKind) -> Self {
        match kind {
            DbKind::Postgres => Self::Postgres {
                app_name: "rps-backend".to_string(),
                statement_timeout: "5s".to_string(),
            },
            DbKind::SqliteFile | DbKind::SqliteMemory => Self::Sqlite {
                busy_timeout_ms: 5000,
            },
        }
    }

    /// Ordered session statements; values are constants or escaped literals.
    pub fn session_statements(&self) -> Vec<String> {
        match self {
            Self::Sqlite { busy_timeout_ms } => vec![
                "PRAGMA foreign_keys = ON;".to_string(),
                format!("PRAGMA busy_timeout = {busy_timeout_ms};"),
            ],
            Self::Postgres {
                app_name,
                statement_timeout,
            } => vec![
                format!("SET application_name = '{}';", app_name.replace('\'', "''")),
                "SET timezone = 'UTC';".to_string(),
                format!(
                    "SET statement_timeout = '{}';",
                    statement_timeout.replace('\'', "''")
                ),
            ],
        }
    }
}

/// Builds the connection string for the given environment and engine.
pub fn db_url(runtime: RuntimeEnv, kind: DbKind) -> Result<String, AppError> {
    match kind {
        DbKind::Postgres => {
            let host = env::var("POSTGRES_HOST").unwrap_or_else(|_| "localhost".to_string());
            let port = env::var("POSTGRES_PORT").unwrap_or_else(|_| "5432".to_string());
            let db_name = db_name(runtime)?;
            let username = must_var("APP_DB_USER")?;
            let password = must_var("APP_DB_PASSWORD")?;
            Ok(format!(
                "postgresql://{username}:{password}@{host}:{port}/{db_name}"
            ))
        }
        DbKind::SqliteFile => {
            let path = must_var("RPS_SQLITE_PATH")?;
            Ok(format!("sqlite://{path}?mode=rwc"))
        }
        DbKind::SqliteMemory => Ok("sqlite::memory:".to_string()),
    }
}

fn db_name(runtime: RuntimeEnv) -> Result<String, AppError> {
    match runtime {
        RuntimeEnv::Prod => must_var("PROD_DB"),
        RuntimeEnv::Test => {
            let db_name = must_var("TEST_DB")?;
            if !db_name.ends_with("_test") {
                return Err(AppError::config(format!(
                    "Test env requires database name to end with '_test', but got: '{db_name}'"
                )));
            }
            Ok(db_name)
        }
    }
}

fn must_var(name: &str) -> Result<String, AppError> {
    env::var(name)
        .map_err(|_| AppError::config(format!("Required environment variable '{name}' is not set")))
}
