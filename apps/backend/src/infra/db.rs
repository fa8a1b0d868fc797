use std::future::Future;
use std::str::FromStr;
use std::time::Duration;

use migration::{migrate, MigrationCommand};
use sea_orm::{DatabaseConnection, SqlxPostgresConnector, SqlxSqliteConnector};
use sqlx::postgres::PgPoolOptions;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tracing::{info, trace, warn};

use crate::config::db::{db_url, DbKind, DbSettings, RuntimeEnv};
use crate::error::AppError;

const PG_CONNECT_ATTEMPTS: u32 = 5;
const PG_CONNECT_INTERVAL_MS: u64 = 500;

/// Retry a connection attempt with fixed interval delays.
/// Surfaces the last error once attempts are exhausted.
async fn retry_connection<T, F, Fut>(
    mut connect_fn: F,
    max_attempts: u32,
    interval_ms: u64,
) -> Result<T, AppError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, AppError>>,
{
    let mut attempt = 1;
    loop {
        match connect_fn().await {
            Ok(result) => {
                if attempt > 1 {
                    info!(attempts = attempt, interval_ms, "connection_retry=success");
                }
                return Ok(result);
            }
            Err(e) if attempt < max_attempts => {
                warn!(attempt, max_attempts, interval_ms, error = %e, "connection_retry=failed");
                tokio::time::sleep(Duration::from_millis(interval_ms)).await;
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}

/// Open a pool for `kind` with per-connection session settings applied.
/// Does not run migrations.
pub async fn connect_db(runtime: RuntimeEnv, kind: DbKind) -> Result<DatabaseConnection, AppError> {
    let url = db_url(runtime, kind)?;
    let settings = DbSettings::for_kind(kind);

    match kind {
        DbKind::SqliteFile | DbKind::SqliteMemory => {
            let connect_opts = SqliteConnectOptions::from_str(&url)
                .map_err(|e| AppError::config(format!("invalid SQLite connection options: {e}")))?
                .create_if_missing(true);

            // Every in-memory connection is its own database, so the pool
            // must hold exactly one connection for the life of the process.
            let (min, max) = match kind {
                DbKind::SqliteMemory => (1, 1),
                _ => (1, 4),
            };

            let pool = SqlitePoolOptions::new()
                .min_connections(min)
                .max_connections(max)
                .acquire_timeout(Duration::from_secs(5))
                .idle_timeout(None)
                .max_lifetime(None)
                .after_connect(move |conn, _meta| {
                    let statements = settings.session_statements();
                    Box::pin(async move {
                        for stmt in statements {
                            sqlx::query(&stmt).execute(&mut *conn).await?;
                        }
                        trace!("db=sqlite hook=after_connect ok");
                        Ok::<_, sqlx::Error>(())
                    })
                })
                .connect_with(connect_opts)
                .await
                .map_err(|e| AppError::config(format!("failed to create SQLite pool: {e}")))?;

            info!(engine = "sqlite", kind = %kind, min, max, "pool=create");
            Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
        }
        DbKind::Postgres => {
            let pool = retry_connection(
                || {
                    let url = url.clone();
                    let settings = settings.clone();
                    async move {
                        PgPoolOptions::new()
                            .min_connections(1)
                            .max_connections(10)
                            .acquire_timeout(Duration::from_secs(5))
                            .idle_timeout(Duration::from_secs(30))
                            .after_connect(move |conn, _meta| {
                                let statements = settings.session_statements();
                                Box::pin(async move {
                                    for stmt in statements {
                                        sqlx::query(&stmt).execute(&mut *conn).await?;
                                    }
                                    Ok::<_, sqlx::Error>(())
                                })
                            })
                            .connect(&url)
                            .await
                            .map_err(|e| {
                                AppError::config(format!("failed to connect to Postgres: {e}"))
                            })
                    }
                },
                PG_CONNECT_ATTEMPTS,
                PG_CONNECT_INTERVAL_MS,
            )
            .await?;

            info!(engine = "postgres", "pool=create");
            Ok(SqlxPostgresConnector::from_sqlx_postgres_pool(pool))
        }
    }
}

/// Connect and bring the schema up to date.
pub async fn bootstrap_db(
    runtime: RuntimeEnv,
    kind: DbKind,
) -> Result<DatabaseConnection, AppError> {
    info!(env = ?runtime, db_kind = %kind, pid = std::process::id(), "bootstrap=start");

    let conn = connect_db(runtime, kind).await?;
    migrate(&conn, MigrationCommand::Up)
        .await
        .map_err(|e| AppError::config(format!("migrations failed: {e}")))?;

    info!("bootstrap=ready");
    Ok(conn)
}
