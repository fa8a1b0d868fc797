use actix_web::{web, App, HttpServer};
use rps_backend::config::db::{DbKind, RuntimeEnv};
use rps_backend::config::server::{txn_attempts_from_env, ServerConfig};
use rps_backend::db::retry::RetryPolicy;
use rps_backend::infra::state::build_state;
use rps_backend::middleware::{RequestTrace, StructuredLogger, TraceSpan};
use rps_backend::{routes, telemetry, AppError};
use tracing::{error, info};

async fn build_app_state() -> Result<(ServerConfig, rps_backend::AppState), AppError> {
    let server = ServerConfig::from_env()?;
    let retry = RetryPolicy::new(txn_attempts_from_env()?);

    let state = build_state()
        .with_env(RuntimeEnv::Prod)
        .with_db(DbKind::from_env()?)
        .with_retry(retry)
        .build()
        .await?;

    Ok((server, state))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    // Configuration comes from the environment only (docker env_file or a
    // sourced .env locally).
    let (server, app_state) = match build_app_state().await {
        Ok(built) => built,
        Err(e) => {
            error!(error = %e, "Failed to build application state");
            std::process::exit(1);
        }
    };

    let (host, port) = server.bind_addr();
    info!(
        %host,
        port,
        db_kind = ?app_state.db_kind(),
        txn_attempts = app_state.retry_policy().max_attempts(),
        "Starting RPS backend"
    );

    let data = web::Data::new(app_state);

    HttpServer::new(move || {
        App::new()
            .wrap(StructuredLogger)
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
