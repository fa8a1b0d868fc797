use clap::{Parser, ValueEnum};
use migration::MigrationCommand;
use rps_backend::config::db::{DbKind, RuntimeEnv};
use rps_backend::infra::db::connect_db;
use tracing::{error, info};

#[derive(Clone, Copy, ValueEnum)]
enum Command {
    Up,
    Down,
    Fresh,
    Reset,
    Refresh,
    Status,
}

impl From<Command> for MigrationCommand {
    fn from(value: Command) -> Self {
        match value {
            Command::Up => MigrationCommand::Up,
            Command::Down => MigrationCommand::Down,
            Command::Fresh => MigrationCommand::Fresh,
            Command::Reset => MigrationCommand::Reset,
            Command::Refresh => MigrationCommand::Refresh,
            Command::Status => MigrationCommand::Status,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum Env {
    Prod,
    Test,
}

/// In-memory SQLite is deliberately absent: each CLI run would migrate a
/// database that disappears when the process exits.
#[derive(Clone, Copy, ValueEnum)]
enum Db {
    Postgres,
    SqliteFile,
}

#[derive(Parser)]
#[command(name = "migration-cli")]
#[command(about = "RPS database migration tool")]
struct Args {
    #[arg(value_enum)]
    command: Command,

    #[arg(short, long, value_enum, default_value = "test")]
    env: Env,

    #[arg(short, long, value_enum, default_value = "postgres")]
    db: Db,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stdout)
        .without_time()
        .with_target(false)
        .with_env_filter("migration=info,migration_cli=info,rps_backend=info,sqlx=warn")
        .init();

    let args = Args::parse();

    let env = match args.env {
        Env::Prod => RuntimeEnv::Prod,
        Env::Test => RuntimeEnv::Test,
    };
    let db_kind = match args.db {
        Db::Postgres => DbKind::Postgres,
        Db::SqliteFile => DbKind::SqliteFile,
    };
    let command = MigrationCommand::from(args.command);

    let conn = match connect_db(env, db_kind).await {
        Ok(conn) => conn,
        Err(e) => {
            error!(error = %e, "Could not connect to database");
            std::process::exit(1);
        }
    };

    info!(?env, %db_kind, ?command, "migration=start");
    if let Err(e) = migration::migrate(&conn, command).await {
        error!(error = %e, "Migration failed");
        std::process::exit(1);
    }
    info!("migration=done");
}
