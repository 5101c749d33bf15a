use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use log::{error, info, warn};
use migration::{Migrator, MigratorTrait};
use queries::{AlbumStore, MemoryAlbumStore, PgAlbumStore};
use sea_orm::SqlxPostgresConnector;
use sqlx::postgres::PgPoolOptions;
use tokio::main;

use albumcave::config::{Args, Config};
use albumcave::error::StartupError;
use albumcave::{create_router, DatabaseState};

async fn connect_store(config: &Config) -> Result<Arc<dyn AlbumStore>, StartupError> {
    let Some(url) = &config.postgres else {
        warn!("No PostgreSQL connection string configured, albums are kept in memory only");
        return Ok(Arc::new(MemoryAlbumStore::new()));
    };
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(url)
        .await?;
    info!("Running migrations");
    let connection = SqlxPostgresConnector::from_sqlx_postgres_pool(pool.to_owned());
    Migrator::up(&connection, None).await?;
    Ok(Arc::new(PgAlbumStore::new(pool)))
}

async fn run(args: Args) -> Result<(), StartupError> {
    if let Some(path) = &args.config {
        info!("Configuration path: {}", path.display());
    }
    let config = Config::load(&args)?;
    let store = connect_store(&config).await?;
    let app = create_router(DatabaseState::new(store));

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port))
        .await
        .map_err(StartupError::Bind)?;
    info!("Listening on 0.0.0.0:{}", config.port);
    info!("Welcome to AlbumCave!");
    axum::serve(listener, app)
        .await
        .map_err(StartupError::Serve)
}

#[main]
async fn main() -> ExitCode {
    let args = Args::parse();
    if let Err(err) = stderrlog::new()
        .verbosity(args.verbosity)
        .quiet(args.quiet)
        .timestamp(stderrlog::Timestamp::Millisecond)
        .init()
    {
        eprintln!("Could not set up logging: {}", err);
        return ExitCode::FAILURE;
    }

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{}", err);
            ExitCode::FAILURE
        }
    }
}
