use migration::{Migrator, MigratorTrait};
use settings::Database;

mod settings;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let settings = settings::Settings::new()?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "fuelog={level},server={level},engine={level}",
            level = settings.app.level
        ))
        .init();

    let Some(server_settings) = settings.server else {
        tracing::warn!("No server settings found, nothing to run");
        return Ok(());
    };

    tracing::info!("Found server settings...");
    let db = parse_database(&server_settings.database).await?;
    let mut tracker = engine::Tracker::builder()
        .gateway(engine::DatabaseGateway::new(db))
        .consumption_basis(settings.stats.consumption_basis)
        .build()?;
    let loaded = tracker.load().await?.len();
    tracing::info!("Loaded {loaded} fuel entries");

    let bind = server_settings.bind.unwrap_or_else(|| "127.0.0.1".to_string());
    let addr = format!("{}:{}", bind, server_settings.port);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    server::run_with_listener(tracker, listener).await?;

    Ok(())
}

async fn parse_database(
    config: &settings::Database,
) -> Result<sea_orm::DatabaseConnection, Box<dyn std::error::Error + Send + Sync>> {
    let url = match config {
        Database::Memory => String::from("sqlite::memory:"),
        Database::Sqlite(path) => format!("sqlite:{}?mode=rwc", path),
    };

    let database = sea_orm::Database::connect(url).await?;
    Migrator::up(&database, None).await?;
    Ok(database)
}
