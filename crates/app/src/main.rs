use std::time::Duration;

use migration::{Migrator, MigratorTrait};

mod settings;

const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let settings = settings::Settings::new()?;
    let mut tasks = tokio::task::JoinSet::new();

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "spesa={level},expenses_server={level},analytics_server={level},store={level}",
            level = settings.app.level
        ))
        .init();

    let expenses_port = settings.expenses.as_ref().map(|e| e.port);

    if let Some(expenses) = settings.expenses {
        tasks.spawn(async move {
            tracing::info!("Found expenses service settings...");
            let db = match open_database(expenses.database.as_deref()).await {
                Ok(db) => db,
                Err(err) => {
                    tracing::error!("failed to initialize database: {err}");
                    return;
                }
            };

            let store = match store::Store::builder().database(db).build().await {
                Ok(store) => store,
                Err(err) => {
                    tracing::error!("failed to build store from database: {err}");
                    return;
                }
            };

            let bind = expenses.bind.unwrap_or_else(|| "127.0.0.1".to_string());
            let addr = format!("{}:{}", bind, expenses.port);
            let listener = match tokio::net::TcpListener::bind(addr).await {
                Ok(listener) => listener,
                Err(err) => {
                    tracing::error!("failed to bind expenses listener: {err}");
                    return;
                }
            };
            if let Err(err) = expenses_server::run_with_listener(store, listener).await {
                tracing::error!("expenses service failed: {err}");
            }
        });
    }

    if let Some(analytics) = settings.analytics {
        tasks.spawn(async move {
            tracing::info!("Found analytics service settings...");
            let expenses_url = analytics.expenses_url.clone().or_else(|| {
                expenses_port.map(|port| format!("http://127.0.0.1:{port}"))
            });
            let Some(expenses_url) = expenses_url else {
                tracing::error!("analytics requires expenses_url or a local expenses service");
                return;
            };

            let timeout = Duration::from_secs(
                analytics.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS),
            );
            let client = match analytics_server::StoreClient::new(&expenses_url, timeout) {
                Ok(client) => client,
                Err(err) => {
                    tracing::error!("failed to build expenses client: {err}");
                    return;
                }
            };

            let bind = analytics.bind.unwrap_or_else(|| "127.0.0.1".to_string());
            let addr = format!("{}:{}", bind, analytics.port);
            let listener = match tokio::net::TcpListener::bind(addr).await {
                Ok(listener) => listener,
                Err(err) => {
                    tracing::error!("failed to bind analytics listener: {err}");
                    return;
                }
            };
            if let Err(err) = analytics_server::run_with_listener(client, listener).await {
                tracing::error!("analytics service failed: {err}");
            }
        });
    }

    while tasks.join_next().await.is_some() {
        tasks.shutdown().await;
    }

    Ok(())
}

async fn open_database(
    path: Option<&str>,
) -> Result<sea_orm::DatabaseConnection, Box<dyn std::error::Error + Send + Sync>> {
    let url = match path {
        None => String::from("sqlite::memory:"),
        Some(path) => format!("sqlite:{}?mode=rwc", path),
    };

    let database = sea_orm::Database::connect(url).await?;
    Migrator::up(&database, None).await?;
    Ok(database)
}
