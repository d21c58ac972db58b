//! feedback-init - Phishing feedback store bootstrap
//!
//! One-shot schema initializer run by the deployment's startup hook. It
//! connects to MongoDB, ensures the `user_feedback` collection and its four
//! indexes exist in the `phishing_feedback` database, inserts a seed
//! document, and prints confirmation lines for the infrastructure logs.
//!
//! There are no CLI flags; everything is driven by MONGODB_* environment
//! variables (or a single MONGODB_URI).

mod config;
mod connection;
mod db;
mod error;
mod init;
mod models;

use tracing::{error, info};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Settings;
use crate::connection::MongoConnection;
use crate::db::FeedbackStore;
use crate::init::{confirmation_lines, SchemaInitializer};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    info!("Starting feedback store schema initializer...");

    let settings = Settings::load()?;
    info!("Configuration loaded successfully");

    // Connection failure is fatal: abort before touching any schema state
    let connection = match MongoConnection::establish(&settings.mongo).await {
        Ok(conn) => conn,
        Err(e) => {
            error!("FATAL: Failed to connect to MongoDB: {}", e);
            error!(
                "Check MONGODB_* environment variables and that the deployment at {} is reachable",
                settings.mongo.display_uri()
            );
            return Err(e.into());
        }
    };

    let initializer = SchemaInitializer::new(connection.database());
    let report = initializer.run().await?;

    if report.seed_inserted {
        info!("Seed document inserted into '{}'", report.collection);
    }

    // Read back the newest record to confirm the collection is queryable
    let store = FeedbackStore::new(&connection.database());
    match store.recent(1).await {
        Ok(records) if !records.is_empty() => {
            info!("Schema verified: newest record targets {}", records[0].url);
        }
        Ok(_) => info!("Schema verified: collection is empty"),
        Err(e) => error!("Schema verification query failed: {}", e),
    }

    for line in confirmation_lines(&report) {
        println!("{}", line);
    }

    info!("Initializer finished for database '{}'", connection.database_name());
    Ok(())
}

/// Initialize tracing with structured logging
fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,feedback_init=debug"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_level(true)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}
