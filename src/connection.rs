//! MongoDB connection manager
//!
//! Builds the client from settings and verifies reachability before any
//! schema work happens. A failed ping aborts startup instead of leaving
//! partial state behind.

use std::time::Duration;

use mongodb::{bson::doc, options::ClientOptions, Client, Database};
use tracing::{debug, info};

use crate::config::MongoConfig;
use crate::error::{InitError, InitResult};

const APP_NAME: &str = "feedback-init";

/// A verified connection to the target MongoDB deployment
#[derive(Debug, Clone)]
pub struct MongoConnection {
    client: Client,
    database_name: String,
}

impl MongoConnection {
    /// Connect and verify the deployment is reachable.
    ///
    /// The ping runs against the `admin` database (the auth source), so it
    /// succeeds or fails independently of whether the target database exists
    /// yet.
    pub async fn establish(config: &MongoConfig) -> InitResult<Self> {
        debug!("Connecting to {}", config.display_uri());

        let mut options = ClientOptions::parse(config.connection_uri())
            .await
            .map_err(InitError::Connection)?;
        options.app_name = Some(APP_NAME.to_string());
        options.max_pool_size = Some(config.max_pool_size);
        options.min_pool_size = Some(config.min_pool_size);
        options.server_selection_timeout =
            Some(Duration::from_millis(config.server_selection_timeout_ms));

        let client = Client::with_options(options).map_err(InitError::Connection)?;

        // Fail fast on an unreachable deployment
        client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(InitError::Connection)?;

        info!("MongoDB connection established ({})", config.display_uri());

        Ok(Self {
            client,
            database_name: config.database.clone(),
        })
    }

    /// Handle to the target database. Selecting a database is lazy in
    /// MongoDB; it materializes on the first write.
    pub fn database(&self) -> Database {
        self.client.database(&self.database_name)
    }

    pub fn database_name(&self) -> &str {
        &self.database_name
    }

    #[allow(dead_code)]
    pub fn client(&self) -> &Client {
        &self.client
    }
}
