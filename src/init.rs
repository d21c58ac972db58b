//! Schema initializer
//!
//! One-shot, linear bootstrap sequence for the feedback store:
//! ensure the collection, ensure its indexes, insert the seed document,
//! then report what happened. Rerunning against an already-initialized
//! database is a no-op.

use mongodb::Database;
use tracing::{info, warn};

use crate::db::FeedbackStore;
use crate::error::{command_error_code, is_tolerable_conflict, InitError, InitResult};
use crate::models::{FeedbackRecord, COLLECTION_NAME};

/// Outcome of an initializer run
#[derive(Debug, Clone)]
pub struct InitReport {
    pub database: String,
    pub collection: String,
    /// Names assigned by the server to the ensured indexes
    pub index_names: Vec<String>,
    pub seed_inserted: bool,
}

/// Bootstraps the feedback schema on a reachable database
pub struct SchemaInitializer {
    database: Database,
}

impl SchemaInitializer {
    pub fn new(database: Database) -> Self {
        Self { database }
    }

    /// Run the full bootstrap sequence.
    ///
    /// Collection and index creation tolerate "already exists" conflicts.
    /// A failed seed insert is logged and reported, not fatal: the seed
    /// document is disposable.
    pub async fn run(&self) -> InitResult<InitReport> {
        self.ensure_collection().await?;
        let index_names = self.ensure_indexes().await?;
        let seed_inserted = self.seed_document().await?;

        Ok(InitReport {
            database: self.database.name().to_string(),
            collection: COLLECTION_NAME.to_string(),
            index_names,
            seed_inserted,
        })
    }

    /// Explicitly create the collection; NamespaceExists means a previous
    /// run (or the application) already created it.
    async fn ensure_collection(&self) -> InitResult<()> {
        match self.database.create_collection(COLLECTION_NAME).await {
            Ok(()) => {
                info!("Created collection '{}'", COLLECTION_NAME);
                Ok(())
            }
            Err(e) => match command_error_code(&e) {
                Some(code) if is_tolerable_conflict(code) => {
                    info!("Collection '{}' already exists", COLLECTION_NAME);
                    Ok(())
                }
                _ => Err(InitError::Database(e)),
            },
        }
    }

    /// Ensure the four single-field indexes. Creating an index that already
    /// exists with the same keys is a server-side no-op; a conflicting
    /// definition is tolerated and logged.
    async fn ensure_indexes(&self) -> InitResult<Vec<String>> {
        let collection = self
            .database
            .collection::<FeedbackRecord>(COLLECTION_NAME);

        let mut index_names = Vec::new();
        for model in FeedbackRecord::index_models() {
            let keys = model.keys.clone();
            match collection.create_index(model).await {
                Ok(result) => {
                    index_names.push(result.index_name);
                }
                Err(e) => match command_error_code(&e) {
                    Some(code) if is_tolerable_conflict(code) => {
                        let conflict =
                            InitError::SchemaConflict(format!("index {}: {}", keys, e));
                        warn!("{}, continuing", conflict);
                    }
                    _ => return Err(InitError::Database(e)),
                },
            }
        }

        info!(
            "Ensured {} indexes on '{}': {:?}",
            FeedbackRecord::index_models().len(),
            COLLECTION_NAME,
            index_names
        );
        Ok(index_names)
    }

    /// Insert the seed document unless a previous run already did.
    ///
    /// Returns whether a document was inserted. Insert failures are logged
    /// and swallowed: the seed record only validates the collection shape.
    async fn seed_document(&self) -> InitResult<bool> {
        let store = FeedbackStore::new(&self.database);

        if store.count_seed_documents().await? > 0 {
            info!("Seed document already present, skipping insert");
            return Ok(false);
        }

        match store.save(FeedbackRecord::seed()).await {
            Ok(id) => {
                info!("Inserted seed document ({})", id);
                Ok(true)
            }
            Err(e @ InitError::Insert(_)) => {
                warn!("Failed to insert seed document: {}", e);
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }
}

/// The four confirmation lines printed after a successful run.
pub fn confirmation_lines(report: &InitReport) -> [String; 4] {
    [
        "MongoDB initialization completed for the feedback store".to_string(),
        format!("Database: {}", report.database),
        format!(
            "Collection: {} with {} indexes created",
            report.collection,
            FeedbackRecord::index_models().len()
        ),
        "Root user authentication: use root credentials with authSource=admin".to_string(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample_report() -> InitReport {
        InitReport {
            database: "phishing_feedback".to_string(),
            collection: COLLECTION_NAME.to_string(),
            index_names: vec![
                "url_1".to_string(),
                "feedback_time_-1".to_string(),
                "user_id_1".to_string(),
                "is_phishing_1".to_string(),
            ],
            seed_inserted: true,
        }
    }

    #[test]
    fn test_confirmation_lines() {
        let lines = confirmation_lines(&sample_report());
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[1], "Database: phishing_feedback");
        assert!(lines[2].contains("user_feedback"));
        assert!(lines[2].contains("4 indexes"));
        assert!(lines[3].contains("authSource=admin"));
    }

    #[test]
    fn test_confirmation_lines_count_survives_conflicts() {
        // An index that conflicted produces no server name, but the schema
        // still defines four indexes.
        let mut report = sample_report();
        report.index_names.truncate(2);
        let lines = confirmation_lines(&report);
        assert!(lines[2].contains("4 indexes"));
    }
}
