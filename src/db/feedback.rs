// Feedback repository
//
// Read/write access to the user_feedback collection once the schema
// has been bootstrapped.

use futures_util::TryStreamExt;
use mongodb::bson::doc;
use mongodb::{Collection, Database};
use tracing::info;

use crate::error::{InitError, InitResult};
use crate::models::{FeedbackRecord, COLLECTION_NAME, SEED_USER_ID};

/// Repository over the user_feedback collection
#[derive(Debug, Clone)]
pub struct FeedbackStore {
    collection: Collection<FeedbackRecord>,
}

impl FeedbackStore {
    pub fn new(database: &Database) -> Self {
        Self {
            collection: database.collection(COLLECTION_NAME),
        }
    }

    /// Insert a feedback record, returning the assigned id as a hex string.
    pub async fn save(&self, record: FeedbackRecord) -> InitResult<String> {
        let url = record.url.clone();
        let result = self
            .collection
            .insert_one(record)
            .await
            .map_err(InitError::Insert)?;

        info!("Saved user feedback for URL: {}", url);
        Ok(result
            .inserted_id
            .as_object_id()
            .map(|id| id.to_hex())
            .unwrap_or_else(|| result.inserted_id.to_string()))
    }

    /// Most recent feedback, newest first.
    pub async fn recent(&self, limit: i64) -> InitResult<Vec<FeedbackRecord>> {
        let cursor = self
            .collection
            .find(doc! {})
            .sort(doc! { "feedback_time": -1 })
            .limit(limit)
            .await?;

        Ok(cursor.try_collect().await?)
    }

    /// Number of seed documents left over from initialization.
    pub async fn count_seed_documents(&self) -> InitResult<u64> {
        Ok(self
            .collection
            .count_documents(doc! { "user_id": SEED_USER_ID })
            .await?)
    }

    #[allow(dead_code)]
    pub fn collection(&self) -> &Collection<FeedbackRecord> {
        &self.collection
    }
}
