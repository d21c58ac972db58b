//! User feedback document model
//!
//! One record per user verdict on a previously analyzed URL. Stored in the
//! `user_feedback` collection of the `phishing_feedback` database.

use bson::oid::ObjectId;
use bson::serde_helpers::chrono_datetime_as_bson_datetime;
use chrono::{DateTime, Utc};
use mongodb::{bson::doc, IndexModel};
use serde::{Deserialize, Serialize};

/// Fixed user id of the seed document written by the initializer.
pub const SEED_USER_ID: &str = "system_init";

/// Name of the collection holding feedback records.
pub const COLLECTION_NAME: &str = "user_feedback";

/// A user feedback record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackRecord {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub url: String,
    pub user_id: String,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub feedback_time: DateTime<Utc>,
    /// The user's verdict on the URL
    pub is_phishing: bool,
    /// What the detection model originally reported
    pub actual_result: bool,
    pub confidence: f64,
    pub feedback_text: String,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
}

impl FeedbackRecord {
    /// Build a new record with creation timestamps set to now.
    pub fn new(
        url: impl Into<String>,
        user_id: impl Into<String>,
        is_phishing: bool,
        actual_result: bool,
        confidence: f64,
        feedback_text: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: None,
            url: url.into(),
            user_id: user_id.into(),
            feedback_time: now,
            is_phishing,
            actual_result,
            confidence,
            feedback_text: feedback_text.into(),
            created_at: now,
            updated_at: now,
        }
    }

    /// The placeholder document inserted at bootstrap to validate the
    /// collection shape. Safe to remove once real feedback arrives.
    pub fn seed() -> Self {
        Self::new(
            "https://example.com",
            SEED_USER_ID,
            false,
            false,
            0.95,
            "System initialization document - can be removed",
        )
    }

    /// The four single-field indexes maintained on the collection.
    pub fn index_models() -> Vec<IndexModel> {
        vec![
            IndexModel::builder().keys(doc! { "url": 1 }).build(),
            IndexModel::builder().keys(doc! { "feedback_time": -1 }).build(),
            IndexModel::builder().keys(doc! { "user_id": 1 }).build(),
            IndexModel::builder().keys(doc! { "is_phishing": 1 }).build(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::Bson;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_seed_values() {
        let seed = FeedbackRecord::seed();
        assert_eq!(seed.url, "https://example.com");
        assert_eq!(seed.user_id, SEED_USER_ID);
        assert_eq!(seed.confidence, 0.95);
        assert!(!seed.is_phishing);
        assert!(!seed.actual_result);
        assert!(!seed.feedback_text.is_empty());
    }

    #[test]
    fn test_new_record_timestamps_agree() {
        let record = FeedbackRecord::new("https://a.test", "u1", true, true, 0.5, "");
        assert_eq!(record.feedback_time, record.created_at);
        assert_eq!(record.created_at, record.updated_at);
        assert!(record.id.is_none());
    }

    #[test]
    fn test_index_models_match_schema() {
        let models = FeedbackRecord::index_models();
        assert_eq!(models.len(), 4);

        let mut keys: Vec<(String, i32)> = models
            .iter()
            .map(|m| {
                assert_eq!(m.keys.len(), 1, "single-field indexes only");
                let (field, direction) = m.keys.iter().next().unwrap();
                let direction = match direction {
                    Bson::Int32(v) => *v,
                    other => panic!("unexpected index direction: {:?}", other),
                };
                (field.clone(), direction)
            })
            .collect();
        keys.sort();

        assert_eq!(
            keys,
            vec![
                ("feedback_time".to_string(), -1),
                ("is_phishing".to_string(), 1),
                ("url".to_string(), 1),
                ("user_id".to_string(), 1),
            ]
        );
    }

    #[test]
    fn test_serialized_document_field_names() {
        let seed = FeedbackRecord::seed();
        let document = bson::to_document(&seed).unwrap();

        // No _id until the server assigns one
        assert!(!document.contains_key("_id"));
        for field in [
            "url",
            "user_id",
            "feedback_time",
            "is_phishing",
            "actual_result",
            "confidence",
            "feedback_text",
            "created_at",
            "updated_at",
        ] {
            assert!(document.contains_key(field), "missing field: {}", field);
        }

        // Timestamps serialize as BSON datetimes, not strings
        assert!(matches!(
            document.get("feedback_time"),
            Some(Bson::DateTime(_))
        ));
    }
}
