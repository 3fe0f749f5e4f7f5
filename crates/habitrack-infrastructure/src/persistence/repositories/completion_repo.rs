use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, warn};

use crate::http::{AppwriteClient, Query};
use crate::persistence::ResultExt;
use habitrack_domain::completion::{CompletionRepository, HabitCompletion};
use habitrack_domain::shared::{CompletionId, DomainError, HabitId, UserId};

#[derive(Debug, Serialize, Deserialize)]
struct CompletionData {
    habit_id: String,
    user_id: String,
    completed_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
struct CompletionDocument {
    #[serde(rename = "$id")]
    id: String,
    #[serde(flatten)]
    data: CompletionData,
}

impl CompletionDocument {
    fn to_completion(self) -> HabitCompletion {
        HabitCompletion::restore(
            CompletionId::from_string(&self.id),
            HabitId::from_string(&self.data.habit_id),
            UserId::from_string(&self.data.user_id),
            self.data.completed_at,
        )
    }
}

impl From<&HabitCompletion> for CompletionData {
    fn from(completion: &HabitCompletion) -> Self {
        Self {
            habit_id: completion.habit_id().to_string(),
            user_id: completion.user_id().to_string(),
            completed_at: completion.completed_at(),
        }
    }
}

pub struct AppwriteCompletionRepository {
    client: Arc<AppwriteClient>,
    collection_id: String,
}

impl AppwriteCompletionRepository {
    pub fn new(client: Arc<AppwriteClient>) -> Self {
        let collection_id = client.config().completions_collection_id.clone();
        Self {
            client,
            collection_id,
        }
    }

    async fn list(&self, queries: &[Query]) -> Result<Vec<HabitCompletion>, DomainError> {
        let start = Instant::now();
        let documents = self.client.list_documents(&self.collection_id, queries).await?;

        let completions: Vec<HabitCompletion> = documents
            .into_iter()
            .filter_map(|document: Value| {
                match serde_json::from_value::<CompletionDocument>(document)
                    .to_decode_err("completion document")
                {
                    Ok(doc) => Some(doc.to_completion()),
                    Err(e) => {
                        warn!("Skipping unreadable completion document: {}", e);
                        None
                    }
                }
            })
            .collect();

        debug!(
            "Listed {} completions in {:?}",
            completions.len(),
            start.elapsed()
        );
        Ok(completions)
    }
}

#[async_trait]
impl CompletionRepository for AppwriteCompletionRepository {
    async fn create(&self, completion: &HabitCompletion) -> Result<(), DomainError> {
        self.client
            .create_document(
                &self.collection_id,
                completion.id().as_str(),
                &CompletionData::from(completion),
            )
            .await
    }

    async fn list_by_user(&self, user_id: &UserId) -> Result<Vec<HabitCompletion>, DomainError> {
        self.list(&[
            Query::equal("user_id", user_id.as_str()),
            Query::order_asc("completed_at"),
        ])
        .await
    }

    async fn list_by_user_since(
        &self,
        user_id: &UserId,
        since: DateTime<Utc>,
    ) -> Result<Vec<HabitCompletion>, DomainError> {
        self.list(&[
            Query::equal("user_id", user_id.as_str()),
            Query::greater_than_equal(
                "completed_at",
                since.to_rfc3339_opts(SecondsFormat::Millis, false),
            ),
            Query::order_asc("completed_at"),
        ])
        .await
    }
}
