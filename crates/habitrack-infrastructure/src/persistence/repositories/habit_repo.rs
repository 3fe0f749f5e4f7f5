use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

use crate::http::{AppwriteClient, Query};
use crate::persistence::ResultExt;
use habitrack_domain::habit::{Frequency, Habit, HabitRepository};
use habitrack_domain::shared::{DomainError, HabitId, UserId};

/// Stored attributes of a habit document
#[derive(Debug, Serialize, Deserialize)]
struct HabitData {
    user_id: String,
    title: String,
    description: String,
    frequency: String,
    #[serde(default)]
    streak_count: i64,
    created_at: DateTime<Utc>,
    last_completed: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
struct HabitDocument {
    #[serde(rename = "$id")]
    id: String,
    #[serde(flatten)]
    data: HabitData,
}

impl HabitDocument {
    fn to_habit(self) -> Result<Habit, DomainError> {
        let frequency = self.data.frequency.parse::<Frequency>()?;
        let streak_count = self.data.streak_count.clamp(0, u32::MAX as i64) as u32;

        Ok(Habit::restore(
            HabitId::from_string(&self.id),
            UserId::from_string(&self.data.user_id),
            self.data.title,
            self.data.description,
            frequency,
            streak_count,
            self.data.created_at,
            self.data.last_completed,
        ))
    }
}

impl From<&Habit> for HabitData {
    fn from(habit: &Habit) -> Self {
        Self {
            user_id: habit.user_id().to_string(),
            title: habit.title().to_string(),
            description: habit.description().to_string(),
            frequency: habit.frequency().as_str().to_string(),
            streak_count: habit.streak_count() as i64,
            created_at: habit.created_at(),
            last_completed: habit.last_completed(),
        }
    }
}

fn decode(value: Value) -> Result<Habit, DomainError> {
    serde_json::from_value::<HabitDocument>(value)
        .to_decode_err("habit document")?
        .to_habit()
}

pub struct AppwriteHabitRepository {
    client: Arc<AppwriteClient>,
    collection_id: String,
}

impl AppwriteHabitRepository {
    pub fn new(client: Arc<AppwriteClient>) -> Self {
        let collection_id = client.config().habits_collection_id.clone();
        Self {
            client,
            collection_id,
        }
    }
}

#[async_trait]
impl HabitRepository for AppwriteHabitRepository {
    async fn create(&self, habit: &Habit) -> Result<(), DomainError> {
        self.client
            .create_document(
                &self.collection_id,
                habit.id().as_str(),
                &HabitData::from(habit),
            )
            .await?;

        info!("Habit document created: {}", habit.id());
        Ok(())
    }

    async fn update(&self, habit: &Habit) -> Result<(), DomainError> {
        self.client
            .update_document(
                &self.collection_id,
                habit.id().as_str(),
                &HabitData::from(habit),
            )
            .await
    }

    async fn delete(&self, id: &HabitId) -> Result<(), DomainError> {
        match self
            .client
            .delete_document(&self.collection_id, id.as_str())
            .await
        {
            Err(DomainError::NotFound(_)) => Err(DomainError::HabitNotFound(id.to_string())),
            other => other,
        }
    }

    async fn find_by_id(&self, id: &HabitId) -> Result<Option<Habit>, DomainError> {
        let document: Option<Value> = self
            .client
            .get_document(&self.collection_id, id.as_str())
            .await?;

        document.map(decode).transpose()
    }

    async fn list_by_user(&self, user_id: &UserId) -> Result<Vec<Habit>, DomainError> {
        let start = Instant::now();

        let documents = self
            .client
            .list_documents(
                &self.collection_id,
                &[
                    Query::equal("user_id", user_id.as_str()),
                    Query::order_asc("created_at"),
                ],
            )
            .await?;

        let mut habits = Vec::with_capacity(documents.len());
        for document in documents {
            match decode(document) {
                Ok(habit) => habits.push(habit),
                Err(e) => warn!("Skipping unreadable habit document: {}", e),
            }
        }

        debug!(
            "Listed {} habits for user {} in {:?}",
            habits.len(),
            user_id,
            start.elapsed()
        );
        Ok(habits)
    }
}
