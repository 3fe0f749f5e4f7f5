use serde::{Deserialize, Serialize};

/// Name of a realtime channel, e.g. `databases.main.collections.habits.documents`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Channel(String);

impl Channel {
    /// Channel carrying every document event of one collection
    pub fn documents(database_id: &str, collection_id: &str) -> Self {
        Self(format!(
            "databases.{}.collections.{}.documents",
            database_id, collection_id
        ))
    }

    pub fn from_string(s: &str) -> Self {
        Self(s.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentChange {
    Create,
    Update,
    Delete,
}

impl DocumentChange {
    /// Parse an event string such as `databases.*.collections.*.documents.*.create`.
    /// Returns `None` for anything that is not a document event.
    pub fn from_event(event: &str) -> Option<Self> {
        let parts: Vec<&str> = event.split('.').collect();
        if parts.len() < 3 || parts[parts.len() - 3] != "documents" {
            return None;
        }

        match parts[parts.len() - 1] {
            "create" => Some(DocumentChange::Create),
            "update" => Some(DocumentChange::Update),
            "delete" => Some(DocumentChange::Delete),
            _ => None,
        }
    }
}

/// One realtime notification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RealtimeEvent {
    /// Event names, concrete and wildcarded variants of the same change
    #[serde(default)]
    pub events: Vec<String>,
    #[serde(default)]
    pub channels: Vec<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub payload: serde_json::Value,
}

impl RealtimeEvent {
    /// Distinct document changes named by this event
    pub fn changes(&self) -> Vec<DocumentChange> {
        let mut changes = Vec::new();
        for change in self.events.iter().filter_map(|e| DocumentChange::from_event(e)) {
            if !changes.contains(&change) {
                changes.push(change);
            }
        }
        changes
    }

    pub fn has_change(&self, kind: DocumentChange) -> bool {
        self.events
            .iter()
            .any(|e| DocumentChange::from_event(e) == Some(kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_channel_name() {
        let channel = Channel::documents("main", "habits");
        assert_eq!(channel.as_str(), "databases.main.collections.habits.documents");
    }

    #[test]
    fn test_parse_wildcard_events() {
        assert_eq!(
            DocumentChange::from_event("databases.*.collections.*.documents.*.create"),
            Some(DocumentChange::Create)
        );
        assert_eq!(
            DocumentChange::from_event("databases.db.collections.habits.documents.65f0.update"),
            Some(DocumentChange::Update)
        );
        assert_eq!(
            DocumentChange::from_event("*.documents.*.delete"),
            Some(DocumentChange::Delete)
        );
    }

    #[test]
    fn test_non_document_events_ignored() {
        assert_eq!(DocumentChange::from_event("users.*.sessions.*.create"), None);
        assert_eq!(DocumentChange::from_event("databases.*.collections.*.documents.*"), None);
        assert_eq!(DocumentChange::from_event("create"), None);
        assert_eq!(DocumentChange::from_event(""), None);
    }

    #[test]
    fn test_event_changes_are_deduplicated() {
        let event = RealtimeEvent {
            events: vec![
                "databases.main.collections.habits.documents.abc.create".to_string(),
                "databases.*.collections.*.documents.*.create".to_string(),
                "databases.main.collections.habits.documents.abc".to_string(),
            ],
            channels: vec!["documents".to_string()],
            timestamp: None,
            payload: serde_json::json!({ "$id": "abc" }),
        };

        assert_eq!(event.changes(), vec![DocumentChange::Create]);
        assert!(event.has_change(DocumentChange::Create));
        assert!(!event.has_change(DocumentChange::Delete));
    }

    #[test]
    fn test_event_deserializes_with_missing_fields() {
        let event: RealtimeEvent =
            serde_json::from_str(r#"{"events":["x.documents.y.delete"]}"#).unwrap();
        assert_eq!(event.changes(), vec![DocumentChange::Delete]);
        assert!(event.payload.is_null());
    }
}
