use serde::Serialize;
use serde_json::{json, Value};

/// One backend list-query predicate, sent as a JSON string in `queries[]`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Query {
    method: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    attribute: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    values: Vec<Value>,
}

impl Query {
    pub fn equal(attribute: &str, value: impl Into<Value>) -> Self {
        Self {
            method: "equal",
            attribute: Some(attribute.to_string()),
            values: vec![value.into()],
        }
    }

    pub fn greater_than_equal(attribute: &str, value: impl Into<Value>) -> Self {
        Self {
            method: "greaterThanEqual",
            attribute: Some(attribute.to_string()),
            values: vec![value.into()],
        }
    }

    pub fn order_asc(attribute: &str) -> Self {
        Self {
            method: "orderAsc",
            attribute: Some(attribute.to_string()),
            values: Vec::new(),
        }
    }

    pub fn limit(limit: usize) -> Self {
        Self {
            method: "limit",
            attribute: None,
            values: vec![json!(limit)],
        }
    }

    pub fn cursor_after(document_id: &str) -> Self {
        Self {
            method: "cursorAfter",
            attribute: None,
            values: vec![json!(document_id)],
        }
    }

    pub fn encode(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_equal() {
        assert_eq!(
            Query::equal("user_id", "u-1").encode(),
            r#"{"method":"equal","attribute":"user_id","values":["u-1"]}"#
        );
    }

    #[test]
    fn test_encode_without_attribute() {
        assert_eq!(Query::limit(100).encode(), r#"{"method":"limit","values":[100]}"#);
        assert_eq!(
            Query::cursor_after("abc").encode(),
            r#"{"method":"cursorAfter","values":["abc"]}"#
        );
        assert_eq!(
            Query::order_asc("completed_at").encode(),
            r#"{"method":"orderAsc","attribute":"completed_at"}"#
        );
    }
}
