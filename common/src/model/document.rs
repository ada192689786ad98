use serde::{Deserialize, Serialize};

/// Server-assigned identifier of a persisted document.
pub type DocumentId = i64;

/// A document as stored by the server and edited in the browser.
///
/// A document is either a *draft* (`id` is `None`, it only exists in the
/// editor) or *persisted* (`id` is `Some`, the server holds exactly one row
/// for it). The `body` is serialized rich-text markup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub id: Option<DocumentId>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body: String,
    /// RFC 3339 creation timestamp, set by the server.
    #[serde(default)]
    pub created_at: Option<String>,
    /// RFC 3339 timestamp of the last update, set by the server.
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl Document {
    /// An empty, never persisted document.
    pub fn draft() -> Self {
        Self::default()
    }

    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draft_has_no_identity() {
        let doc = Document::draft();
        assert!(!doc.is_persisted());
        assert!(doc.title.is_empty());
        assert!(doc.body.is_empty());
    }

    #[test]
    fn deserializes_server_row_with_extra_fields() {
        let json = r#"{
            "id": 42,
            "user_id": 7,
            "title": "Draft",
            "body": "<p>Hello world</p>",
            "created_at": "2025-01-01T00:00:00+00:00",
            "updated_at": "2025-01-02T00:00:00+00:00"
        }"#;
        let doc: Document = serde_json::from_str(json).unwrap();
        assert_eq!(doc.id, Some(42));
        assert_eq!(doc.title, "Draft");
        assert!(doc.is_persisted());
    }
}
