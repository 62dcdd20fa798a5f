use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of verification document, derived from the file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentType {
    License,
    Insurance,
    Id,
    Other,
}

impl DocumentType {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::License => "license",
            Self::Insurance => "insurance",
            Self::Id => "id",
            Self::Other => "other",
        }
    }

    pub const fn display_name(self) -> &'static str {
        match self {
            Self::License => "Business license",
            Self::Insurance => "Insurance",
            Self::Id => "Identification",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A document as stored by the Servly API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: i64,
    pub provider_id: i64,
    pub filename: String,
    pub document_type: DocumentType,
    pub file_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.filename)
    }
}

/// Upload payload for `POST /api/documents`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDocument {
    pub provider_id: i64,
    pub filename: String,
    pub document_type: DocumentType,
    pub file_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_document_wire_format() {
        let payload = NewDocument {
            provider_id: 7,
            filename: "business-license.pdf".to_string(),
            document_type: DocumentType::License,
            file_url: "data:application/pdf;base64,JVBERi0=".to_string(),
        };

        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "providerId": 7,
                "filename": "business-license.pdf",
                "documentType": "license",
                "fileUrl": "data:application/pdf;base64,JVBERi0=",
            })
        );
    }

    #[test]
    fn test_document_accepts_optional_timestamp() {
        let without: Document = serde_json::from_str(
            r#"{"id":1,"providerId":7,"filename":"id.png","documentType":"id","fileUrl":"data:image/png;base64,"}"#,
        )
        .unwrap();
        assert!(without.created_at.is_none());
        assert_eq!(without.document_type, DocumentType::Id);

        let with: Document = serde_json::from_str(
            r#"{"id":2,"providerId":7,"filename":"a.pdf","documentType":"other","fileUrl":"x","createdAt":"2024-05-01T10:00:00Z"}"#,
        )
        .unwrap();
        assert!(with.created_at.is_some());
    }
}
