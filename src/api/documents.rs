use async_trait::async_trait;

use crate::api::{ApiClient, ApiError};
use crate::model::{Document, NewDocument};

/// Document endpoints of the Servly API.
#[async_trait]
pub trait DocumentApi: Send + Sync {
    /// Store a new verification document and return the persisted record.
    async fn upload(&self, document: &NewDocument) -> Result<Document, ApiError>;

    /// All documents submitted by a provider.
    async fn list_by_provider(&self, provider_id: i64) -> Result<Vec<Document>, ApiError>;
}

#[async_trait]
impl DocumentApi for ApiClient {
    async fn upload(&self, document: &NewDocument) -> Result<Document, ApiError> {
        tracing::debug!(
            filename = %document.filename,
            document_type = %document.document_type,
            "Uploading document"
        );
        self.post_json("/api/documents", document).await
    }

    async fn list_by_provider(&self, provider_id: i64) -> Result<Vec<Document>, ApiError> {
        self.get_json(&format!("/api/documents/provider/{provider_id}"))
            .await
    }
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::config::ApiConfig;
    use crate::model::DocumentType;

    fn client_for(server: &MockServer) -> ApiClient {
        ApiClient::new(&ApiConfig {
            base_url: server.uri(),
            timeout_secs: 5,
            token: None,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_upload_posts_camel_case_payload() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/documents"))
            .and(body_json(serde_json::json!({
                "providerId": 3,
                "filename": "insurance-2024.pdf",
                "documentType": "insurance",
                "fileUrl": "data:application/pdf;base64,AAEC",
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
                "id": 11,
                "providerId": 3,
                "filename": "insurance-2024.pdf",
                "documentType": "insurance",
                "fileUrl": "data:application/pdf;base64,AAEC",
            })))
            .expect(1)
            .mount(&server)
            .await;

        let document = client_for(&server)
            .upload(&NewDocument {
                provider_id: 3,
                filename: "insurance-2024.pdf".to_string(),
                document_type: DocumentType::Insurance,
                file_url: "data:application/pdf;base64,AAEC".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(document.id, 11);
        assert_eq!(document.document_type, DocumentType::Insurance);
    }

    #[tokio::test]
    async fn test_upload_failure_carries_server_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/documents"))
            .respond_with(
                ResponseTemplate::new(413)
                    .set_body_json(serde_json::json!({ "message": "File too large" })),
            )
            .mount(&server)
            .await;

        let err = client_for(&server)
            .upload(&NewDocument {
                provider_id: 3,
                filename: "scan.png".to_string(),
                document_type: DocumentType::Other,
                file_url: "data:image/png;base64,".to_string(),
            })
            .await
            .unwrap_err();

        assert_eq!(err.user_message().as_deref(), Some("File too large"));
    }

    #[tokio::test]
    async fn test_list_by_provider() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/documents/provider/3"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"id": 1, "providerId": 3, "filename": "license.pdf", "documentType": "license", "fileUrl": "a"},
                {"id": 2, "providerId": 3, "filename": "photo.png", "documentType": "other", "fileUrl": "b"},
            ])))
            .mount(&server)
            .await;

        let documents = client_for(&server).list_by_provider(3).await.unwrap();
        assert_eq!(documents.len(), 2);
        assert_eq!(documents[0].filename, "license.pdf");
    }

    #[tokio::test]
    async fn test_list_with_malformed_body_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/documents/provider/3"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let err = client_for(&server).list_by_provider(3).await.unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }
}
