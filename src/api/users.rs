use async_trait::async_trait;
use serde::Serialize;

use crate::api::{ApiClient, ApiError};
use crate::model::Role;

#[derive(Debug, Serialize)]
struct RoleUpdate {
    role: Role,
}

/// User endpoints of the Servly API.
#[async_trait]
pub trait UserApi: Send + Sync {
    /// `PATCH /api/users/{id}` with the new role. Any non-2xx is a failure.
    async fn update_role(&self, user_id: i64, role: Role) -> Result<(), ApiError>;
}

#[async_trait]
impl UserApi for ApiClient {
    async fn update_role(&self, user_id: i64, role: Role) -> Result<(), ApiError> {
        tracing::debug!(user_id, %role, "Updating user role");
        self.patch_json(&format!("/api/users/{user_id}"), &RoleUpdate { role })
            .await
    }
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::config::ApiConfig;

    #[tokio::test]
    async fn test_update_role_sends_patch_with_bearer_token() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/api/users/42"))
            .and(header("authorization", "Bearer abc123"))
            .and(body_json(serde_json::json!({ "role": "provider" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": 42, "role": "provider"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = ApiClient::new(&ApiConfig {
            base_url: server.uri(),
            timeout_secs: 5,
            token: Some("abc123".to_string()),
        })
        .unwrap();

        client.update_role(42, Role::Provider).await.unwrap();
    }

    #[tokio::test]
    async fn test_update_role_non_success_is_error() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/api/users/42"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;
        Mock::given(method("PATCH"))
            .and(path("/api/users/7"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&server)
            .await;

        let client = ApiClient::new(&ApiConfig {
            base_url: server.uri(),
            timeout_secs: 5,
            token: None,
        })
        .unwrap();

        assert!(client.update_role(42, Role::Customer).await.is_ok());
        let err = client.update_role(7, Role::Customer).await.unwrap_err();
        assert!(matches!(err, ApiError::Status { status, .. } if status.as_u16() == 403));
    }
}
