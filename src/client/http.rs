//! Remote entity API reached over HTTP.

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;

use crate::common::ClientError;
use crate::models::{EntityKind, Record};

use super::EntityBackend;

#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpBackend {
    /// `base_url` is the API root, e.g. `https://api.example.com/apps/123`.
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()?;
        Ok(Self::with_client(client, base_url, token))
    }

    pub fn with_client(client: Client, base_url: impl Into<String>, token: Option<String>) -> Self {
        let base_url = base_url.into();
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let mut req = self.client.request(method, &url);

        if let Some(ref token) = self.token {
            req = req.bearer_auth(token);
        }

        req
    }

    fn collection_path(kind: EntityKind) -> String {
        format!("/entities/{}", kind.as_str())
    }

    fn record_path(kind: EntityKind, id: &str) -> String {
        format!("/entities/{}/{}", kind.as_str(), id)
    }
}

pub(crate) async fn handle_response<T: DeserializeOwned>(
    response: Response,
) -> Result<T, ClientError> {
    let response = check_status(response).await?;
    response
        .json::<T>()
        .await
        .map_err(|e| ClientError::Deserialize(e.to_string()))
}

async fn check_status(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = response.text().await.unwrap_or_default();
    Err(match status {
        StatusCode::NOT_FOUND => ClientError::NotFound(message),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ClientError::Unauthorized(message),
        _ => ClientError::Api {
            status: status.as_u16(),
            message,
        },
    })
}

#[async_trait]
impl EntityBackend for HttpBackend {
    async fn list(&self, kind: EntityKind, sort: Option<&str>) -> Result<Vec<Record>, ClientError> {
        let mut req = self.request(Method::GET, &Self::collection_path(kind));
        if let Some(sort) = sort {
            req = req.query(&[("sort", sort)]);
        }

        tracing::debug!(kind = %kind, sort, "listing entities");
        handle_response(req.send().await?).await
    }

    async fn create(&self, kind: EntityKind, fields: Record) -> Result<Record, ClientError> {
        let response = self
            .request(Method::POST, &Self::collection_path(kind))
            .json(&fields)
            .send()
            .await?;

        handle_response(response).await
    }

    async fn update(
        &self,
        kind: EntityKind,
        id: &str,
        fields: Record,
    ) -> Result<Record, ClientError> {
        let response = self
            .request(Method::PUT, &Self::record_path(kind, id))
            .json(&fields)
            .send()
            .await?;

        handle_response(response).await
    }

    async fn delete(&self, kind: EntityKind, id: &str) -> Result<(), ClientError> {
        let response = self
            .request(Method::DELETE, &Self::record_path(kind, id))
            .send()
            .await?;

        check_status(response).await.map(|_| ())
    }

    async fn find_by(
        &self,
        kind: EntityKind,
        field: &str,
        value: &str,
    ) -> Result<Vec<Record>, ClientError> {
        let mut filter = Record::new();
        filter.insert(field.to_string(), value.into());
        let q = serde_json::to_string(&filter)?;

        let response = self
            .request(Method::GET, &Self::collection_path(kind))
            .query(&[("q", q)])
            .send()
            .await?;

        handle_response(response).await
    }

    // upsert_by_key keeps the check-then-act default: the remote API offers
    // no conditional write.
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_backend_trims_trailing_slash() {
        let backend = HttpBackend::new("http://localhost:9000/api/", None).unwrap();
        assert_eq!(backend.base_url(), "http://localhost:9000/api");
    }

    #[test]
    fn test_http_backend_paths() {
        assert_eq!(
            HttpBackend::collection_path(EntityKind::OwnBrand),
            "/entities/OwnBrand"
        );
        assert_eq!(
            HttpBackend::record_path(EntityKind::Store, "S1"),
            "/entities/Store/S1"
        );
    }

    #[test]
    fn test_client_error_not_found_detection() {
        assert!(ClientError::NotFound("gone".into()).is_not_found());
        assert!(ClientError::Api {
            status: 404,
            message: String::new()
        }
        .is_not_found());
        assert!(!ClientError::Api {
            status: 500,
            message: String::new()
        }
        .is_not_found());
    }
}
