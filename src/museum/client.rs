use async_trait::async_trait;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::Config;
use crate::state::data::{ObjectBody, SearchBody};

#[derive(Debug, Error)]
pub enum MuseumError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("{url} returned status {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },
    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("Failed to prepare image: {0}")]
    Image(#[from] image::ImageError),
    #[error("Task join error: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// The calls the app makes against a museum collection
#[async_trait]
pub trait MuseumApi: Send + Sync {
    /// Search for `query` among objects with images
    async fn search(&self, query: &str) -> Result<SearchBody, MuseumError>;

    /// Fetch the detail record of one object
    async fn object(&self, id: &str) -> Result<ObjectBody, MuseumError>;

    /// Download an image
    async fn image_bytes(&self, url: &str) -> Result<Vec<u8>, MuseumError>;
}

/// Client for the Metropolitan Museum of Art collection API
#[derive(Debug, Clone)]
pub struct MetClient {
    http: reqwest::Client,
    config: Config,
}

impl MetClient {
    pub fn new(config: Config) -> Result<Self, MuseumError> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self { http, config })
    }

    /// Search restricted to objects that have images
    fn search_request(&self, query: &str) -> reqwest::RequestBuilder {
        self.http
            .get(&self.config.search_url)
            .query(&[("q", query), ("hasImages", "true")])
    }

    async fn get(&self, request: reqwest::RequestBuilder) -> Result<reqwest::Response, MuseumError> {
        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let url = response.url().to_string();
            warn!("Museum API error response ({}): {}", status, url);
            return Err(MuseumError::Status { url, status });
        }
        Ok(response)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, MuseumError> {
        let body = self.get(request).await?.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait]
impl MuseumApi for MetClient {
    async fn search(&self, query: &str) -> Result<SearchBody, MuseumError> {
        debug!("Museum search request: q={:?}", query);
        self.get_json(self.search_request(query)).await
    }

    async fn object(&self, id: &str) -> Result<ObjectBody, MuseumError> {
        let url = self.config.object_url_for(id);
        debug!("Museum object request: {}", url);

        // Unknown objects come back as 404 with a JSON message body. That
        // body decodes fine and is filtered out as an incomplete record.
        let response = self.http.get(url).send().await?;
        if !response.status().is_success() {
            debug!("Object {} returned status {}", id, response.status());
        }
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    async fn image_bytes(&self, url: &str) -> Result<Vec<u8>, MuseumError> {
        let bytes = self.get(self.http.get(url)).await?.bytes().await?;
        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_search_request_url() {
        let client = MetClient::new(Config::default()).unwrap();
        let request = client.search_request("sun flowers").build().unwrap();

        assert_eq!(
            request.url().as_str(),
            "https://collectionapi.metmuseum.org/public/collection/v1/search?q=sun+flowers&hasImages=true"
        );
    }

    #[test]
    fn test_error_messages() {
        let err = MuseumError::Status {
            url: "http://x/objects/1".to_string(),
            status: reqwest::StatusCode::NOT_FOUND,
        };
        assert_eq!(err.to_string(), "http://x/objects/1 returned status 404 Not Found");

        let err: MuseumError = serde_json::from_str::<Value>("{").unwrap_err().into();
        assert!(err.to_string().starts_with("Failed to decode response"));
    }
}
