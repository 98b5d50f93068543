//! HTTP client for the homework status endpoint.

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, StatusCode};
use serde_json::Value;

use crate::config::Settings;
use crate::error::{Error, Result};

/// Source of raw homework status responses.
#[async_trait]
pub trait HomeworkSource: Send + Sync {
    /// Fetch all status changes since `from_date` (UNIX seconds).
    async fn fetch_updates(&self, from_date: i64) -> Result<Value>;
}

pub struct PracticumClient {
    client: Client,
    endpoint: String,
    auth_header: String,
}

impl PracticumClient {
    pub fn new(settings: &Settings) -> Self {
        Self {
            client: Client::new(),
            endpoint: settings.endpoint.clone(),
            auth_header: format!("OAuth {}", settings.practicum_token),
        }
    }
}

#[async_trait]
impl HomeworkSource for PracticumClient {
    async fn fetch_updates(&self, from_date: i64) -> Result<Value> {
        tracing::debug!("Requesting {} with from_date={}", self.endpoint, from_date);

        let response = self
            .client
            .get(&self.endpoint)
            .header(AUTHORIZATION, &self.auth_header)
            .query(&[("from_date", from_date)])
            .send()
            .await
            .map_err(|source| Error::ApiTransport {
                endpoint: self.endpoint.clone(),
                from_date,
                source,
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(Error::ApiStatus {
                status: status.as_u16(),
                endpoint: self.endpoint.clone(),
                from_date,
            });
        }

        let body = response.json::<Value>().await.map_err(|source| Error::ApiBody {
            endpoint: self.endpoint.clone(),
            from_date,
            source,
        })?;

        tracing::debug!("Request to {} succeeded", self.endpoint);
        Ok(body)
    }
}
