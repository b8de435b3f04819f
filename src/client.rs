use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, Url};

use crate::error::FetchError;
use crate::model::ResultRecord;

#[derive(Debug, Clone)]
pub struct ResultClient {
    http: Client,
    endpoint: Url,
}

impl ResultClient {
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self, FetchError> {
        let endpoint =
            Url::parse(endpoint).map_err(|err| FetchError::Endpoint(format!("{endpoint}: {err}")))?;
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self { http, endpoint })
    }

    pub async fn fetch_record(&self) -> Result<ResultRecord, FetchError> {
        log::info!("Fetching result record from {}", self.endpoint);
        let body = self.get(self.endpoint.clone()).await?;
        let record: ResultRecord = serde_json::from_slice(&body)?;
        log::info!(
            "Loaded record {} with {} attachment(s)",
            record.patient_code,
            record.results.len()
        );
        Ok(record)
    }

    /// Fetches an absolute URL, or a path relative to the endpoint.
    pub async fn fetch_attachment(&self, reference: &str) -> Result<Arc<[u8]>, FetchError> {
        let url = self.resolve(reference)?;
        log::info!("Fetching attachment {url}");
        let body = self.get(url).await?;
        Ok(Arc::from(body))
    }

    pub fn resolve(&self, reference: &str) -> Result<Url, FetchError> {
        self.endpoint
            .join(reference)
            .map_err(|err| FetchError::Endpoint(format!("{reference}: {err}")))
    }

    async fn get(&self, url: Url) -> Result<Vec<u8>, FetchError> {
        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }
        Ok(response.bytes().await?.to_vec())
    }
}
