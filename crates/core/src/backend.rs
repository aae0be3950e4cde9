use async_trait::async_trait;
use reqwest::{
    Client, Response,
    multipart::{Form, Part},
};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::{
    config::ConsoleConfig,
    error::{ConsoleError, Result},
    types::{HealthStatus, MediaFile, MediaType, SearchResponse, Transcription, Video},
};

/// The media intelligence backend, one method per endpoint.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Backend: Send + Sync {
    async fn fetch_videos(&self) -> Result<Vec<Video>>;
    async fn fetch_transcriptions(&self) -> Result<Vec<Transcription>>;
    async fn search(&self, term: &str) -> Result<SearchResponse>;
    async fn process_video(&self, file: &MediaFile) -> Result<Video>;
    async fn process_audio(&self, file: &MediaFile) -> Result<Transcription>;
    async fn health(&self) -> Result<HealthStatus>;
}

pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(config: &ConsoleConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        debug!(path, "GET");
        let response = self.client.get(self.url(path)).send().await?;
        decode(path, response).await
    }

    async fn post_file<T: DeserializeOwned>(
        &self,
        media_type: MediaType,
        file: &MediaFile,
    ) -> Result<T> {
        let path = media_type.endpoint();
        debug!(path, file = %file.name, bytes = file.bytes.len(), "POST multipart");

        let part = Part::bytes(file.bytes.clone()).file_name(file.name.clone());
        let form = Form::new().part("file", part);

        let response = self
            .client
            .post(self.url(path))
            .multipart(form)
            .send()
            .await?;
        decode(path, response).await
    }
}

#[async_trait]
impl Backend for HttpBackend {
    async fn fetch_videos(&self) -> Result<Vec<Video>> {
        self.get_json("/videos").await
    }

    async fn fetch_transcriptions(&self) -> Result<Vec<Transcription>> {
        self.get_json("/transcriptions").await
    }

    async fn search(&self, term: &str) -> Result<SearchResponse> {
        debug!(term, "GET /search");
        let response = self
            .client
            .get(self.url("/search"))
            .query(&[("term", term)])
            .send()
            .await?;
        decode("/search", response).await
    }

    async fn process_video(&self, file: &MediaFile) -> Result<Video> {
        self.post_file(MediaType::Video, file).await
    }

    async fn process_audio(&self, file: &MediaFile) -> Result<Transcription> {
        self.post_file(MediaType::Audio, file).await
    }

    async fn health(&self) -> Result<HealthStatus> {
        self.get_json("/health").await
    }
}

async fn decode<T: DeserializeOwned>(endpoint: &str, response: Response) -> Result<T> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ConsoleError::BackendStatus {
            endpoint: endpoint.to_string(),
            status: status.as_u16(),
            body: error_detail(&body),
        });
    }

    Ok(response.json::<T>().await?)
}

/// Pull `detail` out of a JSON error body, falling back to the raw text
fn error_detail(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| match &value["detail"] {
            serde_json::Value::String(detail) => Some(detail.clone()),
            serde_json::Value::Null => None,
            other => Some(other.to_string()),
        })
        .unwrap_or_else(|| body.trim().to_string())
}
