use case_document::VideoMetadata;
use serde::Deserialize;

use crate::{
    yt::{MetadataFetcher, UpstreamError, VideoUrl},
    Config,
};

/// Resolves video metadata through the public oEmbed endpoint, no API key needed
#[derive(Debug, Clone)]
pub struct OEmbedClient {
    client: reqwest::Client,
    endpoint: String,
}

#[derive(Debug, Deserialize)]
struct OEmbedResponse {
    title: String,
    #[serde(default)]
    author_name: String,
    #[serde(default)]
    thumbnail_url: String,
    author_url: Option<String>,
    provider_name: Option<String>,
}

impl From<OEmbedResponse> for VideoMetadata {
    fn from(value: OEmbedResponse) -> Self {
        VideoMetadata {
            title: value.title,
            author: value.author_name,
            thumbnail_url: value.thumbnail_url,
            author_url: value.author_url,
            provider_name: value.provider_name,
        }
    }
}

impl OEmbedClient {
    pub fn new(client: reqwest::Client) -> Self {
        Self {
            client,
            endpoint: Config::DEFAULT_OEMBED_URL.into(),
        }
    }

    pub fn from_config(config: &Config, client: reqwest::Client) -> Self {
        Self::new(client).with_endpoint(&config.oembed_url)
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

impl MetadataFetcher for OEmbedClient {
    const PROVIDER: &'static str = "youtube-oembed";

    type Error = UpstreamError;

    #[tracing::instrument(skip(self), fields(video_id = %video.video_id()))]
    async fn fetch_metadata(&self, video: &VideoUrl) -> Result<VideoMetadata, Self::Error> {
        let resp = self
            .client
            .get(&self.endpoint)
            .query(&[("url", video.canonical().as_str()), ("format", "json")])
            .send()
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to make oEmbed request"))?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let message = resp.text().await.unwrap_or_default();
            tracing::error!(status, "oEmbed lookup rejected");
            return Err(UpstreamError::Status { status, message });
        }

        let body = resp.text().await?;
        let oembed = serde_json::from_str::<OEmbedResponse>(&body)
            .inspect_err(|e| tracing::error!(error = %e, "Failed to decode oEmbed response"))?;

        Ok(oembed.into())
    }
}
