use case_document::VideoMetadata;
use case_forge::yt::{MetadataFetcher, VideoUrl};
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub struct MockMetadataFetcher {
    pub metadata: VideoMetadata,
    pub calls: Arc<Mutex<Vec<String>>>,
    pub fail_with: Option<String>,
}

impl MockMetadataFetcher {
    pub fn new(title: &str, author: &str) -> Self {
        Self {
            metadata: VideoMetadata {
                title: title.to_string(),
                author: author.to_string(),
                thumbnail_url: "https://i.ytimg.com/vi/mock/hqdefault.jpg".to_string(),
                author_url: None,
                provider_name: Some("YouTube".to_string()),
            },
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_with: None,
        }
    }

    pub fn failing(msg: &str) -> Self {
        Self {
            metadata: VideoMetadata::default(),
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_with: Some(msg.to_string()),
        }
    }
}

impl MetadataFetcher for MockMetadataFetcher {
    const PROVIDER: &'static str = "mock-oembed";
    type Error = anyhow::Error;

    async fn fetch_metadata(&self, video: &VideoUrl) -> Result<VideoMetadata, Self::Error> {
        self.calls.lock().unwrap().push(video.video_id().to_string());
        if let Some(ref msg) = self.fail_with {
            return Err(anyhow::anyhow!("{}", msg));
        }
        Ok(self.metadata.clone())
    }
}
