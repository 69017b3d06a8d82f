use case_forge::yt::TranscriptSource;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub struct MockTranscriptSource {
    pub transcript: String,
    pub calls: Arc<Mutex<Vec<String>>>,
    pub fail_with: Option<String>,
}

impl MockTranscriptSource {
    pub fn new(transcript: &str) -> Self {
        Self {
            transcript: transcript.to_string(),
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_with: None,
        }
    }

    pub fn failing(msg: &str) -> Self {
        Self {
            transcript: String::new(),
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_with: Some(msg.to_string()),
        }
    }
}

impl TranscriptSource for MockTranscriptSource {
    const PROVIDER: &'static str = "mock-captions";
    type Error = anyhow::Error;

    async fn fetch_transcript(&self, video_id: &str) -> Result<String, Self::Error> {
        self.calls.lock().unwrap().push(video_id.to_string());
        if let Some(ref msg) = self.fail_with {
            return Err(anyhow::anyhow!("{}", msg));
        }
        Ok(self.transcript.clone())
    }
}

/// Fails the test if the pipeline ever asks it for a transcript
#[derive(Clone, Default)]
pub struct PanickingTranscriptSource;

impl TranscriptSource for PanickingTranscriptSource {
    const PROVIDER: &'static str = "panicking";
    type Error = anyhow::Error;

    async fn fetch_transcript(&self, video_id: &str) -> Result<String, Self::Error> {
        panic!("transcript lookup must be skipped, was asked for {video_id}");
    }
}
