use std::{path::PathBuf, time::Duration};

/// Settings handed to each component at construction
#[derive(Debug, Clone)]
pub struct Config {
    /// `None` keeps the service up; generation then fails per request
    pub openai_api_key: Option<String>,
    pub openai_model: String,
    pub openai_base_url: String,
    pub oembed_url: String,
    pub transcript_api_url: String,
    pub transcript_lang: String,
    /// Applied to every outbound HTTP call
    pub upstream_timeout: Duration,
    /// Overall deadline for one `/generate` request
    pub request_timeout: Duration,
    /// Destination of the `render` command, the HTTP path never writes here
    pub out_dir: PathBuf,
}

impl Config {
    pub const DEFAULT_OPENAI_MODEL: &'static str = "gpt-4o-mini";
    pub const DEFAULT_OPENAI_BASE_URL: &'static str = "https://api.openai.com/v1";
    pub const DEFAULT_OEMBED_URL: &'static str = "https://www.youtube.com/oembed";
    pub const DEFAULT_TRANSCRIPT_API_URL: &'static str = "https://www.youtube.com/api/timedtext";
    pub const DEFAULT_TRANSCRIPT_LANG: &'static str = "en";
    pub const DEFAULT_OUT_DIR: &'static str = "/tmp/out";

    /// Shared client for all upstream calls, carrying the per call timeout
    pub fn http_client(&self) -> reqwest::Result<reqwest::Client> {
        reqwest::Client::builder()
            .timeout(self.upstream_timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            openai_api_key: None,
            openai_model: Self::DEFAULT_OPENAI_MODEL.into(),
            openai_base_url: Self::DEFAULT_OPENAI_BASE_URL.into(),
            oembed_url: Self::DEFAULT_OEMBED_URL.into(),
            transcript_api_url: Self::DEFAULT_TRANSCRIPT_API_URL.into(),
            transcript_lang: Self::DEFAULT_TRANSCRIPT_LANG.into(),
            upstream_timeout: Duration::from_secs(60),
            request_timeout: Duration::from_secs(300),
            out_dir: PathBuf::from(Self::DEFAULT_OUT_DIR),
        }
    }
}
