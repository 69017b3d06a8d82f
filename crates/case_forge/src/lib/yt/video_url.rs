use std::{fmt, str::FromStr};

use url::Url;

const MAX_VIDEO_ID_LEN: usize = 64;

const YOUTUBE_HOSTS: &[&str] = &[
    "youtube.com",
    "www.youtube.com",
    "m.youtube.com",
    "music.youtube.com",
    "youtube-nocookie.com",
    "www.youtube-nocookie.com",
];
const SHORT_LINK_HOST: &str = "youtu.be";

/// A YouTube URL that passed validation, together with its video id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoUrl {
    raw: String,
    video_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidVideoUrl {
    #[error("`{0}` is not a valid URL")]
    Unparseable(String),
    #[error("unsupported URL scheme `{0}`, expected http or https")]
    Scheme(String),
    #[error("`{0}` is not a recognized YouTube host")]
    Host(String),
    #[error("URL does not point to a video")]
    MissingVideoId,
    #[error("`{0}` is not a valid video id")]
    VideoId(String),
}

impl VideoUrl {
    const WATCH_URL: &'static str = "https://www.youtube.com/watch";

    pub fn parse(raw: &str) -> Result<Self, InvalidVideoUrl> {
        let trimmed = raw.trim();
        let url = Url::parse(trimmed).map_err(|_| InvalidVideoUrl::Unparseable(trimmed.into()))?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(InvalidVideoUrl::Scheme(url.scheme().into()));
        }

        let host = url
            .host_str()
            .map(str::to_ascii_lowercase)
            .ok_or_else(|| InvalidVideoUrl::Host(String::new()))?;

        let segments: Vec<&str> = url
            .path_segments()
            .map(|s| s.filter(|seg| !seg.is_empty()).collect())
            .unwrap_or_default();

        let candidate = if host == SHORT_LINK_HOST {
            segments.first().map(|s| s.to_string())
        } else if YOUTUBE_HOSTS.contains(&host.as_str()) {
            match segments.as_slice() {
                ["watch"] => url
                    .query_pairs()
                    .find(|(key, _)| key == "v")
                    .map(|(_, value)| value.into_owned()),
                ["shorts" | "embed" | "live" | "v", id, ..] => Some(id.to_string()),
                _ => None,
            }
        } else {
            return Err(InvalidVideoUrl::Host(host));
        };

        let video_id = candidate.ok_or(InvalidVideoUrl::MissingVideoId)?;
        let video_id = validate_video_id(&video_id)?;

        Ok(Self {
            raw: trimmed.to_string(),
            video_id,
        })
    }

    pub fn video_id(&self) -> &str {
        &self.video_id
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Normalized `watch?v=` form, used for upstream lookups
    pub fn canonical(&self) -> String {
        format!("{}?v={}", Self::WATCH_URL, self.video_id)
    }
}

/// Only ASCII letters, digits, `-` and `_` are accepted
fn validate_video_id(raw: &str) -> Result<String, InvalidVideoUrl> {
    let trimmed = raw.trim();

    let valid = !trimmed.is_empty()
        && trimmed.len() <= MAX_VIDEO_ID_LEN
        && trimmed
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_'));

    if !valid {
        return Err(InvalidVideoUrl::VideoId(trimmed.into()));
    }

    Ok(trimmed.to_string())
}

impl FromStr for VideoUrl {
    type Err = InvalidVideoUrl;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for VideoUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
