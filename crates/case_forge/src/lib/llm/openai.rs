use case_document::CaseStudyContent;
use reqwest::Client;
use serde::Deserialize;

use crate::{parser::parse_case_study, Config, ContentGenerator, GenerationInput};

#[derive(Debug, Clone)]
pub struct OpenAIClient {
    client: Client,
    api_key: Option<String>,
    model: String,
    base_url: String,
}

#[derive(Debug, thiserror::Error)]
pub enum OpenAIError {
    #[error("HTTP error: {0}")]
    Request(#[from] reqwest::Error),
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },
    #[error("OPENAI_API_KEY is not configured")]
    MissingApiKey,
}

impl OpenAIClient {
    const SYSTEM_PROMPT: &'static str = include_str!("./prompts/system_0.txt");
    const USER_PROMPT: &'static str = include_str!("./prompts/user_0.txt");

    pub fn new(client: Client, api_key: Option<String>) -> Self {
        Self {
            client,
            api_key,
            model: Config::DEFAULT_OPENAI_MODEL.into(),
            base_url: Config::DEFAULT_OPENAI_BASE_URL.into(),
        }
    }

    pub fn from_config(config: &Config, client: Client) -> Self {
        Self::new(client, config.openai_api_key.clone())
            .with_model(&config.openai_model)
            .with_base_url(&config.openai_base_url)
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub async fn send_completion_request(
        &self,
        user_content: impl Into<String>,
    ) -> Result<CompletionResponse, OpenAIError> {
        let api_key = self
            .api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or(OpenAIError::MissingApiKey)?;

        let body = serde_json::json!({
            "model": self.model,
            "temperature": 0.4,
            "messages": [
                {
                    "role": "system",
                    "content": Self::SYSTEM_PROMPT
                },
                {
                    "role": "user",
                    "content": user_content.into()
                }
            ]
        });

        let resp = self
            .client
            .post(format!("{}/chat/completions", self.base_url.trim_end_matches('/')))
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to make http request"))?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let message = resp.text().await.unwrap_or_default();
            return Err(OpenAIError::Api { status, message });
        }

        Ok(resp.json::<CompletionResponse>().await?)
    }
}

/// Fills the fixed user prompt with the video details and the transcript,
/// cut to `max_transcript_chars` characters.
pub fn build_user_prompt(input: &GenerationInput<'_>, max_transcript_chars: usize) -> String {
    let transcript = input.transcript.trim();
    let transcript = match transcript.char_indices().nth(max_transcript_chars) {
        Some((idx, _)) => &transcript[..idx],
        None => transcript,
    };
    let transcript = if transcript.is_empty() {
        "(no transcript available, rely on the title and channel)"
    } else {
        transcript
    };

    format!(
        "{instructions}\nVideo title: {title}\nChannel: {author}\nURL: {url}\n\n<TRANSCRIPT>\n{transcript}\n</TRANSCRIPT>\n",
        instructions = OpenAIClient::USER_PROMPT,
        title = input.metadata.title,
        author = input.metadata.author,
        url = input.source_url,
    )
}

#[derive(Debug, Deserialize)]
pub struct CompletionResponse {
    pub id: String,
    #[serde(default)]
    pub choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
pub struct CompletionChoice {
    pub index: u32,
    pub message: CompletionMessage,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CompletionMessage {
    pub role: String,
    pub content: Option<String>,
}

impl ContentGenerator for OpenAIClient {
    type Error = OpenAIError;

    #[tracing::instrument(skip_all, fields(model = %self.model))]
    async fn generate(&self, input: GenerationInput<'_>) -> Result<CaseStudyContent, Self::Error> {
        let prompt = build_user_prompt(&input, Self::MAX_TRANSCRIPT_CHARS);

        let response = self
            .send_completion_request(prompt)
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to generate case study"))?;

        // missing content is treated like a response without any markers
        let raw = response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap_or_default();

        if raw.trim().is_empty() {
            tracing::warn!(response_id = %response.id, "Completion returned no content");
        }

        let mut content = parse_case_study(&raw);
        content.source_url = input.source_url.to_string();
        content.video = input.metadata.clone();

        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use case_document::VideoMetadata;

    use super::*;

    fn metadata() -> VideoMetadata {
        VideoMetadata {
            title: "Demo Ad".into(),
            author: "Acme".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_prompt_contains_video_details_and_markers() {
        let metadata = metadata();
        let input = GenerationInput {
            source_url: "https://youtube.com/watch?v=abc123",
            metadata: &metadata,
            transcript: "  Buy the thing.  ",
        };

        let prompt = build_user_prompt(&input, 100);

        assert!(prompt.contains("Video title: Demo Ad"));
        assert!(prompt.contains("Channel: Acme"));
        assert!(prompt.contains("URL: https://youtube.com/watch?v=abc123"));
        assert!(prompt.contains("<TRANSCRIPT>\nBuy the thing.\n</TRANSCRIPT>"));
        for marker in ["[AGENCY]", "[PRODUCT]", "[CAMPAIGN]", "[DIRECTOR]", "[RESULTS]"] {
            assert!(prompt.contains(marker), "missing {marker}");
        }
    }

    #[test]
    fn test_prompt_truncates_on_char_boundary() {
        let metadata = metadata();
        let input = GenerationInput {
            source_url: "u",
            metadata: &metadata,
            transcript: "ééééé",
        };

        let prompt = build_user_prompt(&input, 3);
        assert!(prompt.contains("<TRANSCRIPT>\nééé\n</TRANSCRIPT>"));
    }

    #[test]
    fn test_prompt_notes_missing_transcript() {
        let metadata = metadata();
        let input = GenerationInput {
            source_url: "u",
            metadata: &metadata,
            transcript: "",
        };

        assert!(build_user_prompt(&input, 10).contains("no transcript available"));
    }

    #[tokio::test]
    async fn test_missing_api_key_fails_before_any_request() {
        let metadata = metadata();
        let client = OpenAIClient::new(Client::new(), None).with_base_url("http://127.0.0.1:9");

        let result = client
            .generate(GenerationInput {
                source_url: "https://youtube.com/watch?v=abc123",
                metadata: &metadata,
                transcript: "",
            })
            .await;

        assert!(matches!(result, Err(OpenAIError::MissingApiKey)));
    }

    #[test]
    fn test_completion_response_without_choices_decodes() {
        let response: CompletionResponse =
            serde_json::from_str(r#"{"id": "cmpl-1", "choices": []}"#).unwrap();
        assert!(response.choices.is_empty());
    }
}
