use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;

use crate::{SpeechBackend, SpeechError};

/// OpenAI-compatible `/audio/speech` endpoint with a fixed voice
#[derive(Clone)]
pub struct OpenAiSpeech {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    model: String,
    voice: String,
}

impl OpenAiSpeech {
    pub fn new(
        api_url: &str,
        api_key: &str,
        model: &str,
        voice: &str,
        timeout: Duration,
    ) -> Result<Self, SpeechError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            model: model.to_string(),
            voice: voice.to_string(),
        })
    }
}

#[derive(Serialize)]
struct SpeechRequest<'a> {
    model: &'a str,
    voice: &'a str,
    input: &'a str,
    speed: f32,
    response_format: &'a str,
}

#[async_trait]
impl SpeechBackend for OpenAiSpeech {
    async fn synthesize(&self, text: &str, speed: f32) -> Result<Vec<u8>, SpeechError> {
        if self.api_key.is_empty() {
            return Err(SpeechError::RemoteUnavailable("no API key configured".to_string()));
        }

        let request = SpeechRequest {
            model: &self.model,
            voice: &self.voice,
            input: text,
            speed,
            response_format: "wav",
        };

        let response = self
            .client
            .post(format!("{}/audio/speech", self.api_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SpeechError::RemoteUnavailable(format!("HTTP {status}: {body}")));
        }

        Ok(response.bytes().await?.to_vec())
    }

    fn id(&self) -> &'static str {
        "openai-tts"
    }
}
