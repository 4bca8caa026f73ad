use std::time::Duration;

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::{SpeechBackend, SpeechError};

/// Client for a hosted Gradio text-to-speech space
#[derive(Clone)]
pub struct GradioSpeech {
    base_url: String,
    fn_index: u32,
    client: reqwest::Client,
}

impl GradioSpeech {
    pub fn new(base_url: &str, fn_index: u32, timeout: Duration) -> Result<Self, SpeechError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            fn_index,
            client,
        })
    }

    /// Run the space's predict endpoint.
    /// Inputs are the text, the IPA flag (we send characters) and the speed.
    async fn predict(&self, text: &str, speed: f32) -> Result<AudioOutput, SpeechError> {
        let request = PredictRequest {
            fn_index: self.fn_index,
            data: json!([text, false, speed]),
        };

        let response = self
            .client
            .post(format!("{}/run/predict", self.base_url))
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SpeechError::RemoteUnavailable(format!("HTTP {status}: {body}")));
        }

        let body: PredictResponse = response.json().await?;
        body.into_output()
    }

    async fn download(&self, name: &str) -> Result<Vec<u8>, SpeechError> {
        let response = self
            .client
            .get(format!("{}/file={}", self.base_url, name))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SpeechError::RemoteUnavailable(format!(
                "HTTP {status} while downloading {name}"
            )));
        }

        Ok(response.bytes().await?.to_vec())
    }
}

#[async_trait]
impl SpeechBackend for GradioSpeech {
    async fn synthesize(&self, text: &str, speed: f32) -> Result<Vec<u8>, SpeechError> {
        tracing::debug!(space = %self.base_url, "Requesting Shanghainese speech");

        match self.predict(text, speed).await? {
            AudioOutput::File(name) => self.download(&name).await,
            AudioOutput::Inline(audio) => Ok(audio),
        }
    }

    fn id(&self) -> &'static str {
        "gradio-space"
    }
}

#[derive(Serialize)]
struct PredictRequest {
    fn_index: u32,
    data: Value,
}

#[derive(Deserialize)]
struct PredictResponse {
    data: Option<Vec<Value>>,
    error: Option<String>,
}

#[derive(Debug, PartialEq)]
enum AudioOutput {
    /// Server-side temp file, fetched through `/file=`
    File(String),
    /// `data:` URL payload
    Inline(Vec<u8>),
}

impl PredictResponse {
    fn into_output(self) -> Result<AudioOutput, SpeechError> {
        if let Some(error) = self.error {
            return Err(SpeechError::RemoteUnavailable(error));
        }

        let first = self
            .data
            .and_then(|data| data.into_iter().next())
            .ok_or_else(|| SpeechError::InvalidResponse("no output data".to_string()))?;

        parse_output(&first)
    }
}

/// The space answers with either `{"name": path, ...}` or a bare string
fn parse_output(value: &Value) -> Result<AudioOutput, SpeechError> {
    let reference = match value {
        Value::String(s) => Some(s.as_str()),
        Value::Object(map) => map
            .get("name")
            .and_then(Value::as_str)
            .or_else(|| map.get("data").and_then(Value::as_str)),
        _ => None,
    };

    let reference = reference
        .filter(|r| !r.is_empty())
        .ok_or_else(|| SpeechError::InvalidResponse(format!("no audio reference in {value}")))?;

    if let Some(payload) = reference.strip_prefix("data:") {
        let (_, encoded) = payload
            .split_once(',')
            .ok_or_else(|| SpeechError::InvalidResponse("malformed data URL".to_string()))?;
        let audio = STANDARD
            .decode(encoded)
            .map_err(|e| SpeechError::InvalidResponse(format!("bad base64 audio: {e}")))?;
        return Ok(AudioOutput::Inline(audio));
    }

    Ok(AudioOutput::File(reference.to_string()))
}
