use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use nong_config::speech::SpeechConfig;
use nong_config::translator::TranslatorConfig;

pub mod gradio;
pub mod openai;

pub use gradio::GradioSpeech;
pub use openai::OpenAiSpeech;

pub const MIN_SPEED: f32 = 0.5;
pub const MAX_SPEED: f32 = 2.0;

/// Keep the speaking speed inside a range the hosted models handle
pub fn clamp_speed(speed: f32) -> f32 {
    if speed.is_nan() {
        return 1.0;
    }
    speed.clamp(MIN_SPEED, MAX_SPEED)
}

/// Trait that every hosted speech synthesis backend implements
#[async_trait]
pub trait SpeechBackend: Send + Sync {
    /// Returns the synthesized audio bytes
    async fn synthesize(&self, text: &str, speed: f32) -> Result<Vec<u8>, SpeechError>;

    /// Unique backend id, used in logs
    fn id(&self) -> &'static str;
}

#[derive(Debug, thiserror::Error)]
pub enum SpeechError {
    #[error("speech service unavailable: {0}")]
    RemoteUnavailable(String),

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("unexpected response: {0}")]
    InvalidResponse(String),

    #[error("speech service returned no audio")]
    EmptyAudio,

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl SpeechError {
    /// Failures of the hosted service, the only kind that triggers the fallback
    pub fn is_remote(&self) -> bool {
        !matches!(self, SpeechError::Io(_))
    }
}

#[derive(Debug)]
pub struct Synthesis {
    pub audio: Vec<u8>,
    pub provider: &'static str,
    pub used_fallback: bool,
}

/// Primary backend with one optional fallback attempt
#[derive(Clone)]
pub struct SpeechClient {
    primary: Arc<dyn SpeechBackend>,
    fallback: Option<Arc<dyn SpeechBackend>>,
}

impl SpeechClient {
    pub fn new(primary: Arc<dyn SpeechBackend>, fallback: Option<Arc<dyn SpeechBackend>>) -> Self {
        Self { primary, fallback }
    }

    /// Hosted Shanghainese space first, OpenAI speech as the fallback
    pub fn from_config(
        speech: &SpeechConfig,
        translator: &TranslatorConfig,
    ) -> Result<Self, SpeechError> {
        let timeout = Duration::from_secs(speech.timeout_secs);

        let primary = GradioSpeech::new(&speech.space_url, speech.fn_index, timeout)?;
        let fallback = OpenAiSpeech::new(
            &translator.api_url,
            &translator.api_key,
            &speech.fallback_model,
            &speech.fallback_voice,
            timeout,
        )?;

        Ok(Self::new(Arc::new(primary), Some(Arc::new(fallback))))
    }

    pub async fn synthesize(&self, text: &str, speed: f32) -> Result<Synthesis, SpeechError> {
        let speed = clamp_speed(speed);

        let primary_err = match attempt(self.primary.as_ref(), text, speed).await {
            Ok(audio) => {
                return Ok(Synthesis {
                    audio,
                    provider: self.primary.id(),
                    used_fallback: false,
                });
            }
            Err(e) if e.is_remote() => e,
            Err(e) => return Err(e),
        };

        let Some(fallback) = &self.fallback else {
            return Err(primary_err);
        };

        tracing::warn!(
            primary = self.primary.id(),
            fallback = fallback.id(),
            error = %primary_err,
            "Primary speech backend unavailable, falling back"
        );

        let audio = attempt(fallback.as_ref(), text, speed).await?;
        Ok(Synthesis {
            audio,
            provider: fallback.id(),
            used_fallback: true,
        })
    }

    /// Writes the audio to `path`. `None` means speech is unavailable;
    /// the failure has already been logged.
    pub async fn synthesize_to_file(&self, text: &str, speed: f32, path: &Path) -> Option<PathBuf> {
        let synthesis = match self.synthesize(text, speed).await {
            Ok(s) => s,
            Err(e) => {
                tracing::error!(error = %e, "Speech synthesis failed");
                return None;
            }
        };

        if let Err(e) = write_audio(path, &synthesis.audio).await {
            tracing::error!(path = %path.display(), error = %e, "Failed to write audio file");
            return None;
        }

        tracing::info!(
            path = %path.display(),
            provider = synthesis.provider,
            bytes = synthesis.audio.len(),
            "Audio saved"
        );
        Some(path.to_path_buf())
    }
}

async fn attempt(
    backend: &dyn SpeechBackend,
    text: &str,
    speed: f32,
) -> Result<Vec<u8>, SpeechError> {
    let audio = backend.synthesize(text, speed).await?;
    if audio.is_empty() {
        return Err(SpeechError::EmptyAudio);
    }
    Ok(audio)
}

async fn write_audio(path: &Path, audio: &[u8]) -> Result<(), SpeechError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(path, audio).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    struct Scripted {
        id: &'static str,
        result: fn() -> Result<Vec<u8>, SpeechError>,
        calls: AtomicUsize,
        last_speed: std::sync::Mutex<Option<f32>>,
    }

    impl Scripted {
        fn new(id: &'static str, result: fn() -> Result<Vec<u8>, SpeechError>) -> Arc<Self> {
            Arc::new(Self {
                id,
                result,
                calls: AtomicUsize::new(0),
                last_speed: std::sync::Mutex::new(None),
            })
        }
    }

    #[async_trait]
    impl SpeechBackend for Scripted {
        async fn synthesize(&self, _text: &str, speed: f32) -> Result<Vec<u8>, SpeechError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_speed.lock().unwrap() = Some(speed);
            (self.result)()
        }

        fn id(&self) -> &'static str {
            self.id
        }
    }

    fn audio() -> Result<Vec<u8>, SpeechError> {
        Ok(b"RIFF....WAVE".to_vec())
    }

    fn down() -> Result<Vec<u8>, SpeechError> {
        Err(SpeechError::RemoteUnavailable("rate limited".to_string()))
    }

    fn silent() -> Result<Vec<u8>, SpeechError> {
        Ok(Vec::new())
    }

    fn disk() -> Result<Vec<u8>, SpeechError> {
        Err(SpeechError::Io(std::io::Error::other("disk full")))
    }

    #[test]
    fn speed_is_clamped() {
        assert_eq!(clamp_speed(0.1), MIN_SPEED);
        assert_eq!(clamp_speed(3.0), MAX_SPEED);
        assert_eq!(clamp_speed(1.25), 1.25);
        assert_eq!(clamp_speed(f32::NAN), 1.0);
    }

    #[tokio::test]
    async fn primary_success_skips_fallback() {
        let primary = Scripted::new("primary", audio);
        let fallback = Scripted::new("fallback", audio);
        let client = SpeechClient::new(primary.clone(), Some(fallback.clone()));

        let synthesis = client.synthesize("侬好", 1.0).await.unwrap();

        assert_eq!(synthesis.provider, "primary");
        assert!(!synthesis.used_fallback);
        assert_eq!(fallback.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn failing_primary_falls_back_once_with_same_speed() {
        let primary = Scripted::new("primary", down);
        let fallback = Scripted::new("fallback", audio);
        let client = SpeechClient::new(primary.clone(), Some(fallback.clone()));

        let synthesis = client.synthesize("侬好", 5.0).await.unwrap();

        assert_eq!(synthesis.provider, "fallback");
        assert!(synthesis.used_fallback);
        assert_eq!(primary.calls.load(Ordering::SeqCst), 1);
        assert_eq!(fallback.calls.load(Ordering::SeqCst), 1);
        assert_eq!(*primary.last_speed.lock().unwrap(), Some(MAX_SPEED));
        assert_eq!(*fallback.last_speed.lock().unwrap(), Some(MAX_SPEED));
    }

    #[tokio::test]
    async fn empty_primary_audio_counts_as_failure() {
        let client = SpeechClient::new(
            Scripted::new("primary", silent),
            Some(Scripted::new("fallback", audio)),
        );

        let synthesis = client.synthesize("侬好", 1.0).await.unwrap();
        assert!(synthesis.used_fallback);
    }

    #[tokio::test]
    async fn local_errors_do_not_trigger_fallback() {
        let fallback = Scripted::new("fallback", audio);
        let client = SpeechClient::new(Scripted::new("primary", disk), Some(fallback.clone()));

        let err = client.synthesize("侬好", 1.0).await.unwrap_err();
        assert!(matches!(err, SpeechError::Io(_)));
        assert_eq!(fallback.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn fallback_writes_non_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("audio").join("out.wav");
        let client = SpeechClient::new(
            Scripted::new("primary", down),
            Some(Scripted::new("fallback", audio)),
        );

        let written = client.synthesize_to_file("侬好", 1.0, &path).await;

        assert_eq!(written.as_deref(), Some(path.as_path()));
        let bytes = std::fs::read(&path).unwrap();
        assert!(!bytes.is_empty());
    }

    #[tokio::test]
    async fn both_failing_returns_none_and_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.wav");
        let client = SpeechClient::new(
            Scripted::new("primary", down),
            Some(Scripted::new("fallback", down)),
        );

        assert!(client.synthesize_to_file("侬好", 1.0, &path).await.is_none());
        assert!(!path.exists());
    }
}
