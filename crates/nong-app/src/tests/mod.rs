use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use nong_config::Config;
use nong_core::progress::{ProgressRecord, ProgressStore};
use nong_core::state::AppState;
use nong_core::vocabulary::Vocabulary;
use nong_speech::{SpeechBackend, SpeechClient, SpeechError};
use nong_translator::{ProviderMetadata, SourceLanguage, TranslateError, Translation, Translator};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tempfile::TempDir;

use crate::console::Console;
use crate::session::Session;


pub(crate) const VOCAB: &str = include_str!("../../../../data/shanghainese_vocab.json");

/// Answers every request with a fixed reply, or fails when `reply` is `None`
pub(crate) struct FakeTranslator {
    reply: Option<String>,
    pub requests: Mutex<Vec<(String, SourceLanguage)>>,
}

impl FakeTranslator {
    pub(crate) fn replying(reply: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Some(reply.to_string()),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub(crate) fn failing() -> Arc<Self> {
        Arc::new(Self {
            reply: None,
            requests: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl Translator for FakeTranslator {
    async fn translate(
        &self,
        text: &str,
        source: SourceLanguage,
    ) -> Result<Translation, TranslateError> {
        self.requests.lock().unwrap().push((text.to_string(), source));
        match &self.reply {
            Some(reply) => Ok(Translation {
                text: reply.clone(),
                source,
                provider: "fake".to_string(),
                model: None,
            }),
            None => Err(TranslateError::RateLimitExceeded),
        }
    }

    fn supported_languages(&self) -> Vec<SourceLanguage> {
        SourceLanguage::ALL.to_vec()
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "fake".to_string(),
            model: "none".to_string(),
            requires_api_key: false,
        }
    }
}

/// Speech backend returning canned audio, or always down
pub(crate) struct CannedSpeech(pub Option<Vec<u8>>);

#[async_trait]
impl SpeechBackend for CannedSpeech {
    async fn synthesize(&self, _text: &str, _speed: f32) -> Result<Vec<u8>, SpeechError> {
        self.0
            .clone()
            .ok_or_else(|| SpeechError::RemoteUnavailable("offline".to_string()))
    }

    fn id(&self) -> &'static str {
        "canned"
    }
}

pub(crate) struct Harness {
    pub dir: TempDir,
    pub state: AppState,
    pub store: ProgressStore,
}

impl Harness {
    pub(crate) fn new(
        vocabulary: Vocabulary,
        translator: Arc<dyn Translator>,
        audio: Option<Vec<u8>>,
    ) -> Self {
        let dir = tempfile::tempdir().unwrap();

        let mut config = Config::default();
        config.storage.static_dir = dir.path().join("static").display().to_string();
        config.storage.progress_file = dir.path().join("progress.json").display().to_string();

        let speech = SpeechClient::new(Arc::new(CannedSpeech(audio)), None);
        let store = ProgressStore::new(&config.storage.progress_file);
        let state = AppState::new(config, vocabulary, translator, speech);

        Self { dir, state, store }
    }

    pub(crate) fn with_sample_vocabulary() -> Self {
        Self::new(
            Vocabulary::from_json(VOCAB).unwrap(),
            FakeTranslator::replying("侬好"),
            Some(b"RIFF".to_vec()),
        )
    }

    /// Feed `input` to a fresh session; returns the transcript and final progress
    pub(crate) async fn run(&self, input: &str, seed: u64) -> (String, ProgressRecord) {
        let progress = self.store.load().unwrap();
        let console = Console::new(input.as_bytes(), Vec::new());
        let mut session = Session::new(
            self.state.clone(),
            self.store.clone(),
            progress,
            console,
            StdRng::seed_from_u64(seed),
        );

        session.run().await.unwrap();

        let progress = session.progress().clone();
        let output = String::from_utf8(session.into_console().into_output()).unwrap();
        (output, progress)
    }
}
