use std::sync::Arc;

use nong_config::Config;
use nong_speech::SpeechClient;
use nong_translator::Translator;

use crate::vocabulary::Vocabulary;

/// Shared, read-only services behind both front ends
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub vocabulary: Arc<Vocabulary>,
    pub translator: Arc<dyn Translator>,
    pub speech: Arc<SpeechClient>,
}

impl AppState {
    pub fn new(
        config: Config,
        vocabulary: Vocabulary,
        translator: Arc<dyn Translator>,
        speech: SpeechClient,
    ) -> Self {
        Self {
            config: Arc::new(config),
            vocabulary: Arc::new(vocabulary),
            translator,
            speech: Arc::new(speech),
        }
    }
}
