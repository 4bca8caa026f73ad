use serde::{Deserialize, Serialize};

use crate::Vars;

fn default_space_url() -> String {
    "https://cjangcjengh-shanghainese-tts.hf.space".to_string()
}

fn default_fn_index() -> u32 {
    1
}

fn default_fallback_model() -> String {
    "tts-1".to_string()
}

fn default_fallback_voice() -> String {
    "alloy".to_string()
}

fn default_speed() -> f32 {
    1.0
}

fn default_timeout_secs() -> u64 {
    120
}

#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct SpeechConfig {
    /// Hosted Shanghainese TTS space (primary)
    #[serde(default = "default_space_url")]
    pub space_url: String,
    /// Space endpoint that accepts a speaking speed
    #[serde(default = "default_fn_index")]
    pub fn_index: u32,
    #[serde(default = "default_fallback_model")]
    pub fallback_model: String,
    #[serde(default = "default_fallback_voice")]
    pub fallback_voice: String,
    #[serde(default = "default_speed")]
    pub default_speed: f32,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            space_url: default_space_url(),
            fn_index: default_fn_index(),
            fallback_model: default_fallback_model(),
            fallback_voice: default_fallback_voice(),
            default_speed: default_speed(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl SpeechConfig {
    pub(crate) fn from_vars<F>(vars: &Vars<F>) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            space_url: vars
                .string_or("TTS_SPACE_URL", &default_space_url())
                .trim_end_matches('/')
                .to_string(),
            fn_index: vars.parse_or("TTS_FN_INDEX", default_fn_index()),
            fallback_model: vars.string_or("TTS_FALLBACK_MODEL", &default_fallback_model()),
            fallback_voice: vars.string_or("TTS_FALLBACK_VOICE", &default_fallback_voice()),
            default_speed: vars.parse_or("TTS_SPEED", default_speed()),
            timeout_secs: vars.parse_or("TTS_TIMEOUT_SECS", default_timeout_secs()),
        }
    }
}
