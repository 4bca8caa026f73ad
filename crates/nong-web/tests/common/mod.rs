#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use nong_config::Config;
use nong_core::state::AppState;
use nong_core::vocabulary::Vocabulary;
use nong_speech::{SpeechBackend, SpeechClient, SpeechError};
use nong_translator::{ProviderMetadata, SourceLanguage, TranslateError, Translation, Translator};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

pub const VOCAB: &str = include_str!("../../../../data/shanghainese_vocab.json");

/// Echoes the source language, or fails with an API error
pub struct StubTranslator {
    pub fail: bool,
    pub languages: Vec<SourceLanguage>,
}

#[async_trait]
impl Translator for StubTranslator {
    async fn translate(
        &self,
        text: &str,
        source: SourceLanguage,
    ) -> Result<Translation, TranslateError> {
        if self.fail {
            return Err(TranslateError::ApiError("HTTP 503: overloaded".to_string()));
        }
        Ok(Translation {
            text: format!("[{}] {text}", source.label()),
            source,
            provider: "stub".to_string(),
            model: None,
        })
    }

    fn supported_languages(&self) -> Vec<SourceLanguage> {
        self.languages.clone()
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "stub".to_string(),
            model: "none".to_string(),
            requires_api_key: false,
        }
    }
}

pub struct StubSpeech(pub Option<&'static [u8]>);

#[async_trait]
impl SpeechBackend for StubSpeech {
    async fn synthesize(&self, _text: &str, _speed: f32) -> Result<Vec<u8>, SpeechError> {
        self.0
            .map(<[u8]>::to_vec)
            .ok_or_else(|| SpeechError::RemoteUnavailable("space is sleeping".to_string()))
    }

    fn id(&self) -> &'static str {
        "stub"
    }
}

pub struct TestApp {
    pub dir: TempDir,
    pub app: Router,
}

pub struct Options {
    pub vocabulary: Vocabulary,
    pub translator_fails: bool,
    pub languages: Vec<SourceLanguage>,
    pub primary_audio: Option<&'static [u8]>,
    pub fallback_audio: Option<&'static [u8]>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            vocabulary: Vocabulary::from_json(VOCAB).unwrap(),
            translator_fails: false,
            languages: SourceLanguage::ALL.to_vec(),
            primary_audio: Some(b"RIFFprimary"),
            fallback_audio: None,
        }
    }
}

pub fn create_test_app(options: Options) -> TestApp {
    let dir = tempfile::tempdir().unwrap();

    let mut config = Config::default();
    config.storage.static_dir = dir.path().join("static").display().to_string();

    let speech = SpeechClient::new(
        Arc::new(StubSpeech(options.primary_audio)),
        Some(Arc::new(StubSpeech(options.fallback_audio))),
    );
    let translator = Arc::new(StubTranslator {
        fail: options.translator_fails,
        languages: options.languages,
    });
    let state = AppState::new(config, options.vocabulary, translator, speech);

    TestApp {
        dir,
        app: nong_web::create_app(state),
    }
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

pub async fn post_json(app: &Router, uri: &str, body: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}
