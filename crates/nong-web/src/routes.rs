use axum::Json;
use axum::Router;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::routing::{get, post};
use chrono::Local;
use nong_core::flashcard::start_flashcards;
use nong_core::preprocess::{DefaultPreprocessor, Preprocessor};
use nong_core::quiz::{QuizQuestion, start_quiz};
use nong_core::state::AppState;
use nong_core::{AppError, SourceLanguage, VocabularyEntry};
use nong_translator::TranslateError;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::response::ApiError;

pub const MAX_QUIZ_QUESTIONS: i64 = 20;
pub const DEFAULT_QUIZ_QUESTIONS: i64 = 5;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/translate", post(translate))
        .route("/speak", post(speak))
        .route("/vocabulary", get(list_categories))
        .route("/vocabulary/:category", get(vocabulary_category))
        .route("/flashcards/:category", get(flashcards))
        .route("/quiz/generate", post(generate_quiz))
        .with_state(state)
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    categories: usize,
    words: usize,
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        categories: state.vocabulary.categories().len(),
        words: state.vocabulary.word_count(),
    })
}

#[derive(Debug, Deserialize)]
pub struct TranslateRequest {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub source: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TranslateResponse {
    pub translation: String,
    pub success: bool,
}

async fn translate(
    State(state): State<AppState>,
    payload: Result<Json<TranslateRequest>, JsonRejection>,
) -> Result<Json<TranslateResponse>, ApiError> {
    let Json(request) = payload?;

    let text = DefaultPreprocessor.process(&request.text);
    if text.is_empty() {
        return Err(ApiError::bad_request("No text provided"));
    }

    let source = match request.source.as_deref() {
        None => SourceLanguage::default(),
        Some(raw) => raw
            .parse::<SourceLanguage>()
            .map_err(|e| AppError::InvalidUserInput(e.to_string()))?,
    };
    if !state.translator.supported_languages().contains(&source) {
        return Err(AppError::from(TranslateError::UnsupportedLanguage(source)).into());
    }

    let translation = state
        .translator
        .translate(&text, source)
        .await
        .map_err(|e| {
            tracing::error!(source = %source, error = %e, "Translation failed");
            AppError::from(e)
        })?;

    Ok(Json(TranslateResponse {
        translation: translation.text,
        success: true,
    }))
}

#[derive(Debug, Deserialize)]
pub struct SpeakRequest {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub speed: Option<f32>,
}

#[derive(Debug, Serialize)]
pub struct SpeakResponse {
    pub audio_url: String,
    pub success: bool,
}

async fn speak(
    State(state): State<AppState>,
    payload: Result<Json<SpeakRequest>, JsonRejection>,
) -> Result<Json<SpeakResponse>, ApiError> {
    let Json(request) = payload?;

    let text = DefaultPreprocessor.process(&request.text);
    if text.is_empty() {
        return Err(ApiError::bad_request("No text provided"));
    }

    // Timestamp alone collides within a second
    let file_name = format!(
        "shanghainese_{}_{}.wav",
        Local::now().format("%Y%m%d_%H%M%S"),
        Uuid::new_v4().simple()
    );
    let path = state.config.storage.audio_dir().join(&file_name);
    let speed = request.speed.unwrap_or(state.config.speech.default_speed);

    match state.speech.synthesize_to_file(&text, speed, &path).await {
        Some(_) => Ok(Json(SpeakResponse {
            audio_url: format!("/static/audio/{file_name}"),
            success: true,
        })),
        None => Err(AppError::SpeechUnavailable.into()),
    }
}

#[derive(Debug, Serialize)]
pub struct CategorySummary {
    pub name: String,
    pub title: String,
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct CategoryListResponse {
    pub categories: Vec<CategorySummary>,
    pub success: bool,
}

async fn list_categories(State(state): State<AppState>) -> Json<CategoryListResponse> {
    let categories = state
        .vocabulary
        .categories()
        .iter()
        .map(|c| CategorySummary {
            name: c.name.clone(),
            title: c.title(),
            count: c.words.len(),
        })
        .collect();

    Json(CategoryListResponse {
        categories,
        success: true,
    })
}

#[derive(Debug, Serialize)]
pub struct CategoryResponse {
    pub category: String,
    pub words: Vec<VocabularyEntry>,
    pub success: bool,
}

async fn vocabulary_category(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> Result<Json<CategoryResponse>, ApiError> {
    let found = state
        .vocabulary
        .category(&category)
        .ok_or_else(|| ApiError::not_found("Category not found"))?;

    Ok(Json(CategoryResponse {
        category,
        words: found.words.clone(),
        success: true,
    }))
}

#[derive(Debug, Serialize)]
pub struct FlashcardsResponse {
    pub category: String,
    pub cards: Vec<VocabularyEntry>,
    pub success: bool,
}

async fn flashcards(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> Result<Json<FlashcardsResponse>, ApiError> {
    let found = state
        .vocabulary
        .category(&category)
        .ok_or_else(|| ApiError::not_found("Category not found"))?;

    // An empty category yields an empty deck here, not an error
    let cards: Vec<VocabularyEntry> = if found.words.is_empty() {
        Vec::new()
    } else {
        let mut rng = rand::rng();
        start_flashcards(&found.words, &mut rng)
            .map_err(AppError::from)?
            .map(|card| card.word)
            .collect()
    };

    Ok(Json(FlashcardsResponse {
        category,
        cards,
        success: true,
    }))
}

#[derive(Debug, Deserialize)]
pub struct QuizRequest {
    #[serde(default, deserialize_with = "lenient_count")]
    pub num_questions: Option<i64>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawCount {
    Int(i64),
    Float(f64),
    Text(String),
}

/// Accepts `5`, `5.0` and `"5"`. Fractions truncate toward zero.
fn lenient_count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
    let Some(raw) = Option::<RawCount>::deserialize(deserializer)? else {
        return Ok(None);
    };

    let count = match raw {
        RawCount::Int(n) => n,
        RawCount::Float(f) if f.is_finite() => f.trunc() as i64,
        RawCount::Float(f) => {
            return Err(D::Error::custom(format!("num_questions must be a number, got {f}")));
        }
        RawCount::Text(s) => s.trim().parse().map_err(|_| {
            D::Error::custom(format!("num_questions must be a number, got {s:?}"))
        })?,
    };
    Ok(Some(count))
}

#[derive(Debug, Serialize)]
pub struct QuizResponse {
    pub questions: Vec<QuizQuestion>,
    pub success: bool,
}

async fn generate_quiz(
    State(state): State<AppState>,
    payload: Result<Json<QuizRequest>, JsonRejection>,
) -> Result<Json<QuizResponse>, ApiError> {
    let Json(request) = payload?;

    let requested = request.num_questions.unwrap_or(DEFAULT_QUIZ_QUESTIONS);
    if requested < 1 {
        return Err(ApiError::bad_request("num_questions must be at least 1"));
    }
    let count = requested.min(MAX_QUIZ_QUESTIONS) as usize;

    let words = state.vocabulary.all_words();
    let questions: Vec<QuizQuestion> = {
        let mut rng = rand::rng();
        start_quiz(&words, count, &mut rng)
            .map_err(AppError::from)?
            .collect()
    };

    tracing::debug!(requested, generated = questions.len(), "Quiz generated");
    Ok(Json(QuizResponse {
        questions,
        success: true,
    }))
}
