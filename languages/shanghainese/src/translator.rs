use std::time::Duration;

use async_trait::async_trait;
use nong_config::translator::TranslatorConfig;
use nong_translator::{
    ProviderMetadata, SourceLanguage, TranslateError, Translation, Translator,
};
use serde::{Deserialize, Serialize};

use crate::prompt::DialectPrompt;

/// Chat-completion backed translator into Shanghainese
#[derive(Clone)]
pub struct ShanghaineseTranslator {
    client: reqwest::Client,
    api_key: String,
    api_url: String,
    model: String,
    prompt: DialectPrompt,
}

impl ShanghaineseTranslator {
    pub fn new(config: &TranslatorConfig, prompt: DialectPrompt) -> Result<Self, TranslateError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            api_url: config.api_url.clone(),
            model: config.model.clone(),
            prompt,
        })
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.api_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl Translator for ShanghaineseTranslator {
    async fn translate(
        &self,
        text: &str,
        source: SourceLanguage,
    ) -> Result<Translation, TranslateError> {
        if self.api_key.is_empty() {
            return Err(TranslateError::AuthenticationError);
        }

        let system = self.prompt.render(source);
        let request = ChatRequest {
            model: &self.model,
            messages: [
                ChatMessage { role: "system", content: &system },
                ChatMessage { role: "user", content: text },
            ],
        };

        tracing::debug!(%source, model = %self.model, "Sending translation request");

        let response = self
            .client
            .post(self.completions_url())
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();

        if status == 429 {
            return Err(TranslateError::RateLimitExceeded);
        }

        if status == 401 || status == 403 {
            return Err(TranslateError::AuthenticationError);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TranslateError::ApiError(format!("HTTP {status}: {body}")));
        }

        let bytes = response.bytes().await?;
        let chat: ChatResponse = serde_json::from_slice(&bytes)?;

        let text = chat
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(TranslateError::EmptyResponse)?;

        Ok(Translation {
            text,
            source,
            provider: "openai".to_string(),
            model: chat.model,
        })
    }

    fn supported_languages(&self) -> Vec<SourceLanguage> {
        SourceLanguage::ALL.to_vec()
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "OpenAI".to_string(),
            model: self.model.clone(),
            requires_api_key: true,
        }
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    model: Option<String>,
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

#[cfg(test)]
mod tests {
    use mockito::Matcher;

    use super::*;

    fn translator_for(url: &str) -> ShanghaineseTranslator {
        let config = TranslatorConfig {
            api_key: "sk-test".to_string(),
            api_url: format!("{url}/v1"),
            ..TranslatorConfig::default()
        };
        ShanghaineseTranslator::new(&config, DialectPrompt::embedded()).unwrap()
    }

    #[tokio::test]
    async fn returns_first_choice_verbatim() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/chat/completions")
            .match_header("authorization", "Bearer sk-test")
            .match_body(Matcher::AllOf(vec![
                Matcher::PartialJsonString(r#"{"model":"gpt-4o"}"#.to_string()),
                Matcher::Regex("Translate English to authentic Shanghainese".to_string()),
                Matcher::Regex("good morning".to_string()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"model":"gpt-4o-2024","choices":[{"message":{"role":"assistant","content":" 侬早 "}},{"message":{"role":"assistant","content":"ignored"}}]}"#,
            )
            .create_async()
            .await;

        let translation = translator_for(&server.url())
            .translate("good morning", SourceLanguage::English)
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(translation.text, " 侬早 ");
        assert_eq!(translation.source, SourceLanguage::English);
        assert_eq!(translation.model.as_deref(), Some("gpt-4o-2024"));
    }

    #[tokio::test]
    async fn http_errors_are_not_retried() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/chat/completions")
            .with_status(500)
            .with_body("upstream exploded")
            .expect(1)
            .create_async()
            .await;

        let err = translator_for(&server.url())
            .translate("你好", SourceLanguage::Mandarin)
            .await
            .unwrap_err();

        mock.assert_async().await;
        assert!(
            matches!(err, TranslateError::ApiError(ref msg) if msg.contains("upstream exploded"))
        );
    }

    #[tokio::test]
    async fn status_codes_map_to_errors() {
        let mut server = mockito::Server::new_async().await;
        let _limited = server
            .mock("POST", "/v1/chat/completions")
            .with_status(429)
            .create_async()
            .await;

        let err = translator_for(&server.url())
            .translate("你好", SourceLanguage::Mandarin)
            .await
            .unwrap_err();
        assert!(matches!(err, TranslateError::RateLimitExceeded));
    }

    #[tokio::test]
    async fn empty_choices_is_an_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/v1/chat/completions")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"choices":[]}"#)
            .create_async()
            .await;

        let err = translator_for(&server.url())
            .translate("你好", SourceLanguage::Mandarin)
            .await
            .unwrap_err();
        assert!(matches!(err, TranslateError::EmptyResponse));
    }

    #[tokio::test]
    async fn missing_key_fails_before_any_request() {
        let config = TranslatorConfig::default();
        let translator = ShanghaineseTranslator::new(&config, DialectPrompt::embedded()).unwrap();

        let err = translator
            .translate("你好", SourceLanguage::Mandarin)
            .await
            .unwrap_err();
        assert!(matches!(err, TranslateError::AuthenticationError));
    }
}
