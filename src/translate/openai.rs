//! OpenAI-compatible chat completions client.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use super::{TranslateError, Translator};
use crate::config::TranslatorConfig;

pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

/// English name of a locale code, used in the prompt.
pub fn language_name(code: &str) -> &str {
    let base = code.split(['-', '_']).next().unwrap_or(code);
    match base.to_ascii_lowercase().as_str() {
        "en" => "English",
        "no" | "nb" => "Norwegian",
        "nn" => "Norwegian Nynorsk",
        "sv" => "Swedish",
        "da" => "Danish",
        "de" => "German",
        "fr" => "French",
        "es" => "Spanish",
        "fi" => "Finnish",
        "nl" => "Dutch",
        "it" => "Italian",
        "pt" => "Portuguese",
        "pl" => "Polish",
        _ => code,
    }
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

impl ChatResponse {
    fn text(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|choice| choice.message.content.as_deref())
    }
}

#[derive(Debug, Clone)]
struct Session {
    http: Client,
    api_key: String,
}

#[derive(Debug, Clone)]
pub struct OpenAiTranslator {
    session: Option<Session>,
    config: TranslatorConfig,
}

impl OpenAiTranslator {
    /// Build a client. Without an API key no HTTP client is created and every
    /// call fails with [`TranslateError::MissingApiKey`].
    pub fn new(config: TranslatorConfig, api_key: Option<String>) -> Result<Self, TranslateError> {
        let session = match api_key.filter(|key| !key.trim().is_empty()) {
            Some(api_key) => {
                let http = Client::builder()
                    .timeout(Duration::from_secs(config.timeout_secs))
                    .user_agent(concat!("i18n-keys/", env!("CARGO_PKG_VERSION")))
                    .build()
                    .map_err(|e| TranslateError::Transport(e.to_string()))?;
                Some(Session { http, api_key })
            }
            None => None,
        };

        Ok(Self { session, config })
    }

    pub fn has_api_key(&self) -> bool {
        self.session.is_some()
    }

    fn request<'a>(&'a self, text: &str, source_lang: &str, target_lang: &str) -> ChatRequest<'a> {
        let system = format!(
            "You are a professional translator for an online shop. Translate the user's text from {} to {}. \
             Keep placeholders such as {{name}} and any markup unchanged. \
             Reply with the translated text only.",
            language_name(source_lang),
            language_name(target_lang),
        );
        ChatRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: text.to_string(),
                },
            ],
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        }
    }
}

impl Translator for OpenAiTranslator {
    async fn translate(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> Result<String, TranslateError> {
        let session = self.session.as_ref().ok_or(TranslateError::MissingApiKey)?;
        let request = self.request(text, source_lang, target_lang);

        let res = session
            .http
            .post(&self.config.endpoint)
            .bearer_auth(&session.api_key)
            .json(&request)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let response = match res.status() {
            s if s.is_success() => res
                .json::<ChatResponse>()
                .await
                .map_err(|e| TranslateError::Decode(e.to_string()))?,
            StatusCode::UNAUTHORIZED => return Err(TranslateError::InvalidApiKey),
            StatusCode::TOO_MANY_REQUESTS => return Err(TranslateError::RateLimited),
            s => {
                let status = s.as_u16();
                let body = res.text().await.unwrap_or_default();
                return Err(TranslateError::Http { status, body });
            }
        };

        let translated = response.text().map(str::trim).unwrap_or_default();
        if translated.is_empty() {
            return Err(TranslateError::EmptyResponse);
        }
        Ok(translated.to_string())
    }
}

fn map_reqwest_error(e: reqwest::Error) -> TranslateError {
    if e.is_timeout() {
        TranslateError::Timeout
    } else {
        TranslateError::Transport(e.to_string())
    }
}
