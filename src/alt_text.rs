//! Alt text written by a vision model

use std::time::Duration;

use reqwest::blocking::Client;
use serde_json::{json, Value};

use crate::config::AltTextConfig;
use crate::constants;
use crate::error::AppError;
use crate::store::http::error_message;

pub trait AltTextGenerator {
    /// Describe the image served at `image_url`
    fn describe(&self, image_url: &str) -> Result<String, AppError>;
}

pub struct ClaudeAltText {
    config: AltTextConfig,
    client: Client,
}

impl ClaudeAltText {
    pub fn new(config: AltTextConfig) -> Result<Self, AppError> {
        let client = Client::builder().timeout(Duration::from_secs(60)).build()?;
        Ok(Self { config, client })
    }
}

impl AltTextGenerator for ClaudeAltText {
    fn describe(&self, image_url: &str) -> Result<String, AppError> {
        let response = self
            .client
            .post(constants::ANTHROPIC_MESSAGES_URL)
            .header("x-api-key", &self.config.api_key)
            .header("anthropic-version", constants::ANTHROPIC_VERSION)
            .json(&request_body(&self.config.model, image_url))
            .send()?;

        let status = response.status();
        let body = response.text()?;
        if !status.is_success() {
            return Err(AppError::Api {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        let body: Value = serde_json::from_str(&body)?;
        let text = first_text(&body).ok_or_else(|| AppError::Api {
            status: status.as_u16(),
            message: "response contained no text".to_owned(),
        })?;
        Ok(finish_alt_text(text))
    }
}

/// A smaller rendition keeps the request well under the API's image limits
pub fn preview_url(asset_url: &str) -> String {
    format!("{}?w={}", asset_url, constants::ALT_TEXT_PREVIEW_WIDTH)
}

fn request_body(model: &str, image_url: &str) -> Value {
    json!({
        "model": model,
        "max_tokens": constants::ALT_TEXT_MAX_TOKENS,
        "messages": [{
            "role": "user",
            "content": [
                { "type": "image", "source": { "type": "url", "url": image_url } },
                { "type": "text", "text": constants::ALT_TEXT_PROMPT }
            ]
        }]
    })
}

fn first_text(body: &Value) -> Option<&str> {
    body.get("content")?
        .as_array()?
        .iter()
        .find(|block| block.get("type").and_then(Value::as_str) == Some("text"))?
        .get("text")?
        .as_str()
}

/// Trimmed and cut to the length screen readers are comfortable with
pub fn finish_alt_text(text: &str) -> String {
    text.trim()
        .chars()
        .take(constants::ALT_TEXT_MAX_CHARS)
        .collect()
}
