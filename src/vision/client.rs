use std::fs;
use std::path::Path;
use std::time::Duration;

use base64::{Engine, engine::general_purpose};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::parse::{DetectedFood, parse_detection_content};
use crate::config::AiConfig;
use crate::error::Result;

const SYSTEM_PROMPT: &str = "You are a nutrition assistant. Given a photo of a meal, return JSON \
listing the items in the format {\"items\":[{\"food\":\"name\",\"grams\":int,\"confidence\":0-1}]}. \
Use simple food names. Estimate whole grams and a confidence between 0 and 1.";

const USER_PROMPT: &str = "Identify the main visible foods, estimate grams (integer) and confidence. \
Answer ONLY with valid JSON using the key 'items'.";

const APP_TITLE: &str = "CalorIA - Meal Photo";
const APP_REFERER: &str = "http://localhost";

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    temperature: f64,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: MessageBody,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum MessageBody {
    Text(String),
    Parts(Vec<ContentPart>),
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageData },
}

#[derive(Debug, Serialize)]
struct ImageData {
    url: String,
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

/// Client for an OpenAI-compatible chat completions endpoint that
/// identifies foods in a meal photo.
pub struct FoodDetector {
    client: reqwest::Client,
    config: AiConfig,
}

impl FoodDetector {
    pub fn new(config: AiConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { client, config })
    }

    pub fn is_enabled(&self) -> bool {
        self.config.is_usable()
    }

    /// Detect foods in the image at `image_url`.
    ///
    /// Best-effort: a disabled client, a transport failure, a non-2xx status
    /// or an unreadable reply all give an empty list.
    pub async fn detect(&self, image_url: &str) -> Vec<DetectedFood> {
        if !self.is_enabled() {
            debug!("Food detection disabled or missing API key");
            return Vec::new();
        }

        match self.request(image_url).await {
            Ok(items) => {
                info!(items = items.len(), model = %self.config.model, "Food detection finished");
                items
            }
            Err(e) => {
                warn!(error = %e, "Food detection failed");
                Vec::new()
            }
        }
    }

    async fn request(&self, image_url: &str) -> reqwest::Result<Vec<DetectedFood>> {
        let body = ChatRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: MessageBody::Text(SYSTEM_PROMPT.to_string()),
                },
                ChatMessage {
                    role: "user",
                    content: MessageBody::Parts(vec![
                        ContentPart::Text {
                            text: USER_PROMPT.to_string(),
                        },
                        ContentPart::ImageUrl {
                            image_url: ImageData {
                                url: image_url.to_string(),
                            },
                        },
                    ]),
                },
            ],
            temperature: 0.2,
        };

        let response: ChatResponse = self
            .client
            .post(&self.config.endpoint)
            .bearer_auth(&self.config.api_key)
            .header("HTTP-Referer", APP_REFERER)
            .header("X-Title", APP_TITLE)
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let content = response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap_or_default();

        Ok(parse_detection_content(&content))
    }
}

/// Turn a CLI image argument into something the model can fetch.
///
/// `http(s)://` and `data:` URLs pass through; anything else is read from
/// disk and inlined as a base64 data URL.
pub fn image_source(arg: &str) -> Result<String> {
    if arg.starts_with("http://") || arg.starts_with("https://") || arg.starts_with("data:") {
        return Ok(arg.to_string());
    }

    let path = Path::new(arg);
    let bytes = fs::read(path)?;
    let mime = match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .as_deref()
    {
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        _ => "image/jpeg",
    };
    debug!(bytes = bytes.len(), mime, "Encoded local image");
    Ok(format!(
        "data:{};base64,{}",
        mime,
        general_purpose::STANDARD.encode(&bytes)
    ))
}
