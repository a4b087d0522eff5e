//! Client for the Google Generative Language API.
//!
//! Used by the enhance-description route to rewrite rough product notes into
//! showroom copy. The request/response surface is modeled as typed serde
//! structs covering just the fields this crate touches.

use serde::{Deserialize, Serialize};
use thiserror::Error;

const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const MODEL: &str = "gemini-2.5-flash";

#[derive(Debug, Error)]
pub enum AiError {
    #[error("GEMINI_API_KEY is not configured")]
    MissingApiKey,

    #[error("request to generative API failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("generative API returned {status}: {body}")]
    Api {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("generative API returned no text")]
    Empty,
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

/// Async Gemini client. Cheap to clone; the underlying connection pool is
/// shared.
#[derive(Clone)]
pub struct GeminiClient {
    client: reqwest::Client,
    api_key: Option<String>,
}

impl GeminiClient {
    /// The key is optional here so the server can boot without one; calls
    /// fail with [`AiError::MissingApiKey`] until it is supplied.
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
        }
    }

    /// Produce polished copy for a product from its rough notes.
    pub async fn enhance_description(
        &self,
        name: &str,
        category: &str,
        current_text: &str,
    ) -> Result<String, AiError> {
        let api_key = self.api_key.as_deref().ok_or(AiError::MissingApiKey)?;

        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: build_prompt(name, category, current_text),
                }],
            }],
        };

        let url = format!("{}/models/{}:generateContent", BASE_URL, MODEL);
        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AiError::Api { status, body });
        }

        let parsed: GenerateContentResponse = response.json().await?;
        first_text(&parsed).ok_or(AiError::Empty)
    }
}

fn build_prompt(name: &str, category: &str, current_text: &str) -> String {
    format!(
        "You are a professional copywriter for a luxury stone showroom called 'varnam Granites'. \
         Write a sophisticated, selling product description (max 2 sentences) for a product named \
         \"{name}\" which is a \"{category}\". \
         Base it on these rough notes: \"{current_text}\". \
         Focus on durability, elegance, and premium quality. Do not use markdown or * symbols."
    )
}

fn first_text(response: &GenerateContentResponse) -> Option<String> {
    let parts = &response.candidates.first()?.content.as_ref()?.parts;
    let text: String = parts.iter().map(|p| p.text.as_str()).collect();
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}
