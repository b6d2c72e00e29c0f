//! Google generative-language provider
//!
//! Speaks the two request shapes the service expects: a session-context
//! request carrying the tutoring priming plus prior history, and a
//! stateless multimodal request for image-bearing submissions.

use super::{InferenceError, InferenceRequest, InferenceService};
use crate::conversation::Role;
use crate::persona::{PRIMING_EXCHANGES, SYSTEM_INSTRUCTION};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const GENERATE_CONTENT_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

// Fixed generation parameters: deterministic sampling, plain-text replies.
const TEMPERATURE: f64 = 0.0;
const TOP_P: f64 = 0.95;
const TOP_K: i32 = 40;
const MAX_OUTPUT_TOKENS: i32 = 8192;
const RESPONSE_MIME_TYPE: &str = "text/plain";

/// Gemini client over the `generateContent` endpoint
pub struct GeminiClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(api_key: String, model: String) -> Self {
        let base_url = format!("{GENERATE_CONTENT_URL}/{model}:generateContent");

        let client = Client::builder()
            .timeout(Duration::from_secs(300))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            api_key,
            model,
            base_url,
        }
    }

    fn translate_request(&self, request: &InferenceRequest) -> GenerateContentRequest {
        let contents = if let Some(image) = &request.image {
            // Stateless multimodal shape: image plus accompanying text,
            // no priming and no prior history.
            vec![Content {
                role: Some("user".to_string()),
                parts: vec![
                    Part::InlineData {
                        inline_data: Blob {
                            mime_type: image.media_type.clone(),
                            data: image.data.clone(),
                        },
                    },
                    Part::Text {
                        text: request.text.clone(),
                    },
                ],
            }]
        } else {
            // Session-context shape: priming, then the transcript
            // history, then the new user message.
            let mut contents =
                Vec::with_capacity(PRIMING_EXCHANGES.len() * 2 + request.history.len() + 1);
            for exchange in PRIMING_EXCHANGES {
                contents.push(Content::user_text(exchange.question));
                contents.push(Content::model_text(exchange.answer));
            }
            for entry in &request.history {
                let role = match entry.role {
                    Role::User => "user",
                    Role::Assistant => "model",
                };
                contents.push(Content {
                    role: Some(role.to_string()),
                    parts: vec![Part::Text {
                        text: entry.text.clone(),
                    }],
                });
            }
            contents.push(Content::user_text(request.text.clone()));
            contents
        };

        GenerateContentRequest {
            contents,
            system_instruction: Content {
                role: None,
                parts: vec![Part::Text {
                    text: SYSTEM_INSTRUCTION.to_string(),
                }],
            },
            generation_config: GenerationConfig {
                temperature: TEMPERATURE,
                top_p: TOP_P,
                top_k: TOP_K,
                max_output_tokens: MAX_OUTPUT_TOKENS,
                response_mime_type: RESPONSE_MIME_TYPE.to_string(),
            },
        }
    }

    fn extract_reply(response: GenerateContentResponse) -> Result<String, InferenceError> {
        let candidate = response
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| InferenceError::malformed("No candidates in response"))?;

        let reply = candidate
            .content
            .parts
            .into_iter()
            .filter_map(|part| match part {
                Part::Text { text } => Some(text),
                Part::InlineData { .. } => None,
            })
            .collect::<Vec<_>>()
            .join("");

        if reply.is_empty() {
            return Err(InferenceError::malformed("Candidate contained no text"));
        }

        Ok(reply)
    }
}

#[async_trait]
impl InferenceService for GeminiClient {
    async fn generate(&self, request: &InferenceRequest) -> Result<String, InferenceError> {
        let body = self.translate_request(request);
        let url = format!("{}?key={}", self.base_url, self.api_key);

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    InferenceError::network(format!("Request timeout: {e}"))
                } else if e.is_connect() {
                    InferenceError::network(format!("Connection failed: {e}"))
                } else {
                    InferenceError::unknown(format!("Request failed: {e}"))
                }
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| InferenceError::network(format!("Failed to read response: {e}")))?;

        if !status.is_success() {
            if let Ok(error_resp) = serde_json::from_str::<ErrorResponse>(&body) {
                let message = error_resp.error.message;
                return Err(match status.as_u16() {
                    400 => InferenceError::invalid_request(format!("Invalid request: {message}")),
                    401 | 403 => InferenceError::auth(format!("Authentication failed: {message}")),
                    429 => InferenceError::rate_limit(format!("Rate limit exceeded: {message}")),
                    500..=599 => InferenceError::server_error(format!("Server error: {message}")),
                    _ => InferenceError::unknown(format!("HTTP {status}: {message}")),
                });
            }
            return Err(InferenceError::unknown(format!(
                "HTTP {status} error: {body}"
            )));
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&body)
            .map_err(|e| InferenceError::malformed(format!("Failed to parse response: {e}")))?;

        Self::extract_reply(parsed)
    }

    fn model_id(&self) -> &str {
        &self.model
    }
}

// Wire types for the generative-language API

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    system_instruction: Content,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    parts: Vec<Part>,
}

impl Content {
    fn user_text(text: impl Into<String>) -> Self {
        Self {
            role: Some("user".to_string()),
            parts: vec![Part::Text { text: text.into() }],
        }
    }

    fn model_text(text: impl Into<String>) -> Self {
        Self {
            role: Some("model".to_string()),
            parts: vec![Part::Text { text: text.into() }],
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(untagged)]
enum Part {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: Blob,
    },
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Blob {
    mime_type: String,
    data: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f64,
    top_p: f64,
    top_k: i32,
    max_output_tokens: i32,
    response_mime_type: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Content,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
    #[allow(dead_code)]
    code: Option<i32>,
    #[allow(dead_code)]
    status: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversation::{HistoryEntry, ImageAttachment};
    use crate::inference::InferenceErrorKind;

    fn test_client() -> GeminiClient {
        GeminiClient::new("test-key".to_string(), "gemini-2.0-flash-exp".to_string())
    }

    #[test]
    fn session_request_orders_priming_history_then_new_message() {
        let client = test_client();
        let request = InferenceRequest {
            history: vec![
                HistoryEntry {
                    role: Role::User,
                    text: "q1".to_string(),
                },
                HistoryEntry {
                    role: Role::Assistant,
                    text: "a1".to_string(),
                },
            ],
            text: "q2".to_string(),
            image: None,
        };

        let body = serde_json::to_value(client.translate_request(&request)).unwrap();
        let contents = body["contents"].as_array().unwrap();

        let priming = PRIMING_EXCHANGES.len() * 2;
        assert_eq!(contents.len(), priming + 3);
        assert_eq!(contents[0]["role"], "user");
        assert_eq!(contents[1]["role"], "model");

        // History keeps order; assistant maps to the service's "model" role.
        assert_eq!(contents[priming]["role"], "user");
        assert_eq!(contents[priming]["parts"][0]["text"], "q1");
        assert_eq!(contents[priming + 1]["role"], "model");
        assert_eq!(contents[priming + 1]["parts"][0]["text"], "a1");
        assert_eq!(contents[priming + 2]["role"], "user");
        assert_eq!(contents[priming + 2]["parts"][0]["text"], "q2");
    }

    #[test]
    fn session_request_carries_fixed_generation_config() {
        let client = test_client();
        let request = InferenceRequest {
            history: vec![],
            text: "What is Newton's second law?".to_string(),
            image: None,
        };

        let body = serde_json::to_value(client.translate_request(&request)).unwrap();

        let config = &body["generationConfig"];
        assert_eq!(config["temperature"], 0.0);
        assert_eq!(config["topP"], 0.95);
        assert_eq!(config["topK"], 40);
        assert_eq!(config["maxOutputTokens"], 8192);
        assert_eq!(config["responseMimeType"], "text/plain");

        let instruction = body["systemInstruction"]["parts"][0]["text"]
            .as_str()
            .unwrap();
        assert!(instruction.contains("tutor"));
    }

    #[test]
    fn image_request_is_stateless_and_inlines_the_payload() {
        let client = test_client();
        let request = InferenceRequest {
            history: vec![HistoryEntry {
                role: Role::User,
                text: "earlier question".to_string(),
            }],
            text: String::new(),
            image: Some(ImageAttachment {
                data: "aGVsbG8=".to_string(),
                media_type: "image/png".to_string(),
            }),
        };

        let body = serde_json::to_value(client.translate_request(&request)).unwrap();
        let contents = body["contents"].as_array().unwrap();

        // Neither priming nor history rides along with an image.
        assert_eq!(contents.len(), 1);
        let parts = contents[0]["parts"].as_array().unwrap();
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0]["inlineData"]["mimeType"], "image/png");
        assert_eq!(parts[0]["inlineData"]["data"], "aGVsbG8=");
        assert_eq!(parts[1]["text"], "");
    }

    #[test]
    fn extract_reply_joins_text_parts() {
        let response: GenerateContentResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"role":"model","parts":[{"text":"F = "},{"text":"ma"}]}}]}"#,
        )
        .unwrap();

        assert_eq!(GeminiClient::extract_reply(response).unwrap(), "F = ma");
    }

    #[test]
    fn missing_candidates_is_malformed() {
        let response: GenerateContentResponse = serde_json::from_str(r#"{"candidates":[]}"#).unwrap();
        let err = GeminiClient::extract_reply(response).unwrap_err();
        assert_eq!(err.kind, InferenceErrorKind::Malformed);
    }

    #[test]
    fn service_error_body_parses() {
        let parsed: ErrorResponse = serde_json::from_str(
            r#"{"error":{"code":429,"message":"Resource has been exhausted","status":"RESOURCE_EXHAUSTED"}}"#,
        )
        .unwrap();
        assert_eq!(parsed.error.message, "Resource has been exhausted");
    }
}
