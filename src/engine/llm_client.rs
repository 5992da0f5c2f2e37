use std::time::Duration;

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use crate::config::settings::GeminiSettings;
use crate::engine::prompt_builder::PromptBuilder;
use crate::engine::protocol::BriefSource;
use crate::error::{ConfigError, GenerateError};
use crate::model::brief::Brief;

#[derive(Serialize)]
pub struct GenerateContentRequest<'a> {
    pub contents: Vec<Content<'a>>,
}

#[derive(Serialize)]
pub struct Content<'a> {
    pub parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
pub struct Part<'a> {
    pub text: &'a str,
}

#[derive(Deserialize, Default)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
pub struct Candidate {
    pub content: Option<CandidateContent>,
}

#[derive(Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
pub struct ResponsePart {
    pub text: Option<String>,
    #[serde(default)]
    pub thought: bool,
}

impl GenerateContentResponse {
    /// Text of the first candidate, skipping thought parts. `None` when
    /// there is nothing to send.
    pub fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter(|part| !part.thought)
            .filter_map(|part| part.text.as_deref())
            .collect();

        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

/// Blocking client for the Gemini `generateContent` endpoint.
pub struct GeminiClient {
    http: Client,
    endpoint: String,
    api_key: String,
    prompt: PromptBuilder,
}

impl GeminiClient {
    pub fn new(settings: &GeminiSettings, prompt: PromptBuilder) -> Result<Self, ConfigError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(ConfigError::Client)?;

        let endpoint = format!(
            "{}/v1beta/{}:generateContent",
            settings.base_url.trim_end_matches('/'),
            model_path(&settings.model)
        );
        debug!(endpoint = %endpoint, timeout = settings.timeout_secs, "gemini client ready");

        Ok(Self {
            http,
            endpoint,
            api_key: settings.api_key.clone(),
            prompt,
        })
    }

    pub fn generate_text(&self, prompt: &str) -> Result<String, GenerateError> {
        let req = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
        };

        let resp = self
            .http
            .post(&self.endpoint)
            .header("x-goog-api-key", &self.api_key)
            .json(&req)
            .send()?;

        let status = resp.status();
        let body = resp.text()?;
        if !status.is_success() {
            return Err(GenerateError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateContentResponse =
            serde_json::from_str(&body).map_err(GenerateError::Decode)?;
        parsed.text().ok_or(GenerateError::Empty)
    }
}

impl BriefSource for GeminiClient {
    fn generate(&self) -> Option<Brief> {
        let prompt = self.prompt.build();

        match self.generate_text(&prompt) {
            Ok(text) => {
                info!(chars = text.chars().count(), "prompt success");
                Some(Brief::new(text))
            }
            Err(GenerateError::Empty) => {
                error!("prompt returned no text");
                None
            }
            Err(e) => {
                error!(error = %e, "prompt failure");
                None
            }
        }
    }
}

/// `gemini-x` and `models/gemini-x` both address the same model.
fn model_path(model: &str) -> String {
    let model = model.trim().trim_start_matches('/');
    if model.starts_with("models/") || model.starts_with("tunedModels/") {
        model.to_string()
    } else {
        format!("models/{}", model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use serde_json::json;

    const PATH: &str = "/v1beta/models/gemini-test:generateContent";

    fn client_for(server: &mockito::Server, prompt: &str) -> GeminiClient {
        let settings = GeminiSettings {
            api_key: "test-key".into(),
            model: "gemini-test".into(),
            base_url: server.url(),
            timeout_secs: 5,
        };
        GeminiClient::new(&settings, PromptBuilder::new(prompt)).unwrap()
    }

    #[test]
    fn model_path_adds_prefix_once() {
        assert_eq!(model_path("gemini-3-pro-preview"), "models/gemini-3-pro-preview");
        assert_eq!(
            model_path("models/gemini-3-pro-preview"),
            "models/gemini-3-pro-preview"
        );
    }

    #[test]
    fn response_text_joins_parts_and_skips_thoughts() {
        let resp: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{
                "content": {"parts": [
                    {"text": "thinking...", "thought": true},
                    {"text": "Inflation "},
                    {"text": "is 3.2%."}
                ]}
            }]
        }))
        .unwrap();
        assert_eq!(resp.text().as_deref(), Some("Inflation is 3.2%."));
    }

    #[test]
    fn response_without_candidates_has_no_text() {
        let resp: GenerateContentResponse =
            serde_json::from_value(json!({"promptFeedback": {"blockReason": "SAFETY"}})).unwrap();
        assert!(resp.text().is_none());
    }

    #[test]
    fn generate_sends_prompt_and_returns_brief() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("POST", PATH)
            .match_header("x-goog-api-key", "test-key")
            .match_body(Matcher::Json(json!({
                "contents": [{"parts": [{"text": "what happened overnight"}]}]
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"candidates":[{"content":{"parts":[{"text":"Inflation is 3.2%."}]}}]}"#)
            .create();

        let brief = client_for(&server, "what happened overnight").generate();
        assert_eq!(brief, Some(Brief::new("Inflation is 3.2%.")));
        mock.assert();
    }

    #[test]
    fn api_error_becomes_absence() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("POST", PATH)
            .with_status(500)
            .with_body(r#"{"error":{"message":"internal"}}"#)
            .expect(2)
            .create();

        let client = client_for(&server, "prompt");
        assert!(matches!(
            client.generate_text("prompt"),
            Err(GenerateError::Status { status: 500, .. })
        ));
        assert!(client.generate().is_none());
        mock.assert();
    }

    #[test]
    fn empty_text_becomes_absence() {
        let mut server = mockito::Server::new();
        let _mock = server
            .mock("POST", PATH)
            .with_status(200)
            .with_body(r#"{"candidates":[{"content":{"parts":[{"text":""}]}}]}"#)
            .create();

        assert!(client_for(&server, "prompt").generate().is_none());
    }

    #[test]
    fn malformed_body_becomes_absence() {
        let mut server = mockito::Server::new();
        let _mock = server
            .mock("POST", PATH)
            .with_status(200)
            .with_body("<html>gateway</html>")
            .create();

        let client = client_for(&server, "prompt");
        assert!(matches!(
            client.generate_text("prompt"),
            Err(GenerateError::Decode(_))
        ));
        assert!(client.generate().is_none());
    }
}
