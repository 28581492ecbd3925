use crate::fallback::fallback_result;
use crate::prompts::{system_prompt, user_prompt};
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;
use weekly_review_core::{AnalysisResult, OpenAiSettings, ReportSummary, ReviewMode};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);
const TEMPERATURE: f64 = 0.7;

#[derive(Debug, Error)]
pub enum AnalyzeError {
    #[error("OPENAI_API_KEY is not set")]
    MissingApiKey,

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("api returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

/// Produces an analysis for a report summary
///
/// Implementors provide `request`; `analyze` never fails and substitutes the
/// fallback result for any error.
pub trait Analyzer {
    fn request(
        &self,
        summary: &ReportSummary,
        mode: ReviewMode,
    ) -> Result<AnalysisResult, AnalyzeError>;

    fn analyze(&self, summary: &ReportSummary, mode: ReviewMode) -> AnalysisResult {
        match self.request(summary, mode) {
            Ok(result) => result,
            Err(e) => {
                tracing::warn!(error = %e, %mode, "analysis failed, using fallback");
                fallback_result(mode, &e.to_string())
            }
        }
    }
}

/// Chat-completions client for OpenAI-compatible endpoints
pub struct OpenAiAnalyzer {
    client: reqwest::blocking::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl OpenAiAnalyzer {
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self, AnalyzeError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            api_key: api_key.into(),
            model: model.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn from_settings(settings: &OpenAiSettings) -> Result<Self, AnalyzeError> {
        let api_key = settings
            .api_key
            .as_deref()
            .ok_or(AnalyzeError::MissingApiKey)?;
        Self::new(api_key, &settings.model, &settings.base_url)
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

impl Analyzer for OpenAiAnalyzer {
    fn request(
        &self,
        summary: &ReportSummary,
        mode: ReviewMode,
    ) -> Result<AnalysisResult, AnalyzeError> {
        tracing::info!(model = %self.model, %mode, "requesting analysis");

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&serde_json::json!({
                "model": self.model,
                "temperature": TEMPERATURE,
                "response_format": {"type": "json_object"},
                "messages": [
                    {"role": "system", "content": system_prompt(summary, mode)},
                    {"role": "user", "content": user_prompt(summary, mode)}
                ]
            }))
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(AnalyzeError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body: Value = response.json()?;
        let content = body["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| AnalyzeError::MalformedResponse("no message content".to_string()))?;
        parse_content(content)
    }
}

/// Parse the model's message content as an analysis object
pub(crate) fn parse_content(content: &str) -> Result<AnalysisResult, AnalyzeError> {
    let trimmed = strip_code_fence(content.trim());
    let value: Value = serde_json::from_str(trimmed)
        .map_err(|e| AnalyzeError::MalformedResponse(e.to_string()))?;
    if !value.is_object() {
        return Err(AnalyzeError::MalformedResponse(
            "content is not a JSON object".to_string(),
        ));
    }
    Ok(AnalysisResult::from_value(&value))
}

fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}
