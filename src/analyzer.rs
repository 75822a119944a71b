use crate::traits::Analyzer;
use crate::types::{Analysis, AnalysisOutcome, Category, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

/// Inputs shorter than this carry too little signal to analyze.
pub const MIN_TEXT_CHARS: usize = 50;

/// Inputs longer than this are truncated to stay inside the model's input
/// limit. The cut is a hard character cut, not sentence-aware.
pub const MAX_TEXT_CHARS: usize = 100_000;

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Structured analyzer backed by the Gemini generateContent endpoint. Owns
/// its credentials; nothing here reads the environment.
pub struct GeminiAnalyzer {
    client: Client,
    api_key: String,
    model: String,
}

impl GeminiAnalyzer {
    pub fn new(api_key: String, model: String, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            api_key,
            model,
        })
    }

    async fn generate(&self, prompt: String) -> std::result::Result<String, String> {
        let url = format!("{}/{}:generateContent", API_BASE, self.model);
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
        };

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| format!("request failed: {}", e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(format!("model service returned HTTP {}", status));
        }

        let body: GenerateResponse = response
            .json()
            .await
            .map_err(|e| format!("unreadable response body: {}", e))?;

        body.candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .map(|p| p.text)
            .ok_or_else(|| "response contained no candidates".to_string())
    }

    /// Lists the models available to this key that support generateContent.
    /// Diagnostic only; the pipeline never calls it.
    pub async fn list_models(&self) -> Result<Vec<String>> {
        let url = format!("{}/models", API_BASE);
        let body: ListModelsResponse = self
            .client
            .get(&url)
            .header("x-goog-api-key", &self.api_key)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(body
            .models
            .into_iter()
            .filter(|m| {
                m.supported_generation_methods
                    .iter()
                    .any(|method| method == "generateContent")
            })
            .map(|m| m.name)
            .collect())
    }
}

#[async_trait]
impl Analyzer for GeminiAnalyzer {
    async fn analyze(&self, text: &str) -> AnalysisOutcome {
        let len = text.chars().count();
        if len < MIN_TEXT_CHARS {
            return AnalysisOutcome::TooShort { len };
        }

        if len > MAX_TEXT_CHARS {
            debug!(
                "Input text is very long, truncating to {} characters",
                MAX_TEXT_CHARS
            );
        }
        let text = truncate_chars(text, MAX_TEXT_CHARS);

        let raw = match self.generate(build_prompt(text)).await {
            Ok(raw) => raw,
            Err(reason) => return AnalysisOutcome::ServiceError { reason },
        };

        let payload = strip_code_fence(&raw);
        match parse_payload(payload) {
            Ok(analysis) => {
                if Category::parse(&analysis.category).is_none() {
                    warn!(
                        "Model returned category outside the fixed set: {:?}",
                        analysis.category
                    );
                }
                AnalysisOutcome::Analyzed(analysis)
            }
            Err(e) => AnalysisOutcome::MalformedPayload {
                reason: e.to_string(),
            },
        }
    }
}

/// Builds the fixed instruction template around the (possibly truncated)
/// article text.
pub fn build_prompt(text: &str) -> String {
    let categories = Category::ALL
        .iter()
        .map(|c| format!("\"{}\"", c))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        r#"**Role:** You are an expert AI researcher and analyst.

**Task:** Analyze the following text from an AI news article/research paper. Provide a thorough summary and analysis structured in the following JSON format.

**Instructions:**
1.  Read the entire text carefully.
2.  Provide a one-paragraph **executive_summary** that captures the core announcement or finding.
3.  Generate a **bulleted_analysis** object covering the key implications:
    * **core_innovation**: What is the core innovation? (e.g., new architecture, new technique, new dataset)
    * **impacted_parties**: Who does this impact? (e.g., researchers, developers, specific industries)
    * **future_advancements**: What are the potential future advancements this could enable?
4.  Extract **key_information** as a list of strings:
    * Name of the new model(s), if any.
    * Names of key researchers or organizations.
    * Any specific metrics or benchmarks mentioned (e.g., "achieved 95% on MMLU").
5.  **categorize** the content as one of the following: {categories}.

**Input Text:**
{text}

**Output:**
"#,
        categories = categories,
        text = text,
    )
}

/// Cuts `text` to at most `max_chars` characters, on a character boundary.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Removes a surrounding markdown code fence, if present. The model often
/// wraps its JSON in ```json ... ``` markers.
pub fn strip_code_fence(raw: &str) -> &str {
    let mut text = raw.trim();
    if let Some(rest) = text.strip_prefix("```json") {
        text = rest;
    } else if let Some(rest) = text.strip_prefix("```") {
        text = rest;
    }
    if let Some(rest) = text.strip_suffix("```") {
        text = rest;
    }
    text.trim()
}

/// Parses a bare JSON payload into an [`Analysis`], validating every field
/// against the expected shape.
pub fn parse_payload(payload: &str) -> serde_json::Result<Analysis> {
    let parsed: AnalysisPayload = serde_json::from_str(payload)?;
    Ok(Analysis {
        summary: parsed.executive_summary,
        innovation: parsed.bulleted_analysis.core_innovation,
        impact: parsed.bulleted_analysis.impacted_parties,
        future: parsed.bulleted_analysis.future_advancements,
        key_info: parsed.key_information,
        category: parsed.categorize,
    })
}

#[derive(Debug, Deserialize)]
struct AnalysisPayload {
    executive_summary: String,
    bulleted_analysis: BulletedAnalysis,
    key_information: Vec<String>,
    categorize: String,
}

#[derive(Debug, Deserialize)]
struct BulletedAnalysis {
    core_innovation: String,
    impacted_parties: String,
    future_advancements: String,
}

#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: String,
}

#[derive(Debug, Deserialize)]
struct ListModelsResponse {
    #[serde(default)]
    models: Vec<ModelInfo>,
}

#[derive(Debug, Deserialize)]
struct ModelInfo {
    name: String,
    #[serde(default, rename = "supportedGenerationMethods")]
    supported_generation_methods: Vec<String>,
}
