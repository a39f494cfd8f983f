// ABOUTME: HTTP client for the AI parsing backend
// Sends the extraction prompt, pulls one JSON text blob out of the response,
// and parses that blob independently of the upstream response shape

use anyhow::{Context, Result};
use reqwest::Client;
use serde_json::{json, Value};
use tracing::{debug, warn};

use super::AiParseResult;
use crate::config::AssistConfig;

const SYSTEM_PROMPT: &str = "You are a helpful assistant that extracts structured appointment \
     data from unstructured text. Always return valid JSON.";

/// Client for the completion endpoint that backs AI assist. Every failure
/// mode - missing credentials, timeout, HTTP error, malformed body - comes
/// back as an unsuccessful `AiParseResult`, never as an error the UI has to
/// catch.
#[derive(Debug, Clone)]
pub struct AssistClient {
    client: Client,
    endpoint: String,
    model: String,
    api_key_env: String,
}

impl AssistClient {
    pub fn new(config: &AssistConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("quoteflow/", env!("CARGO_PKG_VERSION")))
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            model: config.model.clone(),
            api_key_env: config.api_key_env.clone(),
        })
    }

    /// Parse free text into a partial field mapping.
    pub async fn parse(&self, raw_text: &str) -> AiParseResult {
        let input = raw_text.trim();
        if input.is_empty() {
            return AiParseResult::failure("Provide text for AI parsing");
        }

        let Ok(api_key) = std::env::var(&self.api_key_env) else {
            warn!("{} not set - AI assist unavailable", self.api_key_env);
            return AiParseResult::failure("AI parsing service not configured");
        };

        let body = json!({
            "model": self.model,
            "messages": [
                {"role": "system", "content": SYSTEM_PROMPT},
                {"role": "user", "content": extraction_prompt(input)},
            ],
            "temperature": 0.3,
            "response_format": {"type": "json_object"},
        });

        let response = match self
            .client
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                warn!("AI parse request failed: {}", e);
                return AiParseResult::failure("Unable to reach the AI service. Try again later.");
            }
        };

        if !response.status().is_success() {
            let status = response.status();
            warn!("AI parse backend returned {}", status);
            return AiParseResult::failure("AI parsing service unavailable. Please try again.");
        }

        let value: Value = match response.json().await {
            Ok(value) => value,
            Err(e) => {
                warn!("AI parse response body unreadable: {}", e);
                return AiParseResult::failure("AI parsing service unavailable. Please try again.");
            }
        };

        let Some(payload) = extract_payload(&value) else {
            warn!("AI parse response carried no content");
            return AiParseResult::failure("No response from AI parsing service");
        };

        match parse_payload(&payload) {
            Some(fields) => {
                debug!("AI parse extracted {} fields", fields.len());
                AiParseResult { success: true, fields, errors: Vec::new() }
            }
            None => AiParseResult::failure(
                "Failed to parse input. Please try again or fill the form manually.",
            ),
        }
    }
}

/// The extraction prompt. Field names must stay in lockstep with the schema
/// wire names - unknown keys are dropped on the way back in.
fn extraction_prompt(input: &str) -> String {
    format!(
        "Extract appointment scheduling fields from this text. Return JSON with these keys:\n\
         - orgName (string): organization/company name\n\
         - serviceType (string): \"otp\" for phone, \"vri\" for video, \"onsite\" for on-site (REQUIRED)\n\
         - languages (string): comma-separated language list\n\
         - timezone (string): timezone identifier like \"America/New_York\"\n\
         - date (string): date in YYYY-MM-DD format\n\
         - time (string): time in HH:MM format (24-hour)\n\
         - duration (string): duration like \"1\" or \"2.5\"\n\
         - address (string): physical address\n\
         - locationDetails (string): building/room/floor details\n\
         - pointOfContact (string): contact person name\n\
         - providerName (string): doctor/provider name\n\
         - comments (string): additional notes\n\
         - vriLink (string): video meeting link if mentioned\n\
         \n\
         Set null for any field not found. Do not extract PHI like patient names, DOBs, or MRNs.\n\
         \n\
         Text to parse:\n{input}"
    )
}

/// Pull the single JSON-encoded text blob out of the completion response.
/// Two upstream shapes are tolerated: chat-completion
/// (`choices[0].message.content`) and messages-API (`content[0].text`).
fn extract_payload(value: &Value) -> Option<String> {
    if let Some(content) = value
        .pointer("/choices/0/message/content")
        .and_then(Value::as_str)
    {
        return Some(content.to_string());
    }

    value
        .pointer("/content/0/text")
        .and_then(Value::as_str)
        .map(String::from)
}

/// Parse the extracted blob as a JSON object of field values.
fn parse_payload(payload: &str) -> Option<serde_json::Map<String, Value>> {
    match serde_json::from_str::<Value>(payload) {
        Ok(Value::Object(fields)) => Some(fields),
        Ok(other) => {
            warn!("AI payload was valid JSON but not an object: {}", other);
            None
        }
        Err(e) => {
            warn!("AI payload was not valid JSON: {}", e);
            None
        }
    }
}
