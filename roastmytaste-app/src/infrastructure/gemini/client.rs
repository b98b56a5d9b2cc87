use super::prompt::build_roast_prompt;
use super::types::{GenerateContentRequest, GenerateContentResponse};
use roastmytaste_errors::AppError;
use std::time::Duration;

const GEMINI_API_URL: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent";

pub struct GeminiClient {
    http_client: reqwest::Client,
    api_key: String,
}

impl GeminiClient {
    pub fn new(api_key: String) -> Self {
        Self {
            http_client: reqwest::Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .expect("Failed to create HTTP client"),
            api_key,
        }
    }

    pub async fn generate_roast(&self, user_data_block: &str) -> Result<String, AppError> {
        let prompt = build_roast_prompt(user_data_block);
        let request = GenerateContentRequest::new(prompt);

        let response = self
            .http_client
            .post(GEMINI_API_URL)
            .query(&[("key", self.api_key.as_str())])
            .json(&request)
            .send()
            .await
            .map_err(|e| AppError::GenerationFailed(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!("Gemini error: {} - {}", status, body);
            return Err(AppError::GenerationFailed(format!("API error: {status}")));
        }

        let completion: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| AppError::GenerationFailed(e.to_string()))?;

        completion
            .candidates
            .first()
            .and_then(|candidate| candidate.content.parts.first())
            .map(|part| part.text.trim().to_owned())
            .filter(|text| !text.is_empty())
            .ok_or_else(|| AppError::GenerationFailed("No response from AI".to_owned()))
    }
}
