use crate::ai::types::{GenerateContentRequest, GenerateContentResponse, GoogleSearch, Tool};
use crate::config::Config;
use crate::error::{MarqueeError, Result};
use reqwest::{Client, StatusCode};

/// Firebase AI Logic endpoint (Google AI backend)
pub const DEFAULT_AI_ENDPOINT: &str = "https://firebasevertexai.googleapis.com";

/// Client for a hosted generative model.
///
/// # Example
///
/// ```no_run
/// use marquee::ai::GenerativeModel;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let model = GenerativeModel::new("movies-demo", "api-key", "gemini-3-pro-preview")
///     .with_google_search(true);
///
/// let response = model.generate_json("List three heist movies as JSON").await?;
/// println!("{}", response.text()?);
/// # Ok(())
/// # }
/// ```
pub struct GenerativeModel {
    endpoint: String,
    project_id: String,
    api_key: String,
    app_id: Option<String>,
    model: String,
    google_search: bool,
    client: Client,
}

impl GenerativeModel {
    pub fn new(project_id: impl Into<String>, api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            endpoint: DEFAULT_AI_ENDPOINT.to_string(),
            project_id: project_id.into(),
            api_key: api_key.into(),
            app_id: None,
            model: model.into(),
            google_search: false,
            client: Client::new(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        let mut model = Self::new(
            config.firebase.project_id.clone(),
            config.firebase.api_key.clone(),
            config.ai.model.clone(),
        )
        .with_google_search(config.ai.google_search);

        model.app_id = config.firebase.app_id.clone();
        if let Some(ref endpoint) = config.ai.endpoint {
            model = model.with_endpoint(endpoint.clone());
        }
        model
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into().trim_end_matches('/').to_string();
        self
    }

    /// Let the model ground answers with Google Search
    pub fn with_google_search(mut self, enabled: bool) -> Self {
        self.google_search = enabled;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Ask for a JSON answer to a single prompt
    pub async fn generate_json(&self, prompt: &str) -> Result<GenerateContentResponse> {
        self.generate_content(GenerateContentRequest::json_prompt(prompt)).await
    }

    /// `POST {endpoint}/v1beta/projects/{project}/models/{model}:generateContent`
    pub async fn generate_content(&self, mut request: GenerateContentRequest) -> Result<GenerateContentResponse> {
        if self.google_search && request.tools.is_empty() {
            request.tools.push(Tool {
                google_search: GoogleSearch::default(),
            });
        }

        let url = format!(
            "{}/v1beta/projects/{}/models/{}:generateContent",
            self.endpoint, self.project_id, self.model
        );

        tracing::debug!("Calling {} (google_search={})", self.model, self.google_search);

        let mut builder = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&request);

        if let Some(ref app_id) = self.app_id {
            builder = builder.header("X-Firebase-AppId", app_id);
        }

        let response = builder.send().await?;

        match response.status() {
            status if status.is_success() => {}
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                return Err(MarqueeError::Unauthorized(
                    "Generative model rejected the API key".to_string(),
                ));
            }
            status => {
                let body = response.text().await.unwrap_or_default();
                return Err(MarqueeError::AiResponse(format!(
                    "generateContent failed with status {}: {}",
                    status,
                    body.trim()
                )));
            }
        }

        response
            .json()
            .await
            .map_err(|e| MarqueeError::AiResponse(format!("Failed to parse response: {}", e)))
    }
}
