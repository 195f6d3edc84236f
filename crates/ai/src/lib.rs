//! HTTP client for the external AI-generation collaborator.
//!
//! [`AiClient`] posts one of the validated AI-assist requests to the
//! provider and decodes its `{ text, sources?, actions? }` response.
//! Requests are single-shot: no retries, no streaming, no backpressure.
//! Errors propagate verbatim so the API layer can surface them as
//! collaborator failures.

use serde::{de::DeserializeOwned, Deserialize, Serialize};

use atrium_core::ai_assist::{
    ConvertActionRequest, DraftEmailRequest, GenerateSummaryRequest, NextActionsRequest,
};

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Error type for AI-generation failures.
#[derive(Debug, thiserror::Error)]
pub enum AiError {
    /// The request never produced a usable HTTP response.
    #[error("AI provider request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider answered with a non-success status.
    #[error("AI provider returned {status}: {message}")]
    Api { status: u16, message: String },
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

/// Configuration for the AI provider endpoint.
#[derive(Debug, Clone)]
pub struct AiConfig {
    /// Base URL of the provider, e.g. `https://ai.internal/v1`.
    pub base_url: String,
    /// Bearer token sent with every request.
    pub api_key: String,
}

impl AiConfig {
    /// Load configuration from environment variables.
    ///
    /// Returns `None` if `AI_API_URL` is not set. `AI_API_KEY` defaults to
    /// empty for providers that do not authenticate.
    pub fn from_env() -> Option<Self> {
        let base_url = std::env::var("AI_API_URL").ok()?;
        Some(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: std::env::var("AI_API_KEY").unwrap_or_default(),
        })
    }
}

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// One action suggested by the provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestedAction {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rationale: Option<String>,
}

/// Generated output: free-form text plus optional structured extras.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiGeneration {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sources: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actions: Option<Vec<SuggestedAction>>,
}

/// Error body shape used by the provider.
#[derive(Debug, Deserialize)]
struct ProviderError {
    message: String,
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// Client for the AI-generation provider.
pub struct AiClient {
    client: reqwest::Client,
    config: AiConfig,
}

impl AiClient {
    pub fn new(config: AiConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Draft an email for a CRM entity.
    pub async fn draft_email(&self, req: &DraftEmailRequest) -> Result<AiGeneration, AiError> {
        self.post("assist/draft-email", req).await
    }

    /// Suggest next actions for a CRM entity.
    pub async fn next_actions(&self, req: &NextActionsRequest) -> Result<AiGeneration, AiError> {
        self.post("assist/next-actions", req).await
    }

    /// Convert a previously suggested action. The provider owns bounds
    /// checking of `actionIndex` against the generated list.
    pub async fn convert_action(
        &self,
        req: &ConvertActionRequest,
    ) -> Result<AiGeneration, AiError> {
        self.post("assist/next-actions/convert", req).await
    }

    /// Summarize recent activity on a CRM entity.
    pub async fn summarize(&self, req: &GenerateSummaryRequest) -> Result<AiGeneration, AiError> {
        self.post("assist/summary", req).await
    }

    async fn post<Req: Serialize, Res: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: &Req,
    ) -> Result<Res, AiError> {
        let url = format!("{}/{}", self.config.base_url, endpoint);
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(response.json().await?);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ProviderError>(&body)
            .map(|e| e.message)
            .unwrap_or(body);

        tracing::error!(%status, endpoint, "AI provider returned an error");
        Err(AiError::Api {
            status: status.as_u16(),
            message,
        })
    }
}
