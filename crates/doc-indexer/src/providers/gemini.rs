//! Gemini embedding provider using text-embedding-004
//!
//! Calls the generative language REST API once per text. No batching, no
//! retries: the first failed request aborts the whole batch.

use async_trait::async_trait;
use std::time::Duration;

use crate::config::{EmbeddingConfig, API_KEY_VAR};
use crate::error::{Error, Result};
use crate::providers::embedding::EmbeddingProvider;

/// Gemini embedding provider
pub struct GeminiEmbedder {
    client: reqwest::Client,
    api_key: Option<String>,
    model: String,
    base_url: String,
}

impl GeminiEmbedder {
    /// Create a new Gemini embedder.
    ///
    /// A missing API key is not an error here; it surfaces as
    /// `MissingCredential` when embeddings are first requested.
    pub fn new(config: &EmbeddingConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        let model = if config.model.starts_with("models/") {
            config.model.clone()
        } else {
            format!("models/{}", config.model)
        };

        Ok(Self {
            client,
            api_key: config.api_key.clone().filter(|k| !k.trim().is_empty()),
            model,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Get the API endpoint URL
    fn endpoint(&self) -> String {
        format!("{}/{}:embedContent", self.base_url, self.model)
    }

    fn api_key(&self) -> Result<&str> {
        self.api_key
            .as_deref()
            .ok_or(Error::MissingCredential(API_KEY_VAR))
    }

    async fn request_embedding(&self, api_key: &str, text: &str) -> Result<Vec<f32>> {
        let request = EmbedRequest {
            model: &self.model,
            content: Content {
                parts: vec![Part { text }],
            },
        };

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Embedding(format!(
                "Gemini embedding failed ({}): {}",
                status, body
            )));
        }

        let embed_response: EmbedResponse = response
            .json()
            .await
            .map_err(|e| Error::Embedding(format!("Failed to parse Gemini response: {}", e)))?;

        let values = embed_response.embedding.values;
        if values.is_empty() {
            return Err(Error::embedding("Gemini returned an empty embedding"));
        }
        Ok(values)
    }
}

#[derive(serde::Serialize)]
struct EmbedRequest<'a> {
    model: &'a str,
    content: Content<'a>,
}

#[derive(serde::Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(serde::Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(serde::Deserialize)]
struct EmbedResponse {
    embedding: EmbeddingValues,
}

#[derive(serde::Deserialize)]
struct EmbeddingValues {
    #[serde(default)]
    values: Vec<f32>,
}

#[async_trait]
impl EmbeddingProvider for GeminiEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let api_key = self.api_key()?;
        self.request_embedding(api_key, text).await
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        // Checked even for an empty batch.
        let api_key = self.api_key()?;

        let mut embeddings = Vec::with_capacity(texts.len());
        for (i, text) in texts.iter().enumerate() {
            tracing::debug!(chunk = i, total = texts.len(), "Requesting embedding");
            embeddings.push(self.request_embedding(api_key, text).await?);
        }
        Ok(embeddings)
    }

    fn name(&self) -> &str {
        "gemini"
    }
}
