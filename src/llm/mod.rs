//! LLM — generative provider adapter.
//!
//! DESIGN
//! ======
//! Environment variables are parsed once into [`config::LlmConfig`]; the
//! resulting [`LlmClient`] is constructed explicitly at startup and shared
//! behind the [`LlmGenerate`] trait so services never see the concrete
//! provider. A missing key fails construction, never a request.

pub mod config;
pub mod gemini;
pub mod types;

use config::LlmConfig;
pub use types::LlmGenerate;
use types::{GenerateResponse, LlmError, Part};

// =============================================================================
// CLIENT
// =============================================================================

/// Concrete LLM client backed by Gemini `generateContent`.
pub struct LlmClient {
    inner: gemini::GeminiClient,
}

impl LlmClient {
    /// Build an LLM client from a parsed typed config.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider HTTP client fails to build.
    pub fn from_config(config: &LlmConfig) -> Result<Self, LlmError> {
        let inner = gemini::GeminiClient::new(config.api_key.clone(), config.base_url.clone(), config.timeouts)?;
        Ok(Self { inner })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        self.inner.base_url()
    }
}

#[async_trait::async_trait]
impl LlmGenerate for LlmClient {
    async fn generate(&self, model: &str, parts: &[Part]) -> Result<GenerateResponse, LlmError> {
        self.inner.generate(model, parts).await
    }
}
