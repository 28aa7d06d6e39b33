//! Generation client — composed prompt (+ optional attachment) → text.
//!
//! DESIGN
//! ======
//! Exactly one provider call per request: no retries, no streaming. The
//! model variant is picked from attachment presence alone, and the
//! attachment part always precedes the text part. Every provider failure is
//! logged and folded into [`FALLBACK_MESSAGE`], so callers never see an
//! error from [`GenerationClient::generate`].

use std::sync::Arc;

use serde::Serialize;
use tracing::{error, info};

use crate::attachment::EncodedAttachment;
use crate::error::ErrorCode;
use crate::labels::FALLBACK_MESSAGE;
use crate::llm::LlmGenerate;
use crate::llm::config::ModelVariants;
use crate::llm::types::Part;

// =============================================================================
// REQUEST
// =============================================================================

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RequestError {
    #[error("prompt is empty")]
    EmptyPrompt,
}

/// One submission's payload. Built fresh per submission, immutable after.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    prompt: String,
    attachment: Option<EncodedAttachment>,
}

impl GenerationRequest {
    /// # Errors
    ///
    /// [`RequestError::EmptyPrompt`] if `prompt` is empty or whitespace.
    pub fn new(prompt: String, attachment: Option<EncodedAttachment>) -> Result<Self, RequestError> {
        if prompt.trim().is_empty() {
            return Err(RequestError::EmptyPrompt);
        }
        Ok(Self { prompt, attachment })
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn attachment(&self) -> Option<&EncodedAttachment> {
        self.attachment.as_ref()
    }

    /// Content parts in wire order: attachment first, then the prompt.
    #[must_use]
    pub fn parts(&self) -> Vec<Part> {
        let mut parts = Vec::with_capacity(2);
        if let Some(attachment) = &self.attachment {
            parts.push(attachment.to_part());
        }
        parts.push(Part::Text(self.prompt.clone()));
        parts
    }
}

// =============================================================================
// RESULT
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GenerationResult {
    /// Provider output, unmodified.
    Generated { text: String },
    /// The provider call failed; `message` is the user-facing apology.
    Fallback { message: String },
}

impl GenerationResult {
    /// Text to display, whichever variant this is.
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Generated { text } => text,
            Self::Fallback { message } => message,
        }
    }

    #[must_use]
    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback { .. })
    }
}

// =============================================================================
// CLIENT
// =============================================================================

pub struct GenerationClient {
    llm: Arc<dyn LlmGenerate>,
    models: ModelVariants,
}

impl GenerationClient {
    #[must_use]
    pub fn new(llm: Arc<dyn LlmGenerate>, models: ModelVariants) -> Self {
        Self { llm, models }
    }

    /// Image-capable variant iff the request carries an attachment.
    #[must_use]
    pub fn model_for(&self, request: &GenerationRequest) -> &str {
        if request.attachment.is_some() { &self.models.image } else { &self.models.text }
    }

    pub async fn generate(&self, request: &GenerationRequest) -> GenerationResult {
        let model = self.model_for(request);
        let parts = request.parts();
        info!(
            %model,
            prompt_len = request.prompt.len(),
            attachment = request.attachment.as_ref().map(EncodedAttachment::media_type),
            "generation: request"
        );

        match self.llm.generate(model, &parts).await {
            Ok(response) => {
                info!(
                    %model,
                    finish_reason = response.finish_reason.as_deref().unwrap_or("-"),
                    input_tokens = response.input_tokens,
                    output_tokens = response.output_tokens,
                    "generation: response"
                );
                GenerationResult::Generated { text: response.text }
            }
            Err(e) => {
                error!(
                    %model,
                    error = %e,
                    code = e.error_code(),
                    retryable = e.retryable(),
                    "generation: provider call failed"
                );
                GenerationResult::Fallback { message: FALLBACK_MESSAGE.to_owned() }
            }
        }
    }
}

#[cfg(test)]
#[path = "generation_test.rs"]
mod tests;
