//! A [`DesignGateway`] backed by the Gemini `generateContent` API.

use std::time::Duration;

use log::{error, info};
use logicforge::design::GeneratedDesign;
use logicforge::gateway::{parse_design_response, DesignGateway, GatewayError};
use reqwest::blocking::Client;

pub use config::GeminiConfig;
use templates::{render_request, render_system_instruction, SystemCtx};
use wire::{Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig};

pub mod config;
pub(crate) mod templates;
pub mod wire;
#[cfg(test)]
mod tests;

pub struct Gemini {
    config: GeminiConfig,
    client: Client,
}

impl Gemini {
    pub fn new(config: GeminiConfig) -> Result<Self, GatewayError> {
        // The blocking client otherwise defaults to a 30 second timeout.
        let timeout = config.timeout_secs.map(Duration::from_secs);
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GatewayError::Request(e.to_string()))?;
        Ok(Self { config, client })
    }

    #[inline]
    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }

    /// Builds the request body for `prompt`.
    pub fn request_body(&self, prompt: &str) -> Result<GenerateContentRequest, GatewayError> {
        let system = render_system_instruction(&SystemCtx::default())?;
        let request = render_request(prompt)?;
        Ok(GenerateContentRequest {
            system_instruction: Content::text(None, system),
            contents: vec![Content::text(Some("user"), request)],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
                response_schema: wire::response_schema(),
                temperature: self.config.temperature,
            },
        })
    }
}

/// Extracts the design from a raw `generateContent` response body.
pub fn decode_response(body: &str) -> Result<GeneratedDesign, GatewayError> {
    let response: GenerateContentResponse = serde_json::from_str(body)
        .map_err(|e| GatewayError::Transport(format!("unreadable response: {e}")))?;
    let text = response.text().ok_or(GatewayError::EmptyResponse)?;
    parse_design_response(&text)
}

impl DesignGateway for Gemini {
    fn name(&self) -> &str {
        &self.config.model
    }

    fn generate(&self, prompt: &str) -> Result<GeneratedDesign, GatewayError> {
        let key = self.config.key().ok_or(GatewayError::MissingCredential)?;
        let body = self.request_body(prompt)?;

        info!("sending design request to {}", self.config.model);
        let response = self
            .client
            .post(self.config.url())
            .header("x-goog-api-key", key)
            .json(&body)
            .send()
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .map_err(|e| GatewayError::Transport(e.to_string()))?;
        if !status.is_success() {
            error!("design request failed with status {status}");
            return Err(GatewayError::Status {
                code: status.as_u16(),
                body: text,
            });
        }

        let design = decode_response(&text)?;
        info!("received design from {}", self.config.model);
        Ok(design)
    }
}
