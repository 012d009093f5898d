use thiserror::Error;

/// Message shown when a failure carries no text of its own.
pub const FALLBACK_MESSAGE: &str = "Failed to generate design.";

/// The ways a [`DesignGateway`](super::DesignGateway) call can fail.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
#[non_exhaustive]
pub enum GatewayError {
    /// No credential was configured. Raised before any request is attempted.
    #[error("API_KEY is missing. Please set it in your environment variables.")]
    MissingCredential,

    /// The request could not be built.
    #[error("could not build request: {0}")]
    Request(String),

    /// The request could not be delivered or its response could not be read.
    #[error("{0}")]
    Transport(String),

    /// The service answered with a non-success status.
    #[error("request failed with status {code}: {body}")]
    Status { code: u16, body: String },

    /// The service answered without any generated text.
    #[error("No response generated from AI.")]
    EmptyResponse,

    /// The generated text did not parse as a design.
    #[error("{0}")]
    Schema(String),
}

impl GatewayError {
    /// The one-line text reported to the user for this failure.
    pub fn user_message(&self) -> String {
        let msg = self.to_string();
        let msg = msg.lines().next().unwrap_or_default().trim();
        if msg.is_empty() {
            FALLBACK_MESSAGE.to_string()
        } else {
            msg.to_string()
        }
    }
}

impl From<serde_json::Error> for GatewayError {
    fn from(value: serde_json::Error) -> Self {
        Self::Schema(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_message_is_one_line() {
        let err = GatewayError::Status {
            code: 503,
            body: "overloaded\nretry later".to_string(),
        };
        assert_eq!(err.user_message(), "request failed with status 503: overloaded");
    }

    #[test]
    fn empty_text_falls_back() {
        assert_eq!(
            GatewayError::Transport(String::new()).user_message(),
            FALLBACK_MESSAGE
        );
        assert_eq!(
            GatewayError::EmptyResponse.user_message(),
            "No response generated from AI."
        );
    }
}
