//! The boundary between the rendering core and the design generator.

use std::sync::Arc;

use crate::design::GeneratedDesign;
use crate::log::error;

pub mod error;

pub use error::GatewayError;

/// Turns a free-text circuit description into a [`GeneratedDesign`].
///
/// Implementations perform exactly one request per call. They never retry,
/// and they never return a partially-populated design.
pub trait DesignGateway: Send + Sync {
    /// A short name used in log messages.
    fn name(&self) -> &str {
        "gateway"
    }

    fn generate(&self, prompt: &str) -> Result<GeneratedDesign, GatewayError>;
}

impl<T> DesignGateway for Arc<T>
where
    T: DesignGateway + ?Sized,
{
    fn name(&self) -> &str {
        T::name(self)
    }

    fn generate(&self, prompt: &str) -> Result<GeneratedDesign, GatewayError> {
        T::generate(self, prompt)
    }
}

/// Parses the text body of a gateway response into a design.
///
/// Whitespace-only text is an [`GatewayError::EmptyResponse`];
/// anything that does not match the design schema is a [`GatewayError::Schema`].
pub fn parse_design_response(text: &str) -> Result<GeneratedDesign, GatewayError> {
    if text.trim().is_empty() {
        return Err(GatewayError::EmptyResponse);
    }
    GeneratedDesign::from_json(text).map_err(|err| {
        error!("generated design did not match the schema: {err}");
        GatewayError::from(err)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::half_adder;

    #[test]
    fn parse_empty_text() {
        assert_eq!(
            parse_design_response("  \n").unwrap_err(),
            GatewayError::EmptyResponse
        );
    }

    #[test]
    fn parse_malformed_text() {
        let err = parse_design_response("{\"verilogCode\": 3}").unwrap_err();
        assert!(matches!(err, GatewayError::Schema(_)));
    }

    #[test]
    fn parse_valid_design() {
        let design = half_adder();
        let text = design.to_json().unwrap();
        assert_eq!(parse_design_response(&text).unwrap(), design);
    }
}
