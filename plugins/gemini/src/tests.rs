use logicforge::gateway::{DesignGateway, GatewayError};
use serde_json::json;

use super::*;

const HALF_ADDER: &str = include_str!("../../../forge/data/tests/half_adder.json");

fn offline() -> Gemini {
    Gemini::new(GeminiConfig {
        api_key: Some("test-key".to_string()),
        endpoint: "http://127.0.0.1:9".to_string(),
        timeout_secs: Some(1),
        ..Default::default()
    })
    .unwrap()
}

#[test]
fn request_body_shape() {
    let body = offline().request_body("4-bit Counter").unwrap();
    let value = serde_json::to_value(&body).unwrap();

    assert_eq!(
        value["contents"][0]["parts"][0]["text"],
        "Design request: \"4-bit Counter\". Create a valid and functional digital logic design."
    );
    assert_eq!(value["contents"][0]["role"], "user");
    assert!(value["systemInstruction"].get("role").is_none());
    let system = value["systemInstruction"]["parts"][0]["text"]
        .as_str()
        .unwrap();
    assert!(system.starts_with("You are LogicForge"));
    assert!(system.contains("Inputs should be on the left (x < 150). Outputs on the right (x > 650)."));
    assert!(system.contains("INPUT, OUTPUT, AND, OR, NOT, NAND, NOR, XOR, DFF, MODULE"));
    assert!(system.contains("Provide 20-50 time steps"));

    let gen = &value["generationConfig"];
    assert_eq!(gen["responseMimeType"], "application/json");
    assert_eq!(gen["temperature"], 0.2);
    assert_eq!(
        gen["responseSchema"]["required"],
        json!(["verilogCode", "testbenchCode", "explanation", "schematic", "simulation"])
    );
    assert_eq!(
        gen["responseSchema"]["properties"]["schematic"]["properties"]["nodes"]["items"]
            ["properties"]["type"]["enum"][9],
        "MODULE"
    );
}

#[test]
fn prompt_is_not_escaped() {
    let body = offline().request_body("a < b & c").unwrap();
    let text = body.contents[0].parts[0].text.clone().unwrap();
    assert!(text.contains("\"a < b & c\""));
}

#[test]
fn url_uses_model() {
    let cfg = GeminiConfig::default();
    assert_eq!(
        cfg.url(),
        "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:generateContent"
    );
}

#[test]
fn decode_first_candidate() {
    let (head, tail) = HALF_ADDER.split_at(HALF_ADDER.len() / 2);
    let body = json!({
        "candidates": [
            { "content": { "role": "model", "parts": [{ "text": head }, { "text": tail }] } },
            { "content": { "role": "model", "parts": [{ "text": "ignored" }] } }
        ]
    });
    let design = decode_response(&body.to_string()).unwrap();
    assert_eq!(design.schematic.nodes.len(), 6);
    assert_eq!(design.simulation.time_steps, 4);
}

#[test]
fn decode_without_text() {
    let err = decode_response(r#"{"candidates": []}"#).unwrap_err();
    assert_eq!(err, GatewayError::EmptyResponse);
    let err = decode_response(r#"{"candidates": [{"content": {"parts": []}}]}"#).unwrap_err();
    assert_eq!(err, GatewayError::EmptyResponse);
}

#[test]
fn decode_schema_violation() {
    let body = json!({
        "candidates": [{ "content": { "parts": [{ "text": "{\"verilogCode\": \"\"}" }] } }]
    });
    let err = decode_response(&body.to_string()).unwrap_err();
    assert!(matches!(err, GatewayError::Schema(_)));
}

#[test]
fn missing_key_fails_before_request() {
    let gateway = Gemini::new(GeminiConfig {
        api_key: None,
        endpoint: "http://127.0.0.1:9".to_string(),
        ..Default::default()
    })
    .unwrap();
    assert_eq!(
        gateway.generate("Full Adder").unwrap_err(),
        GatewayError::MissingCredential
    );

    let gateway = Gemini::new(GeminiConfig {
        api_key: Some("  ".to_string()),
        ..Default::default()
    })
    .unwrap();
    assert_eq!(
        gateway.generate("Full Adder").unwrap_err(),
        GatewayError::MissingCredential
    );
}

#[test]
fn unreachable_endpoint_is_transport_error() {
    let err = offline().generate("Full Adder").unwrap_err();
    assert!(matches!(err, GatewayError::Transport(_)));
}

#[test]
fn config_from_toml() {
    let cfg = GeminiConfig::from_toml(
        r#"
        api_key = "abc"
        temperature = 0.5
        timeout_secs = 60
        "#,
    )
    .unwrap();
    assert_eq!(cfg.key(), Some("abc"));
    assert_eq!(cfg.model, "gemini-2.5-flash");
    assert_eq!(cfg.temperature, 0.5);
    assert_eq!(cfg.timeout_secs, Some(60));
    assert!(GeminiConfig::from_toml("temperature = \"hot\"").is_err());
}
