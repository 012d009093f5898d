use std::path::PathBuf;

use forgecli::{gateway_config, generate_with, render};
use logicforge::design::GeneratedDesign;
use logicforge::error::ErrorSource;
use logicforge::gateway::{DesignGateway, GatewayError};
use tempdir::TempDir;

const HALF_ADDER: &str = concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../../forge/data/tests/half_adder.json"
);

const OUTPUTS: [&str; 5] = [
    "design.json",
    "module.v",
    "testbench.v",
    "schematic.svg",
    "waveform.svg",
];

struct Fixed(Result<GeneratedDesign, GatewayError>);

impl DesignGateway for Fixed {
    fn generate(&self, _prompt: &str) -> Result<GeneratedDesign, GatewayError> {
        self.0.clone()
    }
}

fn half_adder() -> GeneratedDesign {
    GeneratedDesign::from_json(&std::fs::read_to_string(HALF_ADDER).unwrap()).unwrap()
}

fn names(paths: &[PathBuf]) -> Vec<String> {
    paths
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect()
}

#[test]
fn render_writes_every_output() {
    let dir = TempDir::new("forgecli_render").unwrap();
    let paths = render(HALF_ADDER, dir.path()).unwrap();
    assert_eq!(names(&paths), OUTPUTS);

    let verilog = std::fs::read_to_string(dir.path().join("module.v")).unwrap();
    assert!(verilog.contains("module half_adder"));
    let schematic = std::fs::read_to_string(dir.path().join("schematic.svg")).unwrap();
    assert!(schematic.contains("PAN: 50,50"));
    let json = std::fs::read_to_string(dir.path().join("design.json")).unwrap();
    assert_eq!(GeneratedDesign::from_json(&json).unwrap(), half_adder());
}

#[test]
fn render_missing_file_fails() {
    let dir = TempDir::new("forgecli_missing").unwrap();
    let err = render(dir.path().join("nope.json"), dir.path()).unwrap_err();
    assert!(matches!(err.source(), ErrorSource::Io(_)));
    assert!(err.to_string().contains("while reading file"));
}

#[test]
fn generate_with_gateway() {
    let dir = TempDir::new("forgecli_generate").unwrap();
    let out = dir.path().join("half_adder");
    let paths = generate_with(Fixed(Ok(half_adder())), "half adder", &out).unwrap();
    assert_eq!(paths.len(), 5);
    assert!(paths.iter().all(|p| p.starts_with(&out) && p.exists()));
}

#[test]
fn gateway_failure_writes_nothing() {
    let dir = TempDir::new("forgecli_failure").unwrap();
    let out = dir.path().join("out");
    let err = generate_with(Fixed(Err(GatewayError::MissingCredential)), "adder", &out)
        .unwrap_err();
    match err.source() {
        ErrorSource::Gateway(err) => assert_eq!(
            err.user_message(),
            "API_KEY is missing. Please set it in your environment variables."
        ),
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(!out.exists());
}

#[test]
fn blank_prompt_is_rejected() {
    let dir = TempDir::new("forgecli_blank").unwrap();
    let err = generate_with(Fixed(Ok(half_adder())), " ", dir.path()).unwrap_err();
    assert!(matches!(err.source(), ErrorSource::InvalidArgs(_)));
}

#[test]
fn config_file_is_read() {
    let dir = TempDir::new("forgecli_config").unwrap();
    let path = dir.path().join("gemini.toml");
    std::fs::write(&path, "api_key = \"k\"\nmodel = \"test-model\"\n").unwrap();
    let cfg = gateway_config(Some(&path)).unwrap();
    assert_eq!(cfg.model, "test-model");
    assert_eq!(cfg.api_key.as_deref(), Some("k"));
}
