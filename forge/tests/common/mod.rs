#![allow(dead_code)]

use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::Mutex;

use lazy_static::lazy_static;
use logicforge::design::GeneratedDesign;
use logicforge::gateway::{DesignGateway, GatewayError};

pub const DATA_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/data/tests");
pub const BUILD_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/build");

lazy_static! {
    pub static ref HALF_ADDER: GeneratedDesign = load_design("half_adder");
    /// A two-bit counter whose last edge points at a node that does not exist.
    pub static ref COUNTER: GeneratedDesign = load_design("counter");
}

pub fn design_path(name: &str) -> PathBuf {
    PathBuf::from(DATA_DIR).join(format!("{name}.json"))
}

pub fn out_path(test_name: &str, file_name: &str) -> PathBuf {
    let path = PathBuf::from(BUILD_DIR).join(format!("tests/{test_name}/{file_name}"));
    logicforge::io::create_dir_all(path.parent().unwrap()).unwrap();
    path
}

pub fn load_design(name: &str) -> GeneratedDesign {
    let text = std::fs::read_to_string(design_path(name)).unwrap();
    GeneratedDesign::from_json(&text).unwrap()
}

/// Replays scripted results in order and records the prompts it receives.
pub struct MockGateway {
    script: Mutex<VecDeque<Result<GeneratedDesign, GatewayError>>>,
    prompts: Mutex<Vec<String>>,
}

impl MockGateway {
    pub fn new(script: impl IntoIterator<Item = Result<GeneratedDesign, GatewayError>>) -> Self {
        Self {
            script: Mutex::new(script.into_iter().collect()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

impl DesignGateway for MockGateway {
    fn name(&self) -> &str {
        "mock"
    }

    fn generate(&self, prompt: &str) -> Result<GeneratedDesign, GatewayError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(GatewayError::EmptyResponse))
    }
}
