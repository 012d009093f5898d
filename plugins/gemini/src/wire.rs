//! Request and response bodies of the `generateContent` endpoint.

use logicforge::design::NodeType;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Part {
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Content {
    pub fn text(role: Option<&str>, text: impl Into<String>) -> Self {
        Self {
            role: role.map(str::to_string),
            parts: vec![Part {
                text: Some(text.into()),
            }],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub response_mime_type: &'static str,
    pub response_schema: Value,
    pub temperature: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub system_instruction: Content,
    pub contents: Vec<Content>,
    pub generation_config: GenerationConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

impl GenerateContentResponse {
    /// The concatenated text parts of the first candidate, if there are any.
    pub fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text = content
            .parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect::<String>();
        (!text.is_empty()).then_some(text)
    }
}

/// The strict schema the generated JSON must follow.
pub fn response_schema() -> Value {
    let node_types = NodeType::ALL
        .iter()
        .map(|t| t.as_str())
        .collect::<Vec<_>>();
    json!({
        "type": "OBJECT",
        "properties": {
            "verilogCode": { "type": "STRING", "description": "Complete Verilog module code" },
            "testbenchCode": { "type": "STRING", "description": "Complete Verilog testbench code" },
            "explanation": { "type": "STRING", "description": "Brief explanation of logic" },
            "schematic": {
                "type": "OBJECT",
                "properties": {
                    "nodes": {
                        "type": "ARRAY",
                        "items": {
                            "type": "OBJECT",
                            "properties": {
                                "id": { "type": "STRING" },
                                "type": { "type": "STRING", "enum": node_types },
                                "label": { "type": "STRING" },
                                "x": { "type": "NUMBER" },
                                "y": { "type": "NUMBER" },
                                "inputs": { "type": "ARRAY", "items": { "type": "STRING" } },
                                "outputs": { "type": "ARRAY", "items": { "type": "STRING" } }
                            },
                            "required": ["id", "type", "label", "x", "y"]
                        }
                    },
                    "edges": {
                        "type": "ARRAY",
                        "items": {
                            "type": "OBJECT",
                            "properties": {
                                "id": { "type": "STRING" },
                                "sourceNodeId": { "type": "STRING" },
                                "sourcePort": { "type": "STRING" },
                                "targetNodeId": { "type": "STRING" },
                                "targetPort": { "type": "STRING" }
                            },
                            "required": ["id", "sourceNodeId", "targetNodeId"]
                        }
                    }
                },
                "required": ["nodes", "edges"]
            },
            "simulation": {
                "type": "OBJECT",
                "properties": {
                    "timeSteps": { "type": "NUMBER" },
                    "signals": {
                        "type": "ARRAY",
                        "items": {
                            "type": "OBJECT",
                            "properties": {
                                "name": { "type": "STRING" },
                                "data": { "type": "ARRAY", "items": { "type": "NUMBER" } }
                            },
                            "required": ["name", "data"]
                        }
                    }
                },
                "required": ["timeSteps", "signals"]
            }
        },
        "required": ["verilogCode", "testbenchCode", "explanation", "schematic", "simulation"]
    })
}
