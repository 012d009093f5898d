//! The design schema exchanged with the gateway.
//!
//! A [`GeneratedDesign`] is built wholesale from one gateway response and is never
//! partially mutated; a later generation replaces it entirely.

use std::fmt::Display;
use std::str::FromStr;

use arcstr::ArcStr;
use forgegeom::{Dims, Point, Rect};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use crate::waveform::{SimulationData, WaveformSignal};

pub mod validation;

/// The aggregate root returned by a [`DesignGateway`](crate::gateway::DesignGateway).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedDesign {
    /// Synthesizable hardware-description source.
    pub verilog_code: String,
    /// Companion test harness source.
    pub testbench_code: String,
    pub explanation: String,
    pub schematic: Schematic,
    pub simulation: SimulationData,
}

impl GeneratedDesign {
    /// Parses a design from its JSON wire representation.
    ///
    /// Every required field must be present; nothing is defaulted
    /// except the informational port lists.
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// The circuit graph: nodes and the directed edges between them.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schematic {
    pub nodes: Vec<CircuitNode>,
    pub edges: Vec<CircuitEdge>,
}

impl Schematic {
    /// Finds the first node with the given id.
    pub fn find_node(&self, id: &str) -> Option<&CircuitNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Counts the nodes of the given type.
    pub fn count(&self, kind: NodeType) -> usize {
        self.nodes.iter().filter(|n| n.kind == kind).count()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// The closed set of node types a schematic may contain.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum NodeType {
    Input,
    Output,
    And,
    Or,
    Not,
    Nand,
    Nor,
    Xor,
    /// A flip-flop.
    Dff,
    /// A generic block such as a mux or adder.
    Module,
}

impl NodeType {
    pub const ALL: [NodeType; 10] = [
        NodeType::Input,
        NodeType::Output,
        NodeType::And,
        NodeType::Or,
        NodeType::Not,
        NodeType::Nand,
        NodeType::Nor,
        NodeType::Xor,
        NodeType::Dff,
        NodeType::Module,
    ];

    /// The tag used on the wire and on rendered type labels.
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeType::Input => "INPUT",
            NodeType::Output => "OUTPUT",
            NodeType::And => "AND",
            NodeType::Or => "OR",
            NodeType::Not => "NOT",
            NodeType::Nand => "NAND",
            NodeType::Nor => "NOR",
            NodeType::Xor => "XOR",
            NodeType::Dff => "DFF",
            NodeType::Module => "MODULE",
        }
    }

    /// Returns `true` for top-level ports, which render as pills.
    #[inline]
    pub fn is_io(&self) -> bool {
        matches!(self, NodeType::Input | NodeType::Output)
    }

    /// Returns `true` for blocks drawn as plain boxes.
    #[inline]
    pub fn is_module(&self) -> bool {
        matches!(self, NodeType::Dff | NodeType::Module)
    }

    /// Returns `true` for gates drawn with an inversion bubble.
    #[inline]
    pub fn is_inverting(&self) -> bool {
        matches!(self, NodeType::Not | NodeType::Nand | NodeType::Nor)
    }
}

impl Display for NodeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Error)]
#[error("unknown node type `{original}`")]
pub struct NodeTypeParseError {
    original: String,
}

impl FromStr for NodeType {
    type Err = NodeTypeParseError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NodeType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| NodeTypeParseError {
                original: s.to_string(),
            })
    }
}

/// A node of the circuit graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CircuitNode {
    pub id: ArcStr,
    #[serde(rename = "type")]
    pub kind: NodeType,
    pub label: ArcStr,
    /// Left edge in design space.
    pub x: f64,
    /// Top edge in design space.
    pub y: f64,
    /// Port names; labels only, never used for routing.
    #[serde(default)]
    pub inputs: Vec<ArcStr>,
    #[serde(default)]
    pub outputs: Vec<ArcStr>,
}

impl CircuitNode {
    pub fn new(id: impl Into<ArcStr>, kind: NodeType, label: impl Into<ArcStr>, x: f64, y: f64) -> Self {
        Self {
            id: id.into(),
            kind,
            label: label.into(),
            x,
            y,
            inputs: Vec::new(),
            outputs: Vec::new(),
        }
    }

    #[inline]
    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// The box the node occupies when drawn with the given dimensions.
    pub fn brect(&self, dims: Dims) -> Rect {
        Rect::from_origin_dims(self.origin(), dims)
    }
}

/// A directed signal edge between two nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CircuitEdge {
    pub id: ArcStr,
    pub source_node_id: ArcStr,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_port: Option<ArcStr>,
    pub target_node_id: ArcStr,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_port: Option<ArcStr>,
}

impl CircuitEdge {
    pub fn new(
        id: impl Into<ArcStr>,
        source: impl Into<ArcStr>,
        target: impl Into<ArcStr>,
    ) -> Self {
        Self {
            id: id.into(),
            source_node_id: source.into(),
            source_port: None,
            target_node_id: target.into(),
            target_port: None,
        }
    }
}
