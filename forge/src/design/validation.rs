//! Non-fatal consistency checks on a generated design.
//!
//! Generated designs are rendered leniently, so nothing here blocks rendering.
//! The report exists so that inconsistencies show up in the log.

use std::collections::HashSet;
use std::fmt::Display;

use arcstr::ArcStr;
use itertools::Itertools;

use super::{GeneratedDesign, NodeType};
use crate::log::Log;

/// INPUT nodes are expected to sit left of this x-coordinate.
pub const INPUT_MAX_X: f64 = 150.;
/// OUTPUT nodes are expected to sit right of this x-coordinate.
pub const OUTPUT_MIN_X: f64 = 650.;

/// Validates `design`, returning every warning encountered.
pub fn validate_design(design: &GeneratedDesign) -> DesignReport {
    DesignValidator {
        design,
        output: DesignReport::default(),
    }
    .validate()
}

struct DesignValidator<'a> {
    design: &'a GeneratedDesign,
    output: DesignReport,
}

/// The warnings produced by [`validate_design`].
#[derive(Debug, Default, Clone, PartialEq)]
pub struct DesignReport {
    pub(crate) warnings: Vec<Warning>,
}

/// A single validation warning.
#[derive(Debug, Clone, PartialEq)]
pub struct Warning {
    cause: WarningCause,
}

#[non_exhaustive]
#[derive(Debug, Clone, PartialEq)]
pub enum WarningCause {
    /// More than one node has the given id.
    DuplicateNodeId { id: ArcStr },
    /// More than one edge has the given id.
    DuplicateEdgeId { id: ArcStr },
    /// An edge endpoint references a node that does not exist.
    DanglingEdge { edge: ArcStr, node: ArcStr },
    /// A signal sample is neither 0 nor 1.
    NonBinarySample {
        signal: ArcStr,
        index: usize,
        value: f64,
    },
    /// A signal's sample count differs from the declared number of time steps.
    LengthMismatch {
        signal: ArcStr,
        len: usize,
        time_steps: usize,
    },
    /// An I/O node is placed on the wrong side of the design area.
    MisplacedPort { node: ArcStr, kind: NodeType, x: f64 },
}

impl<'a> DesignValidator<'a> {
    fn validate(mut self) -> DesignReport {
        self.check_ids();
        self.check_edges();
        self.check_ports();
        self.check_signals();
        self.output
    }

    fn warn(&mut self, cause: WarningCause) {
        self.output.warnings.push(Warning { cause });
    }

    fn check_ids(&mut self) {
        let schematic = &self.design.schematic;
        let dup_nodes = schematic
            .nodes
            .iter()
            .map(|n| n.id.clone())
            .duplicates()
            .collect::<Vec<_>>();
        let dup_edges = schematic
            .edges
            .iter()
            .map(|e| e.id.clone())
            .duplicates()
            .collect::<Vec<_>>();

        for id in dup_nodes {
            self.warn(WarningCause::DuplicateNodeId { id });
        }
        for id in dup_edges {
            self.warn(WarningCause::DuplicateEdgeId { id });
        }
    }

    fn check_edges(&mut self) {
        let schematic = &self.design.schematic;
        let ids: HashSet<&str> = schematic.nodes.iter().map(|n| n.id.as_str()).collect();
        let mut dangling = Vec::new();
        for edge in schematic.edges.iter() {
            for node in [&edge.source_node_id, &edge.target_node_id] {
                if !ids.contains(node.as_str()) {
                    dangling.push(WarningCause::DanglingEdge {
                        edge: edge.id.clone(),
                        node: node.clone(),
                    });
                }
            }
        }
        for cause in dangling {
            self.warn(cause);
        }
    }

    fn check_ports(&mut self) {
        let misplaced = self
            .design
            .schematic
            .nodes
            .iter()
            .filter(|n| match n.kind {
                NodeType::Input => n.x >= INPUT_MAX_X,
                NodeType::Output => n.x <= OUTPUT_MIN_X,
                _ => false,
            })
            .map(|n| WarningCause::MisplacedPort {
                node: n.id.clone(),
                kind: n.kind,
                x: n.x,
            })
            .collect::<Vec<_>>();
        for cause in misplaced {
            self.warn(cause);
        }
    }

    fn check_signals(&mut self) {
        let sim = &self.design.simulation;
        let mut causes = Vec::new();
        for signal in sim.signals.iter() {
            if signal.data.len() != sim.time_steps {
                causes.push(WarningCause::LengthMismatch {
                    signal: signal.name.clone(),
                    len: signal.data.len(),
                    time_steps: sim.time_steps,
                });
            }
            if let Some((index, &value)) = signal
                .data
                .iter()
                .enumerate()
                .find(|(_, &v)| v != 0. && v != 1.)
            {
                causes.push(WarningCause::NonBinarySample {
                    signal: signal.name.clone(),
                    index,
                    value,
                });
            }
        }
        for cause in causes {
            self.warn(cause);
        }
    }
}

impl DesignReport {
    #[inline]
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    #[inline]
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

impl Warning {
    #[inline]
    pub fn cause(&self) -> &WarningCause {
        &self.cause
    }
}

impl Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.cause {
            WarningCause::DuplicateNodeId { id } => write!(f, "duplicate node id: `{id}`"),
            WarningCause::DuplicateEdgeId { id } => write!(f, "duplicate edge id: `{id}`"),
            WarningCause::DanglingEdge { edge, node } => {
                write!(f, "edge `{edge}` references missing node `{node}`")
            }
            WarningCause::NonBinarySample {
                signal,
                index,
                value,
            } => write!(
                f,
                "signal `{signal}` has non-binary sample {value} at step {index}"
            ),
            WarningCause::LengthMismatch {
                signal,
                len,
                time_steps,
            } => write!(
                f,
                "signal `{signal}` has {len} samples but the trace declares {time_steps} steps"
            ),
            WarningCause::MisplacedPort { node, kind, x } => {
                write!(f, "{kind} node `{node}` is placed at unexpected x = {x}")
            }
        }
    }
}

impl Log for Warning {
    fn log(&self) {
        use crate::log::warn;
        warn!("{self}");
    }
}

impl Log for DesignReport {
    fn log(&self) {
        for warning in self.warnings.iter() {
            warning.log();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::design::{CircuitEdge, CircuitNode};
    use crate::tests::half_adder;

    #[test]
    fn well_formed_design_is_clean() {
        let report = validate_design(&half_adder());
        assert!(report.is_clean(), "{:?}", report);
    }

    #[test]
    fn reports_dangling_and_duplicates() {
        let mut design = half_adder();
        design
            .schematic
            .edges
            .push(CircuitEdge::new("e_bad", "a", "ghost"));
        let dup = design.schematic.nodes[1].clone();
        design.schematic.nodes.push(dup);

        let report = validate_design(&design);
        let causes = report.warnings().iter().map(|w| w.cause()).collect::<Vec<_>>();
        assert!(causes.contains(&&WarningCause::DanglingEdge {
            edge: arcstr::literal!("e_bad"),
            node: arcstr::literal!("ghost"),
        }));
        assert!(causes
            .iter()
            .any(|c| matches!(c, WarningCause::DuplicateNodeId { .. })));
    }

    #[test]
    fn reports_signal_problems() {
        let mut design = half_adder();
        design.simulation.signals[0].data[3] = 0.5;
        design.simulation.signals[1].data.pop();
        let report = validate_design(&design);
        assert_eq!(report.warnings().len(), 2);
        report.log();
    }

    #[test]
    fn reports_misplaced_ports() {
        let mut design = half_adder();
        design
            .schematic
            .nodes
            .push(CircuitNode::new("late_in", NodeType::Input, "x", 400., 0.));
        let report = validate_design(&design);
        assert!(matches!(
            report.warnings()[0].cause(),
            WarningCause::MisplacedPort {
                kind: NodeType::Input,
                ..
            }
        ));
    }
}
