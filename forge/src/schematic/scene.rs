//! Projection of a [`Schematic`] graph into drawable glyphs.

use std::collections::HashMap;

use arcstr::ArcStr;
use forgegeom::bbox::{Bbox, BoundBox};
use forgegeom::path::PathSpec;
use forgegeom::transform::TranslateOwned;
use forgegeom::{Circle, Dims, Point, Shape, Side};

use super::gates::{bubble, io_pill, resolve_path};
use super::SchematicStyle;
use crate::design::{CircuitEdge, CircuitNode, NodeType, Schematic};
use crate::log::debug;

/// Text shown while no design is available.
pub const PLACEHOLDER_TEXT: &str = "Waiting for design input...";

/// Radius of the dots marking both ends of an edge.
pub const ENDPOINT_RADIUS: f64 = 2.;

/// How a node is colored.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum NodeClass {
    /// INPUT and OUTPUT pills.
    Io,
    /// DFF and MODULE boxes.
    Module,
    /// Every other gate.
    Gate,
}

impl From<NodeType> for NodeClass {
    fn from(value: NodeType) -> Self {
        if value.is_io() {
            Self::Io
        } else if value.is_module() {
            Self::Module
        } else {
            Self::Gate
        }
    }
}

/// A text label placed in node-local coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub text: ArcStr,
    pub pos: Point,
    pub size: f64,
}

/// A node ready for drawing.
///
/// All shapes are local to the node's top-left corner, `origin`.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeGlyph {
    pub id: ArcStr,
    pub kind: NodeType,
    pub class: NodeClass,
    pub origin: Point,
    pub body: Shape,
    pub bubble: Option<Circle>,
    pub label: Label,
    /// The type tag drawn inside non-I/O nodes.
    pub type_tag: Option<Label>,
}

impl NodeGlyph {
    /// Builds the glyph for `node`.
    pub fn new(node: &CircuitNode, style: &SchematicStyle) -> Self {
        let dims = style.node;
        let class = NodeClass::from(node.kind);
        let (w, h) = (dims.w(), dims.h());

        let body = match class {
            NodeClass::Io => Shape::RoundRect(io_pill(dims, style.pill_radius)),
            NodeClass::Module | NodeClass::Gate => Shape::Path(resolve_path(node.kind, dims)),
        };

        let label = match class {
            NodeClass::Io => Label {
                text: node.label.clone(),
                pos: Point::new(w / 2., h / 2. + 4.),
                size: 11.,
            },
            NodeClass::Module | NodeClass::Gate => Label {
                text: node.label.clone(),
                pos: Point::new(w / 2., -10.),
                size: 10.,
            },
        };

        let type_tag = (class != NodeClass::Io).then(|| Label {
            text: ArcStr::from(node.kind.as_str()),
            pos: Point::new(w / 2., h / 2. + 4.),
            size: 9.,
        });

        Self {
            id: node.id.clone(),
            kind: node.kind,
            class,
            origin: node.origin(),
            body,
            bubble: bubble(node.kind, dims),
            label,
            type_tag,
        }
    }

    /// The extent of the body and bubble in design space.
    pub fn bbox(&self) -> Bbox {
        let body = self.body.clone().translate_owned(self.origin).bbox();
        match self.bubble {
            Some(b) => b.translate_owned(self.origin).union(body),
            None => body,
        }
    }
}

/// A routed edge between two nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeCurve {
    pub id: ArcStr,
    pub path: PathSpec,
    pub start: Point,
    pub end: Point,
}

impl EdgeCurve {
    /// The endpoint markers at both ends of the curve.
    pub fn markers(&self) -> [Circle; 2] {
        [
            Circle::new(self.start, ENDPOINT_RADIUS),
            Circle::new(self.end, ENDPOINT_RADIUS),
        ]
    }
}

/// A laid-out schematic: edges are drawn beneath nodes.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct SchematicScene {
    pub view: Dims,
    pub edges: Vec<EdgeCurve>,
    pub nodes: Vec<NodeGlyph>,
}

/// What the schematic panel displays.
#[derive(Debug, Clone, PartialEq)]
pub enum SchematicView {
    /// No design has been generated; `view` is the size of the empty canvas.
    Placeholder { view: Dims },
    Scene(SchematicScene),
}

impl SchematicView {
    #[inline]
    pub fn is_placeholder(&self) -> bool {
        matches!(self, SchematicView::Placeholder { .. })
    }

    pub fn scene(&self) -> Option<&SchematicScene> {
        match self {
            SchematicView::Placeholder { .. } => None,
            SchematicView::Scene(scene) => Some(scene),
        }
    }
}

/// Routes an edge from the right-center of `source` to the left-center of `target`.
///
/// Both control points sit at the horizontal midpoint, so the curve leaves and
/// enters horizontally whatever the vertical offset. Port names are not consulted.
pub fn route_edge(edge: &CircuitEdge, source: &CircuitNode, target: &CircuitNode, dims: Dims) -> EdgeCurve {
    let start = source.brect(dims).side_center(Side::Right);
    let end = target.brect(dims).side_center(Side::Left);
    let cx = start.x + (end.x - start.x) * 0.5;
    let path = PathSpec::new()
        .move_to(start.x, start.y)
        .cubic_to((cx, start.y), (cx, end.y), (end.x, end.y));
    EdgeCurve {
        id: edge.id.clone(),
        path,
        start,
        end,
    }
}

/// Lays out `schematic` with the given style.
///
/// Edges that reference a missing node are dropped. When several nodes share
/// an id, edges attach to the first of them.
pub fn render_schematic(schematic: &Schematic, style: &SchematicStyle) -> SchematicScene {
    let mut index: HashMap<&str, &CircuitNode> = HashMap::with_capacity(schematic.nodes.len());
    for node in schematic.nodes.iter() {
        index.entry(node.id.as_str()).or_insert(node);
    }

    let edges = schematic
        .edges
        .iter()
        .filter_map(|edge| {
            let source = index.get(edge.source_node_id.as_str());
            let target = index.get(edge.target_node_id.as_str());
            match (source, target) {
                (Some(source), Some(target)) => Some(route_edge(edge, source, target, style.node)),
                _ => {
                    debug!("dropping edge `{}` with a dangling endpoint", edge.id);
                    None
                }
            }
        })
        .collect();

    let nodes = schematic
        .nodes
        .iter()
        .map(|node| NodeGlyph::new(node, style))
        .collect();

    SchematicScene {
        view: style.view,
        edges,
        nodes,
    }
}

/// Lays out `schematic` with the given style, or yields the placeholder without one.
pub fn render_schematic_view(schematic: Option<&Schematic>, style: &SchematicStyle) -> SchematicView {
    match schematic {
        Some(schematic) => SchematicView::Scene(render_schematic(schematic, style)),
        None => SchematicView::Placeholder { view: style.view },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: &str, kind: NodeType, x: f64, y: f64) -> CircuitNode {
        CircuitNode::new(id, kind, id.to_uppercase(), x, y)
    }

    #[test]
    fn edge_is_s_curve() {
        let a = node("a", NodeType::Input, 50., 100.);
        let b = node("b", NodeType::And, 300., 200.);
        let edge = CircuitEdge::new("e", "a", "b");
        let curve = route_edge(&edge, &a, &b, Dims::square(60.));
        assert_eq!(curve.path.to_string(), "M 110,130 C 205,130 205,230 300,230");
        assert_eq!(curve.markers()[1], Circle::new(Point::new(300., 230.), 2.));
    }

    #[test]
    fn dangling_edges_are_dropped() {
        let schematic = Schematic {
            nodes: vec![
                node("a", NodeType::Input, 50., 100.),
                node("g", NodeType::Not, 300., 100.),
            ],
            edges: vec![
                CircuitEdge::new("e1", "a", "g"),
                CircuitEdge::new("e2", "g", "missing"),
                CircuitEdge::new("e3", "nowhere", "g"),
            ],
        };
        let scene = render_schematic(&schematic, &SchematicStyle::default());
        assert_eq!(scene.edges.len(), 1);
        assert_eq!(scene.edges[0].id, "e1");
        assert_eq!(scene.nodes.len(), 2);
    }

    #[test]
    fn missing_design_yields_placeholder() {
        let style = SchematicStyle::default();
        let view = render_schematic_view(None, &style);
        assert!(view.is_placeholder());
        assert!(view.scene().is_none());
        assert_eq!(view, SchematicView::Placeholder { view: style.view });

        let view = render_schematic_view(Some(&Schematic::default()), &style);
        assert!(view.scene().unwrap().nodes.is_empty());
    }

    #[test]
    fn glyph_classes_and_labels() {
        let style = SchematicStyle::default();
        let io = NodeGlyph::new(&node("a", NodeType::Output, 700., 0.), &style);
        assert_eq!(io.class, NodeClass::Io);
        assert!(io.body.as_round_rect().is_some());
        assert_eq!(io.label.pos, Point::new(30., 34.));
        assert!(io.type_tag.is_none());

        let dff = NodeGlyph::new(&node("q", NodeType::Dff, 0., 0.), &style);
        assert_eq!(dff.class, NodeClass::Module);
        assert_eq!(dff.label.pos, Point::new(30., -10.));
        assert_eq!(dff.type_tag.as_ref().unwrap().text, "DFF");

        let nor = NodeGlyph::new(&node("n", NodeType::Nor, 10., 20.), &style);
        assert_eq!(nor.class, NodeClass::Gate);
        let bbox = nor.bbox();
        assert_eq!(bbox.p0, Point::new(10., 20.));
        assert_eq!(bbox.p1, Point::new(78., 80.));
    }
}
