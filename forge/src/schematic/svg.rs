//! SVG output for [`SchematicView`]s.

use forgegeom::{Dims, Shape};

use super::scene::{
    EdgeCurve, NodeClass, NodeGlyph, SchematicScene, SchematicView, PLACEHOLDER_TEXT,
};
use super::viewport::Viewport;
use crate::error::{with_err_context, ErrorContext, Result};
use crate::fmt::svg::{Escape, Num, SvgWriter};

const BACKGROUND: &str = "#02040a";
const GRID_COLOR: &str = "#1e293b";
const EDGE_COLOR: &str = "#475569";
const ENDPOINT_COLOR: &str = "#94a3b8";
const BUBBLE_FILL: &str = "#1e293b";
const GATE_LABEL_COLOR: &str = "#cbd5e1";

/// Fill and stroke of a node body.
struct Paint {
    fill: &'static str,
    stroke: &'static str,
}

impl From<NodeClass> for Paint {
    fn from(value: NodeClass) -> Self {
        match value {
            NodeClass::Io => Paint {
                fill: BACKGROUND,
                stroke: "#3b82f6",
            },
            NodeClass::Module => Paint {
                fill: "url(#moduleGradient)",
                stroke: "#8b5cf6",
            },
            NodeClass::Gate => Paint {
                fill: "url(#gateGradient)",
                stroke: "#94a3b8",
            },
        }
    }
}

/// Writes `view` as a standalone SVG document under the given viewport.
///
/// The placeholder is drawn without pan, grid or readout.
pub fn to_svg(view: &SchematicView, viewport: &Viewport) -> Result<String> {
    let result = match view {
        SchematicView::Placeholder { view } => write_placeholder(*view),
        SchematicView::Scene(scene) => write_scene(scene, viewport),
    };
    with_err_context(result, || ErrorContext::Render(arcstr::literal!("schematic")))
}

fn write_placeholder(view: Dims) -> std::result::Result<String, std::fmt::Error> {
    let (vw, vh) = (view.w(), view.h());
    let mut w = SvgWriter::new(format_args!(
        "viewBox=\"0 0 {} {}\" width=\"{}\" height=\"{}\" style=\"background: {BACKGROUND}\"",
        Num(vw),
        Num(vh),
        Num(vw),
        Num(vh)
    ))?;
    w.text(
        "text",
        format_args!(
            "x=\"{}\" y=\"{}\" text-anchor=\"middle\" fill=\"{EDGE_COLOR}\" font-family=\"monospace\" font-size=\"14\"",
            Num(vw / 2.),
            Num(vh / 2.)
        ),
        PLACEHOLDER_TEXT,
    )?;
    w.finish()
}

fn write_scene(scene: &SchematicScene, viewport: &Viewport) -> std::result::Result<String, std::fmt::Error> {
    let (vw, vh) = (scene.view.w(), scene.view.h());
    let mut w = SvgWriter::new(format_args!(
        "viewBox=\"0 0 {} {}\" width=\"{}\" height=\"{}\" style=\"background: {BACKGROUND}; transform: {}; transform-origin: 0 0\"",
        Num(vw),
        Num(vh),
        Num(vw),
        Num(vh),
        viewport.css_transform()
    ))?;
    w.text("desc", format_args!("class=\"pan-readout\""), &viewport.readout())?;

    w.open(format_args!("defs"))?;
    for (id, from, to) in [
        ("gateGradient", "#1e293b", "#0f172a"),
        ("moduleGradient", "#334155", "#1e293b"),
    ] {
        w.open(format_args!(
            "linearGradient id=\"{id}\" x1=\"0%\" y1=\"0%\" x2=\"100%\" y2=\"100%\""
        ))?;
        w.line(format_args!("<stop offset=\"0%\" stop-color=\"{from}\"/>"))?;
        w.line(format_args!("<stop offset=\"100%\" stop-color=\"{to}\"/>"))?;
        w.close("linearGradient")?;
    }
    w.open(format_args!(
        "filter id=\"shadow\" x=\"-20%\" y=\"-20%\" width=\"140%\" height=\"140%\""
    ))?;
    w.line(format_args!(
        "<feDropShadow dx=\"0\" dy=\"2\" stdDeviation=\"2\" flood-color=\"#000\" flood-opacity=\"0.5\"/>"
    ))?;
    w.close("filter")?;
    w.close("defs")?;

    w.open(format_args!(
        "pattern id=\"grid\" width=\"40\" height=\"40\" patternUnits=\"userSpaceOnUse\""
    ))?;
    w.line(format_args!(
        "<path d=\"M 40 0 L 0 0 0 40\" fill=\"none\" stroke=\"{GRID_COLOR}\" stroke-width=\"0.5\"/>"
    ))?;
    w.close("pattern")?;
    w.line(format_args!(
        "<rect width=\"10000\" height=\"10000\" x=\"-5000\" y=\"-5000\" fill=\"url(#grid)\"/>"
    ))?;

    w.open(format_args!("g class=\"edges\""))?;
    for edge in scene.edges.iter() {
        write_edge(&mut w, edge)?;
    }
    w.close("g")?;

    w.open(format_args!("g class=\"nodes\""))?;
    for node in scene.nodes.iter() {
        write_node(&mut w, node)?;
    }
    w.close("g")?;

    w.finish()
}

fn write_edge(w: &mut SvgWriter, edge: &EdgeCurve) -> std::fmt::Result {
    w.open(format_args!("g id=\"{}\"", Escape(&edge.id)))?;
    w.line(format_args!(
        "<path d=\"{}\" fill=\"none\" stroke=\"{EDGE_COLOR}\" stroke-width=\"2\"/>",
        edge.path
    ))?;
    for marker in edge.markers() {
        w.line(format_args!(
            "<circle cx=\"{}\" cy=\"{}\" r=\"{}\" fill=\"{ENDPOINT_COLOR}\"/>",
            Num(marker.center.x),
            Num(marker.center.y),
            Num(marker.r)
        ))?;
    }
    w.close("g")
}

fn write_shape(w: &mut SvgWriter, shape: &Shape, paint: &Paint) -> std::fmt::Result {
    let Paint { fill, stroke } = paint;
    match shape {
        Shape::Rect(r) => w.line(format_args!(
            "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{fill}\" stroke=\"{stroke}\" stroke-width=\"2\"/>",
            Num(r.left()),
            Num(r.top()),
            Num(r.width()),
            Num(r.height())
        )),
        Shape::RoundRect(r) => w.line(format_args!(
            "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" rx=\"{}\" fill=\"{fill}\" stroke=\"{stroke}\" stroke-width=\"2\"/>",
            Num(r.rect.left()),
            Num(r.rect.top()),
            Num(r.rect.width()),
            Num(r.rect.height()),
            Num(r.rx)
        )),
        Shape::Circle(c) => w.line(format_args!(
            "<circle cx=\"{}\" cy=\"{}\" r=\"{}\" fill=\"{fill}\" stroke=\"{stroke}\" stroke-width=\"2\"/>",
            Num(c.center.x),
            Num(c.center.y),
            Num(c.r)
        )),
        Shape::Path(p) => w.line(format_args!(
            "<path d=\"{p}\" fill=\"{fill}\" stroke=\"{stroke}\" stroke-width=\"2\"/>"
        )),
        Shape::Polyline(p) => w.line(format_args!(
            "<polyline points=\"{p}\" fill=\"none\" stroke=\"{stroke}\" stroke-width=\"2\"/>"
        )),
    }
}

fn write_node(w: &mut SvgWriter, node: &NodeGlyph) -> std::fmt::Result {
    let paint = Paint::from(node.class);
    w.open(format_args!(
        "g id=\"{}\" transform=\"translate({},{})\" filter=\"url(#shadow)\"",
        Escape(&node.id),
        Num(node.origin.x),
        Num(node.origin.y)
    ))?;

    write_shape(w, &node.body, &paint)?;

    if let Some(bubble) = node.bubble {
        write_shape(
            w,
            &Shape::Circle(bubble),
            &Paint {
                fill: BUBBLE_FILL,
                stroke: paint.stroke,
            },
        )?;
    }

    let label_color = match node.class {
        NodeClass::Io => paint.stroke,
        NodeClass::Module | NodeClass::Gate => GATE_LABEL_COLOR,
    };
    w.text(
        "text",
        format_args!(
            "x=\"{}\" y=\"{}\" text-anchor=\"middle\" fill=\"{label_color}\" font-size=\"{}\" font-weight=\"bold\" font-family=\"monospace\"",
            Num(node.label.pos.x),
            Num(node.label.pos.y),
            Num(node.label.size)
        ),
        &node.label.text,
    )?;

    if let Some(tag) = &node.type_tag {
        w.text(
            "text",
            format_args!(
                "x=\"{}\" y=\"{}\" text-anchor=\"middle\" fill=\"{}\" font-size=\"{}\" font-weight=\"bold\" opacity=\"0.5\"",
                Num(tag.pos.x),
                Num(tag.pos.y),
                paint.stroke,
                Num(tag.size)
            ),
            &tag.text,
        )?;
    }

    w.close("g")
}
