//! Outlines and decorations for each node type.

use forgegeom::path::PathSpec;
use forgegeom::{Circle, Dims, Point, Rect, RoundRect};

use crate::design::NodeType;

/// Radius of the inversion bubble.
pub const BUBBLE_RADIUS: f64 = 4.;
/// Horizontal room reserved for the bubble at the apex of a NOT gate.
pub const NOT_BUBBLE_GAP: f64 = 12.;
/// Horizontal offset of the extra input curve on an XOR gate.
pub const XOR_OFFSET: f64 = 5.;

/// Returns the body outline of a node of type `kind` inside a box of size `dims`.
///
/// Coordinates are local to the node's top-left corner. Every type yields a
/// well-formed outline; types without a dedicated gate shape get the box itself.
pub fn resolve_path(kind: NodeType, dims: Dims) -> PathSpec {
    let (w, h) = (dims.w(), dims.h());
    match kind {
        NodeType::And | NodeType::Nand => d_shape(w, h),
        NodeType::Or | NodeType::Nor => shield(w, h, 0.),
        NodeType::Xor => {
            let back = PathSpec::new().move_to(XOR_OFFSET, 0.).cubic_to(
                (w / 4. + XOR_OFFSET, 0.),
                (w / 4. + XOR_OFFSET, h),
                (XOR_OFFSET, h),
            );
            back.cmds()
                .iter()
                .chain(shield(w, h, 2. * XOR_OFFSET).cmds())
                .copied()
                .collect()
        }
        NodeType::Not => PathSpec::new()
            .move_to(0., 0.)
            .line_to(w - NOT_BUBBLE_GAP, h / 2.)
            .line_to(0., h)
            .close(),
        NodeType::Input | NodeType::Output | NodeType::Dff | NodeType::Module => rectangle(w, h),
    }
}

/// Flat left edge, convex right edge.
fn d_shape(w: f64, h: f64) -> PathSpec {
    PathSpec::new()
        .move_to(0., 0.)
        .line_to(w / 2., 0.)
        .cubic_to((w, 0.), (w, h), (w / 2., h))
        .line_to(0., h)
        .close()
}

/// Concave left edge, convex right edge, shifted right by `dx`.
///
/// The shifted variant keeps the unshifted tip at `x = w + dx / 2`, matching
/// the XOR outline's right-hand curve.
fn shield(w: f64, h: f64, dx: f64) -> PathSpec {
    let tip = w + dx / 2.;
    PathSpec::new()
        .move_to(dx, 0.)
        .cubic_to((w / 4. + dx, 0.), (w / 4. + dx, h), (dx, h))
        .cubic_to((tip, h), (tip, 0.), (dx, 0.))
        .close()
}

fn rectangle(w: f64, h: f64) -> PathSpec {
    PathSpec::new()
        .move_to(0., 0.)
        .line_to(w, 0.)
        .line_to(w, h)
        .line_to(0., h)
        .close()
}

/// Returns the inversion bubble of a node, if its type has one.
///
/// NOT gates carry the bubble inside the gap before the box edge;
/// NAND and NOR gates carry it just outside the right edge.
pub fn bubble(kind: NodeType, dims: Dims) -> Option<Circle> {
    if !kind.is_inverting() {
        return None;
    }
    let cx = match kind {
        NodeType::Not => dims.w() - 6.,
        _ => dims.w() + 4.,
    };
    Some(Circle::new(Point::new(cx, dims.h() / 2.), BUBBLE_RADIUS))
}

/// The pill drawn for INPUT and OUTPUT nodes: full width, half height, vertically centered.
pub fn io_pill(dims: Dims, radius: f64) -> RoundRect {
    let rect = Rect::new(
        Point::new(0., dims.h() / 4.),
        Point::new(dims.w(), dims.h() * 3. / 4.),
    );
    RoundRect::new(rect, radius)
}
