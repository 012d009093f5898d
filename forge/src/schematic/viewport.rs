//! Pan/zoom state of the schematic canvas.
//!
//! Panning is driven by a two-state drag machine. Zoom is stored and applied
//! but no event changes it; it stays at `1` unless set directly.

use forgegeom::transform::Transformation;
use forgegeom::{fmt_num, Point};

use super::SchematicStyle;
use crate::design::Schematic;

/// The drag state of the canvas.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub enum DragState {
    #[default]
    Idle,
    /// A drag is in progress; `last` is the most recent cursor position.
    Dragging { last: Point },
}

/// Pointer input delivered to the canvas, in screen coordinates.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum PointerEvent {
    Down(Point),
    Move(Point),
    Up,
    /// The pointer left the canvas.
    Leave,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    pan: Point,
    zoom: f64,
    drag: DragState,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            pan: Point::zero(),
            zoom: 1.,
            drag: DragState::Idle,
        }
    }
}

impl Viewport {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn pan(&self) -> Point {
        self.pan
    }

    #[inline]
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    #[inline]
    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    #[inline]
    pub fn is_dragging(&self) -> bool {
        matches!(self.drag, DragState::Dragging { .. })
    }

    pub fn set_pan(&mut self, pan: Point) {
        self.pan = pan;
    }

    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = zoom;
    }

    /// Applies a pointer event.
    ///
    /// Moves while idle are ignored. Each move while dragging adds the cursor
    /// delta to the pan offset and rebases the reference position.
    pub fn handle(&mut self, event: PointerEvent) {
        self.drag = match (self.drag, event) {
            (_, PointerEvent::Down(at)) => DragState::Dragging { last: at },
            (DragState::Dragging { last }, PointerEvent::Move(at)) => {
                self.pan += at - last;
                DragState::Dragging { last: at }
            }
            (DragState::Idle, PointerEvent::Move(_)) => DragState::Idle,
            (_, PointerEvent::Up | PointerEvent::Leave) => DragState::Idle,
        };
    }

    /// Resets the pan offset when a design with at least one node is loaded.
    ///
    /// Empty designs leave the viewport untouched.
    pub fn reset_for(&mut self, schematic: &Schematic, style: &SchematicStyle) {
        if !schematic.is_empty() {
            self.pan = style.initial_pan;
        }
    }

    /// Maps design space to screen space: scale about the origin, then pan.
    pub fn transformation(&self) -> Transformation {
        Transformation::cascade(
            Transformation::translate(self.pan.x, self.pan.y),
            Transformation::scale(self.zoom),
        )
    }

    /// The CSS transform applied to the canvas, with origin `0 0`.
    pub fn css_transform(&self) -> String {
        format!(
            "translate({}px, {}px) scale({})",
            fmt_num(self.pan.x),
            fmt_num(self.pan.y),
            fmt_num(self.zoom)
        )
    }

    /// The `PAN: x,y` readout, rounded to whole units.
    pub fn readout(&self) -> String {
        format!("PAN: {}", self.pan.round())
    }
}

#[cfg(test)]
mod tests {
    use forgegeom::transform::Transform;

    use super::*;
    use crate::design::{CircuitNode, NodeType};

    #[test]
    fn drag_accumulates_deltas() {
        let mut vp = Viewport::new();
        vp.handle(PointerEvent::Down(Point::new(10., 10.)));
        assert!(vp.is_dragging());
        vp.handle(PointerEvent::Move(Point::new(15., 12.)));
        vp.handle(PointerEvent::Move(Point::new(5., 20.)));
        vp.handle(PointerEvent::Up);
        assert_eq!(vp.pan(), Point::new(-5., 10.));
        assert_eq!(vp.drag_state(), DragState::Idle);
    }

    #[test]
    fn leave_ends_drag() {
        let mut vp = Viewport::new();
        vp.handle(PointerEvent::Down(Point::zero()));
        vp.handle(PointerEvent::Leave);
        assert!(!vp.is_dragging());
        vp.handle(PointerEvent::Move(Point::new(100., 100.)));
        assert_eq!(vp.pan(), Point::zero());
    }

    #[test]
    fn reset_only_for_nonempty_design() {
        let style = SchematicStyle::default();
        let mut vp = Viewport::new();
        vp.set_pan(Point::new(7., 7.));
        vp.reset_for(&Schematic::default(), &style);
        assert_eq!(vp.pan(), Point::new(7., 7.));

        let schematic = Schematic {
            nodes: vec![CircuitNode::new("a", NodeType::Input, "A", 0., 0.)],
            edges: vec![],
        };
        vp.reset_for(&schematic, &style);
        assert_eq!(vp.pan(), Point::new(50., 50.));
        assert_eq!(vp.zoom(), 1.);
    }

    #[test]
    fn transformation_and_css() {
        let mut vp = Viewport::new();
        vp.set_pan(Point::new(50., 50.));
        assert_eq!(vp.css_transform(), "translate(50px, 50px) scale(1)");
        assert_eq!(
            Point::new(10., 20.).transform(vp.transformation()),
            Point::new(60., 70.)
        );
        vp.set_zoom(2.);
        assert_eq!(
            Point::new(10., 20.).transform(vp.transformation()),
            Point::new(70., 90.)
        );
    }

    #[test]
    fn readout_rounds() {
        let mut vp = Viewport::new();
        vp.set_pan(Point::new(50.4, -2.5));
        assert_eq!(vp.readout(), "PAN: 50,-2");
    }
}
