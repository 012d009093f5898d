//! Schematic layout: gate outlines, edge routing and the pan/zoom viewport.

use derive_builder::Builder;
use forgegeom::{Dims, Point};
use serde::{Deserialize, Serialize};

pub mod gates;
pub mod scene;
pub mod svg;
pub mod viewport;

pub use gates::{bubble, resolve_path};
pub use scene::{
    render_schematic, render_schematic_view, route_edge, SchematicScene, SchematicView,
};
pub use viewport::{DragState, PointerEvent, Viewport};

/// Layout constants of the schematic view.
#[derive(Debug, Clone, PartialEq, Builder, Serialize, Deserialize)]
pub struct SchematicStyle {
    /// Size of the box every node occupies.
    #[builder(default = "Dims::square(60.)")]
    pub node: Dims,
    /// The design-space extent shown by the view box.
    #[builder(default = "Dims::new(1000., 800.)")]
    pub view: Dims,
    /// Pan offset applied whenever a non-empty design is loaded.
    #[builder(default = "Point::new(50., 50.)")]
    pub initial_pan: Point,
    #[builder(default = "40.")]
    pub grid_pitch: f64,
    /// Corner radius of INPUT/OUTPUT pills.
    #[builder(default = "10.")]
    pub pill_radius: f64,
}

impl SchematicStyle {
    #[inline]
    pub fn builder() -> SchematicStyleBuilder {
        SchematicStyleBuilder::default()
    }
}

impl Default for SchematicStyle {
    fn default() -> Self {
        Self {
            node: Dims::square(60.),
            view: Dims::new(1000., 800.),
            initial_pan: Point::new(50., 50.),
            grid_pitch: 40.,
            pill_radius: 10.,
        }
    }
}
