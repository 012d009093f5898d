//! Projection of a [`SimulationData`] trace into a drawable scene.

use arcstr::ArcStr;
use forgegeom::path::Polyline;

use super::trace::digital_polyline;
use super::{SimulationData, WaveformStyle};

/// Text shown while no trace is available.
pub const PLACEHOLDER_TEXT: &str = "Waiting for simulation data...";

/// What the waveform panel displays.
#[derive(Debug, Clone, PartialEq)]
pub enum WaveformView {
    /// No trace has been generated.
    Placeholder,
    Scene(WaveformScene),
}

/// A laid-out waveform: canvas size, ruler ticks and one lane per signal.
#[derive(Debug, Clone, PartialEq)]
pub struct WaveformScene {
    pub width: f64,
    pub height: f64,
    pub ruler: Vec<RulerTick>,
    pub lanes: Vec<Lane>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RulerTick {
    pub x: f64,
    pub label: String,
}

/// One signal's row.
///
/// The trace points are lane-local; `y_offset` places the lane on the canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct Lane {
    pub name: ArcStr,
    pub clock: bool,
    pub color: ArcStr,
    pub y_offset: f64,
    /// Lane-local y of the low level, where the baseline is drawn.
    pub baseline: f64,
    pub trace: Polyline,
}

impl WaveformView {
    #[inline]
    pub fn is_placeholder(&self) -> bool {
        matches!(self, WaveformView::Placeholder)
    }

    pub fn scene(&self) -> Option<&WaveformScene> {
        match self {
            WaveformView::Placeholder => None,
            WaveformView::Scene(scene) => Some(scene),
        }
    }
}

/// Lays out `simulation` with the given style.
pub fn render_waveform(simulation: Option<&SimulationData>, style: &WaveformStyle) -> WaveformView {
    let sim = match simulation {
        Some(sim) => sim,
        None => return WaveformView::Placeholder,
    };

    let width = (sim.time_steps as f64 * style.step_width).max(style.min_width);
    let height = sim.signals.len() as f64 * style.row_height + 40.;

    let ruler = (0..sim.time_steps)
        .map(|i| RulerTick {
            x: i as f64 * style.step_width,
            label: format!("{}ns", i * style.ns_per_step),
        })
        .collect();

    let lanes = sim
        .signals
        .iter()
        .enumerate()
        .map(|(idx, signal)| Lane {
            name: signal.name.clone(),
            clock: signal.is_clock(),
            color: style.color(signal).clone(),
            y_offset: style.top_padding + idx as f64 * style.row_height + 10.,
            baseline: style.signal_height,
            trace: digital_polyline(&signal.data, style.step_width, style.signal_height),
        })
        .collect();

    WaveformView::Scene(WaveformScene {
        width,
        height,
        ruler,
        lanes,
    })
}
