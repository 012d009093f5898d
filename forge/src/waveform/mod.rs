//! Fixed-step binary signal traces and their rendering.

use arcstr::ArcStr;
use derive_builder::Builder;
use serde::{Deserialize, Deserializer, Serialize};

pub mod scene;
pub mod svg;
pub mod trace;

pub use scene::{render_waveform, WaveformView};
pub use trace::{digital_polyline, EdgeDir, Transition, Transitions};

/// A simulated trace: one sample per time step for each signal.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationData {
    /// The length of the time axis.
    ///
    /// May exceed the sample count of individual signals.
    #[serde(deserialize_with = "deserialize_count")]
    pub time_steps: usize,
    /// Signals in display order, top to bottom.
    pub signals: Vec<WaveformSignal>,
}

/// A named sequence of 0/1 samples.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaveformSignal {
    pub name: ArcStr,
    /// Samples are kept exactly as received. Only a sample equal to 1 is high.
    pub data: Vec<f64>,
}

impl WaveformSignal {
    pub fn new(name: impl Into<ArcStr>, data: impl Into<Vec<f64>>) -> Self {
        Self {
            name: name.into(),
            data: data.into(),
        }
    }

    /// Returns `true` if the signal name contains `clk`, ignoring case.
    ///
    /// Clock signals are only drawn differently.
    pub fn is_clock(&self) -> bool {
        self.name.to_ascii_lowercase().contains("clk")
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Iterates over the points where consecutive samples differ.
    pub fn transitions(&self) -> Transitions<'_> {
        Transitions::new(&self.data)
    }
}

/// Returns `true` if `sample` represents a logical high.
#[inline]
pub fn is_high(sample: f64) -> bool {
    sample == 1.
}

/// The largest accepted `timeSteps`. The ruler draws one tick per step.
pub const MAX_TIME_STEPS: usize = 100_000;

/// Accepts counts written either as integers or as integral floats such as `24.0`.
///
/// Counts above [`MAX_TIME_STEPS`] are rejected.
fn deserialize_count<'de, D>(deserializer: D) -> Result<usize, D::Error>
where
    D: Deserializer<'de>,
{
    let value = f64::deserialize(deserializer)?;
    if value < 0. || value.fract() != 0. || !value.is_finite() {
        return Err(serde::de::Error::custom(format!(
            "expected a non-negative integral step count, found {value}"
        )));
    }
    if value > MAX_TIME_STEPS as f64 {
        return Err(serde::de::Error::custom(format!(
            "step count {value} exceeds the maximum of {MAX_TIME_STEPS}"
        )));
    }
    Ok(value as usize)
}

/// Layout constants of the waveform view.
#[derive(Debug, Clone, PartialEq, Builder, Serialize, Deserialize)]
#[builder(build_fn(validate = "Self::validate"))]
pub struct WaveformStyle {
    /// Horizontal pitch of one time step.
    #[builder(default = "30.")]
    pub step_width: f64,
    /// Height of one lane.
    #[builder(default = "40.")]
    pub row_height: f64,
    /// Vertical distance between the high and low levels.
    #[builder(default = "20.")]
    pub signal_height: f64,
    #[builder(default = "30.")]
    pub top_padding: f64,
    /// Baseline of the time ruler labels.
    #[builder(default = "20.")]
    pub ruler_offset: f64,
    /// Nanoseconds per time step, used for ruler labels.
    #[builder(default = "10")]
    pub ns_per_step: usize,
    #[builder(default = "1000.")]
    pub min_width: f64,
    /// Width of the signal name column.
    #[builder(default = "128.")]
    pub label_width: f64,
    #[builder(default = "arcstr::literal!(\"#fbbf24\")", setter(into))]
    pub clock_color: ArcStr,
    #[builder(default = "arcstr::literal!(\"#22d3ee\")", setter(into))]
    pub data_color: ArcStr,
}

impl WaveformStyleBuilder {
    pub fn validate(&self) -> Result<(), String> {
        for (name, value) in [
            ("step width", self.step_width),
            ("row height", self.row_height),
        ] {
            if let Some(value) = value {
                if value <= 0. {
                    return Err(format!("{name} must be positive, found {value}"));
                }
            }
        }
        Ok(())
    }
}

impl WaveformStyle {
    #[inline]
    pub fn builder() -> WaveformStyleBuilder {
        WaveformStyleBuilder::default()
    }

    /// The color used to draw `signal`.
    pub fn color(&self, signal: &WaveformSignal) -> &ArcStr {
        if signal.is_clock() {
            &self.clock_color
        } else {
            &self.data_color
        }
    }
}

impl Default for WaveformStyle {
    fn default() -> Self {
        Self {
            step_width: 30.,
            row_height: 40.,
            signal_height: 20.,
            top_padding: 30.,
            ruler_offset: 20.,
            ns_per_step: 10,
            min_width: 1000.,
            label_width: 128.,
            clock_color: arcstr::literal!("#fbbf24"),
            data_color: arcstr::literal!("#22d3ee"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_detection_ignores_case() {
        assert!(WaveformSignal::new("CLK", vec![]).is_clock());
        assert!(WaveformSignal::new("sys_Clk_div", vec![]).is_clock());
        assert!(!WaveformSignal::new("reset", vec![]).is_clock());
    }

    #[test]
    fn time_steps_accept_integral_floats() {
        let sim: SimulationData =
            serde_json::from_str(r#"{"timeSteps": 24.0, "signals": []}"#).unwrap();
        assert_eq!(sim.time_steps, 24);
        assert!(serde_json::from_str::<SimulationData>(r#"{"timeSteps": 2.5, "signals": []}"#)
            .is_err());
        assert!(serde_json::from_str::<SimulationData>(r#"{"timeSteps": -1, "signals": []}"#)
            .is_err());
    }

    #[test]
    fn oversized_time_steps_are_rejected() {
        let huge = r#"{"timeSteps": 1e30, "signals": []}"#;
        assert!(serde_json::from_str::<SimulationData>(huge).is_err());

        let json = format!(r#"{{"timeSteps": {}, "signals": []}}"#, MAX_TIME_STEPS + 1);
        assert!(serde_json::from_str::<SimulationData>(&json).is_err());

        let json = format!(r#"{{"timeSteps": {MAX_TIME_STEPS}, "signals": []}}"#);
        let sim: SimulationData = serde_json::from_str(&json).unwrap();
        assert_eq!(sim.time_steps, MAX_TIME_STEPS);
        let back: SimulationData = serde_json::from_str(&serde_json::to_string(&sim).unwrap()).unwrap();
        assert_eq!(back, sim);
    }

    #[test]
    fn samples_are_kept_exactly() {
        let sig: WaveformSignal =
            serde_json::from_str(r#"{"name": "q", "data": [0, 1, 1.0, 0.5]}"#).unwrap();
        assert_eq!(sig.data, vec![0., 1., 1., 0.5]);
        assert!(is_high(sig.data[2]));
        assert!(!is_high(sig.data[3]));
    }

    #[test]
    fn builder_defaults_match_default() {
        let style = WaveformStyle::builder().build().unwrap();
        assert_eq!(style, WaveformStyle::default());
        assert!(WaveformStyle::builder().step_width(0.).build().is_err());
    }
}
