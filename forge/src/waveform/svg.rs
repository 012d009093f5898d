//! SVG output for [`WaveformView`]s.

use crate::error::{with_err_context, ErrorContext, Result};
use crate::fmt::svg::{Escape, Num, SvgWriter};

use super::scene::{WaveformScene, PLACEHOLDER_TEXT};
use super::{WaveformStyle, WaveformView};

const GRID_COLOR: &str = "#1e293b";
const RULER_COLOR: &str = "#475569";
const BACKGROUND: &str = "#080c14";

/// Writes `view` as a standalone SVG document.
///
/// The signal name column sits left of the trace canvas.
pub fn to_svg(view: &WaveformView, style: &WaveformStyle) -> Result<String> {
    with_err_context(write_view(view, style), || {
        ErrorContext::Render(arcstr::literal!("waveform"))
    })
}

fn write_view(view: &WaveformView, style: &WaveformStyle) -> std::result::Result<String, std::fmt::Error> {
    match view {
        WaveformView::Placeholder => write_placeholder(style),
        WaveformView::Scene(scene) => write_scene(scene, style),
    }
}

fn write_placeholder(style: &WaveformStyle) -> std::result::Result<String, std::fmt::Error> {
    let width = style.label_width + style.min_width;
    let height = style.row_height * 2.;
    let mut w = SvgWriter::new(format_args!(
        "width=\"{}\" height=\"{}\"",
        Num(width),
        Num(height)
    ))?;
    w.line(format_args!(
        "<rect width=\"100%\" height=\"100%\" fill=\"{BACKGROUND}\"/>"
    ))?;
    w.text(
        "text",
        format_args!(
            "x=\"{}\" y=\"{}\" font-family=\"monospace\" font-size=\"12\" fill=\"{RULER_COLOR}\" text-anchor=\"middle\"",
            Num(width / 2.),
            Num(height / 2.)
        ),
        PLACEHOLDER_TEXT,
    )?;
    w.finish()
}

fn write_scene(scene: &WaveformScene, style: &WaveformStyle) -> std::result::Result<String, std::fmt::Error> {
    let total_width = style.label_width + scene.width;
    let mut w = SvgWriter::new(format_args!(
        "width=\"{}\" height=\"{}\"",
        Num(total_width),
        Num(scene.height)
    ))?;
    w.line(format_args!(
        "<rect width=\"100%\" height=\"100%\" fill=\"{BACKGROUND}\"/>"
    ))?;

    // Signal names.
    w.open(format_args!("g class=\"signal-names\""))?;
    for (idx, lane) in scene.lanes.iter().enumerate() {
        let y = style.top_padding + idx as f64 * style.row_height + style.row_height / 2. + 4.;
        w.text(
            "text",
            format_args!(
                "x=\"{}\" y=\"{}\" font-family=\"monospace\" font-size=\"12\" font-weight=\"bold\" fill=\"{}\" text-anchor=\"end\"",
                Num(style.label_width - 12.),
                Num(y),
                Escape(&lane.color)
            ),
            &lane.name,
        )?;
    }
    w.close("g")?;

    w.open(format_args!(
        "g transform=\"translate({}, 0)\"",
        Num(style.label_width)
    ))?;
    w.open(format_args!("defs"))?;
    w.open(format_args!(
        "pattern id=\"waveGrid\" width=\"{}\" height=\"{}\" patternUnits=\"userSpaceOnUse\"",
        Num(style.step_width),
        Num(style.row_height)
    ))?;
    w.line(format_args!(
        "<path d=\"M {} 0 L {} {}\" stroke=\"{GRID_COLOR}\" stroke-width=\"1\" stroke-dasharray=\"2 2\"/>",
        Num(style.step_width),
        Num(style.step_width),
        Num(style.row_height)
    ))?;
    w.close("pattern")?;
    w.close("defs")?;
    w.line(format_args!(
        "<rect width=\"{}\" height=\"{}\" fill=\"url(#waveGrid)\"/>",
        Num(scene.width),
        Num(scene.height)
    ))?;

    w.open(format_args!(
        "g class=\"ruler\" transform=\"translate(0, {})\"",
        Num(style.ruler_offset)
    ))?;
    for tick in scene.ruler.iter() {
        w.text(
            "text",
            format_args!(
                "x=\"{}\" y=\"0\" font-family=\"monospace\" font-size=\"9\" fill=\"{RULER_COLOR}\" text-anchor=\"start\"",
                Num(tick.x)
            ),
            &tick.label,
        )?;
    }
    w.close("g")?;

    for lane in scene.lanes.iter() {
        w.open(format_args!(
            "g class=\"lane\" transform=\"translate(0, {})\"",
            Num(lane.y_offset)
        ))?;
        w.line(format_args!(
            "<line x1=\"0\" y1=\"{}\" x2=\"{}\" y2=\"{}\" stroke=\"{GRID_COLOR}\" stroke-width=\"1\"/>",
            Num(lane.baseline),
            Num(scene.width),
            Num(lane.baseline)
        ))?;
        w.line(format_args!(
            "<polyline points=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"2\" stroke-linejoin=\"round\"/>",
            lane.trace,
            Escape(&lane.color)
        ))?;
        w.close("g")?;
    }

    w.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::waveform::{render_waveform, SimulationData, WaveformSignal};

    #[test]
    fn placeholder_svg() {
        let style = WaveformStyle::default();
        let svg = to_svg(&render_waveform(None, &style), &style).unwrap();
        assert!(svg.contains(PLACEHOLDER_TEXT));
        assert!(!svg.contains("polyline"));
    }

    #[test]
    fn scene_svg_contains_lanes() {
        let style = WaveformStyle::default();
        let sim = SimulationData {
            time_steps: 3,
            signals: vec![
                WaveformSignal::new("clk", vec![0., 1., 0.]),
                WaveformSignal::new("a<b", vec![1., 1., 1.]),
            ],
        };
        let svg = to_svg(&render_waveform(Some(&sim), &style), &style).unwrap();
        assert!(svg.contains("width=\"1128\" height=\"120\""));
        assert!(svg.contains(">20ns</text>"));
        assert!(svg.contains("translate(0, 40)"));
        assert!(svg.contains("translate(0, 80)"));
        assert!(svg.contains("points=\"0,0 30,0 60,0 90,0\""));
        assert!(svg.contains("stroke=\"#fbbf24\""));
        assert!(svg.contains("a&lt;b"));
    }
}
