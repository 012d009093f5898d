use std::path::{Path, PathBuf};

use gemini::{Gemini, GeminiConfig};
use log::info;
use logicforge::config::ForgeConfig;
use logicforge::design::validation::validate_design;
use logicforge::design::GeneratedDesign;
use logicforge::error::{ErrorSource, Result};
use logicforge::gateway::DesignGateway;
use logicforge::io::{create_dir_all, read_to_string, write_file};
use logicforge::schematic::{render_schematic, SchematicStyle, SchematicView, Viewport};
use logicforge::session::{Outcome, Session};
use logicforge::waveform::{render_waveform, WaveformStyle};
use logicforge::Log;

/// Loads the gateway configuration from `path`, or from the environment.
pub fn gateway_config(path: Option<&Path>) -> Result<GeminiConfig> {
    match path {
        Some(path) => GeminiConfig::from_file(path),
        None => Ok(GeminiConfig::from_env()),
    }
}

/// Generates a design for `prompt` with the Gemini gateway and writes it to `out_dir`.
pub fn generate(prompt: &str, out_dir: impl AsRef<Path>, config: GeminiConfig) -> Result<Vec<PathBuf>> {
    let gateway = Gemini::new(config)?;
    generate_with(gateway, prompt, out_dir)
}

/// Generates a design for `prompt` with `gateway` and writes it to `out_dir`.
pub fn generate_with<G>(gateway: G, prompt: &str, out_dir: impl AsRef<Path>) -> Result<Vec<PathBuf>>
where
    G: DesignGateway + 'static,
{
    let cfg = ForgeConfig::builder().gateway(gateway).build()?;
    let mut session = Session::new(cfg);
    match session.generate_now(prompt) {
        Outcome::Generated => (),
        Outcome::Failed(err) => return Err(ErrorSource::Gateway(err).into()),
        Outcome::Ignored => {
            return Err(ErrorSource::InvalidArgs("prompt must not be blank".to_string()).into())
        }
    }
    let design = session
        .design()
        .ok_or_else(|| ErrorSource::Internal("generated design missing".to_string()))?;
    let config = session.config();
    write_design(
        design,
        session.viewport(),
        &config.schematic_style,
        &config.waveform_style,
        out_dir,
    )
}

/// Renders an existing design file into `out_dir` without contacting any gateway.
pub fn render(design_path: impl AsRef<Path>, out_dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    let text = read_to_string(design_path)?;
    let design = GeneratedDesign::from_json(&text)?;
    validate_design(&design).log();

    let schematic_style = SchematicStyle::default();
    let mut viewport = Viewport::new();
    viewport.reset_for(&design.schematic, &schematic_style);
    write_design(
        &design,
        &viewport,
        &schematic_style,
        &WaveformStyle::default(),
        out_dir,
    )
}

/// Writes the design JSON, both sources and both diagrams. Returns the written paths.
pub fn write_design(
    design: &GeneratedDesign,
    viewport: &Viewport,
    schematic_style: &SchematicStyle,
    waveform_style: &WaveformStyle,
    out_dir: impl AsRef<Path>,
) -> Result<Vec<PathBuf>> {
    let out_dir = out_dir.as_ref();
    create_dir_all(out_dir)?;

    let schematic = SchematicView::Scene(render_schematic(&design.schematic, schematic_style));
    let waveform = render_waveform(Some(&design.simulation), waveform_style);

    let files = [
        ("design.json", design.to_json_pretty()?),
        ("module.v", design.verilog_code.clone()),
        ("testbench.v", design.testbench_code.clone()),
        (
            "schematic.svg",
            logicforge::schematic::svg::to_svg(&schematic, viewport)?,
        ),
        (
            "waveform.svg",
            logicforge::waveform::svg::to_svg(&waveform, waveform_style)?,
        ),
    ];

    let mut paths = Vec::with_capacity(files.len());
    for (name, contents) in files {
        let path = out_dir.join(name);
        write_file(&path, contents)?;
        info!("wrote {path:?}");
        paths.push(path);
    }
    Ok(paths)
}
