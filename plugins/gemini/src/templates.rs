use lazy_static::lazy_static;
use logicforge::design::validation::{INPUT_MAX_X, OUTPUT_MIN_X};
use logicforge::design::NodeType;
use serde::Serialize;
use tera::{Context, Tera};

use crate::GatewayError;

lazy_static! {
    pub(crate) static ref TEMPLATES: Tera = {
        let mut tera = Tera::default();
        if let Err(e) = tera.add_raw_templates(vec![
            ("system.txt", include_str!("../templates/system.txt")),
            ("request.txt", include_str!("../templates/request.txt")),
        ]) {
            panic!("Encountered errors while parsing Tera templates: {e}");
        }
        tera
    };
}

#[derive(Serialize)]
pub(crate) struct SystemCtx {
    pub(crate) canvas_width: u32,
    pub(crate) canvas_height: u32,
    pub(crate) input_max_x: u32,
    pub(crate) output_min_x: u32,
    pub(crate) node_types: Vec<&'static str>,
    pub(crate) min_steps: u32,
    pub(crate) max_steps: u32,
}

impl Default for SystemCtx {
    fn default() -> Self {
        Self {
            canvas_width: 800,
            canvas_height: 600,
            input_max_x: INPUT_MAX_X as u32,
            output_min_x: OUTPUT_MIN_X as u32,
            node_types: NodeType::ALL.iter().map(|t| t.as_str()).collect(),
            min_steps: 20,
            max_steps: 50,
        }
    }
}

#[derive(Serialize)]
struct RequestCtx<'a> {
    prompt: &'a str,
}

fn render(name: &str, ctx: &Context) -> Result<String, GatewayError> {
    let text = TEMPLATES
        .render(name, ctx)
        .map_err(|e| GatewayError::Request(format!("template error: {e}")))?;
    Ok(text.trim().to_string())
}

/// Renders the system instruction.
pub(crate) fn render_system_instruction(ctx: &SystemCtx) -> Result<String, GatewayError> {
    let ctx = Context::from_serialize(ctx)
        .map_err(|e| GatewayError::Request(format!("template error: {e}")))?;
    render("system.txt", &ctx)
}

/// Renders the user turn carrying `prompt`.
pub(crate) fn render_request(prompt: &str) -> Result<String, GatewayError> {
    let ctx = Context::from_serialize(RequestCtx { prompt })
        .map_err(|e| GatewayError::Request(format!("template error: {e}")))?;
    render("request.txt", &ctx)
}
