//! Interactive state: the chat log, the current design and the views onto it.
//!
//! A [`Session`] owns every piece of mutable UI state. Generation requests run on
//! worker threads and report back through a channel; each completion is applied
//! atomically by [`Session::apply`]. Requests are not serialized, so when several
//! are outstanding the last one to finish wins.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;

use crate::config::ForgeConfig;
use crate::design::validation::validate_design;
use crate::design::GeneratedDesign;
use crate::error::Result;
use crate::gateway::{DesignGateway, GatewayError};
use crate::log::{error, info, Log};
use crate::schematic::{render_schematic_view, PointerEvent, SchematicView, Viewport};
use crate::waveform::{render_waveform, WaveformView};

pub mod chat;
pub mod inspector;

use chat::{ChatLog, ChatMessage, PENDING_MESSAGE, SUCCESS_MESSAGE};
use inspector::{ClipboardSink, CodePanel, InspectorTab, SpecsSummary};

/// Example prompts offered beside the input box.
pub const PRESETS: [&str; 4] = [
    "4-bit Counter",
    "Full Adder",
    "Traffic Light Controller",
    "SPI Master",
];

/// The completion of one generation request.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationEvent {
    pub prompt: String,
    pub result: std::result::Result<GeneratedDesign, GatewayError>,
}

/// What applying a [`GenerationEvent`] did.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The prompt was blank; nothing was requested.
    Ignored,
    /// A new design replaced the previous one.
    Generated,
    /// The request failed; the previous design is kept.
    Failed(GatewayError),
}

/// Whether the waveform panel has data to show.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum SimulationStatus {
    Complete,
    NoData,
}

impl std::fmt::Display for SimulationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SimulationStatus::Complete => write!(f, "SIMULATION_COMPLETE"),
            SimulationStatus::NoData => write!(f, "NO_DATA"),
        }
    }
}

/// Calls `gateway`, reporting a panic as a transport failure.
fn run_gateway(
    gateway: &dyn DesignGateway,
    prompt: &str,
) -> std::result::Result<GeneratedDesign, GatewayError> {
    catch_unwind(AssertUnwindSafe(|| gateway.generate(prompt))).unwrap_or_else(|payload| {
        let cause = payload
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown cause".to_string());
        error!("design gateway panicked: {cause}");
        Err(GatewayError::Transport(format!(
            "design gateway panicked: {cause}"
        )))
    })
}

pub struct Session {
    config: ForgeConfig,
    chat: ChatLog,
    design: Option<GeneratedDesign>,
    loading: bool,
    tab: InspectorTab,
    show_waveform: bool,
    viewport: Viewport,
    verilog_panel: CodePanel,
    testbench_panel: CodePanel,
    tx: Sender<GenerationEvent>,
    rx: Receiver<GenerationEvent>,
    /// Requests dispatched but not yet applied.
    in_flight: usize,
}

impl Session {
    pub fn new(config: ForgeConfig) -> Self {
        let (tx, rx) = channel();
        Self {
            config,
            chat: ChatLog::new(),
            design: None,
            loading: false,
            tab: InspectorTab::default(),
            show_waveform: true,
            viewport: Viewport::new(),
            verilog_panel: CodePanel::new("module.v"),
            testbench_panel: CodePanel::new("testbench.v"),
            tx,
            rx,
            in_flight: 0,
        }
    }

    /// Records `prompt` in the chat log. Returns `false` for blank prompts.
    fn begin(&mut self, prompt: &str) -> bool {
        if prompt.trim().is_empty() {
            return false;
        }
        self.chat.push(ChatMessage::user(prompt));
        self.chat.push(ChatMessage::assistant(PENDING_MESSAGE));
        self.loading = true;
        info!(
            "requesting design from {} for prompt {:?}",
            self.config.gateway.name(),
            prompt
        );
        true
    }

    /// Starts a generation on a worker thread.
    ///
    /// Returns `false` without doing anything if `prompt` is blank. Completions
    /// are picked up by [`Session::poll`] or [`Session::wait`].
    pub fn submit(&mut self, prompt: &str) -> bool {
        if !self.begin(prompt) {
            return false;
        }
        let gateway = Arc::clone(&self.config.gateway);
        let tx = self.tx.clone();
        let prompt = prompt.to_string();
        self.in_flight += 1;
        std::thread::spawn(move || {
            let result = run_gateway(&*gateway, &prompt);
            // The receiver only disappears with the session.
            let _ = tx.send(GenerationEvent { prompt, result });
        });
        true
    }

    /// Applies every completion that has already arrived.
    pub fn poll(&mut self) -> Vec<Outcome> {
        let mut outcomes = Vec::new();
        while let Ok(event) = self.rx.try_recv() {
            self.in_flight = self.in_flight.saturating_sub(1);
            outcomes.push(self.apply(event));
        }
        outcomes
    }

    /// Blocks until the next completion arrives and applies it.
    ///
    /// Returns [`None`] if no request is outstanding.
    pub fn wait(&mut self) -> Option<Outcome> {
        if self.in_flight == 0 {
            return None;
        }
        let event = self.rx.recv().ok()?;
        self.in_flight -= 1;
        Some(self.apply(event))
    }

    /// Runs a generation on the calling thread.
    pub fn generate_now(&mut self, prompt: &str) -> Outcome {
        if !self.begin(prompt) {
            return Outcome::Ignored;
        }
        let result = run_gateway(&*self.config.gateway, prompt);
        self.apply(GenerationEvent {
            prompt: prompt.to_string(),
            result,
        })
    }

    /// Applies a completed generation.
    ///
    /// On success the design is replaced wholesale, the viewport is re-centered and
    /// the Verilog tab is shown. On failure the design is left as it was. Either
    /// way the latest chat entry is replaced with the result.
    pub fn apply(&mut self, event: GenerationEvent) -> Outcome {
        self.loading = false;
        match event.result {
            Ok(design) => {
                info!("generated design for prompt {:?}", event.prompt);
                validate_design(&design).log();
                self.viewport
                    .reset_for(&design.schematic, &self.config.schematic_style);
                self.design = Some(design);
                self.tab = InspectorTab::Verilog;
                self.chat.replace_last(ChatMessage::assistant(SUCCESS_MESSAGE));
                Outcome::Generated
            }
            Err(err) => {
                error!("error generating design: {err}");
                self.chat.replace_last(ChatMessage::failure(&err));
                Outcome::Failed(err)
            }
        }
    }

    #[inline]
    pub fn config(&self) -> &ForgeConfig {
        &self.config
    }

    #[inline]
    pub fn chat(&self) -> &ChatLog {
        &self.chat
    }

    #[inline]
    pub fn design(&self) -> Option<&GeneratedDesign> {
        self.design.as_ref()
    }

    #[inline]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    #[inline]
    pub fn tab(&self) -> InspectorTab {
        self.tab
    }

    pub fn set_tab(&mut self, tab: InspectorTab) {
        self.tab = tab;
    }

    #[inline]
    pub fn show_waveform(&self) -> bool {
        self.show_waveform
    }

    pub fn toggle_waveform(&mut self) {
        self.show_waveform = !self.show_waveform;
    }

    pub fn simulation_status(&self) -> SimulationStatus {
        if self.design.is_some() {
            SimulationStatus::Complete
        } else {
            SimulationStatus::NoData
        }
    }

    #[inline]
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Forwards a pointer event to the schematic viewport.
    pub fn handle_pointer(&mut self, event: PointerEvent) {
        self.viewport.handle(event);
    }

    pub fn specs(&self) -> SpecsSummary {
        SpecsSummary::new(self.design())
    }

    /// The code panel and source text behind a code tab.
    ///
    /// Returns [`None`] for the specs tab.
    pub fn code(&self, tab: InspectorTab) -> Option<(&CodePanel, &str)> {
        let design = self.design();
        match tab {
            InspectorTab::Specs => None,
            InspectorTab::Verilog => Some((
                &self.verilog_panel,
                design.map(|d| d.verilog_code.as_str()).unwrap_or_default(),
            )),
            InspectorTab::Testbench => Some((
                &self.testbench_panel,
                design.map(|d| d.testbench_code.as_str()).unwrap_or_default(),
            )),
        }
    }

    /// Copies the source behind `tab` to `sink`. The specs tab has nothing to copy.
    pub fn copy_code(&mut self, tab: InspectorTab, sink: &mut dyn ClipboardSink) -> Result<()> {
        let design = self.design.as_ref();
        let (panel, code) = match tab {
            InspectorTab::Specs => return Ok(()),
            InspectorTab::Verilog => (
                &mut self.verilog_panel,
                design.map(|d| d.verilog_code.as_str()).unwrap_or_default(),
            ),
            InspectorTab::Testbench => (
                &mut self.testbench_panel,
                design.map(|d| d.testbench_code.as_str()).unwrap_or_default(),
            ),
        };
        panel.copy(code, sink)
    }

    /// The schematic of the current design, or the placeholder without one.
    pub fn schematic_view(&self) -> SchematicView {
        render_schematic_view(
            self.design().map(|d| &d.schematic),
            &self.config.schematic_style,
        )
    }

    pub fn waveform_view(&self) -> WaveformView {
        render_waveform(
            self.design().map(|d| &d.simulation),
            &self.config.waveform_style,
        )
    }

    pub fn schematic_svg(&self) -> Result<String> {
        crate::schematic::svg::to_svg(&self.schematic_view(), &self.viewport)
    }

    pub fn waveform_svg(&self) -> Result<String> {
        crate::waveform::svg::to_svg(&self.waveform_view(), &self.config.waveform_style)
    }
}
