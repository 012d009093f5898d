//! The inspector panel: design specs and the generated source code.

use std::fmt::Display;
use std::time::{Duration, Instant};

use arcstr::ArcStr;

use crate::design::{GeneratedDesign, NodeType};
use crate::error::{ErrorSource, Result};

/// Module name shown in the specs tab.
pub const MODULE_NAME: &str = "generated_module";
pub const NO_DESIGN_TEXT: &str = "No design generated yet.";
/// Shown in place of an empty code body.
pub const NO_CODE_TEXT: &str = "// No code generated";
/// How long a code panel reports itself as copied.
pub const COPIED_FOR: Duration = Duration::from_secs(2);

#[derive(Debug, Default, Copy, Clone, Eq, PartialEq, Hash)]
pub enum InspectorTab {
    #[default]
    Specs,
    Verilog,
    Testbench,
}

impl Display for InspectorTab {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            InspectorTab::Specs => "Specs",
            InspectorTab::Verilog => "Verilog",
            InspectorTab::Testbench => "Testbench",
        };
        write!(f, "{name}")
    }
}

/// The contents of the specs tab.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct SpecsSummary {
    pub module_name: &'static str,
    /// Number of INPUT nodes, or [`None`] without a design.
    pub inputs: Option<usize>,
    pub outputs: Option<usize>,
    pub explanation: String,
}

impl SpecsSummary {
    pub fn new(design: Option<&GeneratedDesign>) -> Self {
        match design {
            Some(design) => Self {
                module_name: MODULE_NAME,
                inputs: Some(design.schematic.count(NodeType::Input)),
                outputs: Some(design.schematic.count(NodeType::Output)),
                explanation: if design.explanation.is_empty() {
                    NO_DESIGN_TEXT.to_string()
                } else {
                    design.explanation.clone()
                },
            },
            None => Self {
                module_name: MODULE_NAME,
                inputs: None,
                outputs: None,
                explanation: NO_DESIGN_TEXT.to_string(),
            },
        }
    }
}

struct Count(Option<usize>);

impl Display for Count {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            Some(n) => write!(f, "{n}"),
            None => write!(f, "-"),
        }
    }
}

impl Display for SpecsSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Module Name: {}", self.module_name)?;
        writeln!(f, "Inputs: {}", Count(self.inputs))?;
        writeln!(f, "Outputs: {}", Count(self.outputs))?;
        writeln!(f)?;
        write!(f, "{}", self.explanation)
    }
}

/// A one-way text sink, such as the system clipboard.
pub trait ClipboardSink {
    fn write_text(&mut self, text: &str) -> Result<()>;
}

/// A [`ClipboardSink`] that keeps the last text written to it.
#[derive(Debug, Default, Clone, Eq, PartialEq)]
pub struct MemoryClipboard {
    pub contents: Option<String>,
}

impl ClipboardSink for MemoryClipboard {
    fn write_text(&mut self, text: &str) -> Result<()> {
        self.contents = Some(text.to_string());
        Ok(())
    }
}

/// A titled source code view with a copy action.
#[derive(Debug, Clone, PartialEq)]
pub struct CodePanel {
    title: ArcStr,
    copied_at: Option<Instant>,
}

impl CodePanel {
    pub fn new(title: impl Into<ArcStr>) -> Self {
        Self {
            title: title.into(),
            copied_at: None,
        }
    }

    #[inline]
    pub fn title(&self) -> &ArcStr {
        &self.title
    }

    /// The text to display for `code`.
    pub fn body<'a>(&self, code: &'a str) -> &'a str {
        if code.is_empty() {
            NO_CODE_TEXT
        } else {
            code
        }
    }

    /// Writes `code` to `sink` and marks the panel as copied.
    pub fn copy(&mut self, code: &str, sink: &mut dyn ClipboardSink) -> Result<()> {
        self.copy_at(code, sink, Instant::now())
    }

    pub fn copy_at(&mut self, code: &str, sink: &mut dyn ClipboardSink, now: Instant) -> Result<()> {
        sink.write_text(code)?;
        self.copied_at = Some(now);
        Ok(())
    }

    /// Returns `true` within [`COPIED_FOR`] of the last copy.
    pub fn is_copied_at(&self, now: Instant) -> bool {
        self.copied_at
            .map(|at| now.saturating_duration_since(at) < COPIED_FOR)
            .unwrap_or(false)
    }

    #[inline]
    pub fn is_copied(&self) -> bool {
        self.is_copied_at(Instant::now())
    }
}

/// Converts a platform clipboard failure into a crate error.
pub fn clipboard_error(msg: impl Into<String>) -> crate::error::ForgeError {
    ErrorSource::Clipboard(msg.into()).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::half_adder;

    struct Broken;

    impl ClipboardSink for Broken {
        fn write_text(&mut self, _text: &str) -> Result<()> {
            Err(clipboard_error("no display"))
        }
    }

    #[test]
    fn specs_without_design() {
        let specs = SpecsSummary::new(None);
        assert_eq!(
            specs.to_string(),
            "Module Name: generated_module\nInputs: -\nOutputs: -\n\nNo design generated yet."
        );
    }

    #[test]
    fn specs_with_design() {
        let design = half_adder();
        let specs = SpecsSummary::new(Some(&design));
        assert_eq!(specs.inputs, Some(2));
        assert_eq!(specs.outputs, Some(2));
        assert_eq!(specs.explanation, design.explanation);
    }

    #[test]
    fn empty_explanation_falls_back() {
        let mut design = half_adder();
        design.explanation.clear();
        let specs = SpecsSummary::new(Some(&design));
        assert_eq!(specs.explanation, NO_DESIGN_TEXT);
        assert_eq!(specs.inputs, Some(2));
    }

    #[test]
    fn copied_flag_expires() {
        let mut panel = CodePanel::new("module.v");
        let mut sink = MemoryClipboard::default();
        let t0 = Instant::now();
        assert!(!panel.is_copied_at(t0));
        panel.copy_at("module m; endmodule", &mut sink, t0).unwrap();
        assert_eq!(sink.contents.as_deref(), Some("module m; endmodule"));
        assert!(panel.is_copied_at(t0 + Duration::from_millis(1999)));
        assert!(!panel.is_copied_at(t0 + COPIED_FOR));
    }

    #[test]
    fn failed_copy_does_not_mark() {
        let mut panel = CodePanel::new("testbench.v");
        assert!(panel.copy("x", &mut Broken).is_err());
        assert!(!panel.is_copied());
    }

    #[test]
    fn empty_body_placeholder() {
        let panel = CodePanel::new("module.v");
        assert_eq!(panel.body(""), NO_CODE_TEXT);
        assert_eq!(panel.body("wire a;"), "wire a;");
    }
}
