//! Minimal SVG text output.

use std::fmt::{Display, Write};

use forgegeom::fmt_num;

/// Escapes text for use in XML content and attribute values.
pub struct Escape<'a>(pub &'a str);

impl<'a> Display for Escape<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for c in self.0.chars() {
            match c {
                '&' => f.write_str("&amp;")?,
                '<' => f.write_str("&lt;")?,
                '>' => f.write_str("&gt;")?,
                '"' => f.write_str("&quot;")?,
                '\'' => f.write_str("&apos;")?,
                c => f.write_char(c)?,
            }
        }
        Ok(())
    }
}

/// Displays a coordinate without a trailing `.0`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Num(pub f64);

impl Display for Num {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&fmt_num(self.0))
    }
}

/// An SVG document under construction.
///
/// Elements are written as indented lines; [`SvgWriter::finish`] closes any open groups.
#[derive(Debug, Default)]
pub struct SvgWriter {
    buf: String,
    depth: usize,
}

impl SvgWriter {
    /// Opens the root `<svg>` element with the given attributes.
    pub fn new(attrs: std::fmt::Arguments<'_>) -> Result<Self, std::fmt::Error> {
        let mut w = Self::default();
        w.open(format_args!(
            "svg xmlns=\"http://www.w3.org/2000/svg\" {attrs}"
        ))?;
        Ok(w)
    }

    fn indent(&mut self) -> std::fmt::Result {
        for _ in 0..self.depth {
            self.buf.write_str("  ")?;
        }
        Ok(())
    }

    /// Writes a complete line of markup at the current depth.
    pub fn line(&mut self, markup: std::fmt::Arguments<'_>) -> std::fmt::Result {
        self.indent()?;
        self.buf.write_fmt(markup)?;
        self.buf.write_char('\n')
    }

    /// Opens an element; `tag` holds the name followed by its attributes.
    pub fn open(&mut self, tag: std::fmt::Arguments<'_>) -> std::fmt::Result {
        self.line(format_args!("<{tag}>"))?;
        self.depth += 1;
        Ok(())
    }

    /// Closes the innermost open element.
    pub fn close(&mut self, name: &str) -> std::fmt::Result {
        self.depth = self.depth.saturating_sub(1);
        self.line(format_args!("</{name}>"))
    }

    /// Writes `<name attrs>text</name>` with `text` escaped.
    pub fn text(
        &mut self,
        name: &str,
        attrs: std::fmt::Arguments<'_>,
        text: &str,
    ) -> std::fmt::Result {
        self.line(format_args!("<{name} {attrs}>{}</{name}>", Escape(text)))
    }

    /// Closes the root element and returns the document.
    pub fn finish(mut self) -> Result<String, std::fmt::Error> {
        while self.depth > 1 {
            self.close("g")?;
        }
        self.close("svg")?;
        Ok(self.buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup() {
        assert_eq!(
            Escape("a < b && \"c\"").to_string(),
            "a &lt; b &amp;&amp; &quot;c&quot;"
        );
    }

    #[test]
    fn numbers_drop_trailing_zero() {
        assert_eq!(Num(30.).to_string(), "30");
        assert_eq!(Num(2.5).to_string(), "2.5");
        assert_eq!(Num(-0.).to_string(), "0");
    }

    #[test]
    fn writer_closes_open_groups() {
        let mut w = SvgWriter::new(format_args!("width=\"{}\"", Num(10.))).unwrap();
        w.open(format_args!("g id=\"a\"")).unwrap();
        w.text("text", format_args!("x=\"0\""), "<hi>").unwrap();
        let svg = w.finish().unwrap();
        assert!(svg.starts_with("<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"10\">"));
        assert!(svg.contains("  <g id=\"a\">\n    <text x=\"0\">&lt;hi&gt;</text>\n  </g>\n</svg>"));
    }
}
