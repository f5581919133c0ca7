//! Writers for finished grids: plain text lines or a standalone HTML page.

use crate::grid::AsciiGrid;
use crate::Result;
use std::io::Write;
use std::path::PathBuf;

pub trait AsciiOutput {
    fn output(&mut self, grid: &AsciiGrid) -> Result<()>;
}

/// One line per grid row.
pub struct ConsoleOutput<W> {
    writer: W,
}

impl<W: Write> ConsoleOutput<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> AsciiOutput for ConsoleOutput<W> {
    fn output(&mut self, grid: &AsciiGrid) -> Result<()> {
        write!(self.writer, "{}", grid)?;
        self.writer.flush()?;
        Ok(())
    }
}

/// Writes the grid as an HTML document, one `<div>` per row.
pub struct HtmlOutput {
    path: PathBuf,
    font_family: String,
}

impl HtmlOutput {
    pub fn new(path: impl Into<PathBuf>, font_family: impl Into<String>) -> Self {
        Self { path: path.into(), font_family: font_family.into() }
    }

    pub fn render(&self, grid: &AsciiGrid) -> String {
        let mut html = String::new();
        html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
        html.push_str("<title>ASCII Art</title>\n</head>\n");
        html.push_str("<body style=\"background-color:#1e1e1e;color:#d4d4d4\">\n");
        html.push_str(&format!(
            "<div style=\"font-family:'{}',monospace;font-size:8px;line-height:1;white-space:pre\">\n",
            escape_attr(&self.font_family)
        ));
        for line in grid.lines() {
            html.push_str("<div>");
            for ch in line.chars() {
                html.push_str(&escape_char(ch));
            }
            html.push_str("</div>\n");
        }
        html.push_str("</div>\n</body>\n</html>\n");
        html
    }
}

impl AsciiOutput for HtmlOutput {
    fn output(&mut self, grid: &AsciiGrid) -> Result<()> {
        std::fs::write(&self.path, self.render(grid))?;
        log::info!("wrote {}x{} grid to {}", grid.cols(), grid.rows(), self.path.display());
        Ok(())
    }
}

fn escape_char(ch: char) -> String {
    match ch {
        '&' => "&amp;".to_string(),
        '<' => "&lt;".to_string(),
        '>' => "&gt;".to_string(),
        '"' => "&quot;".to_string(),
        '\'' => "&#39;".to_string(),
        ' ' => "&nbsp;".to_string(),
        other => other.to_string(),
    }
}

fn escape_attr(text: &str) -> String {
    text.chars()
        .map(|ch| match ch {
            ' ' => " ".to_string(),
            '\'' => String::new(),
            other => escape_char(other),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> AsciiGrid {
        AsciiGrid::from_cells(2, vec!['<', '&', ' ', '#']).unwrap()
    }

    #[test]
    fn test_console_lines() {
        let mut out = ConsoleOutput::new(Vec::new());
        out.output(&grid()).unwrap();
        assert_eq!(String::from_utf8(out.into_inner()).unwrap(), "<&\n #\n");
    }

    #[test]
    fn test_html_escapes_cells() {
        let html = HtmlOutput::new("unused.html", "Courier New").render(&grid());
        assert!(html.contains("<div>&lt;&amp;</div>"));
        assert!(html.contains("<div>&nbsp;#</div>"));
        assert!(html.contains("font-family:'Courier New',monospace"));
    }

    #[test]
    fn test_html_file_written() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.html");
        HtmlOutput::new(&path, "monospace").output(&grid()).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("<!DOCTYPE html>"));
        assert_eq!(written.matches("<div>").count(), 2);
    }
}
