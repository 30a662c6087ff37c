//! # Vector Documents
//!
//! A [`VectorDocument`] is a page of draw primitives positioned in points.
//! [`DocumentBuilder`] lays content out top to bottom with a cursor and
//! sizes the page to fit when it is finished:
//!
//! ```text
//! ┌──────────── page_width ────────────┐
//! │ margins                            │
//! │        CHESSIE          (centered) │
//! │   Jul 06, 2025 · 12:40 PM          │
//! │ ────────────────────────────────── │  rule
//! │        Large Coffee                │
//! │ margins                            │  ← content height
//! │ safety margin                      │  max(content × pct, minimum)
//! └────────────────────────────────────┘
//! ```
//!
//! Centered blocks that wrap past [`SHRINK_AFTER_LINES`] lines are re-laid
//! once at [`SHRINK_FACTOR`] of their size so long names stay inside a
//! predictable physical height.

use crate::config::{PdfStyle, SafetyMargins};
use crate::layout::wrap_with;

use super::FontFace;

/// Wrapped line count above which a centered block shrinks.
pub const SHRINK_AFTER_LINES: usize = 2;

/// Size multiplier applied when a block shrinks.
pub const SHRINK_FACTOR: f32 = 0.75;

#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    /// Left edge, points
    pub x: f32,
    /// Top of the line box, points
    pub y: f32,
    pub text: String,
    /// Em size, points
    pub size: f32,
    pub bold: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Text(TextRun),
    Rule {
        x: f32,
        y: f32,
        width: f32,
        thickness: f32,
    },
}

impl Primitive {
    pub fn top(&self) -> f32 {
        match self {
            Primitive::Text(run) => run.y,
            Primitive::Rule { y, .. } => *y,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct VectorDocument {
    pub page_width: f32,
    pub page_height: f32,
    /// Height used by content, before the safety margin
    pub content_height: f32,
    pub primitives: Vec<Primitive>,
}

impl VectorDocument {
    /// All text runs, top to bottom.
    pub fn texts(&self) -> impl Iterator<Item = &TextRun> {
        self.primitives.iter().filter_map(|p| match p {
            Primitive::Text(run) => Some(run),
            Primitive::Rule { .. } => None,
        })
    }
}

/// Page height for `content`: `content + max(content × percentage, minimum)`.
pub fn page_height(content: f32, margins: &SafetyMargins) -> f32 {
    content + (content * margins.percentage).max(margins.minimum)
}

pub struct DocumentBuilder<'f> {
    font: &'f FontFace,
    style: PdfStyle,
    page_width: f32,
    cursor: f32,
    primitives: Vec<Primitive>,
}

impl<'f> DocumentBuilder<'f> {
    pub fn new(font: &'f FontFace, style: PdfStyle, page_width: f32) -> Self {
        Self {
            font,
            style,
            page_width,
            cursor: style.margins,
            primitives: Vec::new(),
        }
    }

    fn left(&self) -> f32 {
        self.style.margins
    }

    pub fn content_width(&self) -> f32 {
        (self.page_width - 2.0 * self.style.margins).max(0.0)
    }

    pub fn measure(&self, text: &str, size: f32, bold: bool) -> f32 {
        self.font.measure(text, size, bold)
    }

    fn push_line(&mut self, x: f32, text: String, size: f32, bold: bool) {
        self.primitives.push(Primitive::Text(TextRun {
            x,
            y: self.cursor,
            text,
            size,
            bold,
        }));
        self.cursor += size * self.style.line_height_ratio;
    }

    fn wrap(&self, text: &str, width: f32, size: f32, bold: bool) -> Vec<String> {
        wrap_with(text, width, |s| self.font.measure(s, size, bold))
    }

    /// Wrapped, truly centered text. Returns the size actually used.
    pub fn centered(&mut self, text: &str, size: f32, bold: bool) -> f32 {
        let width = self.content_width();
        let mut size = size;
        let mut lines = self.wrap(text, width, size, bold);
        if lines.len() > SHRINK_AFTER_LINES {
            size *= SHRINK_FACTOR;
            lines = self.wrap(text, width, size, bold);
        }

        for line in lines {
            let w = self.measure(&line, size, bold);
            let x = self.left() + ((width - w) / 2.0).max(0.0);
            self.push_line(x, line, size, bold);
        }
        size
    }

    /// One unwrapped line at the left margin plus `indent`.
    pub fn line(&mut self, text: &str, size: f32, bold: bool, indent: f32) {
        let x = self.left() + indent;
        self.push_line(x, text.to_string(), size, bold);
    }

    /// List item inset by the style's `indent`: wrapped text with a marker
    /// on the first line and a continuation prefix on the rest (`[ ] ` /
    /// four spaces).
    pub fn hanging(&mut self, marker: &str, continuation: &str, text: &str, size: f32) {
        let x = self.left() + self.style.indent;
        let available = self.content_width() - self.style.indent - self.measure(marker, size, false);
        let lines = self.wrap(text, available, size, false);
        for (i, line) in lines.into_iter().enumerate() {
            let prefix = if i == 0 { marker } else { continuation };
            self.push_line(x, format!("{}{}", prefix, line), size, false);
        }
    }

    /// Horizontal rule across the content width, padded above and below.
    pub fn rule(&mut self, thickness: f32) {
        let width = self.content_width();
        self.rule_at(self.left(), width, thickness);
    }

    /// Left-aligned rule of a given width.
    pub fn short_rule(&mut self, width: f32, thickness: f32) {
        let width = width.min(self.content_width());
        self.rule_at(self.left(), width, thickness);
    }

    fn rule_at(&mut self, x: f32, width: f32, thickness: f32) {
        self.cursor += self.style.padding;
        self.primitives.push(Primitive::Rule {
            x,
            y: self.cursor,
            width,
            thickness,
        });
        self.cursor += thickness + self.style.padding;
    }

    pub fn paragraph_break(&mut self) {
        self.cursor += self.style.paragraph_spacing;
    }

    /// Close the page: content height plus bottom margin plus safety margin.
    pub fn finish(self, margins: &SafetyMargins) -> VectorDocument {
        let content_height = self.cursor + self.style.margins;
        VectorDocument {
            page_width: self.page_width,
            page_height: page_height(content_height, margins),
            content_height,
            primitives: self.primitives,
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn style() -> PdfStyle {
        PdfStyle {
            margins: 10.0,
            line_height_ratio: 1.5,
            paragraph_spacing: 6.0,
            indent: 12.0,
            padding: 4.0,
        }
    }

    fn margins() -> SafetyMargins {
        SafetyMargins {
            percentage: 0.1,
            minimum: 20.0,
        }
    }

    #[test]
    fn test_page_height_uses_larger_margin() {
        assert_eq!(page_height(100.0, &margins()), 120.0);
        assert_eq!(page_height(500.0, &margins()), 550.0);
    }

    #[test]
    fn test_page_never_below_minimum_margin() {
        let font = FontFace::Bitmap;
        let doc = DocumentBuilder::new(&font, style(), 288.0).finish(&margins());
        assert_eq!(doc.content_height, 20.0);
        assert_eq!(doc.page_height, 40.0);
    }

    #[test]
    fn test_centered_line_is_centered() {
        let font = FontFace::Bitmap;
        let mut b = DocumentBuilder::new(&font, style(), 288.0);
        b.centered("ABCD", 20.0, false); // 4 × 10pt = 40pt wide
        let doc = b.finish(&margins());
        let run = doc.texts().next().unwrap();
        assert_eq!(run.x, 10.0 + (268.0 - 40.0) / 2.0);
        assert_eq!(run.y, 10.0);
    }

    #[test]
    fn test_centered_shrinks_after_two_lines() {
        let font = FontFace::Bitmap;
        let mut b = DocumentBuilder::new(&font, style(), 120.0);
        // content width 100pt, 10pt per char at size 20: ten chars per line
        let used = b.centered("aaa bbb ccc ddd eee", 20.0, true);
        assert_eq!(used, 15.0);
        let doc = b.finish(&margins());
        assert!(doc.texts().all(|t| t.size == 15.0));
        assert_eq!(doc.texts().count(), 2);
    }

    #[test]
    fn test_centered_two_lines_keep_size() {
        let font = FontFace::Bitmap;
        let mut b = DocumentBuilder::new(&font, style(), 120.0);
        let used = b.centered("aaaa bbbb cccc", 20.0, true);
        assert_eq!(used, 20.0);
    }

    #[test]
    fn test_hanging_indent() {
        let font = FontFace::Bitmap;
        let mut b = DocumentBuilder::new(&font, style(), 132.0);
        // size 10: 5pt per char, 112pt content, indent 12, marker 20pt -> 16 chars
        b.hanging("[ ] ", "    ", "Organic free range brown eggs", 10.0);
        let doc = b.finish(&margins());
        let lines: Vec<&str> = doc.texts().map(|t| t.text.as_str()).collect();
        assert_eq!(lines, vec!["[ ] Organic free", "    range brown eggs"]);
        assert!(doc.texts().all(|t| t.x == 22.0));
    }

    #[test]
    fn test_cursor_advances_by_line_height_and_rules() {
        let font = FontFace::Bitmap;
        let mut b = DocumentBuilder::new(&font, style(), 288.0);
        b.line("x", 10.0, false, 0.0); // 15
        b.rule(2.0); // 4 + 2 + 4
        b.paragraph_break(); // 6
        let doc = b.finish(&margins());
        assert_eq!(doc.content_height, 10.0 + 15.0 + 10.0 + 6.0 + 10.0);
        assert!(matches!(doc.primitives[1], Primitive::Rule { y, .. } if y == 29.0));
    }
}
