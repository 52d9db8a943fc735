/// Console formatting module - Pure rendering concerns
///
/// This module handles all console output formatting including:
/// - Column layout and alignment
/// - Color terminal output
/// - Text truncation and padding
///
/// It accepts pre-formatted strings from the report module and renders
/// them to any `std::io::Write` destination, so the same code drives the
/// terminal and plain-text captures in tests.

use std::io::{self, Write};
use term::color::Color;
use terminal_size::{Width, terminal_size};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Horizontal alignment of one table column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
}

/// Writer for table output - configurable for color/plain text
pub struct TableWriter<W: Write> {
    writer: W,
    use_colors: bool,
}

impl<W: Write> TableWriter<W> {
    /// Create a new table writer
    pub fn new(writer: W, use_colors: bool) -> Self {
        Self { writer, use_colors }
    }

    /// Write formatted text, optionally with color
    pub fn write_colored(&mut self, text: &str, color: Color) -> io::Result<()> {
        if self.use_colors {
            // Use RGB for bright yellow (better Windows Terminal support)
            if color == term::color::BRIGHT_YELLOW {
                write!(self.writer, "\x1b[38;2;255;255;102m{}\x1b[0m", text)
            } else if let Some(ref mut t) = term::stdout() {
                let _ = t.fg(color);
                let _ = t.write_all(text.as_bytes());
                let _ = t.reset();
                Ok(())
            } else {
                write!(self.writer, "{}", text)
            }
        } else {
            write!(self.writer, "{}", text)
        }
    }

    /// Write a newline
    pub fn writeln(&mut self) -> io::Result<()> {
        writeln!(self.writer)
    }

    /// Write a plain line
    pub fn write_line(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.writer, "{}", text)
    }

    /// Write a section title with an underline rule
    pub fn write_title(&mut self, title: &str) -> io::Result<()> {
        self.write_colored(title, term::color::BRIGHT_CYAN)?;
        self.writeln()?;
        writeln!(self.writer, "{}", "─".repeat(display_width(title)))
    }

    /// Write an aligned `label: value` line
    pub fn write_label_value(&mut self, label: &str, value: &str, label_width: usize) -> io::Result<()> {
        write!(self.writer, "  {}", truncate_with_padding(label, label_width))?;
        writeln!(self.writer, "  {}", value)
    }

    /// Write a header row followed by a separator rule
    pub fn write_header_row(&mut self, cells: &[&str], widths: &[usize], aligns: &[Align]) -> io::Result<()> {
        let row = layout_row(cells, widths, aligns);
        self.write_colored(&row, term::color::BRIGHT_CYAN)?;
        self.writeln()?;
        let rule: Vec<String> = widths.iter().map(|w| "─".repeat(*w)).collect();
        writeln!(self.writer, "  {}", rule.join("  "))
    }

    /// Write one data row, optionally colored
    pub fn write_row(&mut self, cells: &[&str], widths: &[usize], aligns: &[Align], color: Option<Color>) -> io::Result<()> {
        let row = layout_row(cells, widths, aligns);
        match color {
            Some(c) => self.write_colored(&row, c)?,
            None => write!(self.writer, "{}", row)?,
        }
        self.writeln()
    }
}

/// Lay out one row with two-space gutters between columns
fn layout_row(cells: &[&str], widths: &[usize], aligns: &[Align]) -> String {
    let mut out = String::new();
    for (i, cell) in cells.iter().enumerate() {
        let width = widths.get(i).copied().unwrap_or(cell.len());
        let align = aligns.get(i).copied().unwrap_or(Align::Left);
        out.push_str("  ");
        match align {
            Align::Left => out.push_str(&truncate_with_padding(cell, width)),
            Align::Right => out.push_str(&pad_left(cell, width)),
        }
    }
    out
}

/// Display width of a string accounting for wide characters
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Truncate or pad a string to an exact display width
pub fn truncate_with_padding(s: &str, width: usize) -> String {
    let display_w = display_width(s);

    if display_w > width {
        // Truncate, reserving space for "..."
        let mut result = String::new();
        let mut current_width = 0;
        let target_width = if width >= 3 { width - 3 } else { width };

        for c in s.chars() {
            let c_width = UnicodeWidthChar::width(c).unwrap_or(1);
            if current_width + c_width > target_width {
                break;
            }
            result.push(c);
            current_width += c_width;
        }

        if width >= 3 {
            result.push_str("...");
            current_width += 3;
        }

        if current_width < width {
            result.push_str(&" ".repeat(width - current_width));
        }

        result
    } else {
        // Pad with spaces to reach the width
        format!("{}{}", s, " ".repeat(width - display_w))
    }
}

/// Left-pad a string to an exact display width (right alignment)
pub fn pad_left(s: &str, width: usize) -> String {
    let display_w = display_width(s);
    if display_w >= width {
        truncate_with_padding(s, width)
    } else {
        format!("{}{}", " ".repeat(width - display_w), s)
    }
}

/// Detected console width, clamped to something tables stay readable at
pub fn console_width() -> usize {
    let detected = terminal_size().map(|(Width(w), _)| w as usize).unwrap_or(100);
    detected.clamp(60, 140)
}

/// Width for one column: the widest of header and values, capped at `max`
pub fn column_width<'a>(header: &str, values: impl Iterator<Item = &'a str>, max: usize) -> usize {
    let widest = values.map(display_width).fold(display_width(header), usize::max);
    widest.min(max)
}

#[cfg(test)]
#[path = "console_test.rs"]
mod console_test;
