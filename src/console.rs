/// Console formatting - pure rendering concerns
///
/// This module handles all terminal output for the dashboard:
/// - Card boxes and section headings
/// - Color output via `term` with a plain-text fallback
/// - Width-aware truncation and padding for wide Unicode text
///
/// `TerminalView` is the console implementation of the `DashboardView`
/// seam; it accepts pre-formatted card data from the renderer and draws it.

use crate::model::Category;
use crate::view::{CardBody, DashboardView, PriceDisplay, Slot};
use std::io::{self, Write};
use std::sync::OnceLock;
use term::color::Color;
use terminal_size::{Width, terminal_size};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

// Console width - initialized once, overridable for tests
static WIDTH: OnceLock<usize> = OnceLock::new();

/// Override the detected console width (for testing)
pub fn set_console_width(width: usize) {
    let _ = WIDTH.set(width);
}

/// Get console width, detecting the terminal or defaulting to 100
pub fn console_width() -> usize {
    *WIDTH.get_or_init(|| {
        if let Some((Width(w), _)) = terminal_size() {
            w as usize
        } else {
            100
        }
    })
}

/// Card boxes are capped so they stay readable on very wide terminals
fn card_width() -> usize {
    console_width().clamp(40, 72)
}

/// Count the display width of a string, accounting for wide Unicode characters
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Truncate and pad string to exact display width
pub fn truncate_with_padding(s: &str, width: usize) -> String {
    let display_w = display_width(s);

    if display_w > width {
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
        format!("{}{}", s, " ".repeat(width - display_w))
    }
}

/// Accent color for a category's heading and badges
fn category_color(category: Category) -> Color {
    match category {
        Category::New => term::color::BRIGHT_GREEN,
        Category::Increase => term::color::BRIGHT_RED,
        Category::Decrease => term::color::BRIGHT_CYAN,
        Category::Stockout => term::color::BRIGHT_YELLOW,
    }
}

/// Writer for dashboard output - configurable for color/plain text
pub struct ConsoleWriter<W: Write> {
    writer: W,
    use_colors: bool,
}

impl<W: Write> ConsoleWriter<W> {
    pub fn new(writer: W, use_colors: bool) -> Self {
        Self { writer, use_colors }
    }

    fn write_colored(&mut self, text: &str, color: Color) -> io::Result<()> {
        if self.use_colors {
            if let Some(ref mut t) = term::stdout() {
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

    /// Write one "Label: value" header line
    pub fn write_header_line(&mut self, label: &str, value: &str) -> io::Result<()> {
        writeln!(self.writer, "{}: {}", label, value)
    }

    /// Write a section heading with its count bubble
    pub fn write_section_header(&mut self, category: Category, count: usize) -> io::Result<()> {
        let heading = format!("{} [{}]", category.label(), count);
        let rule_width = card_width().saturating_sub(display_width(&heading) + 4);

        writeln!(self.writer)?;
        write!(self.writer, "── ")?;
        self.write_colored(&heading, category_color(category))?;
        writeln!(self.writer, " {}", "─".repeat(rule_width.max(2)))
    }

    /// Write a muted placeholder line inside a section
    pub fn write_placeholder(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.writer, "  {}", text)
    }

    /// Write one product card as a box
    pub fn write_card(&mut self, category: Category, body: &CardBody) -> io::Result<()> {
        let w = card_width();
        let inner = w - 4;

        writeln!(self.writer, "┌{:─<width$}┐", "", width = w - 2)?;

        // Header row: brand tag left, page right
        let page = format!("Page {}", body.page);
        let brand_width = inner.saturating_sub(display_width(&page) + 1);
        write!(self.writer, "│ ")?;
        self.write_colored(&truncate_with_padding(&body.brand, brand_width), category_color(category))?;
        writeln!(self.writer, " {} │", page)?;

        writeln!(self.writer, "│ {} │", truncate_with_padding(&body.product_name, inner))?;

        match &body.price {
            PriceDisplay::Single { label, value } => {
                let value_width = inner.saturating_sub(display_width(label) + 1);
                write!(self.writer, "│ {} ", label)?;
                let padded = format!("{:>width$}", value, width = value_width);
                self.write_colored(&padded, term::color::BRIGHT_WHITE)?;
                writeln!(self.writer, " │")?;
            }
            PriceDisplay::Change { old, new, badge } => {
                let transition = format!("{} ➜ {}", old, new);
                let badge_width = inner.saturating_sub(display_width(&transition) + 1);
                write!(self.writer, "│ {} ", transition)?;
                let padded = format!("{:>width$}", badge, width = badge_width);
                self.write_colored(&padded, category_color(category))?;
                writeln!(self.writer, " │")?;
            }
        }

        writeln!(self.writer, "└{:─<width$}┘", "", width = w - 2)
    }
}

/// Console implementation of the presentation seam.
///
/// Header slots print as lines in render order; bubble counts are buffered
/// and drawn in the section headings instead of as standalone lines.
pub struct TerminalView<W: Write> {
    console: ConsoleWriter<W>,
    bubble_new: Option<String>,
    bubble_stockout: Option<String>,
    filter_info_visible: bool,
}

impl TerminalView<io::Stdout> {
    pub fn stdout(use_colors: bool) -> Self {
        TerminalView::new(io::stdout(), use_colors)
    }
}

impl<W: Write> TerminalView<W> {
    pub fn new(writer: W, use_colors: bool) -> Self {
        Self {
            console: ConsoleWriter::new(writer, use_colors),
            bubble_new: None,
            bubble_stockout: None,
            filter_info_visible: false,
        }
    }

    fn slot_label(slot: Slot) -> Option<&'static str> {
        match slot {
            Slot::LastChecked => Some("Last Checked"),
            Slot::OldDocName => Some("Old List"),
            Slot::NewDocName => Some("New List"),
            Slot::CountNew => Some("Newly added"),
            Slot::CountIncrease => Some("Price increased"),
            Slot::CountDecrease => Some("Price decreased"),
            Slot::CountStockout => Some("Out of stock"),
            _ => None,
        }
    }
}

impl<W: Write> DashboardView for TerminalView<W> {
    fn set_text(&mut self, slot: Slot, text: &str) {
        match slot {
            Slot::BubbleNew => self.bubble_new = Some(text.to_string()),
            Slot::BubbleStockout => self.bubble_stockout = Some(text.to_string()),
            Slot::FilterInfo => {
                // The renderer only writes this slot while a filter is active
                if self.filter_info_visible {
                    let _ = self.console.write_header_line("Filter", text);
                }
            }
            _ => {
                if let Some(label) = Self::slot_label(slot) {
                    let _ = self.console.write_header_line(label, text);
                }
            }
        }
    }

    fn set_visible(&mut self, slot: Slot, visible: bool) {
        if slot == Slot::FilterInfo {
            self.filter_info_visible = visible;
        }
    }

    fn begin_grid(&mut self, category: Category, total: usize) {
        // Bubbles from metadata take precedence in the heading when present
        let bubble = match category {
            Category::New => self.bubble_new.clone(),
            Category::Stockout => self.bubble_stockout.clone(),
            _ => None,
        };
        let count = bubble.and_then(|b| b.parse::<usize>().ok()).unwrap_or(total);
        let _ = self.console.write_section_header(category, count);
    }

    fn push_card(&mut self, category: Category, body: &CardBody) {
        let _ = self.console.write_card(category, body);
    }

    fn grid_placeholder(&mut self, category: Category, text: &str) {
        let _ = self.console.write_section_header(category, 0);
        let _ = self.console.write_placeholder(text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_with_padding_pads_short_strings() {
        let result = truncate_with_padding("abc", 10);
        assert_eq!(result, "abc       ");
        assert_eq!(display_width(&result), 10);
    }

    #[test]
    fn test_truncate_with_padding_truncates_long_strings() {
        let result = truncate_with_padding("a very long product name", 10);
        assert_eq!(display_width(&result), 10);
        assert!(result.ends_with("..."));
    }

    #[test]
    fn test_truncate_handles_wide_characters() {
        // CJK characters are two columns wide
        let result = truncate_with_padding("商品名", 10);
        assert_eq!(display_width(&result), 10);
    }

    #[test]
    fn test_card_renders_to_plain_buffer() {
        let mut buf = Vec::new();
        {
            let mut console = ConsoleWriter::new(&mut buf, false);
            console
                .write_card(
                    Category::New,
                    &CardBody {
                        brand: "Acme".to_string(),
                        product_name: "Green Soap".to_string(),
                        page: "3".to_string(),
                        price: PriceDisplay::Single { label: "Wholesale Price", value: "1,250".to_string() },
                    },
                )
                .unwrap();
        }
        let out = String::from_utf8(buf).unwrap();
        assert!(out.contains("Acme"));
        assert!(out.contains("Green Soap"));
        assert!(out.contains("Page 3"));
        assert!(out.contains("1,250"));
    }
}
