// Pure layout model for the rendered statements: pages of positioned text
// and rule elements, built with top-down coordinates (y grows downward,
// which is how the statement arithmetic reads) and converted to PDF
// coordinates by the renderer. Nothing in here touches a backend.

pub const PAGE_WIDTH: f64 = 595.28; // A4 portrait, points
pub const PAGE_HEIGHT: f64 = 841.89;
pub const MARGIN: f64 = 40.0;

pub const BODY_SIZE: f64 = 9.0;
pub const HEADING_SIZE: f64 = 11.0;
pub const TITLE_SIZE: f64 = 14.0;
pub const LINE_HEIGHT: f64 = 14.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
    Center,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    /// Left edge of the rendered run, after alignment resolution.
    pub x: f64,
    /// Baseline, measured from the top of the page.
    pub y: f64,
    pub size: f64,
    pub bold: bool,
    pub content: String,
}

/// Horizontal or vertical rule between two points, top-down coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rule {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

#[derive(Debug, Clone, Default)]
pub struct Page {
    pub texts: Vec<Text>,
    pub rules: Vec<Rule>,
}

impl Page {
    pub fn text(&mut self, content: impl Into<String>, x: f64, y: f64, size: f64, align: Align) {
        self.place(content, x, y, size, false, align);
    }

    pub fn bold(&mut self, content: impl Into<String>, x: f64, y: f64, size: f64, align: Align) {
        self.place(content, x, y, size, true, align);
    }

    fn place(
        &mut self,
        content: impl Into<String>,
        x: f64,
        y: f64,
        size: f64,
        bold: bool,
        align: Align,
    ) {
        let content = content.into();
        let width = text_width(&content, size);
        let x = match align {
            Align::Left => x,
            Align::Right => x - width,
            Align::Center => x - width / 2.0,
        };
        self.texts.push(Text {
            x,
            y,
            size,
            bold,
            content,
        });
    }

    pub fn hline(&mut self, x1: f64, x2: f64, y: f64) {
        self.rules.push(Rule {
            x1,
            y1: y,
            x2,
            y2: y,
        });
    }
}

/// Advancing vertical position within a column. Two independent cursors run
/// the two sides of a statement; their owner reconciles them for the totals
/// row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cursor {
    y: f64,
}

impl Cursor {
    pub fn at(y: f64) -> Cursor {
        Cursor { y }
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    /// Returns the current baseline, then moves down one step.
    pub fn advance(&mut self, step: f64) -> f64 {
        let line = self.y;
        self.y += step;
        line
    }

    pub fn skip(&mut self, gap: f64) {
        self.y += gap;
    }

    pub fn max(&self, other: &Cursor) -> Cursor {
        Cursor {
            y: self.y.max(other.y),
        }
    }
}

/// Approximate advance width of a Helvetica run. A flat per-glyph factor is
/// enough here: it is only used to right-align amount columns and center
/// headings, and every amount digit really is the same width.
pub fn text_width(text: &str, size: f64) -> f64 {
    let units: f64 = text
        .chars()
        .map(|c| match c {
            'i' | 'l' | 'j' | 'I' | '.' | ',' | ':' | ' ' | '\'' => 0.28,
            'm' | 'M' | 'W' | 'w' | '@' => 0.85,
            c if c.is_ascii_digit() => 0.556,
            c if c.is_ascii_uppercase() => 0.68,
            _ => 0.52,
        })
        .sum();
    units * size
}

/// Post-pass: once the page count is final, stamp `Page X of N` centered in
/// the bottom margin of every page.
pub fn stamp_page_numbers(pages: &mut [Page]) {
    let total = pages.len();
    for (index, page) in pages.iter_mut().enumerate() {
        page.text(
            format!("Page {} of {}", index + 1, total),
            PAGE_WIDTH / 2.0,
            PAGE_HEIGHT - MARGIN / 2.0,
            8.0,
            Align::Center,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_advances_top_down() {
        let mut cursor = Cursor::at(100.0);
        assert_eq!(cursor.advance(14.0), 100.0);
        assert_eq!(cursor.advance(14.0), 114.0);
        assert_eq!(cursor.y(), 128.0);
    }

    #[test]
    fn cursor_max_takes_the_lower_line() {
        let left = Cursor::at(300.0);
        let right = Cursor::at(420.0);
        assert_eq!(left.max(&right).y(), 420.0);
    }

    #[test]
    fn right_alignment_ends_at_the_anchor() {
        let mut page = Page::default();
        page.text("1,23,456.00", 500.0, 100.0, 9.0, Align::Right);
        let placed = &page.texts[0];
        let width = text_width("1,23,456.00", 9.0);
        assert!((placed.x + width - 500.0).abs() < 1e-9);
    }

    #[test]
    fn page_numbers_are_stamped_after_the_count_is_known() {
        let mut pages = vec![Page::default(), Page::default(), Page::default()];
        stamp_page_numbers(&mut pages);
        for (i, page) in pages.iter().enumerate() {
            let stamp = page.texts.last().unwrap();
            assert_eq!(stamp.content, format!("Page {} of 3", i + 1));
        }
    }
}
