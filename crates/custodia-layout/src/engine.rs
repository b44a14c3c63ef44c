use crate::block::{LabeledLine, LayoutBlock};
use crate::geometry::{styles, Font, PageGeometry, TextStyle, CM};
use crate::text::wrap_text;

const HALF_CM: f64 = 0.5 * CM;
const RULE_RESERVE: f64 = 0.1 * CM;
const COLUMN_GUTTER: f64 = CM;
const TITLE_BODY_GAP: f64 = 0.2 * CM;
const CREST_WIDTH: f64 = 2.5 * CM;
const CREST_HEIGHT: f64 = 3.0 * CM;
const SIGNATURE_AREA: f64 = 3.0 * CM;
const SIGNATURE_HALF_RULE: f64 = 4.0 * CM;
const SIGNATURE_NAME_DROP: f64 = 0.7 * CM;

/// A drawing primitive on one page. Text y is the baseline; rules and
/// images use PDF coordinates (origin at the bottom-left corner).
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Text {
        x: f64,
        baseline: f64,
        font: Font,
        size: f64,
        text: String,
    },
    Rule {
        x1: f64,
        x2: f64,
        y: f64,
        dashed: bool,
    },
    Image {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub number: u32,
    pub ops: Vec<DrawOp>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PagedDocument {
    pub pages: Vec<Page>,
}

impl PagedDocument {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}

/// Layout state for one render: vertical position and page number. Reset
/// to the top margin on every page break. Owned by one engine; never
/// shared across documents.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageCursor {
    pub y: f64,
    pub page_number: u32,
}

/// Places an ordered sequence of blocks onto fixed-size pages, breaking
/// pages as needed and emitting a footer on every completed page.
pub struct LayoutEngine {
    geom: PageGeometry,
    cursor: PageCursor,
    ops: Vec<DrawOp>,
    pages: Vec<Page>,
    footer_stamp: String,
}

impl LayoutEngine {
    pub fn new(geom: PageGeometry, footer_stamp: impl Into<String>) -> Self {
        let cursor = PageCursor {
            y: geom.top_y(),
            page_number: 1,
        };
        Self {
            geom,
            cursor,
            ops: Vec::new(),
            pages: Vec::new(),
            footer_stamp: footer_stamp.into(),
        }
    }

    pub fn geometry(&self) -> &PageGeometry {
        &self.geom
    }

    pub fn cursor(&self) -> PageCursor {
        self.cursor
    }

    /// Ensures `required` points of vertical space remain above the bottom
    /// margin. If not, the current page is closed with its footer and the
    /// cursor resets to a fresh page's top margin; returns whether a break
    /// happened. A block taller than a whole page still gets exactly one
    /// fresh page and then overflows the bottom margin when drawn.
    pub fn reserve(&mut self, required: f64) -> bool {
        if self.cursor.y - required < self.geom.margin_bottom {
            self.break_page();
            return true;
        }
        false
    }

    pub fn place_all(&mut self, blocks: &[LayoutBlock]) {
        for block in blocks {
            self.place(block);
        }
    }

    pub fn place(&mut self, block: &LayoutBlock) {
        match block {
            LayoutBlock::Centered { text, style } => {
                self.place_centered(text, style);
            }
            LayoutBlock::Gap { height } => {
                self.cursor.y -= height;
            }
            LayoutBlock::Paragraph { text, style } => self.place_paragraph(text, style),
            LayoutBlock::Labeled { lines, style } => self.place_labeled(lines, style),
            LayoutBlock::TwoColumn {
                left_title,
                right_title,
                left,
                right,
                title_style,
                body_style,
            } => self.place_two_column(left_title, right_title, left, right, title_style, body_style),
            LayoutBlock::Rule { dashed } => self.place_rule(*dashed),
            LayoutBlock::Crest => self.place_crest(),
            LayoutBlock::Signature { name, style } => self.place_signature(name, style),
        }
    }

    /// Centres wrapped text on the content width and returns the height
    /// consumed.
    pub fn place_centered(&mut self, text: &str, style: &TextStyle) -> f64 {
        let width = self.geom.content_width();
        let lines = wrap_text(text, style, width);
        let height = lines.len() as f64 * style.leading;
        self.reserve(height);

        let widest = lines
            .iter()
            .map(|line| style.text_width(line))
            .fold(0.0, f64::max);
        let x = self.geom.margin_left + (width - widest) / 2.0;
        self.draw_lines(&lines, x, style);
        self.cursor.y -= height;
        height
    }

    fn place_paragraph(&mut self, text: &str, style: &TextStyle) {
        let width = self.geom.content_width();
        let lines = wrap_text(text, style, width);
        let height = lines.len() as f64 * style.leading;
        self.reserve(height + HALF_CM);

        let x = self.geom.margin_left + style.left_indent;
        self.draw_lines(&lines, x, style);
        self.cursor.y -= height + HALF_CM;
    }

    fn place_labeled(&mut self, entries: &[LabeledLine], style: &TextStyle) {
        let width = self.geom.content_width();
        let lines = wrap_labeled(entries, style, width);
        let height = lines.len() as f64 * style.leading;
        self.reserve(height + HALF_CM);

        let x = self.geom.margin_left + style.left_indent;
        self.draw_labeled_lines(&lines, x, self.cursor.y, style);
        self.cursor.y -= height + HALF_CM;
    }

    fn place_two_column(
        &mut self,
        left_title: &str,
        right_title: &str,
        left: &[LabeledLine],
        right: &[LabeledLine],
        title_style: &TextStyle,
        body_style: &TextStyle,
    ) {
        let column_width = (self.geom.content_width() - COLUMN_GUTTER) / 2.0;
        let left_x = self.geom.margin_left;
        let right_x = self.geom.margin_left + column_width + COLUMN_GUTTER;

        let left_title_lines = wrap_text(left_title, title_style, column_width);
        let right_title_lines = wrap_text(right_title, title_style, column_width);
        let title_height = left_title_lines
            .len()
            .max(right_title_lines.len()) as f64
            * title_style.leading;

        let left_body = wrap_labeled(left, body_style, column_width);
        let right_body = wrap_labeled(right, body_style, column_width);
        let body_height = left_body.len().max(right_body.len()) as f64 * body_style.leading;

        // The taller title and the taller body are reserved together so
        // both columns' content starts at the same vertical offset.
        let total = title_height + TITLE_BODY_GAP + body_height;
        self.reserve(total + HALF_CM);

        self.draw_lines_at(&left_title_lines, left_x, self.cursor.y, title_style);
        self.draw_lines_at(&right_title_lines, right_x, self.cursor.y, title_style);
        self.cursor.y -= title_height + TITLE_BODY_GAP;

        self.draw_labeled_lines(&left_body, left_x, self.cursor.y, body_style);
        self.draw_labeled_lines(&right_body, right_x, self.cursor.y, body_style);
        self.cursor.y -= body_height + HALF_CM;
    }

    fn place_rule(&mut self, dashed: bool) {
        self.reserve(RULE_RESERVE);
        self.ops.push(DrawOp::Rule {
            x1: self.geom.margin_left,
            x2: self.geom.right_x(),
            y: self.cursor.y,
            dashed,
        });
        self.cursor.y -= HALF_CM;
    }

    fn place_crest(&mut self) {
        self.reserve(CREST_HEIGHT + HALF_CM);
        self.ops.push(DrawOp::Image {
            x: (self.geom.width - CREST_WIDTH) / 2.0,
            y: self.cursor.y - CREST_HEIGHT,
            width: CREST_WIDTH,
            height: CREST_HEIGHT,
        });
        self.cursor.y -= CREST_HEIGHT + HALF_CM;
    }

    fn place_signature(&mut self, name: &str, style: &TextStyle) {
        self.reserve(SIGNATURE_AREA);

        let line_y = self.geom.margin_bottom + SIGNATURE_AREA;
        let centre = self.geom.width / 2.0;
        self.ops.push(DrawOp::Rule {
            x1: centre - SIGNATURE_HALF_RULE,
            x2: centre + SIGNATURE_HALF_RULE,
            y: line_y,
            dashed: false,
        });

        let baseline = line_y - SIGNATURE_NAME_DROP - style.size;
        self.ops.push(DrawOp::Text {
            x: centre - style.text_width(name) / 2.0,
            baseline,
            font: style.font,
            size: style.size,
            text: name.to_string(),
        });
        self.cursor.y = baseline - style.leading;
    }

    /// Closes the last page (with its footer, which no later placement
    /// would otherwise trigger) and returns the finished document.
    pub fn finish(mut self) -> PagedDocument {
        self.emit_footer();
        let number = self.cursor.page_number;
        let ops = std::mem::take(&mut self.ops);
        self.pages.push(Page { number, ops });
        PagedDocument { pages: self.pages }
    }

    fn break_page(&mut self) {
        self.emit_footer();
        let number = self.cursor.page_number;
        let ops = std::mem::take(&mut self.ops);
        self.pages.push(Page { number, ops });
        self.cursor.page_number += 1;
        self.cursor.y = self.geom.top_y();
    }

    fn emit_footer(&mut self) {
        let style = styles::FOOTER;
        self.ops.push(DrawOp::Text {
            x: self.geom.margin_left,
            baseline: self.geom.footer_y,
            font: style.font,
            size: style.size,
            text: self.footer_stamp.clone(),
        });

        let page_text = format!("Página {}", self.cursor.page_number);
        self.ops.push(DrawOp::Text {
            x: self.geom.right_x() - style.text_width(&page_text),
            baseline: self.geom.footer_y,
            font: style.font,
            size: style.size,
            text: page_text,
        });
    }

    fn draw_lines(&mut self, lines: &[String], x: f64, style: &TextStyle) {
        self.draw_lines_at(lines, x, self.cursor.y, style);
    }

    fn draw_lines_at(&mut self, lines: &[String], x: f64, top: f64, style: &TextStyle) {
        let mut baseline = top - style.size;
        for line in lines {
            self.ops.push(DrawOp::Text {
                x,
                baseline,
                font: style.font,
                size: style.size,
                text: line.clone(),
            });
            baseline -= style.leading;
        }
    }

    fn draw_labeled_lines(
        &mut self,
        lines: &[(String, usize)],
        x: f64,
        top: f64,
        style: &TextStyle,
    ) {
        let mut baseline = top - style.size;
        for (line, bold_chars) in lines {
            if *bold_chars == 0 {
                self.ops.push(DrawOp::Text {
                    x,
                    baseline,
                    font: style.font,
                    size: style.size,
                    text: line.clone(),
                });
            } else {
                let split = line
                    .char_indices()
                    .nth(*bold_chars)
                    .map(|(i, _)| i)
                    .unwrap_or(line.len());
                let (label, rest) = line.split_at(split);
                self.ops.push(DrawOp::Text {
                    x,
                    baseline,
                    font: Font::Bold,
                    size: style.size,
                    text: label.to_string(),
                });
                if !rest.is_empty() {
                    self.ops.push(DrawOp::Text {
                        x: x + *bold_chars as f64 * style.char_width(),
                        baseline,
                        font: style.font,
                        size: style.size,
                        text: rest.to_string(),
                    });
                }
            }
            baseline -= style.leading;
        }
    }
}

/// Wraps each labelled entry as "<label> <value>" and records how many of
/// the first line's characters belong to the bold label. Courier keeps the
/// bold run the same width as regular text, so the split is exact.
fn wrap_labeled(
    entries: &[LabeledLine],
    style: &TextStyle,
    width: f64,
) -> Vec<(String, usize)> {
    let mut out = Vec::new();
    for entry in entries {
        let full = if entry.value.is_empty() {
            entry.label.clone()
        } else {
            format!("{} {}", entry.label, entry.value)
        };
        let wrapped = wrap_text(&full, style, width);
        let label_chars = entry.label.chars().count();
        for (i, line) in wrapped.into_iter().enumerate() {
            let bold = if i == 0 {
                label_chars.min(line.chars().count())
            } else {
                0
            };
            out.push((line, bold));
        }
    }
    out
}
