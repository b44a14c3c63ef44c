/// One centimetre in PostScript points.
pub const CM: f64 = 28.346456692913385;

pub const A4_WIDTH: f64 = 595.2755905511812;
pub const A4_HEIGHT: f64 = 841.8897637795277;

/// Courier advance width as a fraction of the font size. Both Courier and
/// Courier-Bold advance every glyph by the same amount, which keeps every
/// measurement in this crate exact.
pub const CHAR_WIDTH_RATIO: f64 = 0.6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Font {
    Regular,
    Bold,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub font: Font,
    pub size: f64,
    pub leading: f64,
    pub left_indent: f64,
}

impl TextStyle {
    pub fn char_width(&self) -> f64 {
        CHAR_WIDTH_RATIO * self.size
    }

    pub fn text_width(&self, text: &str) -> f64 {
        text.chars().count() as f64 * self.char_width()
    }
}

/// The fixed certificate styles.
pub mod styles {
    use super::{Font, TextStyle};

    pub const HEADER: TextStyle = TextStyle {
        font: Font::Regular,
        size: 12.0,
        leading: 14.0,
        left_indent: 0.0,
    };

    pub const TITLE: TextStyle = TextStyle {
        font: Font::Bold,
        size: 14.0,
        leading: 16.0,
        left_indent: 0.0,
    };

    pub const DECLARATION: TextStyle = TextStyle {
        font: Font::Regular,
        size: 12.0,
        leading: 14.0,
        left_indent: 0.0,
    };

    pub const INFO: TextStyle = TextStyle {
        font: Font::Regular,
        size: 10.0,
        leading: 14.0,
        left_indent: 0.0,
    };

    pub const FILE_INFO: TextStyle = TextStyle {
        font: Font::Regular,
        size: 10.0,
        leading: 14.0,
        left_indent: 12.0,
    };

    pub const SECTION_TITLE: TextStyle = TextStyle {
        font: Font::Bold,
        size: 10.0,
        leading: 14.0,
        left_indent: 0.0,
    };

    pub const SIGNATURE: TextStyle = TextStyle {
        font: Font::Regular,
        size: 11.0,
        leading: 13.0,
        left_indent: 0.0,
    };

    pub const FOOTER: TextStyle = TextStyle {
        font: Font::Regular,
        size: 8.0,
        leading: 9.0,
        left_indent: 0.0,
    };
}

/// Fixed page geometry. All vertical positions in this crate are measured
/// from the bottom edge, PDF style.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub width: f64,
    pub height: f64,
    pub margin_left: f64,
    pub margin_right: f64,
    pub margin_top: f64,
    pub margin_bottom: f64,
    pub footer_y: f64,
}

impl PageGeometry {
    pub fn a4() -> Self {
        Self {
            width: A4_WIDTH,
            height: A4_HEIGHT,
            margin_left: 2.0 * CM,
            margin_right: 1.5 * CM,
            margin_top: 1.5 * CM,
            margin_bottom: 1.5 * CM,
            footer_y: CM,
        }
    }

    /// The y coordinate content starts at on a fresh page.
    pub fn top_y(&self) -> f64 {
        self.height - self.margin_top
    }

    /// The x coordinate of the right content edge.
    pub fn right_x(&self) -> f64 {
        self.width - self.margin_right
    }

    pub fn content_width(&self) -> f64 {
        self.width - self.margin_left - self.margin_right
    }

    pub fn usable_height(&self) -> f64 {
        self.height - self.margin_top - self.margin_bottom
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self::a4()
    }
}
