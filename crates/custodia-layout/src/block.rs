use crate::geometry::TextStyle;

/// One line of a labelled field list: the label is set in bold, the value
/// in the list's regular face. Wrapped continuation lines are regular.
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledLine {
    pub label: String,
    pub value: String,
}

impl LabeledLine {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// An atomic, height-measurable unit of document content. Blocks are
/// produced by the composer, measured and placed by the layout engine,
/// and never persisted.
#[derive(Debug, Clone, PartialEq)]
pub enum LayoutBlock {
    /// Text centred on the content width; the horizontal offset comes from
    /// the widest wrapped line.
    Centered { text: String, style: TextStyle },
    /// Vertical whitespace. Advances the cursor without reserving; the
    /// next placement absorbs any resulting page break.
    Gap { height: f64 },
    /// A flowing paragraph at full content width plus a 0.5 cm trailing
    /// margin.
    Paragraph { text: String, style: TextStyle },
    /// A labelled field list (one field per line) plus a 0.5 cm trailing
    /// margin.
    Labeled {
        lines: Vec<LabeledLine>,
        style: TextStyle,
    },
    /// Two labelled columns under two titles, separated by a 1 cm gutter.
    /// Reservation uses the taller title and the taller body so both
    /// columns' content starts at the same vertical offset.
    TwoColumn {
        left_title: String,
        right_title: String,
        left: Vec<LabeledLine>,
        right: Vec<LabeledLine>,
        title_style: TextStyle,
        body_style: TextStyle,
    },
    /// A horizontal rule across the content width.
    Rule { dashed: bool },
    /// The 2.5 x 3 cm centred crest slot at the top of the document.
    Crest,
    /// The signature area near the bottom margin: an 8 cm centred rule
    /// with the signer's name beneath it. Never split across pages.
    Signature { name: String, style: TextStyle },
}
