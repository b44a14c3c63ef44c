pub mod block;
pub mod engine;
pub mod geometry;
pub mod pdf;
pub mod text;

pub use block::{LabeledLine, LayoutBlock};
pub use engine::{DrawOp, LayoutEngine, Page, PageCursor, PagedDocument};
pub use geometry::{styles, Font, PageGeometry, TextStyle, CM};
pub use pdf::{write_pdf, CrestImage, PdfError};
