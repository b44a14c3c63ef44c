use core::fmt;
use std::path::Path;

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream, StringFormat};

use crate::engine::{DrawOp, PagedDocument};
use crate::geometry::{Font, PageGeometry};

const FONT_REGULAR: &str = "F1";
const FONT_BOLD: &str = "F2";
const CREST_NAME: &str = "Im1";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PdfError {
    Encode,
    Write,
}

impl fmt::Display for PdfError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Encode => f.write_str("could not encode certificate page content"),
            Self::Write => f.write_str("could not write certificate file"),
        }
    }
}

impl std::error::Error for PdfError {}

/// An optional coat-of-arms image for the certificate header. Only JPEG
/// data is accepted; it embeds directly as a DCT-encoded XObject without
/// re-encoding.
#[derive(Debug, Clone)]
pub struct CrestImage {
    jpeg: Vec<u8>,
    width_px: u32,
    height_px: u32,
    grayscale: bool,
}

impl CrestImage {
    /// Probes the JPEG frame header for dimensions. Returns `None` for
    /// anything that is not a baseline/progressive JPEG; the caller treats
    /// that as "no crest", never as an error.
    pub fn from_jpeg(jpeg: Vec<u8>) -> Option<Self> {
        let (width_px, height_px, components) = jpeg_frame_info(&jpeg)?;
        Some(Self {
            jpeg,
            width_px,
            height_px,
            grayscale: components == 1,
        })
    }
}

/// Serialises laid-out pages into a PDF using the built-in Courier faces.
pub fn write_pdf(
    doc: &PagedDocument,
    geom: &PageGeometry,
    crest: Option<&CrestImage>,
    path: &Path,
) -> Result<(), PdfError> {
    let mut pdf = Document::with_version("1.5");
    let pages_id = pdf.new_object_id();

    let regular_id = pdf.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
        "Encoding" => "WinAnsiEncoding",
    });
    let bold_id = pdf.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier-Bold",
        "Encoding" => "WinAnsiEncoding",
    });

    let mut resources = dictionary! {
        "Font" => dictionary! {
            FONT_REGULAR => regular_id,
            FONT_BOLD => bold_id,
        },
    };
    if let Some(image) = crest {
        let color_space = if image.grayscale {
            "DeviceGray"
        } else {
            "DeviceRGB"
        };
        let image_id = pdf.add_object(Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => image.width_px as i64,
                "Height" => image.height_px as i64,
                "ColorSpace" => color_space,
                "BitsPerComponent" => 8,
                "Filter" => "DCTDecode",
            },
            image.jpeg.clone(),
        ));
        resources.set("XObject", dictionary! { CREST_NAME => image_id });
    }
    let resources_id = pdf.add_object(resources);

    let mut kids = Vec::with_capacity(doc.pages.len());
    for page in &doc.pages {
        let content = Content {
            operations: page_operations(&page.ops, crest.is_some()),
        };
        let encoded = content.encode().map_err(|_| PdfError::Encode)?;
        let content_id = pdf.add_object(Stream::new(dictionary! {}, encoded));
        let page_id = pdf.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(Object::Reference(page_id));
    }

    let count = kids.len() as i64;
    pdf.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "Resources" => resources_id,
            "MediaBox" => vec![
                0.into(),
                0.into(),
                real(geom.width),
                real(geom.height),
            ],
        }),
    );

    let catalog_id = pdf.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    pdf.trailer.set("Root", catalog_id);
    pdf.compress();
    pdf.save(path).map_err(|_| PdfError::Write)?;
    Ok(())
}

fn page_operations(ops: &[DrawOp], has_crest: bool) -> Vec<Operation> {
    let mut out = Vec::new();
    for op in ops {
        match op {
            DrawOp::Text {
                x,
                baseline,
                font,
                size,
                text,
            } => {
                let name = match font {
                    Font::Regular => FONT_REGULAR,
                    Font::Bold => FONT_BOLD,
                };
                out.push(Operation::new("BT", vec![]));
                out.push(Operation::new(
                    "Tf",
                    vec![Object::Name(name.into()), real(*size)],
                ));
                out.push(Operation::new("Td", vec![real(*x), real(*baseline)]));
                out.push(Operation::new(
                    "Tj",
                    vec![Object::String(
                        encode_win_ansi(text),
                        StringFormat::Literal,
                    )],
                ));
                out.push(Operation::new("ET", vec![]));
            }
            DrawOp::Rule { x1, x2, y, dashed } => {
                if *dashed {
                    out.push(Operation::new(
                        "d",
                        vec![vec![2.into(), 2.into()].into(), 0.into()],
                    ));
                }
                out.push(Operation::new("m", vec![real(*x1), real(*y)]));
                out.push(Operation::new("l", vec![real(*x2), real(*y)]));
                out.push(Operation::new("S", vec![]));
                if *dashed {
                    out.push(Operation::new("d", vec![Vec::<Object>::new().into(), 0.into()]));
                }
            }
            DrawOp::Image {
                x,
                y,
                width,
                height,
            } => {
                // The engine reserves the slot even when no image was
                // supplied; the op is simply dropped in that case.
                if !has_crest {
                    continue;
                }
                out.push(Operation::new("q", vec![]));
                out.push(Operation::new(
                    "cm",
                    vec![
                        real(*width),
                        0.into(),
                        0.into(),
                        real(*height),
                        real(*x),
                        real(*y),
                    ],
                ));
                out.push(Operation::new(
                    "Do",
                    vec![Object::Name(CREST_NAME.into())],
                ));
                out.push(Operation::new("Q", vec![]));
            }
        }
    }
    out
}

fn real(v: f64) -> Object {
    Object::Real(v as f32)
}

/// Maps text to WinAnsi bytes. Latin-1 covers the Portuguese alphabet;
/// a few typographic characters live in the 0x80 window; anything else
/// degrades to '?'.
fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            '\u{20ac}' => 0x80,
            '\u{2018}' => 0x91,
            '\u{2019}' => 0x92,
            '\u{201c}' => 0x93,
            '\u{201d}' => 0x94,
            '\u{2013}' => 0x96,
            '\u{2014}' => 0x97,
            '\u{2026}' => 0x85,
            c if (c as u32) < 0x80 => c as u8,
            c if (0xa0..=0xff).contains(&(c as u32)) => c as u8,
            _ => b'?',
        })
        .collect()
}

/// Walks JPEG markers to the first frame header and reads
/// (width, height, component count).
fn jpeg_frame_info(bytes: &[u8]) -> Option<(u32, u32, u8)> {
    if bytes.len() < 4 || bytes[0] != 0xFF || bytes[1] != 0xD8 {
        return None;
    }

    let mut i = 2;
    while i + 3 < bytes.len() {
        if bytes[i] != 0xFF {
            return None;
        }
        let marker = bytes[i + 1];
        match marker {
            // Standalone markers carry no segment length.
            0x01 | 0xD0..=0xD8 => {
                i += 2;
            }
            // Frame headers; every SOF variant carries dimensions at the
            // same offsets.
            0xC0..=0xC3 | 0xC5..=0xC7 | 0xC9..=0xCB | 0xCD..=0xCF => {
                if i + 9 >= bytes.len() {
                    return None;
                }
                let height = u32::from(bytes[i + 5]) << 8 | u32::from(bytes[i + 6]);
                let width = u32::from(bytes[i + 7]) << 8 | u32::from(bytes[i + 8]);
                let components = bytes[i + 9];
                if width == 0 || height == 0 {
                    return None;
                }
                return Some((width, height, components));
            }
            0xD9 => return None,
            _ => {
                let len = usize::from(bytes[i + 2]) << 8 | usize::from(bytes[i + 3]);
                if len < 2 {
                    return None;
                }
                i += 2 + len;
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{LayoutEngine, Page};
    use crate::geometry::styles;
    use crate::LayoutBlock;
    use std::path::PathBuf;

    struct TestDir {
        path: PathBuf,
    }

    impl TestDir {
        fn new(label: &str) -> Self {
            let mut path = std::env::temp_dir();
            path.push(format!(
                "custodia_layout_test_{}_{}",
                std::process::id(),
                label
            ));
            let _ = std::fs::remove_dir_all(&path);
            std::fs::create_dir_all(&path).expect("create temp dir");
            Self { path }
        }
    }

    impl Drop for TestDir {
        fn drop(&mut self) {
            let _ = std::fs::remove_dir_all(&self.path);
        }
    }

    fn sample_document() -> PagedDocument {
        let mut eng = LayoutEngine::new(PageGeometry::a4(), "Gerado em teste");
        eng.place(&LayoutBlock::Centered {
            text: "CERTIDÃO DE AQUISIÇÃO".to_string(),
            style: styles::TITLE,
        });
        eng.place(&LayoutBlock::Rule { dashed: true });
        eng.finish()
    }

    #[test]
    fn writes_a_loadable_pdf() {
        let dir = TestDir::new("loadable");
        let out = dir.path.join("cert.pdf");

        write_pdf(&sample_document(), &PageGeometry::a4(), None, &out).expect("write pdf");

        let bytes = std::fs::read(&out).expect("read pdf");
        assert!(bytes.starts_with(b"%PDF-1.5"));

        let loaded = Document::load(&out).expect("reload pdf");
        assert_eq!(loaded.get_pages().len(), 1);
    }

    #[test]
    fn page_count_round_trips() {
        let dir = TestDir::new("pages");
        let out = dir.path.join("multi.pdf");

        let doc = PagedDocument {
            pages: vec![
                Page {
                    number: 1,
                    ops: vec![],
                },
                Page {
                    number: 2,
                    ops: vec![],
                },
                Page {
                    number: 3,
                    ops: vec![],
                },
            ],
        };
        write_pdf(&doc, &PageGeometry::a4(), None, &out).expect("write pdf");
        let loaded = Document::load(&out).expect("reload pdf");
        assert_eq!(loaded.get_pages().len(), 3);
    }

    #[test]
    fn win_ansi_keeps_portuguese_and_degrades_the_rest() {
        let encoded = encode_win_ansi("Certidão — aquisição 日本");
        assert_eq!(encoded[6], 0xe3); // ã
        assert!(encoded.contains(&0x97)); // em dash
        assert_eq!(encoded[encoded.len() - 2..], [b'?', b'?']);
    }

    #[test]
    fn crest_probe_reads_jpeg_dimensions() {
        // Minimal JPEG skeleton: SOI, APP0 stub, SOF0 (2x3, 3 components).
        let mut jpeg = vec![0xFF, 0xD8];
        jpeg.extend_from_slice(&[0xFF, 0xE0, 0x00, 0x04, 0x00, 0x00]);
        jpeg.extend_from_slice(&[
            0xFF, 0xC0, 0x00, 0x11, 0x08, 0x00, 0x03, 0x00, 0x02, 0x03, 0x01, 0x11, 0x00, 0x02,
            0x11, 0x00, 0x03, 0x11, 0x00,
        ]);

        let crest = CrestImage::from_jpeg(jpeg).expect("probe jpeg");
        assert_eq!(crest.width_px, 2);
        assert_eq!(crest.height_px, 3);
        assert!(!crest.grayscale);
    }

    #[test]
    fn crest_probe_rejects_non_jpeg() {
        assert!(CrestImage::from_jpeg(b"\x89PNG\r\n".to_vec()).is_none());
        assert!(CrestImage::from_jpeg(Vec::new()).is_none());
    }
}
