//! Minimal page-drawing layer over `lopdf`.
//!
//! Coordinates are millimeters from the top-left corner, with a text cursor
//! that advances cell by cell the way FPDF-style writers do. It knows only
//! the three Helvetica faces and RGB images, which is all the reports need.

pub mod font;
pub mod raster;

use crate::error::CreaError;
use font::{encode_win_ansi, text_width_pt, FontStyle};
use raster::RasterImage;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream, StringFormat};

pub const A4_WIDTH_MM: f32 = 210.0;
pub const A4_HEIGHT_MM: f32 = 297.0;

const PT_PER_MM: f32 = 72.0 / 25.4;
const MARGIN_MM: f32 = 10.0;
const BREAK_MARGIN_MM: f32 = 20.0;
const CELL_PADDING_MM: f32 = 1.0;
const LINE_WIDTH_MM: f32 = 0.2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
}

/// Where the cursor goes after a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// To the right of the cell, same line.
    Right,
    /// To the left margin of the next line.
    NextLine,
}

/// Draws the repeated parts of every page.
pub trait PageDecorator {
    fn header(&self, _canvas: &mut PdfCanvas) {}
    fn footer(&self, _canvas: &mut PdfCanvas) {}
}

/// Footer with a centered `Página N`.
pub struct PageNumberFooter;

impl PageDecorator for PageNumberFooter {
    fn footer(&self, canvas: &mut PdfCanvas) {
        canvas.set_y(-15.0);
        canvas.set_font(FontStyle::Italic, 8.0);
        let label = format!("Página {}", canvas.page_no());
        canvas.cell(0.0, 10.0, &label, false, Advance::Right, Align::Center);
    }
}

/// Handle to an image registered with [`PdfCanvas::add_image`].
#[derive(Debug, Clone, Copy)]
pub struct ImageHandle {
    index: usize,
    width_px: u32,
    height_px: u32,
}

impl ImageHandle {
    pub fn scaled_height(&self, width: f32) -> f32 {
        width * self.height_px as f32 / self.width_px as f32
    }
}

#[derive(Debug, Clone, Default)]
pub struct DocumentInfo {
    pub title: Option<String>,
    pub author: Option<String>,
}

pub struct PdfCanvas {
    pages: Vec<Vec<Operation>>,
    images: Vec<RasterImage>,
    decorator: Option<Box<dyn PageDecorator>>,
    info: DocumentInfo,
    x: f32,
    y: f32,
    last_height: f32,
    font: FontStyle,
    font_size_pt: f32,
    in_decoration: bool,
}

impl PdfCanvas {
    pub fn new() -> Self {
        PdfCanvas {
            pages: Vec::new(),
            images: Vec::new(),
            decorator: None,
            info: DocumentInfo::default(),
            x: MARGIN_MM,
            y: MARGIN_MM,
            last_height: 0.0,
            font: FontStyle::Regular,
            font_size_pt: 12.0,
            in_decoration: false,
        }
    }

    pub fn with_decorator(mut self, decorator: Box<dyn PageDecorator>) -> Self {
        self.decorator = Some(decorator);
        self
    }

    pub fn with_info(mut self, info: DocumentInfo) -> Self {
        self.info = info;
        self
    }

    /// Current page number (1-based), 0 before the first page.
    pub fn page_no(&self) -> usize {
        self.pages.len()
    }

    /// Close the current page (footer) and open a new one (header).
    pub fn add_page(&mut self) {
        let (font, size) = (self.font, self.font_size_pt);
        if !self.pages.is_empty() {
            self.decorate(|d, c| d.footer(c));
        }
        self.pages.push(vec![Operation::new(
            "w",
            vec![Object::Real(LINE_WIDTH_MM * PT_PER_MM)],
        )]);
        self.x = MARGIN_MM;
        self.y = MARGIN_MM;
        self.decorate(|d, c| d.header(c));
        self.set_font(font, size);
    }

    fn decorate(&mut self, f: impl FnOnce(&dyn PageDecorator, &mut PdfCanvas)) {
        if let Some(decorator) = self.decorator.take() {
            self.in_decoration = true;
            f(decorator.as_ref(), self);
            self.in_decoration = false;
            self.decorator = Some(decorator);
        }
    }

    pub fn set_font(&mut self, style: FontStyle, size_pt: f32) {
        self.font = style;
        self.font_size_pt = size_pt;
    }

    /// Move to an absolute vertical position; negative values count from the
    /// bottom edge. Resets x to the left margin.
    pub fn set_y(&mut self, y: f32) {
        self.x = MARGIN_MM;
        self.y = if y < 0.0 { A4_HEIGHT_MM + y } else { y };
    }

    /// Line break of `height` mm (the last cell height when `None`).
    pub fn ln(&mut self, height: Option<f32>) {
        self.x = MARGIN_MM;
        self.y += height.unwrap_or(self.last_height);
    }

    /// Whether a row of `height` mm still fits above the break margin.
    pub fn fits(&self, height: f32) -> bool {
        self.y + height <= A4_HEIGHT_MM - BREAK_MARGIN_MM
    }

    pub fn text_width(&self, text: &str) -> f32 {
        text_width_pt(text, self.font, self.font_size_pt) / PT_PER_MM
    }

    /// Draw a cell `width` x `height` mm at the cursor and advance.
    ///
    /// A width of 0 extends the cell to the right margin. Text is neither
    /// wrapped nor clipped. Breaks the page first when the cell would cross
    /// the bottom margin (never inside header or footer).
    pub fn cell(
        &mut self,
        width: f32,
        height: f32,
        text: &str,
        border: bool,
        advance: Advance,
        align: Align,
    ) {
        if self.pages.is_empty() {
            self.add_page();
        }
        if !self.in_decoration && !self.fits(height) {
            let x = self.x;
            self.add_page();
            self.x = x;
        }

        let width = if width == 0.0 {
            A4_WIDTH_MM - MARGIN_MM - self.x
        } else {
            width
        };

        let mut ops = Vec::new();
        if border {
            ops.push(Operation::new(
                "re",
                vec![
                    pt(self.x),
                    pt(A4_HEIGHT_MM - self.y - height),
                    pt(width),
                    pt(height),
                ],
            ));
            ops.push(Operation::new("S", vec![]));
        }

        if !text.is_empty() {
            let text_width = self.text_width(text);
            let tx = match align {
                Align::Left => self.x + CELL_PADDING_MM,
                Align::Center => self.x + (width - text_width) / 2.0,
            };
            let font_size_mm = self.font_size_pt / PT_PER_MM;
            let baseline = self.y + 0.5 * height + 0.3 * font_size_mm;
            ops.extend([
                Operation::new("BT", vec![]),
                Operation::new(
                    "Tf",
                    vec![
                        Object::Name(self.font.resource_name().as_bytes().to_vec()),
                        Object::Real(self.font_size_pt),
                    ],
                ),
                Operation::new("Td", vec![pt(tx), pt(A4_HEIGHT_MM - baseline)]),
                Operation::new(
                    "Tj",
                    vec![Object::String(
                        encode_win_ansi(text),
                        StringFormat::Hexadecimal,
                    )],
                ),
                Operation::new("ET", vec![]),
            ]);
        }

        self.push_ops(ops);
        self.last_height = height;
        match advance {
            Advance::Right => self.x += width,
            Advance::NextLine => {
                self.x = MARGIN_MM;
                self.y += height;
            }
        }
    }

    /// Register an image once; it can then be drawn on any page.
    pub fn add_image(&mut self, image: RasterImage) -> ImageHandle {
        let handle = ImageHandle {
            index: self.images.len(),
            width_px: image.width_px,
            height_px: image.height_px,
        };
        self.images.push(image);
        handle
    }

    /// Draw an image with its top-left corner at (`x`, `y`), `width` mm wide.
    /// The cursor does not move.
    pub fn image(&mut self, handle: ImageHandle, x: f32, y: f32, width: f32) {
        if self.pages.is_empty() {
            self.add_page();
        }
        let height = handle.scaled_height(width);
        self.push_ops(vec![
            Operation::new("q", vec![]),
            Operation::new(
                "cm",
                vec![
                    pt(width),
                    Object::Integer(0),
                    Object::Integer(0),
                    pt(height),
                    pt(x),
                    pt(A4_HEIGHT_MM - y - height),
                ],
            ),
            Operation::new("Do", vec![Object::Name(image_name(handle.index).into_bytes())]),
            Operation::new("Q", vec![]),
        ]);
    }

    fn push_ops(&mut self, ops: Vec<Operation>) {
        if let Some(page) = self.pages.last_mut() {
            page.extend(ops);
        }
    }

    /// Close the last page and serialize the document.
    pub fn finish(mut self) -> Result<Vec<u8>, CreaError> {
        if self.pages.is_empty() {
            self.add_page();
        }
        self.decorate(|d, c| d.footer(c));

        let mut doc = Document::with_version("1.4");
        let pages_id = doc.new_object_id();

        let mut fonts = Dictionary::new();
        for style in FontStyle::ALL {
            let font_id = doc.add_object(dictionary! {
                "Type" => "Font",
                "Subtype" => "Type1",
                "BaseFont" => style.base_font(),
                "Encoding" => "WinAnsiEncoding",
            });
            fonts.set(style.resource_name(), Object::Reference(font_id));
        }

        let mut xobjects = Dictionary::new();
        for (i, img) in self.images.iter().enumerate() {
            let stream = Stream::new(
                dictionary! {
                    "Type" => "XObject",
                    "Subtype" => "Image",
                    "Width" => img.width_px as i64,
                    "Height" => img.height_px as i64,
                    "ColorSpace" => "DeviceRGB",
                    "BitsPerComponent" => 8_i64,
                },
                img.rgb.clone(),
            );
            let image_id = doc.add_object(stream);
            xobjects.set(image_name(i), Object::Reference(image_id));
        }

        let mut resources = dictionary! { "Font" => fonts };
        if !xobjects.is_empty() {
            resources.set("XObject", xobjects);
        }
        let resources_id = doc.add_object(resources);

        let mut page_ids: Vec<ObjectId> = Vec::with_capacity(self.pages.len());
        for operations in std::mem::take(&mut self.pages) {
            let content = Content { operations };
            let content_id = doc.add_object(Stream::new(Dictionary::new(), content.encode()?));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "MediaBox" => vec![
                    Object::Integer(0),
                    Object::Integer(0),
                    pt(A4_WIDTH_MM),
                    pt(A4_HEIGHT_MM),
                ],
                "Resources" => resources_id,
                "Contents" => content_id,
            });
            page_ids.push(page_id);
        }

        let pages = dictionary! {
            "Type" => "Pages",
            "Count" => page_ids.len() as i64,
            "Kids" => page_ids.into_iter().map(Object::Reference).collect::<Vec<_>>(),
        };
        doc.objects.insert(pages_id, Object::Dictionary(pages));

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut info = Dictionary::new();
        if let Some(title) = &self.info.title {
            info.set("Title", text_string(title));
        }
        if let Some(author) = &self.info.author {
            info.set("Author", text_string(author));
        }
        if !info.is_empty() {
            let info_id = doc.add_object(info);
            doc.trailer.set("Info", info_id);
        }

        doc.compress();
        let mut buffer = Vec::new();
        doc.save_to(&mut buffer)?;
        Ok(buffer)
    }
}

impl Default for PdfCanvas {
    fn default() -> Self {
        Self::new()
    }
}

fn pt(mm: f32) -> Object {
    Object::Real(mm * PT_PER_MM)
}

fn image_name(index: usize) -> String {
    format!("Im{}", index + 1)
}

/// PDF text string: UTF-16BE with byte order mark.
fn text_string(s: &str) -> Object {
    let mut bytes = vec![0xFE, 0xFF];
    for unit in s.encode_utf16() {
        bytes.extend_from_slice(&unit.to_be_bytes());
    }
    Object::String(bytes, StringFormat::Hexadecimal)
}

/// Text drawn with `Tj` on each page, decoded from WinAnsi. Used by tests
/// to inspect rendered reports.
pub fn page_texts(pdf_bytes: &[u8]) -> Result<Vec<Vec<String>>, CreaError> {
    let doc = Document::load_mem(pdf_bytes)?;
    let mut pages = Vec::new();
    for (_, page_id) in doc.get_pages() {
        let content = Content::decode(&doc.get_page_content(page_id)?)?;
        let texts = content
            .operations
            .iter()
            .filter(|op| op.operator == "Tj")
            .filter_map(|op| match op.operands.first() {
                Some(Object::String(bytes, _)) => {
                    Some(bytes.iter().map(|&b| decode_win_ansi_byte(b)).collect())
                }
                _ => None,
            })
            .collect();
        pages.push(texts);
    }
    Ok(pages)
}

fn decode_win_ansi_byte(b: u8) -> char {
    match b {
        0x80 => '€',
        0x91 => '‘',
        0x92 => '’',
        0x93 => '“',
        0x94 => '”',
        0x95 => '•',
        0x96 => '–',
        0x97 => '—',
        _ => b as char,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Titled;

    impl PageDecorator for Titled {
        fn header(&self, canvas: &mut PdfCanvas) {
            canvas.set_font(FontStyle::Bold, 16.0);
            canvas.cell(0.0, 10.0, "Cabeçalho", false, Advance::NextLine, Align::Center);
        }

        fn footer(&self, canvas: &mut PdfCanvas) {
            PageNumberFooter.footer(canvas);
        }
    }

    #[test]
    fn test_single_page_texts() {
        let mut canvas = PdfCanvas::new();
        canvas.add_page();
        canvas.cell(40.0, 10.0, "Arquivo", true, Advance::Right, Align::Center);
        canvas.cell(20.0, 10.0, "S.I", true, Advance::NextLine, Align::Center);
        let bytes = canvas.finish().unwrap();
        assert!(bytes.starts_with(b"%PDF-1.4"));
        let pages = page_texts(&bytes).unwrap();
        assert_eq!(pages, vec![vec!["Arquivo".to_string(), "S.I".to_string()]]);
    }

    #[test]
    fn test_auto_page_break_runs_decorator() {
        let mut canvas = PdfCanvas::new().with_decorator(Box::new(Titled));
        canvas.add_page();
        canvas.set_font(FontStyle::Regular, 10.0);
        for i in 0..30 {
            canvas.cell(50.0, 10.0, &format!("linha {i}"), true, Advance::NextLine, Align::Left);
        }
        assert_eq!(canvas.page_no(), 2);
        let pages = page_texts(&canvas.finish().unwrap()).unwrap();
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].first().map(String::as_str), Some("Cabeçalho"));
        assert_eq!(pages[0].last().map(String::as_str), Some("Página 1"));
        assert_eq!(pages[1].first().map(String::as_str), Some("Cabeçalho"));
        assert_eq!(pages[1].last().map(String::as_str), Some("Página 2"));
        // 10 mm header row + 25 rows fill page 1 up to the 277 mm break line
        assert_eq!(pages[0].len(), 1 + 25 + 1);
    }

    #[test]
    fn test_font_restored_after_header() {
        let mut canvas = PdfCanvas::new().with_decorator(Box::new(Titled));
        canvas.set_font(FontStyle::Regular, 10.0);
        canvas.add_page();
        assert_eq!(canvas.font, FontStyle::Regular);
        assert_eq!(canvas.font_size_pt, 10.0);
    }

    #[test]
    fn test_image_is_embedded() {
        let mut canvas = PdfCanvas::new();
        let handle = canvas.add_image(RasterImage {
            width_px: 2,
            height_px: 1,
            rgb: vec![0; 6],
        });
        assert_eq!(handle.scaled_height(40.0), 20.0);
        canvas.add_page();
        canvas.image(handle, 85.0, 10.0, 40.0);
        let doc = Document::load_mem(&canvas.finish().unwrap()).unwrap();
        let has_image = doc.objects.values().any(|o| {
            o.as_stream()
                .ok()
                .and_then(|s| s.dict.get(b"Subtype").ok())
                .and_then(|n| n.as_name().ok())
                == Some(b"Image".as_slice())
        });
        assert!(has_image);
    }

    #[test]
    fn test_info_dictionary() {
        let canvas = PdfCanvas::new().with_info(DocumentInfo {
            title: Some("Relatório".into()),
            author: None,
        });
        let doc = Document::load_mem(&canvas.finish().unwrap()).unwrap();
        assert!(doc.trailer.get(b"Info").is_ok());
    }
}
