//! PDF rendering of a [`DocumentPlan`] with `printpdf`.

use crate::{Block, DocumentPlan, MISSING_IMAGE_MARKER};
use picturebook_error::{AssemblyError, AssemblyErrorKind};
use printpdf::image::RawImage;
use printpdf::matrix::TextMatrix;
use printpdf::ops::Op;
use printpdf::text::TextItem;
use printpdf::xobject::{XObject, XObjectTransform};
use printpdf::{BuiltinFont, Mm, PdfDocument, PdfPage, PdfSaveOptions, Pt, XObjectId};
use std::path::Path;
use tracing::{debug, instrument, warn};

const A4_WIDTH_MM: f32 = 210.0;
const A4_HEIGHT_MM: f32 = 297.0;
const PT_PER_MM: f32 = 72.0 / 25.4;
const MARGIN_PT: f32 = 56.0;

const TITLE_SIZE: f32 = 24.0;
const HEADING_SIZE: f32 = 18.0;
const BODY_SIZE: f32 = 14.0;
const LINE_SPACING: f32 = 1.4;

/// Illustration box, 4 x 3 inches.
const IMAGE_BOX_W: f32 = 4.0 * 72.0;
const IMAGE_BOX_H: f32 = 3.0 * 72.0;

/// Average Helvetica glyph advance as a fraction of the font size.
const AVG_GLYPH_EM: f32 = 0.5;

/// Renders storybook plans to PDF bytes.
///
/// Pages are A4 and use the built-in Helvetica family, so no font files are
/// embedded. The title page carries the title and the moral; each story
/// page then starts a new PDF page with its heading, the illustration scaled
/// into a 4 x 3 inch box, and word-wrapped text. Text that runs past the
/// bottom margin continues on a fresh page.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfAssembler;

impl PdfAssembler {
    /// Create an assembler.
    pub fn new() -> Self {
        Self
    }

    /// Render `plan` to PDF bytes.
    ///
    /// Illustrations that cannot be read or decoded are replaced by the
    /// missing-image marker and logged.
    ///
    /// # Errors
    ///
    /// [`AssemblyErrorKind::Render`] if the plan has no content.
    #[instrument(skip(self, plan), fields(title = %plan.title(), pages = plan.page_count()))]
    pub fn render(&self, plan: &DocumentPlan) -> Result<Vec<u8>, AssemblyError> {
        if plan.blocks().is_empty() {
            return Err(AssemblyError::new(AssemblyErrorKind::Render(
                "document plan is empty".to_string(),
            )));
        }

        let mut doc = PdfDocument::new(&sanitize(plan.title()));
        let pages = layout(&mut doc, plan);

        let page_total = pages.len();
        for ops in pages {
            doc.pages
                .push(PdfPage::new(Mm(A4_WIDTH_MM), Mm(A4_HEIGHT_MM), ops));
        }

        let mut warnings = Vec::new();
        let bytes = doc.save(&PdfSaveOptions::default(), &mut warnings);
        if !warnings.is_empty() {
            debug!(count = warnings.len(), "printpdf reported warnings");
        }
        debug!(pdf_pages = page_total, size = bytes.len(), "Rendered storybook PDF");
        Ok(bytes)
    }
}

/// Lay `plan` out as per-page op lists, registering images with `doc`.
fn layout(doc: &mut PdfDocument, plan: &DocumentPlan) -> Vec<Vec<Op>> {
    let mut pages: Vec<Vec<Op>> = Vec::new();
    let mut cursor = Cursor::new();

    for block in plan.blocks() {
        match block {
            Block::Title(title) => {
                cursor.wrapped(&mut pages, title, TITLE_SIZE, BuiltinFont::HelveticaBold, true);
                cursor.gap(TITLE_SIZE);
            }
            Block::Moral(moral) => {
                cursor.wrapped(
                    &mut pages,
                    moral,
                    BODY_SIZE,
                    BuiltinFont::HelveticaOblique,
                    true,
                );
            }
            Block::PageHeading(n) => {
                cursor.new_page(&mut pages);
                cursor.wrapped(
                    &mut pages,
                    &format!("Page {}", n),
                    HEADING_SIZE,
                    BuiltinFont::HelveticaBold,
                    false,
                );
                cursor.gap(HEADING_SIZE * 0.5);
            }
            Block::Image(path) => match embed_image(doc, path) {
                Ok(image) => cursor.image(&mut pages, image),
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Illustration skipped");
                    cursor.marker(&mut pages);
                }
            },
            Block::MissingImage => cursor.marker(&mut pages),
            Block::Text(text) => {
                cursor.wrapped(&mut pages, text, BODY_SIZE, BuiltinFont::Helvetica, false);
            }
        }
    }
    cursor.flush(&mut pages);
    pages
}

/// A decoded image registered with the document.
struct EmbeddedImage {
    id: XObjectId,
    width: f32,
    height: f32,
}

fn embed_image(doc: &mut PdfDocument, path: &Path) -> Result<EmbeddedImage, AssemblyError> {
    let bytes = std::fs::read(path).map_err(|e| {
        AssemblyError::new(AssemblyErrorKind::Image(format!("{}: {}", path.display(), e)))
    })?;

    let mut warnings = Vec::new();
    let raw = RawImage::decode_from_bytes(&bytes, &mut warnings).map_err(|e| {
        AssemblyError::new(AssemblyErrorKind::Image(format!("{}: {}", path.display(), e)))
    })?;
    if raw.width == 0 || raw.height == 0 {
        return Err(AssemblyError::new(AssemblyErrorKind::Image(format!(
            "{}: image has no pixels",
            path.display()
        ))));
    }

    let image = EmbeddedImage {
        id: XObjectId::new(),
        width: raw.width as f32,
        height: raw.height as f32,
    };
    doc.resources
        .xobjects
        .map
        .insert(image.id.clone(), XObject::Image(raw));
    Ok(image)
}

/// Top-down layout position on the current PDF page.
struct Cursor {
    ops: Vec<Op>,
    y: f32,
}

impl Cursor {
    fn new() -> Self {
        Self {
            ops: Vec::new(),
            y: page_height() - MARGIN_PT,
        }
    }

    /// Close the current page, if it has content, and start another.
    fn new_page(&mut self, pages: &mut Vec<Vec<Op>>) {
        self.flush(pages);
        self.y = page_height() - MARGIN_PT;
    }

    fn flush(&mut self, pages: &mut Vec<Vec<Op>>) {
        if !self.ops.is_empty() {
            pages.push(std::mem::take(&mut self.ops));
        }
    }

    fn gap(&mut self, pt: f32) {
        self.y -= pt;
    }

    /// Reserve `height` points, breaking to a new page if they do not fit.
    fn reserve(&mut self, pages: &mut Vec<Vec<Op>>, height: f32) {
        if self.y - height < MARGIN_PT && !self.ops.is_empty() {
            self.new_page(pages);
        }
    }

    fn wrapped(
        &mut self,
        pages: &mut Vec<Vec<Op>>,
        text: &str,
        size: f32,
        font: BuiltinFont,
        centered: bool,
    ) {
        let line_height = size * LINE_SPACING;
        for line in wrap(&sanitize(text), max_chars(size)) {
            self.reserve(pages, line_height);
            self.y -= size;
            let x = if centered {
                ((page_width() - approx_width(&line, size)) / 2.0).max(MARGIN_PT)
            } else {
                MARGIN_PT
            };
            self.text_line(line, x, self.y, size, font);
            self.y -= line_height - size;
        }
        self.gap(size * 0.6);
    }

    fn marker(&mut self, pages: &mut Vec<Vec<Op>>) {
        self.wrapped(
            pages,
            MISSING_IMAGE_MARKER,
            BODY_SIZE,
            BuiltinFont::HelveticaOblique,
            true,
        );
    }

    fn image(&mut self, pages: &mut Vec<Vec<Op>>, image: EmbeddedImage) {
        self.reserve(pages, IMAGE_BOX_H);
        let scale = (IMAGE_BOX_W / image.width).min(IMAGE_BOX_H / image.height);
        let drawn_w = image.width * scale;
        let drawn_h = image.height * scale;
        let x = (page_width() - drawn_w) / 2.0;
        let box_top = self.y;
        let y = box_top - (IMAGE_BOX_H + drawn_h) / 2.0;

        self.ops.push(Op::UseXobject {
            id: image.id,
            transform: XObjectTransform {
                translate_x: Some(Pt(x)),
                translate_y: Some(Pt(y)),
                scale_x: Some(scale),
                scale_y: Some(scale),
                rotate: None,
                dpi: Some(72.0),
            },
        });
        self.y = box_top - IMAGE_BOX_H - BODY_SIZE;
    }

    fn text_line(&mut self, line: String, x: f32, y: f32, size: f32, font: BuiltinFont) {
        self.ops.push(Op::StartTextSection);
        self.ops.push(Op::SetFontSizeBuiltinFont {
            size: Pt(size),
            font,
        });
        self.ops.push(Op::SetTextMatrix {
            matrix: TextMatrix::Translate(Pt(x), Pt(y)),
        });
        self.ops.push(Op::WriteTextBuiltinFont {
            items: vec![TextItem::Text(line)],
            font,
        });
        self.ops.push(Op::EndTextSection);
    }
}

fn page_width() -> f32 {
    A4_WIDTH_MM * PT_PER_MM
}

fn page_height() -> f32 {
    A4_HEIGHT_MM * PT_PER_MM
}

fn approx_width(text: &str, size: f32) -> f32 {
    text.chars().count() as f32 * size * AVG_GLYPH_EM
}

fn max_chars(size: f32) -> usize {
    ((page_width() - 2.0 * MARGIN_PT) / (size * AVG_GLYPH_EM)) as usize
}

/// Greedy word wrap on character counts. Words longer than a line are split.
pub(crate) fn wrap(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut lines = Vec::new();

    for paragraph in text.lines() {
        let mut line = String::new();
        for word in paragraph.split_whitespace() {
            let mut word: Vec<char> = word.chars().collect();
            while word.len() > max_chars {
                if !line.is_empty() {
                    lines.push(std::mem::take(&mut line));
                }
                let rest = word.split_off(max_chars);
                lines.push(word.into_iter().collect());
                word = rest;
            }
            let word: String = word.into_iter().collect();
            let needed = if line.is_empty() {
                word.chars().count()
            } else {
                line.chars().count() + 1 + word.chars().count()
            };
            if needed > max_chars && !line.is_empty() {
                lines.push(std::mem::take(&mut line));
            }
            if !line.is_empty() {
                line.push(' ');
            }
            line.push_str(&word);
        }
        if !line.is_empty() {
            lines.push(line);
        }
    }
    lines
}

/// Map typographic punctuation to the ASCII the built-in fonts encode.
pub(crate) fn sanitize(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '\u{2018}' | '\u{2019}' | '\u{201B}' => '\'',
            '\u{201C}' | '\u{201D}' | '\u{201F}' => '"',
            '\u{2013}' | '\u{2014}' => '-',
            '\u{2026}' => '.',
            '\u{00A0}' => ' ',
            other => other,
        })
        .collect()
}
