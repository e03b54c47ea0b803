//! Renders trip reports to PDF with `printpdf`.
//!
//! Text is set in embedded TrueType faces and measured with their real glyph advances, so long
//! values wrap inside their column. Each character is drawn with the first face in the chain that
//! has a glyph for it: the bundled DejaVu Sans first, then any configured fallback fonts.

use crate::api::export::report::{ReportTable, SectionBody, TripReport};
use app_state::ExportSettings;
use color_eyre::Result;
use color_eyre::eyre::{WrapErr, eyre};
use owned_ttf_parser::{AsFaceRef, OwnedFace};
use printpdf::{
    Color, CustomPdfConformance, Greyscale, IndirectFontRef, Line, Mm, PdfConformance,
    PdfDocument, PdfDocumentReference, PdfLayerReference, Point, Pt, Rgb,
};
use std::sync::Arc;
use tracing::warn;

const DEJAVU_SANS: &[u8] = include_bytes!("../../../assets/fonts/DejaVuSans.ttf");
const DEJAVU_SANS_BOLD: &[u8] = include_bytes!("../../../assets/fonts/DejaVuSans-Bold.ttf");

const PAGE_WIDTH: f32 = 595.0;
const PAGE_HEIGHT: f32 = 842.0;
const MARGIN: f32 = 56.0;
const CONTENT_WIDTH: f32 = PAGE_WIDTH - 2.0 * MARGIN;
const LINE_HEIGHT: f32 = 1.5;
const FIELD_VALUE_OFFSET: f32 = 140.0;
const CELL_PADDING: f32 = 6.0;
const LAYER_NAME: &str = "Report";
const PRODUCER: &str = "Trip Planner";

/// Drawn in place of characters no face in the chain can show.
const REPLACEMENT: char = '\u{FFFD}';

/// Turns a report into a downloadable document.
pub trait ReportRenderer: Send + Sync {
    fn content_type(&self) -> &'static str;

    /// # Errors
    ///
    /// Returns an error when the document cannot be produced.
    fn render(&self, report: &TripReport) -> Result<Vec<u8>>;
}

#[derive(Clone)]
pub struct PdfReportRenderer {
    regular: FontChain,
    bold: FontChain,
}

impl PdfReportRenderer {
    /// Renderer with only the bundled DejaVu Sans faces.
    ///
    /// # Errors
    ///
    /// Returns an error if a bundled face cannot be parsed.
    pub fn bundled() -> Result<Self> {
        Self::with_fallbacks(Vec::new())
    }

    /// Bundled faces followed by the fallback fonts listed in the settings.
    ///
    /// # Errors
    ///
    /// Returns an error if a configured font cannot be read or is not a TrueType/OpenType face.
    pub fn from_settings(settings: &ExportSettings) -> Result<Self> {
        let fallbacks = settings
            .fallback_fonts
            .iter()
            .map(|path| {
                let bytes = std::fs::read(path)
                    .wrap_err_with(|| format!("reading report font {}", path.display()))?;
                FontFace::parse(bytes)
                    .wrap_err_with(|| format!("parsing report font {}", path.display()))
                    .map(Arc::new)
            })
            .collect::<Result<Vec<_>>>()?;
        Self::with_fallbacks(fallbacks)
    }

    fn with_fallbacks(fallbacks: Vec<Arc<FontFace>>) -> Result<Self> {
        let chain = |primary: &[u8]| -> Result<FontChain> {
            let mut faces = vec![Arc::new(FontFace::parse(primary.to_vec())?)];
            faces.extend(fallbacks.iter().cloned());
            Ok(FontChain { faces })
        };
        Ok(Self {
            regular: chain(DEJAVU_SANS)?,
            bold: chain(DEJAVU_SANS_BOLD)?,
        })
    }

    fn chain(&self, weight: Weight) -> &FontChain {
        match weight {
            Weight::Regular => &self.regular,
            Weight::Bold => &self.bold,
        }
    }
}

impl ReportRenderer for PdfReportRenderer {
    fn content_type(&self) -> &'static str {
        "application/pdf"
    }

    fn render(&self, report: &TripReport) -> Result<Vec<u8>> {
        let pages = Layout::new(self).report(report);

        let (doc, first_page, first_layer) = PdfDocument::new(
            report.title.clone(),
            mm(PAGE_WIDTH),
            mm(PAGE_HEIGHT),
            LAYER_NAME,
        );
        let doc = doc
            .with_producer(PRODUCER)
            .with_conformance(PdfConformance::Custom(CustomPdfConformance {
                requires_icc_profile: false,
                requires_xmp_metadata: false,
                ..Default::default()
            }));
        let regular = self.regular.embed(&doc)?;
        let bold = self.bold.embed(&doc)?;

        let mut missing = 0;
        for (index, marks) in pages.iter().enumerate() {
            let (page, layer) = if index == 0 {
                (first_page, first_layer)
            } else {
                doc.add_page(mm(PAGE_WIDTH), mm(PAGE_HEIGHT), LAYER_NAME)
            };
            let layer = doc.get_page(page).get_layer(layer);
            for mark in marks {
                match mark {
                    Mark::Text(text) => {
                        let fonts = match text.style.weight {
                            Weight::Regular => &regular,
                            Weight::Bold => &bold,
                        };
                        missing += self.chain(text.style.weight).missing(&text.text);
                        self.draw_text(&layer, fonts, text);
                    }
                    Mark::Rule { y } => draw_rule(&layer, *y),
                }
            }
        }
        if missing > 0 {
            warn!(
                "Report '{}' has {} characters no font covers; add a font to export.fallback_fonts",
                report.title, missing
            );
        }

        Ok(doc.save_to_bytes()?)
    }
}

impl PdfReportRenderer {
    /// Draws a line of text run by run, advancing by each run's measured width.
    fn draw_text(&self, layer: &PdfLayerReference, fonts: &[IndirectFontRef], mark: &TextMark) {
        let chain = self.chain(mark.style.weight);
        let size = mark.style.size;
        layer.set_fill_color(mark.style.ink.color());
        let mut x = mark.x;
        for run in chain.runs(&mark.text) {
            let advance = chain.faces[run.face].width(&run.text, size);
            layer.use_text(run.text, size, mm(x), mm(mark.y), &fonts[run.face]);
            x += advance;
        }
    }
}

fn draw_rule(layer: &PdfLayerReference, y: f32) {
    layer.set_outline_color(Color::Greyscale(Greyscale::new(0.75, None)));
    layer.set_outline_thickness(0.5);
    layer.add_line(Line {
        points: vec![
            (point(MARGIN, y), false),
            (point(PAGE_WIDTH - MARGIN, y), false),
        ],
        is_closed: false,
    });
}

fn mm(points: f32) -> Mm {
    Mm::from(Pt(points))
}

fn point(x: f32, y: f32) -> Point {
    Point {
        x: Pt(x),
        y: Pt(y),
    }
}

//================================================================================
// Fonts
//================================================================================

/// A TrueType face, kept as bytes for embedding and parsed for measuring.
struct FontFace {
    face: OwnedFace,
}

impl FontFace {
    fn parse(bytes: Vec<u8>) -> Result<Self> {
        let face = OwnedFace::from_vec(bytes, 0).map_err(|e| eyre!("invalid font face: {e}"))?;
        Ok(Self { face })
    }

    fn covers(&self, c: char) -> bool {
        self.face.as_face_ref().glyph_index(c).is_some()
    }

    /// Advance width of `text` in points. Characters without a glyph add nothing.
    fn width(&self, text: &str, size: f32) -> f32 {
        let face = self.face.as_face_ref();
        let units: f32 = text
            .chars()
            .filter_map(|c| face.glyph_index(c))
            .filter_map(|glyph| face.glyph_hor_advance(glyph))
            .map(f32::from)
            .sum();
        units * size / f32::from(face.units_per_em())
    }
}

/// A stretch of text drawn with a single face.
#[derive(Debug, PartialEq, Eq)]
struct Run {
    face: usize,
    text: String,
}

#[derive(Clone)]
struct FontChain {
    faces: Vec<Arc<FontFace>>,
}

impl FontChain {
    fn face_for(&self, c: char) -> Option<usize> {
        self.faces.iter().position(|face| face.covers(c))
    }

    /// Splits `text` into runs. A character stays in the current run while that face covers it,
    /// otherwise it starts a run in the first face that does.
    fn runs(&self, text: &str) -> Vec<Run> {
        let mut runs: Vec<Run> = Vec::new();
        for c in text.chars() {
            let c = if c.is_control() { ' ' } else { c };
            let (c, face) = match self.face_for(c) {
                Some(face) => (c, face),
                None => (REPLACEMENT, self.face_for(REPLACEMENT).unwrap_or(0)),
            };
            match runs.last_mut() {
                Some(run) if run.face == face || self.faces[run.face].covers(c) => run.text.push(c),
                _ => runs.push(Run {
                    face,
                    text: c.to_string(),
                }),
            }
        }
        runs
    }

    /// Number of characters no face in the chain can draw.
    fn missing(&self, text: &str) -> usize {
        text.chars()
            .filter(|c| !c.is_control() && self.face_for(*c).is_none())
            .count()
    }

    fn width(&self, text: &str, size: f32) -> f32 {
        self.runs(text)
            .iter()
            .map(|run| self.faces[run.face].width(&run.text, size))
            .sum()
    }

    /// Greedy word wrap to `width` points. Words wider than a line are broken between characters.
    fn wrap(&self, text: &str, size: f32, width: f32) -> Vec<String> {
        let mut lines = Vec::new();
        let mut line = String::new();
        for word in text.split_whitespace() {
            let candidate = if line.is_empty() {
                word.to_owned()
            } else {
                format!("{line} {word}")
            };
            if self.width(&candidate, size) <= width {
                line = candidate;
                continue;
            }
            if !line.is_empty() {
                lines.push(std::mem::take(&mut line));
            }
            if self.width(word, size) <= width {
                line = word.to_owned();
                continue;
            }
            for c in word.chars() {
                line.push(c);
                if self.width(&line, size) > width && line.chars().count() > 1 {
                    line.pop();
                    lines.push(std::mem::replace(&mut line, c.to_string()));
                }
            }
        }
        if !line.is_empty() || lines.is_empty() {
            lines.push(line);
        }
        lines
    }

    /// Adds every face to the document, in chain order.
    fn embed(&self, doc: &PdfDocumentReference) -> Result<Vec<IndirectFontRef>> {
        self.faces
            .iter()
            .map(|face| -> Result<IndirectFontRef> {
                Ok(doc.add_external_font(face.face.as_slice())?)
            })
            .collect()
    }
}

//================================================================================
// Layout
//================================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Weight {
    Regular,
    Bold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Ink {
    Black,
    Accent,
    Muted,
}

impl Ink {
    fn color(self) -> Color {
        match self {
            Self::Black => Color::Greyscale(Greyscale::new(0.0, None)),
            Self::Accent => Color::Rgb(Rgb::new(0.424, 0.388, 1.0, None)),
            Self::Muted => Color::Greyscale(Greyscale::new(0.5, None)),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Style {
    weight: Weight,
    size: f32,
    ink: Ink,
}

const TITLE: Style = Style {
    weight: Weight::Bold,
    size: 22.0,
    ink: Ink::Accent,
};
const HEADING: Style = Style {
    weight: Weight::Bold,
    size: 15.0,
    ink: Ink::Accent,
};
const BODY: Style = Style {
    weight: Weight::Regular,
    size: 10.0,
    ink: Ink::Black,
};
const STRONG: Style = Style {
    weight: Weight::Bold,
    size: 10.0,
    ink: Ink::Black,
};
const FOOTER: Style = Style {
    weight: Weight::Regular,
    size: 9.0,
    ink: Ink::Muted,
};

#[derive(Debug)]
struct TextMark {
    style: Style,
    x: f32,
    y: f32,
    text: String,
}

#[derive(Debug)]
enum Mark {
    Text(TextMark),
    Rule { y: f32 },
}

/// A table or field cell: text wrapped within `width` points starting at `x`.
struct Cell<'t> {
    x: f32,
    width: f32,
    style: Style,
    text: &'t str,
}

struct Layout<'r> {
    renderer: &'r PdfReportRenderer,
    pages: Vec<Vec<Mark>>,
    y: f32,
}

impl<'r> Layout<'r> {
    fn new(renderer: &'r PdfReportRenderer) -> Self {
        Self {
            renderer,
            pages: vec![Vec::new()],
            y: PAGE_HEIGHT - MARGIN,
        }
    }

    fn push(&mut self, mark: Mark) {
        if let Some(page) = self.pages.last_mut() {
            page.push(mark);
        }
    }

    /// Moves to a fresh page when fewer than `height` points are left.
    fn reserve(&mut self, height: f32) {
        if self.y - height < MARGIN {
            self.pages.push(Vec::new());
            self.y = PAGE_HEIGHT - MARGIN;
        }
    }

    fn gap(&mut self, height: f32) {
        self.y -= height;
    }

    /// Cells sharing a top edge. The row starts a new page when it would not fit on this one,
    /// unless it is taller than a whole page.
    fn row(&mut self, cells: &[Cell<'_>]) {
        let renderer = self.renderer;
        let wrapped: Vec<Vec<String>> = cells
            .iter()
            .map(|cell| {
                renderer
                    .chain(cell.style.weight)
                    .wrap(cell.text, cell.style.size, cell.width)
            })
            .collect();
        let size = cells.iter().map(|cell| cell.style.size).fold(0.0, f32::max);
        let line_height = size * LINE_HEIGHT;
        let lines = wrapped.iter().map(Vec::len).max().unwrap_or(0);

        let row_height = line_height * lines as f32;
        if row_height <= PAGE_HEIGHT - 2.0 * MARGIN {
            self.reserve(row_height);
        }
        for index in 0..lines {
            self.reserve(line_height);
            self.y -= line_height;
            for (cell, cell_lines) in cells.iter().zip(&wrapped) {
                let Some(text) = cell_lines.get(index).filter(|t| !t.is_empty()) else {
                    continue;
                };
                let mark = Mark::Text(TextMark {
                    style: cell.style,
                    x: cell.x,
                    y: self.y,
                    text: text.clone(),
                });
                self.push(mark);
            }
        }
    }

    fn line(&mut self, style: Style, text: &str) {
        self.row(&[Cell {
            x: MARGIN,
            width: CONTENT_WIDTH,
            style,
            text,
        }]);
    }

    fn centered(&mut self, style: Style, text: &str) {
        let renderer = self.renderer;
        let chain = renderer.chain(style.weight);
        let line_height = style.size * LINE_HEIGHT;
        for line in chain.wrap(text, style.size, CONTENT_WIDTH) {
            self.reserve(line_height);
            self.y -= line_height;
            let x = MARGIN + ((CONTENT_WIDTH - chain.width(&line, style.size)) / 2.0).max(0.0);
            let mark = Mark::Text(TextMark {
                style,
                x,
                y: self.y,
                text: line,
            });
            self.push(mark);
        }
    }

    fn rule(&mut self) {
        self.gap(4.0);
        let y = self.y;
        self.push(Mark::Rule { y });
        self.gap(4.0);
    }

    fn report(mut self, report: &TripReport) -> Vec<Vec<Mark>> {
        self.centered(TITLE, &report.title);
        self.centered(BODY, &report.subtitle);
        self.gap(12.0);

        for section in &report.sections {
            self.reserve(HEADING.size * LINE_HEIGHT * 3.0);
            self.gap(10.0);
            self.line(HEADING, &section.heading);
            self.rule();

            match &section.body {
                SectionBody::Fields(fields) => {
                    for (label, value) in fields {
                        self.row(&[
                            Cell {
                                x: MARGIN,
                                width: FIELD_VALUE_OFFSET - CELL_PADDING,
                                style: STRONG,
                                text: label,
                            },
                            Cell {
                                x: MARGIN + FIELD_VALUE_OFFSET,
                                width: CONTENT_WIDTH - FIELD_VALUE_OFFSET,
                                style: BODY,
                                text: value,
                            },
                        ]);
                    }
                }
                SectionBody::Table(table) => self.table(table),
                SectionBody::Text(text) => self.line(BODY, text),
            }
        }

        self.gap(24.0);
        for line in &report.footer {
            self.centered(FOOTER, line);
        }
        self.pages
    }

    fn table(&mut self, table: &ReportTable) {
        let total_weight: f32 = table
            .widths
            .iter()
            .map(|w| f32::from(*w))
            .sum::<f32>()
            .max(1.0);
        let mut columns = Vec::with_capacity(table.widths.len());
        let mut x = MARGIN;
        for weight in &table.widths {
            let width = CONTENT_WIDTH * f32::from(*weight) / total_weight;
            columns.push((x, width - CELL_PADDING));
            x += width;
        }

        self.row(&table_cells(&columns, &table.headers, STRONG));
        for row in &table.rows {
            self.row(&table_cells(&columns, row, BODY));
        }
        if let Some(summary) = &table.summary {
            self.rule();
            self.row(&table_cells(&columns, summary, STRONG));
        }
    }
}

/// One cell per column, given as `(x, width)`.
fn table_cells<'t>(columns: &[(f32, f32)], row: &'t [String], style: Style) -> Vec<Cell<'t>> {
    columns
        .iter()
        .zip(row)
        .map(|(&(x, width), text)| Cell {
            x,
            width,
            style,
            text,
        })
        .collect()
}
