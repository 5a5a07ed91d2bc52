//! Tabular PDF rendering for the monthly loan report.
//!
//! Letter-size pages, built-in Helvetica fonts, the table style of the
//! original dashboard: dark header row with white bold text, light body
//! rows, full black grid, centered cells. Rendering is entirely in-memory
//! and returns the complete document bytes.

use chrono::{DateTime, Local};
use printpdf::path::{PaintMode, WindingOrder};
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Mm, PdfDocument, PdfLayerReference, Point, Polygon, Rgb,
};

use crate::error::DashboardError;
use crate::models::ReportRow;
use crate::report::format_money;

// Letter
const PAGE_WIDTH: f32 = 215.9;
const PAGE_HEIGHT: f32 = 279.4;
const MARGIN: f32 = 18.0;

const HEADER_ROW_HEIGHT: f32 = 10.0;
const BODY_ROW_HEIGHT: f32 = 8.0;
const HEADER_FONT_SIZE: f32 = 10.0;
const BODY_FONT_SIZE: f32 = 9.0;

const COLUMNS: [(&str, f32); 6] = [
    ("Ano", 16.0),
    ("Mês", 26.0),
    ("Total (R$)", 32.0),
    ("Maior Empréstimo", 48.0),
    ("Cliente", 38.0),
    ("Conta", 19.9),
];

fn header_background() -> Color {
    // #2c3e50
    Color::Rgb(Rgb::new(0.173, 0.243, 0.314, None))
}

fn body_background() -> Color {
    // #f8f9fa
    Color::Rgb(Rgb::new(0.973, 0.976, 0.980, None))
}

fn white() -> Color {
    Color::Rgb(Rgb::new(1.0, 1.0, 1.0, None))
}

fn black() -> Color {
    Color::Rgb(Rgb::new(0.0, 0.0, 0.0, None))
}

/// Render the loan report as a complete PDF byte buffer.
pub fn render_loan_report(
    rows: &[ReportRow],
    generated_at: DateTime<Local>,
) -> Result<Vec<u8>, DashboardError> {
    let (doc, first_page, first_layer) = PdfDocument::new(
        "Relatório de Empréstimos Mensais",
        Mm(PAGE_WIDTH),
        Mm(PAGE_HEIGHT),
        "Página 1",
    );
    let regular = doc.add_builtin_font(BuiltinFont::Helvetica).map_err(pdf_err)?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(pdf_err)?;

    let mut layer = doc.get_page(first_page).get_layer(first_layer);

    // Title block, first page only
    layer.set_fill_color(black());
    layer.use_text(
        "Relatório de Empréstimos Mensais",
        16.0,
        Mm(MARGIN),
        Mm(PAGE_HEIGHT - 25.0),
        &bold,
    );
    layer.use_text(
        format!("Gerado em: {}", generated_at.format("%d/%m/%Y %H:%M")),
        10.0,
        Mm(MARGIN),
        Mm(PAGE_HEIGHT - 32.0),
        &regular,
    );

    let mut y = PAGE_HEIGHT - 42.0;
    draw_header_row(&layer, &bold, y);
    y -= HEADER_ROW_HEIGHT;

    let mut page_number = 1;
    for row in rows {
        if y - BODY_ROW_HEIGHT < MARGIN {
            page_number += 1;
            let (page, layer_index) = doc.add_page(
                Mm(PAGE_WIDTH),
                Mm(PAGE_HEIGHT),
                format!("Página {page_number}"),
            );
            layer = doc.get_page(page).get_layer(layer_index);
            y = PAGE_HEIGHT - MARGIN;
            draw_header_row(&layer, &bold, y);
            y -= HEADER_ROW_HEIGHT;
        }
        draw_body_row(&layer, &regular, y, row);
        y -= BODY_ROW_HEIGHT;
    }

    doc.save_to_bytes().map_err(pdf_err)
}

fn pdf_err(err: impl std::fmt::Display) -> DashboardError {
    DashboardError::Pdf(err.to_string())
}

fn draw_header_row(layer: &PdfLayerReference, bold: &IndirectFontRef, top: f32) {
    let mut x = MARGIN;
    for (title, width) in COLUMNS {
        draw_cell(layer, x, top, width, HEADER_ROW_HEIGHT, header_background());
        layer.set_fill_color(white());
        draw_centered_text(layer, bold, HEADER_FONT_SIZE, title, x, top, width, HEADER_ROW_HEIGHT);
        x += width;
    }
}

fn draw_body_row(layer: &PdfLayerReference, regular: &IndirectFontRef, top: f32, row: &ReportRow) {
    let cells = [
        row.year.to_string(),
        row.month_name.to_string(),
        format_money(row.total),
        format!("{} (Nº {})", format_money(row.largest), row.loan_number),
        row.client.clone(),
        row.account.clone().unwrap_or_else(|| "N/A".to_string()),
    ];

    let mut x = MARGIN;
    for ((_, width), text) in COLUMNS.iter().zip(cells.iter()) {
        draw_cell(layer, x, top, *width, BODY_ROW_HEIGHT, body_background());
        layer.set_fill_color(black());
        draw_centered_text(layer, regular, BODY_FONT_SIZE, text, x, top, *width, BODY_ROW_HEIGHT);
        x += width;
    }
}

/// Filled cell rectangle with a black outline, anchored at its top edge
fn draw_cell(layer: &PdfLayerReference, x: f32, top: f32, width: f32, height: f32, fill: Color) {
    let ring = vec![
        (Point::new(Mm(x), Mm(top)), false),
        (Point::new(Mm(x + width), Mm(top)), false),
        (Point::new(Mm(x + width), Mm(top - height)), false),
        (Point::new(Mm(x), Mm(top - height)), false),
    ];

    layer.set_fill_color(fill);
    layer.set_outline_color(black());
    layer.set_outline_thickness(0.75);
    layer.add_polygon(Polygon {
        rings: vec![ring],
        mode: PaintMode::FillStroke,
        winding_order: WindingOrder::NonZero,
    });
}

fn draw_centered_text(
    layer: &PdfLayerReference,
    font: &IndirectFontRef,
    font_size: f32,
    text: &str,
    x: f32,
    top: f32,
    width: f32,
    height: f32,
) {
    let text_width = approx_text_width_mm(text, font_size);
    let text_x = (x + (width - text_width) / 2.0).max(x + 1.0);
    let baseline = top - height / 2.0 - font_size * 0.35 * PT_TO_MM;
    layer.use_text(text, font_size, Mm(text_x), Mm(baseline), font);
}

const PT_TO_MM: f32 = 0.352_778;

/// Rough Helvetica width estimate, good enough for cell centering
fn approx_text_width_mm(text: &str, font_size: f32) -> f32 {
    text.chars().count() as f32 * font_size * 0.5 * PT_TO_MM
}
