use crate::error::CreaError;
use crate::model::{AggregatedTable, COLUMNS};
use crate::pdf::font::FontStyle;
use crate::pdf::{Advance, Align, PageNumberFooter, PdfCanvas};

pub const TITLE: &str = "RESULTADOS VÍNCULOS S.I";

/// Column widths in mm, in `COLUMNS` order.
pub const COLUMN_WIDTHS: [f32; 5] = [40.0, 50.0, 20.0, 50.0, 20.0];

const ROW_HEIGHT: f32 = 10.0;

/// Render the aggregated table as a paginated A4 report.
///
/// Rows keep the table order with the totals row last. Cell contents are
/// printed as-is at fixed widths; long text overflows its cell.
pub fn render_table(table: &AggregatedTable) -> Result<Vec<u8>, CreaError> {
    let mut canvas = PdfCanvas::new().with_decorator(Box::new(PageNumberFooter));
    canvas.add_page();

    canvas.set_font(FontStyle::Bold, 16.0);
    canvas.cell(0.0, 10.0, TITLE, false, Advance::NextLine, Align::Center);
    canvas.ln(Some(10.0));

    canvas.set_font(FontStyle::Regular, 10.0);
    header_row(&mut canvas);

    for row in table.rows() {
        if !canvas.fits(ROW_HEIGHT) {
            canvas.add_page();
            header_row(&mut canvas);
        }
        for (cell, width) in row.cells().iter().zip(COLUMN_WIDTHS) {
            canvas.cell(width, ROW_HEIGHT, cell, true, Advance::Right, Align::Center);
        }
        canvas.ln(None);
    }

    canvas.ln(Some(10.0));
    let totals = table.totals;
    canvas.cell(
        0.0,
        10.0,
        &format!("Total de Vínculos: {}", totals.bond_count),
        false,
        Advance::NextLine,
        Align::Left,
    );
    canvas.cell(
        0.0,
        10.0,
        &format!("Total de S.I: {}", totals.notice_count),
        false,
        Advance::NextLine,
        Align::Left,
    );

    canvas.finish()
}

fn header_row(canvas: &mut PdfCanvas) {
    for (header, width) in COLUMNS.iter().zip(COLUMN_WIDTHS) {
        canvas.cell(width, ROW_HEIGHT, header, true, Advance::Right, Align::Center);
    }
    canvas.ln(None);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::aggregate;
    use crate::model::DocumentRecord;
    use crate::pdf::page_texts;

    fn sample_table(n: usize) -> AggregatedTable {
        aggregate(
            (0..n)
                .map(|i| {
                    DocumentRecord::new(
                        format!("doc{i}.pdf"),
                        vec![format!("Parte {i}")],
                        if i % 2 == 0 {
                            vec![format!("{i}/2024")]
                        } else {
                            vec![]
                        },
                    )
                })
                .collect(),
        )
    }

    #[test]
    fn test_layout_of_small_table() {
        let bytes = render_table(&sample_table(1)).unwrap();
        let pages = page_texts(&bytes).unwrap();
        assert_eq!(pages.len(), 1);
        let expected: Vec<&str> = vec![
            "RESULTADOS VÍNCULOS S.I",
            "Arquivo",
            "Contratados",
            "Vínculos",
            "Ofícios",
            "S.I",
            "doc0.pdf",
            "Parte 0",
            "1",
            "0/2024",
            "1",
            "TOTAL",
            "1",
            "1",
            "Total de Vínculos: 1",
            "Total de S.I: 1",
            "Página 1",
        ];
        assert_eq!(pages[0], expected);
    }

    #[test]
    fn test_long_table_repeats_header() {
        let bytes = render_table(&sample_table(40)).unwrap();
        let pages = page_texts(&bytes).unwrap();
        assert!(pages.len() >= 2);
        for page in &pages[1..] {
            assert_eq!(&page[..5], &COLUMNS);
        }
        let all: Vec<&String> = pages.iter().flatten().collect();
        let filenames: Vec<&String> = all
            .iter()
            .copied()
            .filter(|t| t.starts_with("doc") || t.as_str() == "TOTAL")
            .collect();
        assert_eq!(filenames.len(), 41);
        assert_eq!(filenames.last().map(|s| s.as_str()), Some("TOTAL"));
        assert_eq!(filenames[0], "doc0.pdf");
        assert_eq!(filenames[39], "doc39.pdf");
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let table = sample_table(3);
        assert_eq!(render_table(&table).unwrap(), render_table(&table).unwrap());
    }
}
