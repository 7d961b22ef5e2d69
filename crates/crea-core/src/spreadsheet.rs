//! `.xlsx` export of the aggregated table.
//!
//! Writes the minimal OOXML package (content types, relationships, workbook,
//! one worksheet, shared strings). Counts are numeric cells.

use crate::error::CreaError;
use crate::model::{AggregatedTable, COLUMNS};
use quick_xml::escape::escape;
use std::collections::HashMap;
use std::fmt::Write as _;
use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

pub const SPREADSHEET_FILENAME: &str = "resultados.xlsx";
pub const SHEET_NAME: &str = "Sheet1";

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/><Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/><Override PartName="/xl/sharedStrings.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sharedStrings+xml"/></Types>"#;

const ROOT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/></Relationships>"#;

const WORKBOOK_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/><Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/sharedStrings" Target="sharedStrings.xml"/></Relationships>"#;

enum Cell {
    Text(String),
    Number(usize),
}

/// Interns strings for `xl/sharedStrings.xml`.
#[derive(Default)]
struct SharedStrings {
    index: HashMap<String, usize>,
    ordered: Vec<String>,
    references: usize,
}

impl SharedStrings {
    fn intern(&mut self, s: &str) -> usize {
        self.references += 1;
        if let Some(&i) = self.index.get(s) {
            return i;
        }
        let i = self.ordered.len();
        self.index.insert(s.to_string(), i);
        self.ordered.push(s.to_string());
        i
    }

    fn to_xml(&self) -> String {
        let mut xml = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
"#,
        );
        let _ = write!(
            xml,
            r#"<sst xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" count="{}" uniqueCount="{}">"#,
            self.references,
            self.ordered.len()
        );
        for s in &self.ordered {
            let _ = write!(xml, r#"<si><t xml:space="preserve">{}</t></si>"#, escape(s.as_str()));
        }
        xml.push_str("</sst>");
        xml
    }
}

/// Build the workbook bytes for `table`: a header row, one row per record
/// and the totals row.
pub fn write_xlsx(table: &AggregatedTable) -> Result<Vec<u8>, CreaError> {
    let mut rows: Vec<Vec<Cell>> = vec![COLUMNS
        .iter()
        .map(|c| Cell::Text(c.to_string()))
        .collect()];
    for row in table.rows() {
        rows.push(vec![
            Cell::Text(row.filename),
            Cell::Text(row.contracted_parties),
            Cell::Number(row.bond_count),
            Cell::Text(row.official_notices),
            Cell::Number(row.notice_count),
        ]);
    }

    let mut strings = SharedStrings::default();
    let sheet = sheet_xml(&rows, &mut strings);

    let workbook = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><sheets><sheet name="{SHEET_NAME}" sheetId="1" r:id="rId1"/></sheets></workbook>"#
    );

    let parts: [(&str, &str); 6] = [
        ("[Content_Types].xml", CONTENT_TYPES),
        ("_rels/.rels", ROOT_RELS),
        ("xl/workbook.xml", &workbook),
        ("xl/_rels/workbook.xml.rels", WORKBOOK_RELS),
        ("xl/worksheets/sheet1.xml", &sheet),
        ("xl/sharedStrings.xml", &strings.to_xml()),
    ];

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    for (name, content) in parts {
        zip.start_file(name, options)
            .map_err(|e| CreaError::Spreadsheet(e.to_string()))?;
        zip.write_all(content.as_bytes())?;
    }
    let cursor = zip
        .finish()
        .map_err(|e| CreaError::Spreadsheet(e.to_string()))?;
    Ok(cursor.into_inner())
}

fn sheet_xml(rows: &[Vec<Cell>], strings: &mut SharedStrings) -> String {
    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData>"#,
    );
    for (r, row) in rows.iter().enumerate() {
        let row_number = r + 1;
        let _ = write!(xml, r#"<row r="{row_number}">"#);
        for (c, cell) in row.iter().enumerate() {
            let reference = format!("{}{row_number}", column_letter(c));
            match cell {
                Cell::Text(s) => {
                    let idx = strings.intern(s);
                    let _ = write!(xml, r#"<c r="{reference}" t="s"><v>{idx}</v></c>"#);
                }
                Cell::Number(n) => {
                    let _ = write!(xml, r#"<c r="{reference}"><v>{n}</v></c>"#);
                }
            }
        }
        xml.push_str("</row>");
    }
    xml.push_str("</sheetData></worksheet>");
    xml
}

/// Column letter for a zero-based index (the table has five columns).
fn column_letter(index: usize) -> char {
    (b'A' + index as u8) as char
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::aggregate;
    use crate::model::DocumentRecord;
    use calamine::{Data, Reader, Xlsx};

    #[test]
    fn test_workbook_contents() {
        let table = aggregate(vec![
            DocumentRecord::new(
                "a & b.pdf",
                vec!["Maria Silva".into(), "Obras <Beta>".into()],
                vec!["123/2024".into()],
            ),
            DocumentRecord::new("vazio.pdf", vec![], vec![]),
        ]);
        let bytes = write_xlsx(&table).unwrap();

        let mut workbook: Xlsx<_> = calamine::open_workbook_from_rs(Cursor::new(bytes)).unwrap();
        let range = workbook.worksheet_range(SHEET_NAME).unwrap();
        assert_eq!(range.get_size(), (4, 5));

        let text = |r: u32, c: u32| match range.get_value((r, c)) {
            Some(Data::String(s)) => s.clone(),
            Some(Data::Empty) | None => String::new(),
            Some(other) => other.to_string(),
        };
        assert_eq!(text(0, 1), "Contratados");
        assert_eq!(text(0, 2), "Vínculos");
        assert_eq!(text(1, 0), "a & b.pdf");
        assert_eq!(text(1, 1), "Maria Silva; Obras <Beta>");
        assert_eq!(range.get_value((1, 2)), Some(&Data::Float(2.0)));
        assert_eq!(text(2, 1), "");
        assert_eq!(text(3, 0), "TOTAL");
        assert_eq!(range.get_value((3, 2)), Some(&Data::Float(2.0)));
        assert_eq!(range.get_value((3, 4)), Some(&Data::Float(1.0)));
    }

    #[test]
    fn test_shared_strings_deduplicated() {
        let mut strings = SharedStrings::default();
        assert_eq!(strings.intern("x"), 0);
        assert_eq!(strings.intern("y"), 1);
        assert_eq!(strings.intern("x"), 0);
        let xml = strings.to_xml();
        assert!(xml.contains(r#"count="3" uniqueCount="2""#));
    }
}
