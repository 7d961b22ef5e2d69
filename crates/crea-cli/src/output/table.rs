use crea_core::cep::Address;
use crea_core::model::COLUMNS;
use crea_core::BatchResult;

pub fn print_batch(result: &BatchResult) {
    println!("{}", format_batch(result));
}

/// Plain-text table with one line per document and the TOTAL line last.
pub fn format_batch(result: &BatchResult) -> String {
    let rows: Vec<[String; 5]> = result.table.rows().iter().map(|r| r.cells()).collect();

    let mut widths = COLUMNS.map(|c| c.chars().count());
    for cells in &rows {
        for (w, cell) in widths.iter_mut().zip(cells) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    out.push_str(&format_line(&COLUMNS.map(String::from), &widths));
    out.push('\n');
    out.push_str(&format!(
        "  {}\n",
        "-".repeat(widths.iter().sum::<usize>() + 2 * (widths.len() - 1))
    ));
    for cells in &rows {
        out.push_str(&format_line(cells, &widths));
        out.push('\n');
    }

    if !result.skipped.is_empty() {
        out.push_str(&format!("\n  {} document(s) skipped:\n", result.skipped.len()));
        for s in &result.skipped {
            out.push_str(&format!("    {}: {}\n", s.filename, s.reason));
        }
    }
    if !result.duplicate_filenames.is_empty() {
        out.push_str(&format!(
            "\n  Repeated filenames: {}\n",
            result.duplicate_filenames.join(", ")
        ));
    }
    out
}

fn format_line(cells: &[String; 5], widths: &[usize; 5]) -> String {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, &w)| {
            let pad = w.saturating_sub(cell.chars().count());
            format!("{cell}{}", " ".repeat(pad))
        })
        .collect();
    format!("  {}", padded.join("  ").trim_end())
}

pub fn print_address(address: &Address) {
    println!("  CEP         {}", address.cep);
    println!("  Logradouro  {}", address.street);
    println!("  Bairro      {}", address.neighborhood);
    println!("  Município   {}", address.city);
    println!("  UF          {}", address.state);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crea_core::aggregate::aggregate;
    use crea_core::model::DocumentRecord;
    use crea_core::SkippedDocument;

    #[test]
    fn test_format_batch_aligns_columns_and_lists_skips() {
        let result = BatchResult {
            table: aggregate(vec![DocumentRecord::new(
                "a.pdf",
                vec!["Maria Silva".into()],
                vec!["123/2024".into()],
            )]),
            skipped: vec![SkippedDocument {
                filename: "scan.pdf".into(),
                reason: "no text".into(),
            }],
            duplicate_filenames: vec![],
        };
        let text = format_batch(&result);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "  Arquivo  Contratados  Vínculos  Ofícios   S.I");
        assert_eq!(lines[2], "  a.pdf    Maria Silva  1         123/2024  1");
        assert_eq!(lines[3], "  TOTAL                 1                   1");
        assert!(text.contains("scan.pdf: no text"));
    }
}
