use crate::model::{AggregatedTable, DocumentRecord, Totals};

/// Combine per-document records into a table with a totals row.
///
/// Order is preserved; no record is dropped or merged.
pub fn aggregate(records: Vec<DocumentRecord>) -> AggregatedTable {
    let totals = records.iter().fold(Totals::default(), |acc, r| Totals {
        bond_count: acc.bond_count + r.bond_count,
        notice_count: acc.notice_count + r.notice_count,
    });
    AggregatedTable { records, totals }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, bonds: usize, notices: usize) -> DocumentRecord {
        DocumentRecord::new(
            name,
            (0..bonds).map(|i| format!("Parte {i}")).collect(),
            (0..notices).map(|i| format!("{i}/2024")).collect(),
        )
    }

    #[test]
    fn test_totals_are_sums() {
        let table = aggregate(vec![record("a.pdf", 2, 1), record("b.pdf", 0, 3)]);
        assert_eq!(table.totals.bond_count, 2);
        assert_eq!(table.totals.notice_count, 4);
    }

    #[test]
    fn test_order_and_duplicates_preserved() {
        let table = aggregate(vec![
            record("z.pdf", 1, 0),
            record("a.pdf", 1, 0),
            record("z.pdf", 1, 0),
        ]);
        let names: Vec<String> = table.rows().into_iter().map(|r| r.filename).collect();
        assert_eq!(names, vec!["z.pdf", "a.pdf", "z.pdf", "TOTAL"]);
        assert_eq!(table.totals.bond_count, 3);
    }

    #[test]
    fn test_empty_batch_has_only_total() {
        let table = aggregate(vec![]);
        let rows = table.rows();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].filename, "TOTAL");
        assert_eq!(rows[0].bond_count, 0);
        assert_eq!(rows[0].notice_count, 0);
    }
}
