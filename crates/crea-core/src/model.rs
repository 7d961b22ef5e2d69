use serde::{Deserialize, Serialize};

/// Separator used when a list field is shown as a single cell.
pub const LIST_SEPARATOR: &str = "; ";

/// Filename shown on the synthetic totals row.
pub const TOTAL_LABEL: &str = "TOTAL";

/// Column headers shared by the spreadsheet and the tabular PDF.
pub const COLUMNS: [&str; 5] = ["Arquivo", "Contratados", "Vínculos", "Ofícios", "S.I"];

/// Fields pulled out of a single document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRecord {
    pub filename: String,
    pub contracted_parties: Vec<String>,
    pub bond_count: usize,
    pub official_notices: Vec<String>,
    pub notice_count: usize,
}

impl DocumentRecord {
    /// Build a record; counts are derived from the captured entries.
    ///
    /// Entries holding `;` are split into one entry per part and blank parts
    /// are dropped, so each count equals the number of `"; "`-separated items
    /// in the joined column.
    pub fn new(
        filename: impl Into<String>,
        contracted_parties: Vec<String>,
        official_notices: Vec<String>,
    ) -> Self {
        let contracted_parties = split_entries(contracted_parties);
        let official_notices = split_entries(official_notices);
        DocumentRecord {
            filename: filename.into(),
            bond_count: contracted_parties.len(),
            contracted_parties,
            notice_count: official_notices.len(),
            official_notices,
        }
    }

    pub fn contracted_parties_joined(&self) -> String {
        self.contracted_parties.join(LIST_SEPARATOR)
    }

    pub fn official_notices_joined(&self) -> String {
        self.official_notices.join(LIST_SEPARATOR)
    }
}

fn split_entries(entries: Vec<String>) -> Vec<String> {
    entries
        .iter()
        .flat_map(|entry| entry.split(';'))
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Totals {
    pub bond_count: usize,
    pub notice_count: usize,
}

/// Document records in input order followed by one totals row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregatedTable {
    pub records: Vec<DocumentRecord>,
    pub totals: Totals,
}

impl AggregatedTable {
    /// All rows in display order. The totals row is always last.
    pub fn rows(&self) -> Vec<TableRow> {
        let mut rows: Vec<TableRow> = self.records.iter().map(TableRow::from).collect();
        rows.push(TableRow {
            filename: TOTAL_LABEL.to_string(),
            contracted_parties: String::new(),
            bond_count: self.totals.bond_count,
            official_notices: String::new(),
            notice_count: self.totals.notice_count,
        });
        rows
    }
}

/// One flattened table row, as it appears in exports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableRow {
    pub filename: String,
    pub contracted_parties: String,
    pub bond_count: usize,
    pub official_notices: String,
    pub notice_count: usize,
}

impl TableRow {
    /// Cell strings in column order.
    pub fn cells(&self) -> [String; 5] {
        [
            self.filename.clone(),
            self.contracted_parties.clone(),
            self.bond_count.to_string(),
            self.official_notices.clone(),
            self.notice_count.to_string(),
        ]
    }
}

impl From<&DocumentRecord> for TableRow {
    fn from(record: &DocumentRecord) -> Self {
        TableRow {
            filename: record.filename.clone(),
            contracted_parties: record.contracted_parties_joined(),
            bond_count: record.bond_count,
            official_notices: record.official_notices_joined(),
            notice_count: record.notice_count,
        }
    }
}
