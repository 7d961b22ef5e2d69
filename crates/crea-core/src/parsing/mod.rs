pub mod normalize;

use crate::extraction::PageContent;
use crate::model::DocumentRecord;
use crate::rules::schema::TargetField;
use crate::rules::RuleSet;

/// Apply every rule of `ruleset` to `text` and build the document's record.
///
/// Rules feeding the same field are concatenated in ruleset order, so with the
/// default rules all responsible technicians come before contracted parties.
pub fn extract_record(filename: &str, text: &str, ruleset: &RuleSet) -> DocumentRecord {
    let text = normalize::normalize_text(text);

    let mut parties = Vec::new();
    let mut notices = Vec::new();

    for rule in &ruleset.rules {
        let values = rule.captures(&text);
        log::debug!("{filename}: rule '{}' matched {} value(s)", rule.name, values.len());
        match rule.field {
            TargetField::Bonds => parties.extend(values),
            TargetField::Notices => notices.extend(values),
        }
    }

    DocumentRecord::new(filename, parties, notices)
}

/// Extract a record from already split pages.
pub fn extract_record_from_pages(
    filename: &str,
    pages: &[PageContent],
    ruleset: &RuleSet,
) -> DocumentRecord {
    extract_record(filename, &normalize::join_pages(pages), ruleset)
}
