use crate::extraction::PageContent;

/// Join page lines into one text, one line per `\n`.
pub fn join_pages(pages: &[PageContent]) -> String {
    pages
        .iter()
        .flat_map(|p| p.lines.iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Normalize line endings and non-breaking spaces.
///
/// PDF extraction often yields `\r\n`, lone `\r` or U+00A0 between a label
/// and its delimiter, which would otherwise defeat the label patterns.
pub fn normalize_text(text: &str) -> String {
    text.replace("\r\n", "\n")
        .replace('\r', "\n")
        .replace('\u{00A0}', " ")
}

/// Lowercase and strip Portuguese diacritics, for loose comparisons.
pub fn fold_accents(s: &str) -> String {
    s.trim()
        .chars()
        .flat_map(char::to_lowercase)
        .map(|c| match c {
            'á' | 'à' | 'â' | 'ã' | 'ä' => 'a',
            'é' | 'è' | 'ê' | 'ë' => 'e',
            'í' | 'ì' | 'î' | 'ï' => 'i',
            'ó' | 'ò' | 'ô' | 'õ' | 'ö' => 'o',
            'ú' | 'ù' | 'û' | 'ü' => 'u',
            'ç' => 'c',
            other => other,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_line_endings() {
        assert_eq!(normalize_text("a\r\nb\rc"), "a\nb\nc");
        assert_eq!(normalize_text("CONTRATADO\u{00A0}: X"), "CONTRATADO : X");
    }

    #[test]
    fn test_fold_accents() {
        assert_eq!(fold_accents("  Niterói "), "niteroi");
        assert_eq!(fold_accents("SÃO GONÇALO"), "sao goncalo");
    }
}
