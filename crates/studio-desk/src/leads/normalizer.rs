/// Canonical form of a spreadsheet header: invisible characters removed,
/// whitespace collapsed, lower-cased.
pub(crate) fn normalize_header(value: &str) -> String {
    let cleaned = value.replace(['\u{feff}', '\u{200b}', '\u{a0}'], " ");
    let collapsed = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed.to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_bom_and_collapses_whitespace() {
        assert_eq!(
            normalize_header("\u{feff}  Company   Name For\tEmails "),
            "company name for emails"
        );
        assert_eq!(normalize_header("E-MAILADRES"), "e-mailadres");
        assert_eq!(normalize_header("   "), "");
    }
}
