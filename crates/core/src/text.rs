//! Display text for a node: its label joined with its annotation

/// Separator placed between a node's label and its annotation
pub const TEXT_SEPARATOR: &str = "，";

/// Combine a node's label and annotation into one display string
///
/// Returns `"{text}，{note}"` when both are present, otherwise whichever one
/// is non-empty (or an empty string).
pub fn join_text(text: &str, note: &str) -> String {
    match (text.is_empty(), note.is_empty()) {
        (false, false) => format!("{text}{TEXT_SEPARATOR}{note}"),
        (false, true) => text.to_string(),
        (true, false) => note.to_string(),
        (true, true) => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_text_both_empty() {
        assert_eq!(join_text("", ""), "");
    }

    #[test]
    fn test_join_text_only_text() {
        assert_eq!(join_text("Q", ""), "Q");
    }

    #[test]
    fn test_join_text_only_note() {
        assert_eq!(join_text("", "N"), "N");
    }

    #[test]
    fn test_join_text_both_present_uses_full_width_comma() {
        assert_eq!(join_text("Q", "N"), "Q，N");
    }

    #[test]
    fn test_join_text_keeps_whitespace_verbatim() {
        assert_eq!(join_text(" Q ", " N"), " Q ， N");
    }
}
