//! Best-effort free-text description extraction.

use regex::Regex;
use std::sync::LazyLock;

static DESCRIPTION_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        // (Transfer Withdrawal), (โอนเงิน) ...
        r"(?i)\(([^)]*(?:Transfer|Withdrawal|Deposit|โอน|ถอน|ฝาก)[^)]*)\)",
        r"รายการ:([^\n\r]+)",
        r"หมายเหตุ:([^\n\r]+)",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("invalid description regex"))
    .collect()
});

/// Extract a description from the whole message, independent of which rule
/// matched its header. First non-empty hit wins; no hit yields `""`.
pub fn extract_description(message: &str) -> String {
    DESCRIPTION_PATTERNS
        .iter()
        .filter_map(|re| re.captures(message))
        .filter_map(|caps| caps.get(1).map(|m| m.as_str().trim()))
        .find(|s| !s.is_empty())
        .unwrap_or("")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_description_patterns_compile() {
        assert_eq!(DESCRIPTION_PATTERNS.len(), 3);
    }

    #[test]
    fn test_parenthesized_keyword_clause() {
        let msg = "Main Account(xxx-x-12345-x) withdraw ฿1,000.00 (Transfer Withdrawal)";
        assert_eq!(extract_description(msg), "Transfer Withdrawal");
    }

    #[test]
    fn test_account_parentheses_are_not_descriptions() {
        let msg = "บัญชีออมทรัพย์(111-2-33333-4) ฝาก ฿2,500.50";
        assert_eq!(extract_description(msg), "");
    }

    #[test]
    fn test_keyword_match_is_case_insensitive() {
        assert_eq!(extract_description("x ( cash DEPOSIT at ATM )"), "cash DEPOSIT at ATM");
    }

    #[test]
    fn test_thai_labels() {
        assert_eq!(extract_description("BAY Account(1) รับเงิน ฿5\nรายการ: ค่าอาหาร \nx"), "ค่าอาหาร");
        assert_eq!(extract_description("TTB Account(1) IN ฿5\nหมายเหตุ: คืนเงิน"), "คืนเงิน");
    }

    #[test]
    fn test_parenthesized_clause_beats_labels() {
        let msg = "Main Account(1) withdraw ฿10.00 (Transfer Withdrawal)\nรายการ: ค่าเช่า";
        assert_eq!(extract_description(msg), "Transfer Withdrawal");
    }

    #[test]
    fn test_label_order() {
        let msg = "หมายเหตุ: second\nรายการ: first";
        assert_eq!(extract_description(msg), "first");
    }

    #[test]
    fn test_blank_match_falls_through() {
        let msg = "( Deposit )\nรายการ:   \nหมายเหตุ: note";
        assert_eq!(extract_description(msg), "Deposit");
        assert_eq!(extract_description("รายการ:   \nหมายเหตุ: note"), "note");
    }
}
