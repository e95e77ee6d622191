//! Agent name normalization.
//!
//! Every name field from every source passes through [`normalize_name`]
//! before any comparison, so that `"  john SMITH "` and `"John Smith"` are
//! the same string.

/// Cell values spreadsheet exports write for "no value".
const MISSING_PLACEHOLDERS: [&str; 4] = ["nan", "none", "null", "n/a"];

/// Canonicalizes a free-text agent name.
///
/// Leading and trailing whitespace is removed and each word is title-cased:
/// its first letter upper-cased and the rest lower-cased. A word starts after
/// any non-alphabetic character, so apostrophes and hyphens begin new words.
/// Internal whitespace is kept as supplied.
///
/// Empty cells and missing-value placeholders (`nan`, `none`, `null`, `n/a`)
/// normalize to the empty string, which never matches any other name.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::normalize_name;
///
/// assert_eq!(normalize_name("  john SMITH "), "John Smith");
/// assert_eq!(normalize_name("mary-jane o'brien"), "Mary-Jane O'Brien");
/// assert_eq!(normalize_name("NaN"), "");
/// ```
pub fn normalize_name(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty()
        || MISSING_PLACEHOLDERS
            .iter()
            .any(|placeholder| trimmed.eq_ignore_ascii_case(placeholder))
    {
        return String::new();
    }

    let mut normalized = String::with_capacity(trimmed.len());
    let mut in_word = false;
    for c in trimmed.chars() {
        if c.is_alphabetic() {
            if in_word {
                normalized.extend(c.to_lowercase());
            } else {
                normalized.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            normalized.push(c);
            in_word = false;
        }
    }
    normalized
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trims_and_title_cases() {
        assert_eq!(normalize_name("john smith"), "John Smith");
        assert_eq!(normalize_name("  JOHN SMITH\t"), "John Smith");
        assert_eq!(normalize_name("jOhN sMiTh"), "John Smith");
    }

    #[test]
    fn test_internal_whitespace_is_preserved() {
        assert_eq!(normalize_name("john  smith"), "John  Smith");
    }

    #[test]
    fn test_punctuation_starts_a_new_word() {
        assert_eq!(normalize_name("o'NEIL"), "O'Neil");
        assert_eq!(normalize_name("anne-marie"), "Anne-Marie");
    }

    #[test]
    fn test_digits_start_a_new_word() {
        assert_eq!(normalize_name("agent 7b"), "Agent 7B");
    }

    #[test]
    fn test_empty_and_whitespace_normalize_to_empty() {
        assert_eq!(normalize_name(""), "");
        assert_eq!(normalize_name("   "), "");
    }

    #[test]
    fn test_missing_placeholders_normalize_to_empty() {
        assert_eq!(normalize_name("nan"), "");
        assert_eq!(normalize_name("NaN"), "");
        assert_eq!(normalize_name(" None "), "");
        assert_eq!(normalize_name("NULL"), "");
        assert_eq!(normalize_name("n/a"), "");
    }

    #[test]
    fn test_normalization_is_idempotent() {
        let once = normalize_name("  mary-jane o'brien ");
        assert_eq!(normalize_name(&once), once);
    }

    #[test]
    fn test_non_ascii_letters() {
        assert_eq!(normalize_name("josé ÁLVAREZ"), "José Álvarez");
    }
}
