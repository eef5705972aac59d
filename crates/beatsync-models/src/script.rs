//! Script length policy.

/// Maximum number of words kept in a generated script.
pub const MAX_SCRIPT_WORDS: usize = 50;

/// Truncate a generated script to [`MAX_SCRIPT_WORDS`] whole words, appending
/// an ellipsis marker when anything was cut. Scripts within the limit are
/// returned unchanged.
pub fn truncate_script(raw: &str) -> String {
    let words: Vec<&str> = raw.split_whitespace().collect();
    if words.len() <= MAX_SCRIPT_WORDS {
        raw.to_string()
    } else {
        format!("{}...", words[..MAX_SCRIPT_WORDS].join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(n: usize) -> String {
        (0..n).map(|i| format!("w{i}")).collect::<Vec<_>>().join(" ")
    }

    #[test]
    fn test_short_script_is_unchanged() {
        let raw = "A short script  with odd   spacing.";
        assert_eq!(truncate_script(raw), raw);
    }

    #[test]
    fn test_exactly_fifty_words_is_unchanged() {
        let raw = words(50);
        assert_eq!(truncate_script(&raw), raw);
    }

    #[test]
    fn test_long_script_is_cut_with_ellipsis() {
        let raw = words(80);
        let out = truncate_script(&raw);

        assert!(out.ends_with("..."));
        let trimmed = out.trim_end_matches("...");
        assert_eq!(trimmed.split_whitespace().count(), MAX_SCRIPT_WORDS);
    }

    #[test]
    fn test_truncation_is_a_word_prefix() {
        let raw = words(120);
        let out = truncate_script(&raw);

        let original: Vec<&str> = raw.split_whitespace().collect();
        let kept: Vec<&str> = out.trim_end_matches("...").split_whitespace().collect();
        assert_eq!(&original[..MAX_SCRIPT_WORDS], kept.as_slice());
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(truncate_script(""), "");
    }
}
