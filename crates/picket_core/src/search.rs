//! Filter-term matching.
//!
//! The containment rule is deliberately order-independent: the *shorter* of
//! the two strings is searched for inside the *longer* one, case-insensitively.
//! Typing more text than a candidate's full display value therefore still
//! matches when the candidate appears inside the typed term, which keeps the
//! picker forgiving while a user is mid-edit.

/// Values that can decide for themselves whether a filter term matches.
///
/// Implement this when options carry richer data than their display text
/// (tags, alternate spellings, identifiers). Pickers built with
/// [`OptionPicker::searchable`](crate::OptionPicker::searchable) delegate
/// matching to this trait; pickers built from a display function fall back to
/// [`term_matches`] over the display text.
pub trait SearchMatch {
    /// Returns whether this value should appear for a search with `term`.
    fn matches(&self, term: &str) -> bool;
}

impl SearchMatch for String {
    fn matches(&self, term: &str) -> bool {
        term_matches(self, term)
    }
}

impl SearchMatch for &str {
    fn matches(&self, term: &str) -> bool {
        term_matches(self, term)
    }
}

/// The default match rule: empty terms match everything; otherwise the
/// shorter of `candidate` and `term` must appear, case-insensitively, inside
/// the longer one.
///
/// Lengths are compared in characters, not bytes, so multi-byte candidates
/// pick the same "shorter" string a user would.
pub fn term_matches(candidate: &str, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }

    let (shorter, longer) = if candidate.chars().count() > term.chars().count() {
        (term, candidate)
    } else {
        (candidate, term)
    };

    longer.to_lowercase().contains(&shorter.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_term_matches_everything() {
        assert!(term_matches("Thirteen", ""));
        assert!(term_matches("", ""));
    }

    #[test]
    fn test_case_insensitive_substring() {
        assert!(term_matches("Thirteen", "thir"));
        assert!(term_matches("Thirteen", "TEEN"));
        assert!(!term_matches("Thirteen", "fourt"));
    }

    #[test]
    fn test_shorter_in_longer_is_order_independent() {
        // The candidate is shorter than the term, so the candidate is the
        // needle: "one" is contained in "st-one-x".
        assert!(term_matches("One", "st-one-x"));
        assert!(!term_matches("Two", "st-one-x"));
    }

    #[test]
    fn test_equal_lengths_search_term_for_candidate() {
        assert!(term_matches("abc", "ABC"));
        assert!(!term_matches("abc", "abd"));
    }

    #[test]
    fn test_searchable_strings() {
        assert!("United States".to_string().matches("states"));
        // For a `&str` receiver the inherent `str::matches` wins over the
        // trait method, so call through the trait.
        assert!(SearchMatch::matches(&"us", ""));
        assert!(!SearchMatch::matches(&"us", "uk"));
    }
}
