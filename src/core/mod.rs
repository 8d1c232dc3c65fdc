//! Core types shared across wikirender
//!
//! - [`error`] - the crate-level [`WikiError`] and user-facing [`ErrorContext`]
//! - name suggestion helpers used by the plugin registry and variable expander

pub mod error;

pub use error::{ErrorContext, WikiError, user_friendly_error};

use strsim::levenshtein;

/// Maximum allowed Levenshtein distance as a percentage of target length for suggestions.
const SIMILARITY_THRESHOLD_PERCENT: usize = 50;

/// Maximum number of suggestions returned by [`find_similar`].
const MAX_SUGGESTIONS: usize = 3;

/// Find names close to `target`, closest first.
///
/// Comparison is case-insensitive. At most three names within half the
/// target's length in edit distance are returned.
pub fn find_similar<'a, I>(target: &str, available: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let target_lower = target.to_lowercase();
    let threshold = (target.chars().count() * SIMILARITY_THRESHOLD_PERCENT / 100).max(1);

    let mut scored: Vec<(&str, usize)> = available
        .into_iter()
        .map(|name| (name, levenshtein(&target_lower, &name.to_lowercase())))
        .filter(|(_, distance)| *distance <= threshold)
        .collect();

    scored.sort_by(|(a_name, a_dist), (b_name, b_dist)| a_dist.cmp(b_dist).then(a_name.cmp(b_name)));

    scored.into_iter().take(MAX_SUGGESTIONS).map(|(name, _)| name.to_string()).collect()
}

/// Render suggestions as a trailing `" (did you mean ...?)"` hint, or nothing.
pub(crate) fn did_you_mean(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else {
        let quoted: Vec<String> = suggestions.iter().map(|s| format!("'{s}'")).collect();
        format!(" (did you mean {}?)", quoted.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_similar_orders_by_distance() {
        let names = ["Counter", "CurrentTime", "Variable"];
        assert_eq!(find_similar("Countr", names), vec!["Counter"]);
        assert_eq!(find_similar("counter", names), vec!["Counter"]);
        assert!(find_similar("Zzzzzz", names).is_empty());
    }

    #[test]
    fn test_did_you_mean_formatting() {
        assert_eq!(did_you_mean(&[]), "");
        assert_eq!(
            did_you_mean(&["a".to_string(), "b".to_string()]),
            " (did you mean 'a', 'b'?)"
        );
    }
}
