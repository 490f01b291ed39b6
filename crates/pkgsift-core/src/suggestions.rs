//! Field name suggestions
//!
//! When a field scope names a field the catalog does not carry, the error
//! points at the closest known field by Levenshtein distance.

/// Maximum Levenshtein distance to consider for suggestions
const MAX_SUGGESTION_DISTANCE: usize = 3;

/// Suggestion result with its edit distance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    /// The suggested correction
    pub text: String,
    /// Levenshtein distance (lower = better match)
    pub distance: usize,
}

/// Find closest matches from a list of candidates
pub fn find_closest_matches<'a, I>(input: &str, candidates: I, max_results: usize) -> Vec<Suggestion>
where
    I: IntoIterator<Item = &'a str>,
{
    let input = input.to_lowercase();
    let mut suggestions: Vec<Suggestion> = candidates
        .into_iter()
        .filter_map(|candidate| {
            let distance = strsim::levenshtein(&input, &candidate.to_lowercase());
            (distance <= MAX_SUGGESTION_DISTANCE && distance > 0).then(|| Suggestion {
                text: candidate.to_string(),
                distance,
            })
        })
        .collect();

    // Stable sort keeps catalog field order among equal distances
    suggestions.sort_by_key(|s| s.distance);
    suggestions.truncate(max_results);
    suggestions
}

/// Suggest a correction for an unknown field scope
pub fn suggest_field<'a, I>(field: &str, available: I) -> Option<String>
where
    I: IntoIterator<Item = &'a str> + Clone,
{
    let matches = find_closest_matches(field, available.clone(), 2);

    if !matches.is_empty() {
        let names: Vec<String> = matches.iter().map(|s| format!("`{}`", s.text)).collect();
        return Some(format!("Did you mean {}?", names.join(" or ")));
    }

    let all: Vec<&str> = available.into_iter().collect();
    if all.is_empty() {
        None
    } else {
        Some(format!("Available fields: {}", all.join(", ")))
    }
}
