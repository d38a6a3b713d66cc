//! "Did you mean" suggestions for unknown names

use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

/// Best fuzzy match for `query` among `candidates`, if any matches at all
pub fn closest<'a, I>(query: &str, candidates: I) -> Option<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let matcher = SkimMatcherV2::default();
    let mut best: Option<(i64, &str)> = None;

    for candidate in candidates {
        if let Some(score) = matcher.fuzzy_match(candidate, query) {
            // ties keep the earlier (declaration-order) candidate
            if best.map_or(true, |(top, _)| score > top) {
                best = Some((score, candidate));
            }
        }
    }

    best.map(|(_, name)| name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closest_subsequence() {
        let fields = ["exponentformat", "showexponent", "color"];
        assert_eq!(closest("colr", fields), Some("color".to_string()));
        assert_eq!(closest("expfmt", fields), Some("exponentformat".to_string()));
    }

    #[test]
    fn test_no_match() {
        assert_eq!(closest("zzz", ["fill", "show"]), None);
    }
}
