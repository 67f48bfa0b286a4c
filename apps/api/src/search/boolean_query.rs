#![allow(dead_code)]

//! Boolean Query Filter — local text matching over scraped profile summaries.
//!
//! Query language, in precedence order:
//! 1. `"exact phrase"` must appear (case-insensitive substring). All phrases are mandatory.
//! 2. `NOT term` / `NOT "a phrase"` rejects any text containing the term.
//! 3. Remaining bare words are OR-ed; with no bare words this clause passes.
//! 4. An empty query matches everything.
//!
//! Upper-case `AND` / `OR` are LinkedIn-style connectors, not search terms, and a `NOT`
//! directly before one is dropped. `NOT ""` negates nothing. An unterminated quote is an
//! ordinary character of the word it starts. Parsing never fails.

use serde::Serialize;
use tracing::info;

use crate::models::profile::Profile;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Phrase(String),
    Word(String),
    /// `""`: contributes no term, but still occupies the slot after a `NOT`.
    EmptyPhrase,
}

impl Token {
    fn is_connector(&self) -> bool {
        matches!(self, Token::Word(w) if w == "AND" || w == "OR")
    }
}

fn tokenize(raw: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut rest = raw.trim_start();

    while !rest.is_empty() {
        if let Some(after_quote) = rest.strip_prefix('"') {
            if let Some(end) = after_quote.find('"') {
                let phrase = after_quote[..end].trim();
                tokens.push(if phrase.is_empty() {
                    Token::EmptyPhrase
                } else {
                    Token::Phrase(phrase.to_string())
                });
                rest = after_quote[end + 1..].trim_start();
                continue;
            }
            // Unterminated: fall through and read the quote as part of a bare word.
        }

        let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
        tokens.push(Token::Word(rest[..end].to_string()));
        rest = rest[end..].trim_start();
    }

    tokens
}

/// A parsed query. All terms are stored lower-cased.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BooleanQuery {
    required_phrases: Vec<String>,
    excluded_terms: Vec<String>,
    any_terms: Vec<String>,
}

impl BooleanQuery {
    pub fn parse(raw: &str) -> Self {
        let tokens = tokenize(raw);
        let mut query = BooleanQuery::default();
        let mut i = 0;

        while i < tokens.len() {
            match &tokens[i] {
                Token::Word(w) if w.eq_ignore_ascii_case("NOT") && i + 1 < tokens.len() => {
                    match &tokens[i + 1] {
                        // `NOT AND x`: the NOT has nothing to negate; the connector is read next.
                        next if next.is_connector() => {}
                        Token::Phrase(term) | Token::Word(term) => {
                            query.excluded_terms.push(term.to_lowercase());
                            i += 1;
                        }
                        Token::EmptyPhrase => i += 1,
                    }
                    i += 1;
                    continue;
                }
                token if token.is_connector() => {}
                Token::Word(w) => query.any_terms.push(w.to_lowercase()),
                Token::Phrase(p) => query.required_phrases.push(p.to_lowercase()),
                Token::EmptyPhrase => {}
            }
            i += 1;
        }

        query
    }

    /// True when the query places no constraint at all.
    pub fn is_empty(&self) -> bool {
        self.required_phrases.is_empty() && self.excluded_terms.is_empty() && self.any_terms.is_empty()
    }

    pub fn required_phrases(&self) -> &[String] {
        &self.required_phrases
    }

    pub fn excluded_terms(&self) -> &[String] {
        &self.excluded_terms
    }

    pub fn any_terms(&self) -> &[String] {
        &self.any_terms
    }

    pub fn matches(&self, text: &str) -> bool {
        if self.is_empty() {
            return true;
        }
        let text = text.to_lowercase();

        let phrases_present = self
            .required_phrases
            .iter()
            .all(|p| text.contains(p.as_str()));
        let none_excluded = !self
            .excluded_terms
            .iter()
            .any(|t| text.contains(t.as_str()));
        let any_present =
            self.any_terms.is_empty() || self.any_terms.iter().any(|t| text.contains(t.as_str()));

        phrases_present && none_excluded && any_present
    }
}

/// Parses `raw` and matches it against `text` in one step.
pub fn matches_query(raw: &str, text: &str) -> bool {
    BooleanQuery::parse(raw).matches(text)
}

/// Result of filtering a profile list.
#[derive(Debug, Clone, Serialize)]
pub struct FilterOutcome {
    pub profiles: Vec<Profile>,
    pub excluded_count: usize,
}

/// Keeps the profiles whose searchable text matches `raw`, preserving input order.
pub fn filter_profiles(profiles: Vec<Profile>, raw: &str) -> FilterOutcome {
    let query = BooleanQuery::parse(raw);
    let total = profiles.len();

    if query.is_empty() {
        return FilterOutcome {
            profiles,
            excluded_count: 0,
        };
    }

    let kept: Vec<Profile> = profiles
        .into_iter()
        .filter(|p| query.matches(&p.searchable_text()))
        .collect();
    let excluded_count = total - kept.len();

    info!(
        "Boolean filter: {} -> {} profiles (phrases={:?}, excluded={:?}, any={:?})",
        total,
        kept.len(),
        query.required_phrases,
        query.excluded_terms,
        query.any_terms
    );

    FilterOutcome {
        profiles: kept,
        excluded_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE_QUERY: &str = r#""brand manager" AND marketing NOT intern"#;

    #[test]
    fn test_example_query_matches_brand_manager() {
        assert!(matches_query(
            EXAMPLE_QUERY,
            "Senior Brand Manager at Acme, marketing lead"
        ));
    }

    #[test]
    fn test_example_query_rejects_intern() {
        assert!(!matches_query(EXAMPLE_QUERY, "Marketing intern at Acme"));
        // NOT wins even when every positive clause is satisfied.
        assert!(!matches_query(
            EXAMPLE_QUERY,
            "Brand Manager, marketing — former intern"
        ));
    }

    #[test]
    fn test_example_query_parses_into_three_clauses() {
        let query = BooleanQuery::parse(EXAMPLE_QUERY);
        assert_eq!(query.required_phrases(), ["brand manager"]);
        assert_eq!(query.excluded_terms(), ["intern"]);
        assert_eq!(query.any_terms(), ["marketing"]);
    }

    #[test]
    fn test_empty_and_whitespace_query_matches_everything() {
        assert!(matches_query("", "anything"));
        assert!(matches_query("   \t\n", ""));
        assert!(BooleanQuery::parse("  ").is_empty());
    }

    #[test]
    fn test_phrase_only_query_requires_every_phrase() {
        let query = r#""head of growth" "series b""#;
        assert!(matches_query(query, "Head of Growth at a Series B fintech"));
        assert!(!matches_query(query, "Head of Growth at a seed-stage fintech"));
        assert!(!matches_query(query, "Growth lead, Series B"));
    }

    #[test]
    fn test_phrase_match_is_exact_substring_not_word_bag() {
        assert!(!matches_query(r#""brand manager""#, "Manager of brand partnerships"));
    }

    #[test]
    fn test_not_and_phrases_without_bare_words_pass_vacuously() {
        let query = r#""product designer" NOT agency"#;
        assert!(matches_query(query, "Senior Product Designer at Figma"));
        assert!(!matches_query(query, "Product Designer at a design agency"));
        assert!(!matches_query(query, "Senior UX researcher"));
    }

    #[test]
    fn test_not_only_query_matches_anything_not_excluded() {
        assert!(matches_query("NOT recruiter", "CTO at Acme"));
        assert!(!matches_query("NOT recruiter", "Technical Recruiter"));
    }

    #[test]
    fn test_not_matches_partial_words_case_insensitively() {
        assert!(!matches_query("engineer NOT intern", "Engineering Internship program"));
        assert!(!matches_query("engineer not intern", "Software engineer intern"));
    }

    #[test]
    fn test_not_applies_to_quoted_phrase() {
        let query = r#"designer NOT "graphic designer""#;
        assert!(matches_query(query, "Product designer"));
        assert!(!matches_query(query, "Freelance graphic designer"));
    }

    #[test]
    fn test_bare_words_are_or_matched() {
        assert!(matches_query("cfo controller", "Financial Controller"));
        assert!(matches_query("cfo OR controller", "CFO at Acme"));
        assert!(!matches_query("cfo controller", "Head of Sales"));
    }

    #[test]
    fn test_upper_case_connectors_are_not_search_terms() {
        let query = BooleanQuery::parse("founder AND OR ceo");
        assert_eq!(query.any_terms(), ["founder", "ceo"]);
        // Lower-case "and" is an ordinary word.
        assert_eq!(BooleanQuery::parse("and").any_terms(), ["and"]);
    }

    #[test]
    fn test_unterminated_quote_is_literal() {
        let query = BooleanQuery::parse(r#""brand manager"#);
        assert!(query.required_phrases().is_empty());
        assert_eq!(query.any_terms(), ["\"brand", "manager"]);
        assert!(matches_query(r#""brand manager"#, "Store manager"));
        assert!(!matches_query(r#""brand"#, "Brand lead"));
    }

    #[test]
    fn test_trailing_not_is_a_bare_word() {
        let query = BooleanQuery::parse("marketing NOT");
        assert!(query.excluded_terms().is_empty());
        assert_eq!(query.any_terms(), ["marketing", "not"]);
    }

    #[test]
    fn test_empty_phrase_is_ignored() {
        let query = BooleanQuery::parse(r#""" sales"#);
        assert!(query.required_phrases().is_empty());
        assert_eq!(query.any_terms(), ["sales"]);
    }

    #[test]
    fn test_not_before_empty_phrase_negates_nothing() {
        let query = BooleanQuery::parse(r#"NOT "" sales"#);
        assert!(query.excluded_terms().is_empty());
        assert_eq!(query.any_terms(), ["sales"]);
        assert!(query.matches("Head of Sales"));
    }

    #[test]
    fn test_not_before_connector_does_not_exclude_it() {
        let query = BooleanQuery::parse("sales NOT AND marketing");
        assert!(query.excluded_terms().is_empty());
        assert_eq!(query.any_terms(), ["sales", "marketing"]);
        assert!(query.matches("Head of Sales and Partnerships"));

        let query = BooleanQuery::parse("cto NOT OR");
        assert!(query.excluded_terms().is_empty());
        assert_eq!(query.any_terms(), ["cto"]);
    }

    #[test]
    fn test_filter_profiles_keeps_order_and_counts_exclusions() {
        let make = |name: &str, headline: &str| Profile {
            name: name.to_string(),
            headline: headline.to_string(),
            ..Default::default()
        };
        let profiles = vec![
            make("A", "Brand Manager, marketing"),
            make("B", "Marketing intern"),
            make("C", "Senior brand manager in marketing"),
        ];

        let outcome = filter_profiles(profiles, EXAMPLE_QUERY);
        let names: Vec<&str> = outcome.profiles.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["A", "C"]);
        assert_eq!(outcome.excluded_count, 1);
    }

    #[test]
    fn test_filter_profiles_with_empty_query_returns_all() {
        let profiles = vec![Profile::default(), Profile::default()];
        let outcome = filter_profiles(profiles, " ");
        assert_eq!(outcome.profiles.len(), 2);
        assert_eq!(outcome.excluded_count, 0);
    }
}
