//! Respelling variants for fault-tolerant lookup.
//!
//! Rules are applied once to the input and unioned, never iterated.

use std::collections::BTreeSet;

use kotoba_core::script::{GEMINATE_MARKER, only_han};

/// Moras that may follow a geminate marker (k-, s-, t-, p-rows). Palatalized
/// digraphs (きゃ, しょ, ちゅ, ぴょ, ...) start with one of these.
const GEMINATE_FOLLOWERS: &[char] = &[
    'か', 'き', 'く', 'け', 'こ', 'さ', 'し', 'す', 'せ', 'そ', 'た', 'ち', 'つ', 'て', 'と', 'ぱ',
    'ぴ', 'ぷ', 'ぺ', 'ぽ', 'カ', 'キ', 'ク', 'ケ', 'コ', 'サ', 'シ', 'ス', 'セ', 'ソ', 'タ', 'チ',
    'ツ', 'テ', 'ト', 'パ', 'ピ', 'プ', 'ペ', 'ポ',
];

fn can_follow_geminate(c: char) -> bool {
    GEMINATE_FOLLOWERS.contains(&c)
}

/// Geminate deletion and insertion variants
pub fn geminate_variants(query: &str) -> BTreeSet<String> {
    let mut variants = BTreeSet::new();

    if query.contains(GEMINATE_MARKER) {
        variants.insert(query.replace(GEMINATE_MARKER, ""));
    }

    let chars: Vec<char> = query.chars().collect();
    for i in 1..chars.len() {
        if can_follow_geminate(chars[i]) && chars[i - 1] != GEMINATE_MARKER {
            let mut variant: String = chars[..i].iter().collect();
            variant.push(GEMINATE_MARKER);
            variant.extend(&chars[i..]);
            variants.insert(variant);
        }
    }

    variants
}

/// Geminate variants plus trailing-character truncation and the Han-only
/// reduction. Never contains the empty string.
pub fn tolerant_queries(query: &str) -> BTreeSet<String> {
    let mut queries = geminate_variants(query);

    let len = query.chars().count();
    if len > 2 {
        queries.insert(query.chars().take(len - 1).collect());
    }

    let han = only_han(query);
    if !han.is_empty() && han != query {
        queries.insert(han);
    }

    queries.remove("");
    queries
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn deletion_removes_every_marker() {
        let v = geminate_variants("がっこう");
        assert!(v.contains("がこう"));
        assert_eq!(geminate_variants("ちょっと").first().map(String::as_str), Some("ちょと"));
        assert!(geminate_variants("もっとっ").contains("もと"));
    }

    #[test]
    fn insertion_before_eligible_moras() {
        // か at index 1 follows が; こ follows っ; う is not eligible
        assert_eq!(geminate_variants("がか"), set(&["がっか"]));
        assert_eq!(geminate_variants("がっこう"), set(&["がこう"]));
        assert_eq!(geminate_variants("きて"), set(&["きって"]));
    }

    #[test]
    fn first_position_never_gets_a_marker() {
        assert!(geminate_variants("か").is_empty());
        assert!(geminate_variants("").is_empty());
        assert!(geminate_variants("あい").is_empty());
    }

    #[test]
    fn katakana_followers_are_eligible() {
        assert_eq!(geminate_variants("ロケト"), set(&["ロっケト", "ロケっト"]));
    }

    #[test]
    fn generation_is_idempotent_over_the_union() {
        let once = geminate_variants("がこう");
        let mut union = once.clone();
        union.extend(once.iter().cloned());
        assert_eq!(union, once);
    }

    #[test]
    fn tolerant_adds_truncation_and_han_reduction() {
        let q = tolerant_queries("食べもの");
        assert!(q.contains("食べも"));
        assert!(q.contains("食"));
        assert!(!q.contains(""));
    }

    #[test]
    fn short_queries_are_not_truncated() {
        let q = tolerant_queries("学校");
        assert!(!q.contains("学"));
        assert!(q.is_empty());
    }
}
