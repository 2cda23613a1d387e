//! Character classes used by query handling.

pub const GEMINATE_MARKER: char = 'っ';

/// CJK unified ideographs as matched by query handling (U+4E00..U+9FAF)
pub fn is_han(c: char) -> bool {
    ('\u{4E00}'..='\u{9FAF}').contains(&c)
}

/// Latin letters plus the macron vowels used in Hepburn romanization
pub fn is_romaji_char(c: char) -> bool {
    c.is_ascii_alphabetic() || matches!(c, 'ō' | 'ū' | 'ā' | 'ī' | 'ē')
}

/// Keep only Han characters
pub fn only_han(text: &str) -> String {
    text.chars().filter(|&c| is_han(c)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn han_range() {
        assert!(is_han('学'));
        assert!(is_han('食'));
        assert!(!is_han('が'));
        assert!(!is_han('カ'));
        assert!(!is_han('a'));
    }

    #[test]
    fn only_han_strips_kana() {
        assert_eq!(only_han("食べる"), "食");
        assert_eq!(only_han("がっこう"), "");
        assert_eq!(only_han("学校"), "学校");
    }

    #[test]
    fn romaji_alphabet() {
        assert!("tōkyō".chars().all(is_romaji_char));
        assert!(!"taberu!".chars().all(is_romaji_char));
        assert!(!is_romaji_char('た'));
    }
}
