use kotoba_core::script::is_romaji_char;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Script {
    /// Hepburn-style latin input
    Romaji,
    /// Kana, kanji or Chinese characters (anything else, including empty input)
    HanOrJapanese,
}

pub fn classify(text: &str) -> Script {
    if !text.is_empty() && text.chars().all(is_romaji_char) {
        Script::Romaji
    } else {
        Script::HanOrJapanese
    }
}
