//! Table-driven Hepburn (and common Kunrei) romaji to hiragana conversion.

use std::collections::HashMap;

use kotoba_core::convert::RomajiConverter;
use kotoba_core::error::ConvertError;
use kotoba_core::script::GEMINATE_MARKER;

const MAX_KEY_LEN: usize = 3;

#[rustfmt::skip]
const ROMAJI_TO_HIRAGANA: &[(&str, &str)] = &[
    ("a", "あ"), ("i", "い"), ("u", "う"), ("e", "え"), ("o", "お"),
    ("ka", "か"), ("ki", "き"), ("ku", "く"), ("ke", "け"), ("ko", "こ"),
    ("ga", "が"), ("gi", "ぎ"), ("gu", "ぐ"), ("ge", "げ"), ("go", "ご"),
    ("sa", "さ"), ("shi", "し"), ("si", "し"), ("su", "す"), ("se", "せ"), ("so", "そ"),
    ("za", "ざ"), ("ji", "じ"), ("zi", "じ"), ("zu", "ず"), ("ze", "ぜ"), ("zo", "ぞ"),
    ("ta", "た"), ("chi", "ち"), ("ti", "ち"), ("tsu", "つ"), ("tu", "つ"), ("te", "て"), ("to", "と"),
    ("da", "だ"), ("di", "ぢ"), ("du", "づ"), ("de", "で"), ("do", "ど"),
    ("na", "な"), ("ni", "に"), ("nu", "ぬ"), ("ne", "ね"), ("no", "の"),
    ("ha", "は"), ("hi", "ひ"), ("fu", "ふ"), ("hu", "ふ"), ("he", "へ"), ("ho", "ほ"),
    ("ba", "ば"), ("bi", "び"), ("bu", "ぶ"), ("be", "べ"), ("bo", "ぼ"),
    ("pa", "ぱ"), ("pi", "ぴ"), ("pu", "ぷ"), ("pe", "ぺ"), ("po", "ぽ"),
    ("ma", "ま"), ("mi", "み"), ("mu", "む"), ("me", "め"), ("mo", "も"),
    ("ya", "や"), ("yu", "ゆ"), ("yo", "よ"),
    ("ra", "ら"), ("ri", "り"), ("ru", "る"), ("re", "れ"), ("ro", "ろ"),
    ("la", "ら"), ("li", "り"), ("lu", "る"), ("le", "れ"), ("lo", "ろ"),
    ("wa", "わ"), ("wi", "うぃ"), ("we", "うぇ"), ("wo", "を"),
    ("kya", "きゃ"), ("kyu", "きゅ"), ("kyo", "きょ"),
    ("gya", "ぎゃ"), ("gyu", "ぎゅ"), ("gyo", "ぎょ"),
    ("sha", "しゃ"), ("shu", "しゅ"), ("she", "しぇ"), ("sho", "しょ"),
    ("sya", "しゃ"), ("syu", "しゅ"), ("syo", "しょ"),
    ("ja", "じゃ"), ("ju", "じゅ"), ("je", "じぇ"), ("jo", "じょ"),
    ("jya", "じゃ"), ("jyu", "じゅ"), ("jyo", "じょ"),
    ("zya", "じゃ"), ("zyu", "じゅ"), ("zyo", "じょ"),
    ("cha", "ちゃ"), ("chu", "ちゅ"), ("che", "ちぇ"), ("cho", "ちょ"),
    ("tya", "ちゃ"), ("tyu", "ちゅ"), ("tyo", "ちょ"),
    ("dya", "ぢゃ"), ("dyu", "ぢゅ"), ("dyo", "ぢょ"),
    ("nya", "にゃ"), ("nyu", "にゅ"), ("nyo", "にょ"),
    ("hya", "ひゃ"), ("hyu", "ひゅ"), ("hyo", "ひょ"),
    ("bya", "びゃ"), ("byu", "びゅ"), ("byo", "びょ"),
    ("pya", "ぴゃ"), ("pyu", "ぴゅ"), ("pyo", "ぴょ"),
    ("mya", "みゃ"), ("myu", "みゅ"), ("myo", "みょ"),
    ("rya", "りゃ"), ("ryu", "りゅ"), ("ryo", "りょ"),
    ("fa", "ふぁ"), ("fi", "ふぃ"), ("fe", "ふぇ"), ("fo", "ふぉ"),
    ("thi", "てぃ"), ("dhi", "でぃ"), ("twu", "とぅ"),
    ("va", "ゔぁ"), ("vi", "ゔぃ"), ("vu", "ゔ"), ("ve", "ゔぇ"), ("vo", "ゔぉ"),
    ("xa", "ぁ"), ("xi", "ぃ"), ("xu", "ぅ"), ("xe", "ぇ"), ("xo", "ぉ"),
    ("xya", "ゃ"), ("xyu", "ゅ"), ("xyo", "ょ"), ("xtu", "っ"), ("xwa", "ゎ"),
    ("-", "ー"),
];

/// Macron vowels expand to the long-vowel spelling used in kana
fn expand_macron(c: char) -> Option<&'static str> {
    match c {
        'ā' => Some("aa"),
        'ī' => Some("ii"),
        'ū' => Some("uu"),
        'ē' => Some("ee"),
        'ō' => Some("ou"),
        _ => None,
    }
}

fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'i' | 'u' | 'e' | 'o')
}

pub struct HepburnConverter {
    table: HashMap<&'static str, &'static str>,
}

impl HepburnConverter {
    pub fn new() -> Self {
        Self {
            table: ROMAJI_TO_HIRAGANA.iter().copied().collect(),
        }
    }

    /// Convert latin text to hiragana. Unconvertible letters are kept as-is.
    pub fn convert(&self, latin: &str) -> String {
        let mut chars: Vec<char> = Vec::with_capacity(latin.len());
        for c in latin.chars().flat_map(char::to_lowercase) {
            match expand_macron(c) {
                Some(expanded) => chars.extend(expanded.chars()),
                None => chars.push(c),
            }
        }

        let mut out = String::with_capacity(chars.len() * 3);
        let mut i = 0;

        while i < chars.len() {
            let c = chars[i];
            let next = chars.get(i + 1).copied();

            if c == 'n' {
                match next {
                    None => {
                        out.push('ん');
                        i += 1;
                        continue;
                    }
                    Some('\'') => {
                        out.push('ん');
                        i += 2;
                        continue;
                    }
                    Some('n') => {
                        out.push('ん');
                        // "nn" before a vowel is ん + な-row ("konnichiwa")
                        let after = chars.get(i + 2).copied();
                        i += if after.is_some_and(|a| is_vowel(a) || a == 'y') { 1 } else { 2 };
                        continue;
                    }
                    Some(n) if !is_vowel(n) && n != 'y' => {
                        out.push('ん');
                        i += 1;
                        continue;
                    }
                    _ => {}
                }
            }

            // Doubled consonant, or "tch"
            if c.is_ascii_alphabetic() && !is_vowel(c) {
                if next == Some(c) || (c == 't' && next == Some('c')) {
                    out.push(GEMINATE_MARKER);
                    i += 1;
                    continue;
                }
            }

            let mut matched = false;
            for len in (1..=MAX_KEY_LEN.min(chars.len() - i)).rev() {
                let key: String = chars[i..i + len].iter().collect();
                if let Some(kana) = self.table.get(key.as_str()) {
                    out.push_str(kana);
                    i += len;
                    matched = true;
                    break;
                }
            }

            if !matched {
                if c != '\'' {
                    out.push(c);
                }
                i += 1;
            }
        }

        out
    }
}

impl Default for HepburnConverter {
    fn default() -> Self {
        Self::new()
    }
}

impl RomajiConverter for HepburnConverter {
    fn to_hiragana(&self, latin: &str) -> Result<String, ConvertError> {
        Ok(self.convert(latin))
    }
}
