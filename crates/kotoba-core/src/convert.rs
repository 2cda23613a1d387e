use crate::error::ConvertError;

/// Romanized Japanese to kana
pub trait RomajiConverter: Send + Sync {
    /// Primary hiragana reading of the latin input
    fn to_hiragana(&self, latin: &str) -> Result<String, ConvertError>;
}

/// Chinese characters to Japanese new-style kanji
pub trait HanConverter: Send + Sync {
    /// Convert one character. Characters outside the tables map to themselves.
    fn convert_char(&self, c: char) -> Result<String, ConvertError>;

    /// Per-character, context-free conversion concatenated positionally
    fn convert(&self, text: &str) -> Result<String, ConvertError> {
        let mut out = String::with_capacity(text.len());
        for c in text.chars() {
            out.push_str(&self.convert_char(c)?);
        }
        Ok(out)
    }
}
