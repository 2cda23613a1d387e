use unicode_normalization::UnicodeNormalization;

pub trait Preprocessor {
    // Default query preprocessor
    fn process(&self, text: &str) -> String {
        let mut text = text.trim().to_string();

        if text.is_empty() {
            return text;
        }

        // Unicode normalization (NFKC): full-width latin, half-width kana
        text = text.nfkc().collect();

        text = text.replace(['\n', '\r'], "").trim().to_string();

        text
    }
}

pub struct DefaultPreprocessor;
impl Preprocessor for DefaultPreprocessor {}
