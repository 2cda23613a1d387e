use serde::{Deserialize, Serialize};

/// Which Chinese variant the Han converter expects as input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HanRegion {
    #[default]
    Simplified,
    Traditional,
    Taiwan,
    HongKong,
}

/// Optional OpenCC-format character tables extending the built-in ones
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(default)]
pub struct ConverterConfig {
    pub region: HanRegion,
    /// First stage for `region` (s2t, tw2t or hk2t)
    pub to_traditional: Option<String>,
    pub traditional_to_japanese: Option<String>,
}
