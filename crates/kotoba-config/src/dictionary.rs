use serde::{Deserialize, Serialize};

fn default_path() -> String {
    "data/jmdict_eng.json".to_string()
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct DictionaryConfig {
    /// JMdict-simplified JSON file
    #[serde(default = "default_path")]
    pub path: String,
    /// Extra dictionaries merged over the main one, later files win by id
    #[serde(default)]
    pub additional_paths: Vec<String>,
}

impl Default for DictionaryConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
            additional_paths: vec![],
        }
    }
}
