use serde::{Deserialize, Serialize};

fn default_db_path() -> String {
    "favorites.db".to_string()
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct FavoritesConfig {
    #[serde(default = "default_db_path")]
    pub db_path: String,
}

impl Default for FavoritesConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
        }
    }
}
