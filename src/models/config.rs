//! Configuration model loaded from external sources.

use serde::Deserialize;

fn default_page_size() -> usize {
    20
}

#[derive(Clone, Debug, Deserialize)]
/// Settings shared by the command-line front end.
pub struct AppConfig {
    pub database_url: String,
    #[serde(default = "default_page_size")]
    pub default_page_size: usize,
}
