use std::path::PathBuf;
use reqwest::Url;

/// Client configs
#[derive(Debug, Clone)]
pub(crate) struct ClientConfig {
    /// base url of the restaurant backend
    pub api_base: Url,
    /// file standing in for the browser's local storage
    pub storage_path: PathBuf,
}

impl ClientConfig {
    pub fn new(api_base: Url, storage_path: PathBuf) -> Self {
        Self {
            api_base,
            storage_path,
        }
    }
}
