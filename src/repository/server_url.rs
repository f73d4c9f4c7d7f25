use super::UrlRepository;
use crate::HassResult;

use async_trait::async_trait;
use log::debug;
use parking_lot::RwLock;
use url::Url;

/// Keeps the active server url for the lifetime of the process
#[derive(Debug, Default)]
pub struct MemoryUrlRepository {
    url: RwLock<Option<Url>>,
}

impl MemoryUrlRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_url(url: Url) -> Self {
        MemoryUrlRepository {
            url: RwLock::new(Some(url)),
        }
    }
}

#[async_trait]
impl UrlRepository for MemoryUrlRepository {
    async fn save_url(&self, url: &str) -> HassResult<()> {
        let parsed = Url::parse(url)?;
        debug!("saving server url {}", parsed);
        *self.url.write() = Some(parsed);
        Ok(())
    }

    async fn get_url(&self) -> Option<Url> {
        self.url.read().clone()
    }
}
