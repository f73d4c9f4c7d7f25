use super::IntegrationRepository;
use crate::client::HassClient;
use crate::types::{CompanionConfig, HassEntity};
use crate::{HassError, HassResult};

use async_trait::async_trait;
use log::{debug, info};
use serde_json::Value;
use tokio::sync::Mutex;

/// [`IntegrationRepository`] backed by an authenticated websocket session
pub struct HassIntegrationRepository {
    client: Mutex<HassClient>,
}

impl HassIntegrationRepository {
    pub fn new(client: HassClient) -> Self {
        HassIntegrationRepository {
            client: Mutex::new(client),
        }
    }

    /// Opens the websocket for `config.server_url` and authenticates with `config.token`.
    pub async fn connect(config: &CompanionConfig) -> HassResult<Self> {
        let token = config.token.as_deref().ok_or_else(|| {
            HassError::AuthenticationFailed("no access token configured".to_owned())
        })?;
        let url = config.websocket_url()?;
        info!("connecting to {}", url);

        let mut client = HassClient::new(url.as_str()).await?;
        client.auth_with_longlivedtoken(token).await?;
        Ok(Self::new(client))
    }
}

#[async_trait]
impl IntegrationRepository for HassIntegrationRepository {
    async fn get_entity(&self, entity_id: &str) -> HassResult<HassEntity> {
        let states = self.client.lock().await.get_states().await?;
        states
            .into_iter()
            .find(|entity| entity.entity_id == entity_id)
            .ok_or_else(|| HassError::EntityNotFound(entity_id.to_owned()))
    }

    async fn call_service(
        &self,
        domain: &str,
        service: &str,
        service_data: Value,
    ) -> HassResult<()> {
        debug!("calling {}.{} with {}", domain, service, service_data);
        self.client
            .lock()
            .await
            .call_service(domain.to_owned(), service.to_owned(), Some(service_data))
            .await
    }
}
