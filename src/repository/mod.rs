//! Backends the companion components talk to
//!
//! Every component receives these as trait objects, the concrete
//! implementations below speak to a Home Assistant server or a local store.

mod authentication;
mod integration;
mod server_url;
mod tile_store;

pub use authentication::HttpAuthenticationRepository;
pub use integration::HassIntegrationRepository;
pub use server_url::MemoryUrlRepository;
pub use tile_store::TileStore;

use crate::types::{HassEntity, LoginFlowInit, TileData};
use crate::HassResult;

use async_trait::async_trait;
use serde_json::Value;

/// Login flow negotiation with the server that is currently saved in the [`UrlRepository`]
#[async_trait]
pub trait AuthenticationRepository: Send + Sync {
    async fn initiate_login_flow(&self) -> HassResult<LoginFlowInit>;

    /// The page the embedded browser opens to sign in
    async fn build_auth_url(&self) -> HassResult<url::Url>;

    async fn register_authorization_code(&self, code: &str) -> HassResult<()>;
}

/// Entity state and service calls
#[async_trait]
pub trait IntegrationRepository: Send + Sync {
    async fn get_entity(&self, entity_id: &str) -> HassResult<HassEntity>;

    async fn call_service(&self, domain: &str, service: &str, service_data: Value)
        -> HassResult<()>;
}

#[async_trait]
pub trait UrlRepository: Send + Sync {
    async fn save_url(&self, url: &str) -> HassResult<()>;

    async fn get_url(&self) -> Option<url::Url>;
}

/// Lookup of persisted tile mappings
pub trait TileDao: Send + Sync {
    fn get(&self, tile_id: &str) -> HassResult<Option<TileData>>;
}
