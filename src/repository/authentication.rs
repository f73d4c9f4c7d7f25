use super::{AuthenticationRepository, UrlRepository};
use crate::types::{CompanionConfig, LoginFlowInit, LoginFlowRequest, Session};
use crate::{HassError, HassResult};

use async_trait::async_trait;
use log::{debug, info};
use parking_lot::RwLock;
use std::sync::Arc;
use url::Url;

/// [`AuthenticationRepository`] speaking to the `/auth` REST endpoints of the saved server
pub struct HttpAuthenticationRepository {
    http: reqwest::Client,
    url_repository: Arc<dyn UrlRepository>,
    client_id: String,
    redirect_uri: String,
    session: RwLock<Option<Session>>,
}

impl HttpAuthenticationRepository {
    pub fn new(config: &CompanionConfig, url_repository: Arc<dyn UrlRepository>) -> Self {
        HttpAuthenticationRepository {
            http: reqwest::Client::new(),
            url_repository,
            client_id: config.client_id.clone(),
            redirect_uri: config.redirect_uri.clone(),
            session: RwLock::new(None),
        }
    }

    /// Tokens from the last successful authorization code exchange
    pub fn session(&self) -> Option<Session> {
        self.session.read().clone()
    }

    /// `{base}/auth/{name}`, keeping any sub path the server is published under
    async fn endpoint(&self, name: &str) -> HassResult<Url> {
        let mut url = self
            .url_repository
            .get_url()
            .await
            .ok_or(HassError::MissingServerUrl)?;
        url.set_query(None);
        url.set_fragment(None);
        if url.cannot_be_a_base() {
            return Err(HassError::Generic(format!("{} cannot be a base url", url)));
        }
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push("auth").push(name);
        }
        Ok(url)
    }
}

#[async_trait]
impl AuthenticationRepository for HttpAuthenticationRepository {
    async fn initiate_login_flow(&self) -> HassResult<LoginFlowInit> {
        let url = self.endpoint("login_flow").await?;
        let body = LoginFlowRequest {
            client_id: &self.client_id,
            handler: [Some("homeassistant"), None],
            redirect_uri: &self.redirect_uri,
        };

        let flow: LoginFlowInit = self
            .http
            .post(url)
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        debug!("login flow {} at step {}", flow.flow_id, flow.step_id);
        Ok(flow)
    }

    async fn build_auth_url(&self) -> HassResult<Url> {
        let mut url = self.endpoint("authorize").await?;
        url.query_pairs_mut()
            .append_pair("response_type", "code")
            .append_pair("client_id", &self.client_id)
            .append_pair("redirect_uri", &self.redirect_uri);
        Ok(url)
    }

    async fn register_authorization_code(&self, code: &str) -> HassResult<()> {
        let url = self.endpoint("token").await?;
        let form = [
            ("grant_type", "authorization_code"),
            ("code", code),
            ("client_id", self.client_id.as_str()),
        ];

        let session: Session = self
            .http
            .post(url)
            .form(&form)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        info!("authorization code exchanged, token valid for {}s", session.expires_in);
        *self.session.write() = Some(session);
        Ok(())
    }
}
