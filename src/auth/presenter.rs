use super::{AuthenticationPresenter, AuthenticationView, ErrorMessage};
use crate::repository::AuthenticationRepository;
use crate::types::CompanionConfig;

use async_trait::async_trait;
use log::{debug, error, info};
use std::sync::Arc;
use url::Url;

/// Opens the authorize page and exchanges the code once the login page
/// redirects to the app's callback uri
pub struct AuthenticationPresenterImpl {
    authentication: Arc<dyn AuthenticationRepository>,
    redirect_uri: String,
}

impl AuthenticationPresenterImpl {
    pub fn new(
        authentication: Arc<dyn AuthenticationRepository>,
        config: &CompanionConfig,
    ) -> Self {
        AuthenticationPresenterImpl {
            authentication,
            redirect_uri: config.redirect_uri.clone(),
        }
    }

    fn authorization_code(&self, url: &str) -> Option<String> {
        if !url.starts_with(&self.redirect_uri) {
            return None;
        }
        Url::parse(url)
            .ok()?
            .query_pairs()
            .find(|(key, _)| key == "code")
            .map(|(_, code)| code.into_owned())
            .filter(|code| !code.trim().is_empty())
    }
}

#[async_trait]
impl AuthenticationPresenter for AuthenticationPresenterImpl {
    async fn on_view_ready(&self, view: &mut dyn AuthenticationView) {
        match self.authentication.build_auth_url().await {
            Ok(url) => view.load_url(url.as_str()),
            Err(err) => {
                error!("Unable to create auth url: {}", err);
                view.show_error(ErrorMessage::WebviewError);
            }
        }
    }

    async fn on_redirect_url(&self, view: &mut dyn AuthenticationView, url: &str) -> bool {
        let Some(code) = self.authorization_code(url) else {
            return false;
        };

        match self.authentication.register_authorization_code(&code).await {
            Ok(()) => {
                info!("authorization code registered");
                view.open_webview();
            }
            Err(err) => {
                error!("Unable to register code: {}", err);
                view.show_error(ErrorMessage::WebviewError);
            }
        }
        true
    }

    fn on_finish(&self) {
        debug!("authentication presenter finished");
    }
}
