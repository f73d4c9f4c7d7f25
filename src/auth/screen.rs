use super::{
    error_message, AuthenticationPresenter, AuthenticationView, ErrorMessage, ScreenHost,
    SslError, WebResourceError, WebView,
};
use crate::types::CompanionConfig;

use log::{debug, warn};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebViewSettings {
    pub javascript_enabled: bool,
    pub dom_storage_enabled: bool,
    pub user_agent: String,
}

/// Modal shown when the login page failed to load
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorDialog {
    pub title: ErrorMessage,
    pub message: ErrorMessage,
}

struct ScreenView<W, H> {
    web_view: W,
    host: H,
}

impl<W: WebView, H: ScreenHost> ScreenView<W, H> {
    fn show_error_dialog(
        &mut self,
        message: ErrorMessage,
        ssl_error: Option<&SslError>,
        error: Option<&WebResourceError>,
    ) {
        if !self.host.is_started() {
            debug!("screen is not started, dropping error dialog");
            return;
        }
        self.host.show_dialog(ErrorDialog {
            title: ErrorMessage::ConnectionFailed,
            message: error_message(message, ssl_error, error),
        });
        self.host.pop_back_stack();
    }
}

impl<W: WebView, H: ScreenHost> AuthenticationView for ScreenView<W, H> {
    fn load_url(&mut self, url: &str) {
        self.web_view.load_url(url);
    }

    fn open_webview(&mut self) {
        self.host.on_authentication_success();
    }

    fn show_error(&mut self, message: ErrorMessage) {
        self.show_error_dialog(message, None, None);
    }
}

/// Onboarding screen hosting the login page.
///
/// The host forwards its browser callbacks here, navigation decisions are
/// left to the [`AuthenticationPresenter`].
pub struct AuthenticationScreen<W, H> {
    presenter: Arc<dyn AuthenticationPresenter>,
    settings: WebViewSettings,
    view: ScreenView<W, H>,
}

impl<W: WebView, H: ScreenHost> AuthenticationScreen<W, H> {
    pub fn new(
        presenter: Arc<dyn AuthenticationPresenter>,
        web_view: W,
        host: H,
        config: &CompanionConfig,
    ) -> Self {
        AuthenticationScreen {
            presenter,
            settings: WebViewSettings {
                javascript_enabled: true,
                dom_storage_enabled: true,
                user_agent: config.user_agent(),
            },
            view: ScreenView { web_view, host },
        }
    }

    /// Configures the browser, call before the view is shown.
    pub fn create(&mut self) {
        self.view.web_view.apply_settings(&self.settings);
    }

    pub async fn view_created(&mut self) {
        self.presenter.on_view_ready(&mut self.view).await;
    }

    /// `true` when the browser must not navigate to `url` itself
    pub async fn should_override_url_loading(&mut self, url: &str) -> bool {
        self.presenter.on_redirect_url(&mut self.view, url).await
    }

    pub fn on_received_error(&mut self, error: WebResourceError) {
        warn!("login page failed to load: {} {}", error.error_code, error.description);
        self.view
            .show_error_dialog(ErrorMessage::WebviewError, None, Some(&error));
    }

    pub fn on_received_ssl_error(&mut self, error: SslError) {
        warn!("certificate error {} for {}", error.primary_error, error.url);
        self.view
            .show_error_dialog(ErrorMessage::SslError, Some(&error), None);
    }

    pub fn destroy(&mut self) {
        self.presenter.on_finish();
    }

    pub fn settings(&self) -> &WebViewSettings {
        &self.settings
    }

    pub fn host(&self) -> &H {
        &self.view.host
    }

    pub fn web_view(&self) -> &W {
        &self.view.web_view
    }
}
