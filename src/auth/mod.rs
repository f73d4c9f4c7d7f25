//! Sign in through the Home Assistant login page hosted in an embedded browser

mod messages;
mod presenter;
mod screen;

pub use messages::{
    error_message, ErrorMessage, SslError, SslErrorKind, WebResourceError, ERROR_AUTHENTICATION,
    ERROR_FAILED_SSL_HANDSHAKE, ERROR_HOST_LOOKUP, ERROR_PROXY_AUTHENTICATION,
    ERROR_UNSUPPORTED_AUTH_SCHEME,
};
pub use presenter::AuthenticationPresenterImpl;
pub use screen::{AuthenticationScreen, ErrorDialog, WebViewSettings};

use async_trait::async_trait;

/// What the presenter may ask of the authentication screen
pub trait AuthenticationView: Send {
    fn load_url(&mut self, url: &str);
    fn open_webview(&mut self);
    fn show_error(&mut self, message: ErrorMessage);
}

#[async_trait]
pub trait AuthenticationPresenter: Send + Sync {
    async fn on_view_ready(&self, view: &mut dyn AuthenticationView);

    /// `true` when `url` completed the login and must not be loaded by the browser
    async fn on_redirect_url(&self, view: &mut dyn AuthenticationView, url: &str) -> bool;

    fn on_finish(&self);
}

/// Embedded browser component
pub trait WebView: Send {
    fn apply_settings(&mut self, settings: &WebViewSettings);
    fn load_url(&mut self, url: &str);
}

/// Notified once the user signed in
pub trait AuthenticationListener {
    fn on_authentication_success(&mut self);
}

/// The navigation container showing the screen
pub trait ScreenHost: AuthenticationListener + Send {
    /// Dialogs can only be shown while the screen is started
    fn is_started(&self) -> bool;
    fn show_dialog(&mut self, dialog: ErrorDialog);
    fn pop_back_stack(&mut self);
}
